//! What opening a list found in the region.

use std::fmt;

/// Why a list's persisted state was discarded on open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Corruption {
    /// The stored checksum does not match the data and count.
    ChecksumMismatch {
        /// Checksum read from the footer.
        stored: u16,
        /// Checksum recomputed from the region.
        computed: u16,
    },
    /// The checksum matched but the count exceeds the list's capacity.
    ///
    /// Happens when the region was last written by a list of a smaller
    /// record type.
    CountOutOfRange {
        /// Count read from the footer.
        stored: u16,
        /// Capacity for this record type.
        max: u16,
    },
}

impl fmt::Display for Corruption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChecksumMismatch { stored, computed } => {
                write!(
                    f,
                    "checksum mismatch: stored {stored:#06x}, computed {computed:#06x}"
                )
            }
            Self::CountOutOfRange { stored, max } => {
                write!(f, "stored count {stored} exceeds capacity {max}")
            }
        }
    }
}

/// Outcome of [`RecordList::open`](crate::RecordList::open).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpenStatus {
    /// The footer validated; the list holds the persisted records.
    Intact,
    /// The region did not hold a valid list. It has been reset to empty
    /// and a fresh footer written.
    Recovered(Corruption),
}

impl OpenStatus {
    /// Whether the persisted records were kept.
    pub fn is_intact(&self) -> bool {
        matches!(self, Self::Intact)
    }

    /// The corruption that forced a reset, if any.
    pub fn corruption(&self) -> Option<Corruption> {
        match self {
            Self::Intact => None,
            Self::Recovered(c) => Some(*c),
        }
    }
}

//! Error types for retained memory access.
//!
//! Every error here is reported before any cell is written: a call that
//! returns `Err` has left the region byte-for-byte unchanged.

use std::error::Error;
use std::fmt;

/// Errors from byte-, word-, and dword-level region access.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// A bulk operation was asked to touch zero bytes.
    ZeroLength,
    /// A byte range extends past the end of the region.
    OutOfRange {
        /// First byte of the requested range.
        offset: u16,
        /// Length of the requested range in bytes.
        len: usize,
        /// Region size in bytes.
        size: u16,
    },
    /// A granular index is past the last byte, word, or dword.
    IndexOutOfRange {
        /// The requested index, in units of the access granularity.
        index: u16,
        /// Number of addressable units at that granularity.
        limit: u16,
    },
    /// A move whose source and destination are the same offset.
    SameLocation {
        /// The shared offset.
        offset: u16,
    },
    /// The backing store reports a cell count the region cannot address.
    InvalidCellCount {
        /// Cell count reported by the backing store.
        count: u16,
        /// Largest supported cell count.
        max: u16,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroLength => write!(f, "zero-length range"),
            Self::OutOfRange { offset, len, size } => {
                write!(
                    f,
                    "range out of bounds: offset {offset} + {len} bytes exceeds region of {size} bytes"
                )
            }
            Self::IndexOutOfRange { index, limit } => {
                write!(f, "index {index} out of range (limit {limit})")
            }
            Self::SameLocation { offset } => {
                write!(f, "move source and destination are both offset {offset}")
            }
            Self::InvalidCellCount { count, max } => {
                write!(f, "cell count {count} unsupported (must be 1..={max})")
            }
        }
    }
}

impl Error for StoreError {}

/// Errors from record list operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListError {
    /// The record index is not below the current length.
    IndexOutOfRange {
        /// The requested index.
        index: u16,
        /// Current number of records.
        len: u16,
    },
    /// The list is full and eviction was not permitted.
    Full {
        /// Maximum number of records.
        capacity: u16,
    },
    /// The store does not span exactly one region.
    RegionSize {
        /// Required region size in bytes.
        expected: u16,
        /// Size of the supplied store in bytes.
        found: u16,
    },
    /// The underlying store rejected an access.
    Store(StoreError),
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "record index {index} out of range (len {len})")
            }
            Self::Full { capacity } => write!(f, "list full ({capacity} records)"),
            Self::RegionSize { expected, found } => {
                write!(f, "store is {found} bytes, record list needs {expected}")
            }
            Self::Store(e) => write!(f, "store access failed: {e}"),
        }
    }
}

impl Error for ListError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for ListError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

/// Errors from validating a region configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The region has no cells, or more than a store can address.
    InvalidCellCount {
        /// The configured cell count.
        count: u16,
        /// Largest supported cell count.
        max: u16,
    },
    /// `base_cell + cell_count` does not fit the cell index space.
    BaseOverflow {
        /// The configured base cell.
        base_cell: u16,
        /// The configured cell count.
        cell_count: u16,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCellCount { count, max } => {
                write!(f, "cell count {count} unsupported (must be 1..={max})")
            }
            Self::BaseOverflow {
                base_cell,
                cell_count,
            } => {
                write!(
                    f,
                    "region of {cell_count} cells at base {base_cell} overflows the cell index space"
                )
            }
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_error_wraps_store_error() {
        let err: ListError = StoreError::ZeroLength.into();
        assert_eq!(err, ListError::Store(StoreError::ZeroLength));
        assert!(err.source().is_some());
    }

    #[test]
    fn display_names_the_bounds() {
        let err = StoreError::OutOfRange {
            offset: 510,
            len: 4,
            size: 512,
        };
        assert_eq!(
            err.to_string(),
            "range out of bounds: offset 510 + 4 bytes exceeds region of 512 bytes"
        );
        let err = ListError::Full { capacity: 42 };
        assert_eq!(err.to_string(), "list full (42 records)");
    }
}

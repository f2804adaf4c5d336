//! The 4-byte footer in the region's last cell.
//!
//! `count` is the low word (bytes 508..510) and `crc` the high word
//! (bytes 510..512), so the whole footer moves in a single cell access.

use rtcmem_core::layout::{COUNT_WORD, CRC_WORD, REGION_CELLS};
use rtcmem_core::{CellStore, StoreError};
use rtcmem_store::WordStore;

use crate::crc::region_crc;

const FOOTER_CELL: u16 = REGION_CELLS - 1;

// The footer cell holds exactly the two footer words.
const _: () = assert!(COUNT_WORD / 2 == FOOTER_CELL && CRC_WORD / 2 == FOOTER_CELL);

/// Record count and checksum as persisted in the region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Footer {
    /// Number of records.
    pub count: u16,
    /// Checksum over the data cells and `count`.
    pub crc: u16,
}

impl Footer {
    /// Read the footer as currently stored.
    pub fn read<C: CellStore>(store: &WordStore<C>) -> Result<Self, StoreError> {
        let cell = store.read_dword(FOOTER_CELL)?;
        Ok(Self {
            count: cell as u16,
            crc: (cell >> 16) as u16,
        })
    }

    /// A footer for `count` records over the data currently in `store`.
    pub fn seal<C: CellStore>(store: &WordStore<C>, count: u16) -> Result<Self, StoreError> {
        Ok(Self {
            count,
            crc: region_crc(store, count)?,
        })
    }

    /// Persist the footer.
    pub fn write<C: CellStore>(&self, store: &mut WordStore<C>) -> Result<(), StoreError> {
        store.write_dword(FOOTER_CELL, (self.crc as u32) << 16 | self.count as u32)
    }

    /// Whether `crc` matches the data currently in `store`.
    pub fn matches<C: CellStore>(&self, store: &WordStore<C>) -> Result<bool, StoreError> {
        Ok(region_crc(store, self.count)? == self.crc)
    }
}

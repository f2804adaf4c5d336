//! Geometry of the retained region and its record-list footer.
//!
//! ```text
//! offset 0 .. 508    data area (packed records, unused tail bytes included)
//! offset 508 .. 510  count, u16 (word index 254)
//! offset 510 .. 512  crc,   u16 (word index 255)
//! ```

/// Bytes per platform cell.
pub const CELL_SIZE: u16 = 4;

/// Total region capacity in bytes.
pub const REGION_SIZE: u16 = 512;

/// Total region capacity in cells.
pub const REGION_CELLS: u16 = REGION_SIZE / CELL_SIZE;

/// Bytes reserved at the end of the region for the list footer.
pub const FOOTER_SIZE: u16 = 4;

/// Bytes available for record data.
pub const DATA_SIZE: u16 = REGION_SIZE - FOOTER_SIZE;

/// Cells covered by the data area. These are the cells folded into the checksum.
pub const DATA_CELLS: u16 = DATA_SIZE / CELL_SIZE;

/// Word index of the footer's record count.
pub const COUNT_WORD: u16 = (REGION_SIZE - 2) / 2 - 1;

/// Word index of the footer's checksum.
pub const CRC_WORD: u16 = (REGION_SIZE - 2) / 2;

/// Largest cell count a store accepts, so every byte offset fits in a `u16`.
pub const MAX_CELLS: u16 = u16::MAX / CELL_SIZE;

/// Split a byte offset into its cell index and byte lane.
#[inline]
pub const fn cell_of(offset: u16) -> (u16, u16) {
    (offset / CELL_SIZE, offset % CELL_SIZE)
}

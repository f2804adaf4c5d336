//! The word-addressable store and its granular accessors.
//!
//! Granular indices are in units of the access width: `read_word(i)`
//! reads bytes `2i..2i + 2`, `read_dword(i)` is cell `i`.

use rtcmem_core::layout::{cell_of, CELL_SIZE, MAX_CELLS};
use rtcmem_core::{CellStore, StoreError};
use smallvec::SmallVec;

use crate::lane::{byte_lane, with_byte_lane, with_word_lane, word_lane};

/// Inline buffer returned by [`WordStore::load`].
///
/// Records and footers are small, so most loads never touch the heap.
pub type LoadBuf = SmallVec<[u8; 32]>;

/// Byte-, word-, and dword-addressable view of a [`CellStore`].
///
/// Owns its handle `C`. Pass `&mut cells` to borrow a region owned
/// elsewhere; the blanket `CellStore` impl for `&mut C` makes that work.
pub struct WordStore<C> {
    pub(crate) cells: C,
    size: u16,
}

impl<C: CellStore> WordStore<C> {
    /// Wrap a cell store.
    ///
    /// Fails with [`StoreError::InvalidCellCount`] when the store reports
    /// zero cells or more than [`MAX_CELLS`].
    pub fn new(cells: C) -> Result<Self, StoreError> {
        let count = cells.cell_count();
        if count == 0 || count > MAX_CELLS {
            return Err(StoreError::InvalidCellCount {
                count,
                max: MAX_CELLS,
            });
        }
        tracing::debug!(
            cells = count,
            base = cells.base_offset(),
            "word store attached"
        );
        Ok(Self {
            cells,
            size: count * CELL_SIZE,
        })
    }

    /// Region size in bytes.
    pub fn size(&self) -> u16 {
        self.size
    }

    /// Region size in cells.
    pub fn cell_count(&self) -> u16 {
        self.size / CELL_SIZE
    }

    /// The underlying cell store.
    pub fn cells(&self) -> &C {
        &self.cells
    }

    /// Mutable access to the underlying cell store.
    pub fn cells_mut(&mut self) -> &mut C {
        &mut self.cells
    }

    /// Release the underlying cell store.
    pub fn into_inner(self) -> C {
        self.cells
    }

    /// Validate a bulk byte range: non-empty and within the region.
    pub(crate) fn check_range(&self, offset: u16, len: usize) -> Result<(), StoreError> {
        if len == 0 {
            return Err(StoreError::ZeroLength);
        }
        if offset as usize + len > self.size as usize {
            return Err(StoreError::OutOfRange {
                offset,
                len,
                size: self.size,
            });
        }
        Ok(())
    }

    fn check_index(index: u16, limit: u16) -> Result<(), StoreError> {
        if index >= limit {
            return Err(StoreError::IndexOutOfRange { index, limit });
        }
        Ok(())
    }

    /// Read byte `index`.
    pub fn read_byte(&self, index: u16) -> Result<u8, StoreError> {
        Self::check_index(index, self.size)?;
        let (cell, lane) = cell_of(index);
        Ok(byte_lane(self.cells.read_cell(cell), lane))
    }

    /// Byte at `index`, or `None` past the end of the region.
    pub fn byte(&self, index: u16) -> Option<u8> {
        self.read_byte(index).ok()
    }

    /// Read 16-bit word `index` (bytes `2 * index` and `2 * index + 1`).
    pub fn read_word(&self, index: u16) -> Result<u16, StoreError> {
        Self::check_index(index, self.size / 2)?;
        Ok(word_lane(self.cells.read_cell(index / 2), index % 2))
    }

    /// Read 32-bit dword `index`, which is cell `index`.
    pub fn read_dword(&self, index: u16) -> Result<u32, StoreError> {
        Self::check_index(index, self.cell_count())?;
        Ok(self.cells.read_cell(index))
    }

    /// Read `out.len()` consecutive dwords starting at dword `index`.
    pub fn read_dwords(&self, index: u16, out: &mut [u32]) -> Result<(), StoreError> {
        if out.is_empty() {
            return Err(StoreError::ZeroLength);
        }
        let limit = self.cell_count();
        if index as usize + out.len() > limit as usize {
            return Err(StoreError::IndexOutOfRange { index, limit });
        }
        self.cells.read_cells(index, out);
        Ok(())
    }

    /// Write byte `index`, preserving the other three bytes of its cell.
    pub fn write_byte(&mut self, index: u16, value: u8) -> Result<(), StoreError> {
        Self::check_index(index, self.size)?;
        let (cell, lane) = cell_of(index);
        let data = self.cells.read_cell(cell);
        self.cells.write_cell(cell, with_byte_lane(data, lane, value));
        Ok(())
    }

    /// Write 16-bit word `index`, preserving the other word of its cell.
    pub fn write_word(&mut self, index: u16, value: u16) -> Result<(), StoreError> {
        Self::check_index(index, self.size / 2)?;
        let cell = index / 2;
        let data = self.cells.read_cell(cell);
        self.cells
            .write_cell(cell, with_word_lane(data, index % 2, value));
        Ok(())
    }

    /// Write 32-bit dword `index`. A whole cell, so no read is needed.
    pub fn write_dword(&mut self, index: u16, value: u32) -> Result<(), StoreError> {
        Self::check_index(index, self.cell_count())?;
        self.cells.write_cell(index, value);
        Ok(())
    }
}

//! Overlap-safe in-place move.
//!
//! Bytes are copied one at a time through a single cached source cell and
//! a single cached destination cell. The destination cell is flushed when
//! the walk crosses a cell boundary and the source cell is refilled the
//! same way, so a move touches each cell in both ranges once and needs no
//! scratch buffer.
//!
//! Direction follows memmove: ascending when `dest < src`, descending when
//! `dest > src`. In either direction the write position trails the read
//! position, so a cached source cell never goes stale and a destination
//! cell is never loaded before the last write to it has been flushed.

use rtcmem_core::layout::CELL_SIZE;
use rtcmem_core::{CellStore, StoreError};

use crate::lane::{byte_lane, with_byte_lane};
use crate::store::WordStore;

impl<C: CellStore> WordStore<C> {
    /// Copy `len` bytes from `src` to `dest`; the ranges may overlap.
    ///
    /// Rejected with no cell access when `len == 0`, when `dest == src`,
    /// or when either range runs past the end of the region.
    pub fn move_within(&mut self, dest: u16, src: u16, len: u16) -> Result<(), StoreError> {
        if len == 0 {
            return Err(StoreError::ZeroLength);
        }
        if dest == src {
            return Err(StoreError::SameLocation { offset: dest });
        }
        self.check_range(dest, len as usize)?;
        self.check_range(src, len as usize)?;

        if dest < src {
            tracing::trace!(dest, src, len, "moving bytes down");
            self.move_ascending(dest, src, len);
        } else {
            tracing::trace!(dest, src, len, "moving bytes up");
            self.move_descending(dest, src, len);
        }
        Ok(())
    }

    fn move_ascending(&mut self, mut dest: u16, mut src: u16, len: u16) {
        let mut d = self.cells.read_cell(dest / CELL_SIZE);
        let mut s = self.cells.read_cell(src / CELL_SIZE);
        let mut remaining = len;
        loop {
            d = with_byte_lane(d, dest % CELL_SIZE, byte_lane(s, src % CELL_SIZE));
            remaining -= 1;
            if dest % CELL_SIZE == CELL_SIZE - 1 || remaining == 0 {
                self.cells.write_cell(dest / CELL_SIZE, d);
            }
            if remaining == 0 {
                break;
            }
            dest += 1;
            src += 1;
            if dest % CELL_SIZE == 0 {
                d = self.cells.read_cell(dest / CELL_SIZE);
            }
            if src % CELL_SIZE == 0 {
                s = self.cells.read_cell(src / CELL_SIZE);
            }
        }
    }

    fn move_descending(&mut self, dest: u16, src: u16, len: u16) {
        let mut dest = dest + (len - 1);
        let mut src = src + (len - 1);
        let mut d = self.cells.read_cell(dest / CELL_SIZE);
        let mut s = self.cells.read_cell(src / CELL_SIZE);
        let mut remaining = len;
        loop {
            d = with_byte_lane(d, dest % CELL_SIZE, byte_lane(s, src % CELL_SIZE));
            remaining -= 1;
            if dest % CELL_SIZE == 0 || remaining == 0 {
                self.cells.write_cell(dest / CELL_SIZE, d);
            }
            if remaining == 0 {
                break;
            }
            dest -= 1;
            src -= 1;
            if dest % CELL_SIZE == CELL_SIZE - 1 {
                d = self.cells.read_cell(dest / CELL_SIZE);
            }
            if src % CELL_SIZE == CELL_SIZE - 1 {
                s = self.cells.read_cell(src / CELL_SIZE);
            }
        }
    }
}

//! Bulk byte-range operations: fill, load, store.
//!
//! Each operation runs in three phases so that whole cells are never
//! read back just to be overwritten:
//!
//! 1. head: the partial cell before the first cell boundary (read-modify-write)
//! 2. middle: whole cells, written or read directly
//! 3. tail: the partial cell after the last boundary (read-modify-write)

use rtcmem_core::layout::{cell_of, CELL_SIZE};
use rtcmem_core::{CellStore, ConstSource, StoreError};
use smallvec::smallvec;

use crate::lane::{byte_lane, replicate, with_byte_lane};
use crate::raw;
use crate::store::{LoadBuf, WordStore};

const CELL: usize = CELL_SIZE as usize;

/// How a byte range splits across cells.
struct Span {
    /// First cell touched.
    first_cell: u16,
    /// Lane of the first byte within `first_cell`.
    head_lane: u16,
    /// Bytes in the partial head cell (0 when `offset` is cell-aligned).
    head: usize,
    /// Whole cells after the head.
    whole: usize,
    /// Bytes in the partial tail cell.
    tail: usize,
}

impl Span {
    fn new(offset: u16, len: usize) -> Self {
        let (first_cell, head_lane) = cell_of(offset);
        let head = if head_lane == 0 {
            0
        } else {
            (CELL - head_lane as usize).min(len)
        };
        let rest = len - head;
        Self {
            first_cell,
            head_lane,
            head,
            whole: rest / CELL,
            tail: rest % CELL,
        }
    }

    /// First whole cell after the head.
    fn middle_cell(&self) -> u16 {
        if self.head == 0 {
            self.first_cell
        } else {
            self.first_cell + 1
        }
    }

    /// The cell holding the tail bytes.
    fn tail_cell(&self) -> u16 {
        self.middle_cell() + self.whole as u16
    }
}

impl<C: CellStore> WordStore<C> {
    /// Set every byte in `offset..offset + len` to `pattern`.
    ///
    /// Aligned cells are written with a replicated pattern cell and are
    /// never read.
    pub fn fill(&mut self, offset: u16, len: u16, pattern: u8) -> Result<(), StoreError> {
        self.check_range(offset, len as usize)?;
        let span = Span::new(offset, len as usize);

        if span.head > 0 {
            let mut data = self.cells.read_cell(span.first_cell);
            for lane in span.head_lane..span.head_lane + span.head as u16 {
                data = with_byte_lane(data, lane, pattern);
            }
            self.cells.write_cell(span.first_cell, data);
        }

        let word = replicate(pattern);
        let middle = span.middle_cell();
        for i in 0..span.whole as u16 {
            self.cells.write_cell(middle + i, word);
        }

        if span.tail > 0 {
            let cell = span.tail_cell();
            let mut data = self.cells.read_cell(cell);
            for lane in 0..span.tail as u16 {
                data = with_byte_lane(data, lane, pattern);
            }
            self.cells.write_cell(cell, data);
        }
        Ok(())
    }

    /// Fill the entire region with `pattern`.
    pub fn fill_all(&mut self, pattern: u8) -> Result<(), StoreError> {
        self.fill(0, self.size(), pattern)
    }

    /// Copy `buf.len()` bytes starting at `offset` into `buf`.
    ///
    /// When the aligned part of `buf` is itself 4-byte aligned in memory
    /// the whole cell run is fetched with a single
    /// [`CellStore::read_cells`] call; otherwise cells are read one at a
    /// time and split into bytes.
    pub fn load_into(&self, offset: u16, buf: &mut [u8]) -> Result<(), StoreError> {
        self.check_range(offset, buf.len())?;
        let span = Span::new(offset, buf.len());

        if span.head > 0 {
            let data = self.cells.read_cell(span.first_cell);
            for (i, b) in buf[..span.head].iter_mut().enumerate() {
                *b = byte_lane(data, span.head_lane + i as u16);
            }
        }

        let middle_end = span.head + span.whole * CELL;
        if span.whole > 0 {
            let start = span.middle_cell();
            let middle = &mut buf[span.head..middle_end];
            match raw::as_cells_mut(middle) {
                Some(cells) => self.cells.read_cells(start, cells),
                None => {
                    for (i, chunk) in middle.chunks_exact_mut(CELL).enumerate() {
                        let data = self.cells.read_cell(start + i as u16);
                        chunk.copy_from_slice(&data.to_le_bytes());
                    }
                }
            }
        }

        if span.tail > 0 {
            let data = self.cells.read_cell(span.tail_cell());
            for (i, b) in buf[middle_end..].iter_mut().enumerate() {
                *b = byte_lane(data, i as u16);
            }
        }
        Ok(())
    }

    /// Read `len` bytes starting at `offset` into a fresh buffer.
    pub fn load(&self, offset: u16, len: u16) -> Result<LoadBuf, StoreError> {
        self.check_range(offset, len as usize)?;
        let mut buf: LoadBuf = smallvec![0; len as usize];
        self.load_into(offset, &mut buf)?;
        Ok(buf)
    }

    /// Write `bytes` starting at `offset`.
    ///
    /// Mirrors [`load_into`](Self::load_into): aligned source memory is
    /// written with one [`CellStore::write_cells`] call.
    pub fn store(&mut self, offset: u16, bytes: &[u8]) -> Result<(), StoreError> {
        self.check_range(offset, bytes.len())?;
        let span = Span::new(offset, bytes.len());

        if span.head > 0 {
            let mut data = self.cells.read_cell(span.first_cell);
            for (i, &b) in bytes[..span.head].iter().enumerate() {
                data = with_byte_lane(data, span.head_lane + i as u16, b);
            }
            self.cells.write_cell(span.first_cell, data);
        }

        let middle_end = span.head + span.whole * CELL;
        if span.whole > 0 {
            let start = span.middle_cell();
            let middle = &bytes[span.head..middle_end];
            match raw::as_cells(middle) {
                Some(cells) => self.cells.write_cells(start, cells),
                None => {
                    for (i, chunk) in middle.chunks_exact(CELL).enumerate() {
                        let data = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
                        self.cells.write_cell(start + i as u16, data);
                    }
                }
            }
        }

        if span.tail > 0 {
            let cell = span.tail_cell();
            let mut data = self.cells.read_cell(cell);
            for (i, &b) in bytes[middle_end..].iter().enumerate() {
                data = with_byte_lane(data, i as u16, b);
            }
            self.cells.write_cell(cell, data);
        }
        Ok(())
    }

    /// Write the bytes of an immutable [`ConstSource`] starting at `offset`.
    ///
    /// Head and tail bytes are fetched with [`ConstSource::read_byte`],
    /// the aligned middle one dword at a time with
    /// [`ConstSource::read_dword`].
    pub fn store_from_const<S>(&mut self, offset: u16, src: &S) -> Result<(), StoreError>
    where
        S: ConstSource + ?Sized,
    {
        let len = src.len();
        self.check_range(offset, len)?;
        let span = Span::new(offset, len);

        if span.head > 0 {
            let mut data = self.cells.read_cell(span.first_cell);
            for i in 0..span.head {
                data = with_byte_lane(data, span.head_lane + i as u16, src.read_byte(i));
            }
            self.cells.write_cell(span.first_cell, data);
        }

        let start = span.middle_cell();
        for i in 0..span.whole {
            let data = src.read_dword(span.head + i * CELL);
            self.cells.write_cell(start + i as u16, data);
        }

        if span.tail > 0 {
            let middle_end = span.head + span.whole * CELL;
            let cell = span.tail_cell();
            let mut data = self.cells.read_cell(cell);
            for i in 0..span.tail {
                data = with_byte_lane(data, i as u16, src.read_byte(middle_end + i));
            }
            self.cells.write_cell(cell, data);
        }
        Ok(())
    }
}

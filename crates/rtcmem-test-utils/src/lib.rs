//! Test utilities and mock cell stores for rtcmem development.
//!
//! Provides an instrumented [`CellStore`] ([`MockCells`]) that counts every
//! cell access, deterministic byte generators, and record fixtures sized
//! like the records real deep-sleep loggers keep in RTC memory.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::cell::Cell;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rtcmem_core::CellStore;

pub use fixtures::{Reading, SensorSample};

/// Mock implementation of [`CellStore`].
///
/// Backed by a `Vec<u32>`. Counts cell reads and writes (bulk transfers
/// count every cell they move, and are also tallied separately) so tests
/// can assert how many cells an operation touched.
pub struct MockCells {
    cells: Vec<u32>,
    reads: Cell<usize>,
    bulk_reads: Cell<usize>,
    writes: usize,
    bulk_writes: usize,
}

impl MockCells {
    /// A zeroed store of `count` cells.
    pub fn new(count: u16) -> Self {
        Self::from_cells(vec![0; count as usize])
    }

    /// A store with the given raw contents.
    pub fn from_cells(cells: Vec<u32>) -> Self {
        Self {
            cells,
            reads: Cell::new(0),
            bulk_reads: Cell::new(0),
            writes: 0,
            bulk_writes: 0,
        }
    }

    /// Cells read so far.
    pub fn reads(&self) -> usize {
        self.reads.get()
    }

    /// Cells written so far.
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Number of `read_cells` calls.
    pub fn bulk_reads(&self) -> usize {
        self.bulk_reads.get()
    }

    /// Number of `write_cells` calls.
    pub fn bulk_writes(&self) -> usize {
        self.bulk_writes
    }

    pub fn reset_counters(&mut self) {
        self.reads.set(0);
        self.bulk_reads.set(0);
        self.writes = 0;
        self.bulk_writes = 0;
    }

    /// Raw value of one cell, without counting an access.
    pub fn cell(&self, index: usize) -> u32 {
        self.cells[index]
    }

    /// Raw contents, without counting an access.
    pub fn snapshot(&self) -> Vec<u32> {
        self.cells.clone()
    }

    /// Invert bit `bit` of the region (bit 0 is the LSB of byte 0).
    pub fn flip_bit(&mut self, bit: usize) {
        self.cells[bit / 32] ^= 1 << (bit % 32);
    }
}

impl CellStore for MockCells {
    fn cell_count(&self) -> u16 {
        self.cells.len() as u16
    }

    fn read_cell(&self, index: u16) -> u32 {
        self.reads.set(self.reads.get() + 1);
        self.cells[index as usize]
    }

    fn write_cell(&mut self, index: u16, value: u32) {
        self.writes += 1;
        self.cells[index as usize] = value;
    }

    fn read_cells(&self, start: u16, out: &mut [u32]) {
        self.bulk_reads.set(self.bulk_reads.get() + 1);
        self.reads.set(self.reads.get() + out.len());
        let start = start as usize;
        out.copy_from_slice(&self.cells[start..start + out.len()]);
    }

    fn write_cells(&mut self, start: u16, cells: &[u32]) {
        self.bulk_writes += 1;
        self.writes += cells.len();
        let start = start as usize;
        self.cells[start..start + cells.len()].copy_from_slice(cells);
    }
}

/// `len` deterministic pseudo-random bytes derived from `seed`.
pub fn pattern_bytes(seed: u64, len: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut bytes = vec![0u8; len];
    rng.fill_bytes(&mut bytes);
    bytes
}

//! Host-side cell store backends.
//!
//! [`ArrayCells`] is a bare 512-byte region. [`BankedCells`] emulates a
//! larger shared memory with the region placed at a configured base cell,
//! the way RTC user memory follows the SDK-reserved blocks on an ESP8266.
//! Both retain their contents for as long as the value lives, which is
//! what lets a simulated "reboot" reopen a list from the same cells.

use rtcmem_core::layout::REGION_CELLS;
use rtcmem_core::{CellStore, ConfigError};

use crate::config::RegionConfig;

/// A fixed 128-cell region held in an array.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayCells {
    cells: [u32; REGION_CELLS as usize],
}

impl ArrayCells {
    /// A zeroed region.
    pub fn new() -> Self {
        Self {
            cells: [0; REGION_CELLS as usize],
        }
    }

    /// A region with the given raw cell contents.
    pub fn from_cells(cells: [u32; REGION_CELLS as usize]) -> Self {
        Self { cells }
    }

    /// Raw cell contents.
    pub fn as_cells(&self) -> &[u32] {
        &self.cells
    }

    /// Mutable raw cell contents, bypassing the store.
    pub fn as_cells_mut(&mut self) -> &mut [u32] {
        &mut self.cells
    }
}

impl Default for ArrayCells {
    fn default() -> Self {
        Self::new()
    }
}

impl CellStore for ArrayCells {
    fn cell_count(&self) -> u16 {
        REGION_CELLS
    }

    fn read_cell(&self, index: u16) -> u32 {
        self.cells[index as usize]
    }

    fn write_cell(&mut self, index: u16, value: u32) {
        self.cells[index as usize] = value;
    }

    fn read_cells(&self, start: u16, out: &mut [u32]) {
        let start = start as usize;
        out.copy_from_slice(&self.cells[start..start + out.len()]);
    }

    fn write_cells(&mut self, start: u16, cells: &[u32]) {
        let start = start as usize;
        self.cells[start..start + cells.len()].copy_from_slice(cells);
    }
}

/// A region at a base offset inside a larger emulated memory.
///
/// Cells below `base_cell` stand in for memory owned by the platform.
/// They are never touched through the [`CellStore`] interface.
#[derive(Clone, Debug)]
pub struct BankedCells {
    memory: Vec<u32>,
    config: RegionConfig,
}

impl BankedCells {
    /// Allocate a zeroed memory for `config`.
    pub fn new(config: RegionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            memory: vec![0; config.total_cells()],
            config,
        })
    }

    /// The placement this memory was built with.
    pub fn config(&self) -> &RegionConfig {
        &self.config
    }

    /// The whole emulated memory, reserved prefix included.
    pub fn memory(&self) -> &[u32] {
        &self.memory
    }

    /// Mutable access to the whole emulated memory.
    pub fn memory_mut(&mut self) -> &mut [u32] {
        &mut self.memory
    }

    /// The region's cells only.
    pub fn region(&self) -> &[u32] {
        &self.memory[self.config.base_cell as usize..]
    }

    /// Zero the region, as a full power loss would leave it.
    ///
    /// Real hardware powers up with arbitrary contents; zero is enough to
    /// fail the list checksum.
    pub fn power_loss(&mut self) {
        let base = self.config.base_cell as usize;
        self.memory[base..].fill(0);
    }

    fn slot(&self, index: u16) -> usize {
        self.config.base_cell as usize + index as usize
    }
}

impl CellStore for BankedCells {
    fn cell_count(&self) -> u16 {
        self.config.cell_count
    }

    fn read_cell(&self, index: u16) -> u32 {
        self.memory[self.slot(index)]
    }

    fn write_cell(&mut self, index: u16, value: u32) {
        let slot = self.slot(index);
        self.memory[slot] = value;
    }

    fn read_cells(&self, start: u16, out: &mut [u32]) {
        let start = self.slot(start);
        out.copy_from_slice(&self.memory[start..start + out.len()]);
    }

    fn write_cells(&mut self, start: u16, cells: &[u32]) {
        let start = self.slot(start);
        self.memory[start..start + cells.len()].copy_from_slice(cells);
    }

    fn base_offset(&self) -> u16 {
        self.config.base_cell
    }
}

//! Region placement parameters.

use rtcmem_core::layout::{MAX_CELLS, REGION_CELLS};
use rtcmem_core::ConfigError;

/// Where the retained region lives inside the platform's memory.
///
/// On an ESP8266 the RTC memory is 192 cells, the first 64 of which are
/// reserved by the SDK; user data starts at cell 64. The base is opaque to
/// the store: it only shifts where [`BankedCells`](crate::BankedCells)
/// places the region.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionConfig {
    /// First cell of the region within the larger memory.
    ///
    /// Default: 64.
    pub base_cell: u16,

    /// Number of cells in the region.
    ///
    /// Default: 128 (512 bytes). Must be in `1..=MAX_CELLS`.
    pub cell_count: u16,
}

impl RegionConfig {
    /// Default base cell: first user block of ESP8266 RTC memory.
    pub const DEFAULT_BASE_CELL: u16 = 64;

    /// Default region size in cells.
    pub const DEFAULT_CELL_COUNT: u16 = REGION_CELLS;

    /// Create a config for a region of `cell_count` cells at `base_cell`.
    pub fn new(base_cell: u16, cell_count: u16) -> Self {
        Self {
            base_cell,
            cell_count,
        }
    }

    /// Check that the region is addressable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_count == 0 || self.cell_count > MAX_CELLS {
            return Err(ConfigError::InvalidCellCount {
                count: self.cell_count,
                max: MAX_CELLS,
            });
        }
        if self.base_cell.checked_add(self.cell_count).is_none() {
            return Err(ConfigError::BaseOverflow {
                base_cell: self.base_cell,
                cell_count: self.cell_count,
            });
        }
        Ok(())
    }

    /// Region size in bytes.
    pub fn region_bytes(&self) -> usize {
        self.cell_count as usize * 4
    }

    /// Cells spanned by the emulated memory, including the reserved prefix.
    pub fn total_cells(&self) -> usize {
        self.base_cell as usize + self.cell_count as usize
    }
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE_CELL, Self::DEFAULT_CELL_COUNT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_region_is_512_bytes() {
        let config = RegionConfig::default();
        assert_eq!(config.region_bytes(), 512);
        assert_eq!(config.total_cells(), 192);
        config.validate().unwrap();
    }

    #[test]
    fn zero_cells_rejected() {
        let config = RegionConfig::new(0, 0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidCellCount { count: 0, .. })
        ));
    }

    #[test]
    fn too_many_cells_rejected() {
        let config = RegionConfig::new(0, MAX_CELLS + 1);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidCellCount { .. })
        ));
    }

    #[test]
    fn base_overflow_rejected() {
        let config = RegionConfig::new(u16::MAX - 10, 128);
        assert_eq!(
            config.validate(),
            Err(ConfigError::BaseOverflow {
                base_cell: u16::MAX - 10,
                cell_count: 128,
            })
        );
    }
}

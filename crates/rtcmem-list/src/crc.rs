//! CRC-16/CCITT over the record list's data cells and count.
//!
//! Parameters: polynomial `0x1021`, initial value `0xFFFF`, bits processed
//! MSB-first, no reflection, no final XOR. The table-driven
//! [`crc16_update`] and the bit-serial [`crc16_update_bitwise`] produce
//! identical values; the latter is kept as the reference.
//!
//! Input order is fixed for compatibility with previously persisted
//! regions: each data cell's four bytes from lane 0 (least significant) to
//! lane 3, cells in ascending order, followed by the count's low byte then
//! high byte. The stored crc word itself is never folded in.

use rtcmem_core::layout::DATA_CELLS;
use rtcmem_core::{CellStore, StoreError};
use rtcmem_store::WordStore;

/// Generator polynomial.
pub const CRC16_POLY: u16 = 0x1021;

/// Initial register value.
pub const CRC16_INIT: u16 = 0xFFFF;

const TABLE: [u16; 256] = build_table();

const fn build_table() -> [u16; 256] {
    let mut table = [0u16; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = (i as u16) << 8;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ CRC16_POLY
            } else {
                crc << 1
            };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// Fold one byte into `crc`, one bit at a time.
#[inline]
pub fn crc16_update_bitwise(mut crc: u16, byte: u8) -> u16 {
    crc ^= (byte as u16) << 8;
    for _ in 0..8 {
        crc = if crc & 0x8000 != 0 {
            (crc << 1) ^ CRC16_POLY
        } else {
            crc << 1
        };
    }
    crc
}

/// Fold one byte into `crc` using the lookup table.
#[inline]
pub fn crc16_update(crc: u16, byte: u8) -> u16 {
    (crc << 8) ^ TABLE[((crc >> 8) as u8 ^ byte) as usize]
}

/// CRC of a byte sequence, starting from [`CRC16_INIT`].
pub fn crc16(bytes: &[u8]) -> u16 {
    bytes.iter().fold(CRC16_INIT, |crc, &b| crc16_update(crc, b))
}

/// CRC of a region's data cells followed by `count`.
///
/// `count` is passed in rather than read back so a new footer can be
/// computed before it is written.
pub fn region_crc<C: CellStore>(store: &WordStore<C>, count: u16) -> Result<u16, StoreError> {
    let mut cells = [0u32; DATA_CELLS as usize];
    store.read_dwords(0, &mut cells)?;

    let mut crc = CRC16_INIT;
    for cell in cells {
        for b in cell.to_le_bytes() {
            crc = crc16_update(crc, b);
        }
    }
    for b in count.to_le_bytes() {
        crc = crc16_update(crc, b);
    }
    Ok(crc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rtcmem_store::ArrayCells;

    #[test]
    fn check_value_matches_ccitt_false() {
        assert_eq!(crc16(b"123456789"), 0x29B1);
    }

    #[test]
    fn empty_input_is_init() {
        assert_eq!(crc16(&[]), CRC16_INIT);
    }

    #[test]
    fn zeroed_region_known_answer() {
        let store = WordStore::new(ArrayCells::new()).unwrap();
        assert_eq!(region_crc(&store, 0).unwrap(), 0x44B7);
        assert_eq!(region_crc(&store, 1).unwrap(), 0x7786);
    }

    #[test]
    fn region_crc_folds_cells_low_lane_first() {
        let mut store = WordStore::new(ArrayCells::new()).unwrap();
        store.write_dword(0, 0x0403_0201).unwrap();
        store.write_dword(127, 0xFFFF_FFFF).unwrap();

        let mut bytes = vec![0u8; 508];
        bytes[..4].copy_from_slice(&[1, 2, 3, 4]);
        bytes.extend_from_slice(&5u16.to_le_bytes());
        assert_eq!(region_crc(&store, 5).unwrap(), crc16(&bytes));
    }

    #[test]
    fn region_crc_needs_full_data_area() {
        let store = WordStore::new(rtcmem_test_utils::MockCells::new(16)).unwrap();
        assert!(region_crc(&store, 0).is_err());
    }

    proptest! {
        #[test]
        fn table_matches_bitwise(crc in any::<u16>(), byte in any::<u8>()) {
            prop_assert_eq!(crc16_update(crc, byte), crc16_update_bitwise(crc, byte));
        }
    }
}

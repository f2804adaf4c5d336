//! Benchmark profiles for the rtcmem crates.
//!
//! - [`patterned_cells`]: a region filled with deterministic noise
//! - [`full_list`]: a region holding a full list of 12-byte readings

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rtcmem_list::RecordList;
use rtcmem_store::{ArrayCells, WordStore};
use rtcmem_test_utils::{pattern_bytes, Reading};

/// A 512-byte region whose bytes are pseudo-random noise derived from `seed`.
pub fn patterned_cells(seed: u64) -> ArrayCells {
    let mut store = WordStore::new(ArrayCells::new()).unwrap();
    store.store(0, &pattern_bytes(seed, 512)).unwrap();
    store.into_inner()
}

/// A region holding a sealed, full list of [`Reading`]s numbered `0..42`.
pub fn full_list() -> ArrayCells {
    let mut cells = ArrayCells::new();
    {
        let mut list: RecordList<Reading, _> =
            RecordList::open(WordStore::new(&mut cells).unwrap()).unwrap();
        for n in 0..u32::from(list.capacity()) {
            list.push(&Reading::numbered(n)).unwrap();
        }
    }
    cells
}

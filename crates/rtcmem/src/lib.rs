//! rtcmem: persistent record storage in retained RTC memory.
//!
//! Microcontrollers such as the ESP8266 keep a small block of RTC memory
//! powered through deep sleep. It can only be accessed as aligned 32-bit
//! cells. This is the top-level facade crate that re-exports the public API
//! from all rtcmem sub-crates: a byte-addressable view over such a region,
//! and a checksummed bounded list of fixed-size records stored inside it.
//!
//! # Quick start
//!
//! ```rust
//! use rtcmem::prelude::*;
//!
//! // Retained memory that outlives each "boot".
//! let mut cells = ArrayCells::new();
//!
//! for boot in 0u32..3 {
//!     let store = WordStore::new(&mut cells).unwrap();
//!     let mut log: RecordList<u32, _> = RecordList::open(store).unwrap();
//!     assert_eq!(log.open_status().is_intact(), boot > 0);
//!     assert_eq!(log.len(), boot as u16);
//!     log.push_evicting(&boot).unwrap();
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `rtcmem-core` | Layout constants, `CellStore`, `Record`, errors |
//! | [`store`] | `rtcmem-store` | `WordStore`, region placement, host backends |
//! | [`list`] | `rtcmem-list` | `RecordList`, CRC-16, footer, open status |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Region layout, core traits, and error types (`rtcmem-core`).
///
/// Implement [`types::CellStore`] to put a [`store::WordStore`] over real
/// hardware, and [`types::Record`] for each type you persist.
pub use rtcmem_core as types;

/// Byte/word/dword access over a cell store (`rtcmem-store`).
///
/// [`store::WordStore`] does the read-modify-write work. [`store::ArrayCells`]
/// and [`store::BankedCells`] are in-memory backends for hosts and tests.
pub use rtcmem_store as store;

/// The checksummed record list (`rtcmem-list`).
///
/// [`list::RecordList`] plus the CRC routines in [`list::crc`].
pub use rtcmem_list as list;

/// Common imports for typical rtcmem usage.
///
/// ```rust
/// use rtcmem::prelude::*;
/// ```
pub mod prelude {
    // Core traits
    pub use rtcmem_core::{CellStore, ConstSource, Record};

    // Errors
    pub use rtcmem_core::{ConfigError, ListError, StoreError};

    // Store
    pub use rtcmem_store::{ArrayCells, BankedCells, RegionConfig, WordStore};

    // List
    pub use rtcmem_list::{Corruption, OnFull, OpenStatus, RecordList};
}

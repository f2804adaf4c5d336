//! Byte-addressable access over a cell-addressable retained memory region.
//!
//! The platform exposes its battery-retained memory only as 32-bit cells.
//! [`WordStore`] layers byte, word, and dword access on top, plus bulk
//! operations that touch as few cells as possible:
//!
//! ```text
//! WordStore<C: CellStore>
//! ├── read_byte / read_word / read_dword     (read, extract lane)
//! ├── write_byte / write_word / write_dword  (read-modify-write one cell)
//! ├── fill / load_into / store / store_from_const
//! │   └── head cell (RMW) → aligned cells → tail cell (RMW)
//! └── move_within  (memmove with one cached source and one cached
//!                   destination cell, no scratch buffer)
//! ```
//!
//! Every range check runs before the first cell is touched, so a rejected
//! call is a complete no-op.
//!
//! # Backends
//!
//! - [`ArrayCells`]: a plain 512-byte array region.
//! - [`BankedCells`]: a region placed at [`RegionConfig::base_cell`] inside
//!   a larger emulated memory, the way RTC user memory sits after the
//!   system-reserved blocks on an ESP8266.
//!
//! This crate is the only one in the workspace that may contain `unsafe`
//! code, confined to `raw.rs`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

mod bulk;
pub mod cells;
pub mod config;
mod lane;
mod raw;
mod shift;
pub mod store;

pub use cells::{ArrayCells, BankedCells};
pub use config::RegionConfig;
pub use store::{LoadBuf, WordStore};

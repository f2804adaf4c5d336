//! A bounded, checksummed list of fixed-size records in retained memory.
//!
//! [`RecordList`] packs records contiguously from offset 0 of a 512-byte
//! region and keeps a 4-byte footer in the last cell:
//!
//! ```text
//! [record 0][record 1] ... [record n-1][unused ...][count u16][crc u16]
//! 0                                                 508        510     512
//! ```
//!
//! The list owns no memory beyond its cached length: its state is exactly
//! the bytes in the region, and it survives anything the region survives.
//! On open the footer checksum is recomputed; a mismatch or an impossible
//! count resets the list to empty and is reported through
//! [`RecordList::open_status`].
//!
//! # Checksum
//!
//! CRC-16/CCITT (poly `0x1021`, init `0xFFFF`, MSB-first, no final XOR)
//! over every data cell's bytes in lane order, then the two bytes of the
//! count. See [`crc`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod crc;
pub mod footer;
pub mod list;
pub mod status;

pub use footer::Footer;
pub use list::{Iter, OnFull, RecordList};
pub use status::{Corruption, OpenStatus};

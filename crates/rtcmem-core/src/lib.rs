//! Core types and traits for retained RTC memory.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! abstractions shared by the store and list crates:
//!
//! - [`layout`]: the fixed region geometry and footer word positions.
//! - [`CellStore`]: the cell-granularity boundary to the platform memory.
//! - [`ConstSource`]: immutable, specially-addressed source bytes.
//! - [`Record`]: the fixed-size, flat value capability.
//! - [`StoreError`] and [`ListError`]: every rejection the core reports.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod layout;
pub mod record;
pub mod traits;

pub use error::{ConfigError, ListError, StoreError};
pub use record::Record;
pub use traits::{CellStore, ConstSource};

//! Core types and traits for the hostlease workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the element-type bindings for the eight transportable primitives,
//! the check-in release modes, and the [`ArrayHost`] trait through
//! which scoped accessors talk to the embedding interface.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod element;
pub mod host;
pub mod mode;

pub use element::{inline_capacity, Element, INLINE_BUDGET_BYTES};
pub use host::ArrayHost;
pub use mode::ReleaseMode;

//! C function-table binding of the hostlease embedding interface.
//!
//! A native library built with hostlease is loaded *into* an embedding
//! host; the host hands over a [`HostVtbl`] of array entry points, and
//! [`HostEnv`] turns that table into an
//! [`ArrayHost`](hostlease_core::ArrayHost) implementation for every
//! transportable primitive, so the scoped accessors work unchanged on
//! either side of the C boundary. The `include/hostlease.h` header the
//! host compiles against is generated from this crate by cbindgen.
//!
//! This crate is one of two that may contain `unsafe` code (along with
//! `hostlease`).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod env;
pub mod vtbl;

pub use env::{HostEnv, VtblError};
pub use vtbl::{raw_array, HostVtbl, RawArray, RawArrayPtr};

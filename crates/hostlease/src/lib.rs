//! Scoped native views over primitive arrays owned by an embedding host.
//!
//! The embedding interface ([`ArrayHost`]) lets native code check a
//! view of a managed-runtime array out and back in. Doing that by hand
//! leaks the view on early returns; the accessors here tie the checkin
//! to scope exit so it happens on every path:
//!
//! - [`ArrayRo`] — read-only. Arrays at or below the inline capacity
//!   are copied into an inline buffer, skipping the host's checkout
//!   path entirely; larger arrays are checked out and checked back in
//!   with [`ReleaseMode::Discard`]. Read-only access is cheaper than
//!   read-write and should be the default.
//! - [`NullableArrayRo`] — read-only, but an absent handle is a valid
//!   empty state instead of fatal misuse.
//! - [`ArrayRw`] — read-write. Always checked out, checked back in
//!   with [`ReleaseMode::CommitAndFree`] so modifications reach the
//!   managed array. More expensive; use only when writes are needed.
//!
//! Per-primitive aliases (24 of them) live in [`alias`].
//!
//! This crate is one of two that may contain `unsafe` code (along with
//! `hostlease-ffi`).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod alias;
pub mod ro;
pub mod rw;

pub use hostlease_core::{
    inline_capacity, ArrayHost, Element, ReleaseMode, INLINE_BUDGET_BYTES,
};
pub use ro::{ArrayRo, NullableArrayRo};
pub use rw::ArrayRw;

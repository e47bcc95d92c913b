//! Test utilities and mock types for hostlease development.
//!
//! Provides [`MockHost`], an instrumented in-memory implementation of
//! [`ArrayHost`] for exercising scoped accessors without an embedding
//! runtime: configurable copy-vs-pin checkout, checkout/checkin/fatal
//! call counters, and write-back visibility flags.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::cell::{Cell, RefCell};

use hostlease_core::{ArrayHost, Element, ReleaseMode};

/// Handle into a [`MockHost`]'s array table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MockArray(pub usize);

struct ArrayState<T> {
    /// Managed storage. Boxed so the element address is stable even
    /// when the state table grows.
    primary: Box<[T]>,
    /// Copy served by the last checkout while `serve_copies` is set;
    /// committed back or dropped at checkin.
    loaned_copy: Option<Box<[T]>>,
}

/// Instrumented mock embedding interface.
///
/// Arrays are registered up front with
/// [`push_array`](MockHost::push_array) and served either pinned
/// (pointers into the managed storage) or as copies committed back at
/// checkin, mimicking a host that may pin or copy at its own
/// discretion. All calls are counted, and fatal reports are recorded
/// instead of terminating anything.
///
/// Single-threaded by design, like the accessors it exercises. In
/// copy-serving mode each array supports one outstanding copy at a
/// time; overlap copy-mode checkouts of the same handle are not
/// supported.
pub struct MockHost<T: Element> {
    arrays: RefCell<Vec<ArrayState<T>>>,
    serve_copies: Cell<bool>,
    checkout_count: Cell<usize>,
    checkin_count: Cell<usize>,
    fatal_count: Cell<usize>,
    last_fatal: RefCell<Option<String>>,
    updated: Cell<bool>,
}

impl<T: Element> MockHost<T> {
    pub fn new() -> Self {
        Self {
            arrays: RefCell::new(Vec::new()),
            serve_copies: Cell::new(false),
            checkout_count: Cell::new(0),
            checkin_count: Cell::new(0),
            fatal_count: Cell::new(0),
            last_fatal: RefCell::new(None),
            updated: Cell::new(false),
        }
    }

    /// Register a managed array and return its handle.
    pub fn push_array(&self, data: Vec<T>) -> MockArray {
        let mut arrays = self.arrays.borrow_mut();
        arrays.push(ArrayState {
            primary: data.into_boxed_slice(),
            loaned_copy: None,
        });
        MockArray(arrays.len() - 1)
    }

    /// Serve checkouts as copies (`true`) or pins (`false`, the default).
    pub fn serve_copies(&self, copies: bool) {
        self.serve_copies.set(copies);
    }

    /// Snapshot of an array's managed storage.
    pub fn data(&self, array: MockArray) -> Vec<T> {
        self.arrays.borrow()[array.0].primary.to_vec()
    }

    /// Address of an array's managed storage, for pointer-identity
    /// assertions against pinned checkouts. Capture it before
    /// constructing a writable accessor over the same handle.
    pub fn primary_ptr(&self, array: MockArray) -> *const T {
        self.arrays.borrow()[array.0].primary.as_ptr()
    }

    pub fn checkout_count(&self) -> usize {
        self.checkout_count.get()
    }

    pub fn checkin_count(&self) -> usize {
        self.checkin_count.get()
    }

    pub fn fatal_count(&self) -> usize {
        self.fatal_count.get()
    }

    /// Message from the most recent fatal report, if any.
    pub fn last_fatal(&self) -> Option<String> {
        self.last_fatal.borrow().clone()
    }

    /// Whether any checkin carried a commit mode.
    pub fn updated(&self) -> bool {
        self.updated.get()
    }

    /// Whether a checkin happened and carried a commit mode — i.e.
    /// modifications became visible to the managed side.
    pub fn memory_updated(&self) -> bool {
        self.checkin_count.get() > 0 && self.updated.get()
    }

    /// Zero the counters and flags between test phases.
    pub fn reset_counts(&self) {
        self.checkout_count.set(0);
        self.checkin_count.set(0);
        self.fatal_count.set(0);
        *self.last_fatal.borrow_mut() = None;
        self.updated.set(false);
    }
}

impl<T: Element> Default for MockHost<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> ArrayHost<T> for MockHost<T> {
    type Array = MockArray;

    fn array_len(&self, array: MockArray) -> usize {
        self.arrays.borrow()[array.0].primary.len()
    }

    fn read_region(&self, array: MockArray, start: usize, out: &mut [T]) {
        let arrays = self.arrays.borrow();
        out.copy_from_slice(&arrays[array.0].primary[start..start + out.len()]);
    }

    fn checkout(&self, array: MockArray) -> *mut T {
        self.checkout_count.set(self.checkout_count.get() + 1);
        let mut arrays = self.arrays.borrow_mut();
        let state = &mut arrays[array.0];
        if self.serve_copies.get() {
            let mut copy = state.primary.clone();
            let ptr = copy.as_mut_ptr();
            state.loaned_copy = Some(copy);
            ptr
        } else {
            state.primary.as_mut_ptr()
        }
    }

    fn checkin(&self, array: MockArray, elems: *mut T, mode: ReleaseMode) {
        let mut arrays = self.arrays.borrow_mut();
        let state = &mut arrays[array.0];
        let outstanding = match &state.loaned_copy {
            Some(copy) => copy.as_ptr(),
            None => state.primary.as_ptr(),
        };
        // Count only views this host actually handed out, the way the
        // original harness compared against its outstanding pointer.
        if elems.cast_const() == outstanding {
            self.checkin_count.set(self.checkin_count.get() + 1);
        }
        if mode.commits() {
            self.updated.set(true);
            if let Some(copy) = state.loaned_copy.take() {
                state.primary.copy_from_slice(&copy);
            }
        } else {
            // Discard: the loaned copy, if any, is dropped uncommitted.
            state.loaned_copy = None;
        }
    }

    fn fatal_error(&self, msg: &str) {
        self.fatal_count.set(self.fatal_count.get() + 1);
        *self.last_fatal.borrow_mut() = Some(msg.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_read_region() {
        let host: MockHost<i32> = MockHost::new();
        let a = host.push_array(vec![1, 2, 3, 4]);
        assert_eq!(host.array_len(a), 4);
        let mut out = [0i32; 2];
        host.read_region(a, 1, &mut out);
        assert_eq!(out, [2, 3]);
    }

    #[test]
    fn pinned_checkin_counts_only_matching_pointers() {
        let host: MockHost<u8> = MockHost::new();
        let a = host.push_array(vec![7; 8]);
        let ptr = host.checkout(a);
        host.checkin(a, std::ptr::null_mut(), ReleaseMode::Discard);
        assert_eq!(host.checkin_count(), 0);
        host.checkin(a, ptr, ReleaseMode::Discard);
        assert_eq!(host.checkin_count(), 1);
    }

    #[test]
    fn copied_checkout_commits_back_on_commit_mode() {
        let host: MockHost<i64> = MockHost::new();
        host.serve_copies(true);
        let a = host.push_array(vec![0; 4]);
        let ptr = host.checkout(a);
        // The loaned copy is the mock's own storage, so the commit path
        // never needs to dereference the caller's pointer.
        host.checkin(a, ptr, ReleaseMode::CommitAndFree);
        assert!(host.memory_updated());
    }

    #[test]
    fn reset_clears_counts_and_flags() {
        let host: MockHost<f32> = MockHost::new();
        let a = host.push_array(vec![1.0]);
        let ptr = host.checkout(a);
        host.checkin(a, ptr, ReleaseMode::CommitAndFree);
        host.fatal_error("boom");
        host.reset_counts();
        assert_eq!(host.checkout_count(), 0);
        assert_eq!(host.checkin_count(), 0);
        assert_eq!(host.fatal_count(), 0);
        assert_eq!(host.last_fatal(), None);
        assert!(!host.updated());
    }
}

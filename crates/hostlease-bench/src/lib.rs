//! Shared fixtures for the hostlease benchmarks.
//!
//! The benches measure accessor construct+drop around the inline
//! threshold, so the fixtures here just standardize how the mock host
//! and its arrays are built.

#![forbid(unsafe_code)]
#![allow(missing_docs)]

use hostlease_core::Element;
use hostlease_test_utils::{MockArray, MockHost};

/// A mock host with one registered array of `len` sequential values.
pub fn host_with_array(len: usize) -> (MockHost<i32>, MockArray) {
    let host = MockHost::new();
    let array = host.push_array((0..len as i32).collect());
    (host, array)
}

/// Lengths bracketing the inline threshold for `T`: well below, at the
/// threshold, just above, and well above.
pub fn bracketing_lengths<T: Element>() -> [usize; 4] {
    let cap = hostlease_core::inline_capacity::<T>();
    [cap / 8, cap, cap + 1, cap * 32]
}

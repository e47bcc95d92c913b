//! Read-write scoped accessor.
//!
//! [`ArrayRw`] binds a managed array handle to a writable native view
//! for the current scope. There is no inline fast path: every write
//! must become visible to the host, so the whole array is always
//! checked out, and drop checks it back in with
//! [`ReleaseMode::CommitAndFree`] — modifications made through the
//! view reach the managed array on every exit path.

use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;
use std::slice;

use hostlease_core::{ArrayHost, Element, ReleaseMode};

/// View checked out for the accessor's lifetime. Never reassigned.
struct RwView<T> {
    ptr: NonNull<T>,
    len: usize,
}

/// Read-write scoped view of a host-owned primitive array.
///
/// Always assertive: every mutation target must be a concrete array,
/// so an absent handle is reported through the host's fatal hook.
/// There is no nullable read-write variant.
///
/// More expensive than [`ArrayRo`](crate::ArrayRo) — drop entails a
/// write-back onto the managed side — so reach for it only when writes
/// are needed. Dereferences to `[T]`, mutably and immutably. Not
/// cloneable: the value owns a release-once view.
pub struct ArrayRw<'h, H, T>
where
    H: ArrayHost<T>,
    T: Element,
{
    host: &'h H,
    array: Option<H::Array>,
    view: Option<RwView<T>>,
}

impl<'h, H, T> ArrayRw<'h, H, T>
where
    H: ArrayHost<T>,
    T: Element,
{
    /// Bind a writable view of `array` for the current scope.
    ///
    /// `None` reports fatal misuse to the host. If the host's fatal
    /// hook returns (mock hosts do), the accessor is a sentinel: null
    /// pointers, empty slice, and no write-back on drop.
    pub fn new(host: &'h H, array: Option<H::Array>) -> Self {
        match array {
            Some(array) => {
                let len = host.array_len(array);
                let view = NonNull::new(host.checkout(array))
                    .map(|ptr| RwView { ptr, len });
                Self {
                    host,
                    array: Some(array),
                    view,
                }
            }
            None => {
                host.fatal_error(&format!(
                    "required {} array handle is absent",
                    T::NAME
                ));
                Self {
                    host,
                    array: None,
                    view: None,
                }
            }
        }
    }

    /// Raw pointer to the first element; null in the sentinel state.
    pub fn as_ptr(&self) -> *const T {
        match &self.view {
            Some(view) => view.ptr.as_ptr(),
            None => std::ptr::null(),
        }
    }

    /// Mutable raw pointer to the first element; null in the sentinel
    /// state.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        match &self.view {
            Some(view) => view.ptr.as_ptr(),
            None => std::ptr::null_mut(),
        }
    }

    /// The managed array handle this view was constructed over.
    pub fn array(&self) -> Option<H::Array> {
        self.array
    }

    /// The elements as a slice. Empty in the sentinel state.
    #[allow(unsafe_code)]
    pub fn as_slice(&self) -> &[T] {
        match &self.view {
            // SAFETY: the host keeps the checked-out pointer valid for
            // `len` elements until checkin, which only happens in drop.
            Some(view) => unsafe {
                slice::from_raw_parts(view.ptr.as_ptr(), view.len)
            },
            None => &[],
        }
    }

    /// The elements as a mutable slice. Empty in the sentinel state.
    #[allow(unsafe_code)]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        match &self.view {
            // SAFETY: validity as in `as_slice`; the exclusive borrow
            // of `self` rules out a second live slice over the view.
            Some(view) => unsafe {
                slice::from_raw_parts_mut(view.ptr.as_ptr(), view.len)
            },
            None => &mut [],
        }
    }
}

impl<H, T> Deref for ArrayRw<'_, H, T>
where
    H: ArrayHost<T>,
    T: Element,
{
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<H, T> DerefMut for ArrayRw<'_, H, T>
where
    H: ArrayHost<T>,
    T: Element,
{
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<'a, H, T> IntoIterator for &'a ArrayRw<'_, H, T>
where
    H: ArrayHost<T>,
    T: Element,
{
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, H, T> IntoIterator for &'a mut ArrayRw<'_, H, T>
where
    H: ArrayHost<T>,
    T: Element,
{
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

impl<H, T> Drop for ArrayRw<'_, H, T>
where
    H: ArrayHost<T>,
    T: Element,
{
    fn drop(&mut self) {
        if let Some(view) = &self.view {
            // A live view implies the handle was present at bind time.
            if let Some(array) = self.array {
                self.host.checkin(
                    array,
                    view.ptr.as_ptr(),
                    ReleaseMode::CommitAndFree,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostlease_core::inline_capacity;
    use hostlease_test_utils::MockHost;

    const SMALL: usize = 32;
    const LARGE: usize = 8192;

    fn filled(len: usize) -> Vec<i32> {
        (0..len as i32).collect()
    }

    #[test]
    fn small_arrays_are_still_checked_out() {
        // No inline fast path for writable views, however small.
        assert!(SMALL < inline_capacity::<i32>());
        let host: MockHost<i32> = MockHost::new();
        let a = host.push_array(filled(SMALL));
        {
            let view = ArrayRw::new(&host, Some(a));
            assert_eq!(view.len(), SMALL);
            assert_eq!(host.checkout_count(), 1);
        }
        assert_eq!(host.checkin_count(), 1);
        assert!(host.memory_updated());
    }

    #[test]
    fn large_arrays_check_out_and_commit() {
        let host: MockHost<i32> = MockHost::new();
        let a = host.push_array(filled(LARGE));
        let expected = host.primary_ptr(a);
        {
            let view = ArrayRw::new(&host, Some(a));
            assert_eq!(view.as_ptr(), expected);
            assert_eq!(view.array(), Some(a));
            assert_eq!(view.len(), LARGE);
        }
        assert_eq!(host.checkout_count(), 1);
        assert_eq!(host.checkin_count(), 1);
        assert!(host.memory_updated());
    }

    #[test]
    fn writes_through_a_pinned_view_land_in_managed_storage() {
        let host: MockHost<i32> = MockHost::new();
        let a = host.push_array(vec![0; SMALL]);
        {
            let mut view = ArrayRw::new(&host, Some(a));
            for (i, elem) in view.iter_mut().enumerate() {
                *elem = i as i32 * 2;
            }
            view[0] = -7;
        }
        let expected: Vec<i32> = std::iter::once(-7)
            .chain((1..SMALL as i32).map(|i| i * 2))
            .collect();
        assert_eq!(host.data(a), expected);
    }

    #[test]
    fn writes_through_a_copied_view_commit_on_drop() {
        let host: MockHost<i32> = MockHost::new();
        host.serve_copies(true);
        let a = host.push_array(vec![0; SMALL]);
        {
            let mut view = ArrayRw::new(&host, Some(a));
            view.fill(9);
            // Not yet committed: the host still sees the original.
            assert_eq!(host.data(a), vec![0; SMALL]);
        }
        assert_eq!(host.data(a), vec![9; SMALL]);
        assert!(host.memory_updated());
    }

    #[test]
    fn absent_handle_is_fatal() {
        let host: MockHost<i32> = MockHost::new();
        {
            let mut view = ArrayRw::new(&host, None);
            assert!(view.as_ptr().is_null());
            assert!(view.as_mut_ptr().is_null());
            assert_eq!(view.array(), None);
            assert!(view.is_empty());
        }
        assert_eq!(host.fatal_count(), 1);
        assert_eq!(host.checkout_count(), 0);
        assert_eq!(host.checkin_count(), 0);
        assert!(!host.memory_updated());
    }

    #[test]
    fn independent_writable_views_balance_their_counts() {
        let host: MockHost<i32> = MockHost::new();
        host.serve_copies(true);
        let a = host.push_array(filled(SMALL));
        {
            let _first = ArrayRw::new(&host, Some(a));
            assert_eq!(host.checkout_count(), 1);
        }
        {
            let _second = ArrayRw::new(&host, Some(a));
            assert_eq!(host.checkout_count(), 2);
        }
        assert_eq!(host.checkin_count(), 2);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn every_length_takes_the_checked_out_path(
                len in 0usize..600,
            ) {
                let host: MockHost<u8> = MockHost::new();
                let a = host.push_array(vec![0; len]);
                drop(ArrayRw::new(&host, Some(a)));
                prop_assert_eq!(host.checkout_count(), 1);
                prop_assert_eq!(host.checkin_count(), 1);
                prop_assert!(host.memory_updated());
            }

            #[test]
            fn committed_contents_match_what_was_written(
                data in prop::collection::vec(any::<i64>(), 1..200),
            ) {
                let host: MockHost<i64> = MockHost::new();
                host.serve_copies(true);
                let a = host.push_array(vec![0; data.len()]);
                {
                    let mut view = ArrayRw::new(&host, Some(a));
                    view.copy_from_slice(&data);
                }
                prop_assert_eq!(host.data(a), data);
            }
        }
    }
}

//! Read-only scoped accessors.
//!
//! [`ArrayRo`] and [`NullableArrayRo`] bind a managed array handle to a
//! read-only native view for the current scope. Arrays at or below the
//! inline capacity are copied out with a single region read; larger
//! arrays are checked out from the host and checked back in with
//! [`ReleaseMode::Discard`] on drop — read-only views never write back,
//! whether the host pinned or copied.

use std::ops::Deref;
use std::ptr::NonNull;
use std::slice;

use smallvec::SmallVec;

use hostlease_core::{inline_capacity, ArrayHost, Element, ReleaseMode};

/// Storage behind a read-only accessor, selected once at construction.
enum RoStorage<T: Element> {
    /// Absent handle (nullable accessor), post-fatal sentinel, or a
    /// checkout the host refused.
    Empty,
    /// Small array copied out via a region read; nothing to check in.
    Inline(SmallVec<T::Inline>),
    /// Whole-array view checked out from the host; checked back in,
    /// with `Discard`, exactly once on drop.
    Checked { ptr: NonNull<T>, len: usize },
}

impl<T: Element> RoStorage<T> {
    fn as_ptr(&self) -> *const T {
        match self {
            RoStorage::Empty => std::ptr::null(),
            RoStorage::Inline(buf) => buf.as_ptr(),
            RoStorage::Checked { ptr, .. } => ptr.as_ptr(),
        }
    }

    #[allow(unsafe_code)]
    fn as_slice(&self) -> &[T] {
        match self {
            RoStorage::Empty => &[],
            RoStorage::Inline(buf) => buf.as_slice(),
            // SAFETY: the host keeps the checked-out pointer valid for
            // `len` elements until checkin, which only happens in drop —
            // after which no slice can be taken from this storage.
            RoStorage::Checked { ptr, len } => unsafe {
                slice::from_raw_parts(ptr.as_ptr(), *len)
            },
        }
    }
}

/// Select the storage for a present handle: inline copy for small
/// arrays, host checkout for large ones.
fn bind_ro<H, T>(host: &H, array: H::Array) -> RoStorage<T>
where
    H: ArrayHost<T>,
    T: Element,
{
    let len = host.array_len(array);
    if len <= inline_capacity::<T>() {
        let mut buf = SmallVec::<T::Inline>::from_elem(T::default(), len);
        host.read_region(array, 0, &mut buf);
        RoStorage::Inline(buf)
    } else {
        match NonNull::new(host.checkout(array)) {
            Some(ptr) => RoStorage::Checked { ptr, len },
            // Host refused the checkout; there is nothing to check in.
            None => RoStorage::Empty,
        }
    }
}

/// Read-only scoped view of a host-owned primitive array.
///
/// The handle must be present: an absent handle is a contract
/// violation by the caller and is reported through the host's fatal
/// hook at construction. Use [`NullableArrayRo`] where absence is a
/// legal input.
///
/// Arrays of at most [`inline_capacity`] elements are copied into an
/// inline buffer, avoiding the host's (possibly expensive) checkout
/// path; larger arrays are checked out directly. Either way the view
/// lives exactly as long as this value and is released on every exit
/// path.
///
/// Dereferences to `&[T]`, so indexing, iteration, and `len()` all
/// work on the accessor itself. Not cloneable: the value owns a
/// release-once view and a potentially large inline buffer.
pub struct ArrayRo<'h, H, T>
where
    H: ArrayHost<T>,
    T: Element,
{
    host: &'h H,
    array: Option<H::Array>,
    storage: RoStorage<T>,
}

impl<'h, H, T> ArrayRo<'h, H, T>
where
    H: ArrayHost<T>,
    T: Element,
{
    /// Bind a read-only view of `array` for the current scope.
    ///
    /// `None` reports fatal misuse to the host. If the host's fatal
    /// hook returns (mock hosts do), the accessor is a sentinel: null
    /// [`as_ptr`](ArrayRo::as_ptr), empty slice.
    pub fn new(host: &'h H, array: Option<H::Array>) -> Self {
        match array {
            Some(array) => Self {
                host,
                array: Some(array),
                storage: bind_ro(host, array),
            },
            None => {
                host.fatal_error(&format!(
                    "required {} array handle is absent",
                    T::NAME
                ));
                Self {
                    host,
                    array: None,
                    storage: RoStorage::Empty,
                }
            }
        }
    }

    /// Raw pointer to the first element; null in the sentinel state.
    pub fn as_ptr(&self) -> *const T {
        self.storage.as_ptr()
    }

    /// The managed array handle this view was constructed over.
    pub fn array(&self) -> Option<H::Array> {
        self.array
    }

    /// The elements as a slice. Empty in the sentinel state.
    pub fn as_slice(&self) -> &[T] {
        self.storage.as_slice()
    }
}

impl<H, T> Deref for ArrayRo<'_, H, T>
where
    H: ArrayHost<T>,
    T: Element,
{
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<'a, H, T> IntoIterator for &'a ArrayRo<'_, H, T>
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

impl<H, T> Drop for ArrayRo<'_, H, T>
where
    H: ArrayHost<T>,
    T: Element,
{
    fn drop(&mut self) {
        if let RoStorage::Checked { ptr, .. } = &self.storage {
            // Checked storage implies the handle was present at bind time.
            if let Some(array) = self.array {
                self.host
                    .checkin(array, ptr.as_ptr(), ReleaseMode::Discard);
            }
        }
    }
}

/// Read-only scoped view that accepts an absent handle.
///
/// Identical to [`ArrayRo`] for a present handle. An absent handle is
/// a valid empty state rather than misuse: no fatal report,
/// [`as_ptr`](NullableArrayRo::as_ptr) is null,
/// [`as_slice`](NullableArrayRo::as_slice) is `None`,
/// [`len`](NullableArrayRo::len) is `-1`, and iteration is empty.
pub struct NullableArrayRo<'h, H, T>
where
    H: ArrayHost<T>,
    T: Element,
{
    host: &'h H,
    array: Option<H::Array>,
    storage: RoStorage<T>,
}

impl<'h, H, T> NullableArrayRo<'h, H, T>
where
    H: ArrayHost<T>,
    T: Element,
{
    /// Bind a read-only view of `array`, or the empty state for `None`.
    pub fn new(host: &'h H, array: Option<H::Array>) -> Self {
        let storage = match array {
            Some(array) => bind_ro(host, array),
            None => RoStorage::Empty,
        };
        Self {
            host,
            array,
            storage,
        }
    }

    /// Raw pointer to the first element; null when absent.
    pub fn as_ptr(&self) -> *const T {
        self.storage.as_ptr()
    }

    /// The managed array handle, or `None` when absent.
    pub fn array(&self) -> Option<H::Array> {
        self.array
    }

    /// Whether this accessor was constructed over an absent handle.
    pub fn is_absent(&self) -> bool {
        self.array.is_none()
    }

    /// The elements, or `None` when absent.
    ///
    /// A present zero-length array is `Some(&[])`, distinct from the
    /// absent `None`.
    pub fn as_slice(&self) -> Option<&[T]> {
        if self.array.is_none() {
            None
        } else {
            Some(self.storage.as_slice())
        }
    }

    /// Number of elements, or `-1` when absent.
    pub fn len(&self) -> isize {
        match self.as_slice() {
            Some(s) => s.len() as isize,
            None => -1,
        }
    }

    /// Whether the view has no elements (absent or zero-length).
    pub fn is_empty(&self) -> bool {
        self.len() <= 0
    }

    /// Iterator over the elements; empty when absent.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().unwrap_or(&[]).iter()
    }
}

impl<'a, H, T> IntoIterator for &'a NullableArrayRo<'_, H, T>
where
    H: ArrayHost<T>,
    T: Element,
{
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<H, T> Drop for NullableArrayRo<'_, H, T>
where
    H: ArrayHost<T>,
    T: Element,
{
    fn drop(&mut self) {
        if let RoStorage::Checked { ptr, .. } = &self.storage {
            if let Some(array) = self.array {
                self.host
                    .checkin(array, ptr.as_ptr(), ReleaseMode::Discard);
            }
        }
    }
}

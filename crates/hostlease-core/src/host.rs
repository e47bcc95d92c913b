//! The embedding-interface seam.
//!
//! [`ArrayHost`] summarizes the contract of the host runtime that owns
//! the primitive arrays: length query, region copy-out, whole-array
//! checkout/checkin, and a fatal-abort hook. The scoped accessors are
//! written against this trait; production code binds it to a C
//! function table (`hostlease-ffi`) and tests bind it to an
//! instrumented mock (`hostlease-test-utils`).

use crate::element::Element;
use crate::mode::ReleaseMode;

/// Host runtime entry points for arrays of element type `T`.
///
/// The host owns the array storage for its whole lifetime; this side
/// only checks views out and back in. No operation returns an error —
/// the one misuse this layer can detect (a required handle that is
/// absent) is reported through [`fatal_error`](ArrayHost::fatal_error),
/// and host-side failures surface as a null checkout pointer.
///
/// Thread validity is the implementation's concern. Callers are
/// expected to invoke these on a thread the host considers current and
/// to keep a handle on one thread for the duration of a scoped access.
pub trait ArrayHost<T: Element> {
    /// Opaque handle to a host-owned array of `T`.
    type Array: Copy;

    /// Number of elements in the array behind `array`.
    fn array_len(&self, array: Self::Array) -> usize;

    /// Copy `out.len()` elements, starting at index `start`, into `out`.
    fn read_region(&self, array: Self::Array, start: usize, out: &mut [T]);

    /// Check out a native view of the whole array.
    ///
    /// The host decides whether the returned pointer is a pin of the
    /// managed storage or a copy of it. Returns null if the host cannot
    /// produce a view; callers must then skip
    /// [`checkin`](ArrayHost::checkin). A non-null pointer must stay
    /// valid for [`array_len`](ArrayHost::array_len) elements until it
    /// is checked back in.
    fn checkout(&self, array: Self::Array) -> *mut T;

    /// Return a view obtained from [`checkout`](ArrayHost::checkout).
    ///
    /// `mode` controls whether modifications made through the view are
    /// committed back to the managed array or dropped. Each checked-out
    /// view is checked in at most once.
    fn checkin(&self, array: Self::Array, elems: *mut T, mode: ReleaseMode);

    /// Report unrecoverable caller misuse to the host.
    ///
    /// A production host terminates the calling context and does not
    /// return. Mock hosts may record the message and return, in which
    /// case the caller is left in a sentinel empty state.
    fn fatal_error(&self, msg: &str);
}

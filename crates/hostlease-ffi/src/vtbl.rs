//! The host-provided function table.
//!
//! [`HostVtbl`] is the C-side shape of the embedding interface: an
//! opaque context pointer plus one entry point per operation. Length
//! query and fatal reporting are type-agnostic; region copy-out,
//! checkout, and checkin come in one triple per transportable
//! primitive. `cbindgen` renders this module into the header the host
//! implements against.

use std::os::raw::{c_char, c_void};
use std::ptr::NonNull;

/// Managed array reference as it crosses the C boundary. May be null.
pub type RawArrayPtr = *mut c_void;

/// Non-null managed array handle used by the accessor layer.
pub type RawArray = NonNull<c_void>;

/// Map a raw C array pointer to an accessor-layer handle.
///
/// Null maps to `None`, so absent handles are dealt with once, here,
/// and a handle in hand is always non-null.
pub fn raw_array(ptr: RawArrayPtr) -> Option<RawArray> {
    NonNull::new(ptr)
}

/// Release-mode value for committing modifications and freeing the view.
pub const HOSTLEASE_COMMIT_AND_FREE: i32 = 0;
/// Release-mode value for committing modifications and keeping the view.
pub const HOSTLEASE_COMMIT_AND_KEEP: i32 = 1;
/// Release-mode value for freeing the view without committing.
pub const HOSTLEASE_DISCARD: i32 = 2;

/// Entry points the embedding host provides.
///
/// Every function pointer must be non-null and callable on any thread
/// the host considers current; `ctx` is passed back verbatim as the
/// first argument of every call.
///
/// Checkout entry points may report through the `is_copy` out-flag
/// whether the returned pointer is a copy of the managed storage or a
/// pin of it; callers may pass null when they do not care. A null
/// return means the host could not produce a view, and no matching
/// checkin will follow. Checkin `mode` is one of the
/// `HOSTLEASE_COMMIT_AND_FREE` / `HOSTLEASE_COMMIT_AND_KEEP` /
/// `HOSTLEASE_DISCARD` values.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct HostVtbl {
    /// Opaque host context, passed to every entry point.
    pub ctx: *mut c_void,
    /// Element count of the array behind `array`. Type-agnostic.
    pub array_len:
        unsafe extern "C" fn(ctx: *mut c_void, array: RawArrayPtr) -> usize,
    /// Terminate the calling context with a NUL-terminated message.
    /// Test hosts may record the message and return instead.
    pub fatal_error:
        unsafe extern "C" fn(ctx: *mut c_void, msg: *const c_char),

    /// Copy `len` `u8` elements starting at `start` into `out`.
    pub read_region_u8: unsafe extern "C" fn(
        ctx: *mut c_void,
        array: RawArrayPtr,
        start: usize,
        len: usize,
        out: *mut u8,
    ),
    /// Check out a whole-array `u8` view.
    pub checkout_u8: unsafe extern "C" fn(
        ctx: *mut c_void,
        array: RawArrayPtr,
        is_copy: *mut u8,
    ) -> *mut u8,
    /// Check a `u8` view back in.
    pub checkin_u8: unsafe extern "C" fn(
        ctx: *mut c_void,
        array: RawArrayPtr,
        elems: *mut u8,
        mode: i32,
    ),

    /// Copy `len` `i8` elements starting at `start` into `out`.
    pub read_region_i8: unsafe extern "C" fn(
        ctx: *mut c_void,
        array: RawArrayPtr,
        start: usize,
        len: usize,
        out: *mut i8,
    ),
    /// Check out a whole-array `i8` view.
    pub checkout_i8: unsafe extern "C" fn(
        ctx: *mut c_void,
        array: RawArrayPtr,
        is_copy: *mut u8,
    ) -> *mut i8,
    /// Check an `i8` view back in.
    pub checkin_i8: unsafe extern "C" fn(
        ctx: *mut c_void,
        array: RawArrayPtr,
        elems: *mut i8,
        mode: i32,
    ),

    /// Copy `len` `u16` elements starting at `start` into `out`.
    pub read_region_u16: unsafe extern "C" fn(
        ctx: *mut c_void,
        array: RawArrayPtr,
        start: usize,
        len: usize,
        out: *mut u16,
    ),
    /// Check out a whole-array `u16` view.
    pub checkout_u16: unsafe extern "C" fn(
        ctx: *mut c_void,
        array: RawArrayPtr,
        is_copy: *mut u8,
    ) -> *mut u16,
    /// Check a `u16` view back in.
    pub checkin_u16: unsafe extern "C" fn(
        ctx: *mut c_void,
        array: RawArrayPtr,
        elems: *mut u16,
        mode: i32,
    ),

    /// Copy `len` `i16` elements starting at `start` into `out`.
    pub read_region_i16: unsafe extern "C" fn(
        ctx: *mut c_void,
        array: RawArrayPtr,
        start: usize,
        len: usize,
        out: *mut i16,
    ),
    /// Check out a whole-array `i16` view.
    pub checkout_i16: unsafe extern "C" fn(
        ctx: *mut c_void,
        array: RawArrayPtr,
        is_copy: *mut u8,
    ) -> *mut i16,
    /// Check an `i16` view back in.
    pub checkin_i16: unsafe extern "C" fn(
        ctx: *mut c_void,
        array: RawArrayPtr,
        elems: *mut i16,
        mode: i32,
    ),

    /// Copy `len` `i32` elements starting at `start` into `out`.
    pub read_region_i32: unsafe extern "C" fn(
        ctx: *mut c_void,
        array: RawArrayPtr,
        start: usize,
        len: usize,
        out: *mut i32,
    ),
    /// Check out a whole-array `i32` view.
    pub checkout_i32: unsafe extern "C" fn(
        ctx: *mut c_void,
        array: RawArrayPtr,
        is_copy: *mut u8,
    ) -> *mut i32,
    /// Check an `i32` view back in.
    pub checkin_i32: unsafe extern "C" fn(
        ctx: *mut c_void,
        array: RawArrayPtr,
        elems: *mut i32,
        mode: i32,
    ),

    /// Copy `len` `i64` elements starting at `start` into `out`.
    pub read_region_i64: unsafe extern "C" fn(
        ctx: *mut c_void,
        array: RawArrayPtr,
        start: usize,
        len: usize,
        out: *mut i64,
    ),
    /// Check out a whole-array `i64` view.
    pub checkout_i64: unsafe extern "C" fn(
        ctx: *mut c_void,
        array: RawArrayPtr,
        is_copy: *mut u8,
    ) -> *mut i64,
    /// Check an `i64` view back in.
    pub checkin_i64: unsafe extern "C" fn(
        ctx: *mut c_void,
        array: RawArrayPtr,
        elems: *mut i64,
        mode: i32,
    ),

    /// Copy `len` `f32` elements starting at `start` into `out`.
    pub read_region_f32: unsafe extern "C" fn(
        ctx: *mut c_void,
        array: RawArrayPtr,
        start: usize,
        len: usize,
        out: *mut f32,
    ),
    /// Check out a whole-array `f32` view.
    pub checkout_f32: unsafe extern "C" fn(
        ctx: *mut c_void,
        array: RawArrayPtr,
        is_copy: *mut u8,
    ) -> *mut f32,
    /// Check an `f32` view back in.
    pub checkin_f32: unsafe extern "C" fn(
        ctx: *mut c_void,
        array: RawArrayPtr,
        elems: *mut f32,
        mode: i32,
    ),

    /// Copy `len` `f64` elements starting at `start` into `out`.
    pub read_region_f64: unsafe extern "C" fn(
        ctx: *mut c_void,
        array: RawArrayPtr,
        start: usize,
        len: usize,
        out: *mut f64,
    ),
    /// Check out a whole-array `f64` view.
    pub checkout_f64: unsafe extern "C" fn(
        ctx: *mut c_void,
        array: RawArrayPtr,
        is_copy: *mut u8,
    ) -> *mut f64,
    /// Check an `f64` view back in.
    pub checkin_f64: unsafe extern "C" fn(
        ctx: *mut c_void,
        array: RawArrayPtr,
        elems: *mut f64,
        mode: i32,
    ),
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostlease_core::ReleaseMode;

    #[test]
    fn mode_constants_match_the_core_enum() {
        assert_eq!(HOSTLEASE_COMMIT_AND_FREE, ReleaseMode::CommitAndFree as i32);
        assert_eq!(HOSTLEASE_COMMIT_AND_KEEP, ReleaseMode::CommitAndKeep as i32);
        assert_eq!(HOSTLEASE_DISCARD, ReleaseMode::Discard as i32);
    }

    #[test]
    fn null_maps_to_absent_once_at_the_boundary() {
        assert_eq!(raw_array(std::ptr::null_mut()), None);
        let mut slot = 0u8;
        let ptr = (&mut slot as *mut u8).cast::<std::os::raw::c_void>();
        assert!(raw_array(ptr).is_some());
    }
}

//! [`ArrayHost`] over a host-provided function table.
//!
//! [`HostEnv`] owns a copy of the [`HostVtbl`] and implements the
//! embedding-interface trait for every transportable primitive by
//! dispatching to the matching table entries — the per-type trait
//! table, expanded by one macro invocation per primitive.

use std::error::Error;
use std::ffi::CString;
use std::fmt;

use hostlease_core::{ArrayHost, ReleaseMode};

use crate::vtbl::{HostVtbl, RawArray};

/// Errors constructing a [`HostEnv`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VtblError {
    /// The vtable pointer handed over by the host was null.
    NullVtbl,
}

impl fmt::Display for VtblError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NullVtbl => write!(f, "host vtable pointer is null"),
        }
    }
}

impl Error for VtblError {}

/// The embedding interface, bound to a host-provided function table.
///
/// Implements [`ArrayHost`] for every transportable primitive, so
/// scoped accessors constructed over it call straight through to the
/// host. Copying is cheap (the value is the table itself), and one
/// `HostEnv` can back any number of accessors on the current thread.
#[derive(Clone, Copy)]
pub struct HostEnv {
    vtbl: HostVtbl,
}

impl HostEnv {
    /// Wrap a host-provided vtable.
    pub fn new(vtbl: &HostVtbl) -> Self {
        Self { vtbl: *vtbl }
    }

    /// Wrap a vtable passed as a raw pointer across the C boundary.
    ///
    /// # Safety
    ///
    /// `vtbl`, if non-null, must point to a fully-initialized
    /// [`HostVtbl`] whose entry points satisfy the documented contract
    /// for as long as the returned value (or any accessor built on it)
    /// is in use.
    #[allow(unsafe_code)]
    pub unsafe fn from_raw(vtbl: *const HostVtbl) -> Result<Self, VtblError> {
        if vtbl.is_null() {
            return Err(VtblError::NullVtbl);
        }
        Ok(Self { vtbl: *vtbl })
    }
}

macro_rules! host_vtbl_impl {
    ($ty:ty, $region:ident, $checkout:ident, $checkin:ident) => {
        impl ArrayHost<$ty> for HostEnv {
            type Array = RawArray;

            #[allow(unsafe_code)]
            fn array_len(&self, array: RawArray) -> usize {
                // SAFETY: vtable contract — `array_len` accepts any
                // live handle together with the host's own ctx.
                unsafe { (self.vtbl.array_len)(self.vtbl.ctx, array.as_ptr()) }
            }

            #[allow(unsafe_code)]
            fn read_region(&self, array: RawArray, start: usize, out: &mut [$ty]) {
                // SAFETY: `out` is valid for `out.len()` writes; the
                // host copies exactly that many elements from `start`.
                unsafe {
                    (self.vtbl.$region)(
                        self.vtbl.ctx,
                        array.as_ptr(),
                        start,
                        out.len(),
                        out.as_mut_ptr(),
                    )
                }
            }

            #[allow(unsafe_code)]
            fn checkout(&self, array: RawArray) -> *mut $ty {
                // The copy-or-pin choice stays with the host; the
                // out-flag is not consulted here.
                // SAFETY: vtable contract; null is a legal failure
                // return and is handled by the caller.
                unsafe {
                    (self.vtbl.$checkout)(
                        self.vtbl.ctx,
                        array.as_ptr(),
                        std::ptr::null_mut(),
                    )
                }
            }

            #[allow(unsafe_code)]
            fn checkin(&self, array: RawArray, elems: *mut $ty, mode: ReleaseMode) {
                // SAFETY: `elems` came from the matching checkout entry
                // point and is returned exactly once.
                unsafe {
                    (self.vtbl.$checkin)(
                        self.vtbl.ctx,
                        array.as_ptr(),
                        elems,
                        mode as i32,
                    )
                }
            }

            #[allow(unsafe_code)]
            fn fatal_error(&self, msg: &str) {
                // An interior NUL cannot come out of this workspace's
                // messages; degrade to an empty message rather than
                // failing inside the abort path.
                let msg = CString::new(msg).unwrap_or_default();
                // SAFETY: the message is NUL-terminated and outlives
                // the call.
                unsafe { (self.vtbl.fatal_error)(self.vtbl.ctx, msg.as_ptr()) }
            }
        }
    };
}

host_vtbl_impl!(u8, read_region_u8, checkout_u8, checkin_u8);
host_vtbl_impl!(i8, read_region_i8, checkout_i8, checkin_i8);
host_vtbl_impl!(u16, read_region_u16, checkout_u16, checkin_u16);
host_vtbl_impl!(i16, read_region_i16, checkout_i16, checkin_i16);
host_vtbl_impl!(i32, read_region_i32, checkout_i32, checkin_i32);
host_vtbl_impl!(i64, read_region_i64, checkout_i64, checkin_i64);
host_vtbl_impl!(f32, read_region_f32, checkout_f32, checkin_f32);
host_vtbl_impl!(f64, read_region_f64, checkout_f64, checkin_f64);

//! Element-type bindings for host-owned primitive arrays.
//!
//! [`Element`] is implemented exactly once per primitive kind the
//! embedding interface can transport: `u8` (boolean), `i8` (byte),
//! `u16` (16-bit character), `i16`, `i32`, `i64`, `f32`, and `f64`.
//! Each binding fixes the backing array for the read-only accessor's
//! inline fast path, sized from [`INLINE_BUDGET_BYTES`].

use std::fmt;
use std::mem;

use smallvec::Array;

/// Stack budget, in bytes, for the read-only accessor's inline buffer.
///
/// The per-type inline capacity is this budget divided by the element
/// size. 1024 keeps an accessor well inside common stack frame limits
/// even with a few of them live in one frame.
pub const INLINE_BUDGET_BYTES: usize = 1024;

/// A primitive element type the embedding interface can transport.
///
/// The set of implementations is closed: one per primitive kind the
/// host can hand out arrays of. The trait only carries what the
/// accessors need — the inline-buffer array type and a diagnostic name;
/// the per-type entry points live on [`ArrayHost`](crate::ArrayHost)
/// implementations.
pub trait Element: Copy + Default + PartialEq + fmt::Debug + 'static {
    /// Backing array for the inline buffer. Its length is
    /// [`INLINE_BUDGET_BYTES`] divided by the element size.
    type Inline: Array<Item = Self>;

    /// Element name used in fatal messages and diagnostics.
    const NAME: &'static str;
}

/// Inline capacity of the read-only fast path for `T`, in elements.
///
/// Arrays of at most this many elements are copied out with a single
/// region read instead of being checked out from the host.
pub fn inline_capacity<T: Element>() -> usize {
    <T::Inline as Array>::size()
}

macro_rules! element {
    ($ty:ty) => {
        impl Element for $ty {
            type Inline = [$ty; INLINE_BUDGET_BYTES / mem::size_of::<$ty>()];
            const NAME: &'static str = stringify!($ty);
        }
    };
}

element!(u8);
element!(i8);
element!(u16);
element!(i16);
element!(i32);
element!(i64);
element!(f32);
element!(f64);

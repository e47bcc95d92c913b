//! Per-primitive accessor aliases.
//!
//! Three aliases per transportable primitive — assertive read-only,
//! nullable read-only, and read-write — so call sites can name the
//! element type without turbofish. They are plain aliases over
//! [`ArrayRo`], [`NullableArrayRo`], and [`ArrayRw`], generic over the
//! host implementation.

use crate::ro::{ArrayRo, NullableArrayRo};
use crate::rw::ArrayRw;

macro_rules! aliases {
    ($ty:ty, $ro:ident, $nullable:ident, $rw:ident) => {
        #[doc = concat!(
            "Read-only view of a host-owned `", stringify!($ty),
            "` array. Aborts via the host on an absent handle."
        )]
        pub type $ro<'h, H> = ArrayRo<'h, H, $ty>;

        #[doc = concat!(
            "Read-only view of a host-owned `", stringify!($ty),
            "` array; an absent handle is a valid empty state."
        )]
        pub type $nullable<'h, H> = NullableArrayRo<'h, H, $ty>;

        #[doc = concat!(
            "Read-write view of a host-owned `", stringify!($ty),
            "` array. Commits on drop; aborts via the host on an ",
            "absent handle."
        )]
        pub type $rw<'h, H> = ArrayRw<'h, H, $ty>;
    };
}

aliases!(u8, U8ArrayRo, NullableU8ArrayRo, U8ArrayRw);
aliases!(i8, I8ArrayRo, NullableI8ArrayRo, I8ArrayRw);
aliases!(u16, U16ArrayRo, NullableU16ArrayRo, U16ArrayRw);
aliases!(i16, I16ArrayRo, NullableI16ArrayRo, I16ArrayRw);
aliases!(i32, I32ArrayRo, NullableI32ArrayRo, I32ArrayRw);
aliases!(i64, I64ArrayRo, NullableI64ArrayRo, I64ArrayRw);
aliases!(f32, F32ArrayRo, NullableF32ArrayRo, F32ArrayRw);
aliases!(f64, F64ArrayRo, NullableF64ArrayRo, F64ArrayRw);

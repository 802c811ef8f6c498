/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use std::fmt::{Debug, Display};

use num_traits::Num;

/// Element types that can take part in matrix arithmetic and statistics.
///
/// This is a closed set of primitive numeric types. Keeping it closed lets the operator
/// overloads in [`crate::ops`] accept either a scalar or a matrix on the right-hand side
/// without the two implementations overlapping.
pub trait Scalar:
    Num + Copy + PartialOrd + Debug + Display + Send + Sync + 'static
{
}

macro_rules! impl_scalar {
    ($($T:ty),* $(,)?) => {
        $(impl Scalar for $T {})*
    };
}

impl_scalar!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

/// Interpretation of an element as a boolean.
///
/// Used by the predicate-free aggregates (`any`, `all`, `none`, `count`) and by logical
/// masks, where a nonzero element selects its position.
pub trait Truthy {
    fn is_truthy(&self) -> bool;
}

impl Truthy for bool {
    #[inline]
    fn is_truthy(&self) -> bool {
        *self
    }
}

macro_rules! impl_truthy {
    ($($T:ty),* $(,)?) => {
        $(
            impl Truthy for $T {
                #[inline]
                fn is_truthy(&self) -> bool {
                    *self != (0 as $T)
                }
            }
        )*
    };
}

impl_truthy!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

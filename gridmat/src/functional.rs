/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

//! Builders for the predicates and element transforms accepted by [`Grid1D`] operations.
//!
//! Predicates have the shape `Fn(&T) -> bool` and transforms `Fn(&T) -> T`, matching the
//! callbacks of `filter`, `count_if`, `where_indices`, `map` and `mutate`.
//!
//! ```
//! use gridmat::prelude::*;
//! use gridmat::functional::{and, gt, lt, not};
//!
//! let m = Matrix::<i32>::seq(10);
//! assert!(m.filter(and(gt(3), lt(6))).eq_slice(&[4, 5]));
//! assert_eq!(m.count_if(not(functional::even())), 5);
//! ```
//!
//! [`Grid1D`]: crate::grid::Grid1D

use num_traits::PrimInt;

use crate::scalar::{Scalar, Truthy};

/////////////////
// Comparisons //
/////////////////

pub fn lt<T: PartialOrd>(rhs: T) -> impl Fn(&T) -> bool + Clone
where
    T: Clone,
{
    move |x| *x < rhs
}

pub fn leq<T: PartialOrd>(rhs: T) -> impl Fn(&T) -> bool + Clone
where
    T: Clone,
{
    move |x| *x <= rhs
}

pub fn gt<T: PartialOrd>(rhs: T) -> impl Fn(&T) -> bool + Clone
where
    T: Clone,
{
    move |x| *x > rhs
}

pub fn geq<T: PartialOrd>(rhs: T) -> impl Fn(&T) -> bool + Clone
where
    T: Clone,
{
    move |x| *x >= rhs
}

pub fn eq<T: PartialEq>(rhs: T) -> impl Fn(&T) -> bool + Clone
where
    T: Clone,
{
    move |x| *x == rhs
}

/// Return a predicate for membership in the closed interval `[low, high]`.
pub fn indicator<T: PartialOrd>(low: T, high: T) -> impl Fn(&T) -> bool + Clone
where
    T: Clone,
{
    move |x| low <= *x && *x <= high
}

/// Return a predicate for strictly positive values.
pub fn pos<T: Scalar>() -> impl Fn(&T) -> bool + Clone {
    gt(T::zero())
}

/// Return a predicate for strictly negative values.
pub fn neg<T: Scalar>() -> impl Fn(&T) -> bool + Clone {
    lt(T::zero())
}

pub fn even<T: PrimInt>() -> impl Fn(&T) -> bool + Clone {
    |x| (*x & T::one()).is_zero()
}

pub fn odd<T: PrimInt>() -> impl Fn(&T) -> bool + Clone {
    |x| !(*x & T::one()).is_zero()
}

/// Return a predicate testing the truthiness of an element.
pub fn truthy<T: Truthy>() -> impl Fn(&T) -> bool + Clone {
    |x| x.is_truthy()
}

/////////////////
// Combinators //
/////////////////

pub fn not<T, A>(a: A) -> impl Fn(&T) -> bool + Clone
where
    A: Fn(&T) -> bool + Clone,
{
    move |x| !a(x)
}

pub fn and<T, A, B>(a: A, b: B) -> impl Fn(&T) -> bool + Clone
where
    A: Fn(&T) -> bool + Clone,
    B: Fn(&T) -> bool + Clone,
{
    move |x| a(x) && b(x)
}

pub fn or<T, A, B>(a: A, b: B) -> impl Fn(&T) -> bool + Clone
where
    A: Fn(&T) -> bool + Clone,
    B: Fn(&T) -> bool + Clone,
{
    move |x| a(x) || b(x)
}

/// Return a predicate that holds when exactly one of `a` and `b` holds.
pub fn xor<T, A, B>(a: A, b: B) -> impl Fn(&T) -> bool + Clone
where
    A: Fn(&T) -> bool + Clone,
    B: Fn(&T) -> bool + Clone,
{
    move |x| a(x) != b(x)
}

////////////////
// Transforms //
////////////////

pub fn plus<T: Scalar>(rhs: T) -> impl Fn(&T) -> T + Clone {
    move |&x| x + rhs
}

pub fn times<T: Scalar>(rhs: T) -> impl Fn(&T) -> T + Clone {
    move |&x| x * rhs
}

/// Return a transform dividing by `rhs`.
pub fn divides<T: Scalar>(rhs: T) -> impl Fn(&T) -> T + Clone {
    move |&x| x / rhs
}

pub fn sqrd<T: Scalar>() -> impl Fn(&T) -> T + Clone {
    |&x| x * x
}

pub fn cubd<T: Scalar>() -> impl Fn(&T) -> T + Clone {
    |&x| x * x * x
}

///////////
// Tests //
///////////

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(-1, true, true, false, false, false)]
    #[case(0, true, true, false, false, true)]
    #[case(1, false, true, false, true, false)]
    #[case(2, false, false, true, true, false)]
    fn comparisons(
        #[case] x: i32,
        #[case] lt_one: bool,
        #[case] leq_one: bool,
        #[case] gt_one: bool,
        #[case] geq_one: bool,
        #[case] eq_zero: bool,
    ) {
        assert_eq!(lt(1)(&x), lt_one);
        assert_eq!(leq(1)(&x), leq_one);
        assert_eq!(gt(1)(&x), gt_one);
        assert_eq!(geq(1)(&x), geq_one);
        assert_eq!(eq(0)(&x), eq_zero);
    }

    #[test]
    fn sign_and_parity() {
        assert!(pos::<f64>()(&0.5));
        assert!(!pos::<f64>()(&0.0));
        assert!(neg::<i64>()(&-3));
        assert!(!neg::<i64>()(&0));

        let is_even = even::<i32>();
        let is_odd = odd::<i32>();
        for x in -4..=4 {
            assert_eq!(is_even(&x), x % 2 == 0, "x = {x}");
            assert_eq!(is_odd(&x), x % 2 != 0, "x = {x}");
        }
        assert!(odd::<u8>()(&255));
    }

    #[test]
    fn intervals_and_truthiness() {
        let inside = indicator(2.0, 4.0);
        assert!(inside(&2.0));
        assert!(inside(&4.0));
        assert!(!inside(&4.5));

        assert!(truthy::<i32>()(&-1));
        assert!(!truthy::<bool>()(&false));
    }

    #[test]
    fn combinators() {
        let between = and(gt(1i32), lt(4));
        let outside = not(between.clone());
        let either = or(lt(0i32), gt(10));
        let one_of = xor(even::<i32>(), gt(5));

        let values: Vec<i32> = (-1..=12).collect();
        let got: Vec<i32> = values.iter().copied().filter(|x| between(x)).collect();
        assert_eq!(got, vec![2, 3]);
        assert_eq!(
            values.iter().copied().filter(|x| outside(x)).count(),
            values.len() - 2
        );
        assert_eq!(
            values.iter().copied().filter(|x| either(x)).collect::<Vec<_>>(),
            vec![-1, 11, 12]
        );
        // Even xor greater-than-five.
        assert_eq!(
            values.iter().copied().filter(|x| one_of(x)).collect::<Vec<_>>(),
            vec![0, 2, 4, 7, 9, 11]
        );
    }

    #[test]
    fn transforms() {
        assert_eq!(plus(2)(&3), 5);
        assert_eq!(times(2.5)(&2.0), 5.0);
        assert_eq!(divides(4)(&9), 2);
        assert_eq!(sqrd::<i32>()(&-3), 9);
        assert_eq!(cubd::<i32>()(&-3), -27);
    }
}

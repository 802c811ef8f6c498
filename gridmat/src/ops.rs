/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

//! Element-wise arithmetic.
//!
//! The binary operators are implemented for borrowed matrices, strided views and masked
//! views, and take either a matrix or a [`Scalar`] on the right-hand side:
//!
//! ```
//! use gridmat::prelude::*;
//!
//! let a = Matrix::from_rows(&[[1, 2], [3, 4]]);
//! let b = Matrix::filled(2, 2, 10);
//!
//! assert!((&a + &b).eq_slice(&[11, 12, 13, 14]));
//! assert!((&a * 3).eq_slice(&[3, 6, 9, 12]));
//! assert!(a.try_sub(&Matrix::<i32>::seq(4)).is_err());
//! ```
//!
//! Matrix-matrix operators panic when the two shapes differ. The `try_*` methods perform
//! the same operation and return [`MatrixError::ShapeMismatch`] instead. A view combines
//! with any matrix holding the same number of elements.
//!
//! Compound assignment with a scalar (`+= -= *= /=`) is available on mutable matrices and
//! on every mutable view, and writes through to the parent storage.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::{
    error::{MatrixError, MatrixResult},
    grid::{Grid1D, Grid1DMut},
    masked::MaskedBase,
    matrix::{DenseData, Matrix, MatrixBase, MutDenseData},
    scalar::Scalar,
    strided::StridedBase,
};

impl<D> MatrixBase<D>
where
    D: DenseData,
    D::Elem: Scalar,
{
    fn zip_shapes<E, F>(&self, other: &MatrixBase<E>, f: F) -> MatrixResult<Matrix<D::Elem>>
    where
        E: DenseData<Elem = D::Elem>,
        F: FnMut(&D::Elem, &D::Elem) -> D::Elem,
    {
        if self.shape() != other.shape() {
            return Err(MatrixError::shape_mismatch(self.shape(), other.shape()));
        }
        self.map2(other, f)
    }
}

macro_rules! impl_binary_op {
    ($Trait:ident, $method:ident, $checked:ident, $op:tt) => {
        impl<D> MatrixBase<D>
        where
            D: DenseData,
            D::Elem: Scalar,
        {
            #[doc = concat!("Return the element-wise `self ", stringify!($op), " other`.")]
            ///
            /// Returns `MatrixError::ShapeMismatch` unless both operands have the same shape.
            pub fn $checked<E>(&self, other: &MatrixBase<E>) -> MatrixResult<Matrix<D::Elem>>
            where
                E: DenseData<Elem = D::Elem>,
            {
                self.zip_shapes(other, |&a, &b| a $op b)
            }
        }

        impl<D, E> $Trait<&MatrixBase<E>> for &MatrixBase<D>
        where
            D: DenseData,
            E: DenseData<Elem = D::Elem>,
            D::Elem: Scalar,
        {
            type Output = Matrix<D::Elem>;

            fn $method(self, rhs: &MatrixBase<E>) -> Self::Output {
                match self.$checked(rhs) {
                    Ok(m) => m,
                    Err(err) => panic!("operator `{}` failed: {}", stringify!($op), err),
                }
            }
        }

        impl<D, B> $Trait<B> for &MatrixBase<D>
        where
            D: DenseData<Elem = B>,
            B: Scalar,
        {
            type Output = Matrix<B>;

            fn $method(self, rhs: B) -> Self::Output {
                self.map(|&x| x $op rhs)
            }
        }
    };
}

impl_binary_op!(Add, add, try_add, +);
impl_binary_op!(Sub, sub, try_sub, -);
impl_binary_op!(Mul, mul, try_mul, *);
impl_binary_op!(Div, div, try_div, /);

impl<D> Neg for &MatrixBase<D>
where
    D: DenseData,
    D::Elem: Scalar + Neg<Output = D::Elem>,
{
    type Output = Matrix<D::Elem>;

    fn neg(self) -> Self::Output {
        self.map(|&x| -x)
    }
}

// Views combine with a matrix of the same element count. The result takes the view's
// natural shape.
macro_rules! impl_view_op {
    ($View:ident, $Trait:ident, $method:ident, $op:tt) => {
        impl<D, E> $Trait<&MatrixBase<E>> for &$View<D>
        where
            D: DenseData,
            E: DenseData<Elem = D::Elem>,
            D::Elem: Scalar,
        {
            type Output = Matrix<D::Elem>;

            fn $method(self, rhs: &MatrixBase<E>) -> Self::Output {
                match self.map2(rhs, |&a, &b| a $op b) {
                    Ok(m) => m,
                    Err(err) => panic!("operator `{}` failed: {}", stringify!($op), err),
                }
            }
        }

        impl<D, B> $Trait<B> for &$View<D>
        where
            D: DenseData<Elem = B>,
            B: Scalar,
        {
            type Output = Matrix<B>;

            fn $method(self, rhs: B) -> Self::Output {
                self.map(|&x| x $op rhs)
            }
        }
    };
    ($View:ident) => {
        impl_view_op!($View, Add, add, +);
        impl_view_op!($View, Sub, sub, -);
        impl_view_op!($View, Mul, mul, *);
        impl_view_op!($View, Div, div, /);

        impl<D> Neg for &$View<D>
        where
            D: DenseData,
            D::Elem: Scalar + Neg<Output = D::Elem>,
        {
            type Output = Matrix<D::Elem>;

            fn neg(self) -> Self::Output {
                self.map(|&x| -x)
            }
        }
    };
}

impl_view_op!(StridedBase);
impl_view_op!(MaskedBase);

macro_rules! impl_assign_op {
    ($Trait:ident, $method:ident, $op:tt) => {
        impl<D, B> $Trait<B> for MatrixBase<D>
        where
            D: MutDenseData<Elem = B>,
            B: Scalar,
        {
            fn $method(&mut self, rhs: B) {
                self.mutate(|&x| x $op rhs);
            }
        }

        impl<D, B> $Trait<B> for StridedBase<D>
        where
            D: MutDenseData<Elem = B>,
            B: Scalar,
        {
            fn $method(&mut self, rhs: B) {
                self.mutate(|&x| x $op rhs);
            }
        }

        impl<D, B> $Trait<B> for MaskedBase<D>
        where
            D: MutDenseData<Elem = B>,
            B: Scalar,
        {
            fn $method(&mut self, rhs: B) {
                self.mutate(|&x| x $op rhs);
            }
        }

        /// Element-wise compound assignment.
        ///
        /// # Panics
        ///
        /// Panics if the two shapes differ.
        impl<D, E> $Trait<&MatrixBase<E>> for MatrixBase<D>
        where
            D: MutDenseData,
            E: DenseData<Elem = D::Elem>,
            D::Elem: Scalar,
        {
            fn $method(&mut self, rhs: &MatrixBase<E>) {
                assert_eq!(
                    self.shape(),
                    rhs.shape(),
                    "operator `{}` requires operands of the same shape",
                    stringify!($op),
                );
                if let Err(err) = self.zip_assign(rhs, |x, &y| *x = *x $op y) {
                    panic!("operator `{}` failed: {}", stringify!($op), err);
                }
            }
        }
    };
}

impl_assign_op!(AddAssign, add_assign, +);
impl_assign_op!(SubAssign, sub_assign, -);
impl_assign_op!(MulAssign, mul_assign, *);
impl_assign_op!(DivAssign, div_assign, /);

///////////
// Tests //
///////////

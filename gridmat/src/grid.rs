/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

//! The one-dimensional view of matrices, views and index lists.
//!
//! Every type in this crate that holds (or aliases) a sequence of elements implements
//! [`Grid1D`] by providing its length, its natural 2-D shape and an unchecked 0-based
//! accessor. All other operations (access helpers, statistics, boolean aggregates,
//! functional transforms and products) are provided methods written against those three
//! primitives. A row view, a masked view and an owning matrix therefore share one
//! implementation of `sum`, `filter`, `dot` and friends.
//!
//! # Indexing conventions
//!
//! * `at`, `at_mut`, `swap` and `for_each_indexed` use 1-based positions and are
//!   bounds-checked.
//! * `get`, `get_mut` and the `unsafe` unchecked accessors use 0-based positions.
//!
//! Elements are visited in storage order: row-major for matrices and rectangular views,
//! ascending index order for masked views.

use std::fmt;

use num_traits::{Float, FromPrimitive, One, PrimInt, Signed, ToPrimitive, Zero};

use crate::{
    error::{MatrixError, MatrixResult},
    functional,
    index::Indices,
    matrix::Matrix,
    scalar::{Scalar, Truthy},
};

/// Selects the denominator of [`Grid1D::var`] and [`Grid1D::sd`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Variance {
    /// Divide by `n`.
    #[default]
    Population,
    /// Divide by `n - 1`. Undefined for `n <= 1`.
    Sample,
}

/// A 1-based, bounds-checked, one-dimensional sequence.
pub trait Grid1D {
    type Elem;

    /// Return the number of elements.
    fn size(&self) -> usize;

    /// Return the natural `(nrows, ncols)` shape of this grid.
    ///
    /// The product of the two extents is always `self.size()`. Shape-preserving
    /// operations such as [`Grid1D::to_matrix`] and [`Grid1D::map`] use this shape for
    /// their output.
    fn shape(&self) -> (usize, usize) {
        (1, self.size())
    }

    /// Return a reference to element `i` without boundschecking.
    ///
    /// # Safety
    ///
    /// The following conditions must hold to avoid undefined behavior:
    /// * `i < self.size()`.
    unsafe fn get_unchecked(&self, i: usize) -> &Self::Elem;

    ////////////
    // Access //
    ////////////

    /// Return element `i` (0-based) if `i < self.size()`. Otherwise, return `None`.
    fn get(&self, i: usize) -> Option<&Self::Elem> {
        if i < self.size() {
            // SAFETY: `i` is in-bounds.
            Some(unsafe { self.get_unchecked(i) })
        } else {
            None
        }
    }

    /// Return element `i` using 1-based indexing.
    ///
    /// Returns `MatrixError::OutOfBounds` if `i` is not in `[1, self.size()]`.
    fn at(&self, i: usize) -> MatrixResult<&Self::Elem> {
        if self.is_valid_bound(i) {
            // SAFETY: `1 <= i <= self.size()`.
            Ok(unsafe { self.get_unchecked(i - 1) })
        } else {
            Err(MatrixError::out_of_bounds(i, self.size()))
        }
    }

    /// Return whether `i` is a valid 1-based position.
    fn is_valid_bound(&self, i: usize) -> bool {
        i >= 1 && i <= self.size()
    }

    /// Return whether `other` has the same number of elements as `self`.
    fn is_same_size<G>(&self, other: &G) -> bool
    where
        G: Grid1D + ?Sized,
    {
        self.size() == other.size()
    }

    fn first(&self) -> Option<&Self::Elem> {
        self.get(0)
    }

    fn last(&self) -> Option<&Self::Elem> {
        self.size().checked_sub(1).and_then(|i| self.get(i))
    }

    /// Return an iterator over the elements in storage order.
    fn iter(&self) -> Iter<'_, Self> {
        Iter {
            grid: self,
            front: 0,
            back: self.size(),
        }
    }

    /// Invoke `f` with every 1-based position and its element.
    fn for_each_indexed<F>(&self, mut f: F)
    where
        F: FnMut(usize, &Self::Elem),
    {
        self.iter().enumerate().for_each(|(i, x)| f(i + 1, x));
    }

    /// Copy the elements into a new matrix with the natural shape of `self`.
    fn to_matrix(&self) -> Matrix<Self::Elem>
    where
        Self::Elem: Clone,
    {
        let (nrows, ncols) = self.shape();
        Matrix::from_boxed(self.iter().cloned().collect(), nrows, ncols)
    }

    /// Return whether `self` and `other` hold the same elements in the same order.
    ///
    /// Shapes are not compared: a `1 x 4` row and a `2 x 2` block with equal contents
    /// are equal grids.
    fn grid_eq<G>(&self, other: &G) -> bool
    where
        G: Grid1D<Elem = Self::Elem> + ?Sized,
        Self::Elem: PartialEq,
    {
        self.is_same_size(other) && self.iter().eq(other.iter())
    }

    /// Return whether the elements of `self` are exactly `expected`.
    fn eq_slice(&self, expected: &[Self::Elem]) -> bool
    where
        Self::Elem: PartialEq,
    {
        self.size() == expected.len() && self.iter().eq(expected.iter())
    }

    ///////////////////////////
    // Take, Drop, Pad, etc. //
    ///////////////////////////

    /// Return the first `min(n, self.size())` elements as a row vector.
    ///
    /// Returns the null matrix when no elements are taken.
    fn take(&self, n: usize) -> Matrix<Self::Elem>
    where
        Self::Elem: Clone,
    {
        Matrix::collect_row(self.iter().take(n).cloned())
    }

    /// Return everything after the first `n` elements as a row vector.
    ///
    /// Returns the null matrix when `n >= self.size()`.
    fn drop(&self, n: usize) -> Matrix<Self::Elem>
    where
        Self::Elem: Clone,
    {
        Matrix::collect_row(self.iter().skip(n).cloned())
    }

    /// Return everything but the last element. Null if `self.size() <= 1`.
    fn head(&self) -> Matrix<Self::Elem>
    where
        Self::Elem: Clone,
    {
        self.take(self.size().saturating_sub(1))
    }

    /// Return everything but the first element. Null if `self.size() <= 1`.
    fn tail(&self) -> Matrix<Self::Elem>
    where
        Self::Elem: Clone,
    {
        self.drop(1)
    }

    /// Return a row vector of length `len`.
    ///
    /// If `len <= self.size()`, this is `self.take(len)`. Otherwise the elements are
    /// followed by copies of `value`.
    fn pad(&self, len: usize, value: Self::Elem) -> Matrix<Self::Elem>
    where
        Self::Elem: Clone,
    {
        let padding = std::iter::repeat(value).take(len.saturating_sub(self.size()));
        Matrix::collect_row(self.iter().cloned().chain(padding).take(len))
    }

    /// Return an `nrows x ncols` matrix holding the elements of `self` in row-major order,
    /// truncated or zero-padded as needed.
    ///
    /// Returns the null matrix if the new shape holds no elements or `nrows * ncols`
    /// overflows.
    fn resize(&self, nrows: usize, ncols: usize) -> Matrix<Self::Elem>
    where
        Self::Elem: Clone + Zero,
    {
        let len = match nrows.checked_mul(ncols) {
            Some(0) | None => return Matrix::null(),
            Some(len) => len,
        };
        let padded = self.pad(len, Self::Elem::zero());
        Matrix::from_boxed(padded.into_inner(), nrows, ncols)
    }

    /// Return a matrix of zeros with the natural shape of `self`.
    fn zeros_like(&self) -> Matrix<Self::Elem>
    where
        Self::Elem: Clone + Zero,
    {
        let (nrows, ncols) = self.shape();
        Matrix::zeros(nrows, ncols)
    }

    ////////////////
    // Statistics //
    ////////////////

    /// Fold the elements into `init` with `f`, in storage order.
    fn reduce<A, F>(&self, init: A, f: F) -> A
    where
        F: FnMut(A, &Self::Elem) -> A,
    {
        self.iter().fold(init, f)
    }

    fn sum(&self) -> Self::Elem
    where
        Self::Elem: Scalar,
    {
        self.reduce(Self::Elem::zero(), |acc, &x| acc + x)
    }

    fn sum_abs(&self) -> Self::Elem
    where
        Self::Elem: Scalar + Signed,
    {
        self.reduce(Self::Elem::zero(), |acc, x| acc + x.abs())
    }

    fn prod(&self) -> Self::Elem
    where
        Self::Elem: Scalar,
    {
        self.reduce(Self::Elem::one(), |acc, &x| acc * x)
    }

    /// Return the arithmetic mean, or `None` for an empty grid.
    ///
    /// Integer element types use integer division, truncating toward zero. This holds even
    /// when the element count is not representable in the element type.
    fn mean(&self) -> Option<Self::Elem>
    where
        Self::Elem: Scalar + FromPrimitive + ToPrimitive,
    {
        let n = self.size();
        if n == 0 {
            return None;
        }
        let sum = self.sum();
        match Self::Elem::from_usize(n) {
            Some(count) => Some(sum / count),
            None => Self::Elem::from_f64((sum.to_f64()? / n.to_f64()?).trunc()),
        }
    }

    fn min(&self) -> Option<Self::Elem>
    where
        Self::Elem: Scalar,
    {
        let first = *self.first()?;
        Some(self.reduce(first, |acc, &x| if x < acc { x } else { acc }))
    }

    fn max(&self) -> Option<Self::Elem>
    where
        Self::Elem: Scalar,
    {
        let first = *self.first()?;
        Some(self.reduce(first, |acc, &x| if x > acc { x } else { acc }))
    }

    /// Return the variance, or `None` if it is undefined.
    ///
    /// The variance is undefined for an empty grid, and the sample variance is undefined
    /// when `self.size() <= 1`.
    fn var(&self, kind: Variance) -> Option<Self::Elem>
    where
        Self::Elem: Scalar + Float + FromPrimitive,
    {
        let n = self.size();
        let denominator = match kind {
            Variance::Population => n,
            Variance::Sample => n.checked_sub(1)?,
        };
        if denominator == 0 {
            return None;
        }
        let mu = self.mean()?;
        let squares = self.reduce(Self::Elem::zero(), |acc, &x| {
            let d = x - mu;
            acc + d * d
        });
        Some(squares / Self::Elem::from_usize(denominator)?)
    }

    /// Return the standard deviation. See [`Grid1D::var`].
    fn sd(&self, kind: Variance) -> Option<Self::Elem>
    where
        Self::Elem: Scalar + Float + FromPrimitive,
    {
        self.var(kind).map(Float::sqrt)
    }

    /// Return the `p`-norm `(sum |x|^p)^(1/p)`.
    ///
    /// # Panics
    ///
    /// Panics if `p == 0`.
    fn p_norm(&self, p: u32) -> Self::Elem
    where
        Self::Elem: Scalar + Float + FromPrimitive,
    {
        assert!(p != 0, "the 0-norm is not a norm");
        match p {
            1 => self.reduce(Self::Elem::zero(), |acc, x| acc + x.abs()),
            2 => self.reduce(Self::Elem::zero(), |acc, &x| acc + x * x).sqrt(),
            _ => {
                // Every `u32` converts to a float, possibly rounded.
                let order = Self::Elem::from_u32(p).unwrap_or_else(Self::Elem::max_value);
                let total = match i32::try_from(p) {
                    Ok(k) => self.reduce(Self::Elem::zero(), |acc, x| acc + x.abs().powi(k)),
                    Err(_) => self.reduce(Self::Elem::zero(), |acc, x| acc + x.abs().powf(order)),
                };
                total.powf(order.recip())
            }
        }
    }

    /// Return the Euclidean norm.
    fn norm(&self) -> Self::Elem
    where
        Self::Elem: Scalar + Float + FromPrimitive,
    {
        self.p_norm(2)
    }

    ////////////////////////
    // Boolean Aggregates //
    ////////////////////////

    /// Return the number of truthy elements.
    fn count(&self) -> usize
    where
        Self::Elem: Truthy,
    {
        self.count_if(Truthy::is_truthy)
    }

    /// Return the number of elements satisfying `pred`.
    fn count_if<F>(&self, mut pred: F) -> usize
    where
        F: FnMut(&Self::Elem) -> bool,
    {
        self.iter().filter(|x| pred(x)).count()
    }

    fn any(&self) -> bool
    where
        Self::Elem: Truthy,
    {
        self.any_if(Truthy::is_truthy)
    }

    fn any_if<F>(&self, mut pred: F) -> bool
    where
        F: FnMut(&Self::Elem) -> bool,
    {
        self.iter().any(|x| pred(x))
    }

    /// Return whether every element is truthy. `true` for an empty grid.
    fn all(&self) -> bool
    where
        Self::Elem: Truthy,
    {
        self.all_if(Truthy::is_truthy)
    }

    fn all_if<F>(&self, mut pred: F) -> bool
    where
        F: FnMut(&Self::Elem) -> bool,
    {
        self.iter().all(|x| pred(x))
    }

    fn none(&self) -> bool
    where
        Self::Elem: Truthy,
    {
        !self.any()
    }

    fn none_if<F>(&self, pred: F) -> bool
    where
        F: FnMut(&Self::Elem) -> bool,
    {
        !self.any_if(pred)
    }

    ////////////////
    // Functional //
    ////////////////

    /// Apply `f` to every element, keeping the natural shape of `self`.
    fn map<U, F>(&self, f: F) -> Matrix<U>
    where
        F: FnMut(&Self::Elem) -> U,
    {
        let (nrows, ncols) = self.shape();
        Matrix::from_boxed(self.iter().map(f).collect(), nrows, ncols)
    }

    /// Zip `self` with `other` through `f`, keeping the natural shape of `self`.
    ///
    /// Returns `MatrixError::ShapeMismatch` if the sizes differ.
    fn map2<G, U, F>(&self, other: &G, mut f: F) -> MatrixResult<Matrix<U>>
    where
        G: Grid1D + ?Sized,
        F: FnMut(&Self::Elem, &G::Elem) -> U,
    {
        if !self.is_same_size(other) {
            return Err(MatrixError::shape_mismatch(self.size(), other.size()));
        }
        let (nrows, ncols) = self.shape();
        let data = self.iter().zip(other.iter()).map(|(a, b)| f(a, b)).collect();
        Ok(Matrix::from_boxed(data, nrows, ncols))
    }

    /// Return a copy of `self` where `f` has been applied to the elements satisfying
    /// `pred`. The other elements are copied unchanged.
    fn map_if<F, P>(&self, mut f: F, mut pred: P) -> Matrix<Self::Elem>
    where
        Self::Elem: Clone,
        F: FnMut(&Self::Elem) -> Self::Elem,
        P: FnMut(&Self::Elem) -> bool,
    {
        self.map(|x| if pred(x) { f(x) } else { x.clone() })
    }

    /// Return the elements satisfying `pred`, in storage order, as a row vector.
    ///
    /// Returns the null matrix if no element matches.
    fn filter<P>(&self, mut pred: P) -> Matrix<Self::Elem>
    where
        Self::Elem: Clone,
        P: FnMut(&Self::Elem) -> bool,
    {
        Matrix::collect_row(self.iter().filter(|x| pred(x)).cloned())
    }

    /// Alias for [`Grid1D::filter`].
    fn cond<P>(&self, pred: P) -> Matrix<Self::Elem>
    where
        Self::Elem: Clone,
        P: FnMut(&Self::Elem) -> bool,
    {
        self.filter(pred)
    }

    /// Return the `n - 1` adjacent differences `x[i + 1] - x[i]` as a row vector.
    fn diff(&self) -> Matrix<Self::Elem>
    where
        Self::Elem: Scalar,
    {
        Matrix::collect_row(self.iter().zip(self.iter().skip(1)).map(|(&a, &b)| b - a))
    }

    /// Return the `n - 1` adjacent midpoints `(x[i] + x[i + 1]) / 2` as a row vector.
    fn midpoints(&self) -> Matrix<Self::Elem>
    where
        Self::Elem: Scalar,
    {
        let two = Self::Elem::one() + Self::Elem::one();
        Matrix::collect_row(
            self.iter()
                .zip(self.iter().skip(1))
                .map(|(&a, &b)| (a + b) / two),
        )
    }

    fn abs(&self) -> Matrix<Self::Elem>
    where
        Self::Elem: Scalar + Signed,
    {
        self.map(|x| x.abs())
    }

    fn sqrt(&self) -> Matrix<Self::Elem>
    where
        Self::Elem: Scalar + Float,
    {
        self.map(|x| x.sqrt())
    }

    fn cbrt(&self) -> Matrix<Self::Elem>
    where
        Self::Elem: Scalar + Float,
    {
        self.map(|x| x.cbrt())
    }

    fn powi(&self, k: i32) -> Matrix<Self::Elem>
    where
        Self::Elem: Scalar + Float,
    {
        self.map(|x| x.powi(k))
    }

    /// Raise every element to the real power `exponent`.
    fn pow(&self, exponent: Self::Elem) -> Matrix<Self::Elem>
    where
        Self::Elem: Scalar + Float,
    {
        self.map(|x| x.powf(exponent))
    }

    fn sqrd(&self) -> Matrix<Self::Elem>
    where
        Self::Elem: Scalar,
    {
        self.map(functional::sqrd())
    }

    fn cubd(&self) -> Matrix<Self::Elem>
    where
        Self::Elem: Scalar,
    {
        self.map(functional::cubd())
    }

    /// Return a copy of `self` divided by its `p`-norm.
    fn normalized(&self, p: u32) -> Matrix<Self::Elem>
    where
        Self::Elem: Scalar + Float + FromPrimitive,
    {
        let norm = self.p_norm(p);
        self.map(|&x| x / norm)
    }

    /// Return a `self.size() x n` matrix whose columns are copies of `self`.
    fn repcol(&self, n: usize) -> Matrix<Self::Elem>
    where
        Self::Elem: Clone,
    {
        let data = self
            .iter()
            .flat_map(|x| std::iter::repeat(x.clone()).take(n))
            .collect();
        Matrix::from_boxed(data, self.size(), n)
    }

    /// Return an `n x self.size()` matrix whose rows are copies of `self`.
    fn reprow(&self, n: usize) -> Matrix<Self::Elem>
    where
        Self::Elem: Clone,
    {
        let data = (0..n).flat_map(|_| self.iter().cloned()).collect();
        Matrix::from_boxed(data, n, self.size())
    }

    //////////////
    // Products //
    //////////////

    /// Return the dot product of `self` and `other`.
    ///
    /// Returns `MatrixError::ShapeMismatch` if the sizes differ.
    fn dot<G>(&self, other: &G) -> MatrixResult<Self::Elem>
    where
        G: Grid1D<Elem = Self::Elem> + ?Sized,
        Self::Elem: Scalar,
    {
        if !self.is_same_size(other) {
            return Err(MatrixError::shape_mismatch(self.size(), other.size()));
        }
        Ok(self
            .iter()
            .zip(other.iter())
            .fold(Self::Elem::zero(), |acc, (&a, &b)| acc + a * b))
    }

    /// Alias for [`Grid1D::dot`].
    fn inner_product<G>(&self, other: &G) -> MatrixResult<Self::Elem>
    where
        G: Grid1D<Elem = Self::Elem> + ?Sized,
        Self::Elem: Scalar,
    {
        self.dot(other)
    }

    /// Return the `n x m` matrix with entries `self[i] * other[j]`.
    fn outer_product<G>(&self, other: &G) -> Matrix<Self::Elem>
    where
        G: Grid1D<Elem = Self::Elem> + ?Sized,
        Self::Elem: Scalar,
    {
        let data = self
            .iter()
            .flat_map(|&a| other.iter().map(move |&b| a * b))
            .collect();
        Matrix::from_boxed(data, self.size(), other.size())
    }

    /// Return the element-wise product, keeping the natural shape of `self`.
    ///
    /// Returns `MatrixError::ShapeMismatch` if the sizes differ.
    fn hadamard_product<G>(&self, other: &G) -> MatrixResult<Matrix<Self::Elem>>
    where
        G: Grid1D<Elem = Self::Elem> + ?Sized,
        Self::Elem: Scalar,
    {
        self.map2(other, |&a, &b| a * b)
    }

    //////////////////
    // Conditionals //
    //////////////////

    fn lt(&self, value: Self::Elem) -> Matrix<Self::Elem>
    where
        Self::Elem: Scalar,
    {
        self.filter(functional::lt(value))
    }

    fn leq(&self, value: Self::Elem) -> Matrix<Self::Elem>
    where
        Self::Elem: Scalar,
    {
        self.filter(functional::leq(value))
    }

    fn gt(&self, value: Self::Elem) -> Matrix<Self::Elem>
    where
        Self::Elem: Scalar,
    {
        self.filter(functional::gt(value))
    }

    fn geq(&self, value: Self::Elem) -> Matrix<Self::Elem>
    where
        Self::Elem: Scalar,
    {
        self.filter(functional::geq(value))
    }

    fn equals(&self, value: Self::Elem) -> Matrix<Self::Elem>
    where
        Self::Elem: Scalar,
    {
        self.filter(functional::eq(value))
    }

    fn pos(&self) -> Matrix<Self::Elem>
    where
        Self::Elem: Scalar,
    {
        self.filter(functional::pos())
    }

    fn neg(&self) -> Matrix<Self::Elem>
    where
        Self::Elem: Scalar,
    {
        self.filter(functional::neg())
    }

    fn even(&self) -> Matrix<Self::Elem>
    where
        Self::Elem: Scalar + PrimInt,
    {
        self.filter(functional::even())
    }

    fn odd(&self) -> Matrix<Self::Elem>
    where
        Self::Elem: Scalar + PrimInt,
    {
        self.filter(functional::odd())
    }

    /////////////
    // Indices //
    /////////////

    /// Return the 0-based positions of the elements satisfying `pred`, strictly
    /// ascending.
    fn where_indices<P>(&self, pred: P) -> Indices
    where
        P: FnMut(&Self::Elem) -> bool,
    {
        Indices::matching(self, pred)
    }

    fn where_lt(&self, value: Self::Elem) -> Indices
    where
        Self::Elem: Scalar,
    {
        self.where_indices(functional::lt(value))
    }

    fn where_leq(&self, value: Self::Elem) -> Indices
    where
        Self::Elem: Scalar,
    {
        self.where_indices(functional::leq(value))
    }

    fn where_gt(&self, value: Self::Elem) -> Indices
    where
        Self::Elem: Scalar,
    {
        self.where_indices(functional::gt(value))
    }

    fn where_geq(&self, value: Self::Elem) -> Indices
    where
        Self::Elem: Scalar,
    {
        self.where_indices(functional::geq(value))
    }
}

/// The mutable companion to [`Grid1D`].
///
/// Writes through a view land directly in the parent matrix's storage.
pub trait Grid1DMut: Grid1D {
    /// Return a mutable reference to element `i` without boundschecking.
    ///
    /// # Safety
    ///
    /// The following conditions must hold to avoid undefined behavior:
    /// * `i < self.size()`.
    unsafe fn get_unchecked_mut(&mut self, i: usize) -> &mut Self::Elem;

    /// Return element `i` (0-based) if `i < self.size()`. Otherwise, return `None`.
    fn get_mut(&mut self, i: usize) -> Option<&mut Self::Elem> {
        if i < self.size() {
            // SAFETY: `i` is in-bounds.
            Some(unsafe { self.get_unchecked_mut(i) })
        } else {
            None
        }
    }

    /// Return element `i` using 1-based indexing.
    ///
    /// Returns `MatrixError::OutOfBounds` if `i` is not in `[1, self.size()]`.
    fn at_mut(&mut self, i: usize) -> MatrixResult<&mut Self::Elem> {
        if self.is_valid_bound(i) {
            // SAFETY: `1 <= i <= self.size()`.
            Ok(unsafe { self.get_unchecked_mut(i - 1) })
        } else {
            Err(MatrixError::out_of_bounds(i, self.size()))
        }
    }

    fn first_mut(&mut self) -> Option<&mut Self::Elem> {
        self.get_mut(0)
    }

    fn last_mut(&mut self) -> Option<&mut Self::Elem> {
        let i = self.size().checked_sub(1)?;
        self.get_mut(i)
    }

    /// Apply `f` to every element in place, in storage order.
    fn for_each_mut<F>(&mut self, mut f: F) -> &mut Self
    where
        F: FnMut(&mut Self::Elem),
    {
        for i in 0..self.size() {
            // SAFETY: `i < self.size()`.
            f(unsafe { self.get_unchecked_mut(i) });
        }
        self
    }

    fn fill(&mut self, value: Self::Elem) -> &mut Self
    where
        Self::Elem: Clone,
    {
        self.for_each_mut(|x| *x = value.clone())
    }

    /// Set every element satisfying `pred` to `value`.
    fn fill_if<P>(&mut self, value: Self::Elem, mut pred: P) -> &mut Self
    where
        Self::Elem: Clone,
        P: FnMut(&Self::Elem) -> bool,
    {
        self.for_each_mut(|x| {
            if pred(x) {
                *x = value.clone();
            }
        })
    }

    /// Replace every element `x` with `f(x)`.
    fn mutate<F>(&mut self, mut f: F) -> &mut Self
    where
        F: FnMut(&Self::Elem) -> Self::Elem,
    {
        self.for_each_mut(|x| *x = f(x))
    }

    /// Replace every element `x` satisfying `pred` with `f(x)`.
    fn mutate_if<F, P>(&mut self, mut f: F, mut pred: P) -> &mut Self
    where
        F: FnMut(&Self::Elem) -> Self::Elem,
        P: FnMut(&Self::Elem) -> bool,
    {
        self.for_each_mut(|x| {
            if pred(x) {
                *x = f(x);
            }
        })
    }

    /// Exchange the elements at 1-based positions `a` and `b`.
    ///
    /// Does nothing if either position is out of bounds.
    fn swap(&mut self, a: usize, b: usize) -> &mut Self
    where
        Self::Elem: Clone,
    {
        if self.is_valid_bound(a) && self.is_valid_bound(b) && a != b {
            // SAFETY: Both positions were checked above.
            unsafe {
                let x = self.get_unchecked(a - 1).clone();
                let y = self.get_unchecked(b - 1).clone();
                *self.get_unchecked_mut(a - 1) = y;
                *self.get_unchecked_mut(b - 1) = x;
            }
        }
        self
    }

    /// Copy the elements of `other` into `self`, in storage order.
    ///
    /// The element counts must match; shapes are not compared. A differently-shaped
    /// source with the right count is accepted, so callers wanting shape agreement must
    /// check it themselves.
    ///
    /// Returns `MatrixError::ShapeMismatch` if the sizes differ. Nothing is written in
    /// that case.
    fn assign<G>(&mut self, other: &G) -> MatrixResult<&mut Self>
    where
        G: Grid1D<Elem = Self::Elem> + ?Sized,
        Self::Elem: Clone,
    {
        self.zip_assign(other, |x, y| *x = y.clone())
    }

    /// Copy `values` into `self`. See [`Grid1DMut::assign`].
    fn assign_slice(&mut self, values: &[Self::Elem]) -> MatrixResult<&mut Self>
    where
        Self::Elem: Clone,
    {
        if self.size() != values.len() {
            return Err(MatrixError::shape_mismatch(self.size(), values.len()));
        }
        let mut source = values.iter();
        Ok(self.for_each_mut(|x| {
            if let Some(v) = source.next() {
                *x = v.clone();
            }
        }))
    }

    /// Combine every element of `self` with the matching element of `other` through `f`.
    ///
    /// This is the grid form of the compound assignment operators, e.g.
    /// `view.zip_assign(&other, |x, y| *x += *y)`.
    ///
    /// Returns `MatrixError::ShapeMismatch` if the sizes differ. Nothing is written in
    /// that case.
    fn zip_assign<G, F>(&mut self, other: &G, mut f: F) -> MatrixResult<&mut Self>
    where
        G: Grid1D + ?Sized,
        F: FnMut(&mut Self::Elem, &G::Elem),
    {
        if !self.is_same_size(other) {
            return Err(MatrixError::shape_mismatch(self.size(), other.size()));
        }
        let mut source = other.iter();
        Ok(self.for_each_mut(|x| {
            if let Some(y) = source.next() {
                f(x, y);
            }
        }))
    }

    /// Divide every element by the `p`-norm of `self`.
    fn normalize(&mut self, p: u32) -> &mut Self
    where
        Self::Elem: Scalar + Float + FromPrimitive,
    {
        let norm = self.p_norm(p);
        self.mutate(|&x| x / norm)
    }
}

//////////////
// Iterator //
//////////////

/// Iterator over the elements of a [`Grid1D`], returned by [`Grid1D::iter`].
#[derive(Debug)]
pub struct Iter<'a, G>
where
    G: ?Sized,
{
    grid: &'a G,
    front: usize,
    back: usize,
}

impl<G: ?Sized> Clone for Iter<'_, G> {
    fn clone(&self) -> Self {
        Self {
            grid: self.grid,
            front: self.front,
            back: self.back,
        }
    }
}

impl<'a, G> Iterator for Iter<'a, G>
where
    G: Grid1D + ?Sized,
{
    type Item = &'a G::Elem;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            // SAFETY: `front < back <= grid.size()`.
            let item = unsafe { self.grid.get_unchecked(self.front) };
            self.front += 1;
            Some(item)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }
}

impl<G> DoubleEndedIterator for Iter<'_, G>
where
    G: Grid1D + ?Sized,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            self.back -= 1;
            // SAFETY: `front <= back < grid.size()`.
            Some(unsafe { self.grid.get_unchecked(self.back) })
        } else {
            None
        }
    }
}

impl<G> ExactSizeIterator for Iter<'_, G> where G: Grid1D + ?Sized {}

////////////////
// Formatting //
////////////////

/// Write the textual form shared by matrices and views: the shape on the first line,
/// then the elements in storage order inside braces.
///
/// ```text
/// 2 x 3
/// {1, 2, 3, 4, 5, 6}
/// ```
pub(crate) fn fmt_grid<G>(grid: &G, f: &mut fmt::Formatter<'_>) -> fmt::Result
where
    G: Grid1D + ?Sized,
    G::Elem: fmt::Display,
{
    let (nrows, ncols) = grid.shape();
    writeln!(f, "{nrows} x {ncols}")?;
    write!(f, "{{")?;
    for (i, x) in grid.iter().enumerate() {
        if i != 0 {
            write!(f, ", ")?;
        }
        write!(f, "{x}")?;
    }
    write!(f, "}}")
}

///////////
// Tests //
///////////

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use gridmat_utils::lazy_format;
    use rstest::rstest;

    use super::*;
    use crate::functional::{gt, lt};

    fn tmat() -> Matrix<f64> {
        // The 3 x 4 matrix used throughout these tests:
        //
        // 4 5 2 4
        // 3 5 0 1
        // 4 3 8 4
        Matrix::from_rows(&[[4.0, 5.0, 2.0, 4.0], [3.0, 5.0, 0.0, 1.0], [4.0, 3.0, 8.0, 4.0]])
    }

    #[test]
    fn checked_access() {
        let m = Matrix::from_vec(vec![1, 3, 5, 4, 2, 6], 1, 6).unwrap();
        assert_eq!(*m.at(1).unwrap(), 1);
        assert_eq!(*m.at(6).unwrap(), 6);
        assert_eq!(m.at(0).unwrap_err(), MatrixError::out_of_bounds(0, 6));
        assert_eq!(m.at(7).unwrap_err(), MatrixError::out_of_bounds(7, 6));
        assert_eq!(m.get(5), Some(&6));
        assert_eq!(m.get(6), None);
        assert_eq!(m.first(), Some(&1));
        assert_eq!(m.last(), Some(&6));

        let null = Matrix::<i32>::null();
        assert_eq!(null.first(), None);
        assert_eq!(null.last(), None);
        assert!(!null.is_valid_bound(1));
    }

    #[test]
    fn iterator_is_exact_and_double_ended() {
        let m = tmat();
        let it = m.iter();
        assert_eq!(it.len(), 12);
        let reversed: Vec<f64> = m.iter().rev().copied().collect();
        assert_eq!(reversed[0], 4.0);
        assert_eq!(reversed[11], 4.0);
        assert_eq!(reversed[2], 3.0);

        let mut it = m.iter();
        assert_eq!(it.next(), Some(&4.0));
        assert_eq!(it.next_back(), Some(&4.0));
        assert_eq!(it.len(), 10);
    }

    #[test]
    fn head_tail_pad_resize() {
        let m = Matrix::from_vec(vec![1, 3, 5, 4, 2, 6], 1, 6).unwrap();
        assert!(m.tail().eq_slice(&[3, 5, 4, 2, 6]));
        assert!(m.head().eq_slice(&[1, 3, 5, 4, 2]));
        assert!(m.pad(3, 0).eq_slice(&[1, 3, 5]));
        assert!(m.pad(10, 0).eq_slice(&[1, 3, 5, 4, 2, 6, 0, 0, 0, 0]));
        assert!(m.take(20).eq_slice(&[1, 3, 5, 4, 2, 6]));

        let single = Matrix::from_vec(vec![9], 1, 1).unwrap();
        assert!(single.head().is_null());
        assert!(single.tail().is_null());

        let r = m.resize(2, 4);
        assert_eq!((r.nrows(), r.ncols()), (2, 4));
        assert!(r.eq_slice(&[1, 3, 5, 4, 2, 6, 0, 0]));
        let r = m.resize(2, 2);
        assert!(r.eq_slice(&[1, 3, 5, 4]));
        assert!(m.resize(0, 3).is_null());
        assert!(m.resize(usize::MAX, 2).is_null());
    }

    #[test]
    fn statistics() {
        let x = Matrix::<f64>::seq(5);
        assert_eq!(x.sum(), 15.0);
        assert_eq!(x.prod(), 120.0);
        assert_eq!(x.mean(), Some(3.0));
        assert_eq!(x.var(Variance::Population), Some(2.0));
        assert_eq!(x.var(Variance::Sample), Some(2.5));
        assert_eq!(x.sd(Variance::Sample), Some(2.5f64.sqrt()));
        assert_eq!(x.sd(Variance::Population), Some(2.0f64.sqrt()));
        assert_eq!(x.min(), Some(1.0));
        assert_eq!(x.max(), Some(5.0));
        assert_abs_diff_eq!(x.norm(), 55f64.sqrt(), epsilon = 1e-12);
        assert_abs_diff_eq!(x.p_norm(1), 15.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x.p_norm(3), 225f64.cbrt(), epsilon = 1e-9);

        let y = Matrix::from_vec(vec![-1.0, 2.0, 3.0, 4.0, -5.0], 1, 5).unwrap();
        assert_eq!(y.sum_abs(), 15.0);
        assert_eq!(y.sum(), 3.0);
        assert_eq!(y.min(), Some(-5.0));
    }

    #[test]
    fn statistics_undefined_cases() {
        let empty = Matrix::<f64>::null();
        assert_eq!(empty.mean(), None);
        assert_eq!(empty.min(), None);
        assert_eq!(empty.max(), None);
        assert_eq!(empty.var(Variance::Population), None);
        assert_eq!(empty.sum(), 0.0);
        assert_eq!(empty.prod(), 1.0);

        let single = Matrix::from_vec(vec![4.0], 1, 1).unwrap();
        assert_eq!(single.var(Variance::Population), Some(0.0));
        assert_eq!(single.var(Variance::Sample), None);
        assert_eq!(single.sd(Variance::Sample), None);
    }

    #[test]
    fn integer_mean_truncates() {
        let x = Matrix::from_vec(vec![1, 2, 4], 1, 3).unwrap();
        assert_eq!(x.mean(), Some(2));
    }

    #[rstest]
    #[case(200, 0, 0)]
    #[case(128, -1, -1)]
    #[case(127, -1, -1)]
    #[case(300, 0, 0)]
    fn narrow_integer_means(#[case] n: usize, #[case] fill: i8, #[case] expected: i8) {
        // The element count may exceed `i8::MAX`.
        let x = Matrix::<i8>::filled(1, n, fill);
        assert_eq!(x.mean(), Some(expected), "{}", lazy_format!("{n} copies of {fill}"));
    }

    #[test]
    fn narrow_unsigned_mean_of_a_long_grid() {
        let mut x = Matrix::<u8>::zeros(1, 256);
        x[0] = 255;
        assert_eq!(x.mean(), Some(0));

        let mut y = Matrix::<u8>::zeros(1, 300);
        y[7] = 200;
        y[8] = 50;
        assert_eq!(y.mean(), Some(0));
        assert_eq!(y.take(5).mean(), Some(0));
        assert_eq!(y.drop(7).take(2).mean(), Some(125));
    }

    #[test]
    fn norms_of_very_high_order() {
        let x = Matrix::from_rows(&[[1.0f64, -0.5, 0.25]]);
        let beyond_i32 = i32::MAX as u32 + 1;
        assert_abs_diff_eq!(x.p_norm(beyond_i32), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x.p_norm(u32::MAX), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x.p_norm(64), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn boolean_aggregates() {
        let pos = Matrix::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0], 1, 5).unwrap();
        let pos_neg = Matrix::from_vec(vec![1.0, -3.0, 3.0, 5.0, -3.0], 1, 5).unwrap();
        let neg = Matrix::from_vec(vec![-3.0, -1.0, -5.0, -3.0, -4.0], 1, 5).unwrap();

        assert!(pos.all_if(gt(0.0)));
        assert!(pos.none_if(lt(0.0)));
        assert!(pos_neg.any_if(lt(0.0)));
        assert!(pos_neg.any_if(gt(0.0)));
        assert!(neg.all_if(lt(0.0)));
        assert!(neg.none_if(gt(0.0)));

        assert_eq!(pos.count_if(lt(0.0)), 0);
        assert_eq!(pos.count_if(gt(0.0)), 5);
        assert_eq!(pos_neg.count_if(lt(0.0)), 2);
        assert_eq!(pos_neg.count_if(gt(0.0)), 3);

        let flags = Matrix::from_vec(vec![0, 2, 0, -1], 2, 2).unwrap();
        assert_eq!(flags.count(), 2);
        assert!(flags.any());
        assert!(!flags.all());
        assert!(!flags.none());
        assert!(Matrix::<i32>::zeros(2, 2).none());
        assert!(Matrix::<i32>::null().all());
    }

    #[test]
    fn map_family() {
        let m = tmat();
        let doubled = m.map(|x| x * 2.0);
        assert_eq!((doubled.nrows(), doubled.ncols()), (3, 4));
        assert_eq!(doubled[(2, 2)], 16.0);

        let as_int: Matrix<i64> = m.map(|&x| x as i64);
        assert_eq!(as_int.sum(), 43);

        let ones = Matrix::<f64>::ones(1, 12);
        let plus = m.map2(&ones, |a, b| a + b).unwrap();
        assert_eq!(plus.shape(), (3, 4));
        assert_eq!(plus.sum(), m.sum() + 12.0);
        assert_eq!(
            m.map2(&Matrix::<f64>::ones(1, 3), |a, b| a + b).unwrap_err(),
            MatrixError::shape_mismatch(12, 3)
        );

        let halved = m.map_if(|x| x / 2.0, gt(4.0));
        assert!(halved.eq_slice(&[4.0, 2.5, 2.0, 4.0, 3.0, 2.5, 0.0, 1.0, 4.0, 3.0, 4.0, 4.0]));
    }

    #[test]
    fn filter_and_conditionals() {
        let m = tmat();
        assert_eq!(m.filter(|_| true), m);
        assert!(m.filter(|_| false).is_null());
        assert_eq!(m.cond(crate::functional::eq(0.0)).size(), 1);
        assert_eq!(m.equals(4.0).size(), 4);
        assert_eq!(m.lt(5.0).size(), 9);
        assert_eq!(m.gt(100.0).size(), 0);
        assert_eq!(m.lt(-300.0).size(), 0);
        assert_eq!(m.leq(5.0).size(), 11);
        assert_eq!(m.geq(8.0).size(), 1);
        assert!(m.lt(3.0).eq_slice(&[2.0, 0.0, 1.0]));
        assert!(m.lt(3.0).is_row());

        let signed = Matrix::from_vec(vec![-2, 0, 3, -1, 4], 1, 5).unwrap();
        assert!(signed.pos().eq_slice(&[3, 4]));
        assert!(signed.neg().eq_slice(&[-2, -1]));
        assert!(signed.even().eq_slice(&[-2, 0, 4]));
        assert!(signed.odd().eq_slice(&[3, -1]));
        assert!(signed.abs().eq_slice(&[2, 0, 3, 1, 4]));
    }

    #[rstest]
    #[case(&[1.0, 4.0, 9.0], &[3.0, 5.0], &[2.5, 6.5])]
    #[case(&[2.0, 2.0], &[0.0], &[2.0])]
    #[case(&[7.0], &[], &[])]
    fn diff_and_midpoints(#[case] x: &[f64], #[case] diff: &[f64], #[case] mid: &[f64]) {
        let m = Matrix::from_vec(x.to_vec(), 1, x.len()).unwrap();
        assert!(m.diff().eq_slice(diff));
        assert!(m.midpoints().eq_slice(mid));
        assert_eq!(m.diff().is_null(), diff.is_empty());
    }

    #[test]
    fn powers_and_normalization() {
        let m = Matrix::from_vec(vec![3.0, 4.0], 1, 2).unwrap();
        assert!(m.sqrd().eq_slice(&[9.0, 16.0]));
        assert!(m.cubd().eq_slice(&[27.0, 64.0]));
        assert!(m.powi(2).eq_slice(&[9.0, 16.0]));
        assert!(m.sqrd().sqrt().eq_slice(&[3.0, 4.0]));
        for (got, want) in m.cubd().cbrt().iter().zip([3.0, 4.0]) {
            assert_abs_diff_eq!(*got, want, epsilon = 1e-12);
        }
        for (got, want) in m.pow(1.5).iter().zip([27f64.sqrt(), 8.0]) {
            assert_abs_diff_eq!(*got, want, epsilon = 1e-12);
        }
        assert_eq!(m.pow(1.5).shape(), (1, 2));

        let unit = m.normalized(2);
        assert_abs_diff_eq!(unit.norm(), 1.0, epsilon = 1e-12);
        assert!(unit.eq_slice(&[0.6, 0.8]));

        let mut n = m.clone();
        n.normalize(1);
        assert_abs_diff_eq!(n.sum(), 1.0, epsilon = 1e-12);
        assert_eq!(m[0], 3.0, "normalized must not touch the source");
    }

    #[test]
    fn repetition() {
        let v = Matrix::from_vec(vec![1, 2, 3], 1, 3).unwrap();
        let c = v.repcol(2);
        assert_eq!(c.shape(), (3, 2));
        assert!(c.eq_slice(&[1, 1, 2, 2, 3, 3]));
        let r = v.reprow(2);
        assert_eq!(r.shape(), (2, 3));
        assert!(r.eq_slice(&[1, 2, 3, 1, 2, 3]));
    }

    #[test]
    fn products() {
        let a = Matrix::from_vec(vec![1, 2, 3], 1, 3).unwrap();
        let b = Matrix::from_vec(vec![4, 5, 6], 3, 1).unwrap();
        assert_eq!(a.dot(&b), Ok(32));
        assert_eq!(a.inner_product(&b), Ok(32));
        assert_eq!(
            a.dot(&Matrix::from_vec(vec![1, 2], 1, 2).unwrap()),
            Err(MatrixError::shape_mismatch(3, 2))
        );

        let outer = a.outer_product(&Matrix::from_vec(vec![1, 10], 1, 2).unwrap());
        assert_eq!(outer.shape(), (3, 2));
        assert!(outer.eq_slice(&[1, 10, 2, 20, 3, 30]));

        let h = a.hadamard_product(&b).unwrap();
        assert_eq!(h.shape(), (1, 3));
        assert!(h.eq_slice(&[4, 10, 18]));
        assert!(a.hadamard_product(&Matrix::<i32>::null()).is_err());
    }

    #[test]
    fn fill_and_mutate() {
        let mut m = Matrix::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0], 1, 5).unwrap();
        let mut m2 = m.clone();
        m2.fill(3.0);
        assert_eq!(m2, Matrix::<f64>::filled(1, 5, 3.0));

        m.fill_if(99.0, gt(3.0));
        assert!(m.eq_slice(&[1.0, 2.0, 3.0, 99.0, 99.0]));

        m.mutate(|x| x * 2.0);
        assert!(m.eq_slice(&[2.0, 4.0, 6.0, 198.0, 198.0]));

        m.mutate_if(crate::functional::times(0.5), lt(10.0));
        assert!(m.eq_slice(&[1.0, 2.0, 3.0, 198.0, 198.0]));

        *m.first_mut().unwrap() = 3.0;
        *m.last_mut().unwrap() = 19.0;
        assert_eq!(*m.at(1).unwrap(), 3.0);
        assert_eq!(*m.at(m.size()).unwrap(), 19.0);
        *m.at_mut(2).unwrap() = -1.0;
        assert!(m.eq_slice(&[3.0, -1.0, 3.0, 198.0, 19.0]));
        assert!(m.at_mut(6).is_err());
    }

    #[test]
    fn swap_and_assign() {
        let mut m = Matrix::from_vec(vec![1, 2, 3, 4], 2, 2).unwrap();
        m.swap(1, 4);
        assert!(m.eq_slice(&[4, 2, 3, 1]));
        m.swap(1, 5);
        assert!(m.eq_slice(&[4, 2, 3, 1]), "out-of-bounds swap is a no-op");

        m.assign(&Matrix::from_vec(vec![9, 8, 7, 6], 1, 4).unwrap())
            .unwrap();
        assert!(m.eq_slice(&[9, 8, 7, 6]));
        assert_eq!(m.shape(), (2, 2), "assignment never reshapes the target");

        let err = m.assign(&Matrix::from_vec(vec![1, 2, 3], 1, 3).unwrap());
        assert_eq!(err.unwrap_err(), MatrixError::shape_mismatch(4, 3));
        assert!(m.eq_slice(&[9, 8, 7, 6]));

        m.assign_slice(&[1, 1, 1, 1]).unwrap();
        m.zip_assign(&Matrix::from_vec(vec![1, 2, 3, 4], 4, 1).unwrap(), |x, y| *x += *y)
            .unwrap();
        assert!(m.eq_slice(&[2, 3, 4, 5]));
        assert!(m.assign_slice(&[1]).is_err());
    }

    #[test]
    fn for_each_indexed_is_one_based() {
        let m = Matrix::from_vec(vec![10, 20, 30], 1, 3).unwrap();
        let mut seen = Vec::new();
        m.for_each_indexed(|i, &x| seen.push((i, x)));
        assert_eq!(seen, vec![(1, 10), (2, 20), (3, 30)]);
    }

    #[test]
    fn formatting() {
        let m = Matrix::from_vec(vec![1, 2, 3, 4, 5, 6], 2, 3).unwrap();
        assert_eq!(m.to_string(), "2 x 3\n{1, 2, 3, 4, 5, 6}");
        assert_eq!(Matrix::<i32>::null().to_string(), "0 x 0\n{}");
    }
}

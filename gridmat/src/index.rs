/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

//! Positional indices and the gather/scatter operations built on them.
//!
//! An [`Indices`] list holds 0-based linear positions into some target grid, in the
//! target's storage order. Lists produced by scans ([`Indices::matching`],
//! [`Indices::from_mask`]) are strictly ascending. Lists built by hand may be in any order
//! and may contain positions that do not exist in the target; [`Indices::scrubbed`] removes
//! those.

use std::fmt;

use num_traits::ToPrimitive;

use crate::{
    error::{MatrixError, MatrixResult},
    grid::{self, Grid1D, Grid1DMut},
    matrix::{DenseData, Matrix, MatrixBase},
    scalar::Truthy,
};

/// An ordered list of 0-based linear positions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Indices(Box<[usize]>);

impl Indices {
    pub fn new<P>(positions: P) -> Self
    where
        P: Into<Box<[usize]>>,
    {
        Self(positions.into())
    }

    /// Return the positions of the elements of `grid` satisfying `pred`, strictly
    /// ascending.
    pub fn matching<G, P>(grid: &G, mut pred: P) -> Self
    where
        G: Grid1D + ?Sized,
        P: FnMut(&G::Elem) -> bool,
    {
        grid.iter()
            .enumerate()
            .filter_map(|(i, x)| pred(x).then_some(i))
            .collect()
    }

    /// Return the positions of the truthy elements of `mask`, strictly ascending.
    ///
    /// The length of the result is `mask.count()`.
    pub fn from_mask<G>(mask: &G) -> Self
    where
        G: Grid1D + ?Sized,
        G::Elem: Truthy,
    {
        Self::matching(mask, Truthy::is_truthy)
    }

    /// Interpret the elements of `values` as positions.
    ///
    /// Each value is rounded toward negative infinity. Negative and non-finite values are
    /// dropped; the order of the remaining values is kept.
    pub fn from_values<G>(values: &G) -> Self
    where
        G: Grid1D + ?Sized,
        G::Elem: ToPrimitive,
    {
        values
            .iter()
            .filter_map(|x| {
                let v = x.to_f64()?.floor();
                (v.is_finite() && v >= 0.0).then_some(v as usize)
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn into_inner(self) -> Box<[usize]> {
        self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, usize> {
        self.0.iter()
    }

    /// Return whether every position is valid for a target with `len` elements.
    pub fn is_scrubbed(&self, len: usize) -> bool {
        self.iter().all(|&i| i < len)
    }

    /// Return a copy with every position `>= len` removed.
    pub fn scrubbed(&self, len: usize) -> Self {
        self.iter().copied().filter(|&i| i < len).collect()
    }

    /// Return the positions converted to the 1-based convention of [`Grid1D::at`].
    pub fn to_one_based(&self) -> Vec<usize> {
        self.iter().map(|&i| i + 1).collect()
    }
}

impl FromIterator<usize> for Indices {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<usize>> for Indices {
    fn from(positions: Vec<usize>) -> Self {
        Self::new(positions)
    }
}

/// Index lists are column vectors.
impl Grid1D for Indices {
    type Elem = usize;

    fn size(&self) -> usize {
        self.len()
    }

    fn shape(&self) -> (usize, usize) {
        (self.len(), 1)
    }

    unsafe fn get_unchecked(&self, i: usize) -> &usize {
        debug_assert!(i < self.len());
        // SAFETY: Forwarded to the caller.
        unsafe { self.0.get_unchecked(i) }
    }
}

impl fmt::Display for Indices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        grid::fmt_grid(self, f)
    }
}

////////////////////////
// Gather and Scatter //
////////////////////////

/// Return the elements of `subject` at `indices`, in index order, as a column vector.
///
/// Positions outside `subject` are scrubbed first, so they are silently skipped. Returns
/// the null matrix if nothing remains.
pub fn gather<G>(subject: &G, indices: &Indices) -> Matrix<G::Elem>
where
    G: Grid1D + ?Sized,
    G::Elem: Clone,
{
    let scrubbed = indices.scrubbed(subject.size());
    // SAFETY: `scrubbed` only holds positions less than `subject.size()`.
    unsafe { gather_unchecked(subject, &scrubbed) }
}

/// Return the elements of `subject` at `indices` without scrubbing.
///
/// # Safety
///
/// Every position in `indices` must be less than `subject.size()`. Out-of-range
/// positions are undefined behavior; they are only caught by a `debug_assert!`.
pub unsafe fn gather_unchecked<G>(subject: &G, indices: &Indices) -> Matrix<G::Elem>
where
    G: Grid1D + ?Sized,
    G::Elem: Clone,
{
    Matrix::collect_col(indices.iter().map(|&i| {
        debug_assert!(i < subject.size(), "gather position {i} is out of bounds");
        // SAFETY: Forwarded to the caller.
        unsafe { subject.get_unchecked(i) }.clone()
    }))
}

/// Write `values[k]` to `subject[indices[k]]` for every `k`, in index order.
///
/// Returns `MatrixError::ShapeMismatch` if `values.size() != indices.len()` and
/// `MatrixError::OutOfBounds` (with a 0-based position) if any position does not exist in
/// `subject`. Both conditions are checked before anything is written.
pub fn scatter<G, V>(subject: &mut G, indices: &Indices, values: &V) -> MatrixResult<()>
where
    G: Grid1DMut + ?Sized,
    G::Elem: Clone,
    V: Grid1D<Elem = G::Elem> + ?Sized,
{
    if indices.len() != values.size() {
        return Err(MatrixError::shape_mismatch(indices.len(), values.size()));
    }
    let extent = subject.size();
    if let Some(&bad) = indices.iter().find(|&&i| i >= extent) {
        return Err(MatrixError::out_of_bounds(bad, extent));
    }
    for (&i, v) in indices.iter().zip(values.iter()) {
        // SAFETY: Every position was checked against `extent` above.
        unsafe { *subject.get_unchecked_mut(i) = v.clone() };
    }
    Ok(())
}

impl<T> MatrixBase<T>
where
    T: DenseData,
    T::Elem: Clone,
{
    /// Return the elements where `mask` is truthy, in storage order, as a column vector.
    ///
    /// Returns `MatrixError::ShapeMismatch` unless `mask` has the same shape as `self`.
    pub fn logical_index<M>(&self, mask: &MatrixBase<M>) -> MatrixResult<Matrix<T::Elem>>
    where
        M: DenseData,
        M::Elem: Truthy,
    {
        if mask.shape() != self.shape() {
            return Err(MatrixError::shape_mismatch(self.shape(), mask.shape()));
        }
        let indices = Indices::from_mask(mask);
        // SAFETY: A same-shaped mask only produces positions inside `self`.
        Ok(unsafe { gather_unchecked(self, &indices) })
    }

    /// Return a copy of `self` with `values` scattered to `indices`. See [`scatter`].
    pub fn with_scattered<V>(&self, indices: &Indices, values: &V) -> MatrixResult<Matrix<T::Elem>>
    where
        V: Grid1D<Elem = T::Elem> + ?Sized,
    {
        let mut out = self.to_matrix();
        scatter(&mut out, indices, values)?;
        Ok(out)
    }
}

///////////
// Tests //
///////////

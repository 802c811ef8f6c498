/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use std::{
    fmt,
    ops::{Index, IndexMut},
};

use crate::{
    error::{MatrixError, MatrixResult},
    grid::{self, Grid1D, Grid1DMut},
    index::Indices,
    matrix::{DenseData, MatrixBase, MutDenseData},
    scalar::Truthy,
};

/// A view of the elements of a parent matrix selected by an index list.
///
/// Element `k` of the view is element `indices[k]` (0-based, linear) of the parent. Views
/// built from a logical mask or a predicate select positions in ascending storage order;
/// views built from an explicit [`Indices`] keep the given order.
///
/// The natural shape of a masked view is a column vector, `k x 1`.
///
/// ```
/// use gridmat::prelude::*;
///
/// let mut m = Matrix::from_rows(&[[1.0, -2.0], [-3.0, 4.0]]);
/// m.view_where_mut(functional::neg()).fill(0.0);
/// assert!(m.eq_slice(&[1.0, 0.0, 0.0, 4.0]));
/// ```
#[derive(Debug, Clone)]
pub struct MaskedBase<T>
where
    T: DenseData,
{
    data: T,
    // Every position is less than `data.as_slice().len()`.
    indices: Indices,
}

pub type MaskedView<'a, T> = MaskedBase<&'a [T]>;
pub type MutMaskedView<'a, T> = MaskedBase<&'a mut [T]>;

impl<T> MaskedBase<T>
where
    T: DenseData,
{
    /// Construct a masked view selecting `indices` from `data`.
    ///
    /// Returns `MatrixError::OutOfBounds` (with a 0-based position) if any position does
    /// not exist in `data`.
    pub fn try_from(data: T, indices: Indices) -> MatrixResult<Self> {
        let extent = data.as_slice().len();
        if let Some(&bad) = indices.iter().find(|&&i| i >= extent) {
            return Err(MatrixError::out_of_bounds(bad, extent));
        }
        Ok(Self { data, indices })
    }

    /// Return the parent positions selected by this view.
    pub fn indices(&self) -> &Indices {
        &self.indices
    }

    /// Consume the view, returning the selected positions.
    pub fn into_indices(self) -> Indices {
        self.indices
    }
}

impl<T> MatrixBase<T>
where
    T: DenseData,
{
    fn check_mask<M>(&self, mask: &MatrixBase<M>) -> MatrixResult<Indices>
    where
        M: DenseData,
        M::Elem: Truthy,
    {
        if mask.shape() != self.shape() {
            return Err(MatrixError::shape_mismatch(self.shape(), mask.shape()));
        }
        Ok(Indices::from_mask(mask))
    }

    /// Return a view of the elements where `mask` is truthy.
    ///
    /// Returns `MatrixError::ShapeMismatch` unless `mask` has the same shape as `self`.
    pub fn masked_view<M>(&self, mask: &MatrixBase<M>) -> MatrixResult<MaskedView<'_, T::Elem>>
    where
        M: DenseData,
        M::Elem: Truthy,
    {
        let indices = self.check_mask(mask)?;
        Ok(MaskedView {
            data: self.as_slice(),
            indices,
        })
    }

    /// Return a mutable view of the elements where `mask` is truthy.
    /// See [`MatrixBase::masked_view`].
    pub fn masked_view_mut<M>(
        &mut self,
        mask: &MatrixBase<M>,
    ) -> MatrixResult<MutMaskedView<'_, T::Elem>>
    where
        T: MutDenseData,
        M: DenseData,
        M::Elem: Truthy,
    {
        let indices = self.check_mask(mask)?;
        Ok(MutMaskedView {
            data: self.as_mut_slice(),
            indices,
        })
    }

    /// Return a view of the elements at 0-based linear `indices`, in the given order.
    pub fn indexed_view(&self, indices: Indices) -> MatrixResult<MaskedView<'_, T::Elem>> {
        MaskedView::try_from(self.as_slice(), indices)
    }

    pub fn indexed_view_mut(
        &mut self,
        indices: Indices,
    ) -> MatrixResult<MutMaskedView<'_, T::Elem>>
    where
        T: MutDenseData,
    {
        MutMaskedView::try_from(self.as_mut_slice(), indices)
    }

    /// Return a view of the elements satisfying `pred`.
    pub fn view_where<P>(&self, pred: P) -> MaskedView<'_, T::Elem>
    where
        P: FnMut(&T::Elem) -> bool,
    {
        MaskedView {
            indices: self.where_indices(pred),
            data: self.as_slice(),
        }
    }

    /// Return a mutable view of the elements satisfying `pred`.
    pub fn view_where_mut<P>(&mut self, pred: P) -> MutMaskedView<'_, T::Elem>
    where
        T: MutDenseData,
        P: FnMut(&T::Elem) -> bool,
    {
        MutMaskedView {
            indices: self.where_indices(pred),
            data: self.as_mut_slice(),
        }
    }
}

impl<T> Grid1D for MaskedBase<T>
where
    T: DenseData,
{
    type Elem = T::Elem;

    fn size(&self) -> usize {
        self.indices.len()
    }

    fn shape(&self) -> (usize, usize) {
        (self.size(), 1)
    }

    unsafe fn get_unchecked(&self, i: usize) -> &T::Elem {
        debug_assert!(i < self.size());
        // SAFETY: `i` is in-bounds for `indices` by the caller's contract, and every
        // stored position is in-bounds for `data` by construction.
        unsafe {
            let position = *self.indices.as_slice().get_unchecked(i);
            self.data.as_slice().get_unchecked(position)
        }
    }
}

impl<T> Grid1DMut for MaskedBase<T>
where
    T: MutDenseData,
{
    unsafe fn get_unchecked_mut(&mut self, i: usize) -> &mut T::Elem {
        debug_assert!(i < self.size());
        // SAFETY: See `get_unchecked`.
        unsafe {
            let position = *self.indices.as_slice().get_unchecked(i);
            self.data.as_mut_slice().get_unchecked_mut(position)
        }
    }
}

impl<T, G> PartialEq<G> for MaskedBase<T>
where
    T: DenseData,
    T::Elem: PartialEq,
    G: Grid1D<Elem = T::Elem>,
{
    fn eq(&self, other: &G) -> bool {
        self.grid_eq(other)
    }
}

impl<T> fmt::Display for MaskedBase<T>
where
    T: DenseData,
    T::Elem: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        grid::fmt_grid(self, f)
    }
}

/// Return a reference to selected element `i` (0-based).
///
/// # Panics
///
/// Panics if `i >= self.size()`.
impl<T> Index<usize> for MaskedBase<T>
where
    T: DenseData,
{
    type Output = T::Elem;

    fn index(&self, i: usize) -> &Self::Output {
        &self.data.as_slice()[self.indices.as_slice()[i]]
    }
}

impl<T> IndexMut<usize> for MaskedBase<T>
where
    T: MutDenseData,
{
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        let position = self.indices.as_slice()[i];
        &mut self.data.as_mut_slice()[position]
    }
}

///////////
// Tests //
///////////

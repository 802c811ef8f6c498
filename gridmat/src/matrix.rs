/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use std::{
    fmt,
    ops::{Index, IndexMut},
};

use num_traits::{Float, FromPrimitive, One, Zero};
#[cfg(feature = "rayon")]
use rayon::prelude::{IndexedParallelIterator, ParallelSlice};
use tracing::warn;

use crate::{
    error::{MatrixError, MatrixResult},
    grid::{self, Grid1D, Grid1DMut},
    scalar::Scalar,
};

/// Matrices and their borrowed views share one implementation that is generic over the
/// backing storage: an owned boxed slice, a shared slice or a mutable slice.
///
/// This trait provides the dense slice that everything else is built on.
///
/// # Safety
///
/// This trait is unsafe because it requires `as_slice` to be idempotent (and unsafe code
/// relies on this).
///
/// In other words: `as_slice` must **always** return the same slice with the same length.
pub unsafe trait DenseData {
    type Elem;

    /// Return the underlying data as a slice.
    fn as_slice(&self) -> &[Self::Elem];
}

/// A mutable companion to `DenseData`.
///
/// Mutating methods on matrices and views are only available when the storage implements
/// this trait.
///
/// # Safety
///
/// This trait is unsafe because it requires `as_slice` to be idempotent (and unsafe code
/// relies on this).
///
/// Additionally, the returned slice must span the exact same memory as `as_slice`.
pub unsafe trait MutDenseData: DenseData {
    fn as_mut_slice(&mut self) -> &mut [Self::Elem];
}

// SAFETY: This fulfills the idempotency requirement.
unsafe impl<T> DenseData for &[T] {
    type Elem = T;
    fn as_slice(&self) -> &[Self::Elem] {
        self
    }
}

// SAFETY: This fulfills the idempotency requirement.
unsafe impl<T> DenseData for &mut [T] {
    type Elem = T;
    fn as_slice(&self) -> &[Self::Elem] {
        self
    }
}

// SAFETY: This fulfills the idempotency requirement and returns a slice spanning the same
// range as `as_slice`.
unsafe impl<T> MutDenseData for &mut [T] {
    fn as_mut_slice(&mut self) -> &mut [Self::Elem] {
        self
    }
}

// SAFETY: This fulfills the idempotency requirement.
unsafe impl<T> DenseData for Box<[T]> {
    type Elem = T;
    fn as_slice(&self) -> &[Self::Elem] {
        self
    }
}

// SAFETY: This fulfills the idempotency requirement and returns a slice spanning the same
// memory as `as_slice`.
unsafe impl<T> MutDenseData for Box<[T]> {
    fn as_mut_slice(&mut self) -> &mut [Self::Elem] {
        self
    }
}

////////////
// Matrix //
////////////

/// A dense chunk of memory interpreted as a 2-dimensional matrix in row-major order.
///
/// Element `(i, j)` (0-based) lives at linear position `i * ncols + j`. The public
/// coordinate accessors ([`MatrixBase::at_ij`], the view constructors, `get_row`, ...) are
/// 1-based; the slice accessors, the `Index` impls and the `unsafe` fast paths are
/// 0-based.
///
/// A matrix with no elements is the null matrix. Operations documented as returning "the
/// null matrix" use it as a failure sentinel; their `try_` counterparts return an error
/// instead.
///
/// When the storage is immutable, the type is `Copy`.
#[derive(Debug, Clone, Copy)]
pub struct MatrixBase<T>
where
    T: DenseData,
{
    data: T,
    nrows: usize,
    ncols: usize,
}

/// An owning row-major matrix.
pub type Matrix<T> = MatrixBase<Box<[T]>>;

/// A borrowed, read-only matrix over contiguous memory.
pub type MatrixView<'a, T> = MatrixBase<&'a [T]>;

/// A borrowed, mutable matrix over contiguous memory.
pub type MutMatrixView<'a, T> = MatrixBase<&'a mut [T]>;

/// A generator for initializing the entries in a matrix via `Matrix::new`.
pub trait Generator<T> {
    fn generate(&mut self) -> T;
}

impl<T> Generator<T> for T
where
    T: Clone,
{
    fn generate(&mut self) -> T {
        self.clone()
    }
}

/// A matrix initializer that invokes the provided lambda to initialize each element.
pub struct Init<F>(pub F);

impl<T, F> Generator<T> for Init<F>
where
    F: FnMut() -> T,
{
    fn generate(&mut self) -> T {
        (self.0)()
    }
}

/// Return `nrows * ncols`, or `MatrixError::InvalidConstruction` if the product overflows.
pub(crate) fn checked_len(nrows: usize, ncols: usize) -> MatrixResult<usize> {
    nrows
        .checked_mul(ncols)
        .ok_or_else(|| MatrixError::invalid("matrix shape overflows usize"))
}

/// The buffer length of an infallibly constructed `nrows x ncols` matrix.
fn buffer_len(nrows: usize, ncols: usize) -> usize {
    match checked_len(nrows, ncols) {
        Ok(len) => len,
        Err(err) => panic!("cannot allocate a {nrows} x {ncols} matrix: {err}"),
    }
}

impl<T> MatrixBase<Box<[T]>> {
    /// Construct a new Matrix initialized with the contents of the generator.
    ///
    /// Elements are initialized in memory order.
    ///
    /// # Panics
    ///
    /// Panics if `nrows * ncols` overflows `usize`.
    pub fn new<U>(mut generator: U, nrows: usize, ncols: usize) -> Self
    where
        U: Generator<T>,
    {
        let data: Box<[T]> = (0..buffer_len(nrows, ncols))
            .map(|_| generator.generate())
            .collect();
        Self::from_boxed(data, nrows, ncols)
    }

    /// Return the null matrix: zero rows, zero columns and no storage.
    pub fn null() -> Self {
        Self {
            data: Box::new([]),
            nrows: 0,
            ncols: 0,
        }
    }

    /// Construct an `nrows x ncols` matrix from row-major `data`.
    ///
    /// Returns `MatrixError::ShapeMismatch` if `data.len() != nrows * ncols`.
    pub fn from_vec(data: Vec<T>, nrows: usize, ncols: usize) -> MatrixResult<Self> {
        Self::try_from(data.into_boxed_slice(), nrows, ncols)
    }

    /// Construct a matrix from literal rows.
    ///
    /// ```
    /// use gridmat::prelude::*;
    ///
    /// let m = Matrix::from_rows(&[[1, 2, 3], [4, 5, 6]]);
    /// assert_eq!(m.shape(), (2, 3));
    /// assert_eq!(*m.at_ij(2, 1).unwrap(), 4);
    /// ```
    pub fn from_rows<const N: usize>(rows: &[[T; N]]) -> Self
    where
        T: Clone,
    {
        if rows.is_empty() || N == 0 {
            return Self::null();
        }
        let data = rows.iter().flatten().cloned().collect();
        Self::from_boxed(data, rows.len(), N)
    }

    pub fn zeros(nrows: usize, ncols: usize) -> Self
    where
        T: Clone + Zero,
    {
        Self::new(T::zero(), nrows, ncols)
    }

    pub fn ones(nrows: usize, ncols: usize) -> Self
    where
        T: Clone + One,
    {
        Self::new(T::one(), nrows, ncols)
    }

    /// Construct an `nrows x ncols` matrix with every element set to `value`.
    pub fn filled(nrows: usize, ncols: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(value, nrows, ncols)
    }

    /// Construct the `n x n` identity matrix.
    pub fn identity(n: usize) -> Self
    where
        T: Clone + Zero + One,
    {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = T::one();
        }
        m
    }

    /// Construct the row vector `[1, 2, ..., n]`. Null if `n == 0`.
    pub fn seq(n: usize) -> Self
    where
        T: Scalar,
    {
        if n == 0 {
            return Self::null();
        }
        let mut next = T::zero();
        Self::new(
            Init(|| {
                next = next + T::one();
                next
            }),
            1,
            n,
        )
    }

    /// Construct the `nrows x ncols` matrix whose 1-based entry `(i, j)` is `i + j - 1`.
    ///
    /// ```
    /// use gridmat::prelude::*;
    ///
    /// let m = Matrix::<i32>::ij(10, 10);
    /// assert_eq!(m.first(), Some(&1));
    /// assert_eq!(m.last(), Some(&19));
    /// ```
    pub fn ij(nrows: usize, ncols: usize) -> Self
    where
        T: Scalar,
    {
        let mut data = Vec::with_capacity(buffer_len(nrows, ncols));
        let mut row_start = T::one();
        for _ in 0..nrows {
            let mut value = row_start;
            for _ in 0..ncols {
                data.push(value);
                value = value + T::one();
            }
            row_start = row_start + T::one();
        }
        Self::from_boxed(data.into_boxed_slice(), nrows, ncols)
    }

    /// Construct a row vector of `n` evenly spaced values from `start` to `end` inclusive.
    ///
    /// Returns the null matrix for `n == 0` and `[start]` for `n == 1`.
    pub fn linspace(start: T, end: T, n: usize) -> Self
    where
        T: Scalar + Float + FromPrimitive,
    {
        match n {
            0 => Self::null(),
            1 => Self::row_vector(Box::new([start])),
            _ => {
                let last = n - 1;
                let step = (end - start) / cast(last);
                Self::collect_row((0..n).map(|k| {
                    if k == last {
                        end
                    } else {
                        start + step * cast(k)
                    }
                }))
            }
        }
    }

    /// Construct a row vector of `n` values `base^x` for `x` in `linspace(start, end, n)`.
    pub fn logspace(start: T, end: T, n: usize, base: T) -> Self
    where
        T: Scalar + Float + FromPrimitive,
    {
        Self::linspace(start, end, n).map(|&x| base.powf(x))
    }

    /// Reinterpret the elements as an `nrows x ncols` matrix without copying.
    ///
    /// Returns `MatrixError::InvalidConstruction` if the element count would change.
    pub fn reshape(self, nrows: usize, ncols: usize) -> MatrixResult<Self> {
        if checked_len(nrows, ncols)? != self.data.len() {
            return Err(MatrixError::invalid(
                "reshape must preserve the number of elements",
            ));
        }
        Ok(Self::from_boxed(self.data, nrows, ncols))
    }

    pub(crate) fn from_boxed(data: Box<[T]>, nrows: usize, ncols: usize) -> Self {
        assert_eq!(
            Some(data.len()),
            nrows.checked_mul(ncols),
            "a {nrows} x {ncols} matrix cannot hold {} elements",
            data.len()
        );
        Self { data, nrows, ncols }
    }

    /// Collect `iter` into a row vector, or the null matrix if it yields nothing.
    pub(crate) fn collect_row<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let data: Box<[T]> = iter.into_iter().collect();
        if data.is_empty() {
            Self::null()
        } else {
            Self::row_vector(data)
        }
    }

    /// Collect `iter` into a column vector, or the null matrix if it yields nothing.
    pub(crate) fn collect_col<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let data: Box<[T]> = iter.into_iter().collect();
        let nrows = data.len();
        if nrows == 0 {
            Self::null()
        } else {
            Self::from_boxed(data, nrows, 1)
        }
    }
}

impl<T> Default for MatrixBase<Box<[T]>> {
    fn default() -> Self {
        Self::null()
    }
}

fn cast<T: Float + FromPrimitive>(n: usize) -> T {
    T::from_usize(n).unwrap_or_else(T::nan)
}

/// Log a failed sentinel-style operation and return the null matrix in its place.
fn or_null<T>(result: MatrixResult<Matrix<T>>, operation: &'static str) -> Matrix<T> {
    result.unwrap_or_else(|err| {
        warn!(%err, operation, "returning the null matrix");
        Matrix::null()
    })
}

impl<T> MatrixBase<T>
where
    T: DenseData,
{
    /// Try to construct a `MatrixBase` over the provided base.
    ///
    /// Returns `MatrixError::InvalidConstruction` if `nrows * ncols` overflows and
    /// `MatrixError::ShapeMismatch` if the length of the base is not `nrows * ncols`.
    pub fn try_from(data: T, nrows: usize, ncols: usize) -> MatrixResult<Self> {
        let len = data.as_slice().len();
        if len != checked_len(nrows, ncols)? {
            Err(MatrixError::shape_mismatch((nrows, ncols), len))
        } else {
            Ok(Self { data, nrows, ncols })
        }
    }

    /// Construct a new `MatrixBase` over the raw data.
    ///
    /// The returned `MatrixBase` will only have a single row with contents equal to `data`.
    pub fn row_vector(data: T) -> Self {
        let ncols = data.as_slice().len();
        Self {
            data,
            nrows: 1,
            ncols,
        }
    }

    /// Return the number of columns in the matrix.
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Return the number of rows in the matrix.
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Return the underlying data as a slice.
    pub fn as_slice(&self) -> &[T::Elem] {
        self.data.as_slice()
    }

    /// Return the underlying data as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T::Elem]
    where
        T: MutDenseData,
    {
        self.data.as_mut_slice()
    }

    /// Consume the matrix, returning the inner representation.
    ///
    /// This loses the information about the number of rows and columns.
    pub fn into_inner(self) -> T {
        self.data
    }

    /// Return a view over the matrix.
    pub fn as_view(&self) -> MatrixView<'_, T::Elem> {
        MatrixBase {
            data: self.as_slice(),
            nrows: self.nrows(),
            ncols: self.ncols(),
        }
    }

    /// Return a mutable view over the matrix.
    pub fn as_mut_view(&mut self) -> MutMatrixView<'_, T::Elem>
    where
        T: MutDenseData,
    {
        let nrows = self.nrows();
        let ncols = self.ncols();
        MatrixBase {
            data: self.as_mut_slice(),
            nrows,
            ncols,
        }
    }

    /// Return a pointer to the base of the matrix.
    pub fn as_ptr(&self) -> *const T::Elem {
        self.as_slice().as_ptr()
    }

    //////////////////////
    // Shape Predicates //
    //////////////////////

    /// Return whether this is the null (empty) matrix.
    pub fn is_null(&self) -> bool {
        self.as_slice().is_empty()
    }

    pub fn is_row(&self) -> bool {
        self.nrows == 1
    }

    pub fn is_col(&self) -> bool {
        self.ncols == 1
    }

    pub fn is_vector(&self) -> bool {
        self.is_row() || self.is_col()
    }

    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    ////////////
    // Access //
    ////////////

    /// Return the element at 1-based position `(i, j)`.
    ///
    /// Returns `MatrixError::OutOfBounds` naming the offending coordinate if either
    /// position falls outside its extent.
    pub fn at_ij(&self, i: usize, j: usize) -> MatrixResult<&T::Elem> {
        self.check_coordinate(i, j)?;
        // SAFETY: `check_coordinate` verified both positions.
        Ok(unsafe { self.elem_unchecked(i - 1, j - 1) })
    }

    /// Return the element at 1-based position `(i, j)` mutably. See [`MatrixBase::at_ij`].
    pub fn at_ij_mut(&mut self, i: usize, j: usize) -> MatrixResult<&mut T::Elem>
    where
        T: MutDenseData,
    {
        self.check_coordinate(i, j)?;
        // SAFETY: `check_coordinate` verified both positions.
        Ok(unsafe { self.elem_unchecked_mut(i - 1, j - 1) })
    }

    fn check_coordinate(&self, i: usize, j: usize) -> MatrixResult<()> {
        if i == 0 || i > self.nrows {
            return Err(MatrixError::out_of_bounds(i, self.nrows));
        }
        if j == 0 || j > self.ncols {
            return Err(MatrixError::out_of_bounds(j, self.ncols));
        }
        Ok(())
    }

    /// Returns a reference to an element without boundschecking.
    ///
    /// # Safety
    ///
    /// The following conditions must hold to avoid undefined behavior:
    /// * `row < self.nrows()`.
    /// * `col < self.ncols()`.
    pub unsafe fn elem_unchecked(&self, row: usize, col: usize) -> &T::Elem {
        debug_assert!(row < self.nrows);
        debug_assert!(col < self.ncols);
        // SAFETY: Forwarded to the caller.
        unsafe { self.as_slice().get_unchecked(row * self.ncols + col) }
    }

    /// Returns a mutable reference to an element without boundschecking.
    ///
    /// # Safety
    ///
    /// The following conditions must hold to avoid undefined behavior:
    /// * `row < self.nrows()`.
    /// * `col < self.ncols()`.
    pub unsafe fn elem_unchecked_mut(&mut self, row: usize, col: usize) -> &mut T::Elem
    where
        T: MutDenseData,
    {
        let ncols = self.ncols;
        debug_assert!(row < self.nrows);
        debug_assert!(col < self.ncols);
        // SAFETY: Forwarded to the caller.
        unsafe { self.as_mut_slice().get_unchecked_mut(row * ncols + col) }
    }

    /// Return row `row` (0-based) as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.nrows()`.
    pub fn row(&self, row: usize) -> &[T::Elem] {
        assert!(
            row < self.nrows(),
            "tried to access row {row} of a matrix with {} rows",
            self.nrows()
        );
        let start = row * self.ncols;
        &self.as_slice()[start..start + self.ncols]
    }

    /// Return row `row` (0-based) as a mutable slice.
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.nrows()`.
    pub fn row_mut(&mut self, row: usize) -> &mut [T::Elem]
    where
        T: MutDenseData,
    {
        assert!(
            row < self.nrows(),
            "tried to access row {row} of a matrix with {} rows",
            self.nrows()
        );
        let ncols = self.ncols;
        let start = row * ncols;
        &mut self.as_mut_slice()[start..start + ncols]
    }

    /// Return a iterator over all rows in the matrix.
    ///
    /// Rows are yielded sequentially beginning with row 0.
    pub fn row_iter(&self) -> impl ExactSizeIterator<Item = &[T::Elem]> {
        self.as_slice().chunks_exact(self.ncols.max(1))
    }

    /// Return a parallel iterator over the rows of the matrix.
    #[cfg(feature = "rayon")]
    pub fn par_row_iter(&self) -> impl IndexedParallelIterator<Item = &[T::Elem]>
    where
        T::Elem: Sync,
    {
        self.as_slice().par_chunks_exact(self.ncols.max(1))
    }

    /// Return a copy of row `i` (1-based) as a row vector.
    pub fn get_row(&self, i: usize) -> MatrixResult<Matrix<T::Elem>>
    where
        T::Elem: Clone,
    {
        Ok(self.row_view(i)?.to_matrix())
    }

    /// Return a copy of column `j` (1-based) as a column vector.
    pub fn get_col(&self, j: usize) -> MatrixResult<Matrix<T::Elem>>
    where
        T::Elem: Clone,
    {
        Ok(self.col_view(j)?.to_matrix())
    }

    /// Overwrite row `i` (1-based) with the elements of `values`.
    ///
    /// Returns `MatrixError::ShapeMismatch` if `values.size() != self.ncols()`.
    pub fn set_row<G>(&mut self, i: usize, values: &G) -> MatrixResult<()>
    where
        T: MutDenseData,
        T::Elem: Clone,
        G: Grid1D<Elem = T::Elem> + ?Sized,
    {
        self.row_view_mut(i)?.assign(values)?;
        Ok(())
    }

    /// Overwrite column `j` (1-based) with the elements of `values`.
    ///
    /// Returns `MatrixError::ShapeMismatch` if `values.size() != self.nrows()`.
    pub fn set_col<G>(&mut self, j: usize, values: &G) -> MatrixResult<()>
    where
        T: MutDenseData,
        T::Elem: Clone,
        G: Grid1D<Elem = T::Elem> + ?Sized,
    {
        self.col_view_mut(j)?.assign(values)?;
        Ok(())
    }

    /// Copy `src` into `self` so that its top-left element lands at 1-based `(i, j)`.
    ///
    /// Returns an error if `src` does not fit entirely inside `self`. Nothing is written
    /// in that case.
    pub fn copy_into<U>(&mut self, i: usize, j: usize, src: &MatrixBase<U>) -> MatrixResult<()>
    where
        T: MutDenseData,
        T::Elem: Clone,
        U: DenseData<Elem = T::Elem>,
    {
        if src.is_null() {
            return Ok(());
        }
        // The last row and column of the destination block, 1-based.
        let ie = i
            .checked_add(src.nrows() - 1)
            .ok_or_else(|| MatrixError::out_of_bounds(i, self.nrows()))?;
        let je = j
            .checked_add(src.ncols() - 1)
            .ok_or_else(|| MatrixError::out_of_bounds(j, self.ncols()))?;
        self.submat_view_mut(i, ie, j, je)?.assign(src)?;
        Ok(())
    }

    /////////////////////////////
    // Copies and Combinations //
    /////////////////////////////

    /// Return a copy of the closed 1-based region `[ib, ie] x [jb, je]`.
    pub fn try_submatrix(
        &self,
        ib: usize,
        ie: usize,
        jb: usize,
        je: usize,
    ) -> MatrixResult<Matrix<T::Elem>>
    where
        T::Elem: Clone,
    {
        Ok(self.submat_view(ib, ie, jb, je)?.to_matrix())
    }

    /// Like [`MatrixBase::try_submatrix`], returning the null matrix if the region is
    /// inverted or out of bounds.
    pub fn submatrix(&self, ib: usize, ie: usize, jb: usize, je: usize) -> Matrix<T::Elem>
    where
        T::Elem: Clone,
    {
        or_null(self.try_submatrix(ib, ie, jb, je), "submatrix")
    }

    /// Stack `other` below `self`.
    ///
    /// Returns `MatrixError::ShapeMismatch` unless both operands have the same number of
    /// columns.
    pub fn try_concat_rows<U>(&self, other: &MatrixBase<U>) -> MatrixResult<Matrix<T::Elem>>
    where
        T::Elem: Clone,
        U: DenseData<Elem = T::Elem>,
    {
        if self.ncols != other.ncols {
            return Err(MatrixError::shape_mismatch(
                (other.nrows, self.ncols),
                (other.nrows, other.ncols),
            ));
        }
        let data = self
            .as_slice()
            .iter()
            .chain(other.as_slice())
            .cloned()
            .collect();
        let nrows = self
            .nrows
            .checked_add(other.nrows)
            .ok_or_else(|| MatrixError::invalid("matrix shape overflows usize"))?;
        Ok(Matrix::from_boxed(data, nrows, self.ncols))
    }

    /// Like [`MatrixBase::try_concat_rows`], returning the null matrix on a mismatch.
    pub fn concat_rows<U>(&self, other: &MatrixBase<U>) -> Matrix<T::Elem>
    where
        T::Elem: Clone,
        U: DenseData<Elem = T::Elem>,
    {
        or_null(self.try_concat_rows(other), "concat_rows")
    }

    /// Place `other` to the right of `self`.
    ///
    /// Returns `MatrixError::ShapeMismatch` unless both operands have the same number of
    /// rows.
    pub fn try_concat_cols<U>(&self, other: &MatrixBase<U>) -> MatrixResult<Matrix<T::Elem>>
    where
        T::Elem: Clone,
        U: DenseData<Elem = T::Elem>,
    {
        if self.nrows != other.nrows {
            return Err(MatrixError::shape_mismatch(
                (self.nrows, other.ncols),
                (other.nrows, other.ncols),
            ));
        }
        let ncols = self
            .ncols
            .checked_add(other.ncols)
            .ok_or_else(|| MatrixError::invalid("matrix shape overflows usize"))?;
        // Rows are walked by position so that a side with no columns still pairs up.
        let data = (0..self.nrows)
            .flat_map(|i| self.row(i).iter().chain(other.row(i)))
            .cloned()
            .collect();
        Ok(Matrix::from_boxed(data, self.nrows, ncols))
    }

    /// Like [`MatrixBase::try_concat_cols`], returning the null matrix on a mismatch.
    pub fn concat_cols<U>(&self, other: &MatrixBase<U>) -> Matrix<T::Elem>
    where
        T::Elem: Clone,
        U: DenseData<Elem = T::Elem>,
    {
        or_null(self.try_concat_cols(other), "concat_cols")
    }

    /// Return the matrix with 1-based row `i` and column `j` removed.
    ///
    /// The result is assembled from the (up to four) blocks surrounding the removed row and
    /// column. When the removed row or column lies on the border, the empty blocks are
    /// skipped rather than concatenated.
    ///
    /// Requires at least two rows and two columns.
    pub fn minor(&self, i: usize, j: usize) -> MatrixResult<Matrix<T::Elem>>
    where
        T::Elem: Clone,
    {
        let (m, n) = (self.nrows, self.ncols);
        if m < 2 || n < 2 {
            return Err(MatrixError::invalid(
                "a minor needs at least two rows and two columns",
            ));
        }
        self.check_coordinate(i, j)?;

        let (left, right) = (j == 1, j == n);
        // The blocks above (`rows = (1, i - 1)`) or below (`rows = (i + 1, m)`) the
        // removed row, minus the removed column.
        let band = |(rb, re): (usize, usize)| -> MatrixResult<Matrix<T::Elem>> {
            if left {
                self.try_submatrix(rb, re, j + 1, n)
            } else if right {
                self.try_submatrix(rb, re, 1, j - 1)
            } else {
                self.try_submatrix(rb, re, 1, j - 1)?
                    .try_concat_cols(&self.try_submatrix(rb, re, j + 1, n)?)
            }
        };

        if i == 1 {
            band((i + 1, m))
        } else if i == m {
            band((1, i - 1))
        } else {
            band((1, i - 1))?.try_concat_rows(&band((i + 1, m))?)
        }
    }

    /// Return a transposed copy.
    pub fn transpose(&self) -> Matrix<T::Elem>
    where
        T::Elem: Clone,
    {
        let data = (0..self.ncols)
            .flat_map(|j| (0..self.nrows).map(move |i| self[(i, j)].clone()))
            .collect();
        Matrix::from_boxed(data, self.ncols, self.nrows)
    }

    fn check_square(&self) -> MatrixResult<()> {
        if self.is_null() {
            Err(MatrixError::Empty)
        } else if !self.is_square() {
            Err(MatrixError::invalid("operation requires a square matrix"))
        } else {
            Ok(())
        }
    }

    /// Return the sum of the diagonal.
    pub fn trace(&self) -> MatrixResult<T::Elem>
    where
        T::Elem: Scalar,
    {
        self.check_square()?;
        Ok((0..self.nrows).fold(T::Elem::zero(), |acc, i| acc + self[(i, i)]))
    }

    /// Return the determinant by cofactor expansion along the first row.
    ///
    /// The cost is factorial in the dimension; this is meant for small matrices.
    pub fn det(&self) -> MatrixResult<T::Elem>
    where
        T::Elem: Scalar,
    {
        self.check_square()?;
        let s = self.as_slice();
        match self.nrows {
            1 => Ok(s[0]),
            2 => Ok(s[0] * s[3] - s[1] * s[2]),
            n => {
                let mut det = T::Elem::zero();
                for j in 0..n {
                    let term = s[j] * self.minor(1, j + 1)?.det()?;
                    det = if j % 2 == 0 { det + term } else { det - term };
                }
                Ok(det)
            }
        }
    }
}

//////////////////////////
// Grid and Comparisons //
//////////////////////////

impl<T> Grid1D for MatrixBase<T>
where
    T: DenseData,
{
    type Elem = T::Elem;

    fn size(&self) -> usize {
        self.as_slice().len()
    }

    fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    unsafe fn get_unchecked(&self, i: usize) -> &T::Elem {
        debug_assert!(i < self.size());
        // SAFETY: Forwarded to the caller.
        unsafe { self.as_slice().get_unchecked(i) }
    }
}

impl<T> Grid1DMut for MatrixBase<T>
where
    T: MutDenseData,
{
    unsafe fn get_unchecked_mut(&mut self, i: usize) -> &mut T::Elem {
        debug_assert!(i < self.size());
        // SAFETY: Forwarded to the caller.
        unsafe { self.as_mut_slice().get_unchecked_mut(i) }
    }
}

/// Matrices compare element-wise against any grid with the same number of elements.
impl<T, G> PartialEq<G> for MatrixBase<T>
where
    T: DenseData,
    T::Elem: PartialEq,
    G: Grid1D<Elem = T::Elem>,
{
    fn eq(&self, other: &G) -> bool {
        self.grid_eq(other)
    }
}

impl<T> fmt::Display for MatrixBase<T>
where
    T: DenseData,
    T::Elem: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        grid::fmt_grid(self, f)
    }
}

/// Return a reference to the item at entry `(row, col)` in the matrix.
///
/// # Panics
///
/// Panics if `row >= self.nrows()` or `col >= self.ncols()`.
impl<T> Index<(usize, usize)> for MatrixBase<T>
where
    T: DenseData,
{
    type Output = T::Elem;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        assert!(
            row < self.nrows(),
            "row {row} is out of bounds (max: {})",
            self.nrows()
        );
        assert!(
            col < self.ncols(),
            "col {col} is out of bounds (max: {})",
            self.ncols()
        );

        // SAFETY: We have checked that `row` and `col` are in-bounds.
        unsafe { self.elem_unchecked(row, col) }
    }
}

/// Return a mutable reference to the item at entry `(row, col)` in the matrix.
///
/// # Panics
///
/// Panics if `row >= self.nrows()` or `col >= self.ncols()`.
impl<T> IndexMut<(usize, usize)> for MatrixBase<T>
where
    T: MutDenseData,
{
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        assert!(
            row < self.nrows(),
            "row {row} is out of bounds (max: {})",
            self.nrows()
        );
        assert!(
            col < self.ncols(),
            "col {col} is out of bounds (max: {})",
            self.ncols()
        );

        // SAFETY: We have checked that `row` and `col` are in-bounds.
        unsafe { self.elem_unchecked_mut(row, col) }
    }
}

/// Return a reference to the item at linear (0-based, row-major) position `i`.
///
/// # Panics
///
/// Panics if `i >= self.size()`.
impl<T> Index<usize> for MatrixBase<T>
where
    T: DenseData,
{
    type Output = T::Elem;

    fn index(&self, i: usize) -> &Self::Output {
        &self.as_slice()[i]
    }
}

impl<T> IndexMut<usize> for MatrixBase<T>
where
    T: MutDenseData,
{
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        &mut self.as_mut_slice()[i]
    }
}

///////////
// Tests //
///////////

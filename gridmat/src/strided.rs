/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use std::{
    fmt,
    ops::{Index, IndexMut, Range},
};

use crate::{
    error::{MatrixError, MatrixResult},
    grid::{self, Grid1D, Grid1DMut},
    matrix::{DenseData, MatrixBase, MutDenseData},
};

/// A row-major strided window into a parent matrix.
///
/// Rows, columns and rectangular blocks of a matrix are all strided views: a block of
/// `nrows x ncols` elements whose rows start `cstride` elements apart in the parent's
/// storage, where `cstride` is the parent's column count.
///
/// ```text
///            |<------ cstride ----->|
///            |<-- ncols -->|
///            +-------------+
///   row 0 -> | a0 a1 a2 a3 | a4 a5 a6     ^
///   row 1 -> | b0 b1 b2 b3 | b4 b5 b6     |
///   row 2 -> | c0 c1 c2 c3 | c4 c5 c6   nrows
///   row 3 -> | d0 d1 d2 d3 | d4 d5 d6     v
///            +-------------+
///                  ^
///                  |
///             StridedView
/// ```
///
/// A row view is `1 x ncols` and a column view is `nrows x 1`. The view's own 0-based
/// linear position `k` maps to parent coordinate `(k / ncols, k % ncols)` relative to the
/// view's origin, so every [`Grid1D`] operation walks the block in row-major order.
///
/// Views never own storage. Reads observe the parent's live contents, and writes through
/// a [`MutStridedView`] land in the parent immediately.
///
/// # Aliasing
///
/// A view borrows its parent, so it cannot outlive it:
///
/// ```compile_fail
/// use gridmat::prelude::*;
///
/// let view;
/// {
///     let m = Matrix::<f64>::zeros(2, 2);
///     view = m.row_view(1).unwrap();
/// }
/// println!("{}", view.sum());
/// ```
///
/// The parent cannot be reshaped (or otherwise consumed) while a view is alive:
///
/// ```compile_fail
/// use gridmat::prelude::*;
///
/// let m = Matrix::<f64>::zeros(2, 2);
/// let view = m.row_view(1).unwrap();
/// let reshaped = m.reshape(1, 4).unwrap();
/// println!("{} {}", view.sum(), reshaped.sum());
/// ```
///
/// Two mutable views of the same parent cannot coexist:
///
/// ```compile_fail
/// use gridmat::prelude::*;
///
/// let mut m = Matrix::<f64>::zeros(2, 2);
/// let mut top = m.row_view_mut(1).unwrap();
/// let mut bottom = m.row_view_mut(2).unwrap();
/// top.fill(1.0);
/// bottom.fill(2.0);
/// ```
///
/// Copying one region into another goes through an owned intermediate:
///
/// ```
/// use gridmat::prelude::*;
///
/// let mut m = Matrix::from_rows(&[[1, 2], [3, 4]]);
/// let bottom = m.row_view(2).unwrap().to_matrix();
/// m.row_view_mut(1).unwrap().assign(&bottom).unwrap();
/// assert!(m.eq_slice(&[3, 4, 3, 4]));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StridedBase<T>
where
    T: DenseData,
{
    data: T,
    nrows: usize,
    ncols: usize,
    // The stride along the columns. This must be greater than or equal to `ncols`.
    cstride: usize,
}

pub type StridedView<'a, T> = StridedBase<&'a [T]>;
pub type MutStridedView<'a, T> = StridedBase<&'a mut [T]>;

/// Return the linear length of a slice underlying a `StridedBase` with the given parameters.
///
/// # Panics
///
/// Panics on overflow. See [`checked_linear_length`].
pub fn linear_length(nrows: usize, ncols: usize, cstride: usize) -> usize {
    match checked_linear_length(nrows, ncols, cstride) {
        Some(len) => len,
        None => panic!("a {nrows} x {ncols} view with stride {cstride} overflows usize"),
    }
}

/// Return the linear length of a slice underlying a `StridedBase`, or `None` if it
/// overflows `usize`.
pub fn checked_linear_length(nrows: usize, ncols: usize, cstride: usize) -> Option<usize> {
    (nrows.max(1) - 1)
        .checked_mul(cstride)?
        .checked_add(nrows.min(1) * ncols)
}

impl<T> StridedBase<T>
where
    T: DenseData,
{
    /// Construct a strided view over `data`.
    ///
    /// Returns `MatrixError::InvalidConstruction` if `cstride < ncols` or the layout
    /// overflows `usize`, and `MatrixError::ShapeMismatch` if the length of `data` is not
    /// exactly `linear_length(nrows, ncols, cstride)`.
    pub fn try_from(data: T, nrows: usize, ncols: usize, cstride: usize) -> MatrixResult<Self> {
        if cstride < ncols {
            return Err(MatrixError::invalid(
                "column stride must be at least the number of columns",
            ));
        }
        // When `nrows == 0` the expected length is 0. Otherwise the last row only needs
        // `ncols` elements, not a full stride.
        let required = checked_linear_length(nrows, ncols, cstride)
            .ok_or_else(|| MatrixError::invalid("view layout overflows usize"))?;
        let len = data.as_slice().len();
        if len != required {
            return Err(MatrixError::shape_mismatch(required, len));
        }
        Ok(Self {
            data,
            nrows,
            ncols,
            cstride,
        })
    }

    /// Return the number of columns in the view.
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Return the number of rows in the view.
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Return the count of elements between the start of each row.
    pub fn cstride(&self) -> usize {
        self.cstride
    }

    pub fn is_row(&self) -> bool {
        self.nrows == 1
    }

    pub fn is_col(&self) -> bool {
        self.ncols == 1
    }

    /// Return row `row` (0-based) of the view as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.nrows()`.
    pub fn row(&self, row: usize) -> &[T::Elem] {
        assert!(
            row < self.nrows(),
            "tried to access row {row} of a view with {} rows",
            self.nrows()
        );
        let start = row * self.cstride;
        &self.data.as_slice()[start..start + self.ncols]
    }

    /// Return row `row` (0-based) of the view as a mutable slice.
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
            "tried to access row {row} of a view with {} rows",
            self.nrows()
        );
        let start = row * self.cstride;
        let ncols = self.ncols;
        &mut self.data.as_mut_slice()[start..start + ncols]
    }

    /// Return a pointer to the first element of the view.
    pub fn as_ptr(&self) -> *const T::Elem {
        self.data.as_slice().as_ptr()
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
        // SAFETY: Our audited constructors guarantee the slice spans
        // `linear_length(nrows, ncols, cstride)` elements, which covers `(row, col)`.
        unsafe { self.data.as_slice().get_unchecked(row * self.cstride + col) }
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
        let cstride = self.cstride;
        debug_assert!(row < self.nrows);
        debug_assert!(col < self.ncols);
        // SAFETY: See `elem_unchecked`.
        unsafe { self.data.as_mut_slice().get_unchecked_mut(row * cstride + col) }
    }

    /// Return a read-only view over the same elements.
    pub fn as_view(&self) -> StridedView<'_, T::Elem> {
        StridedView {
            data: self.data.as_slice(),
            nrows: self.nrows,
            ncols: self.ncols,
            cstride: self.cstride,
        }
    }

    /// Map a 0-based linear position of the view to a `(row, col)` pair within the view.
    fn coordinate(&self, k: usize) -> (usize, usize) {
        (k / self.ncols, k % self.ncols)
    }
}

///////////////////////
// View Construction //
///////////////////////

/// A validated rectangular region of a parent matrix, in 0-based parent storage terms.
#[derive(Debug, Clone, Copy)]
struct Region {
    offset: usize,
    nrows: usize,
    ncols: usize,
    cstride: usize,
}

impl Region {
    /// Validate the closed 1-based region `[ib, ie] x [jb, je]` of an `nrows x ncols`
    /// parent.
    fn new(
        (nrows, ncols): (usize, usize),
        (ib, ie): (usize, usize),
        (jb, je): (usize, usize),
    ) -> MatrixResult<Self> {
        check_range(ib, ie, nrows)?;
        check_range(jb, je, ncols)?;
        Ok(Self {
            offset: (ib - 1) * ncols + (jb - 1),
            nrows: ie - ib + 1,
            ncols: je - jb + 1,
            cstride: ncols,
        })
    }

    fn span(&self) -> Range<usize> {
        self.offset..self.offset + linear_length(self.nrows, self.ncols, self.cstride)
    }
}

fn check_range(begin: usize, end: usize, extent: usize) -> MatrixResult<()> {
    if begin == 0 || begin > extent {
        Err(MatrixError::out_of_bounds(begin, extent))
    } else if end > extent {
        Err(MatrixError::out_of_bounds(end, extent))
    } else if end < begin {
        Err(MatrixError::invalid("view range is inverted"))
    } else {
        Ok(())
    }
}

impl<T> MatrixBase<T>
where
    T: DenseData,
{
    fn region(&self, rows: (usize, usize), cols: (usize, usize)) -> MatrixResult<Region> {
        Region::new((self.nrows(), self.ncols()), rows, cols)
    }

    /// Return a view of the closed 1-based region `[ib, ie] x [jb, je]`.
    ///
    /// Returns `MatrixError::OutOfBounds` if any endpoint lies outside the matrix and
    /// `MatrixError::InvalidConstruction` if a range is inverted.
    pub fn submat_view(
        &self,
        ib: usize,
        ie: usize,
        jb: usize,
        je: usize,
    ) -> MatrixResult<StridedView<'_, T::Elem>> {
        let region = self.region((ib, ie), (jb, je))?;
        Ok(StridedView {
            data: &self.as_slice()[region.span()],
            nrows: region.nrows,
            ncols: region.ncols,
            cstride: region.cstride,
        })
    }

    /// Return a mutable view of the closed 1-based region `[ib, ie] x [jb, je]`.
    /// See [`MatrixBase::submat_view`].
    pub fn submat_view_mut(
        &mut self,
        ib: usize,
        ie: usize,
        jb: usize,
        je: usize,
    ) -> MatrixResult<MutStridedView<'_, T::Elem>>
    where
        T: MutDenseData,
    {
        let region = self.region((ib, ie), (jb, je))?;
        Ok(MutStridedView {
            data: &mut self.as_mut_slice()[region.span()],
            nrows: region.nrows,
            ncols: region.ncols,
            cstride: region.cstride,
        })
    }

    /// Return a view of row `i` (1-based).
    pub fn row_view(&self, i: usize) -> MatrixResult<StridedView<'_, T::Elem>> {
        self.submat_view(i, i, 1, self.ncols())
    }

    /// Return a mutable view of row `i` (1-based).
    pub fn row_view_mut(&mut self, i: usize) -> MatrixResult<MutStridedView<'_, T::Elem>>
    where
        T: MutDenseData,
    {
        let ncols = self.ncols();
        self.submat_view_mut(i, i, 1, ncols)
    }

    /// Return a view of columns `jb..=je` of row `i` (all 1-based).
    pub fn row_view_range(
        &self,
        i: usize,
        jb: usize,
        je: usize,
    ) -> MatrixResult<StridedView<'_, T::Elem>> {
        self.submat_view(i, i, jb, je)
    }

    pub fn row_view_range_mut(
        &mut self,
        i: usize,
        jb: usize,
        je: usize,
    ) -> MatrixResult<MutStridedView<'_, T::Elem>>
    where
        T: MutDenseData,
    {
        self.submat_view_mut(i, i, jb, je)
    }

    /// Return a view of column `j` (1-based).
    pub fn col_view(&self, j: usize) -> MatrixResult<StridedView<'_, T::Elem>> {
        self.submat_view(1, self.nrows(), j, j)
    }

    /// Return a mutable view of column `j` (1-based).
    pub fn col_view_mut(&mut self, j: usize) -> MatrixResult<MutStridedView<'_, T::Elem>>
    where
        T: MutDenseData,
    {
        let nrows = self.nrows();
        self.submat_view_mut(1, nrows, j, j)
    }

    /// Return a view of rows `ib..=ie` of column `j` (all 1-based).
    pub fn col_view_range(
        &self,
        j: usize,
        ib: usize,
        ie: usize,
    ) -> MatrixResult<StridedView<'_, T::Elem>> {
        self.submat_view(ib, ie, j, j)
    }

    pub fn col_view_range_mut(
        &mut self,
        j: usize,
        ib: usize,
        ie: usize,
    ) -> MatrixResult<MutStridedView<'_, T::Elem>>
    where
        T: MutDenseData,
    {
        self.submat_view_mut(ib, ie, j, j)
    }
}

impl<T, U> From<MatrixBase<T>> for StridedBase<U>
where
    T: DenseData,
    U: DenseData,
    T: Into<U>,
{
    fn from(matrix: MatrixBase<T>) -> Self {
        let nrows = matrix.nrows();
        let ncols = matrix.ncols();
        Self {
            data: matrix.into_inner().into(),
            nrows,
            ncols,
            cstride: ncols,
        }
    }
}

//////////////////
// Grid Support //
//////////////////

impl<T> Grid1D for StridedBase<T>
where
    T: DenseData,
{
    type Elem = T::Elem;

    fn size(&self) -> usize {
        self.nrows * self.ncols
    }

    fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    unsafe fn get_unchecked(&self, i: usize) -> &T::Elem {
        debug_assert!(i < self.size());
        let (row, col) = self.coordinate(i);
        // SAFETY: `i < nrows * ncols` implies `row < nrows` and `col < ncols`.
        unsafe { self.elem_unchecked(row, col) }
    }
}

impl<T> Grid1DMut for StridedBase<T>
where
    T: MutDenseData,
{
    unsafe fn get_unchecked_mut(&mut self, i: usize) -> &mut T::Elem {
        debug_assert!(i < self.size());
        let (row, col) = self.coordinate(i);
        // SAFETY: `i < nrows * ncols` implies `row < nrows` and `col < ncols`.
        unsafe { self.elem_unchecked_mut(row, col) }
    }
}

impl<T, G> PartialEq<G> for StridedBase<T>
where
    T: DenseData,
    T::Elem: PartialEq,
    G: Grid1D<Elem = T::Elem>,
{
    fn eq(&self, other: &G) -> bool {
        self.grid_eq(other)
    }
}

impl<T> fmt::Display for StridedBase<T>
where
    T: DenseData,
    T::Elem: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        grid::fmt_grid(self, f)
    }
}

/// Return a reference to the item at entry `(row, col)` in the view.
///
/// # Panics
///
/// Panics if `row >= self.nrows()` or `col >= self.ncols()`.
impl<T> Index<(usize, usize)> for StridedBase<T>
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

/// Return a mutable reference to the item at entry `(row, col)` in the view.
///
/// # Panics
///
/// Panics if `row >= self.nrows()` or `col >= self.ncols()`.
impl<T> IndexMut<(usize, usize)> for StridedBase<T>
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

/// Return a reference to the item at linear (0-based) position `i` of the view.
///
/// # Panics
///
/// Panics if `i >= self.size()`.
impl<T> Index<usize> for StridedBase<T>
where
    T: DenseData,
{
    type Output = T::Elem;

    fn index(&self, i: usize) -> &Self::Output {
        assert!(
            i < self.size(),
            "index {i} is out of bounds (max: {})",
            self.size()
        );
        // SAFETY: We have checked that `i` is in-bounds.
        unsafe { self.get_unchecked(i) }
    }
}

impl<T> IndexMut<usize> for StridedBase<T>
where
    T: MutDenseData,
{
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        assert!(
            i < self.size(),
            "index {i} is out of bounds (max: {})",
            self.size()
        );
        // SAFETY: We have checked that `i` is in-bounds.
        unsafe { self.get_unchecked_mut(i) }
    }
}

///////////
// Tests //
///////////

#[cfg(test)]
mod tests {
    use gridmat_utils::lazy_format;
    use rstest::rstest;

    use super::*;
    use crate::matrix::Matrix;

    #[test]
    fn test_linear_length() {
        // If the number of rows is zero - the output should always be zero.
        assert_eq!(linear_length(0, 1, 1), 0);
        assert_eq!(linear_length(0, 2, 4), 0);

        // If `cstride == ncols`, then the computation should be trivial.
        for row in 1..10 {
            for col in 1..10 {
                assert_eq!(linear_length(row, col, col), row * col);
            }
        }

        // If there is only one row, then `cstride` should be ignored.
        assert_eq!(linear_length(1, 5, 10), 5);

        for row in 2..6 {
            for col in 0..6 {
                for cstride in col..8 {
                    assert_eq!(linear_length(row, col, cstride), (row - 1) * cstride + col);
                }
            }
        }
    }

    #[test]
    fn try_from_validates_layout() {
        let data: Vec<i32> = (0..10).collect();
        let view = StridedView::try_from(&data[..], 3, 2, 4).unwrap();
        assert!(view.eq_slice(&[0, 1, 4, 5, 8, 9]));
        assert_eq!(view.cstride(), 4);

        assert!(matches!(
            StridedView::try_from(&data[..], 3, 5, 4),
            Err(MatrixError::InvalidConstruction { .. })
        ));
        assert_eq!(
            StridedView::try_from(&data[..], 2, 2, 4).unwrap_err(),
            MatrixError::shape_mismatch(6, 10)
        );

        // Layouts whose length does not fit in `usize` are rejected before any access.
        assert_eq!(
            StridedView::try_from(&data[..], usize::MAX, 2, 4).unwrap_err(),
            MatrixError::invalid("view layout overflows usize")
        );
        assert_eq!(checked_linear_length(3, 1, usize::MAX), None);
        assert_eq!(checked_linear_length(3, 2, 4), Some(10));
    }

    fn grid_4x4() -> Matrix<i32> {
        // 1  2  3  4
        // 5  6  7  8
        // 9 10 11 12
        // 13 14 15 16
        Matrix::<i32>::seq(16).reshape(4, 4).unwrap()
    }

    #[test]
    fn row_views_alias_the_parent() {
        let mut m = Matrix::<i32>::zeros(4, 4);
        m.row_view_mut(1).unwrap().fill(5);

        for i in 0..4 {
            let expected = if i == 0 { 5 } else { 0 };
            for j in 0..4 {
                assert_eq!(m[(i, j)], expected, "{}", lazy_format!("entry ({}, {})", i, j));
            }
        }

        let row = m.row_view(1).unwrap();
        assert!(row.is_row());
        assert_eq!(row.shape(), (1, 4));
        assert_eq!(row.as_ptr(), m.as_ptr(), "views never copy");
    }

    #[test]
    fn column_views_stride_through_rows() {
        let mut m = grid_4x4();
        let col = m.col_view(2).unwrap();
        assert!(col.is_col());
        assert_eq!(col.shape(), (4, 1));
        assert_eq!(col.cstride(), 4);
        assert!(col.eq_slice(&[2, 6, 10, 14]));
        assert_eq!(*col.at(4).unwrap(), 14);
        assert_eq!(col[3], 14);
        assert_eq!(col[(1, 0)], 6);

        let mut col = m.col_view_mut(4).unwrap();
        col.mutate(|x| x * 10);
        col[0] = -1;
        assert_eq!(m.get_col(4).unwrap(), Matrix::from_rows(&[[-1], [80], [120], [160]]));
        assert_eq!(m[(0, 3)], -1);
    }

    #[test]
    fn ranged_and_rectangular_views() {
        let mut m = grid_4x4();
        let part = m.row_view_range(2, 2, 3).unwrap();
        assert!(part.eq_slice(&[6, 7]));

        let part = m.col_view_range(1, 3, 4).unwrap();
        assert!(part.eq_slice(&[9, 13]));

        let block = m.submat_view(2, 3, 2, 4).unwrap();
        assert_eq!(block.shape(), (2, 3));
        assert!(block.eq_slice(&[6, 7, 8, 10, 11, 12]));
        assert_eq!(block.row(1), &[10, 11, 12]);
        assert_eq!(*block.at(4).unwrap(), 10);

        let mut block = m.submat_view_mut(3, 4, 3, 4).unwrap();
        block.fill(0);
        block.row_mut(0)[0] = 99;
        assert!(m.eq_slice(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 99, 0, 13, 14, 0, 0]));

        m.row_view_range_mut(1, 1, 2).unwrap().fill(-1);
        m.col_view_range_mut(1, 2, 2).unwrap().fill(-2);
        assert_eq!(m.row(0), &[-1, -1, 3, 4]);
        assert_eq!(m.row(1), &[-2, 6, 7, 8]);
    }

    #[rstest]
    #[case(0, 0, 1, 4, MatrixError::out_of_bounds(0, 4))]
    #[case(5, 5, 1, 4, MatrixError::out_of_bounds(5, 4))]
    #[case(1, 5, 1, 4, MatrixError::out_of_bounds(5, 4))]
    #[case(1, 1, 2, 7, MatrixError::out_of_bounds(7, 4))]
    #[case(3, 2, 1, 1, MatrixError::invalid("view range is inverted"))]
    #[case(1, 1, 4, 3, MatrixError::invalid("view range is inverted"))]
    fn bad_regions_are_rejected(
        #[case] ib: usize,
        #[case] ie: usize,
        #[case] jb: usize,
        #[case] je: usize,
        #[case] expected: MatrixError,
    ) {
        let mut m = grid_4x4();
        assert_eq!(m.submat_view(ib, ie, jb, je).unwrap_err(), expected);
        assert_eq!(m.submat_view_mut(ib, ie, jb, je).unwrap_err(), expected);
    }

    #[test]
    fn null_parent_has_no_views() {
        let mut m = Matrix::<f64>::null();
        assert!(m.row_view(1).is_err());
        assert!(m.col_view(1).is_err());
        assert!(m.row_view_mut(1).is_err());
    }

    #[test]
    fn to_matrix_is_independent() {
        let mut m = grid_4x4();
        let copy = m.row_view(2).unwrap().to_matrix();
        assert_eq!(copy, m.row_view(2).unwrap());
        assert!(copy.is_row());

        m.row_view_mut(2).unwrap().fill(0);
        assert!(copy.eq_slice(&[5, 6, 7, 8]));
        assert_ne!(copy, m.row_view(2).unwrap());
    }

    #[test]
    fn assignment_requires_matching_count() {
        let mut m = grid_4x4();

        // A row vector can be assigned to a column view with the same element count.
        let values = Matrix::from_rows(&[[0, 0, 0, 0]]);
        m.col_view_mut(1).unwrap().assign(&values).unwrap();
        assert!(m.col_view(1).unwrap().eq_slice(&[0, 0, 0, 0]));

        let err = m
            .row_view_mut(1)
            .unwrap()
            .assign(&Matrix::from_rows(&[[1, 2, 3]]))
            .unwrap_err();
        assert_eq!(err, MatrixError::shape_mismatch(4, 3));
        assert_eq!(m.row(0), &[0, 2, 3, 4]);

        // Assignment from another view of a different parent.
        let other = Matrix::<i32>::ij(4, 4);
        m.row_view_mut(4)
            .unwrap()
            .assign(&other.col_view(1).unwrap())
            .unwrap();
        assert_eq!(m.row(3), &[1, 2, 3, 4]);
    }

    #[test]
    fn views_share_the_grid_operations() {
        let m = grid_4x4();
        let row = m.row_view(3).unwrap();
        assert_eq!(row.sum(), 42);
        assert_eq!(row.mean(), Some(10));
        assert_eq!(row.max(), Some(12));
        assert!(row.take(2).eq_slice(&[9, 10]));
        assert!(row.drop(3).eq_slice(&[12]));
        assert!(row.filter(|&x| x % 2 == 0).eq_slice(&[10, 12]));
        assert_eq!(row.dot(&m.col_view(1).unwrap()), Ok(9 + 50 + 99 + 156));

        let block = m.submat_view(1, 2, 1, 2).unwrap();
        let doubled = block.map(|x| x * 2);
        assert_eq!(doubled.shape(), (2, 2));
        assert!(doubled.eq_slice(&[2, 4, 10, 12]));
    }

    #[test]
    fn conversion_and_formatting() {
        let m = grid_4x4();
        let whole: StridedView<'_, i32> = StridedView::from(m.as_view());
        assert_eq!(whole.shape(), (4, 4));
        assert_eq!(whole, m);

        let block = m.submat_view(1, 2, 3, 4).unwrap();
        assert_eq!(block.to_string(), "2 x 2\n{3, 4, 7, 8}");
        let copy = block.as_view();
        assert_eq!(copy, block);
    }

    #[test]
    #[should_panic(expected = "index 4 is out of bounds (max: 4)")]
    fn linear_index_panics() {
        let m = grid_4x4();
        let row = m.row_view(1).unwrap();
        let _ = row[4];
    }
}

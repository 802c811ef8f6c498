/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

#![cfg_attr(docsrs, feature(doc_cfg))]

//! Dense, row-major matrices with non-owning views and index/mask selection.
//!
//! # Storage
//!
//! [`Matrix<T>`](crate::matrix::Matrix) owns a contiguous buffer of `nrows * ncols`
//! elements. A matrix with no elements is the *null* matrix, returned by the sentinel forms
//! of operations that cannot produce a result (for example a concatenation of mismatched
//! shapes). Every such operation also has a `try_*` form returning a
//! [`MatrixResult`](crate::error::MatrixResult).
//!
//! The storage representation is a type parameter, so the same [`MatrixBase`] methods serve
//! owned matrices (`Box<[T]>`), borrowed views (`&[T]`) and mutable views (`&mut [T]`).
//!
//! # Indexing conventions
//!
//! * The checked accessors (`at`, `at_ij`, row/column/block view constructors, `swap`) are
//!   **1-based** and report failures as [`MatrixError::OutOfBounds`].
//! * `Index`/`IndexMut`, `get`/`get_mut`, row slices and [`Indices`] are **0-based**.
//!
//! Linear position `k` of element `(i, j)` is `i * ncols + j`.
//!
//! # Views
//!
//! * [`StridedBase`](crate::strided::StridedBase): rows, columns, row/column ranges and
//!   rectangular blocks of a parent matrix.
//! * [`MaskedBase`](crate::masked::MaskedBase): the elements selected by a logical mask, a
//!   predicate, or an explicit index list.
//!
//! Views borrow their parent, so the borrow checker guarantees a view never outlives its
//! parent, never observes a reallocation, and never aliases another mutable view. Writes
//! through a mutable view land directly in the parent's storage.
//!
//! # The `Grid1D` interface
//!
//! Matrices and every view implement [`Grid1D`] (and [`Grid1DMut`] when mutable): a
//! 1-dimensional sequence interface providing element access, statistics, boolean
//! aggregates, functional transforms and products. Every derived operation is implemented
//! once, in terms of `size` and unchecked element access, and returns a new owned matrix.
//!
//! ```
//! use gridmat::prelude::*;
//!
//! let mut m = Matrix::<i64>::ij(3, 4);
//! m.row_view_mut(2).unwrap().fill(0);
//! assert_eq!(m.col_view(1).unwrap().sum(), 4);
//!
//! let big = m.where_gt(3);
//! assert_eq!(big.as_slice(), &[3, 9, 10, 11]);
//! assert!(gather(&m, &big).eq_slice(&[4, 4, 5, 6]));
//! ```

pub mod error;
pub use error::{MatrixError, MatrixResult, Shape};

pub mod scalar;
pub use scalar::{Scalar, Truthy};

pub mod grid;
pub use grid::{Grid1D, Grid1DMut, Variance};

pub mod functional;

// Storage and views
pub mod masked;
pub mod matrix;
pub mod strided;
pub use masked::{MaskedBase, MaskedView, MutMaskedView};
pub use matrix::{
    DenseData, Generator, Init, Matrix, MatrixBase, MatrixView, MutDenseData, MutMatrixView,
};
pub use strided::{MutStridedView, StridedBase, StridedView};

pub mod index;
pub use index::{gather, gather_unchecked, scatter, Indices};

mod ops;

pub mod random;

/// The commonly used traits, types and functions.
pub mod prelude {
    pub use crate::{
        error::{MatrixError, MatrixResult},
        functional,
        grid::{Grid1D, Grid1DMut, Variance},
        index::{gather, scatter, Indices},
        masked::{MaskedView, MutMaskedView},
        matrix::{Matrix, MatrixView, MutMatrixView},
        scalar::{Scalar, Truthy},
        strided::{MutStridedView, StridedView},
    };
}

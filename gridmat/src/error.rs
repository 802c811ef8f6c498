/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use thiserror::Error;

/// Convenience alias for a `Result<T, MatrixError>`.
pub type MatrixResult<T> = Result<T, MatrixError>;

/// Errors raised by the checked matrix, view and index operations.
///
/// Positions reported in `OutOfBounds` use the same convention as the call that failed:
/// 1-based for the `at` family, 0-based for index lists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MatrixError {
    #[error("index {index} is out of bounds for an extent of {extent}")]
    OutOfBounds { index: usize, extent: usize },

    #[error("shape mismatch: expected {expected}, found {found}")]
    ShapeMismatch { expected: Shape, found: Shape },

    #[error("invalid construction: {reason}")]
    InvalidConstruction { reason: &'static str },

    #[error("operation is undefined for an empty grid")]
    Empty,
}

impl MatrixError {
    pub(crate) fn out_of_bounds(index: usize, extent: usize) -> Self {
        Self::OutOfBounds { index, extent }
    }

    pub(crate) fn shape_mismatch(expected: impl Into<Shape>, found: impl Into<Shape>) -> Self {
        Self::ShapeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub(crate) fn invalid(reason: &'static str) -> Self {
        Self::InvalidConstruction { reason }
    }
}

/// The dimensions involved in a [`MatrixError::ShapeMismatch`].
///
/// Element-count checks (for example scatter or dot products) report a `Len`, while
/// operations that care about both extents report `Dims`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Len(usize),
    Dims(usize, usize),
}

impl From<usize> for Shape {
    fn from(len: usize) -> Self {
        Shape::Len(len)
    }
}

impl From<(usize, usize)> for Shape {
    fn from((nrows, ncols): (usize, usize)) -> Self {
        Shape::Dims(nrows, ncols)
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Shape::Len(len) => write!(f, "{len} elements"),
            Shape::Dims(nrows, ncols) => write!(f, "{nrows} x {ncols}"),
        }
    }
}

/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

//! Random matrix factories.
//!
//! The sequential factories draw every element from a single caller-provided generator.
//! [`Matrix::par_random_uniform`] splits its output into fixed-size chunks and fills them in
//! parallel, each chunk drawing from its own generator built by an [`RngBuilder`]. Because
//! the chunking does not depend on the thread pool, the result is a function of the builder
//! alone.

use num_traits::PrimInt;
use rand::{
    distr::{
        uniform::{SampleUniform, Uniform},
        Distribution,
    },
    Rng,
};
#[cfg(feature = "rayon")]
use rayon::prelude::{IndexedParallelIterator, ParallelIterator, ParallelSliceMut};
#[cfg(feature = "rayon")]
use tracing::debug;

#[cfg(feature = "rayon")]
use gridmat_utils::RngBuilder;

use crate::{
    error::{MatrixError, MatrixResult},
    matrix::{checked_len, Init, Matrix},
};

#[cfg(feature = "rayon")]
use crate::scalar::Scalar;

/// The number of elements filled by each generator in [`Matrix::par_random_uniform`].
#[cfg(feature = "rayon")]
pub const PAR_FILL_CHUNK: usize = 4096;

fn sample_matrix<T, D, R>(
    nrows: usize,
    ncols: usize,
    dist: D,
    rng: &mut R,
) -> MatrixResult<Matrix<T>>
where
    D: Distribution<T>,
    R: Rng + ?Sized,
{
    if checked_len(nrows, ncols)? == 0 {
        return Ok(Matrix::null());
    }
    Ok(Matrix::new(Init(|| dist.sample(rng)), nrows, ncols))
}

impl<T> Matrix<T>
where
    T: SampleUniform,
{
    /// Construct an `nrows x ncols` matrix with elements drawn uniformly from `[low, high)`.
    ///
    /// Returns `MatrixError::InvalidConstruction` if the range is empty or not finite, or if
    /// `nrows * ncols` overflows. A matrix with no elements is returned as the null matrix.
    pub fn random_uniform<R>(
        nrows: usize,
        ncols: usize,
        low: T,
        high: T,
        rng: &mut R,
    ) -> MatrixResult<Self>
    where
        R: Rng + ?Sized,
    {
        let dist = Uniform::new(low, high)
            .map_err(|_| MatrixError::invalid("uniform range is empty or not finite"))?;
        sample_matrix(nrows, ncols, dist, rng)
    }

    /// Construct an `nrows x ncols` matrix of integers drawn uniformly from `[min, max]`.
    ///
    /// Returns `MatrixError::InvalidConstruction` if `min > max` or `nrows * ncols`
    /// overflows.
    pub fn random_int<R>(
        nrows: usize,
        ncols: usize,
        min: T,
        max: T,
        rng: &mut R,
    ) -> MatrixResult<Self>
    where
        T: PrimInt,
        R: Rng + ?Sized,
    {
        let dist = Uniform::new_inclusive(min, max)
            .map_err(|_| MatrixError::invalid("integer range is empty"))?;
        sample_matrix(nrows, ncols, dist, rng)
    }

    /// Construct a row vector of `n` elements drawn uniformly from `[low, high)` using a
    /// data-parallel fill.
    ///
    /// The output is split into chunks of [`PAR_FILL_CHUNK`] elements. Chunk `c` is filled
    /// from `builder.build_rng(c)`, so the result is reproducible for a given builder
    /// regardless of the number of worker threads.
    ///
    /// Returns the null matrix if `n == 0`, and `MatrixError::InvalidConstruction` if the
    /// range is empty or not finite.
    #[cfg(feature = "rayon")]
    pub fn par_random_uniform<B>(n: usize, low: T, high: T, builder: &B) -> MatrixResult<Self>
    where
        T: Scalar,
        T::Sampler: Sync,
        B: RngBuilder<usize> + Sync,
    {
        let dist = Uniform::new(low, high)
            .map_err(|_| MatrixError::invalid("uniform range is empty or not finite"))?;
        if n == 0 {
            return Ok(Self::null());
        }

        debug!(
            n,
            chunk_size = PAR_FILL_CHUNK,
            chunks = n.div_ceil(PAR_FILL_CHUNK),
            "parallel uniform fill"
        );

        let mut data: Box<[T]> = vec![T::zero(); n].into();
        data.par_chunks_mut(PAR_FILL_CHUNK)
            .enumerate()
            .for_each(|(chunk, values)| {
                let mut rng = builder.build_rng(chunk);
                values
                    .iter_mut()
                    .for_each(|value| *value = dist.sample(&mut rng));
            });
        Ok(Self::row_vector(data))
    }
}

///////////
// Tests //
///////////

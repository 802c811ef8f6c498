/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use std::hash::{Hash, Hasher};

use rand::{rngs::StdRng, Rng, SeedableRng};

/// Creation of independent random number generators for data-parallel fills.
///
/// A parallel fill splits its output into disjoint chunks and asks the builder for one
/// generator per chunk, passing the chunk number as `mixin`. No generator state is shared
/// between workers, and the result does not depend on how chunks are scheduled.
pub trait RngBuilder<T> {
    type Rng: Rng + 'static;

    /// Construct an `Rng` with the provided value mixed into the seed.
    fn build_rng(&self, mixin: T) -> Self::Rng;
}

/// A `RngBuilder` that returns a `rand::rngs::StdRng`, hashing `mixin` together with the
/// builder's base seed.
#[derive(Debug, Clone)]
pub struct StdRngBuilder {
    hasher: std::hash::DefaultHasher,
}

impl StdRngBuilder {
    /// Construct a new `StdRngBuilder` using the given seed.
    pub fn new(seed: u64) -> Self {
        let mut hasher = std::hash::DefaultHasher::new();
        seed.hash(&mut hasher);
        Self { hasher }
    }
}

impl<T> RngBuilder<T> for StdRngBuilder
where
    T: Hash,
{
    type Rng = StdRng;

    fn build_rng(&self, mixin: T) -> Self::Rng {
        let mut hasher = self.hasher.clone();
        mixin.hash(&mut hasher);
        StdRng::seed_from_u64(hasher.finish())
    }
}

///////////
// Tests //
///////////

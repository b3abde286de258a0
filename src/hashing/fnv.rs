//! # FNV-1a Bucket Hasher
//!
//! The default hasher for [`ChainedMap`](crate::ChainedMap). FNV-1a over 64 bits is a pure
//! function of the bytes fed to it, so a key lands in the same bucket on every call and on
//! every run. That keeps bucket dumps reproducible and lets later lookups and deletes find
//! what an earlier insert placed.
//!
//! A table that wants placement it does not share with other processes can mix a seed into
//! the offset basis with [`FnvBuildHasher::with_seed`] or [`FnvBuildHasher::random`]. The seed
//! is captured once, when the builder is created, and never changes afterwards.
//!
//! **Note**: FNV is not collision resistant. Do not use it for tables keyed by untrusted input
//! unless a random seed is set.

use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hash::{BuildHasher, Hasher};

const FNV64_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV64_PRIME: u64 = 0x100000001b3;

/// Produces [`FnvHasher`]s that all start from the same offset basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FnvBuildHasher {
    basis: u64,
}

impl Default for FnvBuildHasher {
    fn default() -> Self {
        Self {
            basis: FNV64_OFFSET_BASIS,
        }
    }
}

impl FnvBuildHasher {
    /// Unseeded FNV-1a, identical across runs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mixes a value drawn from a generator seeded with `seed` into the offset basis.
    /// The same seed always yields the same hashes.
    pub fn with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::perturbed(rng.gen::<u64>())
    }

    /// Draws the seed from OS entropy. Placement is stable for the lifetime of this builder
    /// but differs between builders.
    pub fn random() -> Self {
        let mut rng = StdRng::from_entropy();
        Self::perturbed(rng.gen::<u64>())
    }

    fn perturbed(mix: u64) -> Self {
        Self {
            basis: FNV64_OFFSET_BASIS ^ mix,
        }
    }
}

impl BuildHasher for FnvBuildHasher {
    type Hasher = FnvHasher;

    fn build_hasher(&self) -> FnvHasher {
        FnvHasher { state: self.basis }
    }
}

/// Streaming FNV-1a state.
#[derive(Debug, Clone)]
pub struct FnvHasher {
    state: u64,
}

impl Default for FnvHasher {
    fn default() -> Self {
        FnvBuildHasher::default().build_hasher()
    }
}

impl Hasher for FnvHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.state ^= b as u64;
            self.state = self.state.wrapping_mul(FNV64_PRIME);
        }
    }
}

//! Seed resolution.
//!
//! A configured seed of zero asks for a random world. The generator resolves
//! it once, before the first noise sample, and never touches ambient
//! randomness again for the rest of the run.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Where the seed used for a run came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SeedSource {
    /// Taken unchanged from the config.
    Configured,
    /// Drawn at startup because the config held zero.
    Drawn,
}

/// Resolves a configured seed, drawing from OS entropy if it is zero.
#[must_use]
pub fn resolve_seed(seed: u64) -> (u64, SeedSource) {
    if seed != 0 {
        return (seed, SeedSource::Configured);
    }
    resolve_seed_with(seed, &mut ChaCha8Rng::from_entropy())
}

/// Resolves a configured seed using the given RNG for the zero case.
///
/// The returned seed is never zero.
#[must_use]
pub fn resolve_seed_with<R: Rng>(seed: u64, rng: &mut R) -> (u64, SeedSource) {
    if seed != 0 {
        (seed, SeedSource::Configured)
    } else {
        (rng.gen_range(1..=u64::MAX), SeedSource::Drawn)
    }
}

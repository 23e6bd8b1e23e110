//! Random number sources for ray tracing.
//!
//! Every sampler takes its generator explicitly. A render derives one
//! ChaCha20 stream per scanline from a single master seed, so results do not
//! depend on how scanlines are scheduled across threads.

use rand::{rng, Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::vec3::Real;

/// Generator used throughout the renderer.
pub type SceneRng = ChaCha20Rng;

/// Deterministic generator for `seed`.
pub fn seeded(seed: u64) -> SceneRng {
    ChaCha20Rng::seed_from_u64(seed)
}

/// Generator seeded from the thread-local OS-backed source.
pub fn from_entropy() -> SceneRng {
    ChaCha20Rng::from_rng(&mut rng())
}

/// Independent stream `stream` of the generator for `seed`.
pub fn stream(seed: u64, stream: u64) -> SceneRng {
    let mut generator = seeded(seed);
    generator.set_stream(stream);
    generator
}

/// Uniform scalar in `[0, 1)`.
#[inline]
pub fn random_scalar<S: Real, R: Rng>(rng: &mut R) -> S {
    rng.random_range(S::ZERO..S::ONE)
}

/// Uniform scalar in `[min, max)`. Returns `min` for an empty range.
#[inline]
pub fn random_scalar_range<S: Real, R: Rng>(rng: &mut R, min: S, max: S) -> S {
    min + (max - min) * random_scalar::<S, R>(rng)
}

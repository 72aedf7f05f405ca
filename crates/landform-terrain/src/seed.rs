//! Deterministic seeded generation utilities.
//!
//! Every pipeline stage draws from its own RNG derived from the run seed and
//! the stage tag, so toggling one stage never shifts another stage's stream.
//! Periodic terms go through `libm` for platform-independent results.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Pipeline stages that consume randomness.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Micro-variation added to each synthesized base height.
    BaseJitter,
    /// High-frequency jitter added to upsampled heights.
    ResampleJitter,
    /// Tree site sampling.
    Trees,
    /// Building footprint sampling and sizing.
    Buildings,
    /// Color variation of grid-surface vertices.
    SurfacePalette,
    /// Color variation of decoration geometry.
    PropPalette,
}

/// Derive a u64 seed for a stage from the run seed.
///
/// Uses SipHash (via std's `DefaultHasher`) to combine the two into a
/// well-distributed value.
pub fn derive_stage_seed(seed: u64, stage: Stage) -> u64 {
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    stage.hash(&mut hasher);
    hasher.finish()
}

/// Deterministic RNG for one stage of one run.
pub fn stage_rng(seed: u64, stage: Stage) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(derive_stage_seed(seed, stage))
}

/// Uniform sample in `[-half_width, half_width)`.
///
/// A zero half-width draws nothing and returns zero.
#[inline]
pub fn symmetric_jitter(rng: &mut impl Rng, half_width: f32) -> f32 {
    if half_width <= 0.0 {
        return 0.0;
    }
    (rng.random::<f32>() * 2.0 - 1.0) * half_width
}

/// Deterministic sine using libm (not platform libc).
#[inline]
pub fn det_sin(x: f64) -> f64 {
    libm::sin(x)
}

/// Deterministic cosine using libm.
#[inline]
pub fn det_cos(x: f64) -> f64 {
    libm::cos(x)
}

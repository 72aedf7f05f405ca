//! Optional upsampling of the base grids.
//!
//! Fine cell `f` of an `M`-sized grid maps to base coordinate
//! `b = f / M · (N - 1)`. Heights are bilinearly blended, jittered, then kept
//! inside the admissible bounds; type codes are copied from the nearest base
//! cell and never blended.

use landform_config::TerrainConfig;
use tracing::debug;

use crate::element::ElementType;
use crate::grid::{GridError, HeightGrid, HeightRange, TypeGrid};
use crate::overlay::admissible_bounds;
use crate::seed::{Stage, stage_rng, symmetric_jitter};

/// Bilinear blend of the four base cells around fractional `(x, z)`.
///
/// Corner indices are clamped into the grid.
pub fn bilinear_sample(values: &HeightGrid, x: f32, z: f32) -> f32 {
    let x1 = values.clamp_index(x.floor() as isize);
    let x2 = values.clamp_index(x.floor() as isize + 1);
    let z1 = values.clamp_index(z.floor() as isize);
    let z2 = values.clamp_index(z.floor() as isize + 1);

    let q11 = values.get(x1, z1);
    let q12 = values.get(x1, z2);
    let q21 = values.get(x2, z1);
    let q22 = values.get(x2, z2);

    let dx = x - x1 as f32;
    let dz = z - z1 as f32;

    let near = q11 * (1.0 - dx) + q21 * dx;
    let far = q12 * (1.0 - dx) + q22 * dx;
    near * (1.0 - dz) + far * dz
}

/// Code of the base cell nearest to fractional `(x, z)`.
pub fn nearest_type(types: &TypeGrid, x: f32, z: f32) -> ElementType {
    types.get_clamped(x.round() as isize, z.round() as isize)
}

/// Upsamples a base grid pair to a fixed target size.
#[derive(Clone, Debug, PartialEq)]
pub struct Resampler {
    target: usize,
    jitter: f32,
    seed: u64,
    bounds: Option<HeightRange>,
}

impl Resampler {
    pub fn new(target: usize, jitter: f32, seed: u64) -> Self {
        Self {
            target,
            jitter,
            seed,
            bounds: None,
        }
    }

    /// Clamp every jittered height into `bounds`.
    pub fn with_bounds(mut self, bounds: HeightRange) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// The resampler a configuration asks for, or `None` when interpolation
    /// is disabled. Output stays within [`admissible_bounds`].
    pub fn from_config(config: &TerrainConfig) -> Option<Self> {
        config.interpolate.then(|| {
            Self::new(config.target_grid_size, config.resample_jitter, config.seed)
                .with_bounds(admissible_bounds(config))
        })
    }

    pub fn target(&self) -> usize {
        self.target
    }

    /// Produce `target × target` height and type grids from the base pair.
    pub fn resample(
        &self,
        heights: &HeightGrid,
        types: &TypeGrid,
    ) -> Result<(HeightGrid, TypeGrid), GridError> {
        let m = self.target as f32;
        let span = (heights.size() - 1) as f32;
        let to_base = |f: usize| f as f32 / m * span;

        let mut rng = stage_rng(self.seed, Stage::ResampleJitter);
        let fine_heights = HeightGrid::from_fn(self.target, |row, col| {
            let h = bilinear_sample(heights, to_base(row), to_base(col))
                + symmetric_jitter(&mut rng, self.jitter);
            self.bounds.map_or(h, |bounds| bounds.clamp(h))
        })?;
        let fine_types =
            TypeGrid::from_fn(self.target, |row, col| nearest_type(types, to_base(row), to_base(col)))?;

        debug!(
            from = heights.size(),
            to = self.target,
            "resampled base grids"
        );
        Ok((fine_heights, fine_types))
    }
}

/// Upsample when `config.interpolate` is set, otherwise hand the base grids
/// back unchanged.
pub fn resample_grids(
    config: &TerrainConfig,
    heights: HeightGrid,
    types: TypeGrid,
) -> Result<(HeightGrid, TypeGrid), GridError> {
    match Resampler::from_config(config) {
        Some(resampler) => resampler.resample(&heights, &types),
        None => Ok((heights, types)),
    }
}

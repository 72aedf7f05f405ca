//! Base height-field synthesis.
//!
//! Each cell is mapped to world coordinates and evaluated against the
//! configured [`ReliefProfile`]: a stack of sine/cosine octaves, or simplex
//! fBm. Seeded jitter adds micro-variation before every value is clamped into
//! `[TerrainConfig::MIN_HEIGHT, max_height]`.

use landform_config::{ReliefProfile, TerrainConfig};
use noise::{NoiseFn, Simplex};

use crate::grid::{GridError, HeightGrid};
use crate::seed::{Stage, det_cos, det_sin, stage_rng, symmetric_jitter};

/// One periodic term: `amplitude · sin(x · freq_x) · cos(z · freq_z)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Octave {
    pub amplitude: f64,
    pub freq_x: f64,
    pub freq_z: f64,
}

impl Octave {
    const fn new(amplitude: f64, freq_x: f64, freq_z: f64) -> Self {
        Self {
            amplitude,
            freq_x,
            freq_z,
        }
    }

    #[inline]
    fn eval(&self, x: f64, z: f64) -> f64 {
        det_sin(x * self.freq_x) * det_cos(z * self.freq_z) * self.amplitude
    }
}

/// Two broad octaves used by [`ReliefProfile::Classic`].
pub const CLASSIC_OCTAVES: [Octave; 2] = [Octave::new(3.0, 0.1, 0.1), Octave::new(2.0, 0.05, 0.03)];

/// Main terrain, hills, detail and micro-detail used by [`ReliefProfile::Layered`].
pub const LAYERED_OCTAVES: [Octave; 4] = [
    Octave::new(4.0, 0.05, 0.05),
    Octave::new(2.0, 0.1, 0.08),
    Octave::new(1.0, 0.2, 0.15),
    Octave::new(0.5, 0.4, 0.3),
];

/// Multi-octave fBm parameters for [`ReliefProfile::Fractal`].
#[derive(Clone, Debug, PartialEq)]
pub struct FractalParams {
    /// Number of noise octaves to composite.
    pub octaves: u32,
    /// Frequency multiplier between successive octaves.
    pub lacunarity: f64,
    /// Amplitude multiplier between successive octaves.
    pub persistence: f64,
    /// Frequency of the first octave, in cycles per world unit.
    pub base_frequency: f64,
    /// Amplitude of the first octave.
    pub amplitude: f64,
}

impl Default for FractalParams {
    fn default() -> Self {
        Self {
            octaves: 4,
            lacunarity: 2.0,
            persistence: 0.5,
            base_frequency: 0.05,
            amplitude: 4.0,
        }
    }
}

/// Map grid indices to world `(x, z)`.
///
/// `x = (row / size - 0.5) · extent`, `z = (col / size - 0.5) · extent`.
#[inline]
pub fn grid_to_world(row: usize, col: usize, size: usize, extent: f32) -> (f32, f32) {
    let g = size as f32;
    let x = (row as f32 / g - 0.5) * extent;
    let z = (col as f32 / g - 0.5) * extent;
    (x, z)
}

enum Relief {
    Periodic(&'static [Octave]),
    Fractal { noise: Simplex, params: FractalParams },
}

/// Builds the base [`HeightGrid`] for a configuration.
pub struct HeightFieldSynthesizer {
    relief: Relief,
    jitter: f32,
    extent: f32,
    max_height: f32,
    seed: u64,
}

impl HeightFieldSynthesizer {
    /// Create a synthesizer for the relief, extent, bound and seed in `config`.
    pub fn new(config: &TerrainConfig) -> Self {
        let (relief, jitter) = match config.relief {
            ReliefProfile::Classic => (Relief::Periodic(&CLASSIC_OCTAVES), 1.0),
            ReliefProfile::Layered => (Relief::Periodic(&LAYERED_OCTAVES), 0.75),
            ReliefProfile::Fractal => (
                Relief::Fractal {
                    noise: Simplex::new(config.seed as u32),
                    params: FractalParams::default(),
                },
                0.75,
            ),
        };
        Self {
            relief,
            jitter,
            extent: config.terrain_size,
            max_height: config.max_height,
            seed: config.seed,
        }
    }

    /// Half-width of the per-cell jitter.
    pub fn jitter(&self) -> f32 {
        self.jitter
    }

    /// Smooth relief at world `(x, z)` without jitter or clamping.
    pub fn relief_at(&self, x: f32, z: f32) -> f32 {
        let (x, z) = (x as f64, z as f64);
        let h = match &self.relief {
            Relief::Periodic(octaves) => octaves.iter().map(|o| o.eval(x, z)).sum::<f64>(),
            Relief::Fractal { noise, params } => {
                let mut total = 0.0;
                let mut frequency = params.base_frequency;
                let mut amplitude = params.amplitude;
                for _ in 0..params.octaves {
                    total += noise.get([x * frequency, z * frequency]) * amplitude;
                    frequency *= params.lacunarity;
                    amplitude *= params.persistence;
                }
                total
            }
        };
        h as f32
    }

    /// Synthesize a `size × size` height grid.
    ///
    /// Every value lies in `[TerrainConfig::MIN_HEIGHT, max_height]`. The
    /// same seed always yields a bit-identical grid.
    pub fn synthesize(&self, size: usize) -> Result<HeightGrid, GridError> {
        let mut rng = stage_rng(self.seed, Stage::BaseJitter);
        HeightGrid::from_fn(size, |row, col| {
            let (x, z) = grid_to_world(row, col, size, self.extent);
            let h = self.relief_at(x, z) + symmetric_jitter(&mut rng, self.jitter);
            h.clamp(TerrainConfig::MIN_HEIGHT, self.max_height)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(relief: ReliefProfile, seed: u64) -> TerrainConfig {
        TerrainConfig {
            relief,
            seed,
            ..Default::default()
        }
    }

    #[test]
    fn test_grid_to_world_spans_extent() {
        assert_eq!(grid_to_world(0, 0, 4, 100.0), (-50.0, -50.0));
        assert_eq!(grid_to_world(2, 3, 4, 100.0), (0.0, 25.0));
    }

    #[test]
    fn test_same_seed_bit_identical() {
        for relief in [ReliefProfile::Classic, ReliefProfile::Layered, ReliefProfile::Fractal] {
            let a = HeightFieldSynthesizer::new(&config(relief, 42)).synthesize(32).unwrap();
            let b = HeightFieldSynthesizer::new(&config(relief, 42)).synthesize(32).unwrap();
            assert_eq!(a, b, "{relief:?} must be deterministic");
        }
    }

    #[test]
    fn test_different_seed_changes_grid() {
        let a = HeightFieldSynthesizer::new(&config(ReliefProfile::Layered, 1)).synthesize(16).unwrap();
        let b = HeightFieldSynthesizer::new(&config(ReliefProfile::Layered, 2)).synthesize(16).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_heights_clamped_into_admissible_range() {
        for relief in [ReliefProfile::Classic, ReliefProfile::Layered, ReliefProfile::Fractal] {
            let config = TerrainConfig {
                max_height: 1.0,
                ..config(relief, 9)
            };
            let grid = HeightFieldSynthesizer::new(&config).synthesize(50).unwrap();
            for &h in grid.as_slice() {
                assert!(
                    (TerrainConfig::MIN_HEIGHT..=1.0).contains(&h),
                    "{relief:?} height {h} escaped clamp"
                );
            }
        }
    }

    #[test]
    fn test_jitter_bounded_around_relief() {
        let synth = HeightFieldSynthesizer::new(&config(ReliefProfile::Classic, 3));
        let size = 20;
        let grid = synth.synthesize(size).unwrap();
        for row in 0..size {
            for col in 0..size {
                let (x, z) = grid_to_world(row, col, size, 100.0);
                let smooth = synth
                    .relief_at(x, z)
                    .clamp(TerrainConfig::MIN_HEIGHT, 10.0);
                assert!(
                    (grid.get(row, col) - smooth).abs() <= synth.jitter() + 1e-5,
                    "cell ({row}, {col}) drifted too far from relief"
                );
            }
        }
    }

    #[test]
    fn test_relief_is_not_flat() {
        let synth = HeightFieldSynthesizer::new(&config(ReliefProfile::Layered, 42));
        let grid = synth.synthesize(50).unwrap();
        assert!(grid.range().span() > 1.0);
    }

    #[test]
    fn test_undersized_grid_rejected() {
        let synth = HeightFieldSynthesizer::new(&TerrainConfig::default());
        assert!(synth.synthesize(1).is_err());
    }
}

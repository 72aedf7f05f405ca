//! Per-element vertex colors.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::element::ElementType;
use crate::seed::{Stage, stage_rng};

/// Fixed tree trunk brown.
pub const TRUNK_COLOR: [f32; 3] = [0.4, 0.2, 0.1];

/// Fixed tree canopy green.
pub const CANOPY_COLOR: [f32; 3] = [0.1, 0.5, 0.1];

/// Seeded color source.
///
/// Each call draws a small variation from the palette's own stream, so a run
/// is reproducible while neighbouring cells of the same type still differ.
pub struct ColorPalette {
    rng: ChaCha8Rng,
}

impl ColorPalette {
    pub fn new(seed: u64, stage: Stage) -> Self {
        Self {
            rng: stage_rng(seed, stage),
        }
    }

    /// Color for one vertex of `element`.
    pub fn color(&mut self, element: ElementType) -> [f32; 3] {
        match element {
            ElementType::Road => {
                let gray = 0.25 + self.vary(0.1);
                [gray, gray, gray]
            }
            ElementType::WaterPool => [0.1, 0.4, 0.6 + self.vary(0.2)],
            ElementType::Lawn => {
                let v = self.vary(0.2);
                [0.1 + v * 0.2, 0.5 + v, 0.1 + v * 0.1]
            }
            ElementType::Building | ElementType::HouseWall => {
                let v = self.vary(0.15);
                [0.5 + v, 0.3 + v, 0.1 + v]
            }
            ElementType::Roof => {
                let v = self.vary(0.15);
                [0.3 + v, 0.2 + v, 0.1 + v]
            }
            ElementType::Trunk => TRUNK_COLOR,
            ElementType::Canopy => CANOPY_COLOR,
            ElementType::Land => {
                let v = self.vary(0.15);
                [0.7 + v, 0.6 + v, 0.45 + v]
            }
        }
    }

    #[inline]
    fn vary(&mut self, scale: f32) -> f32 {
        self.rng.random::<f32>() * scale
    }
}

//! Terrain generation settings.
//!
//! [`TerrainConfig`] is the single immutable value handed to the generator.
//! Every knob that influences the produced mesh lives here, so two generators
//! built from equal configs produce bit-identical output.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Which periodic/noise stack the height synthesizer evaluates.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
pub enum ReliefProfile {
    /// Two sine/cosine octaves with `±1.0` jitter.
    Classic,
    /// Four sine/cosine octaves with `±0.75` jitter.
    #[default]
    Layered,
    /// Simplex fBm with `±0.75` jitter.
    Fractal,
}

/// How vertex normals of the grid surface are resolved.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
pub enum NormalMode {
    /// Grid vertices keep the straight-up placeholder normal.
    Flat,
    /// Face normals are averaged across vertices sharing a position.
    #[default]
    Smooth,
    /// Normals come from a Sobel estimate of the height-field gradient.
    Gradient,
}

/// A flattened rectangular road corridor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RoadCorridor {
    /// Center as `[row, col]` fractions of the base grid size.
    pub center: [f32; 2],
    /// Extent along the row axis, as a fraction of the base grid size.
    pub length: f32,
    /// Extent along the column axis, in cells.
    pub width: usize,
}

/// A circular depression marked as water.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WaterBasin {
    /// Center as `[row, col]` fractions of the base grid size.
    pub center: [f32; 2],
    /// Radius in cells.
    pub radius: usize,
    /// Depth below the observed minimum height at the basin center.
    pub depth: f32,
}

/// A circular lawn that only claims plain land.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LawnPatch {
    /// Center as `[row, col]` fractions of the base grid size.
    pub center: [f32; 2],
    /// Radius in cells.
    pub radius: usize,
}

/// A stepped rectangular building pad.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BuildingPad {
    /// Lowest-index corner as `[row, col]` fractions of the base grid size.
    pub origin: [f32; 2],
    /// Extent along the row axis, in cells.
    pub width: usize,
    /// Extent along the column axis, in cells.
    pub depth: usize,
    /// Elevation of the outer pad. The inner half is raised two units more.
    pub height: f32,
}

/// Land-use features stamped onto the base grid, in stamping order.
///
/// A `None` entry skips that stamp.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeatureLayout {
    pub road: Option<RoadCorridor>,
    pub water: Option<WaterBasin>,
    pub lawn: Option<LawnPatch>,
    pub building: Option<BuildingPad>,
}

/// Decoration scatter counts.
///
/// `None` derives the count from the active grid size.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DecorationConfig {
    /// Number of tree candidates sampled. Default: one per active grid row.
    pub tree_count: Option<usize>,
    /// Number of building footprints sampled. Default: active grid size / 20.
    pub building_count: Option<usize>,
}

/// Immutable configuration for one terrain generation run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    /// Cells per side of the synthesized grid (`N`).
    pub base_grid_size: usize,
    /// Cells per side after upsampling (`M`). Ignored unless `interpolate` is set.
    pub target_grid_size: usize,
    /// World-space extent of the terrain along X and Z.
    pub terrain_size: f32,
    /// Upper clamp for synthesized heights.
    pub max_height: f32,
    /// Seed for every random stream in the pipeline.
    pub seed: u64,
    /// Base relief generator.
    pub relief: ReliefProfile,
    /// Upsample the base grid to `target_grid_size`.
    pub interpolate: bool,
    /// Half-width of the jitter added to each upsampled height.
    pub resample_jitter: f32,
    /// Normal resolution strategy for the grid surface.
    pub normal_mode: NormalMode,
    /// Land-use stamps.
    pub features: FeatureLayout,
    /// Trees and free-standing buildings.
    pub decorations: DecorationConfig,
    /// Requested tessellation level for displacement consumers.
    pub tessellation_level: u32,
}

impl Default for RoadCorridor {
    fn default() -> Self {
        Self {
            center: [0.5, 0.0],
            length: 1.0,
            width: 8,
        }
    }
}

impl Default for WaterBasin {
    fn default() -> Self {
        Self {
            center: [0.25, 0.25],
            radius: 6,
            depth: 1.5,
        }
    }
}

impl Default for LawnPatch {
    fn default() -> Self {
        Self {
            center: [0.75, 0.75],
            radius: 10,
        }
    }
}

impl Default for BuildingPad {
    fn default() -> Self {
        Self {
            origin: [0.25, 0.75],
            width: 6,
            depth: 6,
            height: 10.0,
        }
    }
}

impl Default for FeatureLayout {
    fn default() -> Self {
        Self {
            road: Some(RoadCorridor::default()),
            water: Some(WaterBasin::default()),
            lawn: Some(LawnPatch::default()),
            building: Some(BuildingPad::default()),
        }
    }
}

impl FeatureLayout {
    /// A layout with no stamps at all.
    pub fn none() -> Self {
        Self {
            road: None,
            water: None,
            lawn: None,
            building: None,
        }
    }
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            base_grid_size: 50,
            target_grid_size: 200,
            terrain_size: 100.0,
            max_height: 10.0,
            seed: 42,
            relief: ReliefProfile::default(),
            interpolate: true,
            resample_jitter: 0.05,
            normal_mode: NormalMode::default(),
            features: FeatureLayout::default(),
            decorations: DecorationConfig::default(),
            tessellation_level: 4,
        }
    }
}

impl TerrainConfig {
    /// Lower clamp for synthesized heights.
    pub const MIN_HEIGHT: f32 = -2.0;

    /// Smallest admissible grid size.
    pub const MIN_GRID_SIZE: usize = 2;

    /// Bounds applied by [`Self::tessellation_level`].
    pub const TESSELLATION_RANGE: (u32, u32) = (1, 16);

    /// Check every setting, failing on the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_grid_size < Self::MIN_GRID_SIZE {
            return Err(ConfigError::invalid(
                "base_grid_size",
                format!(
                    "must be at least {}, got {}",
                    Self::MIN_GRID_SIZE,
                    self.base_grid_size
                ),
            ));
        }
        if self.interpolate && self.target_grid_size <= self.base_grid_size {
            return Err(ConfigError::invalid(
                "target_grid_size",
                format!(
                    "must exceed base_grid_size ({}) when interpolating, got {}",
                    self.base_grid_size, self.target_grid_size
                ),
            ));
        }
        if !self.terrain_size.is_finite() || self.terrain_size <= 0.0 {
            return Err(ConfigError::invalid(
                "terrain_size",
                format!("must be positive and finite, got {}", self.terrain_size),
            ));
        }
        if !self.max_height.is_finite() || self.max_height < Self::MIN_HEIGHT {
            return Err(ConfigError::invalid(
                "max_height",
                format!(
                    "must be finite and at least {}, got {}",
                    Self::MIN_HEIGHT,
                    self.max_height
                ),
            ));
        }
        if !self.resample_jitter.is_finite() || self.resample_jitter < 0.0 {
            return Err(ConfigError::invalid(
                "resample_jitter",
                format!("must be non-negative and finite, got {}", self.resample_jitter),
            ));
        }
        self.validate_features()
    }

    fn validate_features(&self) -> Result<(), ConfigError> {
        let layout = &self.features;
        if let Some(road) = &layout.road {
            check_fractions("features.road.center", road.center)?;
            check_extent("features.road.length", road.length)?;
        }
        if let Some(water) = &layout.water {
            check_fractions("features.water.center", water.center)?;
            check_extent("features.water.depth", water.depth)?;
        }
        if let Some(lawn) = &layout.lawn {
            check_fractions("features.lawn.center", lawn.center)?;
        }
        if let Some(building) = &layout.building {
            check_fractions("features.building.origin", building.origin)?;
            if !building.height.is_finite() {
                return Err(ConfigError::invalid(
                    "features.building.height",
                    format!("must be finite, got {}", building.height),
                ));
            }
        }
        Ok(())
    }

    /// Side length of the grid that is actually triangulated.
    pub fn active_grid_size(&self) -> usize {
        if self.interpolate {
            self.target_grid_size
        } else {
            self.base_grid_size
        }
    }

    /// Tessellation level clamped to [`Self::TESSELLATION_RANGE`].
    pub fn tessellation_level(&self) -> u32 {
        let (lo, hi) = Self::TESSELLATION_RANGE;
        self.tessellation_level.clamp(lo, hi)
    }
}

fn check_fractions(field: &'static str, value: [f32; 2]) -> Result<(), ConfigError> {
    if value.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("must be finite, got {value:?}"),
        ))
    }
}

fn check_extent(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("must be non-negative and finite, got {value}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(TerrainConfig::default().validate().is_ok());
    }

    #[test]
    fn test_grid_smaller_than_two_rejected() {
        let config = TerrainConfig {
            base_grid_size: 1,
            interpolate: false,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::Invalid { field: "base_grid_size", .. }),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn test_negative_extent_rejected() {
        let config = TerrainConfig {
            terrain_size: -10.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "terrain_size", .. })
        ));
    }

    #[test]
    fn test_target_must_exceed_base_when_interpolating() {
        let config = TerrainConfig {
            base_grid_size: 50,
            target_grid_size: 50,
            interpolate: true,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "target_grid_size", .. })
        ));

        let config = TerrainConfig {
            interpolate: false,
            ..config
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_negative_water_depth_rejected() {
        let mut config = TerrainConfig::default();
        if let Some(water) = config.features.water.as_mut() {
            water.depth = -1.0;
        }
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "features.water.depth", .. })
        ));
    }

    #[test]
    fn test_active_grid_size_follows_interpolation_flag() {
        let mut config = TerrainConfig::default();
        assert_eq!(config.active_grid_size(), 200);
        config.interpolate = false;
        assert_eq!(config.active_grid_size(), 50);
    }

    #[test]
    fn test_tessellation_level_is_clamped() {
        let mut config = TerrainConfig {
            tessellation_level: 0,
            ..Default::default()
        };
        assert_eq!(config.tessellation_level(), 1);
        config.tessellation_level = 64;
        assert_eq!(config.tessellation_level(), 16);
        config.tessellation_level = 6;
        assert_eq!(config.tessellation_level(), 6);
    }

    #[test]
    fn test_empty_layout_has_no_stamps() {
        let layout = FeatureLayout::none();
        assert!(layout.road.is_none());
        assert!(layout.water.is_none());
        assert!(layout.lawn.is_none());
        assert!(layout.building.is_none());
    }
}

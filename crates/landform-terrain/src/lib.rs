//! Procedural terrain fields: height synthesis, land-use overlays, resampling,
//! decoration placement, and per-element coloring.
//!
//! Everything here works on square [`Grid`]s indexed `[row][col]`. Mesh
//! assembly lives in `landform-mesh`.

mod element;
mod grid;
mod heightmap;
mod heightmap_image;
mod overlay;
mod palette;
mod placement;
mod resample;
mod seed;

pub use element::ElementType;
pub use grid::{Grid, GridError, HeightGrid, HeightRange, TypeGrid};
pub use heightmap::{
    CLASSIC_OCTAVES, FractalParams, HeightFieldSynthesizer, LAYERED_OCTAVES, Octave,
    grid_to_world,
};
pub use heightmap_image::HeightmapImage;
pub use overlay::{
    OverlayReport, Stamp, StampPolicy, admissible_bounds, apply_layout, layout_stamps, stamp,
};
pub use palette::{CANOPY_COLOR, ColorPalette, TRUNK_COLOR};
pub use placement::{
    BuildingSite, DecorationPlan, TREE_HEIGHT_RANGE, TreeSite, footprint_is_clear,
    place_buildings, place_trees, plan_decorations, tree_site_ok,
};
pub use resample::{Resampler, bilinear_sample, nearest_type, resample_grids};
pub use seed::{Stage, derive_stage_seed, det_cos, det_sin, stage_rng, symmetric_jitter};

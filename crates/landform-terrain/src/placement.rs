//! Seeded rejection sampling of decoration sites.
//!
//! Trees and free-standing buildings each draw a fixed number of candidates
//! from their own RNG stream. Candidates on unsuitable ground are dropped;
//! the survivors carry everything the mesh builder needs in world units.

use std::ops::Range;

use landform_config::TerrainConfig;
use rand::Rng;
use tracing::debug;

use crate::element::ElementType;
use crate::grid::{HeightGrid, TypeGrid};
use crate::heightmap::grid_to_world;
use crate::seed::{Stage, stage_rng};

/// Open interval of terrain heights that can host a tree.
pub const TREE_HEIGHT_RANGE: (f32, f32) = (-1.0, 5.0);

const TREE_MARGIN: usize = 2;
const BUILDING_MARGIN: usize = 4;
const BUILDING_SIDE: Range<usize> = 4..8;
const WALL_HEIGHT_MIN: f32 = 3.0;
const WALL_HEIGHT_SPAN: f32 = 4.0;

/// An accepted tree location.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TreeSite {
    pub row: usize,
    pub col: usize,
    /// World X of the trunk axis.
    pub x: f32,
    /// World Z of the trunk axis.
    pub z: f32,
    /// Terrain height at the root.
    pub base: f32,
}

/// An accepted building footprint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BuildingSite {
    pub row: usize,
    pub col: usize,
    /// Cells along the row axis.
    pub width: usize,
    /// Cells along the column axis.
    pub depth: usize,
    pub wall_height: f32,
    /// Lowest terrain height under the footprint.
    pub base: f32,
    /// World `(x, z)` of the footprint center.
    pub center: [f32; 2],
    /// World length of one cell.
    pub cell_size: f32,
}

impl BuildingSite {
    /// World `(x, z)` extent of the walls.
    pub fn footprint(&self) -> [f32; 2] {
        [
            self.width as f32 * self.cell_size,
            self.depth as f32 * self.cell_size,
        ]
    }

    /// World `(x, z)` extent of the roof, half a cell larger than the walls.
    pub fn roof_footprint(&self) -> [f32; 2] {
        [
            (self.width as f32 + 0.5) * self.cell_size,
            (self.depth as f32 + 0.5) * self.cell_size,
        ]
    }
}

/// Returns `true` if a cell of type `element` at height `h` can host a tree.
pub fn tree_site_ok(element: ElementType, h: f32) -> bool {
    let (lo, hi) = TREE_HEIGHT_RANGE;
    element.supports_trees() && h > lo && h < hi
}

/// Returns `true` if no cell of the footprint blocks construction.
///
/// The footprint is clipped to the grid.
pub fn footprint_is_clear(types: &TypeGrid, row: usize, col: usize, width: usize, depth: usize) -> bool {
    let n = types.size();
    (row..(row + width).min(n))
        .all(|r| (col..(col + depth).min(n)).all(|c| !types.get(r, c).blocks_construction()))
}

/// Candidate indices `[margin, size - margin)`, or `None` if empty.
fn sample_range(size: usize, margin: usize) -> Option<Range<usize>> {
    let range = margin..size.saturating_sub(margin);
    (!range.is_empty()).then_some(range)
}

/// Draw `count` tree candidates and keep those on suitable ground.
pub fn place_trees(
    heights: &HeightGrid,
    types: &TypeGrid,
    count: usize,
    seed: u64,
    extent: f32,
) -> Vec<TreeSite> {
    let size = heights.size();
    let Some(range) = sample_range(size, TREE_MARGIN) else {
        return Vec::new();
    };
    let mut rng = stage_rng(seed, Stage::Trees);
    let mut sites = Vec::new();
    for _ in 0..count {
        let row = rng.random_range(range.clone());
        let col = rng.random_range(range.clone());
        let base = heights.get(row, col);
        if !tree_site_ok(types.get(row, col), base) {
            continue;
        }
        let (x, z) = grid_to_world(row, col, size, extent);
        sites.push(TreeSite {
            row,
            col,
            x,
            z,
            base,
        });
    }
    sites
}

/// Draw `count` building footprints and keep those clear of roads and water.
pub fn place_buildings(
    heights: &HeightGrid,
    types: &TypeGrid,
    count: usize,
    seed: u64,
    extent: f32,
) -> Vec<BuildingSite> {
    let size = heights.size();
    let Some(range) = sample_range(size, BUILDING_MARGIN) else {
        return Vec::new();
    };
    let cell_size = extent / size as f32;
    let mut rng = stage_rng(seed, Stage::Buildings);
    let mut sites = Vec::new();
    for _ in 0..count {
        let row = rng.random_range(range.clone());
        let col = rng.random_range(range.clone());
        let width = rng.random_range(BUILDING_SIDE);
        let depth = rng.random_range(BUILDING_SIDE);
        let wall_height = rng.random::<f32>() * WALL_HEIGHT_SPAN + WALL_HEIGHT_MIN;

        if !footprint_is_clear(types, row, col, width, depth) {
            continue;
        }

        let base = (row..(row + width).min(size))
            .flat_map(|r| (col..(col + depth).min(size)).map(move |c| (r, c)))
            .map(|(r, c)| heights.get(r, c))
            .fold(f32::INFINITY, f32::min);
        let center = [
            (row as f32 + width as f32 / 2.0) * cell_size - extent / 2.0,
            (col as f32 + depth as f32 / 2.0) * cell_size - extent / 2.0,
        ];
        sites.push(BuildingSite {
            row,
            col,
            width,
            depth,
            wall_height,
            base,
            center,
            cell_size,
        });
    }
    sites
}

/// Accepted decoration sites for one run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DecorationPlan {
    pub trees: Vec<TreeSite>,
    pub buildings: Vec<BuildingSite>,
    pub tree_candidates: usize,
    pub building_candidates: usize,
}

/// Sample trees and buildings over the active grids.
///
/// Candidate counts come from `config.decorations`, defaulting to one tree
/// per grid row and one building per twenty.
pub fn plan_decorations(config: &TerrainConfig, heights: &HeightGrid, types: &TypeGrid) -> DecorationPlan {
    let size = heights.size();
    let tree_candidates = config.decorations.tree_count.unwrap_or(size);
    let building_candidates = config.decorations.building_count.unwrap_or(size / 20);

    let trees = place_trees(heights, types, tree_candidates, config.seed, config.terrain_size);
    let buildings = place_buildings(heights, types, building_candidates, config.seed, config.terrain_size);

    debug!(
        trees = trees.len(),
        tree_candidates,
        buildings = buildings.len(),
        building_candidates,
        "decoration sites sampled"
    );
    DecorationPlan {
        trees,
        buildings,
        tree_candidates,
        building_candidates,
    }
}

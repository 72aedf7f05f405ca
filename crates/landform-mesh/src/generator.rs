//! The generation pipeline.
//!
//! Synthesis, overlays, resampling, triangulation, decoration, normal
//! resolution and packing run in that order, synchronously, on data owned by
//! one call. Nothing is shared between calls, and equal configurations give
//! byte-identical output.

use landform_config::{ConfigError, TerrainConfig};
use landform_terrain::{
    ColorPalette, DecorationPlan, ElementType, GridError, HeightFieldSynthesizer, HeightGrid,
    HeightRange, HeightmapImage, OverlayReport, Stage, TypeGrid, apply_layout, plan_decorations,
    resample_grids,
};
use tracing::{debug, info, info_span};

use crate::decoration::build_decorations;
use crate::normals::resolve_normals;
use crate::packed::MeshData;
use crate::triangulate::{surface_vertex_count, triangulate_grid};
use crate::vertex::MeshBuilder;

/// Errors that stop a generation run.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The configuration was rejected before any grid work began.
    #[error("invalid terrain configuration: {0}")]
    Config(#[from] ConfigError),

    /// A grid could not be allocated at the requested size.
    #[error("grid construction failed: {0}")]
    Grid(#[from] GridError),
}

/// Generator output: the packed mesh plus the grid it was built from.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainMesh {
    pub mesh: MeshData,
    height_grid: HeightGrid,
    overlays: OverlayReport,
    tree_count: usize,
    building_count: usize,
}

impl TerrainMesh {
    /// The active height grid, row-major.
    ///
    /// Normalize with [`MeshData::height_range`] for displacement textures.
    pub fn height_grid(&self) -> &HeightGrid {
        &self.height_grid
    }

    pub fn height_range(&self) -> HeightRange {
        self.mesh.height_range
    }

    /// RGBA8 encoding of the active height grid.
    pub fn heightmap_image(&self) -> HeightmapImage {
        HeightmapImage::from_grid(&self.height_grid, self.mesh.height_range)
    }

    /// Cells written by each overlay stamp on the base grid.
    pub fn overlays(&self) -> OverlayReport {
        self.overlays
    }

    /// Accepted tree sites.
    pub fn tree_count(&self) -> usize {
        self.tree_count
    }

    /// Accepted building sites.
    pub fn building_count(&self) -> usize {
        self.building_count
    }

    pub fn into_mesh(self) -> MeshData {
        self.mesh
    }
}

/// Validated generator for one [`TerrainConfig`].
#[derive(Clone, Debug)]
pub struct TerrainGenerator {
    config: TerrainConfig,
}

impl TerrainGenerator {
    /// Validate `config`, failing before any grid is allocated.
    pub fn new(config: TerrainConfig) -> Result<Self, GenerateError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Run the whole pipeline once.
    pub fn generate(&self) -> Result<TerrainMesh, GenerateError> {
        let config = &self.config;
        let span = info_span!("generate_terrain", seed = config.seed, normal_mode = ?config.normal_mode);
        let _enter = span.enter();

        let (heights, types, overlays) = self.base_grids()?;
        let (heights, types) = resample_grids(config, heights, types)?;
        let size = heights.size();
        debug!(size, interpolate = config.interpolate, "active grid ready");

        let plan = plan_decorations(config, &heights, &types);
        let mut builder = self.assemble(&heights, &types, &plan);

        resolve_normals(config.normal_mode, builder.surface_mut(), &heights, config.terrain_size);
        debug!(mode = ?config.normal_mode, vertices = builder.surface().len(), "surface normals resolved");

        let mesh = MeshData::pack(builder.vertices(), heights.range());
        info!(
            vertices = mesh.vertex_count,
            triangles = mesh.triangle_count(),
            min_height = mesh.height_range.min,
            max_height = mesh.height_range.max,
            "terrain mesh generated"
        );

        Ok(TerrainMesh {
            mesh,
            height_grid: heights,
            overlays,
            tree_count: plan.trees.len(),
            building_count: plan.buildings.len(),
        })
    }

    /// Synthesize the base grid and stamp the feature layout onto it.
    fn base_grids(&self) -> Result<(HeightGrid, TypeGrid, OverlayReport), GenerateError> {
        let config = &self.config;
        let size = config.base_grid_size;
        let mut heights = HeightFieldSynthesizer::new(config).synthesize(size)?;
        let mut types = TypeGrid::filled(size, ElementType::Land)?;

        let range = heights.range();
        debug!(size, min = range.min, max = range.max, relief = ?config.relief, "base heights synthesized");

        let overlays = apply_layout(&mut heights, &mut types, &config.features, range);
        Ok((heights, types, overlays))
    }

    /// Triangulate the surface and append decoration props.
    fn assemble(&self, heights: &HeightGrid, types: &TypeGrid, plan: &DecorationPlan) -> MeshBuilder {
        let config = &self.config;
        let mut builder = MeshBuilder::with_capacity(surface_vertex_count(heights.size()));

        let mut surface_palette = ColorPalette::new(config.seed, Stage::SurfacePalette);
        triangulate_grid(&mut builder, heights, types, config.terrain_size, &mut surface_palette);

        let mut prop_palette = ColorPalette::new(config.seed, Stage::PropPalette);
        let props = build_decorations(plan, &mut prop_palette);
        debug!(
            trees = plan.trees.len(),
            buildings = plan.buildings.len(),
            vertices = props.len(),
            "decorations built"
        );
        builder.extend_props(&props);
        builder
    }
}

/// Validate `config` and generate a mesh from it.
pub fn generate_terrain_mesh(config: &TerrainConfig) -> Result<TerrainMesh, GenerateError> {
    TerrainGenerator::new(config.clone())?.generate()
}

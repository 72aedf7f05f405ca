//! Mesh assembly: grid triangulation, prop primitives, normal resolution and
//! flat buffer packing, plus the [`TerrainGenerator`] that drives the whole
//! pipeline.

mod decoration;
mod generator;
mod normals;
mod packed;
mod primitives;
mod triangulate;
mod vertex;

pub use decoration::{
    BUILDING_VERTEX_COUNT, CANOPY_RADIUS, ROOF_THICKNESS, TREE_VERTEX_COUNT, TRUNK_HEIGHT,
    TRUNK_WIDTH, build_decorations, push_building, push_tree,
};
pub use generator::{GenerateError, TerrainGenerator, TerrainMesh, generate_terrain_mesh};
pub use normals::{
    POSITION_KEY_SCALE, PositionKey, gradient_field, gradient_normals, resolve_normals,
    smooth_normals,
};
pub use packed::MeshData;
pub use primitives::{
    BOX_UVS, BOX_VERTEX_COUNT, MIN_NORMAL_LENGTH, SPHERE_SECTORS, SPHERE_STACKS,
    SPHERE_VERTEX_COUNT, face_normal, normalize_or_up, push_box, push_sphere,
};
pub use triangulate::{QUAD_CORNERS, surface_corners, surface_vertex_count, triangulate_grid};
pub use vertex::{MeshBuilder, TerrainVertex, UP};

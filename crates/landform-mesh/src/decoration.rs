//! Prop geometry for accepted decoration sites.

use glam::Vec3;
use landform_terrain::{BuildingSite, ColorPalette, DecorationPlan, ElementType, TreeSite};

use crate::primitives::{BOX_VERTEX_COUNT, SPHERE_VERTEX_COUNT, push_box, push_sphere};
use crate::vertex::TerrainVertex;

pub const TRUNK_WIDTH: f32 = 0.3;
pub const TRUNK_HEIGHT: f32 = 2.0;
pub const CANOPY_RADIUS: f32 = 1.2;
pub const ROOF_THICKNESS: f32 = 1.0;

/// Vertices emitted per tree.
pub const TREE_VERTEX_COUNT: usize = BOX_VERTEX_COUNT + SPHERE_VERTEX_COUNT;

/// Vertices emitted per building.
pub const BUILDING_VERTEX_COUNT: usize = 2 * BOX_VERTEX_COUNT;

/// Trunk box plus a canopy sphere resting on top of it.
pub fn push_tree(out: &mut Vec<TerrainVertex>, site: &TreeSite, palette: &mut ColorPalette) {
    let trunk_center = Vec3::new(site.x, site.base + TRUNK_HEIGHT / 2.0, site.z);
    let trunk_half = Vec3::new(TRUNK_WIDTH / 2.0, TRUNK_HEIGHT / 2.0, TRUNK_WIDTH / 2.0);
    let trunk_color = Vec3::from_array(palette.color(ElementType::Trunk));
    push_box(out, trunk_center, trunk_half, ElementType::Trunk, trunk_color);

    let canopy_center = Vec3::new(site.x, site.base + TRUNK_HEIGHT + CANOPY_RADIUS / 2.0, site.z);
    let canopy_color = Vec3::from_array(palette.color(ElementType::Canopy));
    push_sphere(out, canopy_center, CANOPY_RADIUS, ElementType::Canopy, canopy_color);
}

/// Wall box over the footprint with a slightly wider roof slab on top.
pub fn push_building(out: &mut Vec<TerrainVertex>, site: &BuildingSite, palette: &mut ColorPalette) {
    let [cx, cz] = site.center;
    let [fx, fz] = site.footprint();
    let wall_center = Vec3::new(cx, site.base + site.wall_height / 2.0, cz);
    let wall_half = Vec3::new(fx / 2.0, site.wall_height / 2.0, fz / 2.0);
    let wall_color = Vec3::from_array(palette.color(ElementType::HouseWall));
    push_box(out, wall_center, wall_half, ElementType::HouseWall, wall_color);

    let [rx, rz] = site.roof_footprint();
    let roof_center = Vec3::new(cx, site.base + site.wall_height + ROOF_THICKNESS / 2.0, cz);
    let roof_half = Vec3::new(rx / 2.0, ROOF_THICKNESS / 2.0, rz / 2.0);
    let roof_color = Vec3::from_array(palette.color(ElementType::Roof));
    push_box(out, roof_center, roof_half, ElementType::Roof, roof_color);
}

/// Geometry for every site in `plan`: trees first, then buildings.
pub fn build_decorations(plan: &DecorationPlan, palette: &mut ColorPalette) -> Vec<TerrainVertex> {
    let mut out = Vec::with_capacity(
        plan.trees.len() * TREE_VERTEX_COUNT + plan.buildings.len() * BUILDING_VERTEX_COUNT,
    );
    for tree in &plan.trees {
        push_tree(&mut out, tree, palette);
    }
    for building in &plan.buildings {
        push_building(&mut out, building, palette);
    }
    out
}

//! Grid triangulation.
//!
//! Every cell `(i, j)` with `i, j < size - 1` becomes two triangles:
//! `(i,j) (i+1,j) (i,j+1)` and `(i+1,j) (i+1,j+1) (i,j+1)`.

use glam::Vec3;
use landform_terrain::{ColorPalette, HeightGrid, TypeGrid, grid_to_world};

use crate::vertex::{MeshBuilder, TerrainVertex, UP};

/// Corner offsets of one cell's two triangles, in emission order.
pub const QUAD_CORNERS: [(usize, usize); 6] = [(0, 0), (1, 0), (0, 1), (1, 0), (1, 1), (0, 1)];

/// Vertices emitted for a `size × size` grid: `6 · (size - 1)²`.
pub fn surface_vertex_count(size: usize) -> usize {
    let cells = size.saturating_sub(1);
    6 * cells * cells
}

/// Grid coordinates of every surface vertex, in emission order.
pub fn surface_corners(size: usize) -> impl Iterator<Item = (usize, usize)> {
    let cells = size.saturating_sub(1);
    (0..cells).flat_map(move |i| {
        (0..cells).flat_map(move |j| QUAD_CORNERS.iter().map(move |&(di, dj)| (i + di, j + dj)))
    })
}

/// Emit the grid surface into `builder`.
///
/// Colors come from `palette` in emission order; normals are left at [`UP`].
pub fn triangulate_grid(
    builder: &mut MeshBuilder,
    heights: &HeightGrid,
    types: &TypeGrid,
    extent: f32,
    palette: &mut ColorPalette,
) {
    let size = heights.size();
    let mut corners = surface_corners(size);
    while let (Some(a), Some(b), Some(c)) = (corners.next(), corners.next(), corners.next()) {
        let tri = [a, b, c].map(|(row, col)| {
            let (x, z) = grid_to_world(row, col, size, extent);
            let element = types.get(row, col);
            let color = Vec3::from_array(palette.color(element));
            TerrainVertex::new(Vec3::new(x, heights.get(row, col), z), color, UP, element)
        });
        builder.push_surface_triangle(tri);
    }
}

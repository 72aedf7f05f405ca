//! Normal resolution for the grid surface.
//!
//! Props keep the flat face normals they were emitted with. The surface is
//! resolved according to [`NormalMode`]:
//!
//! - `Flat` leaves the straight-up placeholder.
//! - `Smooth` averages face normals over every vertex sharing a position.
//! - `Gradient` estimates the slope of the height field with a Sobel filter.

use glam::Vec3;
use hashbrown::HashMap;
use landform_config::NormalMode;
use landform_terrain::{Grid, HeightGrid};

use crate::primitives::{face_normal, normalize_or_up};
use crate::triangulate::surface_corners;
use crate::vertex::TerrainVertex;

/// Decimal digits kept when matching vertex positions.
pub const POSITION_KEY_SCALE: f32 = 1e4;

/// A vertex position quantized to [`POSITION_KEY_SCALE`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PositionKey([i64; 3]);

impl PositionKey {
    pub fn new(position: Vec3) -> Self {
        let q = (position * POSITION_KEY_SCALE).round();
        Self([q.x as i64, q.y as i64, q.z as i64])
    }
}

#[derive(Default)]
struct NormalBucket {
    sum: Vec3,
    count: u32,
}

/// Flip `n` into the upper hemisphere.
///
/// Grid triangles wind so that `e1 × e2` faces down; a height field's
/// surface normal always faces up.
#[inline]
fn facing_up(n: Vec3) -> Vec3 {
    if n.y < 0.0 { -n } else { n }
}

/// Average face normals across vertices that share a position.
///
/// Each bucket's sum is divided by its contribution count and renormalized;
/// buckets whose average is shorter than the fallback threshold get `+Y`.
pub fn smooth_normals(surface: &mut [TerrainVertex]) {
    let mut buckets: HashMap<PositionKey, NormalBucket> = HashMap::with_capacity(surface.len() / 3);

    for tri in surface.chunks_exact(3) {
        let normal = facing_up(face_normal(tri[0].position, tri[1].position, tri[2].position));
        for vertex in tri {
            let bucket = buckets.entry(PositionKey::new(vertex.position)).or_default();
            bucket.sum += normal;
            bucket.count += 1;
        }
    }

    for vertex in surface.iter_mut() {
        if let Some(bucket) = buckets.get(&PositionKey::new(vertex.position)) {
            vertex.normal = normalize_or_up(bucket.sum / bucket.count as f32);
        }
    }
}

/// Sobel estimate of the surface normal at every grid cell.
///
/// Border cells, which lack a full 3×3 neighbourhood, face straight up.
/// Gradients are taken per world unit, using `cell_size` as the spacing.
pub fn gradient_field(heights: &HeightGrid, cell_size: f32) -> Grid<Vec3> {
    let size = heights.size();
    let h = |r: usize, c: usize| heights.get(r, c);
    heights.map_indexed(|r, c, _| {
        if r == 0 || c == 0 || r + 1 >= size || c + 1 >= size {
            return Vec3::Y;
        }
        let dx = (h(r + 1, c - 1) + 2.0 * h(r + 1, c) + h(r + 1, c + 1)
            - h(r - 1, c - 1)
            - 2.0 * h(r - 1, c)
            - h(r - 1, c + 1))
            / 8.0;
        let dz = (h(r - 1, c + 1) + 2.0 * h(r, c + 1) + h(r + 1, c + 1)
            - h(r - 1, c - 1)
            - 2.0 * h(r, c - 1)
            - h(r + 1, c - 1))
            / 8.0;
        normalize_or_up(Vec3::new(-dx / cell_size, 1.0, -dz / cell_size))
    })
}

/// Write Sobel normals onto surface vertices emitted for `heights`.
pub fn gradient_normals(surface: &mut [TerrainVertex], heights: &HeightGrid, extent: f32) {
    let field = gradient_field(heights, extent / heights.size() as f32);
    for (vertex, (row, col)) in surface.iter_mut().zip(surface_corners(heights.size())) {
        vertex.normal = field.get(row, col);
    }
}

/// Resolve surface normals in place.
pub fn resolve_normals(
    mode: NormalMode,
    surface: &mut [TerrainVertex],
    heights: &HeightGrid,
    extent: f32,
) {
    match mode {
        NormalMode::Flat => {}
        NormalMode::Smooth => smooth_normals(surface),
        NormalMode::Gradient => gradient_normals(surface, heights, extent),
    }
}

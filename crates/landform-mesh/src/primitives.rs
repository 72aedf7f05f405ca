//! Box and sphere builders for decoration props.
//!
//! Both emit independent triangles with a flat per-face normal taken from the
//! cross product of the triangle's two edges. Winding is counter-clockwise
//! seen from outside, so every face normal points away from the solid.

use glam::{Vec2, Vec3};
use landform_terrain::{ElementType, det_cos, det_sin};

use crate::vertex::{TerrainVertex, UP};

/// Shortest vector that is still normalized instead of replaced by [`UP`].
pub const MIN_NORMAL_LENGTH: f32 = 1e-4;

/// Latitude bands of a sphere.
pub const SPHERE_STACKS: usize = 8;

/// Longitude bands of a sphere.
pub const SPHERE_SECTORS: usize = 8;

/// Vertices emitted by one [`push_box`] call.
pub const BOX_VERTEX_COUNT: usize = 36;

/// Vertices emitted by one [`push_sphere`] call.
pub const SPHERE_VERTEX_COUNT: usize = SPHERE_STACKS * SPHERE_SECTORS * 6;

/// Corner sign pattern: front face (+Z) first, then back face (-Z).
const BOX_CORNERS: [[f32; 3]; 8] = [
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
];

/// Two triangles per face: front, back, left, right, top, bottom.
const BOX_FACES: [[usize; 6]; 6] = [
    [0, 1, 2, 0, 2, 3],
    [5, 4, 7, 5, 7, 6],
    [4, 0, 3, 4, 3, 7],
    [1, 5, 6, 1, 6, 2],
    [3, 2, 6, 3, 6, 7],
    [4, 5, 1, 4, 1, 0],
];

/// The unit UV square, in face vertex order.
pub const BOX_UVS: [Vec2; 6] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 1.0),
];

/// Normalize `v`, falling back to [`UP`] when it is too short.
#[inline]
pub fn normalize_or_up(v: Vec3) -> Vec3 {
    let len = v.length();
    if len > MIN_NORMAL_LENGTH { v / len } else { UP }
}

/// Unit normal of triangle `(a, b, c)`: `(b - a) × (c - a)`.
#[inline]
pub fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    normalize_or_up((b - a).cross(c - a))
}

/// Emit an axis-aligned box as 12 UV-mapped triangles.
pub fn push_box(
    out: &mut Vec<TerrainVertex>,
    center: Vec3,
    half_extents: Vec3,
    element: ElementType,
    color: Vec3,
) {
    let corners = BOX_CORNERS.map(|sign| center + Vec3::from_array(sign) * half_extents);
    for face in BOX_FACES {
        for (tri, uvs) in face.chunks_exact(3).zip(BOX_UVS.chunks_exact(3)) {
            let [a, b, c] = [corners[tri[0]], corners[tri[1]], corners[tri[2]]];
            let normal = face_normal(a, b, c);
            for (position, uv) in [a, b, c].into_iter().zip(uvs) {
                out.push(TerrainVertex::new(position, color, normal, element).with_uv(*uv));
            }
        }
    }
}

/// Point at polar angle `phi` and azimuth `theta` on a sphere.
#[inline]
fn sphere_point(center: Vec3, radius: f32, phi: f64, theta: f64) -> Vec3 {
    let offset = Vec3::new(
        (det_sin(phi) * det_cos(theta)) as f32,
        det_cos(phi) as f32,
        (det_sin(phi) * det_sin(theta)) as f32,
    );
    center + offset * radius
}

/// Emit a UV sphere of [`SPHERE_STACKS`] × [`SPHERE_SECTORS`] quads, each
/// split into two triangles.
///
/// Triangles collapsed at the poles fall back to an [`UP`] normal.
pub fn push_sphere(
    out: &mut Vec<TerrainVertex>,
    center: Vec3,
    radius: f32,
    element: ElementType,
    color: Vec3,
) {
    let stack_step = std::f64::consts::PI / SPHERE_STACKS as f64;
    let sector_step = std::f64::consts::TAU / SPHERE_SECTORS as f64;
    for stack in 0..SPHERE_STACKS {
        let phi = stack as f64 * stack_step;
        let next_phi = phi + stack_step;
        for sector in 0..SPHERE_SECTORS {
            let theta = sector as f64 * sector_step;
            let next_theta = theta + sector_step;

            let p0 = sphere_point(center, radius, phi, theta);
            let p1 = sphere_point(center, radius, phi, next_theta);
            let p2 = sphere_point(center, radius, next_phi, next_theta);
            let p3 = sphere_point(center, radius, next_phi, theta);

            for [a, b, c] in [[p0, p1, p2], [p0, p2, p3]] {
                let normal = face_normal(a, b, c);
                for position in [a, b, c] {
                    out.push(TerrainVertex::new(position, color, normal, element));
                }
            }
        }
    }
}

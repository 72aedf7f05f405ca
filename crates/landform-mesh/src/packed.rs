//! Flat attribute buffers handed to a renderer.
//!
//! [`MeshData`] stores each attribute in its own array (positions, colors,
//! normals, texture coordinates, element codes) rather than interleaving them
//! per vertex. Every array can be viewed as bytes for zero-copy upload.

use landform_terrain::{ElementType, HeightRange};

use crate::vertex::TerrainVertex;

/// Immutable packed mesh.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshData {
    /// `3 · vertex_count` floats.
    pub positions: Vec<f32>,
    /// `3 · vertex_count` floats.
    pub colors: Vec<f32>,
    /// `3 · vertex_count` floats.
    pub normals: Vec<f32>,
    /// `2 · vertex_count` floats.
    pub tex_coords: Vec<f32>,
    /// One [`ElementType`] code per vertex.
    pub types: Vec<i32>,
    pub vertex_count: usize,
    /// Elevation range of the active height grid.
    pub height_range: HeightRange,
}

impl MeshData {
    /// Pack `vertices` in order.
    pub fn pack(vertices: &[TerrainVertex], height_range: HeightRange) -> Self {
        let n = vertices.len();
        let mut positions = Vec::with_capacity(n * 3);
        let mut colors = Vec::with_capacity(n * 3);
        let mut normals = Vec::with_capacity(n * 3);
        let mut tex_coords = Vec::with_capacity(n * 2);
        let mut types = Vec::with_capacity(n);

        for v in vertices {
            positions.extend_from_slice(&v.position.to_array());
            colors.extend_from_slice(&v.color.to_array());
            normals.extend_from_slice(&v.normal.to_array());
            tex_coords.extend_from_slice(&v.uv.to_array());
            types.push(v.element.code());
        }

        Self {
            positions,
            colors,
            normals,
            tex_coords,
            types,
            vertex_count: n,
            height_range,
        }
    }

    /// Returns `true` if the mesh contains no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertex_count == 0
    }

    /// Returns the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.vertex_count / 3
    }

    /// Number of vertices tagged with `element`.
    pub fn count_of(&self, element: ElementType) -> usize {
        let code = element.code();
        self.types.iter().filter(|&&t| t == code).count()
    }

    pub fn position(&self, index: usize) -> [f32; 3] {
        let i = index * 3;
        [self.positions[i], self.positions[i + 1], self.positions[i + 2]]
    }

    pub fn normal(&self, index: usize) -> [f32; 3] {
        let i = index * 3;
        [self.normals[i], self.normals[i + 1], self.normals[i + 2]]
    }

    /// Position data as bytes for GPU upload (zero-copy).
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Color data as bytes for GPU upload (zero-copy).
    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }

    /// Normal data as bytes for GPU upload (zero-copy).
    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }

    /// Texture-coordinate data as bytes for GPU upload (zero-copy).
    pub fn tex_coord_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.tex_coords)
    }

    /// Element codes as bytes for GPU upload (zero-copy).
    pub fn type_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.types)
    }

    /// Total size of all attribute buffers in bytes.
    pub fn buffer_bytes(&self) -> usize {
        self.position_bytes().len()
            + self.color_bytes().len()
            + self.normal_bytes().len()
            + self.tex_coord_bytes().len()
            + self.type_bytes().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3};

    fn sample() -> Vec<TerrainVertex> {
        vec![
            TerrainVertex::new(Vec3::new(1.0, 2.0, 3.0), Vec3::X, Vec3::Y, ElementType::Road),
            TerrainVertex::new(Vec3::new(4.0, 5.0, 6.0), Vec3::Y, Vec3::Z, ElementType::Land)
                .with_uv(Vec2::new(1.0, 0.0)),
            TerrainVertex::new(Vec3::new(7.0, 8.0, 9.0), Vec3::Z, Vec3::X, ElementType::Road),
        ]
    }

    #[test]
    fn test_arrays_sized_per_attribute() {
        let mesh = MeshData::pack(&sample(), HeightRange::new(-1.0, 4.0));
        assert_eq!(mesh.vertex_count, 3);
        assert_eq!(mesh.positions.len(), 9);
        assert_eq!(mesh.colors.len(), 9);
        assert_eq!(mesh.normals.len(), 9);
        assert_eq!(mesh.tex_coords.len(), 6);
        assert_eq!(mesh.types.len(), 3);
        assert_eq!(mesh.height_range, HeightRange::new(-1.0, 4.0));
    }

    #[test]
    fn test_attributes_are_not_interleaved() {
        let mesh = MeshData::pack(&sample(), HeightRange::new(0.0, 0.0));
        assert_eq!(mesh.positions, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        assert_eq!(mesh.tex_coords, vec![0.0, 0.0, 1.0, 0.0, 0.0, 0.0]);
        assert_eq!(mesh.types, vec![1, 0, 1]);
        assert_eq!(mesh.position(1), [4.0, 5.0, 6.0]);
        assert_eq!(mesh.normal(2), [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_statistics() {
        let mesh = MeshData::pack(&sample(), HeightRange::new(0.0, 0.0));
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.count_of(ElementType::Road), 2);
        assert_eq!(mesh.count_of(ElementType::Roof), 0);
        assert!(!mesh.is_empty());
    }

    #[test]
    fn test_byte_views() {
        let mesh = MeshData::pack(&sample(), HeightRange::new(0.0, 0.0));
        assert_eq!(mesh.position_bytes().len(), 9 * 4);
        assert_eq!(mesh.type_bytes().len(), 3 * 4);
        assert_eq!(mesh.buffer_bytes(), (9 + 9 + 9 + 6 + 3) * 4);
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = MeshData::pack(&[], HeightRange::EMPTY);
        assert!(mesh.is_empty());
        assert_eq!(mesh.triangle_count(), 0);
        assert!(mesh.position_bytes().is_empty());
    }
}

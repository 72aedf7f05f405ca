//! Transient per-vertex record used while assembling a mesh.

use glam::{Vec2, Vec3};
use landform_terrain::ElementType;

/// Placeholder normal given to grid vertices before resolution.
pub const UP: Vec3 = Vec3::Y;

/// One emitted vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerrainVertex {
    /// World-space position.
    pub position: Vec3,
    /// Linear RGB color.
    pub color: Vec3,
    /// Unit normal, or [`UP`] until resolved.
    pub normal: Vec3,
    /// Texture coordinates. `(0, 0)` unless the face is UV-mapped.
    pub uv: Vec2,
    pub element: ElementType,
}

impl TerrainVertex {
    pub fn new(position: Vec3, color: Vec3, normal: Vec3, element: ElementType) -> Self {
        Self {
            position,
            color,
            normal,
            uv: Vec2::ZERO,
            element,
        }
    }

    pub fn with_uv(mut self, uv: Vec2) -> Self {
        self.uv = uv;
        self
    }
}

/// Growing vertex list, split into the grid surface and decoration props.
///
/// Surface vertices always precede prop vertices so normal resolution can
/// address the surface as one contiguous slice.
#[derive(Clone, Debug, Default)]
pub struct MeshBuilder {
    vertices: Vec<TerrainVertex>,
    surface_len: usize,
}

impl MeshBuilder {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(capacity),
            surface_len: 0,
        }
    }

    /// Append one surface triangle.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if props were already pushed.
    pub fn push_surface_triangle(&mut self, tri: [TerrainVertex; 3]) {
        debug_assert_eq!(self.surface_len, self.vertices.len());
        self.vertices.extend_from_slice(&tri);
        self.surface_len = self.vertices.len();
    }

    /// Append prop vertices, whole triangles only.
    pub fn extend_props(&mut self, props: &[TerrainVertex]) {
        debug_assert_eq!(props.len() % 3, 0);
        self.vertices.extend_from_slice(props);
    }

    /// Grid-surface vertices.
    pub fn surface_mut(&mut self) -> &mut [TerrainVertex] {
        &mut self.vertices[..self.surface_len]
    }

    pub fn surface(&self) -> &[TerrainVertex] {
        &self.vertices[..self.surface_len]
    }

    /// Decoration vertices.
    pub fn props(&self) -> &[TerrainVertex] {
        &self.vertices[self.surface_len..]
    }

    pub fn vertices(&self) -> &[TerrainVertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex(x: f32, element: ElementType) -> TerrainVertex {
        TerrainVertex::new(Vec3::new(x, 0.0, 0.0), Vec3::ONE, UP, element)
    }

    #[test]
    fn test_surface_and_props_split() {
        let mut builder = MeshBuilder::default();
        builder.push_surface_triangle([vertex(0.0, ElementType::Land); 3]);
        builder.push_surface_triangle([vertex(1.0, ElementType::Road); 3]);
        builder.extend_props(&[vertex(2.0, ElementType::Trunk); 3]);

        assert_eq!(builder.len(), 9);
        assert_eq!(builder.surface().len(), 6);
        assert_eq!(builder.props().len(), 3);
        assert!(builder.props().iter().all(|v| v.element == ElementType::Trunk));
    }

    #[test]
    fn test_default_uv_is_zero() {
        let v = vertex(0.0, ElementType::Land);
        assert_eq!(v.uv, Vec2::ZERO);
        assert_eq!(v.with_uv(Vec2::ONE).uv, Vec2::ONE);
    }
}

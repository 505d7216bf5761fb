//! Vertex formats
//!
//! Attribute offsets are computed with `std::mem::offset_of!` so they stay
//! correct if a struct's layout changes.

use spot_core::MeshData;

/// Creates a vertex attribute with the offset calculated from the struct field.
#[macro_export]
macro_rules! vertex_attr {
    ($struct:ty, $field:ident, $location:expr, $format:ident) => {
        wgpu::VertexAttribute {
            offset: std::mem::offset_of!($struct, $field) as u64,
            shader_location: $location,
            format: wgpu::VertexFormat::$format,
        }
    };
}

/// Vertex for lit, optionally textured meshes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// Vertex position in local space.
    pub position: [f32; 3],
    /// Vertex normal vector.
    pub normal: [f32; 3],
    /// Texture coordinates.
    pub uv: [f32; 2],
}

impl MeshVertex {
    /// Vertex attribute descriptors for the shader.
    pub const ATTRIBUTES: &'static [wgpu::VertexAttribute] = &[
        vertex_attr!(MeshVertex, position, 0, Float32x3),
        vertex_attr!(MeshVertex, normal, 1, Float32x3),
        vertex_attr!(MeshVertex, uv, 2, Float32x2),
    ];

    /// Returns the vertex buffer layout for this vertex type.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: Self::ATTRIBUTES,
        }
    }

    /// Interleave a mesh's attributes
    ///
    /// Missing normals or UVs are filled with +Z and zero respectively.
    pub fn from_mesh(mesh: &MeshData) -> Vec<Self> {
        mesh.positions
            .iter()
            .enumerate()
            .map(|(i, &position)| Self {
                position,
                normal: mesh.normals.get(i).copied().unwrap_or([0.0, 0.0, 1.0]),
                uv: mesh.uvs.get(i).copied().unwrap_or([0.0, 0.0]),
            })
            .collect()
    }
}

/// Position + color vertex for line geometry.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    /// Vertex position in world space.
    pub position: [f32; 3],
    /// Vertex color (linear RGB).
    pub color: [f32; 3],
}

impl LineVertex {
    /// Vertex attribute descriptors for the shader.
    pub const ATTRIBUTES: &'static [wgpu::VertexAttribute] = &[
        vertex_attr!(LineVertex, position, 0, Float32x3),
        vertex_attr!(LineVertex, color, 1, Float32x3),
    ];

    /// Returns the vertex buffer layout for this vertex type.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: Self::ATTRIBUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spot_core::primitive::generate_plane_mesh;

    #[test]
    fn test_attribute_offsets() {
        assert_eq!(MeshVertex::ATTRIBUTES[1].offset, 12);
        assert_eq!(MeshVertex::ATTRIBUTES[2].offset, 24);
        assert_eq!(std::mem::size_of::<MeshVertex>(), 32);
        assert_eq!(LineVertex::ATTRIBUTES[1].offset, 12);
    }

    #[test]
    fn test_from_mesh_interleaves() {
        let mesh = generate_plane_mesh(2.0, 2.0);
        let vertices = MeshVertex::from_mesh(&mesh);
        assert_eq!(vertices.len(), mesh.vertex_count());
        assert_eq!(vertices[0].position, mesh.positions[0]);
        assert_eq!(vertices[0].uv, mesh.uvs[0]);
    }
}

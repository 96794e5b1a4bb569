//! Vertex format for tessellated strokes.
//!
//! The layout is consumed verbatim by the GPU: position (3 × f32) immediately
//! followed by color (4 × f32), 28-byte stride.

use bytemuck::{Pod, Zeroable};
use filament_core::Color;
use glam::Vec3;
use static_assertions::const_assert_eq;

/// Vertex for stroked geometry.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Position in world space
    pub position: [f32; 3],
    /// Straight-alpha RGBA color
    pub color: [f32; 4],
}

const_assert_eq!(std::mem::size_of::<Vertex>(), 28);

impl Vertex {
    /// Create a new vertex.
    pub fn new(position: Vec3, color: Color) -> Self {
        Self {
            position: position.to_array(),
            color: color.to_array(),
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn alpha(&self) -> f32 {
        self.color[3]
    }

    /// Get the WGPU vertex buffer layout.
    pub fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: 12,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Output from tessellation: vertices and indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TessellatedMesh<V> {
    /// Vertex data
    pub vertices: Vec<V>,
    /// Index data (triangles)
    pub indices: Vec<u32>,
}

/// The mesh of one polyline, or of a whole batch.
pub type StrokeMesh = TessellatedMesh<Vertex>;

impl<V> TessellatedMesh<V> {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Create a mesh with given vertices and indices.
    pub fn from_data(vertices: Vec<V>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Check if the mesh is empty.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.indices.is_empty()
    }

    /// Get the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of indices.
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Get the number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate over triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Clear all data.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }
}

impl StrokeMesh {
    /// Signed area of a triangle projected on the XY plane (positive = CCW).
    pub fn signed_area(&self, [a, b, c]: [u32; 3]) -> f32 {
        let a = self.vertices[a as usize].position();
        let b = self.vertices[b as usize].position();
        let c = self.vertices[c as usize].position();
        (b - a).truncate().perp_dot((c - a).truncate()) * 0.5
    }
}

//! Concatenated geometry of many polylines, ready for one indexed draw.

use crate::vertex::{StrokeMesh, Vertex};

/// Vertices and indices of every live polyline, back to front.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batch {
    mesh: StrokeMesh,
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `mesh`, offsetting its indices by the vertices already present.
    pub fn append(&mut self, mesh: &StrokeMesh) {
        let offset = self.mesh.vertices.len() as u32;
        self.mesh.vertices.extend_from_slice(&mesh.vertices);
        self.mesh
            .indices
            .extend(mesh.indices.iter().map(|&index| index + offset));
    }

    pub fn clear(&mut self) {
        self.mesh.clear();
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.mesh.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.mesh.indices
    }

    pub fn mesh(&self) -> &StrokeMesh {
        &self.mesh
    }

    pub fn is_empty(&self) -> bool {
        self.mesh.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.mesh.triangle_count()
    }

    /// Number of indices the draw call consumes (`3 × triangle_count`).
    pub fn index_count(&self) -> u32 {
        self.mesh.index_count() as u32
    }
}

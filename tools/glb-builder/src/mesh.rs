//! High-level mesh construction

use crate::buffer::{AccessorIndex, BufferBuilder};
use gltf_json::mesh::Mode;

/// Accessors for one primitive of a mesh
#[derive(Debug, Clone)]
pub struct PrimitiveAccessors {
    pub indices: AccessorIndex,
    pub material: Option<u32>,
    pub mode: Mode,
}

/// Accessor indices for a mesh
#[derive(Debug, Clone)]
pub struct MeshAccessors {
    pub positions: AccessorIndex,
    pub normals: Option<AccessorIndex>,
    pub primitives: Vec<PrimitiveAccessors>,
}

struct PrimitiveData {
    indices: Vec<u32>,
    material: Option<u32>,
    mode: Mode,
}

/// Builder for mesh data
///
/// All primitives share one vertex stream; each carries its own index list,
/// material and topology.
pub struct MeshBuilder {
    positions: Vec<[f32; 3]>,
    normals: Option<Vec<[f32; 3]>>,
    primitives: Vec<PrimitiveData>,
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            normals: None,
            primitives: Vec::new(),
        }
    }

    /// Set positions (required)
    pub fn positions(mut self, positions: &[[f32; 3]]) -> Self {
        self.positions = positions.to_vec();
        self
    }

    /// Set normals (optional)
    pub fn normals(mut self, normals: &[[f32; 3]]) -> Self {
        self.normals = Some(normals.to_vec());
        self
    }

    /// Add a triangle-list primitive
    pub fn triangles(self, indices: &[u32], material: Option<u32>) -> Self {
        self.primitive(indices, material, Mode::Triangles)
    }

    /// Add a closed polyline primitive
    pub fn line_loop(self, indices: &[u32], material: Option<u32>) -> Self {
        self.primitive(indices, material, Mode::LineLoop)
    }

    pub fn primitive(mut self, indices: &[u32], material: Option<u32>, mode: Mode) -> Self {
        self.primitives.push(PrimitiveData {
            indices: indices.to_vec(),
            material,
            mode,
        });
        self
    }

    /// Build and pack into buffer
    pub fn build(self, buffer: &mut BufferBuilder) -> MeshAccessors {
        let positions = buffer.pack_positions(&self.positions);
        let normals = self.normals.as_ref().map(|n| buffer.pack_vec3(n));
        let primitives = self
            .primitives
            .iter()
            .map(|p| PrimitiveAccessors {
                indices: buffer.pack_indices_u32(&p.indices),
                material: p.material,
                mode: p.mode,
            })
            .collect();

        MeshAccessors {
            positions,
            normals,
            primitives,
        }
    }
}

impl Default for MeshBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//! GLTF document construction

use crate::MeshAccessors;
use gltf_json as json;
use gltf_json::validation::Checked::Valid;
use std::collections::BTreeMap;

/// Metallic-roughness material description
#[derive(Debug, Clone)]
pub struct MaterialDesc {
    pub name: String,
    pub base_color: [f32; 4],
    pub metallic: f32,
    pub roughness: f32,
    pub extras: json::extras::Extras,
}

/// Builder for complete GLTF documents
pub struct GltfBuilder {
    nodes: Vec<json::Node>,
    meshes: Vec<json::Mesh>,
    materials: Vec<json::Material>,
    scenes: Vec<json::Scene>,
    buffer_byte_length: u64,
}

impl GltfBuilder {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            meshes: Vec::new(),
            materials: Vec::new(),
            scenes: Vec::new(),
            buffer_byte_length: 0,
        }
    }

    /// Set buffer byte length (required before building)
    pub fn buffer_byte_length(mut self, length: u64) -> Self {
        self.buffer_byte_length = length;
        self
    }

    /// Add a node
    pub fn add_node(mut self, node: json::Node) -> Self {
        self.nodes.push(node);
        self
    }

    /// Get the current node count
    pub fn node_count(&self) -> u32 {
        self.nodes.len() as u32
    }

    /// Add a material; indices follow insertion order
    pub fn add_material(mut self, desc: MaterialDesc) -> Self {
        self.materials.push(json::Material {
            name: Some(desc.name),
            pbr_metallic_roughness: json::material::PbrMetallicRoughness {
                base_color_factor: json::material::PbrBaseColorFactor(desc.base_color),
                metallic_factor: json::material::StrengthFactor(desc.metallic),
                roughness_factor: json::material::StrengthFactor(desc.roughness),
                ..Default::default()
            },
            extras: desc.extras,
            ..Default::default()
        });
        self
    }

    /// Add a mesh with one glTF primitive per accessor group
    pub fn add_mesh_from_accessors(mut self, name: &str, accessors: &MeshAccessors) -> Self {
        let mut attributes = BTreeMap::new();
        attributes.insert(
            Valid(json::mesh::Semantic::Positions),
            accessors.positions.as_json_index(),
        );

        if let Some(normals) = accessors.normals {
            attributes.insert(
                Valid(json::mesh::Semantic::Normals),
                normals.as_json_index(),
            );
        }

        let primitives = accessors
            .primitives
            .iter()
            .map(|p| json::mesh::Primitive {
                attributes: attributes.clone(),
                extensions: Default::default(),
                extras: Default::default(),
                indices: Some(p.indices.as_json_index()),
                material: p.material.map(json::Index::new),
                mode: Valid(p.mode),
                targets: None,
            })
            .collect();

        self.meshes.push(json::Mesh {
            extensions: Default::default(),
            extras: Default::default(),
            name: Some(name.to_string()),
            primitives,
            weights: None,
        });

        self
    }

    /// Get the index of the last added mesh
    pub fn last_mesh_index(&self) -> Option<json::Index<json::Mesh>> {
        if self.meshes.is_empty() {
            None
        } else {
            Some(json::Index::new(self.meshes.len() as u32 - 1))
        }
    }

    /// Add a scene
    pub fn add_scene(mut self, name: &str, root_nodes: &[u32]) -> Self {
        self.scenes.push(json::Scene {
            extensions: Default::default(),
            extras: Default::default(),
            name: Some(name.to_string()),
            nodes: root_nodes.iter().map(|n| json::Index::new(*n)).collect(),
        });
        self
    }

    /// Build final GLTF Root (requires buffer views and accessors from BufferBuilder)
    pub fn build(
        self,
        buffer_views: &[json::buffer::View],
        accessors: &[json::Accessor],
        generator: &str,
    ) -> json::Root {
        let buffers = vec![json::Buffer {
            byte_length: self.buffer_byte_length.into(),
            extensions: Default::default(),
            extras: Default::default(),
            name: None,
            uri: None,
        }];

        json::Root {
            accessors: accessors.to_vec(),
            animations: Vec::new(),
            asset: json::Asset {
                copyright: None,
                extensions: Default::default(),
                extras: Default::default(),
                generator: Some(generator.to_string()),
                min_version: None,
                version: "2.0".to_string(),
            },
            buffers,
            buffer_views: buffer_views.to_vec(),
            cameras: Vec::new(),
            extensions: Default::default(),
            extensions_required: Vec::new(),
            extensions_used: Vec::new(),
            extras: Default::default(),
            images: Vec::new(),
            materials: self.materials,
            meshes: self.meshes,
            nodes: self.nodes,
            samplers: Vec::new(),
            scene: if self.scenes.is_empty() {
                None
            } else {
                Some(json::Index::new(0))
            },
            scenes: self.scenes,
            skins: Vec::new(),
            textures: Vec::new(),
        }
    }
}

impl Default for GltfBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Node referencing a mesh, with optional translation and extras
pub fn mesh_node(
    name: &str,
    mesh: json::Index<json::Mesh>,
    translation: Option<[f32; 3]>,
    extras: json::extras::Extras,
) -> json::Node {
    json::Node {
        camera: None,
        children: None,
        extensions: Default::default(),
        extras,
        matrix: None,
        mesh: Some(mesh),
        name: Some(name.to_string()),
        rotation: None,
        scale: None,
        skin: None,
        translation,
        weights: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{extras_from_json, BufferBuilder, MeshBuilder};

    #[test]
    fn test_gltf_builder_basic() {
        let mut buffer = BufferBuilder::new();
        let mesh = MeshBuilder::new()
            .positions(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.5, 1.0, 0.0]])
            .triangles(&[0, 1, 2], Some(0))
            .build(&mut buffer);

        let mut gltf = GltfBuilder::new()
            .buffer_byte_length(buffer.data().len() as u64)
            .add_material(MaterialDesc {
                name: "Paint".to_string(),
                base_color: [1.0, 0.6, 0.0, 1.0],
                metallic: 0.0,
                roughness: 0.7,
                extras: None,
            })
            .add_mesh_from_accessors("Triangle", &mesh);
        let mesh_idx = gltf.last_mesh_index().unwrap();
        let extras = extras_from_json(&serde_json::json!({ "damp_id": "chassis" })).unwrap();
        gltf = gltf
            .add_node(mesh_node("Triangle", mesh_idx, Some([0.0, 0.0, 1.5]), extras))
            .add_scene("Scene", &[0]);

        let root = gltf.build(buffer.views(), buffer.accessors(), "test");

        assert_eq!(root.meshes.len(), 1);
        assert_eq!(root.materials.len(), 1);
        assert_eq!(root.scenes.len(), 1);
        assert_eq!(root.asset.version, "2.0");
        assert_eq!(root.nodes[0].translation, Some([0.0, 0.0, 1.5]));
        let raw = root.nodes[0].extras.as_ref().unwrap();
        assert!(raw.get().contains("chassis"));
    }
}

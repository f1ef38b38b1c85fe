//! Binary glTF export
//!
//! One glTF mesh and node per scene object, one primitive per material used
//! by that object. Contract tags land in `extras` under [`CONTRACT_KEY`].
//!
//! Generation works Z-up; glTF is Y-up. Positions, normals and translations
//! are rotated into glTF space here and nowhere else.

use super::{Geometry, Scene};
use crate::contract::{ContractTag, CONTRACT_KEY};
use crate::error::{GenError, Result};
use crate::mesh::{Mesh, PathCurve};
use crate::scene::MaterialId;
use glam::Vec3;
use glb_builder::{
    assemble_glb, extras_from_json, mesh_node, BufferBuilder, GltfBuilder, MaterialDesc,
    MeshAccessors, MeshBuilder,
};
use std::collections::BTreeMap;
use std::path::Path;

const GENERATOR: &str = concat!("proc-gen ", env!("CARGO_PKG_VERSION"));

fn export_err(e: anyhow::Error) -> GenError {
    GenError::Export(format!("{e:#}"))
}

fn extras(tag: Option<&ContractTag>, texture: Option<&str>) -> Result<glb_builder::json::extras::Extras> {
    if tag.is_none() && texture.is_none() {
        return Ok(None);
    }
    let mut map = serde_json::Map::new();
    if let Some(tag) = tag {
        map.insert(CONTRACT_KEY.to_string(), tag.as_str().into());
    }
    if let Some(texture) = texture {
        map.insert("texture".to_string(), texture.into());
    }
    extras_from_json(&serde_json::Value::Object(map)).map_err(export_err)
}

/// Z-up generator frame to glTF's Y-up frame: `(x, y, z) -> (x, z, -y)`
#[inline]
fn to_y_up(v: Vec3) -> [f32; 3] {
    [v.x, v.z, -v.y]
}

/// Unshared export vertices: every face gets its own copies carrying the face
/// normal, so box edges and blade creases shade flat.
#[derive(Debug, Default)]
struct FlatVertices {
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    groups: BTreeMap<Option<MaterialId>, Vec<u32>>,
}

impl FlatVertices {
    fn from_mesh(mesh: &Mesh) -> Self {
        let mut out = Self::default();
        for face in &mesh.faces {
            let normal = to_y_up(mesh.face_normal(face));
            let first = out.positions.len() as u32;
            for &i in &face.indices {
                out.positions.push(to_y_up(mesh.positions[i as usize]));
                out.normals.push(normal);
            }
            // Fan triangulation over the face's own vertex run
            let indices = out.groups.entry(face.material).or_default();
            for k in 1..face.indices.len() as u32 - 1 {
                indices.extend_from_slice(&[first, first + k, first + k + 1]);
            }
        }
        out
    }
}

fn pack_mesh(name: &str, mesh: &Mesh, buffer: &mut BufferBuilder) -> Result<MeshAccessors> {
    if mesh.faces.is_empty() {
        return Err(GenError::Export(format!("object '{name}' has no faces")));
    }
    let flat = FlatVertices::from_mesh(mesh);

    let mut builder = MeshBuilder::new()
        .positions(&flat.positions)
        .normals(&flat.normals);
    for (&material, indices) in &flat.groups {
        builder = builder.triangles(indices, material.map(|m| m.index() as u32));
    }
    Ok(builder.build(buffer))
}

fn pack_path(name: &str, path: &PathCurve, buffer: &mut BufferBuilder) -> Result<MeshAccessors> {
    let verts = path.loop_vertices();
    if verts.len() < 2 {
        return Err(GenError::Export(format!("path '{name}' has fewer than 2 points")));
    }
    let positions: Vec<[f32; 3]> = verts.iter().map(|&p| to_y_up(p)).collect();
    let indices: Vec<u32> = (0..positions.len() as u32).collect();
    Ok(MeshBuilder::new()
        .positions(&positions)
        .line_loop(&indices, None)
        .build(buffer))
}

/// Serialize a scene into GLB bytes
pub fn scene_to_glb(scene: &Scene) -> Result<Vec<u8>> {
    let mut buffer = BufferBuilder::new();
    let mut gltf = GltfBuilder::new();

    for (id, material) in scene.materials() {
        gltf = gltf.add_material(MaterialDesc {
            name: material.name.clone(),
            base_color: material.base_color,
            metallic: 0.0,
            roughness: material.roughness,
            extras: extras(scene.tag_of(id), material.texture.as_deref())?,
        });
    }

    let mut roots = Vec::with_capacity(scene.objects().len());
    for (id, object) in scene.objects() {
        let accessors = match &object.geometry {
            Geometry::Mesh(mesh) => pack_mesh(&object.name, mesh, &mut buffer)?,
            Geometry::Path(path) => pack_path(&object.name, path, &mut buffer)?,
        };
        gltf = gltf.add_mesh_from_accessors(&object.name, &accessors);
        let mesh_idx = gltf
            .last_mesh_index()
            .ok_or_else(|| GenError::Export("mesh was not recorded".to_string()))?;

        let translation = (object.translation != Vec3::ZERO).then(|| to_y_up(object.translation));
        roots.push(gltf.node_count());
        gltf = gltf.add_node(mesh_node(
            &object.name,
            mesh_idx,
            translation,
            extras(scene.tag_of(id), None)?,
        ));
    }

    let root = gltf
        .buffer_byte_length(buffer.data().len() as u64)
        .add_scene("Scene", &roots)
        .build(buffer.views(), buffer.accessors(), GENERATOR);

    assemble_glb(&root, buffer.data()).map_err(export_err)
}

/// Write a scene to a `.glb` file, creating parent directories
pub fn write_glb(scene: &Scene, path: &Path) -> Result<()> {
    let bytes = scene_to_glb(scene)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| GenError::io(parent, e))?;
    }
    std::fs::write(path, &bytes).map_err(|e| GenError::io(path, e))?;

    tracing::info!(
        "wrote {} ({} objects, {} materials, {} bytes)",
        path.display(),
        scene.objects().len(),
        scene.materials().len(),
        bytes.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::vocabulary;
    use crate::mesh::{extrude, Caps, LoftOptions, ProfileCurve, ProfilePlane};
    use crate::scene::{Material, SceneBuilder, SceneObject};

    #[test]
    fn test_empty_mesh_is_export_error() {
        let mut builder = SceneBuilder::new();
        builder.add_object(SceneObject {
            name: "Nothing".into(),
            geometry: Geometry::Mesh(Mesh::new()),
            translation: Vec3::ZERO,
        });
        let err = scene_to_glb(&builder.build()).unwrap_err();
        assert!(matches!(err, GenError::Export(_)));
    }

    #[test]
    fn test_glb_header_and_tag() {
        let mut builder = SceneBuilder::new();
        let paint = builder
            .material(Material::new("Paint", [1.0, 0.6, 0.0, 1.0]), vocabulary::BODY_PAINT)
            .unwrap();
        let profile = ProfileCurve::rectangle(2.5, 1.5).unwrap();
        let options = LoftOptions::default().plane(ProfilePlane::XZ).caps(Caps::BOTH);
        let body = extrude(&profile, Vec3::new(0.0, -2.0, 0.0), Vec3::new(0.0, 2.0, 0.0), &options)
            .unwrap()
            .with_material(paint);
        builder
            .mesh("Body", body, Vec3::new(0.0, 0.0, 1.5), vocabulary::CHASSIS)
            .unwrap();

        let glb = scene_to_glb(&builder.build()).unwrap();
        assert_eq!(&glb[0..4], b"glTF");
        let json_len = u32::from_le_bytes(glb[12..16].try_into().unwrap()) as usize;
        let json = std::str::from_utf8(&glb[20..20 + json_len]).unwrap();
        assert!(json.contains(r#""damp_id":"chassis""#));
        assert!(json.contains(r#""damp_id":"body_paint""#));
    }

    fn capped_box() -> Mesh {
        let profile = ProfileCurve::rectangle(2.0, 2.0).unwrap();
        let options = LoftOptions::default().plane(ProfilePlane::XZ).caps(Caps::BOTH);
        extrude(&profile, Vec3::new(0.0, -1.0, 0.0), Vec3::new(0.0, 1.0, 0.0), &options).unwrap()
    }

    #[test]
    fn test_y_up_rotation() {
        assert_eq!(to_y_up(Vec3::new(1.0, 2.0, 3.0)), [1.0, 3.0, -2.0]);
        assert_eq!(to_y_up(Vec3::Z), [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_box_shades_flat() {
        let mesh = capped_box();
        let flat = FlatVertices::from_mesh(&mesh);

        // 4 sides + 2 caps, four unshared corners each
        assert_eq!(flat.positions.len(), 6 * 4);
        assert_eq!(flat.groups[&None].len(), 6 * 2 * 3);
        for n in &flat.normals {
            let axis_aligned = n.iter().filter(|c| c.abs() > 1e-6).count() == 1;
            assert!(axis_aligned, "normal {n:?} is not a face normal");
        }
        // Corner (-1,-1,-1) appears once per face touching it, each time with that face's normal
        let corner = to_y_up(Vec3::new(-1.0, -1.0, -1.0));
        let at_corner: Vec<_> = flat
            .positions
            .iter()
            .zip(&flat.normals)
            .filter(|(p, _)| **p == corner)
            .map(|(_, n)| *n)
            .collect();
        assert_eq!(at_corner.len(), 3);
        assert!(at_corner.iter().all(|n| n.iter().map(|c| c.abs()).sum::<f32>() > 0.999));
    }

    #[test]
    fn test_flat_normals_point_outward() {
        let flat = FlatVertices::from_mesh(&capped_box());
        for (p, n) in flat.positions.iter().zip(&flat.normals) {
            let dot: f32 = p.iter().zip(n).map(|(a, b)| a * b).sum();
            assert!(dot > 0.0);
        }
    }
}

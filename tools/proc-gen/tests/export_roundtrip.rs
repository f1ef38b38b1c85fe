//! Exported GLB files read back with the `gltf` crate

use glam::Vec3;
use proc_gen::contract::{vocabulary, CONTRACT_KEY};
use proc_gen::mesh::*;
use proc_gen::scene::{write_glb, Material, SceneBuilder};
use proc_gen::texture::{body_texture, write_png};
use rand::SeedableRng;
use rand_pcg::Pcg32;

fn contract_id(extras: &gltf::json::extras::Extras) -> Option<String> {
    let raw = extras.as_ref()?;
    let value: serde_json::Value = serde_json::from_str(raw.get()).ok()?;
    value.get(CONTRACT_KEY)?.as_str().map(str::to_string)
}

fn blade() -> ProfileCurve {
    ProfileCurve::closed(&[
        (0.2, 1.5),
        (-0.1, 0.8),
        (0.4, 0.0),
        (0.0, 0.0),
        (-0.3, 0.8),
        (0.0, 1.5),
    ])
    .unwrap()
}

#[test]
fn every_node_and_material_keeps_its_tag() {
    let mut scene = SceneBuilder::new();
    let plow = scene
        .material(Material::new("PlowSteel", [0.6, 0.6, 0.6, 1.0]), vocabulary::PLOW)
        .unwrap();

    let segment = extrude(
        &blade(),
        Vec3::new(-0.5, 0.0, 0.0),
        Vec3::new(0.5, 0.0, 0.0),
        &LoftOptions::default(),
    )
    .unwrap()
    .with_material(plow);
    scene
        .mesh("PlowSegment", segment, Vec3::ZERO, vocabulary::PLOW_SEGMENT)
        .unwrap();

    let wing_profile = ProfileCurve::rectangle(0.3, 1.2).unwrap();
    for side in [Side::Left, Side::Right] {
        let wing = generate_attachment(&wing_profile, &AttachmentParams::wing(side))
            .unwrap()
            .with_material(plow);
        scene.mesh("Wing", wing, Vec3::ZERO, vocabulary::PLOW_WING).unwrap();
    }

    let path = generate_stadium(&StadiumParams::default()).unwrap();
    scene
        .path("Path_L", path, Vec3::new(-1.5, 0.0, 0.5), vocabulary::PATH_L)
        .unwrap();

    let scene = scene.build();
    assert!(scene.untagged().is_empty());

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("out/plow.glb");
    write_glb(&scene, &file).unwrap();

    let (document, buffers, _) = gltf::import(&file).unwrap();

    let tags: Vec<_> = document
        .nodes()
        .map(|n| contract_id(n.extras()).expect("node without contract_id"))
        .collect();
    assert_eq!(tags, vec!["plow_segment", "plow_wing", "plow_wing", "path_l"]);

    let materials: Vec<_> = document
        .materials()
        .map(|m| contract_id(m.extras()))
        .collect();
    assert_eq!(materials, vec![Some("plow".to_string())]);

    // The path is a line loop with no repeated closing vertex
    let path_node = document.nodes().nth(3).unwrap();
    // Z-up (-1.5, 0, 0.5) lands Y-up
    assert_eq!(path_node.transform().decomposed().0, [-1.5, 0.5, 0.0]);
    let primitive = path_node.mesh().unwrap().primitives().next().unwrap();
    assert_eq!(primitive.mode(), gltf::mesh::Mode::LineLoop);
    let reader = primitive.reader(|b| Some(&buffers[b.index()]));
    let positions: Vec<[f32; 3]> = reader.read_positions().unwrap().collect();
    assert_eq!(positions.len(), 2 * 7 + 2 * 15);
    assert_ne!(positions.first(), positions.last());
}

#[test]
fn blade_segment_triangulates_to_twelve_triangles() {
    let mut scene = SceneBuilder::new();
    let segment = extrude(
        &blade(),
        Vec3::new(-0.5, 0.0, 0.0),
        Vec3::new(0.5, 0.0, 0.0),
        &LoftOptions::default(),
    )
    .unwrap();
    scene
        .mesh("PlowSegment", segment, Vec3::ZERO, vocabulary::PLOW_SEGMENT)
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("segment.glb");
    write_glb(&scene.build(), &file).unwrap();

    let (document, buffers, _) = gltf::import(&file).unwrap();
    let mesh = document.meshes().next().unwrap();
    let primitive = mesh.primitives().next().unwrap();
    assert!(primitive.material().index().is_none());

    // 12 loft vertices split into four per quad for flat shading
    let reader = primitive.reader(|b| Some(&buffers[b.index()]));
    assert_eq!(reader.read_positions().unwrap().count(), 6 * 4);
    assert_eq!(reader.read_indices().unwrap().into_u32().count(), 6 * 2 * 3);
    assert_eq!(reader.read_normals().unwrap().count(), 6 * 4);
}

#[test]
fn raised_box_exports_upright_with_flat_normals() {
    let mut scene = SceneBuilder::new();
    let profile = ProfileCurve::rectangle(2.5, 1.5).unwrap();
    let options = LoftOptions::default().plane(ProfilePlane::XZ).caps(Caps::BOTH);
    let body = extrude(&profile, Vec3::new(0.0, -2.0, 0.0), Vec3::new(0.0, 2.0, 0.0), &options).unwrap();
    scene
        .mesh("Bulldozer_Body", body, Vec3::new(0.0, 0.0, 1.5), vocabulary::CHASSIS)
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("body.glb");
    write_glb(&scene.build(), &file).unwrap();

    let (document, buffers, _) = gltf::import(&file).unwrap();
    let node = document.nodes().next().unwrap();
    assert_eq!(node.name(), Some("Bulldozer_Body"));
    assert_eq!(node.transform().decomposed().0, [0.0, 1.5, 0.0]);

    let primitive = node.mesh().unwrap().primitives().next().unwrap();
    // Long axis (Z-up Y) becomes glTF -Z; height stays on glTF Y
    let bounds = primitive.bounding_box();
    assert_eq!(bounds.min, [-1.25, -0.75, -2.0]);
    assert_eq!(bounds.max, [1.25, 0.75, 2.0]);

    let reader = primitive.reader(|b| Some(&buffers[b.index()]));
    let normals: Vec<[f32; 3]> = reader.read_normals().unwrap().collect();
    assert_eq!(normals.len(), 6 * 4);
    for n in normals {
        let nonzero = n.iter().filter(|c| c.abs() > 1e-6).count();
        assert_eq!(nonzero, 1, "normal {n:?} is not axis-aligned");
    }
}

#[test]
fn fixed_seed_reproduces_texture_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let recipe = body_texture(128, 128);

    let a = dir.path().join("a.png");
    let b = dir.path().join("b.png");
    write_png(&recipe.generate(&mut Pcg32::seed_from_u64(99)), &a).unwrap();
    write_png(&recipe.generate(&mut Pcg32::seed_from_u64(99)), &b).unwrap();

    assert_eq!(std::fs::read(&a).unwrap(), std::fs::read(&b).unwrap());
}

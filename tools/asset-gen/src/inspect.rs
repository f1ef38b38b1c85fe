//! Contract tag report for an exported GLB

use anyhow::{Context, Result};
use proc_gen::contract::{vocabulary, CONTRACT_KEY};
use std::path::Path;

/// One tagged (or untagged) entity found in a file
#[derive(Debug, PartialEq)]
pub struct TagEntry {
    pub kind: &'static str,
    pub name: String,
    pub tag: Option<String>,
}

impl TagEntry {
    pub fn is_known(&self) -> bool {
        self.tag.as_deref().is_some_and(vocabulary::is_known)
    }
}

fn contract_id(extras: &gltf::json::extras::Extras) -> Option<String> {
    let raw = extras.as_ref()?;
    let value: serde_json::Value = serde_json::from_str(raw.get()).ok()?;
    value.get(CONTRACT_KEY)?.as_str().map(str::to_string)
}

/// Read every node and material with its contract tag
pub fn collect_tags(path: &Path) -> Result<Vec<TagEntry>> {
    let gltf = gltf::Gltf::open(path).with_context(|| format!("Failed to open {}", path.display()))?;

    let nodes = gltf.nodes().map(|n| TagEntry {
        kind: "node",
        name: n.name().unwrap_or("<unnamed>").to_string(),
        tag: contract_id(n.extras()),
    });
    let materials = gltf.materials().map(|m| TagEntry {
        kind: "material",
        name: m.name().unwrap_or("<unnamed>").to_string(),
        tag: contract_id(m.extras()),
    });
    Ok(nodes.chain(materials).collect())
}

/// Log the report; returns how many entries need attention
pub fn report(path: &Path) -> Result<usize> {
    let entries = collect_tags(path)?;
    let mut problems = 0;
    for entry in &entries {
        match &entry.tag {
            Some(tag) if entry.is_known() => {
                tracing::info!("{:<8} {:<24} {}", entry.kind, entry.name, tag);
            }
            Some(tag) => {
                problems += 1;
                tracing::warn!("{:<8} {:<24} {} (not in vocabulary)", entry.kind, entry.name, tag);
            }
            None => {
                problems += 1;
                tracing::warn!("{:<8} {:<24} untagged", entry.kind, entry.name);
            }
        }
    }
    tracing::info!("{} entries, {} flagged", entries.len(), problems);
    Ok(problems)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use proc_gen::mesh::{generate_stadium, StadiumParams};
    use proc_gen::scene::{write_glb, Material, SceneBuilder};

    #[test]
    fn test_flags_unknown_and_untagged() {
        let mut scene = SceneBuilder::new();
        let path = generate_stadium(&StadiumParams::default()).unwrap();
        scene
            .path("Path_L", path.clone(), Vec3::ZERO, vocabulary::PATH_L)
            .unwrap();
        scene.path("Bucket", path, Vec3::ZERO, "bucket").unwrap();
        scene.add_material(Material::new("Loose", [1.0; 4]));

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("scene.glb");
        write_glb(&scene.build(), &file).unwrap();

        let entries = collect_tags(&file).unwrap();
        assert_eq!(entries.len(), 3);
        assert!(entries[0].is_known());
        assert_eq!(entries[1].tag.as_deref(), Some("bucket"));
        assert!(!entries[1].is_known());
        assert_eq!(entries[2].kind, "material");
        assert!(entries[2].tag.is_none());

        assert_eq!(report(&file).unwrap(), 2);
    }
}

//! `asset-gen.toml` configuration
//!
//! Every section is optional; defaults reproduce the shipped asset
//! dimensions.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize)]
pub struct AssetGenConfig {
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub texture: TextureSection,
    #[serde(default)]
    pub chassis: ChassisSection,
    #[serde(default)]
    pub tracks: TracksSection,
    #[serde(default)]
    pub plow: PlowSection,
}

/// Where files go and how randomness is seeded
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub dir: PathBuf,
    pub bulldozer: String,
    pub plow: String,
    /// Texture directory, relative to `dir`
    pub textures: String,
    /// Fixed seed; a fresh one is drawn and logged when absent
    pub seed: Option<u64>,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("assets"),
            bulldozer: "bulldozer_components.glb".to_string(),
            plow: "plow.glb".to_string(),
            textures: "textures".to_string(),
            seed: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TextureSection {
    pub size: u32,
    pub speckles: u32,
    pub blobs: u32,
    pub band_height: u32,
}

impl Default for TextureSection {
    fn default() -> Self {
        Self {
            size: 512,
            speckles: 1000,
            blobs: 20,
            band_height: 64,
        }
    }
}

/// Body box, cabin and road wheels
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ChassisSection {
    /// Width (X), length (Y), height (Z)
    pub size: [f32; 3],
    /// Height of the body center
    pub elevation: f32,
    pub cabin_size: [f32; 3],
    pub wheel_radius: f32,
    pub wheel_width: f32,
    pub wheel_sides: u32,
    pub wheels_per_side: u32,
}

impl Default for ChassisSection {
    fn default() -> Self {
        Self {
            size: [2.5, 4.0, 1.5],
            elevation: 1.5,
            cabin_size: [1.6, 1.4, 1.2],
            wheel_radius: 0.35,
            wheel_width: 0.5,
            wheel_sides: 12,
            wheels_per_side: 4,
        }
    }
}

/// Track path loops and the instanced link
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TracksSection {
    pub radius: f32,
    pub length: f32,
    pub segments_arc: u32,
    pub segments_straight: u32,
    /// Lateral distance of each path from the center line
    pub offset: f32,
    pub height: f32,
    /// Plate width, length, thickness
    pub plate: [f32; 3],
    /// Grouser ridge width, length, height
    pub grouser: [f32; 3],
    /// Where the link asset sits so it stays clear of the body
    pub link_position: [f32; 3],
}

impl Default for TracksSection {
    fn default() -> Self {
        Self {
            radius: 1.0,
            length: 2.5,
            segments_arc: 16,
            segments_straight: 8,
            offset: 1.5,
            height: 0.5,
            plate: [0.8, 0.3, 0.05],
            grouser: [0.8, 0.05, 0.1],
            link_position: [3.0, 0.0, 0.0],
        }
    }
}

/// Blade segment plus its upgrade attachments
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PlowSection {
    pub segment_width: f32,
    /// Closed (forward, up) blade cross-section
    pub profile: Vec<[f32; 2]>,
    pub wing_sections: u32,
    pub wing_length: f32,
    pub wing_curve: f32,
    pub tip_scale: f32,
    pub teeth: u32,
}

impl Default for PlowSection {
    fn default() -> Self {
        Self {
            segment_width: 1.0,
            profile: vec![
                [0.2, 1.5],
                [-0.1, 0.8],
                [0.4, 0.0],
                [0.0, 0.0],
                [-0.3, 0.8],
                [0.0, 1.5],
            ],
            wing_sections: 8,
            wing_length: 0.8,
            wing_curve: 0.3,
            tip_scale: 0.4,
            teeth: 5,
        }
    }
}

/// Load a config file, or defaults when no path is given
pub fn load_config(path: Option<&Path>) -> Result<AssetGenConfig> {
    let Some(path) = path else {
        return Ok(AssetGenConfig::default());
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Failed to parse config {}", path.display()))
}

pub fn parse_config(content: &str) -> Result<AssetGenConfig> {
    Ok(toml::from_str(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.output.bulldozer, "bulldozer_components.glb");
        assert_eq!(config.chassis.size, [2.5, 4.0, 1.5]);
        assert_eq!(config.tracks.length, 2.5);
        assert_eq!(config.plow.profile.len(), 6);
        assert!(config.output.seed.is_none());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = parse_config(
            r#"
            [output]
            seed = 42

            [tracks]
            radius = 0.8
            segments_arc = 24
            "#,
        )
        .unwrap();
        assert_eq!(config.output.seed, Some(42));
        assert_eq!(config.output.plow, "plow.glb");
        assert_eq!(config.tracks.radius, 0.8);
        assert_eq!(config.tracks.segments_arc, 24);
        assert_eq!(config.tracks.segments_straight, 8);
        assert_eq!(config.texture.size, 512);
    }

    #[test]
    fn test_unknown_value_type_is_error() {
        assert!(parse_config("[texture]\nsize = \"big\"").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("asset-gen.toml");
        std::fs::write(&path, "[plow]\nteeth = 7\n").unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.plow.teeth, 7);

        assert!(load_config(Some(&dir.path().join("missing.toml"))).is_err());
    }
}

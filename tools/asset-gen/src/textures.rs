//! Body and track texture generation

use crate::bulldozer::{BODY_TEXTURE, TRACK_TEXTURE};
use crate::config::TextureSection;
use anyhow::Result;
use proc_gen::texture::*;
use rand::Rng;
use std::path::{Path, PathBuf};

/// Apply config overrides to the preset pass stacks
fn recipes(texture: &TextureSection) -> (SynthesisBuilder, SynthesisBuilder) {
    let mut body = body_texture(texture.size, texture.size);
    for pass in body.passes_mut() {
        match pass {
            TexturePass::Speckle(speckle) => speckle.count = texture.speckles,
            TexturePass::Blobs(blobs) => blobs.count = texture.blobs,
            _ => {}
        }
    }

    let mut tracks = track_texture(texture.size, texture.size);
    for pass in tracks.passes_mut() {
        if let TexturePass::ChevronBands(bands) = pass {
            bands.band_height = texture.band_height;
        }
    }
    (body, tracks)
}

/// Write both textures into `dir`, returning their paths
pub fn generate<R: Rng + ?Sized>(
    texture: &TextureSection,
    dir: &Path,
    rng: &mut R,
) -> Result<Vec<PathBuf>> {
    let (body, tracks) = recipes(texture);
    let mut written = Vec::with_capacity(2);
    for (name, recipe) in [(BODY_TEXTURE, body), (TRACK_TEXTURE, tracks)] {
        let path = dir.join(name);
        write_png(&recipe.generate(&mut *rng), &path)?;
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_overrides_reach_passes() {
        let texture = TextureSection {
            speckles: 3,
            band_height: 32,
            ..Default::default()
        };
        let (body, tracks) = recipes(&texture);
        assert!(body
            .passes()
            .iter()
            .any(|p| matches!(p, TexturePass::Speckle(s) if s.count == 3)));
        assert!(tracks
            .passes()
            .iter()
            .any(|p| matches!(p, TexturePass::ChevronBands(b) if b.band_height == 32)));
    }

    #[test]
    fn test_generate_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let texture = TextureSection {
            size: 64,
            ..Default::default()
        };
        let paths = generate(&texture, dir.path(), &mut Pcg32::seed_from_u64(1)).unwrap();
        assert_eq!(paths.len(), 2);
        assert!(paths.iter().all(|p| p.exists()));
    }
}

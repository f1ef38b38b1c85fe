//! PNG export for texture canvases

use super::TextureCanvas;
use crate::error::{GenError, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Write a canvas to an RGBA8 PNG, creating parent directories
///
/// # Example
/// ```no_run
/// use proc_gen::texture::{TextureCanvas, write_png};
/// use std::path::Path;
///
/// let tex = TextureCanvas::filled(64, 64, [255, 0, 0, 255]);
/// write_png(&tex, Path::new("red.png"))?;
/// # Ok::<(), proc_gen::GenError>(())
/// ```
pub fn write_png(canvas: &TextureCanvas, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| GenError::io(parent, e))?;
    }

    let file = File::create(path).map_err(|e| GenError::io(path, e))?;
    let w = BufWriter::new(file);

    let mut encoder = png::Encoder::new(w, canvas.width, canvas.height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::Default);

    let mut writer = encoder
        .write_header()
        .map_err(|e| GenError::io(path, std::io::Error::other(e)))?;
    writer
        .write_image_data(&canvas.pixels)
        .map_err(|e| GenError::io(path, std::io::Error::other(e)))?;

    tracing::info!(
        "wrote texture {} ({}x{})",
        path.display(),
        canvas.width,
        canvas.height
    );
    Ok(())
}

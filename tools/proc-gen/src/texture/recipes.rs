//! Ordered pass stacks and the two vehicle texture presets
//!
//! Mirrors a layered texturing workflow: a base fill followed by detail
//! passes, each composited over the result of the previous one.

use super::passes::{Blobs, ChevronBands, Speckle};
use super::TextureCanvas;
use rand::Rng;

/// Yellow paint
pub const BODY_BASE: [u8; 4] = [255, 170, 0, 255];
/// Rubber/steel tread base
pub const TRACK_BASE: [u8; 4] = [15, 15, 15, 255];

/// A single compositing pass
#[derive(Clone, Debug, PartialEq)]
pub enum TexturePass {
    /// Overwrite the whole canvas
    Fill([u8; 4]),
    /// Random 2x2 dirt/highlight flecks
    Speckle(Speckle),
    /// Random circular stains
    Blobs(Blobs),
    /// Periodic chevron tread stripes
    ChevronBands(ChevronBands),
}

impl TexturePass {
    fn apply<R: Rng + ?Sized>(&self, canvas: &mut TextureCanvas, rng: &mut R) {
        match self {
            TexturePass::Fill(color) => canvas.fill(*color),
            TexturePass::Speckle(speckle) => speckle.apply(canvas, rng),
            TexturePass::Blobs(blobs) => blobs.apply(canvas, rng),
            TexturePass::ChevronBands(bands) => bands.apply(canvas),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            TexturePass::Fill(_) => "fill",
            TexturePass::Speckle(_) => "speckle",
            TexturePass::Blobs(_) => "blobs",
            TexturePass::ChevronBands(_) => "chevron_bands",
        }
    }
}

/// Builder for an ordered stack of passes over a fixed-size canvas
#[derive(Clone, Debug)]
pub struct SynthesisBuilder {
    width: u32,
    height: u32,
    passes: Vec<TexturePass>,
}

impl SynthesisBuilder {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            passes: Vec::new(),
        }
    }

    pub fn fill(self, color: [u8; 4]) -> Self {
        self.pass(TexturePass::Fill(color))
    }

    pub fn speckle(self, speckle: Speckle) -> Self {
        self.pass(TexturePass::Speckle(speckle))
    }

    pub fn blobs(self, blobs: Blobs) -> Self {
        self.pass(TexturePass::Blobs(blobs))
    }

    pub fn chevron_bands(self, bands: ChevronBands) -> Self {
        self.pass(TexturePass::ChevronBands(bands))
    }

    pub fn pass(mut self, pass: TexturePass) -> Self {
        self.passes.push(pass);
        self
    }

    pub fn passes(&self) -> &[TexturePass] {
        &self.passes
    }

    pub fn passes_mut(&mut self) -> &mut [TexturePass] {
        &mut self.passes
    }

    /// Run every pass in order on a fresh transparent canvas
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> TextureCanvas {
        let mut canvas = TextureCanvas::new(self.width, self.height);
        for pass in &self.passes {
            tracing::trace!(pass = pass.name(), "texture pass");
            pass.apply(&mut canvas, rng);
        }
        canvas
    }
}

/// Weathered yellow body paint: fill, speckle, rust blobs
pub fn body_texture(width: u32, height: u32) -> SynthesisBuilder {
    SynthesisBuilder::new(width, height)
        .fill(BODY_BASE)
        .speckle(Speckle::default())
        .blobs(Blobs::default())
}

/// Dark tread with chevron bands
pub fn track_texture(width: u32, height: u32) -> SynthesisBuilder {
    SynthesisBuilder::new(width, height)
        .fill(TRACK_BASE)
        .chevron_bands(ChevronBands::default())
}

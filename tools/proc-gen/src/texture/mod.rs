//! Procedural texture synthesis
//!
//! A texture is built by running an ordered list of compositing passes over
//! an RGBA canvas. Randomized passes draw from a caller-supplied generator so
//! a fixed seed reproduces the exact same pixels.
//!
//! # Example
//! ```no_run
//! use proc_gen::texture::*;
//! use rand::SeedableRng;
//! use rand_pcg::Pcg32;
//!
//! let mut rng = Pcg32::seed_from_u64(7);
//! let body = body_texture(512, 512).generate(&mut rng);
//! let tracks = track_texture(512, 512).generate(&mut rng);
//!
//! write_png(&body, std::path::Path::new("bulldozer_texture.png"))?;
//! write_png(&tracks, std::path::Path::new("tracks_texture.png"))?;
//! # Ok::<(), proc_gen::GenError>(())
//! ```

mod blend;
mod export;
mod passes;
mod recipes;

// Core type
pub use self::canvas::TextureCanvas;

// Compositing
pub use blend::{blend_over, blend_pixel};
pub use passes::{blob, Blobs, ChevronBands, Speckle};

// Pass stacks and presets
pub use recipes::{
    body_texture, track_texture, SynthesisBuilder, TexturePass, BODY_BASE, TRACK_BASE,
};

// Export
pub use export::write_png;

mod canvas {
    /// RGBA8 canvas, row-major, channels in `[0, 255]`
    #[derive(Clone, Debug, PartialEq)]
    pub struct TextureCanvas {
        /// Width in pixels
        pub width: u32,
        /// Height in pixels
        pub height: u32,
        /// RGBA pixel data (4 bytes per pixel, row-major order)
        pub pixels: Vec<u8>,
    }

    impl TextureCanvas {
        /// Create a canvas initialized to transparent black
        pub fn new(width: u32, height: u32) -> Self {
            Self {
                width,
                height,
                pixels: vec![0u8; Self::byte_len(width, height)],
            }
        }

        /// RGBA8 buffer size, computed in `usize` so large sizes cannot wrap
        pub fn byte_len(width: u32, height: u32) -> usize {
            width as usize * height as usize * 4
        }

        /// Create a canvas filled with a solid color
        pub fn filled(width: u32, height: u32, color: [u8; 4]) -> Self {
            let mut canvas = Self::new(width, height);
            canvas.fill(color);
            canvas
        }

        /// Overwrite every pixel
        pub fn fill(&mut self, color: [u8; 4]) {
            for chunk in self.pixels.chunks_exact_mut(4) {
                chunk.copy_from_slice(&color);
            }
        }

        /// True when signed coordinates land on the canvas
        #[inline]
        pub fn contains(&self, x: i64, y: i64) -> bool {
            x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64
        }

        /// Get pixel at (x, y)
        #[inline]
        pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 4] {
            let idx = (y as usize * self.width as usize + x as usize) * 4;
            [
                self.pixels[idx],
                self.pixels[idx + 1],
                self.pixels[idx + 2],
                self.pixels[idx + 3],
            ]
        }

        /// Set pixel at (x, y)
        #[inline]
        pub fn set_pixel(&mut self, x: u32, y: u32, color: [u8; 4]) {
            let idx = (y as usize * self.width as usize + x as usize) * 4;
            self.pixels[idx..idx + 4].copy_from_slice(&color);
        }
    }
}

//! Compositing passes: speckle noise, rust blobs and chevron tread bands

use super::blend::blend_pixel;
use super::TextureCanvas;
use rand::Rng;

/// Scattered dirt/highlight flecks
#[derive(Clone, Debug, PartialEq)]
pub struct Speckle {
    /// Number of flecks
    pub count: u32,
    /// Side length of each square fleck in pixels
    pub patch: u32,
    /// Blend alpha per fleck
    pub alpha: f32,
    /// Dirt color
    pub dark: [u8; 3],
    /// Highlight color
    pub light: [u8; 3],
}

impl Default for Speckle {
    fn default() -> Self {
        Self {
            count: 1000,
            patch: 2,
            alpha: 25.0 / 255.0,
            dark: [0, 0, 0],
            light: [255, 255, 255],
        }
    }
}

impl Speckle {
    pub fn apply<R: Rng + ?Sized>(&self, canvas: &mut TextureCanvas, rng: &mut R) {
        if canvas.width == 0 || canvas.height == 0 {
            return;
        }
        for _ in 0..self.count {
            let color = if rng.random_bool(0.5) { self.dark } else { self.light };
            let cx = rng.random_range(0..canvas.width) as i64;
            let cy = rng.random_range(0..canvas.height) as i64;
            for oy in 0..self.patch as i64 {
                for ox in 0..self.patch as i64 {
                    blend_pixel(canvas, cx + ox, cy + oy, color, self.alpha);
                }
            }
        }
    }
}

/// Circular rust stains with random centers and radii
#[derive(Clone, Debug, PartialEq)]
pub struct Blobs {
    /// Number of blobs
    pub count: u32,
    /// Smallest radius in pixels (inclusive)
    pub min_radius: u32,
    /// Largest radius in pixels (inclusive)
    pub max_radius: u32,
    pub color: [u8; 3],
    pub alpha: f32,
}

impl Default for Blobs {
    fn default() -> Self {
        Self {
            count: 20,
            min_radius: 10,
            max_radius: 60,
            color: [100, 50, 0],
            alpha: 51.0 / 255.0,
        }
    }
}

impl Blobs {
    pub fn apply<R: Rng + ?Sized>(&self, canvas: &mut TextureCanvas, rng: &mut R) {
        if canvas.width == 0 || canvas.height == 0 {
            return;
        }
        let (lo, hi) = (
            self.min_radius.min(self.max_radius),
            self.min_radius.max(self.max_radius),
        );
        for _ in 0..self.count {
            let cx = rng.random_range(0..canvas.width) as i64;
            let cy = rng.random_range(0..canvas.height) as i64;
            let radius = rng.random_range(lo..=hi) as i64;
            blob(canvas, cx, cy, radius, self.color, self.alpha);
        }
    }
}

/// Blend every pixel whose squared distance to the center is <= radius^2
pub fn blob(canvas: &mut TextureCanvas, cx: i64, cy: i64, radius: i64, color: [u8; 3], alpha: f32) {
    let r_sq = radius * radius;
    let y_range = (cy - radius).max(0)..=(cy + radius).min(canvas.height as i64 - 1);
    for y in y_range {
        let x_range = (cx - radius).max(0)..=(cx + radius).min(canvas.width as i64 - 1);
        for x in x_range {
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy <= r_sq {
                blend_pixel(canvas, x, y, color, alpha);
            }
        }
    }
}

/// Repeating chevron tread stripes, one per horizontal band
///
/// Stripe rows replace the canvas color outright.
#[derive(Clone, Debug, PartialEq)]
pub struct ChevronBands {
    /// Band pitch in pixels
    pub band_height: u32,
    /// Stripe thickness in pixels
    pub stripe_height: u32,
    /// Horizontal distance per pixel of stripe drop
    pub divisor: u32,
    pub color: [u8; 4],
}

impl Default for ChevronBands {
    fn default() -> Self {
        Self {
            band_height: 64,
            stripe_height: 20,
            divisor: 8,
            color: [51, 51, 51, 255],
        }
    }
}

impl ChevronBands {
    /// First row of every band
    pub fn band_starts(&self, height: u32) -> impl Iterator<Item = u32> {
        (0..height).step_by(self.band_height.max(1) as usize)
    }

    /// Stripe offset below the band start at column `x`: `|x - center| / divisor`
    #[inline]
    pub fn offset_at(&self, x: u32, width: u32) -> u32 {
        x.abs_diff(width / 2) / self.divisor.max(1)
    }

    pub fn apply(&self, canvas: &mut TextureCanvas) {
        for band in self.band_starts(canvas.height) {
            for x in 0..canvas.width {
                let top = band + self.offset_at(x, canvas.width);
                for y in top..(top + self.stripe_height).min(canvas.height) {
                    canvas.set_pixel(x, y, self.color);
                }
            }
        }
    }
}

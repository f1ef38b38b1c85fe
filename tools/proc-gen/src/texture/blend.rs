//! Alpha compositing
//!
//! `out = fg * alpha + bg * (1 - alpha)` per color channel, truncated to u8.
//! The result alpha is always 255 so overlapping passes never accumulate
//! transparency.

use super::TextureCanvas;

/// Composite a foreground color over a background pixel
#[inline]
pub fn blend_over(bg: [u8; 4], fg: [u8; 3], alpha: f32) -> [u8; 4] {
    let a = alpha.clamp(0.0, 1.0);
    let mix = |f: u8, b: u8| (f as f32 * a + b as f32 * (1.0 - a)) as u8;
    [mix(fg[0], bg[0]), mix(fg[1], bg[1]), mix(fg[2], bg[2]), 255]
}

/// Blend one pixel in place; coordinates off the canvas are ignored
#[inline]
pub fn blend_pixel(canvas: &mut TextureCanvas, x: i64, y: i64, fg: [u8; 3], alpha: f32) {
    if canvas.contains(x, y) {
        let (x, y) = (x as u32, y as u32);
        let bg = canvas.get_pixel(x, y);
        canvas.set_pixel(x, y, blend_over(bg, fg, alpha));
    }
}

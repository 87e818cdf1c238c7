//! False-color rendering of contour maps.
//!
//! Maps integer contour counts onto a compact viridis-style color ramp and
//! writes standard raster images via the image crate. Counts are auto-scaled
//! against the map maximum, so a one-level map and a ten-level map both span
//! the full ramp.

use image::{Rgb, RgbImage};
use ndarray::ArrayView2;
use std::path::Path;

/// Anchor colors of the ramp, dark-to-bright (viridis endpoints and interior
/// stops).
const RAMP_ANCHORS: [[u8; 3]; 6] = [
    [68, 1, 84],
    [59, 82, 139],
    [33, 145, 140],
    [94, 201, 98],
    [253, 231, 37],
    [255, 255, 255],
];

fn ramp_color(t: f64) -> Rgb<u8> {
    let t = t.clamp(0.0, 1.0);
    let scaled = t * (RAMP_ANCHORS.len() - 1) as f64;
    let low = scaled.floor() as usize;
    let high = (low + 1).min(RAMP_ANCHORS.len() - 1);
    let frac = scaled - low as f64;

    let mut rgb = [0u8; 3];
    for (i, channel) in rgb.iter_mut().enumerate() {
        let a = RAMP_ANCHORS[low][i] as f64;
        let b = RAMP_ANCHORS[high][i] as f64;
        *channel = (a + (b - a) * frac).round() as u8;
    }
    Rgb(rgb)
}

/// Convert a contour map to a false-color RGB image.
///
/// Counts are scaled against the map maximum; an all-zero map renders
/// uniformly in the ramp's darkest color.
pub fn contour_to_rgb(map: &ArrayView2<u32>) -> RgbImage {
    let (height, width) = map.dim();
    let max = map.iter().copied().max().unwrap_or(0);

    let mut img = RgbImage::new(width as u32, height as u32);
    for y in 0..height {
        for x in 0..width {
            let t = if max == 0 {
                0.0
            } else {
                map[[y, x]] as f64 / max as f64
            };
            img.put_pixel(x as u32, y as u32, ramp_color(t));
        }
    }

    img
}

/// Render a contour map as a false-color image file.
///
/// The output format is determined by the file extension (.png, .jpg, ...).
pub fn render_contour_png<P: AsRef<Path>>(
    map: &ArrayView2<u32>,
    path: P,
) -> Result<(), image::ImageError> {
    contour_to_rgb(map).save(path)
}

//! PNG rendering of masks and label maps

use std::path::Path;

use anyhow::{Context, Result};
use image::{GrayImage, Rgb, RgbImage};

use grainseg_core::{LabelMap, Mask};

/// Hue step in degrees between consecutive labels (golden angle), so
/// neighboring labels get visually distant colors
const HUE_STEP: f64 = 137.508;

/// Write a binary mask as an 8-bit grayscale PNG (foreground white).
pub fn save_mask_png(mask: &Mask, path: &Path) -> Result<()> {
    let (rows, cols) = mask.shape();
    let data = mask.data();
    let img = GrayImage::from_fn(cols as u32, rows as u32, |x, y| {
        let v = if data[(y as usize, x as usize)] { 255 } else { 0 };
        image::Luma([v])
    });
    img.save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Write a label map as a color PNG (background black, one color per label).
pub fn save_labels_png(labels: &LabelMap, path: &Path) -> Result<()> {
    let (rows, cols) = labels.shape();
    let data = labels.data();
    let img = RgbImage::from_fn(cols as u32, rows as u32, |x, y| {
        label_color(data[(y as usize, x as usize)])
    });
    img.save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn label_color(label: u32) -> Rgb<u8> {
    if label == 0 {
        return Rgb([0, 0, 0]);
    }
    let hue = (label as f64 * HUE_STEP) % 360.0;
    hsv_to_rgb(hue, 0.75, 0.9)
}

fn hsv_to_rgb(hue: f64, saturation: f64, value: f64) -> Rgb<u8> {
    let c = value * saturation;
    let h = hue / 60.0;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = value - c;
    Rgb([
        ((r + m) * 255.0).round() as u8,
        ((g + m) * 255.0).round() as u8,
        ((b + m) * 255.0).round() as u8,
    ])
}

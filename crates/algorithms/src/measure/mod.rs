//! Per-region shape and size descriptors
//!
//! Stage 5 of the pipeline. Walks the label map once to collect each
//! region's pixels, then measures every region independently. Regions are
//! reported in ascending label order; an empty label map produces an empty
//! table with the same schema.

mod contour;
mod ellipse;
mod hull;

use grainseg_core::{Grid, LabelMap, Result};
use rayon::prelude::*;

use contour::outer_perimeter;
use ellipse::fit_ellipse;
use hull::convex_image_area;

/// Column names for tabular export, in the fixed output order.
///
/// `mean_intensity` is appended when an intensity grid is supplied.
pub const COLUMNS: [&str; 9] = [
    "label",
    "area",
    "perimeter",
    "eccentricity",
    "solidity",
    "equivalent_diameter",
    "orientation",
    "major_axis_length",
    "minor_axis_length",
];

/// Measurements for one labeled region.
///
/// Computed once per pipeline run and immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionRecord {
    /// Label id in the label map (1-based)
    pub label: u32,
    /// Pixel count
    pub area: usize,
    /// Outer-contour chain length (0 for a single pixel)
    pub perimeter: f64,
    /// 0 (circle) .. 1 (line) from the best-fit ellipse
    pub eccentricity: f64,
    /// Area divided by the convex image area, in (0, 1]
    pub solidity: f64,
    /// Diameter of the circle with the same area
    pub equivalent_diameter: f64,
    /// Major-axis angle from the row axis, radians in (-pi/2, pi/2]
    pub orientation: f64,
    pub major_axis_length: f64,
    pub minor_axis_length: f64,
    /// Mean intensity under the region, when an intensity grid was supplied
    pub mean_intensity: Option<f64>,
}

/// Measure every labeled region of a label map.
///
/// Returns one [`RegionRecord`] per positive label, in ascending label
/// order. A label map with no positive labels returns an empty vector -
/// a valid result, not an error.
///
/// A single-pixel region has no defined ellipse; it falls back to
/// eccentricity 0 and both axis lengths equal to the equivalent diameter,
/// so the measurement pass never fails on degenerate geometry.
///
/// # Arguments
/// * `labels` - Label map (0 = background, dense labels from 1)
/// * `intensity` - Optional intensity grid for intensity-weighted metrics;
///   must match the label map dimensions
pub fn measure_regions(
    labels: &LabelMap,
    intensity: Option<&Grid<f64>>,
) -> Result<Vec<RegionRecord>> {
    if let Some(img) = intensity {
        labels.check_same_shape(img)?;
    }

    let max_label = labels.iter_cells().map(|(_, _, v)| v).max().unwrap_or(0) as usize;
    if max_label == 0 {
        return Ok(Vec::new());
    }

    // One scan collects pixels per label, in scan order within each region
    let mut pixels: Vec<Vec<(usize, usize)>> = vec![Vec::new(); max_label + 1];
    for (row, col, label) in labels.iter_cells() {
        if label > 0 {
            pixels[label as usize].push((row, col));
        }
    }

    let records: Vec<RegionRecord> = (1..=max_label)
        .into_par_iter()
        .filter(|&label| !pixels[label].is_empty())
        .map(|label| measure_one(labels, label as u32, &pixels[label], intensity))
        .collect();

    Ok(records)
}

fn measure_one(
    labels: &LabelMap,
    label: u32,
    pixels: &[(usize, usize)],
    intensity: Option<&Grid<f64>>,
) -> RegionRecord {
    let area = pixels.len();
    let equivalent_diameter = (4.0 * area as f64 / std::f64::consts::PI).sqrt();

    let fit = fit_ellipse(pixels);
    let degenerate = fit.major_axis_length <= f64::EPSILON;

    let hull_area = convex_image_area(pixels);
    let solidity = if hull_area > 0.0 {
        area as f64 / hull_area
    } else {
        1.0
    };

    // pixels[0] is the scan-order first pixel, as required by the tracer
    let perimeter = outer_perimeter(labels, label, pixels[0]);

    let mean_intensity = intensity.map(|img| {
        let data = img.data();
        let sum: f64 = pixels.iter().map(|&(r, c)| data[(r, c)]).sum();
        sum / area as f64
    });

    RegionRecord {
        label,
        area,
        perimeter,
        eccentricity: if degenerate { 0.0 } else { fit.eccentricity },
        solidity,
        equivalent_diameter,
        orientation: fit.orientation,
        major_axis_length: if degenerate {
            equivalent_diameter
        } else {
            fit.major_axis_length
        },
        minor_axis_length: if degenerate {
            equivalent_diameter
        } else {
            fit.minor_axis_length
        },
        mean_intensity,
    }
}

//! Adaptive local-mean thresholding
//!
//! Computes a spatially varying threshold so grains stay separable under the
//! uneven illumination typical of optical micrographs: a single global cutoff
//! either drowns the dark corner of the field or saturates the bright one.
//!
//! Each pixel is compared against the mean intensity of the
//! `block_size x block_size` window centered on it, scaled by
//! `threshold_factor`. Windows are clipped to the image bounds, so border
//! pixels use a smaller neighborhood and a window larger than the image
//! degrades to a near-global mean instead of failing.

use grainseg_core::{Error, Grid, Mask, Result};
use ndarray::Array2;
use rayon::prelude::*;

/// Coerce a window size to the next odd integer.
///
/// A centered window needs an odd side length; an even `block_size` is a
/// hard rule of the algorithm, not a caller error, so it is silently bumped
/// by one. Zero coerces to one (a 1x1 window).
pub fn force_odd(block_size: usize) -> usize {
    if block_size % 2 == 0 {
        block_size + 1
    } else {
        block_size
    }
}

/// Absolute margin a pixel must clear above its scaled local mean.
///
/// The summed-area table reconstructs window sums by subtraction, which
/// leaves rounding error on the order of machine epsilon; without a margin
/// a perfectly flat field can land a hair above its own mean and threshold
/// to foreground. Intensities live in [0, 1], so 1e-9 is far below any
/// real contrast and far above the accumulated error.
const MEAN_TOLERANCE: f64 = 1e-9;

/// Threshold an intensity grid against its local mean.
///
/// A pixel is foreground when its intensity exceeds
/// `local_mean * threshold_factor` by more than a tiny fixed margin
/// ([`MEAN_TOLERANCE`]). The margin absorbs rounding error in the window
/// sums: a perfectly uniform image with `threshold_factor >= 1` yields an
/// all-background mask rather than an arbitrary split.
///
/// # Arguments
/// * `smoothed` - Smoothed intensity grid
/// * `block_size` - Local window side length in pixels (forced odd)
/// * `threshold_factor` - Multiplier applied to the local mean
///
/// # Errors
/// `InvalidParameter` when threshold_factor is not a positive finite number.
pub fn local_mean_threshold(
    smoothed: &Grid<f64>,
    block_size: usize,
    threshold_factor: f64,
) -> Result<Mask> {
    if !threshold_factor.is_finite() || threshold_factor <= 0.0 {
        return Err(Error::invalid_parameter(
            "threshold_factor",
            threshold_factor,
            "threshold multiplier must be a positive finite number",
        ));
    }

    let (rows, cols) = smoothed.shape();
    let radius = force_odd(block_size) / 2;
    let data = smoothed.data();

    // Summed-area table, one extra row/col of zeros so window sums need no
    // special cases.
    let mut sat = Array2::<f64>::zeros((rows + 1, cols + 1));
    for row in 0..rows {
        let mut row_sum = 0.0;
        for col in 0..cols {
            row_sum += data[(row, col)];
            sat[(row + 1, col + 1)] = sat[(row, col + 1)] + row_sum;
        }
    }

    let mask_data: Vec<bool> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let r0 = row.saturating_sub(radius);
            let r1 = (row + radius).min(rows - 1);

            let mut row_data = vec![false; cols];
            for (col, out) in row_data.iter_mut().enumerate() {
                let c0 = col.saturating_sub(radius);
                let c1 = (col + radius).min(cols - 1);

                let sum = sat[(r1 + 1, c1 + 1)] - sat[(r0, c1 + 1)] - sat[(r1 + 1, c0)]
                    + sat[(r0, c0)];
                let count = ((r1 - r0 + 1) * (c1 - c0 + 1)) as f64;
                let local_mean = sum / count;

                *out = data[(row, col)] - local_mean * threshold_factor > MEAN_TOLERANCE;
            }
            row_data
        })
        .collect();

    Grid::from_vec(mask_data, rows, cols)
}

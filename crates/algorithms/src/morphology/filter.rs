//! Size-based mask filters and the composed cleanup step
//!
//! Small-object removal and hole filling share the labeler's connectivity
//! convention: foreground components are 8-connected, background holes use
//! the dual 4-connectivity. Using the labeler itself for both filters makes
//! a cleaner/labeler mismatch impossible by construction.

use grainseg_core::{Connectivity, Grid, Mask, Result};

use crate::labeling::label_components;

use super::binary::binary_open;
use super::element::StructuringElement;

/// Foreground connectivity used by every mask stage of the pipeline
pub(crate) const FOREGROUND_CONNECTIVITY: Connectivity = Connectivity::Eight;

/// Remove connected foreground components with area below `min_size`.
///
/// `min_size` of 0 or 1 keeps every component (identity).
pub fn remove_small_objects(mask: &Mask, min_size: usize) -> Mask {
    if min_size <= 1 {
        return mask.clone();
    }

    let (labels, count) = label_components(mask, FOREGROUND_CONNECTIVITY);
    if count == 0 {
        return mask.clone();
    }

    let mut areas = vec![0usize; count + 1];
    for (_, _, label) in labels.iter_cells() {
        areas[label as usize] += 1;
    }

    let mut out = mask.like(false);
    for (row, col, label) in labels.iter_cells() {
        if label > 0 && areas[label as usize] >= min_size {
            unsafe { out.set_unchecked(row, col, true) };
        }
    }
    out
}

/// Fill enclosed background holes with area below `hole_size`.
///
/// A hole is a connected background region (dual 4-connectivity) that does
/// not touch the image border. `hole_size` of 0 fills nothing (identity).
pub fn fill_small_holes(mask: &Mask, hole_size: usize) -> Mask {
    if hole_size == 0 {
        return mask.clone();
    }

    let background = mask.invert();
    let (labels, count) = label_components(&background, FOREGROUND_CONNECTIVITY.dual());
    if count == 0 {
        return mask.clone();
    }

    let (rows, cols) = mask.shape();
    let mut areas = vec![0usize; count + 1];
    let mut touches_border = vec![false; count + 1];

    for (row, col, label) in labels.iter_cells() {
        if label == 0 {
            continue;
        }
        areas[label as usize] += 1;
        if row == 0 || col == 0 || row == rows - 1 || col == cols - 1 {
            touches_border[label as usize] = true;
        }
    }

    let mut out = mask.clone();
    for (row, col, label) in labels.iter_cells() {
        let l = label as usize;
        if l > 0 && !touches_border[l] && areas[l] < hole_size {
            unsafe { out.set_unchecked(row, col, true) };
        }
    }
    out
}

/// Clean a binary mask: opening, then small-object removal, then hole
/// filling.
///
/// The opening uses a fixed Disk(2) element. `min_size` and `hole_size` of
/// zero disable their respective steps without error.
pub fn clean(mask: &Mask, min_size: usize, hole_size: usize) -> Result<Mask> {
    let opened = binary_open(mask, &StructuringElement::default())?;
    let filtered = remove_small_objects(&opened, min_size);
    Ok(fill_small_holes(&filtered, hole_size))
}

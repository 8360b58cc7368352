//! Binary erosion, dilation and opening
//!
//! Out-of-bounds neighbors are ignored: erosion treats them as foreground
//! and dilation as background, so grains touching the image border are not
//! clipped by an artificial frame of background.

use grainseg_core::{Mask, Result};
use ndarray::Array2;
use rayon::prelude::*;

use super::element::StructuringElement;

/// Morphological erosion of a binary mask.
///
/// A pixel survives when every in-bounds cell of the structuring element
/// placed on it is foreground.
pub fn binary_erode(mask: &Mask, element: &StructuringElement) -> Result<Mask> {
    element.validate()?;
    let offsets = element.offsets();
    Ok(apply(mask, |row, col, rows, cols, data| {
        if !data[(row, col)] {
            return false;
        }
        for &(dr, dc) in &offsets {
            let nr = row as isize + dr;
            let nc = col as isize + dc;
            if nr < 0 || nc < 0 || nr >= rows as isize || nc >= cols as isize {
                continue;
            }
            if !data[(nr as usize, nc as usize)] {
                return false;
            }
        }
        true
    }))
}

/// Morphological dilation of a binary mask.
///
/// A pixel becomes foreground when any in-bounds cell of the structuring
/// element placed on it is foreground.
pub fn binary_dilate(mask: &Mask, element: &StructuringElement) -> Result<Mask> {
    element.validate()?;
    let offsets = element.offsets();
    Ok(apply(mask, |row, col, rows, cols, data| {
        for &(dr, dc) in &offsets {
            let nr = row as isize + dr;
            let nc = col as isize + dc;
            if nr < 0 || nc < 0 || nr >= rows as isize || nc >= cols as isize {
                continue;
            }
            if data[(nr as usize, nc as usize)] {
                return true;
            }
        }
        false
    }))
}

/// Morphological opening (erosion then dilation).
///
/// Removes foreground features thinner than the structuring element while
/// approximately preserving the size of larger regions.
pub fn binary_open(mask: &Mask, element: &StructuringElement) -> Result<Mask> {
    let eroded = binary_erode(mask, element)?;
    binary_dilate(&eroded, element)
}

fn apply<F>(mask: &Mask, f: F) -> Mask
where
    F: Fn(usize, usize, usize, usize, &Array2<bool>) -> bool + Sync,
{
    let (rows, cols) = mask.shape();
    let data = mask.data();

    let out: Vec<bool> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            (0..cols)
                .map(|col| f(row, col, rows, cols, data))
                .collect::<Vec<bool>>()
        })
        .collect();

    // Length is rows * cols by construction
    Mask::from_vec(out, rows, cols).expect("output length matches input shape")
}

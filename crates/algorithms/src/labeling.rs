//! Connected-component labeling
//!
//! Stage 4 of the pipeline. Assigns dense integer labels 1..=N to the
//! connected foreground regions of a mask. Seeds are discovered in
//! top-to-bottom, left-to-right scan order and each component is flooded
//! with BFS, so identical input always produces identical labels - callers
//! rely on this to correlate label ids across repeated runs.

use grainseg_core::{Connectivity, Grid, LabelMap, Mask};
use std::collections::VecDeque;

/// Label the connected foreground components of a mask.
///
/// Returns the label map (0 = background) and the number of components.
/// An all-background mask yields an all-zero map and a count of zero.
///
/// # Arguments
/// * `mask` - Binary foreground mask
/// * `connectivity` - Adjacency convention; the pipeline uses
///   [`Connectivity::Eight`] for foreground throughout
pub fn label_components(mask: &Mask, connectivity: Connectivity) -> (LabelMap, usize) {
    let (rows, cols) = mask.shape();
    let mut labels: LabelMap = Grid::new(rows, cols);
    let mut queue: VecDeque<(usize, usize)> = VecDeque::new();
    let offsets = connectivity.offsets();

    let mut next_label: u32 = 0;

    for row in 0..rows {
        for col in 0..cols {
            if !unsafe { mask.get_unchecked(row, col) }
                || unsafe { labels.get_unchecked(row, col) } != 0
            {
                continue;
            }

            next_label += 1;
            unsafe { labels.set_unchecked(row, col, next_label) };
            queue.push_back((row, col));

            while let Some((r, c)) = queue.pop_front() {
                for &(dr, dc) in offsets {
                    let nr = r as isize + dr;
                    let nc = c as isize + dc;

                    if nr < 0 || nc < 0 || nr >= rows as isize || nc >= cols as isize {
                        continue;
                    }

                    let nr = nr as usize;
                    let nc = nc as usize;
                    if unsafe { mask.get_unchecked(nr, nc) }
                        && unsafe { labels.get_unchecked(nr, nc) } == 0
                    {
                        unsafe { labels.set_unchecked(nr, nc, next_label) };
                        queue.push_back((nr, nc));
                    }
                }
            }
        }
    }

    (labels, next_label as usize)
}

//! Outer-contour perimeter via Moore boundary tracing
//!
//! Walks the outer boundary of a region clockwise, summing chain steps
//! (1 for cardinal moves, sqrt(2) for diagonal moves). Interior hole
//! boundaries are not traced; after hole filling the surviving holes are
//! rare and large, and the outer contour is the standard grain-size
//! perimeter. A single-pixel region has no chain and reports 0.

use grainseg_core::LabelMap;

/// Neighbor ring in clockwise order starting at W, for row-down coordinates
const RING: [(isize, isize); 8] = [
    (0, -1),  // W
    (-1, -1), // NW
    (-1, 0),  // N
    (-1, 1),  // NE
    (0, 1),   // E
    (1, 1),   // SE
    (1, 0),   // S
    (1, -1),  // SW
];

/// Chain length of the outer contour of the region with the given label.
///
/// `start` must be the region's first pixel in scan order (topmost, then
/// leftmost), which guarantees its west neighbor is outside the region.
pub(crate) fn outer_perimeter(labels: &LabelMap, label: u32, start: (usize, usize)) -> f64 {
    let (rows, cols) = labels.shape();

    let in_region = |r: isize, c: isize| -> bool {
        if r < 0 || c < 0 || r >= rows as isize || c >= cols as isize {
            return false;
        }
        unsafe { labels.get_unchecked(r as usize, c as usize) == label }
    };

    let start = (start.0 as isize, start.1 as isize);

    // Scan a pixel's ring clockwise beginning just after the backtrack
    // position; returns the next region pixel and the new backtrack.
    let next_on_boundary = |p: (isize, isize),
                            backtrack: (isize, isize)|
     -> Option<((isize, isize), (isize, isize))> {
        let entry = RING
            .iter()
            .position(|&(dr, dc)| (p.0 + dr, p.1 + dc) == backtrack)
            .unwrap_or(0);

        let mut prev = backtrack;
        for i in 1..=RING.len() {
            let (dr, dc) = RING[(entry + i) % RING.len()];
            let candidate = (p.0 + dr, p.1 + dc);
            if in_region(candidate.0, candidate.1) {
                return Some((candidate, prev));
            }
            prev = candidate;
        }
        None
    };

    let step = |a: (isize, isize), b: (isize, isize)| -> f64 {
        if a.0 != b.0 && a.1 != b.1 {
            std::f64::consts::SQRT_2
        } else {
            1.0
        }
    };

    // West neighbor of the scan-order start is outside the region
    let Some((first, mut backtrack)) = next_on_boundary(start, (start.0, start.1 - 1)) else {
        return 0.0; // isolated pixel
    };

    let mut perimeter = step(start, first);
    let mut current = first;

    // The trace closes when the next move out of the start would repeat the
    // first move. Whenever the ring scan around the start yields `first`,
    // the backtrack it hands out is the ring predecessor of `first` (every
    // candidate between the entry and `first` was just rejected), so the
    // successor state matches the one after the initial move and the trace
    // can only repeat itself from here. Bounded by the number of directed
    // boundary steps.
    let max_steps = 4 * (rows * cols) + 8;
    for _ in 0..max_steps {
        if current == start {
            // Peek the next move without committing it
            if let Some((next, _)) = next_on_boundary(current, backtrack) {
                if next == first {
                    break;
                }
            }
        }
        match next_on_boundary(current, backtrack) {
            Some((next, new_backtrack)) => {
                perimeter += step(current, next);
                backtrack = new_backtrack;
                current = next;
            }
            None => break,
        }
    }

    perimeter
}

//! Convex image area for solidity
//!
//! Solidity compares the region's pixel count against the pixel count of
//! its convex image: the set of lattice points inside or on the convex
//! hull of the region's pixel centers. Counting hull pixels keeps both
//! quantities in the same units, so digitally convex shapes (rectangles,
//! discrete disks) score exactly 1 instead of being depressed by the
//! half-pixel band a corner-point hull would add around the boundary.

/// Pixel count of the convex image of a region.
///
/// Builds the convex hull of the pixel centers with the monotone chain
/// construction, then counts the lattice points of the bounding box that
/// fall inside or on the hull. Every region pixel is such a point, so the
/// result is never smaller than the region area.
pub(crate) fn convex_image_area(pixels: &[(usize, usize)]) -> f64 {
    if pixels.is_empty() {
        return 0.0;
    }

    let mut points: Vec<(i64, i64)> = pixels.iter().map(|&(r, c)| (r as i64, c as i64)).collect();
    points.sort_unstable();
    points.dedup();

    let hull = monotone_chain(&points);

    // points is sorted by row, so the row extent is at the ends
    let min_r = points[0].0;
    let max_r = points[points.len() - 1].0;
    let min_c = points.iter().map(|p| p.1).min().unwrap_or(0);
    let max_c = points.iter().map(|p| p.1).max().unwrap_or(0);

    let mut count = 0usize;
    for r in min_r..=max_r {
        for c in min_c..=max_c {
            if hull_contains(&hull, (r, c)) {
                count += 1;
            }
        }
    }
    count as f64
}

/// Cross product of (b - a) x (c - a)
fn cross(a: (i64, i64), b: (i64, i64), c: (i64, i64)) -> i64 {
    (b.0 - a.0) * (c.1 - a.1) - (b.1 - a.1) * (c.0 - a.0)
}

/// Whether a lattice point lies inside or on the hull.
///
/// The chain yields counterclockwise vertices, so interior points see a
/// non-negative cross product against every edge. With one or two vertices
/// the hull degenerates to a point or a segment; the caller's bounding-box
/// scan confines the collinearity test to the segment itself.
fn hull_contains(hull: &[(i64, i64)], p: (i64, i64)) -> bool {
    match hull.len() {
        0 => false,
        1 => p == hull[0],
        2 => cross(hull[0], hull[1], p) == 0,
        n => (0..n).all(|i| cross(hull[i], hull[(i + 1) % n], p) >= 0),
    }
}

/// Convex hull of sorted, deduplicated points (Andrew's monotone chain),
/// counterclockwise without the repeated first point
fn monotone_chain(points: &[(i64, i64)]) -> Vec<(i64, i64)> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let mut hull: Vec<(i64, i64)> = Vec::with_capacity(2 * n);

    for &p in points {
        while hull.len() >= 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0 {
            hull.pop();
        }
        hull.push(p);
    }

    let lower_len = hull.len() + 1;
    for &p in points.iter().rev() {
        while hull.len() >= lower_len && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0 {
            hull.pop();
        }
        hull.push(p);
    }

    hull.pop(); // last point equals the first
    hull
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block_pixels(r0: usize, c0: usize, height: usize, width: usize) -> Vec<(usize, usize)> {
        let mut px = Vec::new();
        for r in r0..r0 + height {
            for c in c0..c0 + width {
                px.push((r, c));
            }
        }
        px
    }

    #[test]
    fn test_single_pixel() {
        let area = convex_image_area(&[(3, 7)]);
        assert!((area - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rectangle_hull_equals_pixel_count() {
        let pixels = block_pixels(2, 3, 4, 6);
        let area = convex_image_area(&pixels);
        assert!((area - 24.0).abs() < 1e-12);
    }

    #[test]
    fn test_row_of_pixels() {
        let pixels: Vec<(usize, usize)> = (0..5).map(|c| (1, c)).collect();
        let area = convex_image_area(&pixels);
        assert!((area - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_diagonal_line_of_pixels() {
        let pixels: Vec<(usize, usize)> = (0..4).map(|i| (i, i)).collect();
        let area = convex_image_area(&pixels);
        // Only the diagonal lattice points lie on the degenerate hull
        assert!((area - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_l_shape_hull_exceeds_pixel_count() {
        // L-shape: 3x1 vertical + foot, area 5; hull is a right triangle
        // holding 6 lattice points
        let mut pixels = block_pixels(0, 0, 3, 1);
        pixels.extend(block_pixels(2, 1, 1, 2));

        let hull_area = convex_image_area(&pixels);
        assert!((hull_area - 6.0).abs() < 1e-12, "got {}", hull_area);
    }

    #[test]
    fn test_digital_disk_is_convex() {
        // Every lattice point inside the hull of a discrete disk's centers
        // is within the circle, hence part of the disk: the convex image
        // adds nothing and solidity comes out as exactly 1
        let mut pixels = Vec::new();
        let (center, radius) = (20.0, 12.0);
        for r in 0..40usize {
            for c in 0..40usize {
                let dr = r as f64 - center;
                let dc = c as f64 - center;
                if dr * dr + dc * dc <= radius * radius {
                    pixels.push((r, c));
                }
            }
        }

        let hull_area = convex_image_area(&pixels);
        assert!(
            (hull_area - pixels.len() as f64).abs() < 1e-12,
            "disk convex image {} should equal its area {}",
            hull_area,
            pixels.len()
        );
    }

    #[test]
    fn test_empty_region() {
        assert_eq!(convex_image_area(&[]), 0.0);
    }
}

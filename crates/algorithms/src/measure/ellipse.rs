//! Best-fit ellipse from second central moments
//!
//! The region's pixel coordinates define a covariance matrix whose
//! eigenvalues give the squared axis scales of the ellipse with the same
//! second moments. Axis lengths follow the usual 4*sqrt(lambda) convention
//! so a solid disk of radius r reports a major axis equal to its diameter.

/// Ellipse descriptors for one region
#[derive(Debug, Clone, Copy)]
pub(crate) struct EllipseFit {
    pub major_axis_length: f64,
    pub minor_axis_length: f64,
    /// 0 for a circle, approaching 1 for a line
    pub eccentricity: f64,
    /// Angle between the major axis and the row axis, radians in (-pi/2, pi/2]
    pub orientation: f64,
}

/// Fit an ellipse to a region's pixel coordinates.
///
/// A region whose moment matrix is (numerically) rank zero - a single pixel
/// - reports zero axis lengths and zero eccentricity; the caller substitutes
/// its area-based fallback.
pub(crate) fn fit_ellipse(pixels: &[(usize, usize)]) -> EllipseFit {
    let n = pixels.len() as f64;
    if pixels.is_empty() {
        return EllipseFit {
            major_axis_length: 0.0,
            minor_axis_length: 0.0,
            eccentricity: 0.0,
            orientation: 0.0,
        };
    }

    let mut sum_r = 0.0;
    let mut sum_c = 0.0;
    for &(r, c) in pixels {
        sum_r += r as f64;
        sum_c += c as f64;
    }
    let centroid_r = sum_r / n;
    let centroid_c = sum_c / n;

    // Second central moments
    let mut mu_rr = 0.0;
    let mut mu_cc = 0.0;
    let mut mu_rc = 0.0;
    for &(r, c) in pixels {
        let dr = r as f64 - centroid_r;
        let dc = c as f64 - centroid_c;
        mu_rr += dr * dr;
        mu_cc += dc * dc;
        mu_rc += dr * dc;
    }
    mu_rr /= n;
    mu_cc /= n;
    mu_rc /= n;

    // Eigenvalues of [[mu_rr, mu_rc], [mu_rc, mu_cc]]
    let half_trace = (mu_rr + mu_cc) / 2.0;
    let spread = ((mu_rr - mu_cc) / 2.0).hypot(mu_rc);
    let lambda_major = half_trace + spread;
    let lambda_minor = (half_trace - spread).max(0.0);

    let eccentricity = if lambda_major > f64::EPSILON {
        (1.0 - lambda_minor / lambda_major).max(0.0).sqrt()
    } else {
        0.0
    };

    EllipseFit {
        major_axis_length: 4.0 * lambda_major.sqrt(),
        minor_axis_length: 4.0 * lambda_minor.sqrt(),
        eccentricity,
        orientation: 0.5 * (2.0 * mu_rc).atan2(mu_rr - mu_cc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disk_pixels(center: f64, radius: f64) -> Vec<(usize, usize)> {
        let mut px = Vec::new();
        let extent = (center + radius + 2.0) as usize;
        for r in 0..extent {
            for c in 0..extent {
                let dr = r as f64 - center;
                let dc = c as f64 - center;
                if dr * dr + dc * dc <= radius * radius {
                    px.push((r, c));
                }
            }
        }
        px
    }

    #[test]
    fn test_single_pixel_degenerate() {
        let fit = fit_ellipse(&[(5, 5)]);
        assert_eq!(fit.major_axis_length, 0.0);
        assert_eq!(fit.minor_axis_length, 0.0);
        assert_eq!(fit.eccentricity, 0.0);
    }

    #[test]
    fn test_disk_nearly_circular() {
        let fit = fit_ellipse(&disk_pixels(15.0, 10.0));
        assert!(
            fit.eccentricity < 0.1,
            "disk eccentricity should be near 0, got {}",
            fit.eccentricity
        );
        // Major axis approximates the diameter
        assert!(
            (fit.major_axis_length - 20.0).abs() < 1.5,
            "major axis should be near 20, got {}",
            fit.major_axis_length
        );
    }

    #[test]
    fn test_square_axes_equal() {
        let mut px = Vec::new();
        for r in 2..10 {
            for c in 4..12 {
                px.push((r, c));
            }
        }
        let fit = fit_ellipse(&px);
        assert!(fit.eccentricity < 1e-9, "square is isotropic, got {}", fit.eccentricity);
        assert!((fit.major_axis_length - fit.minor_axis_length).abs() < 1e-9);
    }

    #[test]
    fn test_horizontal_line_orientation() {
        let px: Vec<(usize, usize)> = (0..9).map(|c| (3, c)).collect();
        let fit = fit_ellipse(&px);
        assert!((fit.eccentricity - 1.0).abs() < 1e-9, "line is fully eccentric");
        assert_eq!(fit.minor_axis_length, 0.0);
        // Major axis along the columns: pi/2 from the row axis
        assert!((fit.orientation - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
    }

    #[test]
    fn test_vertical_line_orientation() {
        let px: Vec<(usize, usize)> = (0..9).map(|r| (r, 3)).collect();
        let fit = fit_ellipse(&px);
        assert!(fit.orientation.abs() < 1e-9, "vertical blob aligns with row axis");
    }

    #[test]
    fn test_diagonal_line_orientation() {
        let px: Vec<(usize, usize)> = (0..9).map(|i| (i, i)).collect();
        let fit = fit_ellipse(&px);
        assert!(
            (fit.orientation - std::f64::consts::FRAC_PI_4).abs() < 1e-9,
            "diagonal blob at pi/4, got {}",
            fit.orientation
        );
    }
}

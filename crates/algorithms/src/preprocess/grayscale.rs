//! Grayscale conversion
//!
//! Collapses a color micrograph to single-channel intensity using the
//! ITU-R BT.601 luminance weights. Output is `f64` in [0, 1] so downstream
//! stages work in one value domain regardless of the input encoding.

use grainseg_core::{Grid, Micrograph};

const LUMA_R: f64 = 0.299;
const LUMA_G: f64 = 0.587;
const LUMA_B: f64 = 0.114;

/// Convert a micrograph to floating point intensity in [0, 1].
///
/// Grayscale inputs are rescaled from 0..=255; color inputs are collapsed
/// with the BT.601 luminance weights first.
pub fn to_intensity(image: &Micrograph) -> Grid<f64> {
    match image {
        Micrograph::Gray(g) => Grid::from_array(g.data().mapv(|v| v as f64 / 255.0)),
        Micrograph::Rgb(g) => Grid::from_array(g.data().mapv(|px| {
            let luma = LUMA_R * px.r() as f64 + LUMA_G * px.g() as f64 + LUMA_B * px.b() as f64;
            luma / 255.0
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grainseg_core::Rgb8;

    #[test]
    fn test_gray_rescale() {
        let mut g: Grid<u8> = Grid::new(2, 2);
        g.set(0, 0, 255).unwrap();
        g.set(1, 1, 51).unwrap();

        let intensity = to_intensity(&Micrograph::Gray(g));
        assert!((intensity.get(0, 0).unwrap() - 1.0).abs() < 1e-12);
        assert!((intensity.get(1, 1).unwrap() - 0.2).abs() < 1e-12);
        assert_eq!(intensity.get(0, 1).unwrap(), 0.0);
    }

    #[test]
    fn test_rgb_luminance_weights() {
        let mut g: Grid<Rgb8> = Grid::new(1, 3);
        g.set(0, 0, Rgb8([255, 0, 0])).unwrap();
        g.set(0, 1, Rgb8([0, 255, 0])).unwrap();
        g.set(0, 2, Rgb8([0, 0, 255])).unwrap();

        let intensity = to_intensity(&Micrograph::Rgb(g));
        assert!((intensity.get(0, 0).unwrap() - 0.299).abs() < 1e-12);
        assert!((intensity.get(0, 1).unwrap() - 0.587).abs() < 1e-12);
        assert!((intensity.get(0, 2).unwrap() - 0.114).abs() < 1e-12);
    }

    #[test]
    fn test_white_maps_to_one() {
        let g: Grid<Rgb8> = Grid::filled(2, 2, Rgb8([255, 255, 255]));
        let intensity = to_intensity(&Micrograph::Rgb(g));
        assert!((intensity.get(1, 1).unwrap() - 1.0).abs() < 1e-9);
    }
}

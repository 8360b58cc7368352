//! Preprocessing: grayscale conversion and Gaussian smoothing
//!
//! Stage 1 of the pipeline. Converts the input micrograph to a floating
//! point intensity grid and suppresses sensor noise before thresholding.

mod gaussian;
mod grayscale;

pub use gaussian::gaussian_blur;
pub use grayscale::to_intensity;

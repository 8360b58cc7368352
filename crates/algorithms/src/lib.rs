//! # Grainseg Algorithms
//!
//! Segmentation and morphometry algorithms for metallurgical micrographs.
//!
//! ## Pipeline stages
//!
//! - **preprocess**: Grayscale conversion and Gaussian smoothing
//! - **threshold**: Adaptive local-mean thresholding
//! - **morphology**: Binary opening, small-object removal, hole filling
//! - **labeling**: Connected-component labeling
//! - **measure**: Per-region shape and size descriptors
//! - **pipeline**: The composed segment-and-measure entry point

pub mod labeling;
pub mod measure;
pub mod morphology;
pub mod pipeline;
pub mod preprocess;
pub mod threshold;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::labeling::label_components;
    pub use crate::measure::{measure_regions, RegionRecord};
    pub use crate::morphology::{
        binary_open, clean, fill_small_holes, remove_small_objects, StructuringElement,
    };
    pub use crate::pipeline::{
        segment_and_measure, GrainSegmentation, PipelineParams, Segmentation,
    };
    pub use crate::preprocess::{gaussian_blur, to_intensity};
    pub use crate::threshold::{force_odd, local_mean_threshold};
    pub use grainseg_core::prelude::*;
}

//! The composed segmentation pipeline
//!
//! blur -> threshold -> clean -> label -> measure, as one blocking call.
//! Every stage is a pure function of its input and the five scalar
//! parameters; the pipeline holds no state between invocations, so
//! concurrent runs on different images need no locking.

use grainseg_core::{Algorithm, Error, LabelMap, Mask, Micrograph, Result};

use crate::labeling::label_components;
use crate::measure::{measure_regions, RegionRecord};
use crate::morphology::{clean, FOREGROUND_CONNECTIVITY};
use crate::preprocess::{gaussian_blur, to_intensity};
use crate::threshold::local_mean_threshold;

/// The five scalar parameters controlling a pipeline run.
///
/// Supplied per invocation; the pipeline has no memory of prior values.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineParams {
    /// Gaussian blur strength in pixels (must be > 0)
    pub sigma: f64,
    /// Local threshold window side length (forced odd)
    pub block_size: usize,
    /// Multiplier applied to the local mean threshold (must be > 0)
    pub threshold_factor: f64,
    /// Minimum pixel area for a component to survive cleanup (0 = keep all)
    pub min_size: usize,
    /// Maximum pixel area for a hole to be filled (0 = fill none)
    pub hole_size: usize,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            sigma: 2.0,
            block_size: 35,
            threshold_factor: 1.0,
            min_size: 64,
            hole_size: 64,
        }
    }
}

impl PipelineParams {
    /// Validate the scalar parameters before any image work begins.
    pub fn validate(&self) -> Result<()> {
        if !self.sigma.is_finite() || self.sigma <= 0.0 {
            return Err(Error::invalid_parameter(
                "sigma",
                self.sigma,
                "blur strength must be a positive finite number",
            ));
        }
        if !self.threshold_factor.is_finite() || self.threshold_factor <= 0.0 {
            return Err(Error::invalid_parameter(
                "threshold_factor",
                self.threshold_factor,
                "threshold multiplier must be a positive finite number",
            ));
        }
        Ok(())
    }
}

/// All artifacts of one pipeline run.
#[derive(Debug, Clone)]
pub struct Segmentation {
    /// Binary mask after morphological cleanup (and inversion, if requested)
    pub cleaned_mask: Mask,
    /// Connected-component label map over the cleaned mask
    pub label_map: LabelMap,
    /// Number of detected grains (distinct positive labels)
    pub num_grains: usize,
    /// One record per grain, ascending label order
    pub regions: Vec<RegionRecord>,
    /// Whether the mask was inverted before labeling; exporters must carry
    /// this alongside the measurements
    pub inverted: bool,
}

/// Run the full segmentation pipeline on a micrograph.
///
/// Stages: grayscale/blur, adaptive local-mean threshold, morphological
/// cleanup, connected-component labeling, region measurement. When `invert`
/// is set the cleaned mask is flipped before labeling, for micrographs
/// where grains image darker than the matrix.
///
/// Zero detected grains is a valid outcome: the label map is all zeros and
/// `regions` is empty with its schema intact.
///
/// # Errors
/// `InvalidParameter` when a scalar parameter fails validation; no image
/// processing is performed in that case.
pub fn segment_and_measure(
    image: &Micrograph,
    params: &PipelineParams,
    invert: bool,
) -> Result<Segmentation> {
    params.validate()?;

    let intensity = to_intensity(image);
    let smoothed = gaussian_blur(&intensity, params.sigma)?;
    let binary = local_mean_threshold(&smoothed, params.block_size, params.threshold_factor)?;
    let cleaned = clean(&binary, params.min_size, params.hole_size)?;

    let final_mask = if invert { cleaned.invert() } else { cleaned };
    let (label_map, num_grains) = label_components(&final_mask, FOREGROUND_CONNECTIVITY);

    // Intensity-weighted metrics use the unblurred grayscale image
    let regions = measure_regions(&label_map, Some(&intensity))?;

    Ok(Segmentation {
        cleaned_mask: final_mask,
        label_map,
        num_grains,
        regions,
        inverted: invert,
    })
}

/// Pipeline parameters plus the inversion flag, for the [`Algorithm`] API
#[derive(Debug, Clone, Default)]
pub struct SegmentationParams {
    pub pipeline: PipelineParams,
    pub invert: bool,
}

/// Grain segmentation as a named algorithm
#[derive(Debug, Clone, Default)]
pub struct GrainSegmentation;

impl Algorithm for GrainSegmentation {
    type Input = Micrograph;
    type Output = Segmentation;
    type Params = SegmentationParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "GrainSegmentation"
    }

    fn description(&self) -> &'static str {
        "Segment grains in a micrograph and measure per-grain morphometry"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        segment_and_measure(&input, &params.pipeline, params.invert)
    }
}

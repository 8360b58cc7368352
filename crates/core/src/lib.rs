//! # Grainseg Core
//!
//! Core types, traits and errors for the grainseg micrograph analysis library.
//!
//! This crate provides:
//! - `Grid<T>`: Generic 2-D grid type used for images, masks and label maps
//! - `Micrograph`: Input image (grayscale or RGB)
//! - `Connectivity`: Pixel adjacency convention shared by all stages
//! - Algorithm trait for consistent API

pub mod error;
pub mod grid;
pub mod image;

pub use error::{Error, Result};
pub use grid::{Connectivity, Grid, GridElement, LabelMap, Mask};
pub use image::{Micrograph, Rgb8};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::grid::{Connectivity, Grid, GridElement, LabelMap, Mask};
    pub use crate::image::{Micrograph, Rgb8};
    pub use crate::Algorithm;
}

/// Core trait for all algorithms in grainseg.
///
/// Algorithms are pure functions that transform input data according to parameters.
pub trait Algorithm {
    /// Input type for the algorithm
    type Input;
    /// Output type for the algorithm
    type Output;
    /// Parameters controlling algorithm behavior
    type Params: Default;
    /// Error type for algorithm execution
    type Error: std::error::Error;

    /// Returns the algorithm name
    fn name(&self) -> &'static str;

    /// Returns a description of what the algorithm does
    fn description(&self) -> &'static str;

    /// Execute the algorithm
    fn execute(
        &self,
        input: Self::Input,
        params: Self::Params,
    ) -> std::result::Result<Self::Output, Self::Error>;

    /// Execute with default parameters
    fn execute_default(&self, input: Self::Input) -> std::result::Result<Self::Output, Self::Error> {
        self.execute(input, Self::Params::default())
    }
}

//! Input image types
//!
//! A micrograph enters the pipeline either as single-channel intensity or as
//! interleaved RGB. Decoding image files into these types is the caller's
//! responsibility; the core never touches the filesystem.

use crate::grid::{Grid, GridElement};

/// One RGB pixel, 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb8(pub [u8; 3]);

impl Rgb8 {
    pub fn r(&self) -> u8 {
        self.0[0]
    }

    pub fn g(&self) -> u8 {
        self.0[1]
    }

    pub fn b(&self) -> u8 {
        self.0[2]
    }
}

impl GridElement for Rgb8 {
    fn zero() -> Self {
        Rgb8([0, 0, 0])
    }
}

/// A decoded micrograph image.
///
/// The pipeline reads the image and produces new derived grids; the input is
/// never mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub enum Micrograph {
    /// Single-channel 8-bit intensity image
    Gray(Grid<u8>),
    /// Three-channel 8-bit color image
    Rgb(Grid<Rgb8>),
}

impl Micrograph {
    /// Dimensions as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        match self {
            Micrograph::Gray(g) => g.shape(),
            Micrograph::Rgb(g) => g.shape(),
        }
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.shape().0
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.shape().1
    }

    /// Number of channels (1 for grayscale, 3 for RGB)
    pub fn channels(&self) -> usize {
        match self {
            Micrograph::Gray(_) => 1,
            Micrograph::Rgb(_) => 3,
        }
    }
}

//! Binary morphology for mask cleanup
//!
//! Stage 3 of the pipeline. Three ordered sub-steps:
//! - **Opening**: erosion then dilation, strips thin noise and spurious
//!   bridges between grains
//! - **Small-object removal**: drops components below a pixel-area floor
//! - **Hole filling**: flips enclosed background pockets below an area cap
//!
//! Opening runs first so noise specks are not miscounted as valid small
//! objects by the size filter.

mod binary;
mod element;
mod filter;

pub use binary::{binary_dilate, binary_erode, binary_open};
pub use element::StructuringElement;
pub use filter::{clean, fill_small_holes, remove_small_objects};

pub(crate) use filter::FOREGROUND_CONNECTIVITY;

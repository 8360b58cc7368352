//! Grid types for images, masks and label maps

mod connectivity;
mod element;
#[allow(clippy::module_inception)]
mod grid;

pub use connectivity::Connectivity;
pub use element::GridElement;
pub use grid::{Grid, GridStatistics};

/// Binary foreground/background mask
pub type Mask = Grid<bool>;

/// Connected-component label map: 0 = background, labels are dense from 1
pub type LabelMap = Grid<u32>;

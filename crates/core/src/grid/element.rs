//! Grid element trait for generic cell values

use std::fmt::Debug;

/// Trait for types that can be stored in a grid cell.
///
/// Unlike a general numeric raster, grainseg grids hold a closed set of cell
/// types: intensity samples (`u8`, `f32`, `f64`), mask bits (`bool`),
/// component labels (`u32`) and packed color pixels. The only shared
/// requirement is a zero/empty value for freshly allocated grids.
pub trait GridElement: Copy + Clone + Debug + PartialEq + Send + Sync + 'static {
    /// The value a newly allocated grid is filled with
    fn zero() -> Self;
}

macro_rules! impl_grid_element {
    ($t:ty, $zero:expr) => {
        impl GridElement for $t {
            fn zero() -> Self {
                $zero
            }
        }
    };
}

impl_grid_element!(u8, 0);
impl_grid_element!(u16, 0);
impl_grid_element!(u32, 0);
impl_grid_element!(i32, 0);
impl_grid_element!(f32, 0.0);
impl_grid_element!(f64, 0.0);
impl_grid_element!(bool, false);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_values() {
        assert_eq!(<u8 as GridElement>::zero(), 0);
        assert_eq!(<u32 as GridElement>::zero(), 0);
        assert_eq!(<f64 as GridElement>::zero(), 0.0);
        assert!(!<bool as GridElement>::zero());
    }
}

//! Pixel adjacency conventions
//!
//! The cleaner and the labeler must agree on which pixels count as
//! neighbors; a mismatch between the two stages silently splits or merges
//! components. The convention is therefore a shared core type rather than a
//! per-stage constant.

/// Pixel adjacency used for connected components and hole filling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connectivity {
    /// Edge-adjacent neighbors only (N, S, E, W)
    Four,
    /// Edge- and corner-adjacent neighbors
    #[default]
    Eight,
}

const FOUR_OFFSETS: [(isize, isize); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

const EIGHT_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

impl Connectivity {
    /// Neighbor offsets as (row_offset, col_offset), in scan order
    pub fn offsets(&self) -> &'static [(isize, isize)] {
        match self {
            Connectivity::Four => &FOUR_OFFSETS,
            Connectivity::Eight => &EIGHT_OFFSETS,
        }
    }

    /// The dual convention for the complement of a mask.
    ///
    /// 8-connected foreground pairs with 4-connected background (and vice
    /// versa); using the same convention on both sides lets a one-pixel
    /// diagonal gap count as both connected foreground and connected
    /// background, which is topologically inconsistent.
    pub fn dual(&self) -> Connectivity {
        match self {
            Connectivity::Four => Connectivity::Eight,
            Connectivity::Eight => Connectivity::Four,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_counts() {
        assert_eq!(Connectivity::Four.offsets().len(), 4);
        assert_eq!(Connectivity::Eight.offsets().len(), 8);
    }

    #[test]
    fn test_no_center_offset() {
        assert!(!Connectivity::Four.offsets().contains(&(0, 0)));
        assert!(!Connectivity::Eight.offsets().contains(&(0, 0)));
    }

    #[test]
    fn test_eight_includes_diagonals() {
        let offsets = Connectivity::Eight.offsets();
        assert!(offsets.contains(&(-1, -1)));
        assert!(offsets.contains(&(1, 1)));
        assert!(!Connectivity::Four.offsets().contains(&(1, 1)));
    }

    #[test]
    fn test_dual_is_involution() {
        assert_eq!(Connectivity::Four.dual(), Connectivity::Eight);
        assert_eq!(Connectivity::Eight.dual().dual(), Connectivity::Eight);
    }
}

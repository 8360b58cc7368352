//! Structuring element definitions for binary morphology
//!
//! A structuring element defines the neighborhood shape used in erosion and
//! dilation. The cleaner uses a disk so opening is direction-neutral: square
//! elements visibly square off grain corners at small radii.

use grainseg_core::{Error, Result};

/// Shape of a structuring element for morphological operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuringElement {
    /// Disk of given radius: cells with dr^2 + dc^2 <= r^2
    Disk(usize),
    /// Square element of given radius (side = 2*radius + 1)
    Square(usize),
    /// Cross (plus-shaped) element of given radius
    Cross(usize),
}

impl Default for StructuringElement {
    fn default() -> Self {
        StructuringElement::Disk(2)
    }
}

impl StructuringElement {
    /// Validate the structuring element
    pub fn validate(&self) -> Result<()> {
        let r = self.radius();
        if r == 0 {
            return Err(Error::invalid_parameter(
                "radius",
                r,
                "structuring element radius must be at least 1",
            ));
        }
        Ok(())
    }

    /// Radius of the structuring element
    pub fn radius(&self) -> usize {
        match self {
            StructuringElement::Disk(r)
            | StructuringElement::Square(r)
            | StructuringElement::Cross(r) => *r,
        }
    }

    /// Whether a relative position belongs to the element
    pub fn contains(&self, dr: isize, dc: isize) -> bool {
        let r = self.radius() as isize;
        match self {
            StructuringElement::Disk(_) => dr * dr + dc * dc <= r * r,
            StructuringElement::Square(_) => dr.abs() <= r && dc.abs() <= r,
            StructuringElement::Cross(_) => {
                (dc == 0 && dr.abs() <= r) || (dr == 0 && dc.abs() <= r)
            }
        }
    }

    /// Compute (dr, dc) offsets for all active cells, center included,
    /// in scan order
    pub fn offsets(&self) -> Vec<(isize, isize)> {
        let r = self.radius() as isize;
        let mut offsets = Vec::new();
        for dr in -r..=r {
            for dc in -r..=r {
                if self.contains(dr, dc) {
                    offsets.push((dr, dc));
                }
            }
        }
        offsets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disk_two_offsets() {
        // Disk(2) keeps cells within Euclidean distance 2: a 13-cell
        // diamond-with-edges, matching the classic disk(2) footprint
        let offsets = StructuringElement::Disk(2).offsets();
        assert_eq!(offsets.len(), 13);
        assert!(offsets.contains(&(0, 0)));
        assert!(offsets.contains(&(0, 2)));
        assert!(offsets.contains(&(1, 1)));
        assert!(!offsets.contains(&(2, 2)));
    }

    #[test]
    fn test_disk_one_is_cross() {
        // Distance-1 disk degenerates to the 5-cell cross
        let disk = StructuringElement::Disk(1).offsets();
        let cross = StructuringElement::Cross(1).offsets();
        assert_eq!(disk, cross);
    }

    #[test]
    fn test_square_offsets() {
        let offsets = StructuringElement::Square(1).offsets();
        assert_eq!(offsets.len(), 9);
        assert!(offsets.contains(&(-1, -1)));
        assert!(offsets.contains(&(1, 1)));
    }

    #[test]
    fn test_cross_offsets() {
        let offsets = StructuringElement::Cross(2).offsets();
        // Center + four arms of length 2
        assert_eq!(offsets.len(), 9);
        assert!(offsets.contains(&(-2, 0)));
        assert!(offsets.contains(&(0, 2)));
        assert!(!offsets.contains(&(1, 1)));
    }

    #[test]
    fn test_validate_zero_radius() {
        assert!(StructuringElement::Disk(0).validate().is_err());
        assert!(StructuringElement::Square(0).validate().is_err());
        assert!(StructuringElement::Cross(0).validate().is_err());
        assert!(StructuringElement::Disk(2).validate().is_ok());
    }

    #[test]
    fn test_default_is_disk_two() {
        assert_eq!(StructuringElement::default(), StructuringElement::Disk(2));
    }
}

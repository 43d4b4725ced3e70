//! Morphological closing (dilation followed by erosion)
//!
//! Bridges narrow gaps in pore-wall boundaries so that one pore split by a
//! thin line of segmentation noise is counted once, not twice.

use poremet_core::{Algorithm, BinaryMask, Error, Result};

use super::dilate::dilate;
use super::element::StructuringElement;
use super::erode::erode;

/// Parameters for morphological closing
#[derive(Debug, Clone, Default)]
pub struct ClosingParams {
    /// Structuring element shape
    pub element: StructuringElement,
}

/// Closing algorithm
#[derive(Debug, Clone, Default)]
pub struct Closing;

impl Algorithm for Closing {
    type Input = BinaryMask;
    type Output = BinaryMask;
    type Params = ClosingParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Closing"
    }

    fn description(&self) -> &'static str {
        "Morphological closing (dilation then erosion) to bridge narrow gaps"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        closing(&input, &params.element)
    }
}

/// Perform morphological closing on a mask.
///
/// Closing = dilate then erode. Fills solid gaps narrower than the element
/// while leaving larger solid structures in place.
pub fn closing(mask: &BinaryMask, element: &StructuringElement) -> Result<BinaryMask> {
    let dilated = dilate(mask, element)?;
    erode(&dilated, element)
}

#[cfg(test)]
mod tests {
    use super::*;
    use poremet_core::Grid;

    #[test]
    fn test_closing_fills_crack() {
        // Two pore slabs separated by a 1-pixel solid crack
        let mut mask: BinaryMask = Grid::new(9, 9);
        for r in 2..7 {
            for c in 2..7 {
                if c != 4 {
                    mask.set(r, c, true).unwrap();
                }
            }
        }

        let result = closing(&mask, &StructuringElement::Square(1)).unwrap();
        for r in 3..6 {
            assert!(result.get(r, 4).unwrap(), "crack at ({}, 4) not closed", r);
        }
    }

    #[test]
    fn test_closing_leaves_wide_gap() {
        // A 3-pixel gap is wider than the element and must survive
        let mut mask: BinaryMask = Grid::new(9, 11);
        for r in 2..7 {
            for c in 2..9 {
                if !(4..7).contains(&c) {
                    mask.set(r, c, true).unwrap();
                }
            }
        }

        let result = closing(&mask, &StructuringElement::Square(1)).unwrap();
        assert!(!result.get(4, 5).unwrap());
    }

    #[test]
    fn test_closing_idempotent() {
        let mut mask: BinaryMask = Grid::new(9, 9);
        for r in 2..7 {
            for c in 2..7 {
                if c != 4 {
                    mask.set(r, c, true).unwrap();
                }
            }
        }

        let once = closing(&mask, &StructuringElement::Square(1)).unwrap();
        let twice = closing(&once, &StructuringElement::Square(1)).unwrap();
        assert_eq!(once, twice);
    }
}

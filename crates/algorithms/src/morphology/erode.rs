//! Binary morphological erosion
//!
//! A pore pixel survives only if every structuring-element neighbor is also
//! pore. Shrinks pore regions and deletes features thinner than the element.

use crate::maybe_rayon::*;
use poremet_core::{Algorithm, BinaryMask, Error, Result};

use super::element::StructuringElement;

/// Parameters for morphological erosion
#[derive(Debug, Clone, Default)]
pub struct ErodeParams {
    /// Structuring element shape
    pub element: StructuringElement,
}

/// Erosion algorithm
#[derive(Debug, Clone, Default)]
pub struct Erode;

impl Algorithm for Erode {
    type Input = BinaryMask;
    type Output = BinaryMask;
    type Params = ErodeParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Erode"
    }

    fn description(&self) -> &'static str {
        "Binary erosion (pore pixel survives only with a fully-pore neighborhood)"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        erode(&input, &params.element)
    }
}

/// Perform binary erosion on a mask.
///
/// Offsets that fall outside the image are ignored rather than counted as
/// solid, so a uniform mask is a fixed point and pore regions touching the
/// border are not eaten from the edge inward. Output dimensions equal input
/// dimensions.
pub fn erode(mask: &BinaryMask, element: &StructuringElement) -> Result<BinaryMask> {
    element.validate()?;

    let (rows, cols) = mask.shape();
    if mask.is_empty() {
        return Ok(mask.clone());
    }
    let offsets = element.offsets();

    let data: Vec<bool> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![false; cols];
            for (col, slot) in row_data.iter_mut().enumerate() {
                if !unsafe { mask.get_unchecked(row, col) } {
                    continue;
                }

                let mut keep = true;
                for &(dr, dc) in &offsets {
                    let nr = row as isize + dr;
                    let nc = col as isize + dc;
                    if nr < 0 || nc < 0 || nr >= rows as isize || nc >= cols as isize {
                        continue;
                    }
                    if !unsafe { mask.get_unchecked(nr as usize, nc as usize) } {
                        keep = false;
                        break;
                    }
                }
                *slot = keep;
            }
            row_data
        })
        .collect();

    BinaryMask::from_vec(data, rows, cols)
}

#[cfg(test)]
mod tests {
    use super::*;
    use poremet_core::Grid;

    fn block_mask(rows: usize, cols: usize, r0: usize, c0: usize, size: usize) -> BinaryMask {
        let mut mask: BinaryMask = Grid::new(rows, cols);
        for r in r0..r0 + size {
            for c in c0..c0 + size {
                mask.set(r, c, true).unwrap();
            }
        }
        mask
    }

    #[test]
    fn test_erode_uniform_mask_is_fixed_point() {
        let mask: BinaryMask = Grid::filled(7, 7, true);
        let result = erode(&mask, &StructuringElement::Square(1)).unwrap();
        assert_eq!(result.count_true(), 49);
    }

    #[test]
    fn test_erode_shrinks_block() {
        let mask = block_mask(9, 9, 3, 3, 3);
        let result = erode(&mask, &StructuringElement::Square(1)).unwrap();
        // Only the center of the 3x3 block has a fully-pore neighborhood
        assert_eq!(result.count_true(), 1);
        assert!(result.get(4, 4).unwrap());
    }

    #[test]
    fn test_erode_removes_single_pixel() {
        let mut mask: BinaryMask = Grid::new(7, 7);
        mask.set(3, 3, true).unwrap();
        let result = erode(&mask, &StructuringElement::Square(1)).unwrap();
        assert_eq!(result.count_true(), 0);
    }

    #[test]
    fn test_erode_border_block_survives() {
        // 2x2 block in the corner: out-of-bounds offsets are ignored, so the
        // corner pixel's in-bounds neighborhood is fully pore
        let mask = block_mask(7, 7, 0, 0, 2);
        let result = erode(&mask, &StructuringElement::Square(1)).unwrap();
        assert!(result.get(0, 0).unwrap());
        assert!(!result.get(1, 1).unwrap());
    }

    #[test]
    fn test_erode_preserves_dimensions() {
        let mask: BinaryMask = Grid::new(5, 11);
        let result = erode(&mask, &StructuringElement::Disk(2)).unwrap();
        assert_eq!(result.shape(), (5, 11));
    }

    #[test]
    fn test_erode_invalid_element() {
        let mask: BinaryMask = Grid::new(5, 5);
        assert!(erode(&mask, &StructuringElement::Square(0)).is_err());
    }
}

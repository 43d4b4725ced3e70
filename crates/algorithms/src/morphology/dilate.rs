//! Binary morphological dilation
//!
//! A pixel becomes pore if any structuring-element neighbor is pore.
//! Expands pore regions and bridges gaps narrower than the element.

use crate::maybe_rayon::*;
use poremet_core::{Algorithm, BinaryMask, Error, Result};

use super::element::StructuringElement;

/// Parameters for morphological dilation
#[derive(Debug, Clone, Default)]
pub struct DilateParams {
    /// Structuring element shape
    pub element: StructuringElement,
}

/// Dilation algorithm
#[derive(Debug, Clone, Default)]
pub struct Dilate;

impl Algorithm for Dilate {
    type Input = BinaryMask;
    type Output = BinaryMask;
    type Params = DilateParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Dilate"
    }

    fn description(&self) -> &'static str {
        "Binary dilation (pixel becomes pore with any pore neighbor)"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        dilate(&input, &params.element)
    }
}

/// Perform binary dilation on a mask.
///
/// Offsets falling outside the image contribute nothing. Output dimensions
/// equal input dimensions.
pub fn dilate(mask: &BinaryMask, element: &StructuringElement) -> Result<BinaryMask> {
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
                let mut hit = false;
                for &(dr, dc) in &offsets {
                    let nr = row as isize + dr;
                    let nc = col as isize + dc;
                    if nr < 0 || nc < 0 || nr >= rows as isize || nc >= cols as isize {
                        continue;
                    }
                    if unsafe { mask.get_unchecked(nr as usize, nc as usize) } {
                        hit = true;
                        break;
                    }
                }
                *slot = hit;
            }
            row_data
        })
        .collect();

    BinaryMask::from_vec(data, rows, cols)
}

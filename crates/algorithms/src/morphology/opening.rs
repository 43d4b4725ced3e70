//! Morphological opening (erosion followed by dilation)
//!
//! Deletes isolated speckles smaller than the structuring element that
//! survived thresholding but are not true pores.

use poremet_core::{Algorithm, BinaryMask, Error, Result};

use super::dilate::dilate;
use super::element::StructuringElement;
use super::erode::erode;

/// Parameters for morphological opening
#[derive(Debug, Clone, Default)]
pub struct OpeningParams {
    /// Structuring element shape
    pub element: StructuringElement,
}

/// Opening algorithm
#[derive(Debug, Clone, Default)]
pub struct Opening;

impl Algorithm for Opening {
    type Input = BinaryMask;
    type Output = BinaryMask;
    type Params = OpeningParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Opening"
    }

    fn description(&self) -> &'static str {
        "Morphological opening (erosion then dilation) to remove speckle noise"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        opening(&input, &params.element)
    }
}

/// Perform morphological opening on a mask.
///
/// Opening = erode then dilate. Removes pore features smaller than the
/// element while preserving the shape of larger pores.
pub fn opening(mask: &BinaryMask, element: &StructuringElement) -> Result<BinaryMask> {
    let eroded = erode(mask, element)?;
    dilate(&eroded, element)
}

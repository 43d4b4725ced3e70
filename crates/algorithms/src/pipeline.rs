//! The full analysis pipeline
//!
//! Wires the stages strictly left to right: intensity field → binary mask →
//! cleaned mask → candidate regions → accepted regions → measurements.
//! No stage feeds back into an earlier one, and every run owns its
//! intermediate state exclusively, so batch drivers may run one pipeline
//! per image on worker threads without coordination.

use poremet_core::{Algorithm, Error, IntensityField, Result};

use crate::filter::filter_regions;
use crate::metrics::{aggregate, MeasurementResult};
use crate::morphology::{clean, CleanupParams};
use crate::regions::{extract, ExtractionParams};
use crate::segmentation::{segment, SegmentationParams, ThresholdMode};

/// Parameters for a full analysis run.
///
/// There are no process-wide defaults baked into the algorithms; every
/// entry point receives its configuration explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisParams {
    /// Physical length of one pixel edge (e.g. µm per pixel)
    pub pixel_size: f64,
    /// Minimum pixel area for a counted pore
    pub min_area_px: usize,
    /// Minimum circularity for a counted pore, in [0, 1]
    pub min_circularity: f64,
    /// Segmentation configuration
    pub segmentation: SegmentationParams,
    /// Mask cleanup configuration
    pub cleanup: CleanupParams,
    /// Region extraction configuration
    pub extraction: ExtractionParams,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            pixel_size: 1.0,
            min_area_px: 0,
            min_circularity: 0.0,
            segmentation: SegmentationParams::default(),
            cleanup: CleanupParams::default(),
            extraction: ExtractionParams::default(),
        }
    }
}

impl AnalysisParams {
    /// Validate the configuration before running.
    pub fn validate(&self) -> Result<()> {
        if !self.pixel_size.is_finite() || self.pixel_size <= 0.0 {
            return Err(Error::InvalidParameter {
                name: "pixel_size",
                value: self.pixel_size.to_string(),
                reason: "pixel size must be a positive finite length".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.min_circularity) {
            return Err(Error::InvalidParameter {
                name: "min_circularity",
                value: self.min_circularity.to_string(),
                reason: "circularity threshold must lie in [0, 1]".to_string(),
            });
        }
        if let ThresholdMode::Adaptive { window_size, .. } = self.segmentation.mode {
            if window_size < 3 || window_size % 2 == 0 {
                return Err(Error::InvalidParameter {
                    name: "window_size",
                    value: window_size.to_string(),
                    reason: "adaptive window must be odd and at least 3".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Full pore analysis algorithm
#[derive(Debug, Clone, Default)]
pub struct PoreAnalysis;

impl Algorithm for PoreAnalysis {
    type Input = IntensityField;
    type Output = MeasurementResult;
    type Params = AnalysisParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "PoreAnalysis"
    }

    fn description(&self) -> &'static str {
        "Segment, clean, extract, filter and measure pores in a micrograph"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        analyze(&input, &params)
    }
}

/// Run the full pipeline over one intensity field.
///
/// Deterministic: repeated runs over the same field and parameters yield
/// bit-identical results. Configuration and degenerate-input errors abort
/// the run immediately; zero surviving regions is a normal result with
/// zero counts and zero means.
pub fn analyze(field: &IntensityField, params: &AnalysisParams) -> Result<MeasurementResult> {
    params.validate()?;

    let mask = segment(field, &params.segmentation)?;
    debug_assert_eq!(mask.shape(), field.shape());

    let cleaned = clean(&mask, &params.cleanup)?;
    debug_assert_eq!(cleaned.shape(), field.shape());

    let candidates = extract(&cleaned, &params.extraction);
    let (accepted, rejected) =
        filter_regions(candidates, params.min_area_px, params.min_circularity);

    aggregate(&accepted, &cleaned, params.pixel_size, rejected)
}

//! # PoreMet Algorithms
//!
//! Pore-extraction and metrology pipeline for greyscale micrographs.
//!
//! The pipeline is a fixed left-to-right chain:
//!
//! 1. **segmentation**: intensity field → binary pore/solid mask
//!    (Otsu global threshold or local-mean adaptive threshold)
//! 2. **morphology**: structuring-element cleanup (closing/opening) or
//!    size-threshold cleanup (small-object removal, small-hole filling)
//! 3. **regions**: connected-component extraction with optional
//!    boundary tracing
//! 4. **filter**: area and circularity rejection of non-pore artifacts
//! 5. **metrics**: unit conversion, equivalent diameters, porosity
//!
//! The [`pipeline::analyze`] entry point wires the stages together.

mod maybe_rayon;

pub mod filter;
pub mod metrics;
pub mod morphology;
pub mod pipeline;
pub mod regions;
pub mod segmentation;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::filter::filter_regions;
    pub use crate::metrics::{aggregate, MeasurementResult, PoreMeasurement};
    pub use crate::morphology::{
        clean, closing, dilate, erode, fill_small_holes, opening, remove_small_objects,
        CleanupParams, CleanupStrategy, StructuringElement,
    };
    pub use crate::pipeline::{analyze, AnalysisParams, PoreAnalysis};
    pub use crate::regions::{extract, ExtractRegions, ExtractionParams, Region};
    pub use crate::segmentation::{segment, SegmentationParams, ThresholdMode};
    pub use poremet_core::prelude::*;
}

//! Segmentation: greyscale intensity field → binary pore/solid mask
//!
//! Two threshold modes are provided:
//! - **Global**: Otsu's method, maximizing inter-class variance over the
//!   256-bin intensity histogram. Parameter-free and deterministic.
//! - **Adaptive**: local-mean threshold for unevenly illuminated images,
//!   comparing each pixel against the mean of a surrounding window.
//!
//! Pore pixels are the *darker* class by default; the `invert` flag flips
//! polarity for imagery where pores appear bright.

mod adaptive;
mod otsu;
mod smooth;

pub use adaptive::adaptive_threshold;
pub use otsu::otsu_threshold;
pub use smooth::binomial_blur;

use poremet_core::{Algorithm, BinaryMask, Error, IntensityField, Result};

/// Threshold selection mode
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ThresholdMode {
    /// Single global cutoff chosen by Otsu's method
    #[default]
    Global,
    /// Per-pixel cutoff from the mean of a surrounding window
    Adaptive {
        /// Window side length in pixels, must be odd and >= 3
        window_size: usize,
        /// Constant subtracted from the local mean before comparison
        offset: f64,
    },
}

/// Parameters for segmentation
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentationParams {
    /// Pre-smooth with a 5-tap binomial blur before threshold selection
    pub blur: bool,
    /// Treat the *brighter* class as pore instead of the darker one
    pub invert: bool,
    /// Threshold selection mode
    pub mode: ThresholdMode,
}

impl Default for SegmentationParams {
    fn default() -> Self {
        Self {
            blur: true,
            invert: false,
            mode: ThresholdMode::Global,
        }
    }
}

/// Segmentation algorithm
#[derive(Debug, Clone, Default)]
pub struct Segment;

impl Algorithm for Segment {
    type Input = IntensityField;
    type Output = BinaryMask;
    type Params = SegmentationParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Segment"
    }

    fn description(&self) -> &'static str {
        "Threshold a greyscale field into a binary pore/solid mask"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        segment(&input, &params)
    }
}

/// Convert a greyscale intensity field into a binary pore mask.
///
/// The input field is never modified; smoothing operates on a copy.
///
/// # Errors
/// [`Error::DegenerateInput`] if the field is empty, or (in global mode)
/// if it has zero intensity variance, in which case Otsu's threshold is
/// undefined. [`Error::InvalidParameter`] for an even or sub-3 adaptive
/// window.
pub fn segment(field: &IntensityField, params: &SegmentationParams) -> Result<BinaryMask> {
    if field.is_empty() {
        return Err(Error::DegenerateInput("empty intensity field".into()));
    }

    let smoothed;
    let input = if params.blur {
        smoothed = binomial_blur(field);
        &smoothed
    } else {
        field
    };

    match params.mode {
        ThresholdMode::Global => {
            let threshold = otsu_threshold(input)?;
            let mask = input
                .iter()
                .map(|&v| {
                    if params.invert {
                        v > threshold
                    } else {
                        v <= threshold
                    }
                })
                .collect();
            BinaryMask::from_vec(mask, field.rows(), field.cols())
        }
        ThresholdMode::Adaptive {
            window_size,
            offset,
        } => adaptive_threshold(input, window_size, offset, params.invert),
    }
}

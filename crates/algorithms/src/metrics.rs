//! Metric aggregation: accepted regions → physical measurements
//!
//! Converts pixel areas to physical units via the calibration factor,
//! derives equivalent-circle diameters, and computes whole-image porosity.
//!
//! Porosity is deliberately computed over the *cleaned mask*, not the
//! accepted regions: it answers "what fraction of the material is void",
//! independent of which individual voids pass the size/shape filter used
//! for counting discrete pores.

use poremet_core::{BinaryMask, Error, Result};

use crate::regions::Region;

/// Physical measurements of one accepted pore
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoreMeasurement {
    /// Area in physical units (calibration length squared)
    pub area_physical: f64,
    /// Diameter of the circle with the same area
    pub equivalent_diameter: f64,
}

/// Final output of one analysis run
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeasurementResult {
    /// Number of accepted pore regions
    pub pore_count: usize,
    /// Per-pore measurements in extraction order
    pub pores: Vec<PoreMeasurement>,
    /// Arithmetic mean of equivalent diameters, 0.0 with no accepted pores
    pub mean_diameter: f64,
    /// Arithmetic mean of physical areas, 0.0 with no accepted pores
    pub mean_area: f64,
    /// Pore fraction of the cleaned mask in percent, in [0, 100]
    pub porosity_percent: f64,
    /// Regions rejected by the geometric filter, for diagnostics
    pub rejected_count: usize,
}

/// Equivalent-circle diameter for a physical area.
///
/// The diameter of a circle with the same area as the irregular pore
/// shape, the standard shape-agnostic size metric.
pub fn equivalent_diameter(area_physical: f64) -> f64 {
    2.0 * (area_physical / std::f64::consts::PI).sqrt()
}

/// Aggregate accepted regions into a [`MeasurementResult`].
///
/// `calibration` is the physical length of one pixel edge. Pore areas scale
/// with its square. Zero accepted regions is a valid outcome with zero
/// counts and zero means, not an error.
///
/// # Errors
/// [`Error::InvalidParameter`] if `calibration` is not a positive finite
/// number.
pub fn aggregate(
    accepted: &[Region],
    cleaned_mask: &BinaryMask,
    calibration: f64,
    rejected_count: usize,
) -> Result<MeasurementResult> {
    if !calibration.is_finite() || calibration <= 0.0 {
        return Err(Error::InvalidParameter {
            name: "calibration",
            value: calibration.to_string(),
            reason: "pixel size must be a positive finite length".to_string(),
        });
    }

    let pixel_area = calibration * calibration;
    let pores: Vec<PoreMeasurement> = accepted
        .iter()
        .map(|region| {
            let area_physical = region.area_px as f64 * pixel_area;
            PoreMeasurement {
                area_physical,
                equivalent_diameter: equivalent_diameter(area_physical),
            }
        })
        .collect();

    let (mean_diameter, mean_area) = if pores.is_empty() {
        (0.0, 0.0)
    } else {
        let n = pores.len() as f64;
        (
            pores.iter().map(|p| p.equivalent_diameter).sum::<f64>() / n,
            pores.iter().map(|p| p.area_physical).sum::<f64>() / n,
        )
    };

    let total_pixels = cleaned_mask.len();
    let porosity_percent = if total_pixels == 0 {
        0.0
    } else {
        cleaned_mask.count_true() as f64 / total_pixels as f64 * 100.0
    };

    Ok(MeasurementResult {
        pore_count: pores.len(),
        pores,
        mean_diameter,
        mean_area,
        porosity_percent,
        rejected_count,
    })
}

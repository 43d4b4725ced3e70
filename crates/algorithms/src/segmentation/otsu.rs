//! Otsu's automatic threshold selection
//!
//! Chooses the cutoff that maximizes inter-class variance over the discrete
//! intensity histogram, splitting the image into a dark and a bright class.

use poremet_core::{Error, IntensityField, Result};

/// Compute the Otsu threshold for an intensity field.
///
/// A pixel with value `<= threshold` belongs to the dark class. The result
/// depends only on the histogram, so repeated runs over the same field are
/// bit-identical.
///
/// # Errors
/// [`Error::DegenerateInput`] if the field is empty or every pixel has the
/// same intensity, in which case no two-class split exists.
pub fn otsu_threshold(field: &IntensityField) -> Result<u8> {
    if field.is_empty() {
        return Err(Error::DegenerateInput("empty intensity field".into()));
    }

    match field.intensity_range() {
        Some((min, max)) if min < max => {}
        _ => {
            return Err(Error::DegenerateInput(
                "constant intensity field, threshold undefined".into(),
            ))
        }
    }

    let histogram = field.histogram();
    let total = field.len() as f64;

    let mut total_sum = 0.0;
    for (i, &count) in histogram.iter().enumerate() {
        total_sum += i as f64 * count as f64;
    }

    let mut sum_dark = 0.0;
    let mut weight_dark = 0.0;
    let mut best_variance = f64::NEG_INFINITY;
    let mut best_threshold = 0u8;

    for (i, &count) in histogram.iter().enumerate() {
        weight_dark += count as f64;
        if weight_dark == 0.0 {
            continue;
        }

        let weight_bright = total - weight_dark;
        if weight_bright == 0.0 {
            break;
        }

        sum_dark += i as f64 * count as f64;
        let mean_dark = sum_dark / weight_dark;
        let mean_bright = (total_sum - sum_dark) / weight_bright;

        let variance = weight_dark * weight_bright * (mean_dark - mean_bright).powi(2);
        if variance > best_variance {
            best_variance = variance;
            best_threshold = i as u8;
        }
    }

    Ok(best_threshold)
}

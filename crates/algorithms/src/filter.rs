//! Geometric rejection of non-pore artifacts
//!
//! Two rules: a minimum pixel area discards dust and residual speckles,
//! and a minimum circularity discards thin wall fragments that survived
//! morphological cleanup but are not pore-shaped.

use crate::regions::Region;

/// Epsilon added to the squared perimeter so degenerate one-pixel regions
/// (perimeter 0) divide cleanly instead of panicking
const PERIMETER_EPSILON: f64 = 1e-6;

/// Shape-compactness score: `4π·area / (perimeter² + ε)`.
///
/// Roughly 1.0 for a circle, approaching 0 for thin elongated fragments.
/// Pixelated shapes can score above 1 since area is a pixel count while the
/// perimeter follows the traced boundary.
pub fn circularity(area_px: usize, perimeter_px: f64) -> f64 {
    4.0 * std::f64::consts::PI * area_px as f64 / (perimeter_px * perimeter_px + PERIMETER_EPSILON)
}

/// Filter candidate regions by minimum area and minimum circularity.
///
/// Regions without a perimeter (label-only extraction) skip the circularity
/// test entirely; only the area rule applies. That is a legitimate
/// reduced-filtering mode, not an error.
///
/// Accepted regions keep their extraction order. The rejected count is
/// reported for diagnostics and has no downstream effect.
pub fn filter_regions(
    regions: Vec<Region>,
    min_area_px: usize,
    min_circularity: f64,
) -> (Vec<Region>, usize) {
    let total = regions.len();

    let accepted: Vec<Region> = regions
        .into_iter()
        .filter(|region| {
            if region.area_px < min_area_px {
                return false;
            }
            match region.perimeter_px {
                Some(perimeter) => circularity(region.area_px, perimeter) >= min_circularity,
                None => true,
            }
        })
        .collect();

    let rejected = total - accepted.len();
    (accepted, rejected)
}

//! Size-threshold cleanup: small-object removal and small-hole filling
//!
//! The component-count alternative to structuring-element cleanup. Noise
//! blobs below a pixel-count threshold are deleted outright and enclosed
//! solid holes below a threshold are filled, leaving genuine pores above
//! the threshold untouched. Both passes are idempotent.

use poremet_core::{BinaryMask, Connectivity, Result};

use crate::regions::label_components;

/// Complement connectivity: 8-connected pores imply 4-connected solid, and
/// vice versa, otherwise a diagonal pore line would not separate the solid
/// on either side of it.
fn complement(connectivity: Connectivity) -> Connectivity {
    match connectivity {
        Connectivity::Four => Connectivity::Eight,
        Connectivity::Eight => Connectivity::Four,
    }
}

/// Remove pore components smaller than `min_size` pixels.
pub fn remove_small_objects(
    mask: &BinaryMask,
    min_size: usize,
    connectivity: Connectivity,
) -> Result<BinaryMask> {
    let (labels, stats) = label_components(mask, connectivity, true);

    let mut keep = vec![false; stats.len() + 1];
    for s in &stats {
        keep[s.label as usize] = s.area >= min_size;
    }

    let (rows, cols) = mask.shape();
    let data = labels
        .iter()
        .map(|&label| label != 0 && keep[label as usize])
        .collect();
    BinaryMask::from_vec(data, rows, cols)
}

/// Fill solid holes of at most `max_size` pixels.
///
/// A hole is a solid component that does not touch the image border; solid
/// regions reaching the border are background, not holes, and are never
/// filled. `connectivity` is the *pore* connectivity; holes are grouped
/// with its complement.
pub fn fill_small_holes(
    mask: &BinaryMask,
    max_size: usize,
    connectivity: Connectivity,
) -> Result<BinaryMask> {
    let (labels, stats) = label_components(mask, complement(connectivity), false);

    let mut fill = vec![false; stats.len() + 1];
    for s in &stats {
        fill[s.label as usize] = !s.touches_border && s.area <= max_size;
    }

    let (rows, cols) = mask.shape();
    let data = mask
        .iter()
        .zip(labels.iter())
        .map(|(&pore, &label)| pore || (label != 0 && fill[label as usize]))
        .collect();
    BinaryMask::from_vec(data, rows, cols)
}

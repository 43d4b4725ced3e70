//! Local-mean adaptive thresholding
//!
//! For unevenly illuminated micrographs a single global cutoff under- or
//! over-segments whole areas of the image. Here each pixel is compared
//! against the mean intensity of its surrounding window instead, with the
//! window mean computed in O(1) per pixel from a summed-area table.

use crate::maybe_rayon::*;
use poremet_core::{BinaryMask, Error, IntensityField, Result};

/// Threshold each pixel against the mean of a surrounding window.
///
/// A pixel is pore when its intensity falls below `window_mean - offset`
/// (or above `window_mean + offset` with `invert`). Windows are clamped at
/// the image border, so border pixels use a smaller effective window.
///
/// # Arguments
/// * `field` - Input intensity field
/// * `window_size` - Window side length in pixels, odd and >= 3
/// * `offset` - Constant subtracted from the local mean
/// * `invert` - Treat the brighter side as pore
pub fn adaptive_threshold(
    field: &IntensityField,
    window_size: usize,
    offset: f64,
    invert: bool,
) -> Result<BinaryMask> {
    if window_size < 3 || window_size % 2 == 0 {
        return Err(Error::InvalidParameter {
            name: "window_size",
            value: window_size.to_string(),
            reason: "adaptive window must be odd and at least 3".to_string(),
        });
    }
    if field.is_empty() {
        return Err(Error::DegenerateInput("empty intensity field".into()));
    }

    let (rows, cols) = field.shape();
    let radius = window_size / 2;

    // Summed-area table with a zero row/column of padding
    let mut integral = vec![0u64; (rows + 1) * (cols + 1)];
    for r in 0..rows {
        let mut row_sum = 0u64;
        for c in 0..cols {
            row_sum += unsafe { field.get_unchecked(r, c) } as u64;
            integral[(r + 1) * (cols + 1) + (c + 1)] = integral[r * (cols + 1) + (c + 1)] + row_sum;
        }
    }

    let window_sum = |r0: usize, c0: usize, r1: usize, c1: usize| -> u64 {
        // Inclusive pixel ranges, exclusive table indices
        integral[(r1 + 1) * (cols + 1) + (c1 + 1)] + integral[r0 * (cols + 1) + c0]
            - integral[r0 * (cols + 1) + (c1 + 1)]
            - integral[(r1 + 1) * (cols + 1) + c0]
    };

    let data: Vec<bool> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut out = vec![false; cols];
            let r0 = row.saturating_sub(radius);
            let r1 = (row + radius).min(rows - 1);
            for (col, slot) in out.iter_mut().enumerate() {
                let c0 = col.saturating_sub(radius);
                let c1 = (col + radius).min(cols - 1);
                let count = ((r1 - r0 + 1) * (c1 - c0 + 1)) as f64;
                let mean = window_sum(r0, c0, r1, c1) as f64 / count;
                let v = unsafe { field.get_unchecked(row, col) } as f64;
                *slot = if invert {
                    v > mean + offset
                } else {
                    v < mean - offset
                };
            }
            out
        })
        .collect();

    BinaryMask::from_vec(data, rows, cols)
}

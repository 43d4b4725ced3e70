//! Connected-component labeling
//!
//! Breadth-first flood fill over the mask. Components are numbered 1.. in
//! ascending raster-scan order of their first pixel, so labeling is
//! deterministic for a given mask.

use poremet_core::{BinaryMask, Connectivity, Grid};
use std::collections::VecDeque;

/// Axis-aligned bounding box in pixel coordinates, inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    pub min_row: usize,
    pub min_col: usize,
    pub max_row: usize,
    pub max_col: usize,
}

impl BoundingBox {
    /// Height in pixels
    pub fn height(&self) -> usize {
        self.max_row - self.min_row + 1
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        self.max_col - self.min_col + 1
    }
}

/// Summary of one labeled component
#[derive(Debug, Clone)]
pub struct ComponentStats {
    /// Component label in the label grid (1-based)
    pub label: u32,
    /// Number of member pixels
    pub area: usize,
    /// First member pixel in raster-scan order
    pub seed: (usize, usize),
    /// Whether any member pixel lies on the image border
    pub touches_border: bool,
    /// Bounding box of the member pixels
    pub bbox: BoundingBox,
}

/// Label connected components of `target`-valued pixels.
///
/// Returns a label grid (0 = background) and per-component stats in label
/// order. `target = true` labels pore components, `target = false` labels
/// solid components (used for hole filling).
pub fn label_components(
    mask: &BinaryMask,
    connectivity: Connectivity,
    target: bool,
) -> (Grid<u32>, Vec<ComponentStats>) {
    let (rows, cols) = mask.shape();
    let mut labels: Grid<u32> = mask.like(0u32);
    let mut stats = Vec::new();

    if mask.is_empty() {
        return (labels, stats);
    }

    let offsets = connectivity.offsets();
    let mut queue = VecDeque::new();
    let mut next_label = 1u32;

    for seed_row in 0..rows {
        for seed_col in 0..cols {
            if unsafe { mask.get_unchecked(seed_row, seed_col) } != target
                || unsafe { labels.get_unchecked(seed_row, seed_col) } != 0
            {
                continue;
            }

            let label = next_label;
            next_label += 1;

            let mut area = 0usize;
            let mut touches_border = false;
            let mut bbox = BoundingBox {
                min_row: seed_row,
                min_col: seed_col,
                max_row: seed_row,
                max_col: seed_col,
            };

            unsafe { labels.set_unchecked(seed_row, seed_col, label) };
            queue.push_back((seed_row, seed_col));

            while let Some((r, c)) = queue.pop_front() {
                area += 1;
                touches_border |= r == 0 || c == 0 || r == rows - 1 || c == cols - 1;
                bbox.min_row = bbox.min_row.min(r);
                bbox.min_col = bbox.min_col.min(c);
                bbox.max_row = bbox.max_row.max(r);
                bbox.max_col = bbox.max_col.max(c);

                for &(dr, dc) in offsets {
                    let nr = r as isize + dr;
                    let nc = c as isize + dc;
                    if nr < 0 || nc < 0 || nr >= rows as isize || nc >= cols as isize {
                        continue;
                    }
                    let (nr, nc) = (nr as usize, nc as usize);
                    if unsafe { mask.get_unchecked(nr, nc) } == target
                        && unsafe { labels.get_unchecked(nr, nc) } == 0
                    {
                        unsafe { labels.set_unchecked(nr, nc, label) };
                        queue.push_back((nr, nc));
                    }
                }
            }

            stats.push(ComponentStats {
                label,
                area,
                seed: (seed_row, seed_col),
                touches_border,
                bbox,
            });
        }
    }

    (labels, stats)
}

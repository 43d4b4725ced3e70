//! Outer-boundary tracing
//!
//! Moore-neighbor tracing around one connected component, starting at its
//! topmost-leftmost pixel and walking clockwise. The traced polyline gives
//! the perimeter estimate used by the circularity filter: cardinal steps
//! count 1, diagonal steps sqrt(2).

use poremet_core::Grid;

/// Moore neighborhood, clockwise starting east (image rows grow downward)
const DIRS: [(isize, isize); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

fn dir_index(dr: isize, dc: isize) -> usize {
    DIRS.iter()
        .position(|&d| d == (dr, dc))
        .expect("backtrack pixel is Moore-adjacent to the current pixel")
}

/// Trace the outer boundary of the component with the given label.
///
/// `start` must be the component's topmost-leftmost pixel (its raster-scan
/// seed), which guarantees the west neighbor lies outside the component.
/// Returns the ordered boundary pixels; a single-pixel component yields a
/// one-element polyline.
pub fn trace_boundary(labels: &Grid<u32>, label: u32, start: (usize, usize)) -> Vec<(usize, usize)> {
    let (rows, cols) = labels.shape();
    let inside = |r: isize, c: isize| -> bool {
        r >= 0
            && c >= 0
            && r < rows as isize
            && c < cols as isize
            && unsafe { labels.get_unchecked(r as usize, c as usize) } == label
    };

    let start_i = (start.0 as isize, start.1 as isize);
    let mut contour = vec![start];

    // Advance one step: scan clockwise from just past the backtrack pixel,
    // returning the next boundary pixel and its new backtrack.
    let advance = |cur: (isize, isize),
                   backtrack: (isize, isize)|
     -> Option<((isize, isize), (isize, isize))> {
        let bd = dir_index(backtrack.0 - cur.0, backtrack.1 - cur.1);
        let mut prev = backtrack;
        for i in 1..=8 {
            let (dr, dc) = DIRS[(bd + i) % 8];
            let next = (cur.0 + dr, cur.1 + dc);
            if inside(next.0, next.1) {
                return Some((next, prev));
            }
            prev = next;
        }
        None
    };

    // Initial backtrack: the west neighbor, outside by choice of start
    let Some(first) = advance(start_i, (start_i.0, start_i.1 - 1)) else {
        return contour; // isolated pixel
    };

    let (mut cur, mut backtrack) = first;
    // Tracing is a pure function of (cur, backtrack); the walk is complete
    // when that state recurs
    loop {
        contour.push((cur.0 as usize, cur.1 as usize));
        let (next, next_backtrack) =
            advance(cur, backtrack).expect("non-isolated boundary pixel has a pore neighbor");
        if (next, next_backtrack) == first {
            break;
        }
        cur = next;
        backtrack = next_backtrack;
    }

    // The walk re-enters the start pixel before the state recurs; drop the
    // duplicate so the polyline has distinct endpoints
    if contour.len() > 1 && contour.last() == Some(&start) {
        contour.pop();
    }

    contour
}

/// Closed-polyline length of a traced boundary.
///
/// Zero for a single-pixel component.
pub fn perimeter(boundary: &[(usize, usize)]) -> f64 {
    if boundary.len() < 2 {
        return 0.0;
    }

    let mut length = 0.0;
    for i in 0..boundary.len() {
        let (r0, c0) = boundary[i];
        let (r1, c1) = boundary[(i + 1) % boundary.len()];
        let dr = r0 as isize - r1 as isize;
        let dc = c0 as isize - c1 as isize;
        length += if dr != 0 && dc != 0 {
            std::f64::consts::SQRT_2
        } else {
            1.0
        };
    }
    length
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regions::label_components;
    use poremet_core::{BinaryMask, Connectivity};

    fn labeled(rows: &[&[u8]]) -> (Grid<u32>, (usize, usize)) {
        let height = rows.len();
        let width = rows[0].len();
        let data = rows
            .iter()
            .flat_map(|r| r.iter().map(|&v| v != 0))
            .collect();
        let mask = BinaryMask::from_vec(data, height, width).unwrap();
        let (labels, stats) = label_components(&mask, Connectivity::Eight, true);
        (labels, stats[0].seed)
    }

    #[test]
    fn test_single_pixel() {
        let (labels, seed) = labeled(&[&[0, 0], &[0, 1]]);
        let boundary = trace_boundary(&labels, 1, seed);
        assert_eq!(boundary, vec![(1, 1)]);
        assert_eq!(perimeter(&boundary), 0.0);
    }

    #[test]
    fn test_domino() {
        let (labels, seed) = labeled(&[&[0, 0, 0, 0], &[0, 1, 1, 0], &[0, 0, 0, 0]]);
        let boundary = trace_boundary(&labels, 1, seed);
        assert_eq!(boundary, vec![(1, 1), (1, 2)]);
        assert!((perimeter(&boundary) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_3x3_block() {
        let (labels, seed) = labeled(&[
            &[0, 0, 0, 0, 0],
            &[0, 1, 1, 1, 0],
            &[0, 1, 1, 1, 0],
            &[0, 1, 1, 1, 0],
            &[0, 0, 0, 0, 0],
        ]);
        let boundary = trace_boundary(&labels, 1, seed);
        // The 8 ring pixels, clockwise from the top-left corner
        assert_eq!(boundary.len(), 8);
        assert_eq!(boundary[0], (1, 1));
        assert_eq!(boundary[1], (1, 2));
        assert!(!boundary.contains(&(2, 2)));
        assert!((perimeter(&boundary) - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_block_touching_border() {
        // The image edge acts as the pore boundary
        let (labels, seed) = labeled(&[&[1, 1], &[1, 1]]);
        let boundary = trace_boundary(&labels, 1, seed);
        assert_eq!(boundary.len(), 4);
        assert!((perimeter(&boundary) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_diagonal_pair_uses_sqrt2_steps() {
        let (labels, seed) = labeled(&[&[1, 0], &[0, 1]]);
        let boundary = trace_boundary(&labels, 1, seed);
        assert_eq!(boundary.len(), 2);
        assert!((perimeter(&boundary) - 2.0 * std::f64::consts::SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn test_hole_is_not_traced() {
        // Outer tracing follows the external contour only
        let (labels, seed) = labeled(&[
            &[1, 1, 1],
            &[1, 0, 1],
            &[1, 1, 1],
        ]);
        let boundary = trace_boundary(&labels, 1, seed);
        assert_eq!(boundary.len(), 8);
        assert!((perimeter(&boundary) - 8.0).abs() < 1e-12);
    }
}

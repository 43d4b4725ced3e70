//! Pre-threshold noise smoothing
//!
//! A separable 5-tap binomial kernel (1, 4, 6, 4, 1)/16, the discrete
//! approximation of a small Gaussian. Suppresses pixel-level sensor noise
//! ahead of threshold selection without shifting large-scale boundaries by
//! more than the kernel radius (2 px). Borders are replicated.

use crate::maybe_rayon::*;
use poremet_core::IntensityField;

const KERNEL: [u32; 5] = [1, 4, 6, 4, 1];
const KERNEL_SUM: u32 = 16;
const RADIUS: isize = 2;

/// Smooth an intensity field with a 5x5 binomial blur.
///
/// Pure integer arithmetic with round-to-nearest, so results are
/// deterministic across platforms. The input field is not modified.
pub fn binomial_blur(field: &IntensityField) -> IntensityField {
    let (rows, cols) = field.shape();
    if rows == 0 || cols == 0 {
        return field.clone();
    }

    // Horizontal pass
    let horizontal: Vec<u8> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut out = vec![0u8; cols];
            for (col, slot) in out.iter_mut().enumerate() {
                let mut sum = 0u32;
                for (k, &w) in KERNEL.iter().enumerate() {
                    let c = (col as isize + k as isize - RADIUS).clamp(0, cols as isize - 1);
                    sum += w * unsafe { field.get_unchecked(row, c as usize) } as u32;
                }
                *slot = ((sum + KERNEL_SUM / 2) / KERNEL_SUM) as u8;
            }
            out
        })
        .collect();

    // Vertical pass
    let vertical: Vec<u8> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut out = vec![0u8; cols];
            for (col, slot) in out.iter_mut().enumerate() {
                let mut sum = 0u32;
                for (k, &w) in KERNEL.iter().enumerate() {
                    let r = (row as isize + k as isize - RADIUS).clamp(0, rows as isize - 1);
                    sum += w * horizontal[r as usize * cols + col] as u32;
                }
                *slot = ((sum + KERNEL_SUM / 2) / KERNEL_SUM) as u8;
            }
            out
        })
        .collect();

    IntensityField::from_vec(vertical, rows, cols)
        .expect("blur output has the input dimensions")
}

#[cfg(test)]
mod tests {
    use super::*;
    use poremet_core::Grid;

    #[test]
    fn test_blur_preserves_constant_field() {
        let field: IntensityField = Grid::filled(9, 9, 77);
        let blurred = binomial_blur(&field);
        assert_eq!(blurred, field);
    }

    #[test]
    fn test_blur_preserves_dimensions() {
        let field: IntensityField = Grid::new(13, 7);
        assert_eq!(binomial_blur(&field).shape(), (13, 7));
    }

    #[test]
    fn test_blur_spreads_impulse() {
        let mut field: IntensityField = Grid::new(9, 9);
        field.set(4, 4, 160).unwrap();

        let blurred = binomial_blur(&field);
        // Center keeps the largest share: 160 * 6/16 * 6/16 = 22.5
        let center = blurred.get(4, 4).unwrap();
        assert!(center >= 22 && center <= 23, "center = {}", center);
        // Energy must not travel past the kernel radius
        assert_eq!(blurred.get(4, 7).unwrap(), 0);
        assert_eq!(blurred.get(1, 4).unwrap(), 0);
        // But directly adjacent pixels pick some up
        assert!(blurred.get(4, 5).unwrap() > 0);
    }

    #[test]
    fn test_blur_does_not_shift_step_edge() {
        // Vertical step edge: dark left, bright right
        let mut field: IntensityField = Grid::filled(9, 9, 200);
        for r in 0..9 {
            for c in 0..4 {
                field.set(r, c, 0).unwrap();
            }
        }

        let blurred = binomial_blur(&field);
        // Far from the edge the plateaus are untouched
        assert_eq!(blurred.get(4, 0).unwrap(), 0);
        assert_eq!(blurred.get(4, 8).unwrap(), 200);
        // The 50% crossing stays within the kernel radius of column 4
        for c in 0..2 {
            assert!(blurred.get(4, c).unwrap() < 100);
        }
        for c in 6..9 {
            assert!(blurred.get(4, c).unwrap() > 100);
        }
    }
}

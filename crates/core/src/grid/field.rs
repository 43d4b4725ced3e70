//! Main Grid type

use crate::error::{Error, Result};
use ndarray::Array2;

/// A 2D pixel grid.
///
/// `Grid<T>` stores values of type `T` in row-major order. It is the common
/// carrier for every stage of the analysis pipeline: greyscale intensity
/// fields on the way in, binary pore masks after segmentation.
///
/// # Example
///
/// ```
/// use poremet_core::Grid;
///
/// let mut grid: Grid<u8> = Grid::new(100, 100);
/// grid.set(10, 20, 42).unwrap();
/// assert_eq!(grid.get(10, 20).unwrap(), 42);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    /// Grid data stored in row-major order (row, col)
    data: Array2<T>,
}

/// Greyscale micrograph input, one 8-bit sample per pixel.
///
/// Channel reduction (RGB to luma) happens before construction; the
/// pipeline only ever sees single-channel data.
pub type IntensityField = Grid<u8>;

/// Binary pore/solid mask. `true` marks a pore pixel.
pub type BinaryMask = Grid<bool>;

impl<T: Copy + Default> Grid<T> {
    /// Create a new grid filled with the default value (0 / false)
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, T::default())
    }
}

impl<T: Copy> Grid<T> {
    /// Create a new grid filled with a specific value
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            data: Array2::from_elem((rows, cols), value),
        }
    }

    /// Create a grid from existing row-major data
    pub fn from_vec(data: Vec<T>, rows: usize, cols: usize) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(Error::InvalidDimensions {
                width: cols,
                height: rows,
            });
        }

        let array = Array2::from_shape_vec((rows, cols), data)
            .map_err(|e| Error::Other(e.to_string()))?;

        Ok(Self { data: array })
    }

    /// Create a grid with the same dimensions, filled with a value
    pub fn like<U: Copy>(&self, fill_value: U) -> Grid<U> {
        Grid {
            data: Array2::from_elem(self.data.dim(), fill_value),
        }
    }

    // Dimensions

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// Dimensions as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Total number of pixels
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the grid has zero pixels
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    // Data access

    /// Get value at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        self.data
            .get((row, col))
            .copied()
            .ok_or(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            })
    }

    /// Get value at (row, col) without bounds checking
    ///
    /// # Safety
    /// Caller must ensure row < self.rows() and col < self.cols()
    pub unsafe fn get_unchecked(&self, row: usize, col: usize) -> T {
        unsafe { *self.data.uget((row, col)) }
    }

    /// Set value at (row, col)
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        if row >= self.rows() || col >= self.cols() {
            return Err(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        self.data[(row, col)] = value;
        Ok(())
    }

    /// Set value at (row, col) without bounds checking
    ///
    /// # Safety
    /// Caller must ensure row < self.rows() and col < self.cols()
    pub unsafe fn set_unchecked(&mut self, row: usize, col: usize, value: T) {
        unsafe {
            *self.data.uget_mut((row, col)) = value;
        }
    }

    /// Iterate over all values in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

impl Grid<u8> {
    /// Build an intensity field from interleaved RGB triples via Rec.601 luma.
    ///
    /// This is the single channel-reduction point of the system: colour data
    /// is collapsed to `0.299 R + 0.587 G + 0.114 B` (rounded) before the
    /// pipeline runs.
    pub fn from_rgb_vec(data: Vec<[u8; 3]>, rows: usize, cols: usize) -> Result<Self> {
        let luma = data
            .into_iter()
            .map(|[r, g, b]| {
                let y = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
                y.round().clamp(0.0, 255.0) as u8
            })
            .collect();
        Self::from_vec(luma, rows, cols)
    }

    /// 256-bin intensity histogram
    pub fn histogram(&self) -> [usize; 256] {
        let mut hist = [0usize; 256];
        for &v in self.data.iter() {
            hist[v as usize] += 1;
        }
        hist
    }

    /// Minimum and maximum intensity, or `None` for an empty field
    pub fn intensity_range(&self) -> Option<(u8, u8)> {
        let mut iter = self.data.iter();
        let first = *iter.next()?;
        let mut min = first;
        let mut max = first;
        for &v in iter {
            if v < min {
                min = v;
            }
            if v > max {
                max = v;
            }
        }
        Some((min, max))
    }
}

impl Grid<bool> {
    /// Number of `true` (pore) pixels
    pub fn count_true(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }
}

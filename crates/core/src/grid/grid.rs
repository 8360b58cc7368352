//! Main Grid type

use crate::error::{Error, Result};
use crate::grid::GridElement;
use ndarray::{Array2, ArrayView2, ArrayViewMut2};

/// A 2-D grid of cell values.
///
/// `Grid<T>` stores values of type `T` in row-major order. It backs every
/// derived artifact of the pipeline: intensity images (`Grid<f64>`), binary
/// masks (`Grid<bool>`) and label maps (`Grid<u32>`).
///
/// # Type Parameters
///
/// - `T`: The cell value type, must implement [`GridElement`]
///
/// # Example
///
/// ```ignore
/// use grainseg_core::Grid;
///
/// // Create a 100x100 grid filled with zeros
/// let mut grid: Grid<f64> = Grid::new(100, 100);
///
/// // Set a value
/// grid.set(10, 20, 42.0)?;
///
/// // Get a value
/// let value = grid.get(10, 20)?;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T: GridElement> {
    /// Grid data stored in row-major order (row, col)
    data: Array2<T>,
}

impl<T: GridElement> Grid<T> {
    /// Create a new grid filled with zeros
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            data: Array2::from_elem((rows, cols), T::zero()),
        }
    }

    /// Create a new grid filled with a specific value
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            data: Array2::from_elem((rows, cols), value),
        }
    }

    /// Create a grid from existing data in row-major order
    pub fn from_vec(data: Vec<T>, rows: usize, cols: usize) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(Error::InvalidDimensions { rows, cols });
        }

        let array = Array2::from_shape_vec((rows, cols), data)
            .map_err(|e| Error::Other(e.to_string()))?;

        Ok(Self { data: array })
    }

    /// Create a grid from an ndarray
    pub fn from_array(data: Array2<T>) -> Self {
        Self { data }
    }

    /// Create a grid with the same dimensions, filled with a value
    pub fn like(&self, fill_value: T) -> Self {
        Self {
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

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the grid is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Check that another grid has the same dimensions
    pub fn check_same_shape<U: GridElement>(&self, other: &Grid<U>) -> Result<()> {
        if self.shape() != other.shape() {
            let (er, ec) = self.shape();
            let (ar, ac) = other.shape();
            return Err(Error::SizeMismatch { er, ec, ar, ac });
        }
        Ok(())
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

    /// Get a view of the underlying data
    pub fn view(&self) -> ArrayView2<'_, T> {
        self.data.view()
    }

    /// Get a mutable view of the underlying data
    pub fn view_mut(&mut self) -> ArrayViewMut2<'_, T> {
        self.data.view_mut()
    }

    /// Get a reference to the underlying array
    pub fn data(&self) -> &Array2<T> {
        &self.data
    }

    /// Get a mutable reference to the underlying array
    pub fn data_mut(&mut self) -> &mut Array2<T> {
        &mut self.data
    }

    /// Consume the grid and return the underlying array
    pub fn into_array(self) -> Array2<T> {
        self.data
    }

    /// Iterate over `(row, col, value)` in row-major order
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        self.data.indexed_iter().map(|((r, c), &v)| (r, c, v))
    }
}

impl Grid<bool> {
    /// Number of foreground (true) cells
    pub fn count_foreground(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    /// Return a new mask with foreground and background swapped
    pub fn invert(&self) -> Grid<bool> {
        Grid {
            data: self.data.mapv(|v| !v),
        }
    }
}

impl Grid<f64> {
    /// Calculate basic statistics (min, max, mean) ignoring NaN cells
    pub fn statistics(&self) -> GridStatistics {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        let mut count: usize = 0;

        for &value in self.data.iter() {
            if value.is_nan() {
                continue;
            }
            if value < min {
                min = value;
            }
            if value > max {
                max = value;
            }
            sum += value;
            count += 1;
        }

        GridStatistics {
            min: (count > 0).then_some(min),
            max: (count > 0).then_some(max),
            mean: (count > 0).then(|| sum / count as f64),
            valid_count: count,
        }
    }
}

/// Basic statistics for a grid
#[derive(Debug, Clone)]
pub struct GridStatistics {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub valid_count: usize,
}

//! Grid - floating-point image
//!
//! `Grid` is a dense 2D array of `f32` samples. It is the input and output
//! of every imagetools operator: arithmetic, convolution, morphology and
//! signature extraction all read grids and return freshly allocated ones.
//!
//! # Examples
//!
//! ```
//! use imagetools_core::Grid;
//!
//! // Create a 100x100 grid
//! let mut grid = Grid::new(100, 100).unwrap();
//!
//! // Set and get sample values
//! grid.set_pixel(10, 20, 0.5).unwrap();
//! assert_eq!(grid.get_pixel(10, 20).unwrap(), 0.5);
//!
//! // Get statistics
//! let (min_val, _, _) = grid.min();
//! let (max_val, max_x, max_y) = grid.max();
//! assert_eq!((min_val, max_val, max_x, max_y), (0.0, 0.5, 10, 20));
//! ```

pub mod arith;
pub mod clip;
pub mod compare;
pub mod statistics;
pub mod threshold;

pub use compare::AbsoluteError;

use crate::error::{Error, Result};
use crate::parallel;

/// Floating-point image
///
/// # Memory Layout
///
/// Data is stored in row-major order with no padding. The sample at (x, y)
/// is at index `y * width + x`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Width in samples
    width: u32,
    /// Height in samples
    height: u32,
    /// Sample data (row-major, no padding)
    data: Vec<f32>,
}

impl Grid {
    /// Create a new grid with all samples set to zero
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use imagetools_core::Grid;
    ///
    /// let grid = Grid::new(640, 480).unwrap();
    /// assert_eq!(grid.dimensions(), (640, 480));
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_with_value(width, height, 0.0)
    }

    /// Create a new grid with all samples set to `value`
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new_with_value(width: u32, height: u32, value: f32) -> Result<Self> {
        check_dimensions(width, height)?;

        let size = (width as usize) * (height as usize);
        Ok(Grid {
            width,
            height,
            data: vec![value; size],
        })
    }

    /// Create a grid from raw row-major data
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions are invalid or the data length doesn't
    /// match `width * height`.
    pub fn from_data(width: u32, height: u32, data: Vec<f32>) -> Result<Self> {
        check_dimensions(width, height)?;

        let expected_size = (width as usize) * (height as usize);
        if data.len() != expected_size {
            return Err(Error::InvalidParameter(format!(
                "data length {} doesn't match {}x{} = {}",
                data.len(),
                width,
                height,
                expected_size
            )));
        }

        Ok(Grid {
            width,
            height,
            data,
        })
    }

    /// Create a grid by evaluating `f(x, y)` at every sample.
    ///
    /// Rows are evaluated in parallel.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn from_fn<F>(width: u32, height: u32, f: F) -> Result<Self>
    where
        F: Fn(u32, u32) -> f32 + Sync + Send,
    {
        check_dimensions(width, height)?;

        let data = parallel::fill_rows(width, height, |y, row| {
            for (x, v) in row.iter_mut().enumerate() {
                *v = f(x as u32, y);
            }
        });
        Ok(Grid {
            width,
            height,
            data,
        })
    }

    /// Build a grid of the same shape from an already computed buffer.
    ///
    /// Only used by operators whose output length is `width * height` by
    /// construction.
    pub(crate) fn with_data(&self, data: Vec<f32>) -> Grid {
        debug_assert_eq!(data.len(), self.data.len());
        Grid {
            width: self.width,
            height: self.height,
            data,
        }
    }

    /// Get the grid width in samples
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the grid height in samples
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the grid dimensions as (width, height)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Get the sample value at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<f32> {
        let idx = self.checked_index(x, y)?;
        Ok(self.data[idx])
    }

    /// Set the sample value at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, value: f32) -> Result<()> {
        let idx = self.checked_index(x, y)?;
        self.data[idx] = value;
        Ok(())
    }

    /// Get the sample value at (x, y) without bounds checking
    ///
    /// # Panics
    ///
    /// Panics if the computed index is outside the data buffer.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> f32 {
        self.data[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// Set the sample value at (x, y) without bounds checking
    ///
    /// # Panics
    ///
    /// Panics if the computed index is outside the data buffer.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, value: f32) {
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        self.data[idx] = value;
    }

    /// Get raw access to the sample data
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Get mutable access to the sample data
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Consume the grid and return its sample buffer
    pub fn into_data(self) -> Vec<f32> {
        self.data
    }

    /// Get a row of sample data
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[f32] {
        let start = (y as usize) * (self.width as usize);
        &self.data[start..start + self.width as usize]
    }

    /// Get a mutable row of sample data
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [f32] {
        let start = (y as usize) * (self.width as usize);
        let end = start + self.width as usize;
        &mut self.data[start..end]
    }

    /// Set all samples to the specified value
    pub fn set_all(&mut self, value: f32) {
        self.data.fill(value);
    }

    /// Create a grid with the same dimensions and zeroed data.
    pub fn create_template(&self) -> Grid {
        Grid {
            width: self.width,
            height: self.height,
            data: vec![0.0; self.data.len()],
        }
    }

    /// Check that two grids have the same dimensions
    ///
    /// # Errors
    ///
    /// Returns `Error::DimensionMismatch` naming `self` as the expected shape.
    pub fn check_same_size(&self, other: &Grid) -> Result<()> {
        if self.width != other.width || self.height != other.height {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            });
        }
        Ok(())
    }

    // ========================================================================
    // Extremes and sums
    // ========================================================================

    /// Find the minimum value and its location
    ///
    /// Returns `(min_value, x, y)` where (x, y) is the first occurrence of
    /// the minimum in row-major order. NaN samples are skipped.
    pub fn min(&self) -> (f32, u32, u32) {
        self.extreme(|candidate, best| candidate < best)
    }

    /// Find the maximum value and its location
    ///
    /// Returns `(max_value, x, y)` where (x, y) is the first occurrence of
    /// the maximum in row-major order. NaN samples are skipped.
    pub fn max(&self) -> (f32, u32, u32) {
        self.extreme(|candidate, best| candidate > best)
    }

    /// Find the minimum value only
    pub fn min_value(&self) -> f32 {
        self.min().0
    }

    /// Find the maximum value only
    pub fn max_value(&self) -> f32 {
        self.max().0
    }

    /// Sum of all samples, accumulated in `f64`
    pub fn sum(&self) -> f64 {
        self.data.iter().map(|&v| v as f64).sum()
    }

    /// Mean of all samples
    pub fn mean(&self) -> f32 {
        (self.sum() / self.data.len() as f64) as f32
    }

    fn extreme(&self, better: impl Fn(f32, f32) -> bool) -> (f32, u32, u32) {
        let mut best: Option<(f32, usize)> = None;
        for (idx, &v) in self.data.iter().enumerate() {
            if v.is_nan() {
                continue;
            }
            match best {
                Some((b, _)) if !better(v, b) => {}
                _ => best = Some((v, idx)),
            }
        }
        let (value, idx) = best.unwrap_or((f32::NAN, 0));
        let w = self.width as usize;
        (value, (idx % w) as u32, (idx / w) as u32)
    }

    fn checked_index(&self, x: u32, y: u32) -> Result<usize> {
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: idx,
                len: self.data.len(),
            });
        }
        Ok(idx)
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimension { width, height });
    }
    Ok(())
}

//! Error metrics between two grids
//!
//! Used to check that two ways of computing the same image agree, e.g.
//! direct and separable convolution.

use super::Grid;
use crate::error::Result;
use crate::parallel;

/// Result of [`Grid::absolute_error`]
#[derive(Debug, Clone)]
pub struct AbsoluteError {
    /// Largest absolute difference over all samples
    pub max_error: f32,
    /// Mean absolute difference
    pub mean_absolute_error: f32,
    /// Per-sample absolute difference
    pub error_map: Grid,
}

impl Grid {
    /// Compare two grids sample by sample.
    ///
    /// # Errors
    ///
    /// Returns `Error::DimensionMismatch` if dimensions don't match.
    pub fn absolute_error(&self, other: &Grid) -> Result<AbsoluteError> {
        self.check_same_size(other)?;

        let data = parallel::zip_samples(&self.data, &other.data, self.width, |a, b| (a - b).abs());
        let error_map = self.with_data(data);

        Ok(AbsoluteError {
            max_error: error_map.max_value(),
            mean_absolute_error: error_map.mean(),
            error_map,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_error_identical() {
        let grid = Grid::from_fn(6, 4, |x, y| (x * y) as f32).unwrap();
        let err = grid.absolute_error(&grid).unwrap();
        assert_eq!(err.max_error, 0.0);
        assert_eq!(err.mean_absolute_error, 0.0);
    }

    #[test]
    fn test_absolute_error_values() {
        let a = Grid::from_data(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let b = Grid::from_data(2, 2, vec![1.0, 3.0, 1.0, 4.0]).unwrap();
        let err = a.absolute_error(&b).unwrap();
        assert_eq!(err.max_error, 2.0);
        assert_eq!(err.mean_absolute_error, 0.75);
        assert_eq!(err.error_map.data(), &[0.0, 1.0, 2.0, 0.0]);
    }

    #[test]
    fn test_absolute_error_mismatch() {
        let a = Grid::new(2, 2).unwrap();
        let b = Grid::new(3, 2).unwrap();
        assert!(a.absolute_error(&b).is_err());
    }
}

//! Range normalisation and thresholding
//!
//! `normalise` maps a grid into [0, 1] with a monotonic affine rescale, so
//! the locations of the minimum and maximum are preserved. The threshold
//! functions binarise a grid into 0.0 / 1.0 samples.

use log::debug;

use super::Grid;

impl Grid {
    /// Rescale the grid into [0, 1].
    ///
    /// Each sample becomes `(v - min) / (max - min)`. A grid whose range is
    /// degenerate (all samples equal, or no finite extremes) maps to all
    /// zeros instead of NaN.
    pub fn normalise(&self) -> Grid {
        // f64 keeps `max - min` finite for any pair of finite f32 extremes
        let min = self.min_value() as f64;
        let max = self.max_value() as f64;
        let range = max - min;

        if !range.is_finite() || range <= 0.0 {
            debug!(
                "normalise: degenerate range [{min}, {max}] on {}x{} grid",
                self.width, self.height
            );
            return self.create_template();
        }

        let data = crate::parallel::map_samples(&self.data, self.width, |v| {
            ((v as f64 - min) / range) as f32
        });
        self.with_data(data)
    }

    /// Binarise with a single cut point: `v >= threshold` maps to 1, else 0.
    pub fn single_threshold(&self, threshold: f32) -> Grid {
        let data = crate::parallel::map_samples(&self.data, self.width, |v| {
            if v >= threshold { 1.0 } else { 0.0 }
        });
        self.with_data(data)
    }

    /// Binarise with two cut points: `lower <= v <= upper` maps to 1, else 0.
    pub fn dual_threshold(&self, lower: f32, upper: f32) -> Grid {
        let data = crate::parallel::map_samples(&self.data, self.width, |v| {
            if v >= lower && v <= upper { 1.0 } else { 0.0 }
        });
        self.with_data(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalise_range() {
        let grid = Grid::from_data(4, 1, vec![-2.0, 0.0, 2.0, 6.0]).unwrap();
        let n = grid.normalise();
        assert_eq!(n.data(), &[0.0, 0.25, 0.5, 1.0]);
    }

    #[test]
    fn test_normalise_preserves_extreme_locations() {
        let mut grid = Grid::new_with_value(6, 6, 3.0).unwrap();
        grid.set_pixel(1, 4, -7.0).unwrap();
        grid.set_pixel(5, 0, 12.0).unwrap();
        let n = grid.normalise();
        assert_eq!(n.min(), (0.0, 1, 4));
        assert_eq!(n.max(), (1.0, 5, 0));
    }

    #[test]
    fn test_normalise_wide_range() {
        let grid = Grid::from_data(3, 1, vec![-3e38, 0.0, 3e38]).unwrap();
        let n = grid.normalise();
        assert_eq!(n.data(), &[0.0, 0.5, 1.0]);
        assert_eq!(n.max(), (1.0, 2, 0));
        assert_eq!(n.min(), (0.0, 0, 0));
    }

    #[test]
    fn test_normalise_flat_grid() {
        let grid = Grid::new_with_value(16, 16, 42.0).unwrap();
        let n = grid.normalise();
        assert!(n.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_single_threshold() {
        let grid = Grid::from_data(4, 1, vec![0.1, 0.5, 0.7, 0.5]).unwrap();
        assert_eq!(grid.single_threshold(0.5).data(), &[0.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_dual_threshold() {
        let grid = Grid::from_data(5, 1, vec![0.0, 0.25, 0.5, 0.75, 1.0]).unwrap();
        assert_eq!(
            grid.dual_threshold(0.25, 0.75).data(),
            &[0.0, 1.0, 1.0, 1.0, 0.0]
        );
    }
}

//! Intensity statistics

use super::Grid;

impl Grid {
    /// Mean and population standard deviation of all samples.
    ///
    /// Both moments are accumulated in `f64`.
    pub fn mean_std(&self) -> (f32, f32) {
        let n = self.data.len() as f64;
        let mean = self.sum() / n;
        let var = self
            .data
            .iter()
            .map(|&v| {
                let d = v as f64 - mean;
                d * d
            })
            .sum::<f64>()
            / n;
        (mean as f32, var.sqrt() as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_std_constant() {
        let grid = Grid::new_with_value(5, 5, 4.0).unwrap();
        assert_eq!(grid.mean_std(), (4.0, 0.0));
    }

    #[test]
    fn test_mean_std_values() {
        let grid = Grid::from_data(4, 2, vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        let (mean, std) = grid.mean_std();
        assert_eq!(mean, 5.0);
        assert_eq!(std, 2.0);
    }
}

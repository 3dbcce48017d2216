//! Gradient-based filters
//!
//! Both filters are built from the two separable Sobel responses, which
//! are computed concurrently with `rayon::join`.

use imagetools_core::Grid;
use log::debug;

use crate::FilterResult;
use crate::convolve::convolve_sep;
use crate::kernel::{SEP_SOBEL_X_PT1, SEP_SOBEL_X_PT2, SEP_SOBEL_Y_PT1, SEP_SOBEL_Y_PT2};

/// Gradient direction of a Sobel response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SobelDirection {
    /// Intensity change along x (responds to vertical edges)
    Horizontal,
    /// Intensity change along y (responds to horizontal edges)
    Vertical,
}

/// Normalised Sobel response in one direction.
pub fn sobel_response(grid: &Grid, direction: SobelDirection) -> Grid {
    match direction {
        SobelDirection::Horizontal => convolve_sep(grid, &SEP_SOBEL_X_PT1, &SEP_SOBEL_X_PT2, true),
        SobelDirection::Vertical => convolve_sep(grid, &SEP_SOBEL_Y_PT1, &SEP_SOBEL_Y_PT2, true),
    }
}

fn sobel_pair(grid: &Grid) -> (Grid, Grid) {
    rayon::join(
        || sobel_response(grid, SobelDirection::Horizontal),
        || sobel_response(grid, SobelDirection::Vertical),
    )
}

/// Gradient magnitude `sqrt(gx^2 + gy^2)`, normalised into [0, 1].
///
/// `gx` and `gy` are the normalised Sobel responses, so they are both in
/// [0, 1] before squaring.
pub fn gradient_magnitude(grid: &Grid) -> FilterResult<Grid> {
    debug!("gradient_magnitude: {}x{}", grid.width(), grid.height());
    let (gx, gy) = sobel_pair(grid);
    let gx2 = gx.mul(&gx, false)?;
    let gy2 = gy.mul(&gy, false)?;
    Ok(gx2.add(&gy2, false)?.sqrt(true))
}

/// Per-pixel orientation `atan(gy / gx)`, normalised into [0, 1].
///
/// The output is a rescaled orientation proxy, not angles in radians.
/// Pixels where `gx` is zero give `atan(0)` before rescaling.
pub fn pixel_orientation(grid: &Grid) -> FilterResult<Grid> {
    debug!("pixel_orientation: {}x{}", grid.width(), grid.height());
    let (gx, gy) = sobel_pair(grid);
    Ok(gy.div(&gx, false)?.atan(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertical_step(w: u32, h: u32) -> Grid {
        Grid::from_fn(w, h, move |x, _| if x < w / 2 { 0.0 } else { 100.0 }).unwrap()
    }

    #[test]
    fn test_sobel_response_direction() {
        let g = vertical_step(16, 16);
        let gx = sobel_response(&g, SobelDirection::Horizontal);
        let gy = sobel_response(&g, SobelDirection::Vertical);
        assert_eq!(gx.max_value(), 1.0);

        // Away from the top and bottom borders the vertical response is flat
        let row = gy.row(8);
        assert!(row[2..14].iter().all(|&v| (v - row[2]).abs() < 1e-6));
    }

    #[test]
    fn test_gradient_magnitude_range() {
        let g = vertical_step(20, 12);
        let m = gradient_magnitude(&g).unwrap();
        assert_eq!(m.dimensions(), (20, 12));
        assert_eq!(m.min_value(), 0.0);
        assert_eq!(m.max_value(), 1.0);
    }

    #[test]
    fn test_flat_grid_gives_zero_magnitude() {
        let g = Grid::new(8, 8).unwrap();
        let m = gradient_magnitude(&g).unwrap();
        assert!(m.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_pixel_orientation_finite() {
        let g = Grid::from_fn(16, 16, |x, y| ((x * x + y * 3) % 50) as f32).unwrap();
        let o = pixel_orientation(&g).unwrap();
        assert!(o.data().iter().all(|v| v.is_finite()));
        assert!(o.min_value() >= 0.0 && o.max_value() <= 1.0);
    }
}

//! Spatial convolution
//!
//! Both operators compute a correlation: the kernel is not flipped, and
//! the coefficient at the kernel centre multiplies the sample under the
//! output pixel. Samples outside the grid are read as zero. Sums are
//! accumulated in `f64` and narrowed on store.

use imagetools_core::Grid;
use log::debug;
use rayon::prelude::*;

use crate::Kernel;

/// Zero-padded copy of a grid's samples
struct Padded {
    data: Vec<f32>,
    width: usize,
    left: usize,
    top: usize,
}

impl Padded {
    /// Pad by at least `ceil(k / 2)` on every side, widened when the
    /// kernel centre has been moved off the middle.
    fn new(grid: &Grid, kernel: &Kernel) -> Self {
        let (w, h) = (grid.width() as usize, grid.height() as usize);
        let (kw, kh) = (kernel.width() as usize, kernel.height() as usize);
        let (cx, cy) = (kernel.center_x() as usize, kernel.center_y() as usize);

        let base_x = kw.div_ceil(2);
        let base_y = kh.div_ceil(2);
        let left = base_x.max(cx);
        let right = base_x.max(kw - 1 - cx);
        let top = base_y.max(cy);
        let bottom = base_y.max(kh - 1 - cy);

        let width = w + left + right;
        let mut data = vec![0.0f32; width * (h + top + bottom)];
        data.par_chunks_mut(width)
            .skip(top)
            .take(h)
            .enumerate()
            .for_each(|(y, row)| row[left..left + w].copy_from_slice(grid.row(y as u32)));

        Self {
            data,
            width,
            left,
            top,
        }
    }
}

/// Convolve a grid with a kernel.
///
/// The output has the input's dimensions. When `normalise` is set the
/// result is range-normalised into [0, 1].
pub fn convolve(grid: &Grid, kernel: &Kernel, normalise: bool) -> Grid {
    let (w, h) = grid.dimensions();
    debug!(
        "convolve: {}x{} grid with {}x{} kernel",
        w,
        h,
        kernel.width(),
        kernel.height()
    );

    let padded = Padded::new(grid, kernel);
    let kw = kernel.width() as usize;
    let kdata = kernel.data();
    let x0 = padded.left - kernel.center_x() as usize;
    let y0 = padded.top - kernel.center_y() as usize;

    let mut out = grid.create_template();
    out.data_mut()
        .par_chunks_mut(w as usize)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, dst) in row.iter_mut().enumerate() {
                let mut sum = 0.0f64;
                for (ky, krow) in kdata.chunks_exact(kw).enumerate() {
                    let start = (y + y0 + ky) * padded.width + x + x0;
                    let src = &padded.data[start..start + kw];
                    for (&k, &s) in krow.iter().zip(src) {
                        sum += k as f64 * s as f64;
                    }
                }
                *dst = sum as f32;
            }
        });

    if normalise { out.normalise() } else { out }
}

/// Convolve a grid with two kernels in sequence.
///
/// The intermediate result is never normalised; only the final output is,
/// when `normalise` is set. For a horizontal `kernel_a` and a vertical
/// `kernel_b` this equals [`convolve`] with their outer product.
pub fn convolve_sep(grid: &Grid, kernel_a: &Kernel, kernel_b: &Kernel, normalise: bool) -> Grid {
    let tmp = convolve(grid, kernel_a, false);
    convolve(&tmp, kernel_b, normalise)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::{SEP_SOBEL_X_PT1, SEP_SOBEL_X_PT2, SOBEL_X};

    fn impulse(w: u32, h: u32, x: u32, y: u32) -> Grid {
        let mut g = Grid::new(w, h).unwrap();
        g.set_pixel(x, y, 1.0).unwrap();
        g
    }

    #[test]
    fn test_identity_kernel() {
        let g = Grid::from_fn(7, 5, |x, y| (x * 3 + y) as f32).unwrap();
        let id = Kernel::from_slice(3, 3, &[0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0]).unwrap();
        assert_eq!(convolve(&g, &id, false), g);
    }

    #[test]
    fn test_correlation_orientation() {
        // A correlation reproduces the kernel mirrored around the impulse
        let g = impulse(5, 5, 2, 2);
        let out = convolve(&g, &SOBEL_X, false);
        assert_eq!(out.get_pixel(1, 2).unwrap(), 2.0);
        assert_eq!(out.get_pixel(3, 2).unwrap(), -2.0);
        assert_eq!(out.get_pixel(1, 1).unwrap(), 1.0);
        assert_eq!(out.get_pixel(2, 2).unwrap(), 0.0);
    }

    #[test]
    fn test_zero_padding_at_border() {
        let g = Grid::new_with_value(4, 4, 1.0).unwrap();
        let se = Kernel::structuring_element(3).unwrap();
        let out = convolve(&g, &se, false);
        assert_eq!(out.get_pixel(0, 0).unwrap(), 4.0);
        assert_eq!(out.get_pixel(1, 0).unwrap(), 6.0);
        assert_eq!(out.get_pixel(1, 1).unwrap(), 9.0);
    }

    #[test]
    fn test_moved_center() {
        let g = impulse(6, 6, 3, 3);
        let mut k = Kernel::structuring_element(3).unwrap();
        k.set_center(0, 0).unwrap();
        let out = convolve(&g, &k, false);
        // The impulse is seen by outputs up and to the left of it
        assert_eq!(out.get_pixel(1, 1).unwrap(), 1.0);
        assert_eq!(out.get_pixel(3, 3).unwrap(), 1.0);
        assert_eq!(out.get_pixel(4, 4).unwrap(), 0.0);
        assert_eq!(out.sum(), 9.0);
    }

    #[test]
    fn test_separable_matches_direct() {
        let g = Grid::from_fn(24, 17, |x, y| ((x * 7 + y * 13) % 31) as f32).unwrap();
        let direct = convolve(&g, &SOBEL_X, false);
        let sep = convolve_sep(&g, &SEP_SOBEL_X_PT1, &SEP_SOBEL_X_PT2, false);
        let err = direct.absolute_error(&sep).unwrap();
        assert!(err.max_error < 1e-4);
    }

    #[test]
    fn test_normalised_output_range() {
        let g = Grid::from_fn(10, 10, |x, _| x as f32).unwrap();
        let out = convolve(&g, &SOBEL_X, true);
        assert_eq!(out.min_value(), 0.0);
        assert_eq!(out.max_value(), 1.0);
    }

    #[test]
    fn test_kernel_larger_than_grid() {
        let g = Grid::new_with_value(2, 2, 1.0).unwrap();
        let se = Kernel::structuring_element(7).unwrap();
        let out = convolve(&g, &se, false);
        assert!(out.data().iter().all(|&v| v == 4.0));
    }
}

//! Convolution kernels
//!
//! A [`Kernel`] is a small dense grid of `f32` coefficients with a centre
//! `(cx, cy)` that is aligned with the output pixel during convolution.
//! The centre defaults to `(width / 2, height / 2)`.
//!
//! The fixed kernels used by the edge filters are built once and shared
//! through [`LazyLock`] statics:
//!
//! - [`SOBEL_X`] / [`SOBEL_Y`]: 3x3 Sobel operators
//! - [`SEP_SOBEL_X_PT1`] / [`SEP_SOBEL_X_PT2`]: separable halves of `SOBEL_X`
//! - [`SEP_SOBEL_Y_PT1`] / [`SEP_SOBEL_Y_PT2`]: separable halves of `SOBEL_Y`
//! - [`LAPLACIAN`]: 4-neighbour Laplacian

use std::sync::LazyLock;

use log::warn;
use rayon::prelude::*;

use crate::{FilterError, FilterResult};

/// 3x3 horizontal-gradient Sobel operator
pub static SOBEL_X: LazyLock<Kernel> = LazyLock::new(|| {
    Kernel::fixed(3, 3, vec![-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0])
});

/// 3x3 vertical-gradient Sobel operator
pub static SOBEL_Y: LazyLock<Kernel> = LazyLock::new(|| {
    Kernel::fixed(3, 3, vec![-1.0, -2.0, -1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0])
});

/// Horizontal derivative half of [`SOBEL_X`] (3 wide, 1 high)
pub static SEP_SOBEL_X_PT1: LazyLock<Kernel> =
    LazyLock::new(|| Kernel::fixed(3, 1, vec![-1.0, 0.0, 1.0]));

/// Vertical smoothing half of [`SOBEL_X`] (1 wide, 3 high)
pub static SEP_SOBEL_X_PT2: LazyLock<Kernel> =
    LazyLock::new(|| Kernel::fixed(1, 3, vec![1.0, 2.0, 1.0]));

/// Horizontal smoothing half of [`SOBEL_Y`] (3 wide, 1 high)
pub static SEP_SOBEL_Y_PT1: LazyLock<Kernel> =
    LazyLock::new(|| Kernel::fixed(3, 1, vec![1.0, 2.0, 1.0]));

/// Vertical derivative half of [`SOBEL_Y`] (1 wide, 3 high)
pub static SEP_SOBEL_Y_PT2: LazyLock<Kernel> =
    LazyLock::new(|| Kernel::fixed(1, 3, vec![-1.0, 0.0, 1.0]));

/// 3x3 Laplacian (4-neighbour)
pub static LAPLACIAN: LazyLock<Kernel> = LazyLock::new(|| {
    Kernel::fixed(3, 3, vec![0.0, 1.0, 0.0, 1.0, -4.0, 1.0, 0.0, 1.0, 0.0])
});

/// A 2D convolution kernel
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    /// Width of the kernel
    width: u32,
    /// Height of the kernel
    height: u32,
    /// X coordinate of the center
    cx: u32,
    /// Y coordinate of the center
    cy: u32,
    /// Kernel data (row-major order)
    data: Vec<f32>,
}

impl Kernel {
    /// Create a zero-filled kernel with the given dimensions.
    pub fn new(width: u32, height: u32) -> FilterResult<Self> {
        if width == 0 || height == 0 {
            return Err(FilterError::InvalidKernel(format!(
                "kernel dimensions must be non-zero, got {}x{}",
                width, height
            )));
        }
        Ok(Self::fixed(
            width,
            height,
            vec![0.0; width as usize * height as usize],
        ))
    }

    /// Create a kernel from a slice of values in row-major order.
    pub fn from_slice(width: u32, height: u32, data: &[f32]) -> FilterResult<Self> {
        let mut kernel = Self::new(width, height)?;
        if data.len() != kernel.data.len() {
            return Err(FilterError::InvalidKernel(format!(
                "expected {} coefficients for {}x{}, got {}",
                kernel.data.len(),
                width,
                height,
                data.len()
            )));
        }
        kernel.data.copy_from_slice(data);
        Ok(kernel)
    }

    /// Build a kernel from data already known to match its shape.
    fn fixed(width: u32, height: u32, data: Vec<f32>) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize);
        Self {
            width,
            height,
            cx: width / 2,
            cy: height / 2,
            data,
        }
    }

    /// Create a `size x size` structuring element with every coefficient 1.
    pub fn structuring_element(size: u32) -> FilterResult<Self> {
        let mut kernel = Self::new(size, size)?;
        kernel.data.fill(1.0);
        Ok(kernel)
    }

    /// Create a `size x size` Gaussian kernel with unit sum.
    ///
    /// The density is sampled at offsets from the kernel centre, so the
    /// peak sits on the centre coefficient.
    pub fn gaussian(size: u32, sigma: f32) -> FilterResult<Self> {
        let c = (size / 2) as f64;
        Self::sample_gaussian(size, sigma, c)
    }

    /// Create a `size x size` Gaussian kernel with its peak at `(0, 0)`.
    ///
    /// The density is sampled at the raw coefficient indices, which places
    /// the peak in the top-left corner while the centre stays at
    /// `(size / 2, size / 2)`. Convolving with it shifts the image towards
    /// the top-left as well as blurring it.
    pub fn gaussian_origin(size: u32, sigma: f32) -> FilterResult<Self> {
        Self::sample_gaussian(size, sigma, 0.0)
    }

    fn sample_gaussian(size: u32, sigma: f32, peak: f64) -> FilterResult<Self> {
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(FilterError::InvalidParameters(format!(
                "sigma must be positive, got {}",
                sigma
            )));
        }
        if size == 0 {
            return Err(FilterError::InvalidParameters(
                "gaussian size must be non-zero".into(),
            ));
        }

        let mut kernel = Self::new(size, size)?;
        let s2 = 2.0 * sigma as f64 * sigma as f64;
        let scale = 1.0 / (std::f64::consts::PI * s2);
        kernel
            .data
            .par_chunks_mut(size as usize)
            .enumerate()
            .for_each(|(j, row)| {
                let dy = j as f64 - peak;
                for (i, v) in row.iter_mut().enumerate() {
                    let dx = i as f64 - peak;
                    *v = (scale * (-(dx * dx + dy * dy) / s2).exp()) as f32;
                }
            });

        Ok(kernel.normalized())
    }

    /// Rescale the coefficients so that they sum to 1.
    ///
    /// A kernel whose sum is zero or not finite cannot be normalised and is
    /// returned unchanged.
    pub fn normalized(mut self) -> Self {
        let sum = self.sum();
        if sum == 0.0 || !sum.is_finite() {
            warn!(
                "normalized: {}x{} kernel has sum {}, left unchanged",
                self.width, self.height, sum
            );
            return self;
        }
        for v in &mut self.data {
            *v = (*v as f64 / sum) as f32;
        }
        self
    }

    /// Get the kernel width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the kernel height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the center X coordinate.
    #[inline]
    pub fn center_x(&self) -> u32 {
        self.cx
    }

    /// Get the center Y coordinate.
    #[inline]
    pub fn center_y(&self) -> u32 {
        self.cy
    }

    /// Set the center coordinates.
    pub fn set_center(&mut self, cx: u32, cy: u32) -> FilterResult<()> {
        if cx >= self.width || cy >= self.height {
            return Err(FilterError::InvalidKernel(format!(
                "center ({}, {}) outside {}x{} kernel",
                cx, cy, self.width, self.height
            )));
        }
        self.cx = cx;
        self.cy = cy;
        Ok(())
    }

    /// Get the kernel data.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Get a value at (x, y).
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        if x < self.width && y < self.height {
            Some(self.data[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// Set a value at (x, y).
    pub fn set(&mut self, x: u32, y: u32, value: f32) -> FilterResult<()> {
        if x >= self.width || y >= self.height {
            return Err(FilterError::InvalidKernel(format!(
                "({}, {}) outside {}x{} kernel",
                x, y, self.width, self.height
            )));
        }
        self.data[(y * self.width + x) as usize] = value;
        Ok(())
    }

    /// Get the sum of all kernel values.
    pub fn sum(&self) -> f64 {
        self.data.iter().map(|&v| v as f64).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero_size() {
        assert!(Kernel::new(0, 3).is_err());
        assert!(Kernel::new(3, 0).is_err());
        let k = Kernel::new(4, 3).unwrap();
        assert_eq!((k.center_x(), k.center_y()), (2, 1));
        assert_eq!(k.sum(), 0.0);
    }

    #[test]
    fn test_from_slice_length() {
        assert!(Kernel::from_slice(2, 2, &[1.0; 3]).is_err());
        let k = Kernel::from_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(k.get(1, 1), Some(4.0));
        assert_eq!(k.get(2, 0), None);
    }

    #[test]
    fn test_set_and_center() {
        let mut k = Kernel::new(3, 3).unwrap();
        k.set(0, 2, 5.0).unwrap();
        assert_eq!(k.get(0, 2), Some(5.0));
        assert!(k.set(3, 0, 1.0).is_err());

        k.set_center(0, 0).unwrap();
        assert_eq!((k.center_x(), k.center_y()), (0, 0));
        assert!(k.set_center(3, 1).is_err());
    }

    #[test]
    fn test_normalized_sums_to_one() {
        let k = Kernel::from_slice(3, 1, &[1.0, 2.0, 5.0])
            .unwrap()
            .normalized();
        assert!((k.sum() - 1.0).abs() < 1e-5);
        assert!((k.data()[2] - 0.625).abs() < 1e-6);
    }

    #[test]
    fn test_normalized_zero_sum_unchanged() {
        let k = SOBEL_X.clone().normalized();
        assert_eq!(&k, &*SOBEL_X);
        assert!(k.data().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_structuring_element() {
        let se = Kernel::structuring_element(3).unwrap();
        assert!(se.data().iter().all(|&v| v == 1.0));
        assert_eq!(se.sum(), 9.0);
        assert!(Kernel::structuring_element(0).is_err());
    }

    #[test]
    fn test_gaussian_unit_sum_centered_peak() {
        let g = Kernel::gaussian(5, 1.0).unwrap();
        assert!((g.sum() - 1.0).abs() < 1e-5);
        assert!(g.data().iter().all(|&v| v >= 0.0));

        let peak = g.get(2, 2).unwrap();
        assert!(g.data().iter().all(|&v| v <= peak));
        // Symmetric about the centre
        assert!((g.get(0, 1).unwrap() - g.get(4, 3).unwrap()).abs() < 1e-7);
    }

    #[test]
    fn test_gaussian_origin_peak_at_corner() {
        let g = Kernel::gaussian_origin(5, 1.0).unwrap();
        assert!((g.sum() - 1.0).abs() < 1e-5);
        let corner = g.get(0, 0).unwrap();
        assert!(g.data().iter().all(|&v| v <= corner));
    }

    #[test]
    fn test_gaussian_invalid() {
        assert!(Kernel::gaussian(0, 1.0).is_err());
        assert!(Kernel::gaussian(5, 0.0).is_err());
        assert!(Kernel::gaussian(5, f32::NAN).is_err());
    }

    #[test]
    fn test_separable_halves_match_sobel() {
        for (full, pt1, pt2) in [
            (&*SOBEL_X, &*SEP_SOBEL_X_PT1, &*SEP_SOBEL_X_PT2),
            (&*SOBEL_Y, &*SEP_SOBEL_Y_PT1, &*SEP_SOBEL_Y_PT2),
        ] {
            for y in 0..3 {
                for x in 0..3 {
                    let outer = pt1.get(x, 0).unwrap() * pt2.get(0, y).unwrap();
                    assert_eq!(full.get(x, y), Some(outer));
                }
            }
        }
    }

    #[test]
    fn test_laplacian_zero_sum() {
        assert_eq!(LAPLACIAN.sum(), 0.0);
        assert_eq!(LAPLACIAN.get(1, 1), Some(-4.0));
    }
}

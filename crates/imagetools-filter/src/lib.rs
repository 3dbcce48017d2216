//! imagetools-filter - Convolution and gradient filters
//!
//! This crate provides:
//!
//! - [`Kernel`] construction, including Gaussian kernels and structuring
//!   elements, plus shared Sobel and Laplacian tables
//! - Direct and separable convolution over [`Grid`](imagetools_core::Grid)s
//! - Gradient magnitude and pixel orientation from Sobel responses
//!
//! # Example
//!
//! ```
//! use imagetools_core::Grid;
//! use imagetools_filter::{Kernel, convolve};
//!
//! let grid = Grid::new_with_value(32, 32, 1.0).unwrap();
//! let blur = Kernel::gaussian(5, 1.0).unwrap();
//! let out = convolve(&grid, &blur, false);
//! assert_eq!(out.dimensions(), (32, 32));
//! ```

pub mod convolve;
pub mod edge;
mod error;
pub mod kernel;

pub use error::{FilterError, FilterResult};
pub use kernel::Kernel;

// Re-export commonly used functions
pub use convolve::{convolve, convolve_sep};
pub use edge::{SobelDirection, gradient_magnitude, pixel_orientation, sobel_response};

//! imagetools - Parallel floating-point image operators
//!
//! # Overview
//!
//! imagetools works on single-channel `f32` grids and provides:
//!
//! - Pixel-wise arithmetic between grids and with scalars
//! - Direct and separable convolution, Gaussian and Sobel kernels
//! - Binary morphology built on convolution
//! - Gradient magnitude and pixel orientation
//! - Region signatures and a normalised signature distance
//! - Grayscale PNG/JPEG load and save
//!
//! # Example
//!
//! ```
//! use imagetools::Grid;
//! use imagetools::filter::gradient_magnitude;
//! use imagetools::signature::{signature_difference, signature_vector};
//!
//! let grid = Grid::from_fn(64, 48, |x, y| ((x * y) % 97) as f32).unwrap();
//! let edges = gradient_magnitude(&grid).unwrap();
//! assert_eq!(edges.dimensions(), (64, 48));
//!
//! let sig = signature_vector(&grid).unwrap();
//! assert_eq!(signature_difference(&sig, &sig), 0.0);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use imagetools_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use imagetools_filter as filter;
pub use imagetools_io as io;
pub use imagetools_morph as morph;
pub use imagetools_signature as signature;

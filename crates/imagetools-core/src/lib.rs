//! imagetools core - floating-point grids and pixel-wise operations
//!
//! This crate provides the data structure shared by every imagetools
//! operator together with the small, stateless utilities the operators are
//! built from:
//!
//! - [`Grid`] - dense 2D grid of `f32` samples
//! - Pixel-wise arithmetic between grids and scalars ([`grid::arith`])
//! - Region extraction, statistics, range normalisation, thresholding and
//!   error metrics
//! - [`parallel`] - row-parallel dispatch used by all grid operators
//!
//! # Example
//!
//! ```
//! use imagetools_core::Grid;
//!
//! let a = Grid::new_with_value(4, 4, 2.0).unwrap();
//! let b = Grid::new_with_value(4, 4, 3.0).unwrap();
//! let sum = a.add(&b, false).unwrap();
//! assert_eq!(sum.get_pixel(0, 0).unwrap(), 5.0);
//! ```

pub mod error;
pub mod grid;
pub mod parallel;

pub use error::{Error, Result};
pub use grid::{AbsoluteError, Grid};

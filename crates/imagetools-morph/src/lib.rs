//! imagetools-morph - Binary morphology
//!
//! Erosion, dilation, opening and closing of 0/1 grids with square
//! structuring elements, built on convolution from `imagetools-filter`.

pub mod binary;
mod error;

pub use binary::{EROSION_FILL_FRACTION, close, dilate, erode, open};
pub use error::{MorphError, MorphResult};

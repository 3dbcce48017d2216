//! Pixel-wise arithmetic
//!
//! Elementwise operations between two grids, or between a grid and a
//! scalar. Every operation allocates a new grid and leaves its inputs
//! untouched. The `normalise` flag rescales the result into [0, 1] with
//! [`Grid::normalise`] before it is returned.
//!
//! Two-grid operations check shapes first and fail with
//! `Error::DimensionMismatch` before any work is dispatched.
//!
//! Division never produces infinities: a zero denominator gives 0 at that
//! sample, and the remaining samples are computed normally.

use std::ops::{Add, Div, Mul, Sub};

use super::Grid;
use crate::error::Result;
use crate::parallel;

#[inline]
fn safe_div(a: f32, b: f32) -> f32 {
    if b == 0.0 { 0.0 } else { a / b }
}

impl Grid {
    fn zip_with<F>(&self, other: &Grid, normalise: bool, op: F) -> Result<Grid>
    where
        F: Fn(f32, f32) -> f32 + Sync + Send,
    {
        self.check_same_size(other)?;
        let data = parallel::zip_samples(&self.data, &other.data, self.width, op);
        Ok(self.with_data(data).finish(normalise))
    }

    fn map_with<F>(&self, normalise: bool, op: F) -> Grid
    where
        F: Fn(f32) -> f32 + Sync + Send,
    {
        let data = parallel::map_samples(&self.data, self.width, op);
        self.with_data(data).finish(normalise)
    }

    fn finish(self, normalise: bool) -> Grid {
        if normalise { self.normalise() } else { self }
    }

    /// Pixel-wise sum of two grids
    ///
    /// # Errors
    ///
    /// Returns `Error::DimensionMismatch` if dimensions don't match.
    pub fn add(&self, other: &Grid, normalise: bool) -> Result<Grid> {
        self.zip_with(other, normalise, |a, b| a + b)
    }

    /// Add a scalar to every sample
    pub fn add_scalar(&self, value: f32, normalise: bool) -> Grid {
        self.map_with(normalise, |a| a + value)
    }

    /// Pixel-wise difference `self - other`
    ///
    /// # Errors
    ///
    /// Returns `Error::DimensionMismatch` if dimensions don't match.
    pub fn sub(&self, other: &Grid, normalise: bool) -> Result<Grid> {
        self.zip_with(other, normalise, |a, b| a - b)
    }

    /// Subtract a scalar from every sample
    pub fn sub_scalar(&self, value: f32, normalise: bool) -> Grid {
        self.map_with(normalise, |a| a - value)
    }

    /// Pixel-wise product of two grids
    ///
    /// # Errors
    ///
    /// Returns `Error::DimensionMismatch` if dimensions don't match.
    pub fn mul(&self, other: &Grid, normalise: bool) -> Result<Grid> {
        self.zip_with(other, normalise, |a, b| a * b)
    }

    /// Multiply every sample by a scalar
    pub fn mul_scalar(&self, value: f32, normalise: bool) -> Grid {
        self.map_with(normalise, |a| a * value)
    }

    /// Pixel-wise quotient `self / other`
    ///
    /// Samples where `other` is zero are set to 0; all other samples,
    /// including the rest of the same row, are divided normally.
    ///
    /// # Errors
    ///
    /// Returns `Error::DimensionMismatch` if dimensions don't match.
    pub fn div(&self, other: &Grid, normalise: bool) -> Result<Grid> {
        self.zip_with(other, normalise, safe_div)
    }

    /// Divide every sample by a scalar
    ///
    /// Dividing by zero yields an all-zero grid.
    pub fn div_scalar(&self, value: f32, normalise: bool) -> Grid {
        self.map_with(normalise, |a| safe_div(a, value))
    }

    /// Square root of the magnitude of every sample
    ///
    /// Negative samples are treated as magnitudes: `sqrt(|v|)`.
    pub fn sqrt(&self, normalise: bool) -> Grid {
        self.map_with(normalise, |a| (a.abs() as f64).sqrt() as f32)
    }

    /// Arctangent of every sample, in radians
    pub fn atan(&self, normalise: bool) -> Grid {
        self.map_with(normalise, |a| (a as f64).atan() as f32)
    }
}

// ============================================================================
// Operator overloading
// ============================================================================

impl Add for &Grid {
    type Output = Result<Grid>;

    fn add(self, other: &Grid) -> Self::Output {
        Grid::add(self, other, false)
    }
}

impl Sub for &Grid {
    type Output = Result<Grid>;

    fn sub(self, other: &Grid) -> Self::Output {
        Grid::sub(self, other, false)
    }
}

impl Mul for &Grid {
    type Output = Result<Grid>;

    fn mul(self, other: &Grid) -> Self::Output {
        Grid::mul(self, other, false)
    }
}

impl Div for &Grid {
    type Output = Result<Grid>;

    fn div(self, other: &Grid) -> Self::Output {
        Grid::div(self, other, false)
    }
}

//! Signature extraction parameters

use crate::{SignatureError, SignatureResult};

// ============================================================================
// Default parameters
// ============================================================================

/// Default number of sampled regions along each axis
pub const DEFAULT_REGIONS: u32 = 9;

/// Default side length of the window averaged at each region
pub const DEFAULT_WINDOW: u32 = 5;

/// Default mean difference separating "slightly" from "much" darker/lighter
pub const DEFAULT_CONTRAST_THRESHOLD: f32 = 2.0;

/// Number of neighbours compared per region
pub const NEIGHBOURS: usize = 8;

// ============================================================================
// Option structure
// ============================================================================

/// Options for signature extraction
#[derive(Debug, Clone, PartialEq)]
pub struct SignatureParams {
    /// Regions per axis; the signature has `regions^2 * 8` entries
    pub regions: u32,
    /// Side of the square window averaged around each region centre
    pub window: u32,
    /// Mean difference above which a neighbour counts as much darker/lighter
    pub contrast_threshold: f32,
}

impl Default for SignatureParams {
    fn default() -> Self {
        Self {
            regions: DEFAULT_REGIONS,
            window: DEFAULT_WINDOW,
            contrast_threshold: DEFAULT_CONTRAST_THRESHOLD,
        }
    }
}

impl SignatureParams {
    /// Check that the parameters describe a usable sampling grid.
    ///
    /// # Errors
    ///
    /// Returns `SignatureError::InvalidParameters` if `regions` or `window`
    /// is zero, or the threshold is negative or not finite.
    pub fn validate(&self) -> SignatureResult<()> {
        if self.regions == 0 {
            return Err(SignatureError::InvalidParameters(
                "regions must be at least 1".into(),
            ));
        }
        if self.window == 0 {
            return Err(SignatureError::InvalidParameters(
                "window must be at least 1".into(),
            ));
        }
        if !self.contrast_threshold.is_finite() || self.contrast_threshold < 0.0 {
            return Err(SignatureError::InvalidParameters(format!(
                "contrast_threshold must be finite and non-negative, got {}",
                self.contrast_threshold
            )));
        }
        Ok(())
    }

    /// Number of entries in a signature extracted with these parameters
    pub fn signature_len(&self) -> usize {
        let n = self.regions as usize;
        n * n * NEIGHBOURS
    }
}

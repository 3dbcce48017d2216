//! Error types for imagetools-signature

use thiserror::Error;

/// Errors that can occur while extracting signatures
#[derive(Debug, Error)]
pub enum SignatureError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] imagetools_core::Error),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for signature operations
pub type SignatureResult<T> = Result<T, SignatureError>;

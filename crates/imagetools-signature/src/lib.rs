//! imagetools-signature - Image signatures for similarity search
//!
//! A signature summarises an image by how the mean brightness of a lattice
//! of small windows compares with that of their neighbours. Signatures of
//! the same length can be compared with [`signature_difference`], which
//! returns 0 for identical signatures and grows towards 1 as they diverge.
//!
//! # Example
//!
//! ```
//! use imagetools_core::Grid;
//! use imagetools_signature::{signature_difference, signature_vector};
//!
//! let a = Grid::from_fn(120, 90, |x, y| (x + y) as f32).unwrap();
//! let b = Grid::from_fn(120, 90, |x, y| (x * 2 + y) as f32).unwrap();
//!
//! let sig_a = signature_vector(&a).unwrap();
//! let sig_b = signature_vector(&b).unwrap();
//! assert_eq!(sig_a.len(), 648);
//! assert_eq!(signature_difference(&sig_a, &sig_a), 0.0);
//! assert!(signature_difference(&sig_a, &sig_b) >= 0.0);
//! ```

pub mod distance;
mod error;
pub mod params;
pub mod signature;

pub use distance::{l2_norm, signature_difference};
pub use error::{SignatureError, SignatureResult};
pub use params::SignatureParams;
pub use signature::{Signature, signature_vector, signature_vector_with};

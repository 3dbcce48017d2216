//! Signature distance
//!
//! The directed distance from `a` to `b` is `|a - b| / (|a| + |b|)` with
//! Euclidean norms. [`signature_difference`] averages both directions so
//! the result does not depend on argument order.

use log::warn;
use rayon::prelude::*;

use crate::Signature;

/// Euclidean norm of a signature.
pub fn l2_norm(values: &[i8]) -> f32 {
    let sum: i64 = values.par_iter().map(|&v| v as i64 * v as i64).sum();
    (sum as f64).sqrt() as f32
}

fn difference_norm(a: &[i8], b: &[i8]) -> f32 {
    let sum: i64 = a
        .par_iter()
        .zip(b.par_iter())
        .map(|(&x, &y)| {
            let d = x as i64 - y as i64;
            d * d
        })
        .sum();
    (sum as f64).sqrt() as f32
}

/// Directed distance; both slices must have the same length.
fn directed_difference(a: &[i8], b: &[i8]) -> f64 {
    let (diff, (norm_a, norm_b)) = rayon::join(
        || difference_norm(a, b),
        || rayon::join(|| l2_norm(a), || l2_norm(b)),
    );
    let d = diff as f64 / (norm_a as f64 + norm_b as f64);
    if d.is_finite() { d } else { 0.0 }
}

/// Normalised distance between two signatures.
///
/// Returns 0 for identical signatures (including two all-zero ones) and
/// at most 1 otherwise. Signatures of different lengths are not
/// comparable and get `f32::MAX`.
pub fn signature_difference(a: &Signature, b: &Signature) -> f32 {
    let (a, b) = (a.as_slice(), b.as_slice());
    if a.len() != b.len() {
        warn!(
            "signature_difference: length mismatch ({} vs {})",
            a.len(),
            b.len()
        );
        return f32::MAX;
    }
    let (ab, ba) = rayon::join(|| directed_difference(a, b), || directed_difference(b, a));
    ((ab + ba) / 2.0) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig(values: &[i8]) -> Signature {
        Signature::from(values.to_vec())
    }

    #[test]
    fn test_l2_norm() {
        assert_eq!(l2_norm(&[]), 0.0);
        assert_eq!(l2_norm(&[2, -2, 1]), 3.0);
        assert_eq!(l2_norm(&[-2; 648]), (4.0f64 * 648.0).sqrt() as f32);
    }

    #[test]
    fn test_identical_is_zero() {
        let a = sig(&[1, -2, 0, 2, -1]);
        assert_eq!(signature_difference(&a, &a), 0.0);
    }

    #[test]
    fn test_zero_signatures() {
        let z = sig(&[0; 16]);
        assert_eq!(signature_difference(&z, &z), 0.0);
        assert_eq!(signature_difference(&sig(&[]), &sig(&[])), 0.0);
    }

    #[test]
    fn test_opposite_is_one() {
        let a = sig(&[2, -1, 1]);
        let b = sig(&[-2, 1, -1]);
        assert!((signature_difference(&a, &b) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_symmetric() {
        let a = sig(&[2, 1, 0, -1, -2, 0, 1]);
        let b = sig(&[1, 1, -1, -1, 0, 2, 1]);
        assert_eq!(signature_difference(&a, &b), signature_difference(&b, &a));
    }

    #[test]
    fn test_length_mismatch() {
        let a = sig(&[1, 2, 3]);
        let b = sig(&[1, 2]);
        assert_eq!(signature_difference(&a, &b), f32::MAX);
        assert_eq!(signature_difference(&b, &a), f32::MAX);
    }
}

//! Signature extraction
//!
//! The image is sampled at a `regions x regions` lattice of evenly spaced
//! windows. Each window's mean is compared with the means of its eight
//! lattice neighbours and every comparison is quantised to one of five
//! levels:
//!
//! | difference `d = self - neighbour` | entry |
//! |---|---|
//! | `d < -t` | -2 (much darker) |
//! | `-t <= d < 0` | -1 (darker) |
//! | `d == 0` | 0 |
//! | `0 < d <= t` | 1 (lighter) |
//! | `d > t` | 2 (much lighter) |
//!
//! Neighbours beyond the lattice edge count as mean 0. Entries are ordered
//! by region (row-major), then by neighbour (`dy` outer, `dx` inner, both
//! `-1..=1`, centre skipped).

use imagetools_core::Grid;
use log::debug;
use rayon::prelude::*;

use crate::params::NEIGHBOURS;
use crate::{SignatureParams, SignatureResult};

/// Quantised neighbour comparisons describing an image
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Signature(Vec<i8>);

impl Signature {
    /// Entries as a slice
    pub fn as_slice(&self) -> &[i8] {
        &self.0
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the signature has no entries
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume the signature, returning its entries
    pub fn into_inner(self) -> Vec<i8> {
        self.0
    }
}

impl From<Vec<i8>> for Signature {
    fn from(values: Vec<i8>) -> Self {
        Self(values)
    }
}

impl AsRef<[i8]> for Signature {
    fn as_ref(&self) -> &[i8] {
        &self.0
    }
}

/// Extract a signature with the default parameters.
///
/// The result has 648 entries (81 regions x 8 neighbours).
pub fn signature_vector(grid: &Grid) -> SignatureResult<Signature> {
    signature_vector_with(grid, &SignatureParams::default())
}

/// Extract a signature with explicit parameters.
///
/// # Errors
///
/// Returns `SignatureError::InvalidParameters` if `params` fails
/// [`SignatureParams::validate`].
pub fn signature_vector_with(grid: &Grid, params: &SignatureParams) -> SignatureResult<Signature> {
    params.validate()?;
    debug!(
        "signature_vector: {}x{} grid, {} regions, window {}",
        grid.width(),
        grid.height(),
        params.regions,
        params.window
    );

    let averages = region_averages(grid, params)?;
    let n = params.regions as usize;
    let stride = n + 2;
    let t = params.contrast_threshold;

    let mut values = vec![0i8; params.signature_len()];
    values
        .par_chunks_mut(NEIGHBOURS)
        .enumerate()
        .for_each(|(r, out)| {
            let (i, j) = (r % n + 1, r / n + 1);
            let centre = averages[j * stride + i];
            let neighbours = (-1isize..=1)
                .flat_map(|dy| (-1isize..=1).map(move |dx| (dx, dy)))
                .filter(|&d| d != (0, 0));
            for (slot, (dx, dy)) in out.iter_mut().zip(neighbours) {
                let ni = (i as isize + dx) as usize;
                let nj = (j as isize + dy) as usize;
                *slot = classify(centre - averages[nj * stride + ni], t);
            }
        });

    Ok(Signature(values))
}

/// Window means on a `(regions + 2)^2` lattice whose outer ring stays 0.
fn region_averages(grid: &Grid, params: &SignatureParams) -> SignatureResult<Vec<f32>> {
    let n = params.regions;
    let stride = (n + 2) as usize;
    let x_spacing = (grid.width() / (n + 2)) as i64;
    let y_spacing = (grid.height() / (n + 2)) as i64;
    let half = (params.window / 2) as i64;

    let rows = (1..=n)
        .into_par_iter()
        .map(|j| {
            (1..=n)
                .map(|i| -> SignatureResult<f32> {
                    let x = x_spacing * i as i64 - half;
                    let y = y_spacing * j as i64 - half;
                    let roi = grid.sub_image(x, y, params.window, params.window)?;
                    Ok(roi.mean_std().0)
                })
                .collect::<SignatureResult<Vec<f32>>>()
        })
        .collect::<SignatureResult<Vec<Vec<f32>>>>()?;

    let mut averages = vec![0.0f32; stride * stride];
    for (j, row) in rows.iter().enumerate() {
        let start = (j + 1) * stride + 1;
        averages[start..start + row.len()].copy_from_slice(row);
    }
    Ok(averages)
}

#[inline]
fn classify(d: f32, t: f32) -> i8 {
    if d < -t {
        -2
    } else if d < 0.0 {
        -1
    } else if d > t {
        2
    } else if d > 0.0 {
        1
    } else {
        0
    }
}

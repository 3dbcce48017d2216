//! Row-parallel dispatch
//!
//! Every grid operator in imagetools is a pure function applied
//! independently to each output row. The helpers here hand the rows of a
//! freshly allocated, row-major buffer to rayon's global pool and return
//! once all of them have been written. Rayon splits the row range
//! adaptively, so a tall image does not turn into one task per row.
//!
//! Rows are disjoint `&mut [f32]` slices, so no locking is needed.

use rayon::prelude::*;

/// Allocate a `width * height` buffer and fill it row by row in parallel.
///
/// `fill` receives the row index and the row slice (`width` samples).
///
/// # Panics
///
/// Panics if `width` is 0. [`Grid`](crate::Grid) never has a zero width.
pub fn fill_rows<F>(width: u32, height: u32, fill: F) -> Vec<f32>
where
    F: Fn(u32, &mut [f32]) + Sync + Send,
{
    let mut data = vec![0.0f32; width as usize * height as usize];
    data.par_chunks_mut(width as usize)
        .enumerate()
        .for_each(|(y, row)| fill(y as u32, row));
    data
}

/// Apply `op` to every sample of `src`, one row per work unit.
pub fn map_samples<F>(src: &[f32], width: u32, op: F) -> Vec<f32>
where
    F: Fn(f32) -> f32 + Sync + Send,
{
    let w = width as usize;
    let mut out = vec![0.0f32; src.len()];
    out.par_chunks_mut(w)
        .zip(src.par_chunks(w))
        .for_each(|(dst, src)| {
            for (d, &s) in dst.iter_mut().zip(src) {
                *d = op(s);
            }
        });
    out
}

/// Combine two equally sized buffers sample by sample, one row per work unit.
///
/// The caller is responsible for checking that `a` and `b` have the same
/// length; extra samples in the longer buffer are ignored.
pub fn zip_samples<F>(a: &[f32], b: &[f32], width: u32, op: F) -> Vec<f32>
where
    F: Fn(f32, f32) -> f32 + Sync + Send,
{
    let w = width as usize;
    let mut out = vec![0.0f32; a.len().min(b.len())];
    out.par_chunks_mut(w)
        .zip(a.par_chunks(w).zip(b.par_chunks(w)))
        .for_each(|(dst, (ra, rb))| {
            for ((d, &x), &y) in dst.iter_mut().zip(ra).zip(rb) {
                *d = op(x, y);
            }
        });
    out
}

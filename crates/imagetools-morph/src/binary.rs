//! Binary morphological operations
//!
//! Erosion and dilation are expressed as a convolution with a square
//! all-ones structuring element followed by a threshold or a range
//! normalisation. Inputs are expected to hold 0/1 samples; other values
//! go through the same arithmetic.

use imagetools_core::Grid;
use imagetools_filter::{Kernel, convolve};
use log::debug;

use crate::{MorphError, MorphResult};

/// Fraction of the structuring element that must be set for erosion to
/// keep a pixel.
pub const EROSION_FILL_FRACTION: f32 = 0.75;

fn structuring_element(size: u32) -> MorphResult<Kernel> {
    if size == 0 {
        return Err(MorphError::InvalidParameters(
            "structuring element size must be non-zero".into(),
        ));
    }
    Ok(Kernel::structuring_element(size)?)
}

fn erosion_threshold(size: u32) -> f32 {
    EROSION_FILL_FRACTION * (size as f32 * size as f32)
}

/// Erode a binary image
///
/// A pixel is set when at least `0.75 * size^2` of the samples under the
/// `size x size` element are set (neighbourhood sum `>=` that count).
/// Outside the grid counts as unset. The output is 0/1.
pub fn erode(grid: &Grid, size: u32) -> MorphResult<Grid> {
    let sel = structuring_element(size)?;
    debug!("erode: {}x{} grid, size {}", grid.width(), grid.height(), size);
    Ok(convolve(grid, &sel, false).single_threshold(erosion_threshold(size)))
}

/// Dilate a binary image
///
/// Returns the neighbourhood count under the `size x size` element,
/// range-normalised into [0, 1]. Every pixel with a set neighbour is
/// non-zero; pixels with none stay 0.
///
/// The element is the reflection of the one `erode` uses: for an even
/// `size` its centre sits at `(size - 1) / 2` rather than `size / 2`.
pub fn dilate(grid: &Grid, size: u32) -> MorphResult<Grid> {
    let mut sel = structuring_element(size)?;
    let c = (size - 1) / 2;
    sel.set_center(c, c)?;
    debug!("dilate: {}x{} grid, size {}", grid.width(), grid.height(), size);
    Ok(convolve(grid, &sel, true))
}

/// Open a binary image
///
/// Opening = Erosion followed by Dilation.
/// Removes small foreground features.
pub fn open(grid: &Grid, size: u32) -> MorphResult<Grid> {
    let eroded = erode(grid, size)?;
    dilate(&eroded, size)
}

/// Close a binary image
///
/// Closing = Dilation followed by Erosion.
/// Fills small holes and connects nearby objects.
pub fn close(grid: &Grid, size: u32) -> MorphResult<Grid> {
    let dilated = dilate(grid, size)?;
    erode(&dilated, size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(w: u32, h: u32, x0: u32, y0: u32, bw: u32, bh: u32) -> Grid {
        Grid::from_fn(w, h, move |x, y| {
            if x >= x0 && x < x0 + bw && y >= y0 && y < y0 + bh { 1.0 } else { 0.0 }
        })
        .unwrap()
    }

    #[test]
    fn test_zero_size_rejected() {
        let g = Grid::new(4, 4).unwrap();
        assert!(matches!(erode(&g, 0), Err(MorphError::InvalidParameters(_))));
        assert!(dilate(&g, 0).is_err());
        assert!(open(&g, 0).is_err());
        assert!(close(&g, 0).is_err());
    }

    #[test]
    fn test_erode_block_shrinks() {
        let g = block(12, 12, 2, 2, 8, 8);
        let e = erode(&g, 3).unwrap();
        // 8x8 block erodes to its 6x6 interior
        assert_eq!(e.sum(), 36.0);
        assert_eq!(e.get_pixel(2, 2).unwrap(), 0.0);
        assert_eq!(e.get_pixel(3, 3).unwrap(), 1.0);
    }

    #[test]
    fn test_dilate_block_grows() {
        let g = block(12, 12, 4, 4, 4, 4);
        let d = dilate(&g, 3).unwrap();
        assert_eq!(d.max_value(), 1.0);
        assert!(d.get_pixel(3, 3).unwrap() > 0.0);
        assert_eq!(d.get_pixel(2, 2).unwrap(), 0.0);
    }

    #[test]
    fn test_erode_empty_stays_empty() {
        let g = Grid::new(8, 8).unwrap();
        assert_eq!(erode(&g, 3).unwrap().sum(), 0.0);
        assert_eq!(dilate(&g, 3).unwrap().sum(), 0.0);
    }

    #[test]
    fn test_open_removes_speck() {
        let mut g = block(16, 16, 2, 2, 8, 8);
        g.set_pixel(13, 13, 1.0).unwrap();
        let o = open(&g, 3).unwrap();
        assert_eq!(o.get_pixel(13, 13).unwrap(), 0.0);
        assert!(o.get_pixel(5, 5).unwrap() > 0.0);
    }

    #[test]
    fn test_open_even_size_stays_inside_block() {
        let g = block(12, 12, 4, 4, 4, 4);
        let o = open(&g, 2).unwrap();
        for y in 0..12 {
            for x in 0..12 {
                if g.get_pixel(x, y).unwrap() == 0.0 {
                    assert_eq!(o.get_pixel(x, y).unwrap(), 0.0, "({x}, {y})");
                }
            }
        }
        assert!(o.get_pixel(5, 5).unwrap() > 0.0);
    }

    #[test]
    fn test_open_even_size_is_symmetric() {
        // Centred block: the opened support must mirror onto itself
        let g = block(16, 16, 4, 4, 8, 8);
        let o = open(&g, 4).unwrap();
        for y in 0..16 {
            for x in 0..16 {
                let a = o.get_pixel(x, y).unwrap() > 0.0;
                let b = o.get_pixel(15 - x, 15 - y).unwrap() > 0.0;
                assert_eq!(a, b, "({x}, {y})");
            }
        }
    }

    #[test]
    fn test_erosion_threshold_large_size() {
        // 70000^2 does not fit in a u32
        assert_eq!(erosion_threshold(70_000), 0.75 * (70_000.0f32 * 70_000.0f32));
        assert_eq!(erosion_threshold(3), 6.75);
    }
}

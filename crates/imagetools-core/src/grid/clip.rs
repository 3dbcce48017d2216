//! Rectangular region extraction
//!
//! Windows near or beyond the image border are common (the signature
//! engine samples fixed windows around region centres), so extraction is
//! total: the output always has the requested size, and samples that fall
//! outside the source are zero.

use super::Grid;
use crate::error::Result;

impl Grid {
    /// Extract a `w x h` window whose top-left corner is at `(x, y)`.
    ///
    /// The corner may be negative and the window may extend past the right
    /// or bottom edge; uncovered samples are filled with zero.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if `w` or `h` is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use imagetools_core::Grid;
    ///
    /// let grid = Grid::new_with_value(4, 4, 1.0).unwrap();
    /// let window = grid.sub_image(-1, -1, 3, 3).unwrap();
    /// assert_eq!(window.sum(), 4.0);
    /// ```
    pub fn sub_image(&self, x: i64, y: i64, w: u32, h: u32) -> Result<Grid> {
        let mut out = Grid::new(w, h)?;

        let src_w = self.width as i64;
        let src_h = self.height as i64;

        // Overlap of the window with the source, in source coordinates
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = x.saturating_add(w as i64).min(src_w);
        let y1 = y.saturating_add(h as i64).min(src_h);
        if x0 >= x1 || y0 >= y1 {
            return Ok(out);
        }

        let span = (x1 - x0) as usize;
        let dst_x = (x0 - x) as usize;
        for sy in y0..y1 {
            let src_row = self.row(sy as u32);
            let dst_row = out.row_mut((sy - y) as u32);
            dst_row[dst_x..dst_x + span].copy_from_slice(&src_row[x0 as usize..x0 as usize + span]);
        }

        Ok(out)
    }
}

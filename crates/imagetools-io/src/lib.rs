//! imagetools-io - Grayscale image I/O
//!
//! The file boundary of imagetools. Decoded images become single-channel
//! [`Grid`]s with samples on the 0-255 scale; colour images are reduced to
//! luminance. Grids are written as 8-bit grayscale after their range is
//! mapped onto 0-255.
//!
//! Supported formats (Cargo features):
//!
//! - `png-format`: PNG read/write via the `png` crate
//! - `jpeg`: JPEG read via `jpeg-decoder`, write via `jpeg-encoder`

mod error;
pub mod format;
#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};

use imagetools_core::Grid;
use log::debug;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// JPEG quality used by [`save_image`]
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Read an image file into a grid.
///
/// The format is detected from the file header, not the extension.
pub fn load_image<P: AsRef<Path>>(path: P) -> IoResult<Grid> {
    let path = path.as_ref();
    let format = detect_format(path)?;
    debug!("load_image: {} as {:?}", path.display(), format);

    let reader = BufReader::new(File::open(path)?);
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(reader),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(reader),
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "{other:?} support not enabled"
        ))),
    }
}

/// Write a grid to an image file.
///
/// The format is chosen from the file extension (`png`, `jpg`, `jpeg`).
/// Samples are mapped onto 0-255 as described in [`to_gray8`].
pub fn save_image<P: AsRef<Path>>(path: P, grid: &Grid) -> IoResult<()> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path)?;
    debug!(
        "save_image: {}x{} grid to {} as {:?}",
        grid.width(),
        grid.height(),
        path.display(),
        format
    );

    let mut writer = BufWriter::new(File::create(path)?);
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(grid, &mut writer)?,
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::write_jpeg(grid, &mut writer, DEFAULT_JPEG_QUALITY)?,
        #[allow(unreachable_patterns)]
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "{other:?} support not enabled"
            )));
        }
    }
    writer.flush()?;
    Ok(())
}

/// Map a grid onto 8-bit gray levels.
///
/// Grids within [0, 1] (the output of normalising operations) are scaled
/// by 255. Grids within [0, 255] are rounded and written as-is. Anything
/// else is range-normalised first; a flat grid outside both ranges maps to 0.
pub fn to_gray8(grid: &Grid) -> Vec<u8> {
    let (min, max) = (grid.min_value(), grid.max_value());
    let scale = |data: &[f32], factor: f32| -> Vec<u8> {
        data.iter()
            .map(|&v| (v * factor).round().clamp(0.0, 255.0) as u8)
            .collect()
    };
    if min >= 0.0 && max <= 1.0 {
        scale(grid.data(), 255.0)
    } else if min >= 0.0 && max <= 255.0 {
        scale(grid.data(), 1.0)
    } else {
        scale(grid.normalise().data(), 255.0)
    }
}

/// ITU-R BT.601 luma of an 8-bit RGB triple
#[inline]
pub(crate) fn luminance(r: u8, g: u8, b: u8) -> f32 {
    0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_gray8_in_range() {
        let grid = Grid::from_data(3, 1, vec![0.0, 127.6, 255.0]).unwrap();
        assert_eq!(to_gray8(&grid), vec![0, 128, 255]);
    }

    #[test]
    fn test_to_gray8_unit_range() {
        let grid = Grid::from_data(3, 1, vec![0.0, 0.5, 1.0]).unwrap();
        assert_eq!(to_gray8(&grid), vec![0, 128, 255]);
    }

    #[test]
    fn test_to_gray8_out_of_range_is_normalised() {
        let grid = Grid::from_data(3, 1, vec![-1.0, 0.0, 1.0]).unwrap();
        assert_eq!(to_gray8(&grid), vec![0, 128, 255]);
    }

    #[test]
    fn test_luminance() {
        assert_eq!(luminance(0, 0, 0), 0.0);
        assert!((luminance(255, 255, 255) - 255.0).abs() < 1e-3);
    }
}

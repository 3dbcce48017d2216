//! JPEG image format support
//!
//! Reads JPEG images with `jpeg-decoder` and writes 8-bit grayscale JPEGs
//! with `jpeg-encoder`. Colour and CMYK images are reduced to luminance.

use crate::{IoError, IoResult, luminance, to_gray8};
use imagetools_core::Grid;
use jpeg_decoder::PixelFormat;
use log::debug;
use std::io::{Read, Write};

/// Read a JPEG image into a grid on the 0-255 scale
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<Grid> {
    let mut decoder = jpeg_decoder::Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing".to_string()))?;

    let width = info.width as u32;
    let height = info.height as u32;
    debug!("read_jpeg: {}x{} {:?}", width, height, info.pixel_format);

    let samples: Vec<f32> = match info.pixel_format {
        PixelFormat::L8 => pixels.iter().map(|&v| v as f32).collect(),
        PixelFormat::L16 => pixels
            .chunks_exact(2)
            .map(|p| u16::from_be_bytes([p[0], p[1]]) as f32 / 257.0)
            .collect(),
        PixelFormat::RGB24 => pixels
            .chunks_exact(3)
            .map(|p| luminance(p[0], p[1], p[2]))
            .collect(),
        PixelFormat::CMYK32 => pixels
            .chunks_exact(4)
            .map(|p| {
                let k = 255 - p[3] as u32;
                let channel = |c: u8| ((255 - c as u32) * k / 255) as u8;
                luminance(channel(p[0]), channel(p[1]), channel(p[2]))
            })
            .collect(),
        #[allow(unreachable_patterns)]
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported JPEG pixel format: {:?}",
                other
            )));
        }
    };

    if samples.len() != width as usize * height as usize {
        return Err(IoError::InvalidData(format!(
            "JPEG produced {} samples for {}x{}",
            samples.len(),
            width,
            height
        )));
    }
    Ok(Grid::from_data(width, height, samples)?)
}

/// Write a grid as an 8-bit grayscale JPEG
///
/// # Errors
///
/// Returns `IoError::InvalidData` if either dimension exceeds 65535.
pub fn write_jpeg<W: Write>(grid: &Grid, writer: W, quality: u8) -> IoResult<()> {
    let (width, height) = grid.dimensions();
    let (w, h) = match (u16::try_from(width), u16::try_from(height)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(IoError::InvalidData(format!(
                "{}x{} exceeds JPEG size limit",
                width, height
            )));
        }
    };

    let encoder = jpeg_encoder::Encoder::new(writer, quality.clamp(1, 100));
    encoder
        .encode(&to_gray8(grid), w, h, jpeg_encoder::ColorType::Luma)
        .map_err(|e| IoError::EncodeError(format!("JPEG encode error: {}", e)))
}

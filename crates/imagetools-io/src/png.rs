//! PNG image format support
//!
//! Decoding expands palettes and low bit depths and strips 16-bit samples
//! to 8 bits, so only four 8-bit layouts reach the sample conversion.
//! Output is always 8-bit grayscale.

use crate::{IoError, IoResult, luminance, to_gray8};
use imagetools_core::Grid;
use log::debug;
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image into a grid on the 0-255 scale
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Grid> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let width = output_info.width;
    let height = output_info.height;
    if output_info.bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "unexpected PNG output depth: {:?}",
            output_info.bit_depth
        )));
    }
    let channels = match output_info.color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unexpected PNG output color type: {:?}",
                other
            )));
        }
    };
    debug!(
        "read_png: {}x{} {:?}",
        width, height, output_info.color_type
    );

    let line_size = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];
    let mut samples = Vec::with_capacity(width as usize * height as usize);
    for row in data.chunks_exact(line_size).take(height as usize) {
        for px in row.chunks_exact(channels).take(width as usize) {
            let v = if channels >= 3 {
                luminance(px[0], px[1], px[2])
            } else {
                px[0] as f32
            };
            samples.push(v);
        }
    }

    Ok(Grid::from_data(width, height, samples)?)
}

/// Write a grid as an 8-bit grayscale PNG
pub fn write_png<W: Write>(grid: &Grid, writer: W) -> IoResult<()> {
    let mut encoder = Encoder::new(writer, grid.width(), grid.height());
    encoder.set_color(ColorType::Grayscale);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;
    writer
        .write_image_data(&to_gray8(grid))
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;

    Ok(())
}

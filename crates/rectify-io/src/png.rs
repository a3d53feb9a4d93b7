//! PNG image format support

use crate::{IoError, IoResult};
use ::png::{BitDepth, ColorType, Decoder, Encoder};
use rectify_core::Raster;
use std::io::{BufRead, Seek, Write};

/// Read a PNG image, expanding to interleaved RGBA8.
///
/// Supports 8-bit grayscale, grayscale+alpha, RGB, RGBA, and indexed
/// inputs (palette, with tRNS alpha when present). Other bit depths are
/// rejected.
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Raster> {
    let decoder = Decoder::new(reader);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let info = reader.info();
    let width = info.width;
    let height = info.height;
    let color_type = info.color_type;
    let bit_depth = info.bit_depth;

    let channels = match (color_type, bit_depth) {
        (ColorType::Grayscale, BitDepth::Eight) => 1,
        (ColorType::GrayscaleAlpha, BitDepth::Eight) => 2,
        (ColorType::Rgb, BitDepth::Eight) => 3,
        (ColorType::Rgba, BitDepth::Eight) => 4,
        (ColorType::Indexed, BitDepth::Eight) => 1,
        _ => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNG format: {:?} {:?}",
                color_type, bit_depth
            )));
        }
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let frame = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;
    let pixels = &buf[..frame.width as usize * frame.height as usize * channels];

    let rgba = match color_type {
        ColorType::Grayscale => pixels
            .iter()
            .flat_map(|&v| [v, v, v, 255])
            .collect::<Vec<u8>>(),
        ColorType::GrayscaleAlpha => pixels
            .chunks_exact(2)
            .flat_map(|px| [px[0], px[0], px[0], px[1]])
            .collect(),
        ColorType::Rgb => pixels
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], 255])
            .collect(),
        ColorType::Rgba => pixels.to_vec(),
        ColorType::Indexed => {
            let info = reader.info();
            let palette = info
                .palette
                .as_ref()
                .ok_or_else(|| IoError::DecodeError("indexed PNG without palette".to_string()))?
                .clone()
                .into_owned();
            let trns = info.trns.as_ref().map(|t| t.clone().into_owned());
            expand_palette(pixels, &palette, trns.as_deref())?
        }
    };

    Raster::from_raw(width, height, rgba).map_err(IoError::Core)
}

/// Expand 8-bit palette indices to RGBA using the PLTE (and optional tRNS)
/// chunks.
fn expand_palette(indices: &[u8], palette: &[u8], trns: Option<&[u8]>) -> IoResult<Vec<u8>> {
    let entries = palette.len() / 3;
    let mut out = Vec::with_capacity(indices.len() * 4);
    for &idx in indices {
        let i = idx as usize;
        if i >= entries {
            return Err(IoError::DecodeError(format!(
                "palette index {} out of range ({} entries)",
                i, entries
            )));
        }
        let alpha = trns
            .and_then(|t| t.get(i).copied())
            .unwrap_or(255);
        out.extend_from_slice(&[
            palette[i * 3],
            palette[i * 3 + 1],
            palette[i * 3 + 2],
            alpha,
        ]);
    }
    Ok(out)
}

/// Write a raster as an 8-bit RGBA PNG.
pub fn write_png<W: Write>(raster: &Raster, writer: W) -> IoResult<()> {
    let mut encoder = Encoder::new(writer, raster.width(), raster.height());
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);
    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;
    writer
        .write_image_data(raster.data())
        .map_err(|e| IoError::EncodeError(format!("PNG encode error: {}", e)))?;
    Ok(())
}

//! JPEG image format support
//!
//! Reads JPEG images with the `jpeg-decoder` crate and writes them with
//! `jpeg-encoder`. Grayscale, RGB, and CMYK inputs are expanded to RGBA8;
//! on encode the alpha channel is dropped, since JPEG carries none.

use crate::{IoError, IoResult};
use jpeg_decoder::{Decoder, PixelFormat};
use jpeg_encoder::{ColorType, Encoder};
use rectify_core::Raster;
use std::io::Read;

/// Largest dimension a baseline JPEG can carry.
const MAX_JPEG_DIMENSION: u32 = u16::MAX as u32;

/// Read a JPEG image, expanding to interleaved RGBA8.
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<Raster> {
    let mut decoder = Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing after decode".to_string()))?;

    let width = info.width as u32;
    let height = info.height as u32;

    let rgba = match info.pixel_format {
        PixelFormat::L8 => pixels
            .iter()
            .flat_map(|&v| [v, v, v, 255])
            .collect::<Vec<u8>>(),
        PixelFormat::RGB24 => pixels
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], 255])
            .collect(),
        PixelFormat::CMYK32 => pixels
            .chunks_exact(4)
            .flat_map(|px| {
                let k = px[3] as u32;
                [
                    (px[0] as u32 * k / 255) as u8,
                    (px[1] as u32 * k / 255) as u8,
                    (px[2] as u32 * k / 255) as u8,
                    255,
                ]
            })
            .collect(),
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported JPEG pixel format: {:?}",
                other
            )));
        }
    };

    Raster::from_raw(width, height, rgba).map_err(IoError::Core)
}

/// Encode a raster as a JPEG into `out`.
///
/// `quality` is 1-100. The alpha channel is ignored; pixels are written as
/// opaque RGB.
pub fn write_jpeg(raster: &Raster, out: &mut Vec<u8>, quality: u8) -> IoResult<()> {
    if raster.width() > MAX_JPEG_DIMENSION || raster.height() > MAX_JPEG_DIMENSION {
        return Err(IoError::EncodeError(format!(
            "raster {}x{} exceeds the JPEG dimension limit of {}",
            raster.width(),
            raster.height(),
            MAX_JPEG_DIMENSION
        )));
    }

    let encoder = Encoder::new(out, quality);
    encoder
        .encode(
            raster.data(),
            raster.width() as u16,
            raster.height() as u16,
            ColorType::Rgba,
        )
        .map_err(|e| IoError::EncodeError(format!("JPEG encode error: {}", e)))?;
    Ok(())
}

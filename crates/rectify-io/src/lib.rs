//! rectify-io - Image decode/encode bridge for the rectify library
//!
//! Converts between encoded image bytes (PNG, JPEG) and the in-memory
//! [`Raster`] the rectification engine works on. This is the acquisition
//! and export side of the system: the engine itself never touches encoded
//! bytes or the filesystem.
//!
//! # Example
//!
//! ```no_run
//! use rectify_io::{decode_image, encode_png};
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let raster = decode_image(&bytes).unwrap();
//! let png = encode_png(&raster).unwrap();
//! ```

mod error;
mod format;
mod jpeg;
mod png;

pub use error::{IoError, IoResult};
pub use format::ImageFormat;
pub use self::jpeg::{read_jpeg, write_jpeg};
pub use self::png::{read_png, write_png};

use rectify_core::Raster;
use std::fs;
use std::io::Cursor;
use std::path::Path;

/// Quality used when [`write_image`] encodes a JPEG.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Decode an encoded image (PNG or JPEG, identified by magic bytes) into
/// an RGBA8 raster.
///
/// # Errors
///
/// [`IoError::UnknownFormat`] when the bytes match neither format;
/// decode errors from the format-specific readers otherwise.
pub fn decode_image(bytes: &[u8]) -> IoResult<Raster> {
    match ImageFormat::sniff(bytes) {
        ImageFormat::Png => read_png(Cursor::new(bytes)),
        ImageFormat::Jpeg => read_jpeg(bytes),
        ImageFormat::Unknown => Err(IoError::UnknownFormat),
    }
}

/// Encode a raster as PNG bytes (8-bit RGBA).
pub fn encode_png(raster: &Raster) -> IoResult<Vec<u8>> {
    let mut out = Vec::new();
    write_png(raster, &mut out)?;
    Ok(out)
}

/// Encode a raster as JPEG bytes. Alpha is dropped; `quality` is 1-100.
pub fn encode_jpeg(raster: &Raster, quality: u8) -> IoResult<Vec<u8>> {
    let mut out = Vec::new();
    write_jpeg(raster, &mut out, quality)?;
    Ok(out)
}

/// Read an image from a file path, identifying the format from the file
/// contents (not the extension).
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Raster> {
    let bytes = fs::read(path)?;
    decode_image(&bytes)
}

/// Write a raster to a file path in the given format.
pub fn write_image<P: AsRef<Path>>(raster: &Raster, path: P, format: ImageFormat) -> IoResult<()> {
    let bytes = match format {
        ImageFormat::Png => encode_png(raster)?,
        ImageFormat::Jpeg => encode_jpeg(raster, DEFAULT_JPEG_QUALITY)?,
        ImageFormat::Unknown => return Err(IoError::UnknownFormat),
    };
    fs::write(path, bytes)?;
    Ok(())
}

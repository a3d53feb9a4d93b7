//! Raster - the image container
//!
//! A `Raster` owns a contiguous pixel buffer in a single fixed format:
//! interleaved RGBA, 8 bits per channel, row-major, with a stride of
//! `width * 4` bytes.
//!
//! # Ownership model
//!
//! `Raster` uses `Arc` for efficient cloning (shared ownership). To modify
//! pixel data, convert to `RasterMut` via [`Raster::try_into_mut`] or
//! [`Raster::to_mut`], then convert back with `Into<Raster>`. A stage that
//! produces an image therefore never aliases the buffer of the stage it
//! consumed from.

use crate::error::{Error, Result};
use std::sync::Arc;

/// Bytes per pixel of the fixed RGBA8 format.
pub const BYTES_PER_PIXEL: usize = 4;

/// An RGBA color value, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    /// Opaque white.
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);
    /// Opaque black.
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);

    /// Create a color from channel values.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color (alpha = 255).
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Channel values in buffer order.
    #[inline]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Build from channel values in buffer order.
    #[inline]
    pub const fn from_array(v: [u8; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

/// Internal raster data
#[derive(Debug)]
struct RasterData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Interleaved RGBA bytes, `width * height * 4` long
    data: Vec<u8>,
}

impl RasterData {
    #[inline]
    fn pixel_offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL
    }
}

/// Raster - main image container
///
/// Uses reference counting via `Arc` for efficient cloning; the pixel data
/// itself is immutable through this handle.
///
/// # Examples
///
/// ```
/// use rectify_core::Raster;
///
/// let raster = Raster::new(640, 480).unwrap();
/// assert_eq!(raster.width(), 640);
/// assert_eq!(raster.height(), 480);
/// ```
#[derive(Debug, Clone)]
pub struct Raster {
    inner: Arc<RasterData>,
}

impl Raster {
    /// Create a new raster with all pixels transparent black.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0, or if
    /// the pixel count would overflow the address space.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let len = Self::buffer_len(width, height)?;
        Ok(Raster {
            inner: Arc::new(RasterData {
                width,
                height,
                data: vec![0u8; len],
            }),
        })
    }

    /// Create a raster from an existing interleaved RGBA buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for zero dimensions and
    /// [`Error::BufferSizeMismatch`] if `data.len() != width * height * 4`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = Self::buffer_len(width, height)?;
        if data.len() != expected {
            return Err(Error::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Raster {
            inner: Arc::new(RasterData {
                width,
                height,
                data,
            }),
        })
    }

    fn buffer_len(width: u32, height: u32) -> Result<usize> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
            .ok_or(Error::InvalidDimension { width, height })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Row stride in bytes.
    #[inline]
    pub fn stride(&self) -> usize {
        self.inner.width as usize * BYTES_PER_PIXEL
    }

    /// Raw access to the interleaved RGBA bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// The bytes of one row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &self.inner.data[start..start + stride]
    }

    /// Get the pixel at (x, y), or `None` if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.inner.width || y >= self.inner.height {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get the pixel at (x, y) without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> Rgba {
        let off = self.inner.pixel_offset(x, y);
        let px: [u8; 4] = self.inner.data[off..off + BYTES_PER_PIXEL]
            .try_into()
            .unwrap();
        Rgba::from_array(px)
    }

    /// Check if two rasters have the same dimensions.
    pub fn sizes_equal(&self, other: &Raster) -> bool {
        self.inner.width == other.inner.width && self.inner.height == other.inner.height
    }

    /// Create a deep copy of this raster.
    ///
    /// Unlike `clone()`, which shares data via `Arc`, this creates a
    /// completely independent copy.
    pub fn deep_clone(&self) -> Self {
        Raster {
            inner: Arc::new(RasterData {
                width: self.inner.width,
                height: self.inner.height,
                data: self.inner.data.clone(),
            }),
        }
    }

    /// Try to get mutable access to the pixel data.
    ///
    /// Succeeds only if this is the sole handle to the data. On failure the
    /// original handle is returned unchanged.
    pub fn try_into_mut(self) -> std::result::Result<RasterMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(RasterMut { inner: data }),
            Err(arc) => Err(Raster { inner: arc }),
        }
    }

    /// Create a mutable copy of this raster.
    ///
    /// Always copies, regardless of how many handles exist.
    pub fn to_mut(&self) -> RasterMut {
        RasterMut {
            inner: RasterData {
                width: self.inner.width,
                height: self.inner.height,
                data: self.inner.data.clone(),
            },
        }
    }
}

/// Mutable raster
///
/// Allows modification of pixel data. Convert back to an immutable
/// [`Raster`] using `Into<Raster>`. Exclusive access is enforced at
/// compile time; no two handles can write the same buffer.
#[derive(Debug)]
pub struct RasterMut {
    inner: RasterData,
}

impl RasterMut {
    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Row stride in bytes.
    #[inline]
    pub fn stride(&self) -> usize {
        self.inner.width as usize * BYTES_PER_PIXEL
    }

    /// Raw access to the interleaved RGBA bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Mutable raw access to the interleaved RGBA bytes.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.inner.data
    }

    /// Get the pixel at (x, y), or `None` if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.inner.width || y >= self.inner.height {
            return None;
        }
        let off = self.inner.pixel_offset(x, y);
        let px: [u8; 4] = self.inner.data[off..off + BYTES_PER_PIXEL]
            .try_into()
            .unwrap();
        Some(Rgba::from_array(px))
    }

    /// Set the pixel at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::PixelOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) -> Result<()> {
        if x >= self.inner.width || y >= self.inner.height {
            return Err(Error::PixelOutOfBounds {
                x,
                y,
                width: self.inner.width,
                height: self.inner.height,
            });
        }
        self.set_pixel_unchecked(x, y, color);
        Ok(())
    }

    /// Set the pixel at (x, y) without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, color: Rgba) {
        let off = self.inner.pixel_offset(x, y);
        self.inner.data[off..off + BYTES_PER_PIXEL].copy_from_slice(&color.to_array());
    }

    /// Fill the whole raster with one color.
    pub fn fill(&mut self, color: Rgba) {
        for px in self.inner.data.chunks_exact_mut(BYTES_PER_PIXEL) {
            px.copy_from_slice(&color.to_array());
        }
    }
}

impl From<RasterMut> for Raster {
    fn from(m: RasterMut) -> Self {
        Raster {
            inner: Arc::new(m.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_transparent() {
        let r = Raster::new(4, 3).unwrap();
        assert_eq!(r.data().len(), 4 * 3 * BYTES_PER_PIXEL);
        assert_eq!(r.get_pixel(0, 0), Some(Rgba::TRANSPARENT));
        assert_eq!(r.get_pixel(3, 2), Some(Rgba::TRANSPARENT));
        assert_eq!(r.get_pixel(4, 0), None);
    }

    #[test]
    fn zero_dimensions_rejected() {
        assert!(matches!(
            Raster::new(0, 10),
            Err(Error::InvalidDimension { width: 0, height: 10 })
        ));
        assert!(matches!(
            Raster::new(10, 0),
            Err(Error::InvalidDimension { .. })
        ));
    }

    #[test]
    fn from_raw_checks_length() {
        let ok = Raster::from_raw(2, 2, vec![0u8; 16]);
        assert!(ok.is_ok());
        let bad = Raster::from_raw(2, 2, vec![0u8; 15]);
        assert!(matches!(
            bad,
            Err(Error::BufferSizeMismatch { expected: 16, actual: 15 })
        ));
    }

    #[test]
    fn set_and_get_round_trip() {
        let r = Raster::new(3, 3).unwrap();
        let mut m = r.try_into_mut().unwrap();
        let red = Rgba::opaque(255, 0, 0);
        m.set_pixel(1, 2, red).unwrap();
        assert!(m.set_pixel(3, 0, red).is_err());
        let r: Raster = m.into();
        assert_eq!(r.get_pixel(1, 2), Some(red));
        assert_eq!(r.get_pixel(0, 0), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn try_into_mut_requires_sole_handle() {
        let r = Raster::new(2, 2).unwrap();
        let alias = r.clone();
        let r = r.try_into_mut().unwrap_err();
        drop(alias);
        assert!(r.try_into_mut().is_ok());
    }

    #[test]
    fn deep_clone_is_independent() {
        let r = Raster::new(2, 2).unwrap();
        let copy = r.deep_clone();
        let mut m = copy.try_into_mut().unwrap();
        m.set_pixel_unchecked(0, 0, Rgba::WHITE);
        let copy: Raster = m.into();
        assert_eq!(r.get_pixel(0, 0), Some(Rgba::TRANSPARENT));
        assert_eq!(copy.get_pixel(0, 0), Some(Rgba::WHITE));
    }

    #[test]
    fn row_access() {
        let r = Raster::new(2, 2).unwrap();
        let mut m = r.try_into_mut().unwrap();
        m.set_pixel_unchecked(0, 1, Rgba::opaque(1, 2, 3));
        let r: Raster = m.into();
        assert_eq!(r.row(1)[..4], [1, 2, 3, 255]);
        assert_eq!(r.row(0)[..4], [0, 0, 0, 0]);
    }
}

//! rectify-core - Basic data structures for perspective rectification
//!
//! This crate provides the fundamental data structures used throughout the
//! rectify library:
//!
//! - [`Raster`] / [`RasterMut`] - the image container (immutable / mutable),
//!   fixed interleaved-RGBA8 pixel format
//! - [`Rgba`] - a color value
//! - [`Point`] / [`Quad`] - geometry in pixel coordinates
//!
//! The geometric transform engine itself lives in `rectify-transform`; the
//! PNG/JPEG bridge in `rectify-io`.

pub mod error;
pub mod geom;
pub mod raster;

pub use error::{Error, Result};
pub use geom::{Degeneracy, Point, Quad};
pub use raster::{BYTES_PER_PIXEL, Raster, RasterMut, Rgba};

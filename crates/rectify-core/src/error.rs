//! Error types for rectify-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid raster dimensions
    #[error("invalid raster dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Pixel buffer length does not match width * height * 4
    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Pixel coordinates out of bounds
    #[error("pixel out of bounds: ({x}, {y}) in {width}x{height}")]
    PixelOutOfBounds { x: u32, y: u32, width: u32, height: u32 },
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;

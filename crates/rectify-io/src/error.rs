//! Error types for rectify-io

use thiserror::Error;

/// Errors that can occur while decoding or encoding images
#[derive(Debug, Error)]
pub enum IoError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] rectify_core::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Could not identify the image format from its leading bytes
    #[error("unrecognized image format")]
    UnknownFormat,

    /// Recognized container, unsupported pixel layout
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Image decode error
    #[error("decode error: {0}")]
    DecodeError(String),

    /// Image encode error
    #[error("encode error: {0}")]
    EncodeError(String),
}

/// Result type alias for I/O operations
pub type IoResult<T> = std::result::Result<T, IoError>;

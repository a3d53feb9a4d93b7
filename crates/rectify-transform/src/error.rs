//! Error types for rectify-transform

use rectify_core::Degeneracy;
use thiserror::Error;

/// Errors that can occur while solving or applying a perspective transform
#[derive(Debug, Error)]
pub enum TransformError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] rectify_core::Error),

    /// The four corner points admit no projective map to a rectangle
    #[error("degenerate quadrilateral: {0}")]
    DegenerateQuad(Degeneracy),

    /// Transform matrix not invertible (determinant within epsilon of zero)
    #[error("singular transform matrix")]
    SingularTransform,

    /// Requested output size has a zero dimension
    #[error("invalid output dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Result type for transform operations
pub type TransformResult<T> = std::result::Result<T, TransformError>;

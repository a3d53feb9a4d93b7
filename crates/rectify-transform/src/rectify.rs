//! One-shot rectification
//!
//! The single entry point an interactive caller needs: from a source image,
//! four dragged corners, and an output size to the rectified image.

use crate::error::{TransformError, TransformResult};
use crate::homography::Homography;
use crate::resample::{Fill, resample_with_fill};
use rectify_core::{Quad, Raster};

/// Rectify the quadrilateral region `corners` of `source` into a new
/// `out_width` x `out_height` raster, as if that region had been
/// photographed fronto-parallel.
///
/// `corners` are in source-image pixel coordinates, top-left, top-right,
/// bottom-right, bottom-left. Solves the corner-to-rectangle homography,
/// then resamples through its inverse with bilinear interpolation.
///
/// # Errors
///
/// [`TransformError::InvalidDimensions`] for a zero output dimension,
/// [`TransformError::DegenerateQuad`] if `corners` admit no transform.
///
/// # Example
///
/// ```
/// use rectify_core::{Quad, Raster};
/// use rectify_transform::rectify;
///
/// let source = Raster::new(100, 100).unwrap();
/// let corners = Quad::axis_aligned(10.0, 10.0, 80.0, 80.0);
/// let out = rectify(&source, &corners, 50, 50).unwrap();
/// assert_eq!((out.width(), out.height()), (50, 50));
/// ```
pub fn rectify(
    source: &Raster,
    corners: &Quad,
    out_width: u32,
    out_height: u32,
) -> TransformResult<Raster> {
    rectify_with_fill(source, corners, out_width, out_height, Fill::Transparent)
}

/// [`rectify`] with an explicit fill color for unsampleable pixels.
pub fn rectify_with_fill(
    source: &Raster,
    corners: &Quad,
    out_width: u32,
    out_height: u32,
    fill: Fill,
) -> TransformResult<Raster> {
    // Checked here as well as in the resampler so that a zero size reports
    // as a size problem, not as a degenerate destination rectangle.
    if out_width == 0 || out_height == 0 {
        return Err(TransformError::InvalidDimensions {
            width: out_width,
            height: out_height,
        });
    }
    let transform = Homography::from_quad_to_rect(corners, out_width as f64, out_height as f64)?;
    resample_with_fill(source, &transform, out_width, out_height, fill)
}

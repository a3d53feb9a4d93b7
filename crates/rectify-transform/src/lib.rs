//! rectify-transform - The perspective rectification engine
//!
//! This crate turns an arbitrary (possibly skewed) quadrilateral region of a
//! raster image into an axis-aligned rectangular image, as if the region had
//! been photographed fronto-parallel. It provides:
//!
//! - [`Homography`] - the projective transform between the two planes,
//!   solved from four corner correspondences
//! - [`resample`] / [`resample_sampled`] - inverse-mapping resamplers
//!   (bilinear interpolated / nearest-neighbor)
//! - [`rectify`] - the one-shot corners-to-output entry point
//!
//! All operations are pure: deterministic, synchronous, no I/O, no state
//! between invocations, safe to call concurrently with different inputs.

mod error;
pub mod homography;
mod rectify;
pub mod resample;

pub use error::{TransformError, TransformResult};
pub use homography::Homography;
pub use rectify::{rectify, rectify_with_fill};
pub use resample::{
    Fill, resample, resample_sampled, resample_sampled_with_fill, resample_with_fill,
};

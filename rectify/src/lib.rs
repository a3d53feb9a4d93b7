//! Rectify - perspective rectification of quadrilateral image regions
//!
//! Mark an arbitrary (possibly skewed) quadrilateral on a raster image and
//! produce a rectangular output image, as if that region had been
//! photographed fronto-parallel. The engine solves the projective
//! (homography) transform taking the four marked corners to the corners of
//! the output rectangle, then resamples the source through the inverse
//! transform with bilinear interpolation.
//!
//! # Example
//!
//! ```
//! use rectify::{Point, Quad, Raster, transform};
//!
//! let source = Raster::new(320, 240).unwrap();
//! let corners = Quad::new([
//!     Point::new(40.0, 30.0),   // top-left
//!     Point::new(280.0, 50.0),  // top-right
//!     Point::new(260.0, 210.0), // bottom-right
//!     Point::new(50.0, 190.0),  // bottom-left
//! ]);
//! let output = transform::rectify(&source, &corners, 200, 150).unwrap();
//! assert_eq!((output.width(), output.height()), (200, 150));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use rectify_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use rectify_io as io;
pub use rectify_transform as transform;

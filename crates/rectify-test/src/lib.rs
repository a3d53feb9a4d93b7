//! rectify-test - Regression test support for the rectify library
//!
//! Provides the [`RegParams`] comparison tracker used by the `tests/`
//! directories across the workspace, plus builders for the synthetic
//! rasters the tests run against (there are no binary image assets
//! in-tree; every test input is generated).
//!
//! # Usage
//!
//! ```
//! use rectify_test::{RegParams, gradient_raster};
//!
//! let mut rp = RegParams::new("example");
//! let img = gradient_raster(8, 8);
//! rp.compare_values(8.0, img.width() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```

mod params;

pub use params::RegParams;

use rectify_core::{Raster, Rgba};

/// Build a raster filled with a single color.
pub fn solid_raster(width: u32, height: u32, color: Rgba) -> Raster {
    let raster = Raster::new(width, height).expect("test raster dimensions");
    let mut m = raster.try_into_mut().expect("sole handle");
    m.fill(color);
    m.into()
}

/// Build a raster with a diagonal gray gradient, `(x + y) % 256` in every
/// channel (opaque). Distinct enough per-pixel to catch mapping errors.
pub fn gradient_raster(width: u32, height: u32) -> Raster {
    let raster = Raster::new(width, height).expect("test raster dimensions");
    let mut m = raster.try_into_mut().expect("sole handle");
    for y in 0..height {
        for x in 0..width {
            let v = ((x + y) % 256) as u8;
            m.set_pixel_unchecked(x, y, Rgba::opaque(v, v, v));
        }
    }
    m.into()
}

/// Mean absolute per-channel difference between two same-sized rasters.
///
/// Panics if the sizes differ; size checks belong to the caller's
/// comparisons.
pub fn mean_abs_diff(a: &Raster, b: &Raster) -> f64 {
    assert!(a.sizes_equal(b), "mean_abs_diff requires equal sizes");
    let total: u64 = a
        .data()
        .iter()
        .zip(b.data())
        .map(|(x, y)| (*x as i64 - *y as i64).unsigned_abs())
        .sum();
    total as f64 / a.data().len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_raster_is_uniform() {
        let r = solid_raster(3, 2, Rgba::opaque(7, 8, 9));
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(r.get_pixel(x, y), Some(Rgba::opaque(7, 8, 9)));
            }
        }
    }

    #[test]
    fn gradient_raster_values() {
        let r = gradient_raster(4, 4);
        assert_eq!(r.get_pixel(0, 0), Some(Rgba::opaque(0, 0, 0)));
        assert_eq!(r.get_pixel(3, 2), Some(Rgba::opaque(5, 5, 5)));
    }

    #[test]
    fn mean_abs_diff_zero_for_identical() {
        let a = gradient_raster(5, 5);
        let b = gradient_raster(5, 5);
        assert_eq!(mean_abs_diff(&a, &b), 0.0);
    }

    #[test]
    fn mean_abs_diff_counts_all_channels() {
        let a = solid_raster(2, 2, Rgba::new(0, 0, 0, 0));
        let b = solid_raster(2, 2, Rgba::new(4, 4, 4, 4));
        assert_eq!(mean_abs_diff(&a, &b), 4.0);
    }
}

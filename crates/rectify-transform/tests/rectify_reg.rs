//! End-to-end rectification regression test
//!
//! Drives the one-shot corners-to-output entry point the way an
//! interactive caller would.

use rectify_core::{Point, Quad, Rgba};
use rectify_test::{RegParams, gradient_raster, solid_raster};
use rectify_transform::{Fill, Homography, TransformError, rectify, rectify_with_fill, resample};

#[test]
fn rectify_reg_inset_square_solid_red() {
    let mut rp = RegParams::new("rectify_solid_red");

    // An axis-aligned square inset by 10px on a uniform red source must
    // come out uniformly red at any output size.
    let red = Rgba::opaque(255, 0, 0);
    let src = solid_raster(100, 100, red);
    let corners = Quad::new([
        Point::new(10.0, 10.0),
        Point::new(90.0, 10.0),
        Point::new(90.0, 90.0),
        Point::new(10.0, 90.0),
    ]);

    let out = rectify(&src, &corners, 50, 50).expect("rectify");
    rp.compare_values(50.0, out.width() as f64, 0.0);
    rp.compare_values(50.0, out.height() as f64, 0.0);
    rp.compare_rasters(&solid_raster(50, 50, red), &out);

    // Every output pixel samples the source here, so the fill choice
    // cannot show through.
    let filled = rectify_with_fill(&src, &corners, 50, 50, Fill::White).expect("rectify");
    rp.compare_rasters(&out, &filled);

    assert!(rp.cleanup(), "solid red rectification failed");
}

#[test]
fn rectify_reg_matches_solve_then_resample() {
    let mut rp = RegParams::new("rectify_composition");

    // The one-shot call is exactly solve + resample, nothing more.
    let src = gradient_raster(64, 64);
    let corners = Quad::new([
        Point::new(8.0, 4.0),
        Point::new(60.0, 10.0),
        Point::new(55.0, 58.0),
        Point::new(3.0, 50.0),
    ]);
    let (w, h) = (40u32, 30u32);

    let transform =
        Homography::from_quad_to_rect(&corners, w as f64, h as f64).expect("solve");
    let expected = resample(&src, &transform, w, h).expect("resample");
    let actual = rectify(&src, &corners, w, h).expect("rectify");

    rp.compare_rasters(&expected, &actual);
    assert!(rp.cleanup(), "rectify composition test failed");
}

#[test]
fn rectify_reg_skewed_quad_reads_right_region() {
    let mut rp = RegParams::new("rectify_region");

    // Source split into a dark left half and a light right half; a quad
    // covering the whole image must keep the halves on their sides.
    let src = solid_raster(100, 100, Rgba::opaque(20, 20, 20));
    let mut m = src.try_into_mut().expect("sole handle");
    for y in 0..100 {
        for x in 50..100 {
            m.set_pixel_unchecked(x, y, Rgba::opaque(230, 230, 230));
        }
    }
    let src: rectify_core::Raster = m.into();

    let corners = Quad::axis_aligned(0.0, 0.0, 100.0, 100.0);
    let out = rectify(&src, &corners, 60, 60).expect("rectify");

    let left = out.get_pixel(5, 30).expect("in bounds");
    let right = out.get_pixel(55, 30).expect("in bounds");
    rp.compare_values(20.0, left.r as f64, 1.0);
    rp.compare_values(230.0, right.r as f64, 1.0);

    assert!(rp.cleanup(), "region orientation test failed");
}

#[test]
fn rectify_reg_zero_output_rejected() {
    let src = solid_raster(10, 10, Rgba::WHITE);
    let corners = Quad::axis_aligned(1.0, 1.0, 8.0, 8.0);

    let err = rectify(&src, &corners, 0, 40).unwrap_err();
    assert!(matches!(
        err,
        TransformError::InvalidDimensions { width: 0, height: 40 }
    ));
}

#[test]
fn rectify_reg_degenerate_corners_rejected() {
    let src = solid_raster(10, 10, Rgba::WHITE);
    let corners = Quad::new([
        Point::new(0.0, 0.0),
        Point::new(5.0, 0.0),
        Point::new(9.0, 0.0),
        Point::new(0.0, 9.0),
    ]);

    let err = rectify(&src, &corners, 4, 4).unwrap_err();
    assert!(matches!(err, TransformError::DegenerateQuad(_)));
}

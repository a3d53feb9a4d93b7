//! Homography solver regression test
//!
//! Covers solving the corner-to-rectangle transform, forward corner
//! mapping, degeneracy rejection, analytic inversion, and composition.

use rectify_core::{Degeneracy, Point, Quad};
use rectify_test::RegParams;
use rectify_transform::{Homography, TransformError};

fn skewed_quad() -> Quad {
    Quad::new([
        Point::new(12.0, 8.0),
        Point::new(95.0, 20.0),
        Point::new(88.0, 97.0),
        Point::new(5.0, 80.0),
    ])
}

#[test]
fn homography_reg_identity() {
    let mut rp = RegParams::new("homography_identity");

    // A rectangle mapped onto itself must solve to the identity matrix.
    let src = Quad::axis_aligned(0.0, 0.0, 640.0, 480.0);
    let h = Homography::from_quad_to_rect(&src, 640.0, 480.0).expect("identity solve");

    let expected = Homography::IDENTITY;
    for (e, a) in expected.coeffs().iter().zip(h.coeffs()) {
        rp.compare_values(*e, *a, 1e-9);
    }

    assert!(rp.cleanup(), "identity homography test failed");
}

#[test]
fn homography_reg_forward_corner_mapping() {
    let mut rp = RegParams::new("homography_forward");

    let src = skewed_quad();
    let (w, h) = (200.0, 150.0);
    let transform = Homography::from_quad_to_rect(&src, w, h).expect("solve");

    let dst = Quad::axis_aligned(0.0, 0.0, w, h);
    for (s, d) in src.corners().iter().zip(dst.corners()) {
        let mapped = transform.map_point(*s).expect("corner maps to finite point");
        rp.compare_values(d.x, mapped.x, 1e-6);
        rp.compare_values(d.y, mapped.y, 1e-6);
    }

    assert!(rp.cleanup(), "forward corner mapping test failed");
}

#[test]
fn homography_reg_quad_to_quad_corner_mapping() {
    let mut rp = RegParams::new("homography_quad_to_quad");

    let src = skewed_quad();
    let dst = Quad::new([
        Point::new(0.0, 0.0),
        Point::new(120.0, 10.0),
        Point::new(100.0, 90.0),
        Point::new(-10.0, 100.0),
    ]);
    let transform = Homography::from_quad_to_quad(&src, &dst).expect("solve");

    for (s, d) in src.corners().iter().zip(dst.corners()) {
        let mapped = transform.map_point(*s).expect("corner maps to finite point");
        rp.compare_values(d.x, mapped.x, 1e-6);
        rp.compare_values(d.y, mapped.y, 1e-6);
    }

    assert!(rp.cleanup(), "quad-to-quad corner mapping test failed");
}

#[test]
fn homography_reg_collinear_corners_rejected() {
    // First three corners on one line.
    let src = Quad::new([
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(20.0, 0.0),
        Point::new(0.0, 10.0),
    ]);
    let err = Homography::from_quad_to_rect(&src, 100.0, 100.0).unwrap_err();
    assert!(matches!(
        err,
        TransformError::DegenerateQuad(Degeneracy::Collinear { a: 0, b: 1, c: 2 })
    ));
}

#[test]
fn homography_reg_coincident_corners_rejected() {
    let src = Quad::new([
        Point::new(5.0, 5.0),
        Point::new(5.0, 5.0),
        Point::new(90.0, 90.0),
        Point::new(5.0, 90.0),
    ]);
    let err = Homography::from_quad_to_rect(&src, 100.0, 100.0).unwrap_err();
    assert!(matches!(
        err,
        TransformError::DegenerateQuad(Degeneracy::Coincident { a: 0, b: 1 })
    ));
}

#[test]
fn homography_reg_non_finite_corner_rejected() {
    let src = Quad::new([
        Point::new(0.0, 0.0),
        Point::new(f64::INFINITY, 0.0),
        Point::new(90.0, 90.0),
        Point::new(0.0, 90.0),
    ]);
    let err = Homography::from_quad_to_rect(&src, 100.0, 100.0).unwrap_err();
    assert!(matches!(
        err,
        TransformError::DegenerateQuad(Degeneracy::NonFinite { corner: 1 })
    ));
}

#[test]
fn homography_reg_degenerate_destination_rejected() {
    // A zero-height destination rectangle has coincident corners.
    let src = skewed_quad();
    let err = Homography::from_quad_to_rect(&src, 100.0, 0.0).unwrap_err();
    assert!(matches!(err, TransformError::DegenerateQuad(_)));
}

#[test]
fn homography_reg_round_trip() {
    let mut rp = RegParams::new("homography_round_trip");

    let src = skewed_quad();
    let (w, h) = (300.0, 200.0);
    let transform = Homography::from_quad_to_rect(&src, w, h).expect("solve");
    let inverse = transform.invert().expect("invertible");

    // The inverse must carry the destination corners back onto the source.
    let dst = Quad::axis_aligned(0.0, 0.0, w, h);
    for (s, d) in src.corners().iter().zip(dst.corners()) {
        let back = inverse.map_point(*d).expect("corner maps back");
        rp.compare_values(s.x, back.x, 1e-6);
        rp.compare_values(s.y, back.y, 1e-6);
    }

    // Composing with the inverse is the identity on interior points too.
    let round_trip = inverse.compose(&transform);
    let interior = Point::new(33.3, 57.1);
    let mapped = round_trip.map_point(interior).expect("finite");
    rp.compare_values(interior.x, mapped.x, 1e-6);
    rp.compare_values(interior.y, mapped.y, 1e-6);

    assert!(rp.cleanup(), "homography round trip test failed");
}

#[test]
fn homography_reg_singular_matrix_rejected() {
    // Rank-deficient by construction; only reachable through from_coeffs.
    let singular = Homography::from_coeffs([1.0, 2.0, 3.0, 2.0, 4.0, 6.0, 0.0, 0.0, 1.0]);
    assert!(matches!(
        singular.invert(),
        Err(TransformError::SingularTransform)
    ));
}

#[test]
fn homography_reg_point_at_infinity() {
    // w = 1 - 2x vanishes along x = 0.5.
    let h = Homography::from_coeffs([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, -2.0, 0.0, 1.0]);
    assert!(h.map_point(Point::new(0.5, 3.0)).is_none());
    assert!(h.map_point(Point::new(1.0, 3.0)).is_some());
}

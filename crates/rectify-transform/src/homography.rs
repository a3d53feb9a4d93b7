//! Projective transforms between image planes
//!
//! A homography is a 3x3 matrix, stored row-major:
//!
//! ```text
//! [ h1 h2 h3 ]
//! [ h4 h5 h6 ]
//! [ h7 h8 h9 ]
//! ```
//!
//! mapping a point `(x, y, 1)` to homogeneous coordinates via:
//!
//! ```text
//! x_h = h1*x + h2*y + h3
//! y_h = h4*x + h5*y + h6
//! w_h = h7*x + h8*y + h9
//! ```
//!
//! The projected 2D point is `(x_h / w_h, y_h / w_h)`. Rectification builds
//! the homography from four corner correspondences: each correspondence
//! `(x, y) -> (x', y')` contributes two linear equations in the eight
//! unknown coefficients (`h9` is fixed to 1 by convention), giving an 8x8
//! system solved by Gaussian elimination with partial pivoting.

use crate::error::{TransformError, TransformResult};
use rectify_core::{Degeneracy, Point, Quad};

/// Threshold below which a pivot, determinant, or homogeneous w component
/// counts as zero.
pub(crate) const EPSILON: f64 = 1e-9;

/// A 2D projective transform (homography).
///
/// Immutable once constructed. For any four non-collinear, pairwise-distinct
/// source corners the solver produces an invertible matrix; it is the unique
/// (up to scale) projective map taking the source corners to the destination
/// corners in the same cyclic order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Homography {
    /// Row-major 3x3 coefficients, `m[8]` normalized to 1 by the solver.
    m: [f64; 9],
}

impl Homography {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        m: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
    };

    /// Create from raw row-major coefficients.
    ///
    /// Intended for composing transforms computed elsewhere and for tests;
    /// rectification itself always goes through [`Homography::from_quad_to_rect`].
    pub const fn from_coeffs(m: [f64; 9]) -> Self {
        Self { m }
    }

    /// The raw row-major coefficients.
    #[inline]
    pub fn coeffs(&self) -> &[f64; 9] {
        &self.m
    }

    /// Compute the homography mapping `src` onto the axis-aligned rectangle
    /// with corners `(0,0), (w,0), (w,h), (0,h)`, in the same top-left,
    /// top-right, bottom-right, bottom-left order as `src`.
    ///
    /// This is the transform used to rectify a skewed quadrilateral region
    /// into a fronto-parallel `w` x `h` output.
    ///
    /// # Errors
    ///
    /// [`TransformError::DegenerateQuad`] if `src` has coincident or
    /// collinear corners (or non-finite coordinates), if `w`/`h` do not
    /// describe a real rectangle, or if the system is numerically singular.
    pub fn from_quad_to_rect(src: &Quad, width: f64, height: f64) -> TransformResult<Self> {
        Self::from_quad_to_quad(src, &Quad::axis_aligned(0.0, 0.0, width, height))
    }

    /// Compute the homography mapping the corners of `src` onto the corners
    /// of `dst`, pairing corners by their cyclic position.
    ///
    /// # Errors
    ///
    /// [`TransformError::DegenerateQuad`] if either quad is degenerate or
    /// the resulting linear system cannot be solved.
    pub fn from_quad_to_quad(src: &Quad, dst: &Quad) -> TransformResult<Self> {
        if let Some(reason) = src.degeneracy().or_else(|| dst.degeneracy()) {
            return Err(TransformError::DegenerateQuad(reason));
        }

        // Two equations per correspondence:
        //   x' * (h7*x + h8*y + 1) = h1*x + h2*y + h3
        //   y' * (h7*x + h8*y + 1) = h4*x + h5*y + h6
        // rearranged into rows of an 8x8 system A * h = b.
        let mut a = [[0.0f64; 8]; 8];
        let mut b = [0.0f64; 8];
        for i in 0..4 {
            let s = src.corners()[i];
            let d = dst.corners()[i];
            let row0 = 2 * i;
            let row1 = row0 + 1;

            a[row0][0] = s.x;
            a[row0][1] = s.y;
            a[row0][2] = 1.0;
            a[row0][6] = -d.x * s.x;
            a[row0][7] = -d.x * s.y;
            b[row0] = d.x;

            a[row1][3] = s.x;
            a[row1][4] = s.y;
            a[row1][5] = 1.0;
            a[row1][6] = -d.y * s.x;
            a[row1][7] = -d.y * s.y;
            b[row1] = d.y;
        }

        let h = solve_8x8(a, b)
            .ok_or(TransformError::DegenerateQuad(Degeneracy::NumericallySingular))?;

        let mut m = [0.0f64; 9];
        m[..8].copy_from_slice(&h);
        m[8] = 1.0;
        Ok(Self { m })
    }

    /// Determinant of the 3x3 matrix.
    pub fn determinant(&self) -> f64 {
        let [a, b, c, d, e, f, g, h, i] = self.m;
        a * (e * i - f * h) - b * (d * i - f * g) + c * (d * h - e * g)
    }

    /// The inverse transform, computed analytically from the adjugate
    /// matrix and the determinant.
    ///
    /// # Errors
    ///
    /// [`TransformError::SingularTransform`] if the determinant is within
    /// epsilon of zero. This cannot happen for a matrix produced by the
    /// solver from valid corners, but a transform may also arrive from
    /// [`Homography::from_coeffs`].
    pub fn invert(&self) -> TransformResult<Self> {
        let [a, b, c, d, e, f, g, h, i] = self.m;
        let det = self.determinant();
        if !det.is_finite() || det.abs() < EPSILON {
            return Err(TransformError::SingularTransform);
        }
        let inv_det = 1.0 / det;
        Ok(Self {
            m: [
                (e * i - f * h) * inv_det,
                (c * h - b * i) * inv_det,
                (b * f - c * e) * inv_det,
                (f * g - d * i) * inv_det,
                (a * i - c * g) * inv_det,
                (c * d - a * f) * inv_det,
                (d * h - e * g) * inv_det,
                (b * g - a * h) * inv_det,
                (a * e - b * d) * inv_det,
            ],
        })
    }

    /// Compose two transforms: the result applies `other` first, then `self`.
    pub fn compose(&self, other: &Homography) -> Homography {
        let mut out = [0.0f64; 9];
        for row in 0..3 {
            for col in 0..3 {
                out[row * 3 + col] = self.m[row * 3] * other.m[col]
                    + self.m[row * 3 + 1] * other.m[3 + col]
                    + self.m[row * 3 + 2] * other.m[6 + col];
            }
        }
        Homography { m: out }
    }

    /// Map a point through the transform and dehomogenize.
    ///
    /// Returns `None` when the homogeneous `w` component is within epsilon
    /// of zero (the point maps to infinity).
    pub fn map_point(&self, p: Point) -> Option<Point> {
        let x = self.m[0] * p.x + self.m[1] * p.y + self.m[2];
        let y = self.m[3] * p.x + self.m[4] * p.y + self.m[5];
        let w = self.m[6] * p.x + self.m[7] * p.y + self.m[8];
        if !w.is_finite() || w.abs() < EPSILON {
            return None;
        }
        Some(Point::new(x / w, y / w))
    }
}

impl Default for Homography {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Solve an 8x8 linear system by Gauss-Jordan elimination with partial
/// pivoting (pivot = largest absolute value in the current column among the
/// remaining rows). Returns `None` if any pivot falls below epsilon.
fn solve_8x8(mut a: [[f64; 8]; 8], mut b: [f64; 8]) -> Option<[f64; 8]> {
    for col in 0..8 {
        let mut pivot_row = col;
        let mut pivot_val = a[pivot_row][col].abs();
        for row in (col + 1)..8 {
            let val = a[row][col].abs();
            if val > pivot_val {
                pivot_val = val;
                pivot_row = row;
            }
        }

        if !pivot_val.is_finite() || pivot_val < EPSILON {
            return None;
        }

        if pivot_row != col {
            a.swap(col, pivot_row);
            b.swap(col, pivot_row);
        }

        let inv_pivot = 1.0 / a[col][col];
        for j in col..8 {
            a[col][j] *= inv_pivot;
        }
        b[col] *= inv_pivot;

        for row in 0..8 {
            if row == col {
                continue;
            }
            let factor = a[row][col];
            if factor == 0.0 {
                continue;
            }
            for j in col..8 {
                a[row][j] -= factor * a[col][j];
            }
            b[row] -= factor * b[col];
        }
    }

    b.iter().all(|v| v.is_finite()).then_some(b)
}

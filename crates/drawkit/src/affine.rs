//! 2D affine maps `x ↦ M x + t`.
//!
//! The connection subsystem builds one of these per query (a similarity
//! taking the authored chord onto the live anchor chord); Bezier paths use
//! the rotation/scale/translation constructors to transform their segments.

use nalgebra::{Matrix2, Rotation2, Vector2};

use crate::point::Point;

/// 2D affine map: `x ↦ M x + t`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine2 {
    pub m: Matrix2<f64>,
    pub t: Vector2<f64>,
}

impl Affine2 {
    #[inline]
    pub fn translation(d: Vector2<f64>) -> Self {
        Self {
            m: Matrix2::identity(),
            t: d,
        }
    }

    /// Rotation by `degrees` about `origin`.
    pub fn rotation_about(degrees: f64, origin: Point) -> Self {
        let m = *Rotation2::new(degrees.to_radians()).matrix();
        Self {
            m,
            t: origin - m * origin,
        }
    }

    /// Uniform scale by `factor` about `origin`.
    pub fn scaling_about(factor: f64, origin: Point) -> Self {
        let m = Matrix2::identity() * factor;
        Self {
            m,
            t: origin - m * origin,
        }
    }

    /// Similarity mapping segment `(s, e)` onto `(a, b)`.
    ///
    /// `None` if the source segment is shorter than `eps`. A zero-length target
    /// yields the constant map onto `a`.
    pub fn chord_map(s: Point, e: Point, a: Point, b: Point, eps: f64) -> Option<Self> {
        let src = e - s;
        let dst = b - a;
        let src_len = src.norm();
        if src_len.is_nan() || src_len < eps {
            return None;
        }
        let scale = dst.norm() / src_len;
        let rotation = dst.y.atan2(dst.x) - src.y.atan2(src.x);
        let m = *Rotation2::new(rotation).matrix() * scale;
        Some(Self { m, t: a - m * s })
    }

    #[inline]
    pub fn apply(&self, p: Point) -> Point {
        self.m * p + self.t
    }
}

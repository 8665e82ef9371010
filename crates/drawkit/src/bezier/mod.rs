//! Bezier primitives shared by every curved entity.
//!
//! Purpose
//! - Evaluate and differentiate quadratic/cubic segments in the Bernstein
//!   basis, degree-elevate quadratics exactly, and derive the control point of
//!   a simple curvature arc.
//! - Turn any `Pathable` into a C¹ chain of cubic segments (`fit`), with a
//!   clamp that keeps control points within a fraction of the local chord.
//! - Exact, closed-form bounding boxes (`extrema`); no sampling.
//!
//! Nothing in here fails: degenerate input (zero chords, `n = 0`) is mapped
//! to a safe default instead.

mod extrema;
mod fit;

pub use extrema::{cubic_bounds, cubic_path_bounds, quadratic_bounds};
pub use fit::{fit_cubic_beziers, fit_full};

use nalgebra::Vector2;

use crate::affine::Affine2;
use crate::bounds::Bounds;
use crate::cfg::TANGENT_EPS;
use crate::pathable::Pathable;
use crate::point::{lerp, perp_left, Point};

/// Cubic segment `(P0, C1, C2, P3)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicSeg {
    pub p0: Point,
    pub c1: Point,
    pub c2: Point,
    pub p3: Point,
}

impl CubicSeg {
    #[inline]
    pub fn new(p0: Point, c1: Point, c2: Point, p3: Point) -> Self {
        Self { p0, c1, c2, p3 }
    }

    /// Straight segment with control points at the thirds.
    pub fn line(a: Point, b: Point) -> Self {
        Self::new(a, lerp(a, b, 1.0 / 3.0), lerp(a, b, 2.0 / 3.0), b)
    }

    #[inline]
    pub fn eval(&self, t: f64) -> Point {
        eval_cubic(self.p0, self.c1, self.c2, self.p3, t)
    }

    #[inline]
    pub fn derivative(&self, t: f64) -> Vector2<f64> {
        eval_cubic_derivative(self.p0, self.c1, self.c2, self.p3, t)
    }

    pub fn bounds(&self) -> Bounds {
        cubic_bounds(self.p0, self.c1, self.c2, self.p3)
    }

    /// Image under an affine map. Bezier curves are affine invariant, so this
    /// is exact.
    pub fn transformed(&self, f: &Affine2) -> Self {
        Self::new(f.apply(self.p0), f.apply(self.c1), f.apply(self.c2), f.apply(self.p3))
    }
}

/// Quadratic segment `(P0, Q, P2)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadSeg {
    pub p0: Point,
    pub q: Point,
    pub p2: Point,
}

impl QuadSeg {
    #[inline]
    pub fn new(p0: Point, q: Point, p2: Point) -> Self {
        Self { p0, q, p2 }
    }

    #[inline]
    pub fn eval(&self, t: f64) -> Point {
        eval_quadratic(self.p0, self.q, self.p2, t)
    }

    #[inline]
    pub fn derivative(&self, t: f64) -> Vector2<f64> {
        eval_quadratic_derivative(self.p0, self.q, self.p2, t)
    }

    pub fn bounds(&self) -> Bounds {
        quadratic_bounds(self.p0, self.q, self.p2)
    }

    pub fn to_cubic(&self) -> CubicSeg {
        quadratic_to_cubic(self.p0, self.q, self.p2)
    }
}

/// B(t) = (1-t)³·P0 + 3(1-t)²t·C1 + 3(1-t)t²·C2 + t³·P3
///
/// Returns the endpoints bit-exactly at `t = 0` and `t = 1`.
#[inline]
pub fn eval_cubic(p0: Point, c1: Point, c2: Point, p3: Point, t: f64) -> Point {
    if t == 0.0 {
        return p0;
    }
    if t == 1.0 {
        return p3;
    }
    let mt = 1.0 - t;
    p0 * (mt * mt * mt) + c1 * (3.0 * mt * mt * t) + c2 * (3.0 * mt * t * t) + p3 * (t * t * t)
}

/// B'(t) = 3(1-t)²·(C1-P0) + 6(1-t)t·(C2-C1) + 3t²·(P3-C2)
#[inline]
pub fn eval_cubic_derivative(p0: Point, c1: Point, c2: Point, p3: Point, t: f64) -> Vector2<f64> {
    let mt = 1.0 - t;
    (c1 - p0) * (3.0 * mt * mt) + (c2 - c1) * (6.0 * mt * t) + (p3 - c2) * (3.0 * t * t)
}

/// B(t) = (1-t)²·P0 + 2(1-t)t·Q + t²·P2
#[inline]
pub fn eval_quadratic(p0: Point, q: Point, p2: Point, t: f64) -> Point {
    if t == 0.0 {
        return p0;
    }
    if t == 1.0 {
        return p2;
    }
    let mt = 1.0 - t;
    p0 * (mt * mt) + q * (2.0 * mt * t) + p2 * (t * t)
}

#[inline]
pub fn eval_quadratic_derivative(p0: Point, q: Point, p2: Point, t: f64) -> Vector2<f64> {
    (q - p0) * (2.0 * (1.0 - t)) + (p2 - q) * (2.0 * t)
}

/// Exact degree elevation: `C1 = P0 + ⅔(Q−P0)`, `C2 = P2 + ⅔(Q−P2)`.
pub fn quadratic_to_cubic(p0: Point, q: Point, p2: Point) -> CubicSeg {
    let k = 2.0 / 3.0;
    CubicSeg::new(p0, p0 + (q - p0) * k, p2 + (q - p2) * k, p2)
}

/// Control point of a curvature arc from `start` to `end`.
///
/// The chord midpoint, pushed along the left normal of `start → end` by
/// `curvature · ½ · |chord|`. Positive curvature bows left (counterclockwise
/// side in a y-up frame). A zero-length chord returns the midpoint.
pub fn curvature_control_point(start: Point, end: Point, curvature: f64) -> Point {
    let mid = lerp(start, end, 0.5);
    let chord = end - start;
    let len = chord.norm();
    if len == 0.0 || !len.is_finite() {
        return mid;
    }
    // |perp_left(chord)| == len, so this is the unit normal times curvature·½·len.
    mid + perp_left(chord) * (curvature * 0.5)
}

/// Pull control points back onto `max_ratio · |P3 − P0|` from their anchors.
///
/// `C1` is measured from `P0` and `C2` from `P3`; directions are kept. With a
/// zero chord both control points collapse onto their anchors.
pub fn clamp_control_points(
    p0: Point,
    c1: Point,
    c2: Point,
    p3: Point,
    max_ratio: f64,
) -> (Point, Point) {
    let limit = max_ratio.max(0.0) * (p3 - p0).norm();
    (clamp_towards(p0, c1, limit), clamp_towards(p3, c2, limit))
}

#[inline]
fn clamp_towards(anchor: Point, ctrl: Point, limit: f64) -> Point {
    let d = ctrl - anchor;
    let len = d.norm();
    if !len.is_finite() || limit <= 0.0 {
        return anchor;
    }
    if len <= limit {
        return ctrl;
    }
    // Rescaling can land a few ulps past `limit`; shrink until it holds exactly.
    let mut f = limit / len;
    let mut shrink = f64::EPSILON;
    while f > 0.0 {
        let p = anchor + d * f;
        if (p - anchor).norm() <= limit {
            return p;
        }
        f *= 1.0 - shrink;
        shrink = (shrink * 2.0).min(1.0);
    }
    anchor
}

/// Derivative `dP/dt` by central difference.
///
/// Closed paths wrap the sample positions modulo 1 so the seam stays smooth;
/// open paths clamp to `[0, 1]` and fall back to a one-sided difference.
pub fn tangent_at<P: Pathable + ?Sized>(path: &P, t: f64, closed: bool) -> Vector2<f64> {
    let eps = TANGENT_EPS;
    if closed {
        let lo = (t - eps).rem_euclid(1.0);
        let hi = (t + eps).rem_euclid(1.0);
        return (path.point_at(hi) - path.point_at(lo)) / (2.0 * eps);
    }
    let lo = (t - eps).max(0.0);
    let hi = (t + eps).min(1.0);
    if hi <= lo {
        return Vector2::zeros();
    }
    (path.point_at(hi) - path.point_at(lo)) / (hi - lo)
}

/// Segment index and local parameter for a global `t` over `n` equal spans.
///
/// `t` is clamped to `[0, 1]`; `t = 1` maps to the end of the last segment.
pub fn locate_segment(n: usize, t: f64) -> (usize, f64) {
    if n == 0 {
        return (0, 0.0);
    }
    let scaled = t.clamp(0.0, 1.0) * n as f64;
    let idx = (scaled.floor() as usize).min(n - 1);
    (idx, scaled - idx as f64)
}

/// Polyline length through `samples + 1` evenly spaced parameter values.
pub fn sample_arc_length(point_at: impl Fn(f64) -> Point, samples: usize) -> f64 {
    let samples = samples.max(1);
    let mut prev = point_at(0.0);
    let mut total = 0.0;
    for i in 1..=samples {
        let p = point_at(i as f64 / samples as f64);
        total += (p - prev).norm();
        prev = p;
    }
    total
}

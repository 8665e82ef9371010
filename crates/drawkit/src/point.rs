//! 2D points and the small vector helpers the kernel needs.
//!
//! `Point` is a plain `nalgebra::Vector2<f64>`: arithmetic, `dot`, `norm`,
//! and `lerp` come from nalgebra; the helpers here add the drawing-specific
//! bits (degrees and rotation about an origin).
//!
//! Angles are in degrees everywhere in the public API.

use nalgebra::{Rotation2, Vector2};

/// A 2D coordinate (or displacement) in user space.
pub type Point = Vector2<f64>;

#[inline]
pub fn pt(x: f64, y: f64) -> Point {
    Vector2::new(x, y)
}

/// `a + (b - a) t`.
#[inline]
pub fn lerp(a: Point, b: Point, t: f64) -> Point {
    a.lerp(&b, t)
}

#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    (b - a).norm()
}

/// Direction of `v` in degrees, in `(-180, 180]`. Zero vectors give `0`.
#[inline]
pub fn angle_deg(v: Point) -> f64 {
    normalize_deg(v.y.atan2(v.x).to_degrees())
}

/// Unit vector pointing at `degrees`.
#[inline]
pub fn unit_at(degrees: f64) -> Point {
    let r = degrees.to_radians();
    Vector2::new(r.cos(), r.sin())
}

/// `v` rotated by +90° (counterclockwise in a y-up frame).
#[inline]
pub fn perp_left(v: Point) -> Point {
    Vector2::new(-v.y, v.x)
}

/// Rotate `p` about `origin` by `degrees` (counterclockwise in a y-up frame).
#[inline]
pub fn rotate_about(p: Point, origin: Point, degrees: f64) -> Point {
    origin + Rotation2::new(degrees.to_radians()) * (p - origin)
}

/// Scale `p` away from `origin` by `factor`.
#[inline]
pub fn scale_about(p: Point, origin: Point, factor: f64) -> Point {
    origin + (p - origin) * factor
}

/// Fold an angle in degrees into `(-180, 180]`, the range of `angle_deg`.
#[inline]
pub fn normalize_deg(degrees: f64) -> f64 {
    if degrees > -180.0 && degrees <= 180.0 {
        return degrees;
    }
    let folded = 180.0 - (180.0 - degrees).rem_euclid(360.0);
    if folded <= -180.0 {
        folded + 360.0
    } else {
        folded
    }
}

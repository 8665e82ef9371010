//! The `Pathable` capability: anything with a position at every `t ∈ [0, 1]`.
//!
//! Lines, curves, ellipses, polygons, Bezier paths and connections all
//! implement it; the Bezier fitter and connections consume it. Only
//! `point_at` is required; tangents and lengths fall back to numeric
//! estimates.

use crate::bezier::{sample_arc_length, tangent_at};
use crate::cfg::ARC_LENGTH_SAMPLES;
use crate::point::{angle_deg, normalize_deg, Point};

pub trait Pathable {
    /// Position at parameter `t ∈ [0, 1]`.
    fn point_at(&self, t: f64) -> Point;

    /// Tangent direction at `t`, in degrees.
    fn angle_at(&self, t: f64) -> f64 {
        angle_deg(tangent_at(self, t, self.is_closed()))
    }

    fn arc_length(&self) -> f64 {
        sample_arc_length(|t| self.point_at(t), ARC_LENGTH_SAMPLES)
    }

    /// Whether `point_at(0)` and `point_at(1)` coincide by construction.
    fn is_closed(&self) -> bool {
        false
    }
}

impl<P: Pathable + ?Sized> Pathable for &P {
    fn point_at(&self, t: f64) -> Point {
        (**self).point_at(t)
    }
    fn angle_at(&self, t: f64) -> f64 {
        (**self).angle_at(t)
    }
    fn arc_length(&self) -> f64 {
        (**self).arc_length()
    }
    fn is_closed(&self) -> bool {
        (**self).is_closed()
    }
}

impl<P: Pathable + ?Sized> Pathable for Box<P> {
    fn point_at(&self, t: f64) -> Point {
        (**self).point_at(t)
    }
    fn angle_at(&self, t: f64) -> f64 {
        (**self).angle_at(t)
    }
    fn arc_length(&self) -> f64 {
        (**self).arc_length()
    }
    fn is_closed(&self) -> bool {
        (**self).is_closed()
    }
}

/// The `[start_t, end_t]` piece of another pathable, re-parameterized onto
/// `[0, 1]`. `end_t < start_t` walks the source backwards.
///
/// A slice is never closed, even when cut from a closed source.
#[derive(Clone, Copy, Debug)]
pub struct SubPath<P> {
    pub inner: P,
    pub start_t: f64,
    pub end_t: f64,
}

impl<P: Pathable> SubPath<P> {
    pub fn new(inner: P, start_t: f64, end_t: f64) -> Self {
        Self {
            inner,
            start_t,
            end_t,
        }
    }

    #[inline]
    fn map_t(&self, t: f64) -> f64 {
        self.start_t + (self.end_t - self.start_t) * t
    }
}

impl<P: Pathable> Pathable for SubPath<P> {
    fn point_at(&self, t: f64) -> Point {
        self.inner.point_at(self.map_t(t))
    }

    fn angle_at(&self, t: f64) -> f64 {
        let a = self.inner.angle_at(self.map_t(t));
        if self.end_t < self.start_t {
            normalize_deg(a + 180.0)
        } else {
            a
        }
    }
}

//! Axis-aligned bounding boxes.

use crate::point::{pt, Point};

/// Axis-aligned box `(min_x, min_y, max_x, max_y)`.
///
/// Also used as the target rectangle of the fit solver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    #[inline]
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Rectangle from its top-left corner and size.
    #[inline]
    pub fn from_rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    #[inline]
    pub fn point(p: Point) -> Self {
        Self::new(p.x, p.y, p.x, p.y)
    }

    /// Tight box around `points`. An empty iterator yields an inverted
    /// (infinite) box that any `include` fixes up.
    pub fn from_points<I: IntoIterator<Item = Point>>(points: I) -> Self {
        let mut b = Self::new(
            f64::INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::NEG_INFINITY,
        );
        for p in points {
            b.include(p);
        }
        b
    }

    #[inline]
    pub fn include(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }

    /// Grow every side by `d` (half a stroke width for visual bounds).
    pub fn inflate(&self, d: f64) -> Bounds {
        Bounds::new(
            self.min_x - d,
            self.min_y - d,
            self.max_x + d,
            self.max_y + d,
        )
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    #[inline]
    pub fn center(&self) -> Point {
        self.point_at_fraction(0.5, 0.5)
    }

    /// `(min_x + rx·w, min_y + ry·h)`; `(0, 0)` is the min corner.
    #[inline]
    pub fn point_at_fraction(&self, rx: f64, ry: f64) -> Point {
        pt(
            self.min_x + rx * self.width(),
            self.min_y + ry * self.height(),
        )
    }

    /// Whether `other` lies inside `self`, with slack `eps`.
    pub fn contains_eps(&self, other: &Bounds, eps: f64) -> bool {
        other.min_x >= self.min_x - eps
            && other.min_y >= self.min_y - eps
            && other.max_x <= self.max_x + eps
            && other.max_y <= self.max_y + eps
    }
}

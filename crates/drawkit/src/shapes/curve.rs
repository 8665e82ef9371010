use super::{visual, DEFAULT_STROKE};
use crate::bezier::{curvature_control_point, CubicSeg, QuadSeg};
use crate::bounds::Bounds;
use crate::entity::{offset, Anchor, Entity};
use crate::pathable::Pathable;
use crate::point::{angle_deg, rotate_about, scale_about, Point};
use crate::svg;

/// Quadratic arc between two points, bowed by `curvature`.
///
/// The control point is derived from `(start, end, curvature)` on every call,
/// so moving an endpoint can never leave a stale control point behind.
#[derive(Clone, Debug, PartialEq)]
pub struct Curve {
    pub start: Point,
    pub end: Point,
    /// Offset of the control point from the chord midpoint, in half-chords.
    /// Positive bows left of `start → end`.
    pub curvature: f64,
    pub stroke_width: f64,
}

impl Curve {
    pub fn new(start: Point, end: Point, curvature: f64) -> Self {
        Self {
            start,
            end,
            curvature,
            stroke_width: DEFAULT_STROKE,
        }
    }

    pub fn control_point(&self) -> Point {
        curvature_control_point(self.start, self.end, self.curvature)
    }

    pub fn quad(&self) -> QuadSeg {
        QuadSeg::new(self.start, self.control_point(), self.end)
    }

    /// The exact cubic equivalent (degree elevation).
    pub fn to_cubic(&self) -> CubicSeg {
        self.quad().to_cubic()
    }

    pub fn to_svg_path_d(&self) -> String {
        svg::cubic_path_d(&[self.to_cubic()], false)
    }
}

impl Pathable for Curve {
    fn point_at(&self, t: f64) -> Point {
        self.quad().eval(t)
    }

    fn angle_at(&self, t: f64) -> f64 {
        let d = self.quad().derivative(t);
        if d.norm() == 0.0 {
            return angle_deg(self.end - self.start);
        }
        angle_deg(d)
    }
}

impl Entity for Curve {
    fn bounds(&self, vis: bool) -> Bounds {
        visual(self.quad().bounds(), vis, self.stroke_width)
    }

    fn anchor(&self, anchor: Anchor) -> Option<Point> {
        match anchor {
            Anchor::Start => Some(self.start),
            Anchor::End => Some(self.end),
            other => {
                let (rx, ry) = other.box_fraction()?;
                Some(self.bounds(false).point_at_fraction(rx, ry))
            }
        }
    }

    // Curvature is relative to the chord, so rotating or scaling the
    // endpoints carries the bow along.
    fn rotate(&mut self, degrees: f64, origin: Point) {
        self.start = rotate_about(self.start, origin, degrees);
        self.end = rotate_about(self.end, origin, degrees);
    }

    fn scale(&mut self, factor: f64, origin: Point) {
        self.start = scale_about(self.start, origin, factor);
        self.end = scale_about(self.end, origin, factor);
    }

    fn move_by(&mut self, dx: f64, dy: f64) {
        self.start = offset(self.start, dx, dy);
        self.end = offset(self.end, dx, dy);
    }
}

use super::{visual, DEFAULT_STROKE};
use crate::affine::Affine2;
use crate::bezier::{cubic_path_bounds, fit_full, locate_segment, CubicSeg};
use crate::bounds::Bounds;
use crate::entity::{Anchor, Entity};
use crate::pathable::Pathable;
use crate::point::{angle_deg, pt, Point};
use crate::svg;

/// Chain of cubic segments; each segment covers an equal share of `t`.
#[derive(Clone, Debug, PartialEq)]
pub struct BezierPath {
    pub segments: Vec<CubicSeg>,
    pub closed: bool,
    pub stroke_width: f64,
}

impl BezierPath {
    pub fn new(segments: Vec<CubicSeg>, closed: bool) -> Self {
        Self {
            segments,
            closed,
            stroke_width: DEFAULT_STROKE,
        }
    }

    /// Snapshot of any pathable as `n` fitted segments.
    pub fn from_pathable<P: Pathable + ?Sized>(path: &P, n: usize) -> Self {
        Self::new(fit_full(path, n), path.is_closed())
    }

    fn transform(&mut self, f: &Affine2) {
        for s in &mut self.segments {
            *s = s.transformed(f);
        }
    }

    pub fn to_svg_path_d(&self) -> String {
        svg::cubic_path_d(&self.segments, self.closed)
    }
}

impl Pathable for BezierPath {
    fn point_at(&self, t: f64) -> Point {
        if self.segments.is_empty() {
            return Point::zeros();
        }
        let (i, u) = locate_segment(self.segments.len(), t);
        self.segments[i].eval(u)
    }

    fn angle_at(&self, t: f64) -> f64 {
        if self.segments.is_empty() {
            return 0.0;
        }
        let (i, u) = locate_segment(self.segments.len(), t);
        let seg = &self.segments[i];
        let d = seg.derivative(u);
        if d.norm() == 0.0 {
            return angle_deg(seg.p3 - seg.p0);
        }
        angle_deg(d)
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Entity for BezierPath {
    fn bounds(&self, vis: bool) -> Bounds {
        let b = cubic_path_bounds(&self.segments).unwrap_or_else(|| Bounds::point(pt(0.0, 0.0)));
        visual(b, vis, self.stroke_width)
    }

    fn anchor(&self, anchor: Anchor) -> Option<Point> {
        match anchor {
            Anchor::Start => self.segments.first().map(|s| s.p0),
            Anchor::End => self.segments.last().map(|s| s.p3),
            other => {
                let (rx, ry) = other.box_fraction()?;
                Some(self.bounds(false).point_at_fraction(rx, ry))
            }
        }
    }

    fn rotate(&mut self, degrees: f64, origin: Point) {
        self.transform(&Affine2::rotation_about(degrees, origin));
    }

    fn scale(&mut self, factor: f64, origin: Point) {
        self.transform(&Affine2::scaling_about(factor, origin));
    }

    fn move_by(&mut self, dx: f64, dy: f64) {
        self.transform(&Affine2::translation(pt(dx, dy)));
    }
}

use super::{visual, DEFAULT_STROKE};
use crate::bounds::Bounds;
use crate::entity::{offset, Anchor, Entity};
use crate::pathable::Pathable;
use crate::point::{angle_deg, distance, lerp, rotate_about, scale_about, Point};
use crate::svg;

/// Straight segment.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    pub start: Point,
    pub end: Point,
    pub stroke_width: f64,
}

impl Line {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            stroke_width: DEFAULT_STROKE,
        }
    }

    pub fn to_svg_path_d(&self) -> String {
        svg::line_path_d(self.start, self.end)
    }
}

impl Pathable for Line {
    fn point_at(&self, t: f64) -> Point {
        if t == 1.0 {
            return self.end;
        }
        lerp(self.start, self.end, t)
    }

    fn angle_at(&self, _t: f64) -> f64 {
        angle_deg(self.end - self.start)
    }

    fn arc_length(&self) -> f64 {
        distance(self.start, self.end)
    }
}

impl Entity for Line {
    fn bounds(&self, vis: bool) -> Bounds {
        visual(
            Bounds::from_points([self.start, self.end]),
            vis,
            self.stroke_width,
        )
    }

    fn anchor(&self, anchor: Anchor) -> Option<Point> {
        match anchor {
            Anchor::Start => Some(self.start),
            Anchor::End => Some(self.end),
            Anchor::Center => Some(lerp(self.start, self.end, 0.5)),
            other => {
                let (rx, ry) = other.box_fraction()?;
                Some(self.bounds(false).point_at_fraction(rx, ry))
            }
        }
    }

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

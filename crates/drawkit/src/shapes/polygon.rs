use super::{visual, DEFAULT_STROKE};
use crate::bounds::Bounds;
use crate::entity::{offset, Anchor, Entity};
use crate::pathable::Pathable;
use crate::point::{angle_deg, distance, lerp, rotate_about, scale_about, Point};
use crate::svg;

/// Polyline or closed polygon, parameterized by arc length.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    pub vertices: Vec<Point>,
    pub closed: bool,
    pub stroke_width: f64,
}

impl Polygon {
    pub fn new(vertices: Vec<Point>, closed: bool) -> Self {
        Self {
            vertices,
            closed,
            stroke_width: DEFAULT_STROKE,
        }
    }

    /// Edges in drawing order, including the closing edge when closed.
    fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.vertices.len();
        let count = match (n, self.closed) {
            (0 | 1, _) => 0,
            (_, true) => n,
            (_, false) => n - 1,
        };
        (0..count).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Edge containing arc-length fraction `t`, with the local parameter.
    fn locate(&self, t: f64) -> Option<((Point, Point), f64)> {
        let total = self.arc_length();
        if total == 0.0 {
            return self.edges().next().map(|e| (e, 0.0));
        }
        let target = t.clamp(0.0, 1.0) * total;
        let mut walked = 0.0;
        let mut last = None;
        for e in self.edges() {
            let len = distance(e.0, e.1);
            if len > 0.0 && walked + len >= target {
                return Some((e, ((target - walked) / len).clamp(0.0, 1.0)));
            }
            walked += len;
            last = Some(e);
        }
        last.map(|e| (e, 1.0))
    }

    pub fn to_svg_path_d(&self) -> String {
        svg::polyline_path_d(&self.vertices, self.closed)
    }
}

impl Pathable for Polygon {
    fn point_at(&self, t: f64) -> Point {
        if t <= 0.0 || (t >= 1.0 && self.closed) {
            return self.vertices.first().copied().unwrap_or_else(Point::zeros);
        }
        if t >= 1.0 {
            return self.vertices.last().copied().unwrap_or_else(Point::zeros);
        }
        match self.locate(t) {
            Some(((a, b), u)) => lerp(a, b, u),
            None => self.vertices.first().copied().unwrap_or_else(Point::zeros),
        }
    }

    fn angle_at(&self, t: f64) -> f64 {
        match self.locate(t) {
            Some(((a, b), _)) => angle_deg(b - a),
            None => 0.0,
        }
    }

    fn arc_length(&self) -> f64 {
        self.edges().map(|(a, b)| distance(a, b)).sum()
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Entity for Polygon {
    fn bounds(&self, vis: bool) -> Bounds {
        if self.vertices.is_empty() {
            return visual(Bounds::point(Point::zeros()), vis, self.stroke_width);
        }
        visual(
            Bounds::from_points(self.vertices.iter().copied()),
            vis,
            self.stroke_width,
        )
    }

    fn anchor(&self, anchor: Anchor) -> Option<Point> {
        match anchor {
            Anchor::Start => self.vertices.first().copied(),
            Anchor::End if self.closed => self.vertices.first().copied(),
            Anchor::End => self.vertices.last().copied(),
            other => {
                let (rx, ry) = other.box_fraction()?;
                Some(self.bounds(false).point_at_fraction(rx, ry))
            }
        }
    }

    fn rotate(&mut self, degrees: f64, origin: Point) {
        for v in &mut self.vertices {
            *v = rotate_about(*v, origin, degrees);
        }
    }

    fn scale(&mut self, factor: f64, origin: Point) {
        for v in &mut self.vertices {
            *v = scale_about(*v, origin, factor);
        }
    }

    fn move_by(&mut self, dx: f64, dy: f64) {
        for v in &mut self.vertices {
            *v = offset(*v, dx, dy);
        }
    }
}

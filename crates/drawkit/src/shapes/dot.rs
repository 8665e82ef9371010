use super::{visual, DEFAULT_STROKE};
use crate::bounds::Bounds;
use crate::entity::{offset, Entity};
use crate::point::{rotate_about, scale_about, Point};

/// Filled circle; the usual connection endpoint.
#[derive(Clone, Debug, PartialEq)]
pub struct Dot {
    pub center: Point,
    pub radius: f64,
    pub stroke_width: f64,
}

impl Dot {
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            center,
            radius,
            stroke_width: DEFAULT_STROKE,
        }
    }
}

impl Entity for Dot {
    fn bounds(&self, vis: bool) -> Bounds {
        let r = self.radius.abs();
        let b = Bounds::new(
            self.center.x - r,
            self.center.y - r,
            self.center.x + r,
            self.center.y + r,
        );
        visual(b, vis, self.stroke_width)
    }

    fn rotate(&mut self, degrees: f64, origin: Point) {
        self.center = rotate_about(self.center, origin, degrees);
    }

    fn scale(&mut self, factor: f64, origin: Point) {
        self.center = scale_about(self.center, origin, factor);
        self.radius *= factor.abs();
    }

    fn move_by(&mut self, dx: f64, dy: f64) {
        self.center = offset(self.center, dx, dy);
    }

    fn center(&self) -> Point {
        self.center
    }

    fn move_to(&mut self, p: Point) {
        self.center = p;
    }
}

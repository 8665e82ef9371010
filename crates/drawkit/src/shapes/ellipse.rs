use std::f64::consts::TAU;

use nalgebra::Rotation2;

use super::{visual, DEFAULT_STROKE};
use crate::bezier::{fit_full, CubicSeg};
use crate::bounds::Bounds;
use crate::cfg::DEFAULT_PATH_SEGMENTS;
use crate::entity::{offset, Entity};
use crate::pathable::Pathable;
use crate::point::{angle_deg, pt, rotate_about, scale_about, Point};
use crate::svg;

/// Ellipse with semi-axes `rx`, `ry`, rotated by `rotation` degrees.
///
/// As a pathable it starts at the end of the `rx` axis and is closed.
#[derive(Clone, Debug, PartialEq)]
pub struct Ellipse {
    pub center: Point,
    pub rx: f64,
    pub ry: f64,
    pub rotation: f64,
    pub stroke_width: f64,
}

impl Ellipse {
    pub fn new(center: Point, rx: f64, ry: f64) -> Self {
        Self {
            center,
            rx,
            ry,
            rotation: 0.0,
            stroke_width: DEFAULT_STROKE,
        }
    }

    pub fn circle(center: Point, r: f64) -> Self {
        Self::new(center, r, r)
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    /// Half-extents of the rotated ellipse's bounding box.
    pub fn half_extents(&self) -> (f64, f64) {
        let (s, c) = self.rotation.to_radians().sin_cos();
        let (rx2, ry2) = (self.rx * self.rx, self.ry * self.ry);
        (
            (rx2 * c * c + ry2 * s * s).sqrt(),
            (rx2 * s * s + ry2 * c * c).sqrt(),
        )
    }

    pub fn to_segments(&self) -> Vec<CubicSeg> {
        fit_full(self, DEFAULT_PATH_SEGMENTS)
    }

    pub fn to_svg_path_d(&self) -> String {
        svg::cubic_path_d(&self.to_segments(), true)
    }
}

impl Pathable for Ellipse {
    fn point_at(&self, t: f64) -> Point {
        let a = t * TAU;
        let local = pt(self.rx * a.cos(), self.ry * a.sin());
        self.center + Rotation2::new(self.rotation.to_radians()) * local
    }

    fn angle_at(&self, t: f64) -> f64 {
        let a = t * TAU;
        let d = pt(-self.rx * a.sin(), self.ry * a.cos());
        angle_deg(Rotation2::new(self.rotation.to_radians()) * d)
    }

    fn is_closed(&self) -> bool {
        true
    }
}

impl Entity for Ellipse {
    fn bounds(&self, vis: bool) -> Bounds {
        let (dx, dy) = self.half_extents();
        let b = Bounds::new(
            self.center.x - dx,
            self.center.y - dy,
            self.center.x + dx,
            self.center.y + dy,
        );
        visual(b, vis, self.stroke_width)
    }

    fn rotate(&mut self, degrees: f64, origin: Point) {
        self.center = rotate_about(self.center, origin, degrees);
        self.rotation += degrees;
    }

    fn scale(&mut self, factor: f64, origin: Point) {
        self.center = scale_about(self.center, origin, factor);
        self.rx *= factor.abs();
        self.ry *= factor.abs();
    }

    fn move_by(&mut self, dx: f64, dy: f64) {
        self.center = offset(self.center, dx, dy);
    }

    fn center(&self) -> Point {
        self.center
    }
}

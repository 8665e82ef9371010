//! The `Entity` capability consumed by connections and the fit solver.
//!
//! Concrete drawables (`shapes`) implement it individually; the kernel only
//! ever talks to the trait.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use crate::bounds::Bounds;
use crate::point::{pt, Point};

/// Named point on an entity, usable as a connection endpoint or fit target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Anchor {
    Center,
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    /// First point of a path-like entity.
    Start,
    /// Last point of a path-like entity.
    End,
}

impl Anchor {
    pub const ALL: [Anchor; 11] = [
        Anchor::Center,
        Anchor::Top,
        Anchor::Bottom,
        Anchor::Left,
        Anchor::Right,
        Anchor::TopLeft,
        Anchor::TopRight,
        Anchor::BottomLeft,
        Anchor::BottomRight,
        Anchor::Start,
        Anchor::End,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Anchor::Center => "center",
            Anchor::Top => "top",
            Anchor::Bottom => "bottom",
            Anchor::Left => "left",
            Anchor::Right => "right",
            Anchor::TopLeft => "top_left",
            Anchor::TopRight => "top_right",
            Anchor::BottomLeft => "bottom_left",
            Anchor::BottomRight => "bottom_right",
            Anchor::Start => "start",
            Anchor::End => "end",
        }
    }

    /// Position as a fraction of the bounding box (`y` grows downwards, as in
    /// SVG). `None` for `Start`/`End`, which have no box equivalent.
    pub fn box_fraction(self) -> Option<(f64, f64)> {
        Some(match self {
            Anchor::Center => (0.5, 0.5),
            Anchor::Top => (0.5, 0.0),
            Anchor::Bottom => (0.5, 1.0),
            Anchor::Left => (0.0, 0.5),
            Anchor::Right => (1.0, 0.5),
            Anchor::TopLeft => (0.0, 0.0),
            Anchor::TopRight => (1.0, 0.0),
            Anchor::BottomLeft => (0.0, 1.0),
            Anchor::BottomRight => (1.0, 1.0),
            Anchor::Start | Anchor::End => return None,
        })
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown anchor name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAnchorError {
    pub name: String,
}

impl fmt::Display for ParseAnchorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown anchor name: {:?}", self.name)
    }
}

impl std::error::Error for ParseAnchorError {}

impl FromStr for Anchor {
    type Err = ParseAnchorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Anchor::ALL
            .into_iter()
            .find(|a| a.name() == key)
            .ok_or_else(|| ParseAnchorError { name: s.to_string() })
    }
}

/// A renderable, transformable scene object.
pub trait Entity {
    /// Exact axis-aligned bounds; `visual` inflates by half the stroke width.
    fn bounds(&self, visual: bool) -> Bounds;

    /// Position of a named anchor. Box anchors come from the geometric bounds;
    /// `Start`/`End` exist only on path-like entities.
    fn anchor(&self, anchor: Anchor) -> Option<Point> {
        if anchor == Anchor::Center {
            return Some(self.center());
        }
        let (rx, ry) = anchor.box_fraction()?;
        Some(self.bounds(false).point_at_fraction(rx, ry))
    }

    /// Rotate by `degrees` about `origin`.
    fn rotate(&mut self, degrees: f64, origin: Point);

    /// Uniform scale by `factor` about `origin`. Stroke widths are unchanged.
    fn scale(&mut self, factor: f64, origin: Point);

    fn move_by(&mut self, dx: f64, dy: f64);

    fn center(&self) -> Point {
        self.bounds(false).center()
    }

    /// Translate so the bounds center lands on `p`.
    fn move_to(&mut self, p: Point) {
        let c = self.center();
        self.move_by(p.x - c.x, p.y - c.y);
    }
}

impl<E: Entity + ?Sized> Entity for Box<E> {
    fn bounds(&self, visual: bool) -> Bounds {
        (**self).bounds(visual)
    }
    fn anchor(&self, anchor: Anchor) -> Option<Point> {
        (**self).anchor(anchor)
    }
    fn rotate(&mut self, degrees: f64, origin: Point) {
        (**self).rotate(degrees, origin)
    }
    fn scale(&mut self, factor: f64, origin: Point) {
        (**self).scale(factor, origin)
    }
    fn move_by(&mut self, dx: f64, dy: f64) {
        (**self).move_by(dx, dy)
    }
    fn center(&self) -> Point {
        (**self).center()
    }
    fn move_to(&mut self, p: Point) {
        (**self).move_to(p)
    }
}

/// Single-threaded shared handle: the scene owns entities, connections read them.
pub type Shared<T> = Rc<RefCell<T>>;

/// Type-erased shared entity, as held by connections.
pub type SharedEntity = Rc<RefCell<dyn Entity>>;

pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}

/// Shift helper used by `move_by` implementations.
#[inline]
pub(crate) fn offset(p: Point, dx: f64, dy: f64) -> Point {
    p + pt(dx, dy)
}

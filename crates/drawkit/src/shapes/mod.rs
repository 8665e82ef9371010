//! Minimal concrete drawables.
//!
//! Each type stores only its authored inputs (no cached derived geometry)
//! and implements `Entity`; path-like ones also implement `Pathable`.
//! Visual bounds add half the stroke width on every side.

mod bezier_path;
mod curve;
mod dot;
mod ellipse;
mod group;
mod line;
mod polygon;

pub use bezier_path::BezierPath;
pub use curve::Curve;
pub use dot::Dot;
pub use ellipse::Ellipse;
pub use group::Group;
pub use line::Line;
pub use polygon::Polygon;

use crate::bounds::Bounds;

/// Stroke width used when a constructor does not take one.
pub const DEFAULT_STROKE: f64 = 1.0;

#[inline]
fn visual(b: Bounds, visual: bool, stroke_width: f64) -> Bounds {
    if visual {
        b.inflate(stroke_width * 0.5)
    } else {
        b
    }
}

//! Geometric kernel for a diagram-drawing layer.
//!
//! Parametric paths (`Pathable`), Bezier fitting and exact bounds, live
//! connections between entities, and the rotate/scale/translate fit solver.
//! Rendering stops at SVG path data; scene files and writers live in callers.
//!
//! API Policy
//! - The crate is workspace-internal. There is no stable public API; breaking
//!   changes are fine when they improve the design.
//! - Angles are degrees throughout. Coordinates follow SVG (`y` down) only
//!   where a name says so (`Anchor::Top`); everything else is frame-agnostic.

pub mod affine;
pub mod bezier;
pub mod bounds;
pub mod cfg;
pub mod connection;
pub mod entity;
pub mod fit;
pub mod pathable;
pub mod point;
pub mod shapes;
pub mod svg;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use affine::Affine2;
pub use bounds::Bounds;
pub use connection::{Connection, ConnectionError, ShapeSpec};
pub use entity::{Anchor, Entity, SharedEntity};
pub use fit::{fit, FitError, FitOptions, FitReport};
pub use pathable::Pathable;
pub use point::Point;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::bezier::{
        clamp_control_points, cubic_bounds, eval_cubic, eval_quadratic, fit_cubic_beziers,
        quadratic_bounds, quadratic_to_cubic, CubicSeg, QuadSeg,
    };
    pub use crate::connection::{Connection, ConnectionError, ShapeData, ShapeSpec};
    pub use crate::entity::{shared, Anchor, Entity, Shared, SharedEntity};
    pub use crate::fit::{
        aspect_match_angle, fill_scale, fit, optimal_fill_angle, rotated_box_size, FitError,
        FitOptions, FitReport,
    };
    pub use crate::pathable::{Pathable, SubPath};
    pub use crate::point::{pt, Point};
    pub use crate::shapes::{BezierPath, Curve, Dot, Ellipse, Group, Line, Polygon};
    pub use crate::{Affine2, Bounds};
}

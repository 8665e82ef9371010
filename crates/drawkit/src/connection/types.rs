//! Shape descriptions and errors for connections.

use std::fmt;

use crate::bezier::CubicSeg;
use crate::cfg::DEFAULT_PATH_SEGMENTS;
use crate::entity::Anchor;
use crate::pathable::Pathable;
use crate::point::pt;
use crate::shapes::{Curve, Line};

/// Authored shape handed to `Connection::new`.
///
/// Only the shape's own geometry matters; where it sits in the scene is
/// irrelevant because it is re-mapped onto the live anchors on every query.
pub enum ShapeSpec<'a> {
    /// Invisible link; renders as the bare chord.
    None,
    Line(Line),
    Curve(Curve),
    /// Any pathable, fitted with `segments` cubics over `[start_t, end_t]`.
    Path {
        path: &'a dyn Pathable,
        segments: usize,
        start_t: f64,
        end_t: f64,
    },
}

impl<'a> ShapeSpec<'a> {
    /// Curvature arc authored on the unit chord `(0,0) → (1,0)`.
    pub fn arc(curvature: f64) -> Self {
        ShapeSpec::Curve(Curve::new(pt(0.0, 0.0), pt(1.0, 0.0), curvature))
    }

    /// Whole pathable with the default segment count.
    pub fn path(path: &'a dyn Pathable) -> Self {
        Self::path_range(path, 0.0, 1.0)
    }

    /// The `[start_t, end_t]` slice of a pathable; the way to use part of a
    /// closed path.
    pub fn path_range(path: &'a dyn Pathable, start_t: f64, end_t: f64) -> Self {
        ShapeSpec::Path {
            path,
            segments: DEFAULT_PATH_SEGMENTS,
            start_t,
            end_t,
        }
    }

    pub fn with_segments(self, n: usize) -> Self {
        match self {
            ShapeSpec::Path {
                path,
                start_t,
                end_t,
                ..
            } => ShapeSpec::Path {
                path,
                segments: n,
                start_t,
                end_t,
            },
            other => other,
        }
    }
}

/// Shape geometry in its own frame, fixed at construction.
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeData {
    None,
    /// Straight chord; mapped analytically, no control points needed.
    Line,
    /// Exact cubic image of the authored quadratic.
    Curve(CubicSeg),
    /// Fitted segment chain.
    Path(Vec<CubicSeg>),
}

impl ShapeData {
    pub fn kind(&self) -> &'static str {
        match self {
            ShapeData::None => "none",
            ShapeData::Line => "line",
            ShapeData::Curve(_) => "curve",
            ShapeData::Path(_) => "path",
        }
    }
}

/// Which side of a connection an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => f.write_str("start"),
            Endpoint::End => f.write_str("end"),
        }
    }
}

/// Errors raised when building a connection. Rendering never fails.
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionError {
    /// A closed path has no two-point chord; slice it with `start_t`/`end_t`.
    ClosedShape,
    /// The shape's endpoints (nearly) coincide.
    DegenerateChord { length: f64 },
    /// The entity does not expose the requested anchor.
    MissingAnchor { endpoint: Endpoint, anchor: Anchor },
    /// Path slice bounds outside `[0, 1]` or not finite.
    InvalidRange { start_t: f64, end_t: f64 },
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionError::ClosedShape => write!(
                f,
                "closed shapes cannot be connected; pass a start_t/end_t slice instead"
            ),
            ConnectionError::DegenerateChord { length } => write!(
                f,
                "shape endpoints coincide (chord length {length:e}); is the path closed?"
            ),
            ConnectionError::MissingAnchor { endpoint, anchor } => {
                write!(f, "{endpoint} entity has no {anchor} anchor")
            }
            ConnectionError::InvalidRange { start_t, end_t } => {
                write!(f, "path slice [{start_t}, {end_t}] must lie within [0, 1]")
            }
        }
    }
}

impl std::error::Error for ConnectionError {}

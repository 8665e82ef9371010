//! Connections: a reusable shape stretched between two live entities.
//!
//! Purpose
//! - Link two entities (each exposing a named anchor) with nothing, a straight
//!   line, a curvature arc, or any fitted path, so that the rendered instance
//!   always spans the entities' *current* anchor positions while keeping the
//!   shape's proportions relative to its own chord.
//!
//! Model
//! - At construction the authored shape is reduced to `ShapeData` (cubic
//!   segments in the shape's own frame) plus its `source_chord`. Both are
//!   immutable afterwards.
//! - Every query reads the live anchors and rebuilds the similarity
//!   `source_chord → target_chord` (`Affine2::chord_map`). Nothing derived
//!   from anchor positions is stored, so moving an endpoint can never leave
//!   stale geometry behind.
//!
//! Code cross-refs: `bezier::{fit_cubic_beziers, quadratic_to_cubic}`,
//! `affine::Affine2`, `entity::{Entity, Anchor}`.

mod types;

pub use types::{ConnectionError, Endpoint, ShapeData, ShapeSpec};

use tracing::debug;

use crate::affine::Affine2;
use crate::bezier::{
    cubic_path_bounds, fit_cubic_beziers, locate_segment, sample_arc_length, tangent_at, CubicSeg,
};
use crate::bounds::Bounds;
use crate::cfg::{ARC_LENGTH_SAMPLES, DEGENERATE_CHORD_EPS, SOURCE_CHORD_EPS};
use crate::entity::{Anchor, SharedEntity};
use crate::pathable::Pathable;
use crate::point::{angle_deg, distance, lerp, pt, Point};
use crate::svg;

/// A shape bound to two entities' anchors.
pub struct Connection {
    start: SharedEntity,
    end: SharedEntity,
    start_anchor: Anchor,
    end_anchor: Anchor,
    source_chord: (Point, Point),
    shape: ShapeData,
}

impl Connection {
    /// Bind `shape` between `start[start_anchor]` and `end[end_anchor]`.
    ///
    /// Fails eagerly for closed shapes, degenerate chords, out-of-range path
    /// slices, and anchors the entities do not expose.
    pub fn new(
        start: SharedEntity,
        start_anchor: Anchor,
        end: SharedEntity,
        end_anchor: Anchor,
        shape: ShapeSpec<'_>,
    ) -> Result<Self, ConnectionError> {
        if start.borrow().anchor(start_anchor).is_none() {
            return Err(ConnectionError::MissingAnchor {
                endpoint: Endpoint::Start,
                anchor: start_anchor,
            });
        }
        if end.borrow().anchor(end_anchor).is_none() {
            return Err(ConnectionError::MissingAnchor {
                endpoint: Endpoint::End,
                anchor: end_anchor,
            });
        }
        let (source_chord, shape) = prepare(shape)?;
        debug!(
            kind = shape.kind(),
            chord = distance(source_chord.0, source_chord.1),
            %start_anchor,
            %end_anchor,
            "connection built"
        );
        Ok(Self {
            start,
            end,
            start_anchor,
            end_anchor,
            source_chord,
            shape,
        })
    }

    /// Center-to-center connection.
    pub fn between(
        start: SharedEntity,
        end: SharedEntity,
        shape: ShapeSpec<'_>,
    ) -> Result<Self, ConnectionError> {
        Self::new(start, Anchor::Center, end, Anchor::Center, shape)
    }

    pub fn shape_data(&self) -> &ShapeData {
        &self.shape
    }

    /// The authored shape's own `(point_at(0), point_at(1))`.
    pub fn source_chord(&self) -> (Point, Point) {
        self.source_chord
    }

    pub fn anchors(&self) -> (Anchor, Anchor) {
        (self.start_anchor, self.end_anchor)
    }

    /// Current `(start, end)` anchor positions.
    ///
    /// Anchors were validated at construction; an entity that stops exposing
    /// one falls back to its center.
    pub fn target_chord(&self) -> (Point, Point) {
        let read = |e: &SharedEntity, anchor: Anchor| {
            let e = e.borrow();
            e.anchor(anchor).unwrap_or_else(|| e.center())
        };
        (
            read(&self.start, self.start_anchor),
            read(&self.end, self.end_anchor),
        )
    }

    /// Map from shape space onto the current target chord; `None` when the
    /// source chord is too short to define one.
    pub fn transform(&self) -> Option<Affine2> {
        let (a, b) = self.target_chord();
        self.transform_onto(a, b)
    }

    fn transform_onto(&self, a: Point, b: Point) -> Option<Affine2> {
        let (s, e) = self.source_chord;
        Affine2::chord_map(s, e, a, b, SOURCE_CHORD_EPS)
    }

    /// Rendered cubic segments in scene space, endpoints pinned to the anchors.
    pub fn segments(&self) -> Vec<CubicSeg> {
        let (a, b) = self.target_chord();
        let mut out = match (&self.shape, self.transform_onto(a, b)) {
            (ShapeData::None | ShapeData::Line, _) => vec![CubicSeg::line(a, b)],
            (ShapeData::Curve(seg), Some(f)) => vec![seg.transformed(&f)],
            (ShapeData::Path(segs), Some(f)) => segs.iter().map(|s| s.transformed(&f)).collect(),
            (ShapeData::Curve(_), None) => vec![CubicSeg::new(a, a, a, a)],
            (ShapeData::Path(segs), None) => vec![CubicSeg::new(a, a, a, a); segs.len().max(1)],
        };
        if let Some(first) = out.first_mut() {
            first.p0 = a;
        }
        if let Some(last) = out.last_mut() {
            last.p3 = b;
        }
        out
    }

    /// Exact bounds of the rendered geometry.
    pub fn bounds(&self) -> Bounds {
        let segs = self.segments();
        cubic_path_bounds(&segs).unwrap_or_else(|| Bounds::point(pt(0.0, 0.0)))
    }

    pub fn to_svg_path_d(&self) -> String {
        match self.shape {
            ShapeData::None | ShapeData::Line => {
                let (a, b) = self.target_chord();
                svg::line_path_d(a, b)
            }
            _ => svg::cubic_path_d(&self.segments(), false),
        }
    }
}

impl Pathable for Connection {
    fn point_at(&self, t: f64) -> Point {
        let (a, b) = self.target_chord();
        if t <= 0.0 {
            return a;
        }
        if t >= 1.0 {
            return b;
        }
        let local = match &self.shape {
            ShapeData::None | ShapeData::Line => return lerp(a, b, t),
            ShapeData::Curve(seg) => seg.eval(t),
            ShapeData::Path(segs) => {
                let (i, u) = locate_segment(segs.len(), t);
                segs[i].eval(u)
            }
        };
        match self.transform_onto(a, b) {
            Some(f) => f.apply(local),
            None => a,
        }
    }

    fn angle_at(&self, t: f64) -> f64 {
        match self.shape {
            ShapeData::None | ShapeData::Line => {
                let (a, b) = self.target_chord();
                angle_deg(b - a)
            }
            _ => angle_deg(tangent_at(self, t, false)),
        }
    }

    fn arc_length(&self) -> f64 {
        match self.shape {
            ShapeData::None | ShapeData::Line => {
                let (a, b) = self.target_chord();
                distance(a, b)
            }
            _ => sample_arc_length(|t| self.point_at(t), ARC_LENGTH_SAMPLES),
        }
    }
}

/// Reduce an authored shape to its frame-independent data and chord.
fn prepare(shape: ShapeSpec<'_>) -> Result<((Point, Point), ShapeData), ConnectionError> {
    let (chord, data) = match shape {
        ShapeSpec::None => return Ok(((pt(0.0, 0.0), pt(1.0, 0.0)), ShapeData::None)),
        ShapeSpec::Line(line) => ((line.start, line.end), ShapeData::Line),
        ShapeSpec::Curve(curve) => ((curve.start, curve.end), ShapeData::Curve(curve.to_cubic())),
        ShapeSpec::Path {
            path,
            segments,
            start_t,
            end_t,
        } => {
            let in_range = |t: f64| t.is_finite() && (0.0..=1.0).contains(&t);
            if !in_range(start_t) || !in_range(end_t) {
                return Err(ConnectionError::InvalidRange { start_t, end_t });
            }
            if path.is_closed() && (end_t - start_t).abs() >= 1.0 {
                return Err(ConnectionError::ClosedShape);
            }
            let segs = fit_cubic_beziers(path, segments, false, start_t, end_t);
            let chord = (path.point_at(start_t), path.point_at(end_t));
            (chord, ShapeData::Path(segs))
        }
    };
    let length = distance(chord.0, chord.1);
    if length.is_nan() || length < DEGENERATE_CHORD_EPS {
        return Err(ConnectionError::DegenerateChord { length });
    }
    Ok((chord, data))
}

#[cfg(test)]
mod tests;

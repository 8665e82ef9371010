//! Fit an entity into a target rectangle: rotate, scale, translate.
//!
//! Purpose
//! - One-shot placement of an entity so its exact bounding box fills a target
//!   rectangle under a fill fraction. No search and no sampling: the rotation
//!   comes from closed-form candidates, the scale from one bounds query.
//!
//! Angle model
//! - Rotating a `w×h` box by `θ ∈ [0°, 90°]` gives the axis-aligned box
//!   `bw = w·cosθ + h·sinθ`, `bh = w·sinθ + h·cosθ`. Both are concave and
//!   positive on that interval, so `W/bw` and `H/bh` are convex and the
//!   maximum of their minimum sits at `0°`, `90°`, or the single crossing
//!   `tanθ = (H·w − W·h)/(W·w − H·h)`. `optimal_fill_angle` evaluates exactly
//!   those three candidates; the proptest below checks it against a sweep.
//!
//! Ordering
//! - Every parameter is validated before the entity is touched, so a failed
//!   `fit` leaves it unchanged.

use std::fmt;

use tracing::{debug, warn};

use crate::bounds::Bounds;
use crate::entity::Entity;
use crate::point::Point;

/// Axis-aligned box of a `w×h` box rotated by `degrees`.
pub fn rotated_box_size(w: f64, h: f64, degrees: f64) -> (f64, f64) {
    let (s, c) = degrees.to_radians().sin_cos();
    let (s, c) = (s.abs(), c.abs());
    (w * c + h * s, w * s + h * c)
}

/// Largest uniform scale that fits a `w×h` box rotated by `degrees` into
/// `avail_w×avail_h`. Zero-size axes do not constrain; a point gets `+∞`.
pub fn fill_scale(w: f64, h: f64, avail_w: f64, avail_h: f64, degrees: f64) -> f64 {
    let (bw, bh) = rotated_box_size(w, h, degrees);
    axis_scale(avail_w, bw).min(axis_scale(avail_h, bh))
}

#[inline]
fn axis_scale(avail: f64, size: f64) -> f64 {
    if size > 0.0 {
        avail / size
    } else {
        f64::INFINITY
    }
}

/// Rotation in `[0°, 90°]` maximizing `fill_scale`.
///
/// Candidates are `0°`, `90°` and the balanced angle where both axes bind at
/// once; ties keep the earlier candidate, so an unrotated fit is preferred.
pub fn optimal_fill_angle(w: f64, h: f64, avail_w: f64, avail_h: f64) -> f64 {
    let mut candidates = vec![0.0, 90.0];
    let num = avail_h * w - avail_w * h;
    let den = avail_w * w - avail_h * h;
    if num * den > 0.0 {
        let theta = (num / den).atan().to_degrees();
        if theta > 0.0 && theta < 90.0 {
            candidates.push(theta);
        }
    }
    let mut best = (0.0, fill_scale(w, h, avail_w, avail_h, 0.0));
    for &theta in &candidates[1..] {
        let s = fill_scale(w, h, avail_w, avail_h, theta);
        if s > best.1 {
            best = (theta, s);
        }
    }
    best.0
}

/// Rotation in `[0°, 90°]` giving the rotated box the aspect ratio
/// `target_w / target_h`.
///
/// Ratios no rotation can reach fall back to whichever of `0°`/`90°` comes
/// closer (compared on a log scale).
pub fn aspect_match_angle(w: f64, h: f64, target_w: f64, target_h: f64) -> f64 {
    let r = target_w / target_h;
    let num = w - r * h;
    let den = r * w - h;
    if num == 0.0 && den != 0.0 {
        return 0.0;
    }
    if den == 0.0 && num != 0.0 {
        return 90.0;
    }
    if num * den > 0.0 {
        return (num / den).atan().to_degrees();
    }
    let miss = |ratio: f64| (ratio / r).ln().abs();
    if miss(h / w) < miss(w / h) {
        90.0
    } else {
        0.0
    }
}

/// Knobs for [`fit`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitOptions {
    /// Fraction of the available space to fill, in `(0, 1]`.
    pub scale_fraction: f64,
    /// Rotate by [`optimal_fill_angle`] first.
    pub optimal_rotation: bool,
    /// Rotate by [`aspect_match_angle`] first.
    pub match_aspect: bool,
    /// Placement as `(rx, ry)` fractions of the target, strictly inside the
    /// unit square. `None` centers.
    pub anchor: Option<(f64, f64)>,
    /// Fit the stroke-inclusive bounds instead of the geometric ones.
    pub visual: bool,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            scale_fraction: 1.0,
            optimal_rotation: false,
            match_aspect: false,
            anchor: None,
            visual: false,
        }
    }
}

impl FitOptions {
    pub fn with_fraction(scale_fraction: f64) -> Self {
        Self {
            scale_fraction,
            ..Self::default()
        }
    }
}

/// What [`fit`] did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitReport {
    /// Rotation applied about the entity's center, in degrees.
    pub angle: f64,
    /// Uniform scale applied about the rotated bounds center.
    pub scale: f64,
    /// Where the bounds center was placed.
    pub center: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FitError {
    InvalidScaleFraction { value: f64 },
    /// `optimal_rotation` and `match_aspect` both set.
    ConflictingRotation,
    /// Anchor on or outside the unit square boundary.
    AnchorOnEdge { rx: f64, ry: f64 },
    /// Target rectangle with non-positive or non-finite size.
    DegenerateTarget { width: f64, height: f64 },
}

impl fmt::Display for FitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitError::InvalidScaleFraction { value } => {
                write!(f, "scale_fraction must lie in (0, 1], got {value}")
            }
            FitError::ConflictingRotation => {
                write!(f, "optimal_rotation and match_aspect are mutually exclusive")
            }
            FitError::AnchorOnEdge { rx, ry } => write!(
                f,
                "anchor ({rx}, {ry}) must lie strictly inside the unit square; \
                 edge anchors leave no room"
            ),
            FitError::DegenerateTarget { width, height } => {
                write!(f, "target rectangle {width}×{height} has no area")
            }
        }
    }
}

impl std::error::Error for FitError {}

/// Rotate (optionally), scale and move `entity` so it fits `target`.
///
/// Available space per axis is `2·min(r, 1−r)·size·scale_fraction` for anchor
/// fraction `r` (the whole scaled size when centered), so the result never
/// overflows `target` wherever the anchor sits.
pub fn fit<E: Entity + ?Sized>(
    entity: &mut E,
    target: Bounds,
    opts: &FitOptions,
) -> Result<FitReport, FitError> {
    let s = opts.scale_fraction;
    if !(s.is_finite() && s > 0.0 && s <= 1.0) {
        return Err(FitError::InvalidScaleFraction { value: s });
    }
    if opts.optimal_rotation && opts.match_aspect {
        return Err(FitError::ConflictingRotation);
    }
    let (rx, ry) = opts.anchor.unwrap_or((0.5, 0.5));
    let inside = |r: f64| r.is_finite() && r > 0.0 && r < 1.0;
    if !inside(rx) || !inside(ry) {
        return Err(FitError::AnchorOnEdge { rx, ry });
    }
    let (tw, th) = (target.width(), target.height());
    if !(tw.is_finite() && th.is_finite() && tw > 0.0 && th > 0.0) {
        return Err(FitError::DegenerateTarget {
            width: tw,
            height: th,
        });
    }

    let mut avail_w = 2.0 * rx.min(1.0 - rx) * tw * s;
    let mut avail_h = 2.0 * ry.min(1.0 - ry) * th * s;
    if opts.visual {
        // Strokes do not scale: reserve their padding up front.
        let geo = entity.bounds(false);
        let vis = entity.bounds(true);
        let (pad_w, pad_h) = (vis.width() - geo.width(), vis.height() - geo.height());
        if pad_w < avail_w && pad_h < avail_h {
            avail_w -= pad_w;
            avail_h -= pad_h;
        } else {
            warn!(pad_w, pad_h, avail_w, avail_h, "stroke exceeds fit space; fitting geometry");
        }
    }

    let before = entity.bounds(false);
    let (w, h) = (before.width(), before.height());
    let angle = if opts.optimal_rotation {
        optimal_fill_angle(w, h, avail_w, avail_h)
    } else if opts.match_aspect {
        aspect_match_angle(w, h, avail_w, avail_h)
    } else {
        0.0
    };
    if angle != 0.0 {
        let c = entity.center();
        entity.rotate(angle, c);
    }

    let rotated = entity.bounds(false);
    let mut scale = axis_scale(avail_w, rotated.width()).min(axis_scale(avail_h, rotated.height()));
    if !scale.is_finite() {
        scale = 1.0;
    }
    entity.scale(scale, rotated.center());

    let center = target.point_at_fraction(rx, ry);
    let now = entity.bounds(false).center();
    entity.move_by(center.x - now.x, center.y - now.y);

    debug!(angle, scale, avail_w, avail_h, cx = center.x, cy = center.y, "fit entity");
    Ok(FitReport {
        angle,
        scale,
        center,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::pt;
    use crate::shapes::{Dot, Ellipse, Line, Polygon};
    use proptest::prelude::*;

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Polygon {
        Polygon::new(
            vec![pt(x, y), pt(x + w, y), pt(x + w, y + h), pt(x, y + h)],
            true,
        )
    }

    fn sweep_best(w: f64, h: f64, aw: f64, ah: f64) -> f64 {
        (0..=900)
            .map(|i| fill_scale(w, h, aw, ah, i as f64 * 0.1))
            .fold(0.0, f64::max)
    }

    #[test]
    fn rotated_box_quarter_turn_swaps() {
        let (bw, bh) = rotated_box_size(2.0, 1.0, 90.0);
        assert!((bw - 1.0).abs() < 1e-12 && (bh - 2.0).abs() < 1e-12);
        let (bw, bh) = rotated_box_size(1.0, 1.0, 45.0);
        assert!((bw - 2f64.sqrt()).abs() < 1e-12 && (bh - bw).abs() < 1e-12);
    }

    #[test]
    fn fill_angle_picks_quarter_turn_for_transposed_space() {
        assert_eq!(optimal_fill_angle(1.0, 3.0, 3.0, 1.0), 90.0);
        assert_eq!(optimal_fill_angle(3.0, 1.0, 3.0, 1.0), 0.0);
    }

    #[test]
    fn fill_angle_picks_diagonal_for_needle_in_square() {
        let theta = optimal_fill_angle(10.0, 1.0, 5.0, 5.0);
        assert!((theta - 45.0).abs() < 1e-9);
        let s = fill_scale(10.0, 1.0, 5.0, 5.0, theta);
        assert!((s - 5.0 * 2f64.sqrt() / 11.0).abs() < 1e-12);
        assert!(s > fill_scale(10.0, 1.0, 5.0, 5.0, 0.0));
    }

    #[test]
    fn aspect_angle_solves_or_clamps() {
        assert!((aspect_match_angle(2.0, 1.0, 1.0, 1.0) - 45.0).abs() < 1e-9);
        assert!((aspect_match_angle(1.0, 2.0, 1.0, 1.0) - 45.0).abs() < 1e-9);
        assert_eq!(aspect_match_angle(2.0, 1.0, 2.0, 1.0), 0.0);
        assert_eq!(aspect_match_angle(2.0, 1.0, 1.0, 2.0), 90.0);
        // 3:1 is wider than the box ever gets; 0° (2:1) is closest.
        assert_eq!(aspect_match_angle(2.0, 1.0, 3.0, 1.0), 0.0);
        assert_eq!(aspect_match_angle(2.0, 1.0, 1.0, 3.0), 90.0);
        let theta = aspect_match_angle(4.0, 1.0, 3.0, 2.0);
        let (bw, bh) = rotated_box_size(4.0, 1.0, theta);
        assert!((bw / bh - 1.5).abs() < 1e-9);
    }

    #[test]
    fn centered_fit_fills_the_binding_axis() {
        let mut r = rect(3.0, 7.0, 10.0, 20.0);
        let target = Bounds::from_rect(0.0, 0.0, 100.0, 100.0);
        let rep = fit(&mut r, target, &FitOptions::with_fraction(0.8)).unwrap();
        assert_eq!(rep.angle, 0.0);
        assert!((rep.scale - 4.0).abs() < 1e-12);
        let b = r.bounds(false);
        assert!((b.width() - 40.0).abs() < 1e-9 && (b.height() - 80.0).abs() < 1e-9);
        assert!((b.center() - pt(50.0, 50.0)).norm() < 1e-9);
    }

    #[test]
    fn optimal_rotation_turns_tall_into_wide() {
        let mut r = rect(0.0, 0.0, 10.0, 40.0);
        let target = Bounds::from_rect(0.0, 0.0, 100.0, 20.0);
        let opts = FitOptions {
            optimal_rotation: true,
            ..FitOptions::default()
        };
        let rep = fit(&mut r, target, &opts).unwrap();
        assert_eq!(rep.angle, 90.0);
        assert!((rep.scale - 2.0).abs() < 1e-9);
        let b = r.bounds(false);
        assert!(target.contains_eps(&b, 1e-6));
        assert!((b.width() - 80.0).abs() < 1e-6 && (b.height() - 20.0).abs() < 1e-6);
    }

    #[test]
    fn match_aspect_squares_a_rectangle() {
        let mut r = rect(0.0, 0.0, 20.0, 10.0);
        let target = Bounds::from_rect(0.0, 0.0, 60.0, 60.0);
        let opts = FitOptions {
            match_aspect: true,
            ..FitOptions::default()
        };
        let rep = fit(&mut r, target, &opts).unwrap();
        assert!((rep.angle - 45.0).abs() < 1e-9);
        let b = r.bounds(false);
        assert!((b.width() - 60.0).abs() < 1e-6 && (b.height() - 60.0).abs() < 1e-6);
    }

    #[test]
    fn off_center_anchor_respects_nearest_edge() {
        let mut d = Dot::new(pt(-40.0, 7.0), 10.0);
        let target = Bounds::from_rect(0.0, 0.0, 100.0, 100.0);
        let opts = FitOptions {
            anchor: Some((0.25, 0.5)),
            ..FitOptions::default()
        };
        let rep = fit(&mut d, target, &opts).unwrap();
        assert!((rep.scale - 2.5).abs() < 1e-12);
        assert_eq!(rep.center, pt(25.0, 50.0));
        assert!((d.radius - 25.0).abs() < 1e-12);
        assert!((d.center - pt(25.0, 50.0)).norm() < 1e-12);
        assert!(target.contains_eps(&d.bounds(false), 1e-9));
    }

    #[test]
    fn visual_fit_includes_unscaled_stroke() {
        let mut d = Dot::new(pt(0.0, 0.0), 10.0);
        d.stroke_width = 2.0;
        let target = Bounds::from_rect(0.0, 0.0, 100.0, 100.0);
        let opts = FitOptions {
            visual: true,
            ..FitOptions::default()
        };
        fit(&mut d, target, &opts).unwrap();
        assert!((d.radius - 49.0).abs() < 1e-12);
        assert_eq!(d.stroke_width, 2.0);
        let v = d.bounds(true);
        assert!((v.width() - 100.0).abs() < 1e-9);
        assert!(target.contains_eps(&v, 1e-9));
    }

    #[test]
    fn zero_extent_axis_is_unconstrained() {
        let mut l = Line::new(pt(0.0, 0.0), pt(10.0, 0.0));
        let target = Bounds::from_rect(0.0, 0.0, 100.0, 50.0);
        let rep = fit(&mut l, target, &FitOptions::default()).unwrap();
        assert!((rep.scale - 10.0).abs() < 1e-12);
        assert!((l.start - pt(0.0, 25.0)).norm() < 1e-9);
        assert!((l.end - pt(100.0, 25.0)).norm() < 1e-9);
    }

    #[test]
    fn invalid_options_leave_entity_untouched() {
        let original = Ellipse::new(pt(5.0, 5.0), 3.0, 2.0);
        let target = Bounds::from_rect(0.0, 0.0, 10.0, 10.0);
        let cases = [
            (
                target,
                FitOptions::with_fraction(0.0),
                FitError::InvalidScaleFraction { value: 0.0 },
            ),
            (
                target,
                FitOptions::with_fraction(1.5),
                FitError::InvalidScaleFraction { value: 1.5 },
            ),
            (
                target,
                FitOptions {
                    optimal_rotation: true,
                    match_aspect: true,
                    ..FitOptions::default()
                },
                FitError::ConflictingRotation,
            ),
            (
                target,
                FitOptions {
                    anchor: Some((0.0, 0.5)),
                    ..FitOptions::default()
                },
                FitError::AnchorOnEdge { rx: 0.0, ry: 0.5 },
            ),
            (
                Bounds::from_rect(0.0, 0.0, 10.0, 0.0),
                FitOptions::default(),
                FitError::DegenerateTarget {
                    width: 10.0,
                    height: 0.0,
                },
            ),
        ];
        for (target, opts, expected) in cases {
            let mut e = original.clone();
            assert_eq!(fit(&mut e, target, &opts).unwrap_err(), expected);
            assert_eq!(e, original);
        }
        let mut e = original.clone();
        let err = fit(&mut e, target, &FitOptions::with_fraction(f64::NAN)).unwrap_err();
        assert!(err.to_string().contains("scale_fraction"));
        assert_eq!(e, original);
    }

    proptest! {
        #[test]
        fn fill_angle_beats_sweep(
            w in 0.1..10.0f64, h in 0.1..10.0f64,
            aw in 0.1..10.0f64, ah in 0.1..10.0f64,
        ) {
            let theta = optimal_fill_angle(w, h, aw, ah);
            prop_assert!((0.0..=90.0).contains(&theta));
            let s = fill_scale(w, h, aw, ah, theta);
            prop_assert!(s >= fill_scale(w, h, aw, ah, 0.0));
            prop_assert!(s >= fill_scale(w, h, aw, ah, 90.0));
            prop_assert!(s >= sweep_best(w, h, aw, ah) * (1.0 - 1e-12));
        }

        #[test]
        fn fit_stays_inside_envelope(
            erx in 0.5..50.0f64, ery in 0.5..50.0f64, rot in 0.0..180.0f64,
            tw in 1.0..500.0f64, th in 1.0..500.0f64,
            frac in 0.05..1.0f64,
            rx in 0.05..0.95f64, ry in 0.05..0.95f64,
            rotate in any::<bool>(),
        ) {
            let mut e = Ellipse::new(pt(13.0, -8.0), erx, ery).with_rotation(rot);
            let target = Bounds::from_rect(-20.0, 30.0, tw, th);
            let opts = FitOptions {
                scale_fraction: frac,
                optimal_rotation: rotate,
                anchor: Some((rx, ry)),
                ..FitOptions::default()
            };
            let rep = fit(&mut e, target, &opts).unwrap();
            let b = e.bounds(false);
            let aw = 2.0 * rx.min(1.0 - rx) * tw * frac;
            let ah = 2.0 * ry.min(1.0 - ry) * th * frac;
            prop_assert!(b.width() <= aw + 1e-6);
            prop_assert!(b.height() <= ah + 1e-6);
            prop_assert!((b.center() - rep.center).norm() < 1e-6);
            prop_assert!(target.contains_eps(&b, 1e-6));
            // One axis binds.
            let slack = (aw - b.width()).min(ah - b.height());
            prop_assert!(slack.abs() < 1e-6);
        }
    }
}

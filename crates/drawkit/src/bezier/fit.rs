//! Hermite-to-Bezier fitting of arbitrary pathables.

use tracing::trace;

use super::{clamp_control_points, tangent_at, CubicSeg};
use crate::cfg::MAX_CONTROL_RATIO;
use crate::pathable::Pathable;
use crate::point::Point;

/// Fit `n` cubic segments to `path` over `[start_t, end_t]`.
///
/// - Full closed fit (`closed` and the range is `[0, 1]`): `n` samples at
///   `t = i/n`; segment `i` joins sample `i` to sample `(i + 1) mod n`, so the
///   chain wraps onto its own start.
/// - Otherwise: `n + 1` samples across the span and `n` segments.
///
/// Control points are `P ± tangent · dt/3` with `dt` the parameter step, then
/// clamped to `MAX_CONTROL_RATIO` of the segment chord. `n` is floored to 1.
pub fn fit_cubic_beziers<P: Pathable + ?Sized>(
    path: &P,
    n: usize,
    closed: bool,
    start_t: f64,
    end_t: f64,
) -> Vec<CubicSeg> {
    let n = n.max(1);
    let wrap = closed || path.is_closed();
    let full_closed = closed && start_t == 0.0 && end_t == 1.0;
    trace!(n, closed, full_closed, start_t, end_t, "fit_cubic_beziers");

    if full_closed {
        let dt = 1.0 / n as f64;
        let samples: Vec<_> = (0..n)
            .map(|i| {
                let t = i as f64 * dt;
                (path.point_at(t), tangent_at(path, t, true))
            })
            .collect();
        return (0..n)
            .map(|i| {
                let (p0, d0) = samples[i];
                let (p3, d3) = samples[(i + 1) % n];
                hermite(p0, d0, p3, d3, dt)
            })
            .collect();
    }

    let dt = (end_t - start_t) / n as f64;
    let samples: Vec<_> = (0..=n)
        .map(|i| {
            let t = if i == n {
                end_t
            } else {
                start_t + i as f64 * dt
            };
            (path.point_at(t), tangent_at(path, t, wrap))
        })
        .collect();
    samples
        .windows(2)
        .map(|w| hermite(w[0].0, w[0].1, w[1].0, w[1].1, dt))
        .collect()
}

/// Whole-path fit with the path's own closedness.
pub fn fit_full<P: Pathable + ?Sized>(path: &P, n: usize) -> Vec<CubicSeg> {
    fit_cubic_beziers(path, n, path.is_closed(), 0.0, 1.0)
}

#[inline]
fn hermite(
    p0: Point,
    d0: nalgebra::Vector2<f64>,
    p3: Point,
    d3: nalgebra::Vector2<f64>,
    dt: f64,
) -> CubicSeg {
    let c1 = p0 + d0 * (dt / 3.0);
    let c2 = p3 - d3 * (dt / 3.0);
    let (c1, c2) = clamp_control_points(p0, c1, c2, p3, MAX_CONTROL_RATIO);
    CubicSeg::new(p0, c1, c2, p3)
}

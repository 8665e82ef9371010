//! Closed-form bounding boxes for quadratic and cubic segments.
//!
//! Per axis, the extrema sit at the endpoints or at roots of the derivative
//! inside `(0, 1)`. Quadratics have one candidate, cubics at most two.

use super::{eval_cubic, eval_quadratic, CubicSeg};
use crate::bounds::Bounds;
use crate::cfg::ROOT_EPS;
use crate::point::Point;

/// Exact bounds of the quadratic `(P0, C, P2)`.
pub fn quadratic_bounds(p0: Point, c: Point, p2: Point) -> Bounds {
    let mut b = Bounds::from_points([p0, p2]);
    for axis in 0..2 {
        let denom = p0[axis] - 2.0 * c[axis] + p2[axis];
        if denom.abs() <= ROOT_EPS {
            continue;
        }
        let t = (p0[axis] - c[axis]) / denom;
        if t > 0.0 && t < 1.0 {
            b.include(eval_quadratic(p0, c, p2, t));
        }
    }
    b
}

/// Exact bounds of the cubic `(P0, C1, C2, P3)`.
pub fn cubic_bounds(p0: Point, c1: Point, c2: Point, p3: Point) -> Bounds {
    let mut b = Bounds::from_points([p0, p3]);
    for axis in 0..2 {
        // B'(t)/3 = a t² + b t + c
        let a = -p0[axis] + 3.0 * c1[axis] - 3.0 * c2[axis] + p3[axis];
        let bb = 2.0 * (p0[axis] - 2.0 * c1[axis] + c2[axis]);
        let c = c1[axis] - p0[axis];
        for t in derivative_roots(a, bb, c).into_iter().flatten() {
            if t > 0.0 && t < 1.0 {
                b.include(eval_cubic(p0, c1, c2, p3, t));
            }
        }
    }
    b
}

/// Union of the exact bounds of every segment. `None` for an empty slice.
pub fn cubic_path_bounds(segments: &[CubicSeg]) -> Option<Bounds> {
    segments
        .iter()
        .map(CubicSeg::bounds)
        .reduce(|acc, b| acc.union(&b))
}

/// Real roots of `a t² + b t + c`, degrading to the linear case when `a ≈ 0`.
fn derivative_roots(a: f64, b: f64, c: f64) -> [Option<f64>; 2] {
    if a.abs() <= ROOT_EPS {
        if b.abs() <= ROOT_EPS {
            return [None, None];
        }
        return [Some(-c / b), None];
    }
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return [None, None];
    }
    let sq = disc.sqrt();
    // Stable form: avoids cancellation in -b ± sq.
    let q = -0.5 * (b + b.signum() * sq);
    if q == 0.0 {
        // b == 0 and disc == 0 -> c == 0: double root at 0.
        return [Some(0.0), None];
    }
    [Some(q / a), Some(c / q)]
}

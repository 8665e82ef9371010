//! Path-description (`d` attribute) strings for the SVG writer.
//!
//! Token grammar: `M x y`, `L x y`, `C c1x c1y c2x c2y x y`, `Z`, joined by
//! single spaces. Numbers go through `fmt_num` so output is stable across
//! platforms and free of `-0`.

use std::fmt::Write as _;

use crate::bezier::CubicSeg;
use crate::point::Point;

/// Decimal places kept in emitted coordinates.
pub const PRECISION: usize = 2;

/// Fixed-precision number with trailing zeros (and a bare dot) removed.
pub fn fmt_num(x: f64) -> String {
    let mut s = format!("{:.*}", PRECISION, x);
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s.clear();
        s.push('0');
    }
    s
}

fn push_point(out: &mut String, p: Point) {
    let _ = write!(out, " {} {}", fmt_num(p.x), fmt_num(p.y));
}

fn push_cmd(out: &mut String, cmd: char) {
    if !out.is_empty() {
        out.push(' ');
    }
    out.push(cmd);
}

pub fn move_to(out: &mut String, p: Point) {
    push_cmd(out, 'M');
    push_point(out, p);
}

pub fn line_to(out: &mut String, p: Point) {
    push_cmd(out, 'L');
    push_point(out, p);
}

pub fn cubic_to(out: &mut String, c1: Point, c2: Point, p: Point) {
    push_cmd(out, 'C');
    push_point(out, c1);
    push_point(out, c2);
    push_point(out, p);
}

pub fn close(out: &mut String) {
    push_cmd(out, 'Z');
}

/// `M a L b`.
pub fn line_path_d(a: Point, b: Point) -> String {
    let mut d = String::new();
    move_to(&mut d, a);
    line_to(&mut d, b);
    d
}

/// `M v0 L v1 … [Z]`; empty for no vertices.
pub fn polyline_path_d(vertices: &[Point], closed: bool) -> String {
    let mut d = String::new();
    let Some((first, rest)) = vertices.split_first() else {
        return d;
    };
    move_to(&mut d, *first);
    for v in rest {
        line_to(&mut d, *v);
    }
    if closed {
        close(&mut d);
    }
    d
}

/// `M p0 C … C … [Z]` for a chained segment list; empty for no segments.
pub fn cubic_path_d(segments: &[CubicSeg], closed: bool) -> String {
    let mut d = String::new();
    let Some(first) = segments.first() else {
        return d;
    };
    move_to(&mut d, first.p0);
    for s in segments {
        cubic_to(&mut d, s.c1, s.c2, s.p3);
    }
    if closed {
        close(&mut d);
    }
    d
}

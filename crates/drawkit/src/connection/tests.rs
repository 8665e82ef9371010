use super::*;
use crate::bezier::fit_cubic_beziers;
use crate::entity::{shared, Entity};
use crate::point::{perp_left, pt};
use crate::shapes::{Curve, Dot, Ellipse, Line, Polygon};
use proptest::prelude::*;

fn close(a: Point, b: Point, eps: f64) -> bool {
    (a - b).norm() < eps
}

struct Wave;

impl Pathable for Wave {
    fn point_at(&self, t: f64) -> Point {
        pt(100.0 * t, 20.0 * (t * std::f64::consts::TAU).sin())
    }
}

#[test]
fn curve_follows_moved_endpoint() {
    let a = shared(Dot::new(pt(0.0, 0.0), 3.0));
    let b = shared(Dot::new(pt(100.0, 0.0), 3.0));
    let conn = Connection::between(a.clone(), b.clone(), ShapeSpec::arc(0.5)).unwrap();
    assert_eq!(conn.shape_data().kind(), "curve");
    assert_eq!(conn.point_at(0.0), pt(0.0, 0.0));
    assert_eq!(conn.point_at(1.0), pt(100.0, 0.0));
    assert!(close(conn.point_at(0.5), pt(50.0, 12.5), 1e-9));

    b.borrow_mut().move_to(pt(0.0, 100.0));
    assert_eq!(conn.point_at(0.0), pt(0.0, 0.0));
    assert_eq!(conn.point_at(1.0), pt(0.0, 100.0));
    // Still bows to the left of the (new) chord direction.
    assert!(close(conn.point_at(0.5), pt(-12.5, 50.0), 1e-9));
    assert!((conn.angle_at(0.5) - 90.0).abs() < 1e-4);
}

#[test]
fn authored_curve_position_is_irrelevant() {
    let a = shared(Dot::new(pt(10.0, 10.0), 1.0));
    let b = shared(Dot::new(pt(30.0, 10.0), 1.0));
    let far_away = Curve::new(pt(-500.0, 800.0), pt(-400.0, 800.0), 0.5);
    let c1 = Connection::between(a.clone(), b.clone(), ShapeSpec::Curve(far_away)).unwrap();
    let c2 = Connection::between(a, b, ShapeSpec::arc(0.5)).unwrap();
    for i in 0..=10 {
        let t = i as f64 / 10.0;
        assert!(close(c1.point_at(t), c2.point_at(t), 1e-9));
    }
    assert_eq!(c1.to_svg_path_d(), c2.to_svg_path_d());
}

#[test]
fn none_and_line_render_the_live_chord() {
    let a = shared(Dot::new(pt(0.0, 0.0), 1.0));
    let b = shared(Dot::new(pt(10.0, 0.0), 1.0));
    let none = Connection::between(a.clone(), b.clone(), ShapeSpec::None).unwrap();
    let line = Connection::between(
        a.clone(),
        b.clone(),
        ShapeSpec::Line(Line::new(pt(5.0, 5.0), pt(5.0, 9.0))),
    )
    .unwrap();
    assert_eq!(none.to_svg_path_d(), "M 0 0 L 10 0");
    assert_eq!(line.point_at(0.25), pt(2.5, 0.0));
    assert_eq!(line.arc_length(), 10.0);
    a.borrow_mut().move_by(0.0, 10.0);
    assert_eq!(none.to_svg_path_d(), "M 0 10 L 10 0");
    assert!((line.angle_at(0.3) + 45.0).abs() < 1e-9);
    assert_eq!(line.segments().len(), 1);
}

#[test]
fn closed_shape_rejected_slice_accepted() {
    let a = shared(Dot::new(pt(0.0, 0.0), 1.0));
    let b = shared(Dot::new(pt(50.0, 0.0), 1.0));
    let ring = Ellipse::circle(pt(0.0, 0.0), 10.0);
    let err = Connection::between(a.clone(), b.clone(), ShapeSpec::path(&ring))
        .err()
        .unwrap();
    assert_eq!(err, ConnectionError::ClosedShape);
    assert!(err.to_string().contains("start_t"));

    let half = Connection::between(a, b, ShapeSpec::path_range(&ring, 0.0, 0.5)).unwrap();
    assert_eq!(half.point_at(0.0), pt(0.0, 0.0));
    assert_eq!(half.point_at(1.0), pt(50.0, 0.0));
    // A half circle over a 50-unit chord bulges 25 units off the chord.
    let apex = half.point_at(0.5);
    assert!((apex.x - 25.0).abs() < 0.5);
    assert!((apex.y.abs() - 25.0).abs() < 0.5);
}

#[test]
fn closed_looking_open_path_is_degenerate() {
    let a = shared(Dot::new(pt(0.0, 0.0), 1.0));
    let b = shared(Dot::new(pt(50.0, 0.0), 1.0));
    let loop_ = Polygon::new(
        vec![pt(0.0, 0.0), pt(10.0, 0.0), pt(10.0, 10.0), pt(0.0, 0.0)],
        false,
    );
    match Connection::between(a.clone(), b.clone(), ShapeSpec::path(&loop_)) {
        Err(ConnectionError::DegenerateChord { length }) => assert!(length < 1e-6),
        other => panic!("expected degenerate chord, got {:?}", other.err()),
    }
    let flat = Curve::new(pt(1.0, 1.0), pt(1.0, 1.0), 0.3);
    assert!(matches!(
        Connection::between(a, b, ShapeSpec::Curve(flat)),
        Err(ConnectionError::DegenerateChord { .. })
    ));
}

#[test]
fn missing_anchor_and_bad_range() {
    let a = shared(Dot::new(pt(0.0, 0.0), 1.0));
    let b = shared(Line::new(pt(10.0, 0.0), pt(20.0, 5.0)));
    let err = Connection::new(a.clone(), Anchor::Start, b.clone(), Anchor::End, ShapeSpec::None)
        .err()
        .unwrap();
    assert_eq!(
        err,
        ConnectionError::MissingAnchor {
            endpoint: Endpoint::Start,
            anchor: Anchor::Start
        }
    );
    let ok = Connection::new(a.clone(), Anchor::Right, b, Anchor::End, ShapeSpec::None).unwrap();
    assert_eq!(ok.point_at(0.0), pt(1.0, 0.0));
    assert_eq!(ok.point_at(1.0), pt(20.0, 5.0));
    assert_eq!(ok.anchors(), (Anchor::Right, Anchor::End));

    let c = shared(Dot::new(pt(5.0, 5.0), 1.0));
    assert!(matches!(
        Connection::between(a, c, ShapeSpec::path_range(&Wave, -0.1, 0.5)),
        Err(ConnectionError::InvalidRange { .. })
    ));
}

#[test]
fn path_shape_keeps_proportions() {
    let a = shared(Dot::new(pt(0.0, 0.0), 1.0));
    let b = shared(Dot::new(pt(0.0, 50.0), 1.0));
    let conn = Connection::between(a.clone(), b.clone(), ShapeSpec::path(&Wave).with_segments(12))
        .unwrap();
    let ShapeData::Path(segs) = conn.shape_data() else {
        panic!("expected path data");
    };
    assert_eq!(segs.len(), 12);
    let (s, e) = conn.source_chord();
    assert!(close(s, pt(0.0, 0.0), 1e-12) && close(e, pt(100.0, 0.0), 1e-12));

    // Source frame: wave amplitude 20 over chord 100. Target chord is 50 long,
    // pointing +y, so the quarter-period peak sits 10 units to the left (-x).
    let q = conn.point_at(0.25);
    assert!((q.y - 12.5).abs() < 0.5);
    assert!((q.x + 10.0).abs() < 0.5);

    // Matches fitting the wave directly and mapping it by hand.
    let direct = fit_cubic_beziers(&Wave, 12, false, 0.0, 1.0);
    let f = conn.transform().unwrap();
    let mapped: Vec<_> = direct.iter().map(|s| s.transformed(&f)).collect();
    for (x, y) in conn.segments().iter().zip(&mapped) {
        assert!(close(x.c1, y.c1, 1e-9) && close(x.c2, y.c2, 1e-9));
    }
}

#[test]
fn moving_entities_never_serves_stale_geometry() {
    let a = shared(Dot::new(pt(0.0, 0.0), 1.0));
    let b = shared(Dot::new(pt(10.0, 0.0), 1.0));
    let conn = Connection::between(a.clone(), b.clone(), ShapeSpec::arc(-0.8)).unwrap();
    let mut seen = Vec::new();
    for k in 0..20 {
        let x = 10.0 + k as f64 * 3.0;
        let y = (k as f64).sin() * 7.0;
        b.borrow_mut().move_to(pt(x, y));
        if k % 3 == 0 {
            a.borrow_mut().move_by(1.0, -2.0);
        }
        let (sa, sb) = (a.borrow().center(), b.borrow().center());
        assert_eq!(conn.point_at(0.0), sa);
        assert_eq!(conn.point_at(1.0), sb);
        let chord = sb - sa;
        // Negative curvature bows right: the midpoint sits on the -perp side.
        let off = (conn.point_at(0.5) - (sa + chord * 0.5)).dot(&perp_left(chord));
        assert!(off < 0.0);
        let d = conn.to_svg_path_d();
        assert!(!seen.contains(&d));
        seen.push(d);
    }
}

#[test]
fn coincident_anchors_collapse_to_start() {
    let a = shared(Dot::new(pt(3.0, 4.0), 1.0));
    let b = shared(Dot::new(pt(3.0, 4.0), 1.0));
    let conn = Connection::between(a, b, ShapeSpec::arc(1.0)).unwrap();
    for i in 0..=4 {
        assert_eq!(conn.point_at(i as f64 / 4.0), pt(3.0, 4.0));
    }
    assert_eq!(conn.to_svg_path_d(), "M 3 4 C 3 4 3 4 3 4");
    assert_eq!(conn.arc_length(), 0.0);
}

#[test]
fn bounds_are_exact_for_rendered_curve() {
    let a = shared(Dot::new(pt(0.0, 0.0), 1.0));
    let b = shared(Dot::new(pt(100.0, 0.0), 1.0));
    let conn = Connection::between(a, b, ShapeSpec::arc(0.5)).unwrap();
    let bb = conn.bounds();
    assert!((bb.max_y - 12.5).abs() < 1e-9);
    assert!(bb.min_y.abs() < 1e-12);
    assert!((bb.width() - 100.0).abs() < 1e-9);
}

#[test]
fn connections_are_pathable_shapes() {
    // A connection can serve as another connection's authored shape.
    let a = shared(Dot::new(pt(0.0, 0.0), 1.0));
    let b = shared(Dot::new(pt(10.0, 0.0), 1.0));
    let inner = Connection::between(a, b, ShapeSpec::arc(0.4)).unwrap();
    let c = shared(Dot::new(pt(0.0, 0.0), 1.0));
    let d = shared(Dot::new(pt(20.0, 0.0), 1.0));
    let outer = Connection::between(c, d, ShapeSpec::path(&inner).with_segments(8)).unwrap();
    assert!(close(outer.point_at(0.5), inner.point_at(0.5) * 2.0, 1e-3));
}

fn coord() -> impl Strategy<Value = f64> {
    -1e3..1e3f64
}

proptest! {
    #[test]
    fn endpoints_track_anchors(
        ax in coord(), ay in coord(), bx in coord(), by in coord(),
        curvature in -2.0..2.0f64, use_path in any::<bool>(),
    ) {
        let a = shared(Dot::new(pt(1.0, 2.0), 1.0));
        let b = shared(Dot::new(pt(9.0, 2.0), 1.0));
        let spec = if use_path {
            ShapeSpec::path(&Wave).with_segments(5)
        } else {
            ShapeSpec::arc(curvature)
        };
        let conn = Connection::between(a.clone(), b.clone(), spec).unwrap();
        a.borrow_mut().move_to(pt(ax, ay));
        b.borrow_mut().move_to(pt(bx, by));
        prop_assert_eq!(conn.point_at(0.0), pt(ax, ay));
        prop_assert_eq!(conn.point_at(1.0), pt(bx, by));
        let segs = conn.segments();
        prop_assert_eq!(segs[0].p0, pt(ax, ay));
        prop_assert_eq!(segs[segs.len() - 1].p3, pt(bx, by));
    }
}

//! Print SVG path data for a connection while its end dot moves.
//!
//! Usage:
//!   cargo run -p drawkit --example connection_demo -- [curvature]

use drawkit::point::unit_at;
use drawkit::prelude::*;

fn main() {
    let curvature = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(0.5);
    let start = shared(Dot::new(pt(0.0, 0.0), 3.0));
    let end = shared(Dot::new(pt(100.0, 0.0), 3.0));
    let conn = match Connection::between(start, end.clone(), ShapeSpec::arc(curvature)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("connection_demo: {e}");
            return;
        }
    };
    for step in 0..8 {
        let angle = step as f64 * 45.0;
        end.borrow_mut().move_to(unit_at(angle) * 100.0);
        println!("{angle:>5.1}°  {}", conn.to_svg_path_d());
    }
}

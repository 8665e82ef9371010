use crate::bounds::Bounds;
use crate::entity::Entity;
use crate::point::{pt, Point};

/// Entities transformed as one unit.
#[derive(Default)]
pub struct Group {
    pub children: Vec<Box<dyn Entity>>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<E: Entity + 'static>(&mut self, child: E) {
        self.children.push(Box::new(child));
    }
}

impl Entity for Group {
    fn bounds(&self, visual: bool) -> Bounds {
        self.children
            .iter()
            .map(|c| c.bounds(visual))
            .reduce(|a, b| a.union(&b))
            .unwrap_or_else(|| Bounds::point(pt(0.0, 0.0)))
    }

    fn rotate(&mut self, degrees: f64, origin: Point) {
        for c in &mut self.children {
            c.rotate(degrees, origin);
        }
    }

    fn scale(&mut self, factor: f64, origin: Point) {
        for c in &mut self.children {
            c.scale(factor, origin);
        }
    }

    fn move_by(&mut self, dx: f64, dy: f64) {
        for c in &mut self.children {
            c.move_by(dx, dy);
        }
    }
}

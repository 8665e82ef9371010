//! JSON scene files: entities, fit requests and connections.
//!
//! Rendering applies every fit in file order, then builds each connection
//! against the fitted entities and emits its SVG path data.

use std::collections::HashMap;

use anyhow::{bail, Context, Result};
use drawkit::bounds::Bounds;
use drawkit::connection::{Connection, ShapeSpec};
use drawkit::entity::{shared, Anchor, Entity, Shared, SharedEntity};
use drawkit::fit::{fit, FitOptions};
use drawkit::pathable::Pathable;
use drawkit::point::{pt, Point};
use drawkit::shapes::{Curve, Dot, Ellipse, Line, Polygon};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct Scene {
    pub entities: Vec<EntityDef>,
    #[serde(default)]
    pub fits: Vec<FitDef>,
    #[serde(default)]
    pub connections: Vec<ConnectionDef>,
}

#[derive(Debug, Deserialize)]
pub struct EntityDef {
    pub id: String,
    #[serde(flatten)]
    pub shape: ShapeDef,
    pub stroke_width: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeDef {
    Dot {
        center: [f64; 2],
        radius: f64,
    },
    Line {
        start: [f64; 2],
        end: [f64; 2],
    },
    Curve {
        start: [f64; 2],
        end: [f64; 2],
        curvature: f64,
    },
    Ellipse {
        center: [f64; 2],
        rx: f64,
        ry: f64,
        #[serde(default)]
        rotation: f64,
    },
    Polygon {
        vertices: Vec<[f64; 2]>,
        #[serde(default)]
        closed: bool,
    },
}

#[derive(Debug, Deserialize)]
pub struct FitDef {
    pub entity: String,
    /// `[x, y, width, height]`.
    pub target: [f64; 4],
    #[serde(default = "one")]
    pub scale_fraction: f64,
    #[serde(default)]
    pub optimal_rotation: bool,
    #[serde(default)]
    pub match_aspect: bool,
    pub anchor: Option<[f64; 2]>,
    #[serde(default)]
    pub visual: bool,
}

fn one() -> f64 {
    1.0
}

#[derive(Debug, Deserialize)]
pub struct ConnectionDef {
    pub from: String,
    pub to: String,
    #[serde(default = "center")]
    pub from_anchor: String,
    #[serde(default = "center")]
    pub to_anchor: String,
    #[serde(default)]
    pub shape: ConnectionShapeDef,
}

fn center() -> String {
    "center".to_string()
}

#[derive(Debug, Default, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConnectionShapeDef {
    None,
    #[default]
    Line,
    Arc {
        curvature: f64,
    },
    /// Another entity's outline, optionally sliced.
    Path {
        entity: String,
        segments: Option<usize>,
        #[serde(default)]
        start_t: f64,
        #[serde(default = "one")]
        end_t: f64,
    },
}

#[derive(Debug, Serialize)]
pub struct RenderedScene {
    pub entities: Vec<RenderedEntity>,
    pub fits: Vec<RenderedFit>,
    pub connections: Vec<RenderedConnection>,
}

#[derive(Debug, Serialize)]
pub struct RenderedEntity {
    pub id: String,
    pub bounds: [f64; 4],
    pub d: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RenderedFit {
    pub entity: String,
    pub angle: f64,
    pub scale: f64,
    pub center: [f64; 2],
}

#[derive(Debug, Serialize)]
pub struct RenderedConnection {
    pub from: String,
    pub to: String,
    pub shape: &'static str,
    pub d: String,
    pub bounds: [f64; 4],
}

/// Typed handle kept so path shapes can snapshot the concrete pathable.
enum Node {
    Dot(Shared<Dot>),
    Line(Shared<Line>),
    Curve(Shared<Curve>),
    Ellipse(Shared<Ellipse>),
    Polygon(Shared<Polygon>),
}

impl Node {
    fn build(def: &EntityDef) -> Node {
        let p = |xy: [f64; 2]| pt(xy[0], xy[1]);
        let node = match &def.shape {
            ShapeDef::Dot { center, radius } => Node::Dot(shared(Dot::new(p(*center), *radius))),
            ShapeDef::Line { start, end } => Node::Line(shared(Line::new(p(*start), p(*end)))),
            ShapeDef::Curve {
                start,
                end,
                curvature,
            } => Node::Curve(shared(Curve::new(p(*start), p(*end), *curvature))),
            ShapeDef::Ellipse {
                center,
                rx,
                ry,
                rotation,
            } => Node::Ellipse(shared(
                Ellipse::new(p(*center), *rx, *ry).with_rotation(*rotation),
            )),
            ShapeDef::Polygon { vertices, closed } => Node::Polygon(shared(Polygon::new(
                vertices.iter().copied().map(p).collect(),
                *closed,
            ))),
        };
        if let Some(w) = def.stroke_width {
            node.set_stroke(w);
        }
        node
    }

    fn set_stroke(&self, w: f64) {
        match self {
            Node::Dot(e) => e.borrow_mut().stroke_width = w,
            Node::Line(e) => e.borrow_mut().stroke_width = w,
            Node::Curve(e) => e.borrow_mut().stroke_width = w,
            Node::Ellipse(e) => e.borrow_mut().stroke_width = w,
            Node::Polygon(e) => e.borrow_mut().stroke_width = w,
        }
    }

    fn entity(&self) -> SharedEntity {
        match self {
            Node::Dot(e) => e.clone(),
            Node::Line(e) => e.clone(),
            Node::Curve(e) => e.clone(),
            Node::Ellipse(e) => e.clone(),
            Node::Polygon(e) => e.clone(),
        }
    }

    /// Current outline as an owned pathable; dots have none.
    fn pathable(&self) -> Option<Box<dyn Pathable>> {
        match self {
            Node::Dot(_) => None,
            Node::Line(e) => Some(Box::new(e.borrow().clone())),
            Node::Curve(e) => Some(Box::new(e.borrow().clone())),
            Node::Ellipse(e) => Some(Box::new(e.borrow().clone())),
            Node::Polygon(e) => Some(Box::new(e.borrow().clone())),
        }
    }

    fn path_d(&self) -> Option<String> {
        match self {
            Node::Dot(_) => None,
            Node::Line(e) => Some(e.borrow().to_svg_path_d()),
            Node::Curve(e) => Some(e.borrow().to_svg_path_d()),
            Node::Ellipse(e) => Some(e.borrow().to_svg_path_d()),
            Node::Polygon(e) => Some(e.borrow().to_svg_path_d()),
        }
    }
}

fn bounds_array(b: Bounds) -> [f64; 4] {
    [b.min_x, b.min_y, b.max_x, b.max_y]
}

fn point_array(p: Point) -> [f64; 2] {
    [p.x, p.y]
}

fn parse_anchor(name: &str) -> Result<Anchor> {
    name.parse::<Anchor>()
        .with_context(|| format!("parsing anchor {name:?}"))
}

pub fn parse(json: &str) -> Result<Scene> {
    serde_json::from_str(json).context("parsing scene JSON")
}

/// Apply fits, build connections, and collect path data.
pub fn render(scene: &Scene) -> Result<RenderedScene> {
    let mut nodes: HashMap<&str, Node> = HashMap::new();
    for def in &scene.entities {
        if nodes.insert(def.id.as_str(), Node::build(def)).is_some() {
            bail!("duplicate entity id {:?}", def.id);
        }
    }
    let lookup = |id: &str| {
        nodes
            .get(id)
            .with_context(|| format!("unknown entity id {id:?}"))
    };

    let mut fits = Vec::with_capacity(scene.fits.len());
    for f in &scene.fits {
        let entity = lookup(&f.entity)?.entity();
        let [x, y, w, h] = f.target;
        let opts = FitOptions {
            scale_fraction: f.scale_fraction,
            optimal_rotation: f.optimal_rotation,
            match_aspect: f.match_aspect,
            anchor: f.anchor.map(|[rx, ry]| (rx, ry)),
            visual: f.visual,
        };
        let report = fit(&mut *entity.borrow_mut(), Bounds::from_rect(x, y, w, h), &opts)
            .with_context(|| format!("fitting entity {:?}", f.entity))?;
        tracing::info!(entity = %f.entity, angle = report.angle, scale = report.scale, "fit");
        fits.push(RenderedFit {
            entity: f.entity.clone(),
            angle: report.angle,
            scale: report.scale,
            center: point_array(report.center),
        });
    }

    let mut connections = Vec::with_capacity(scene.connections.len());
    for c in &scene.connections {
        let from = lookup(&c.from)?.entity();
        let to = lookup(&c.to)?.entity();
        let from_anchor = parse_anchor(&c.from_anchor)?;
        let to_anchor = parse_anchor(&c.to_anchor)?;
        let outline;
        let spec = match &c.shape {
            ConnectionShapeDef::None => ShapeSpec::None,
            ConnectionShapeDef::Line => {
                ShapeSpec::Line(Line::new(pt(0.0, 0.0), pt(1.0, 0.0)))
            }
            ConnectionShapeDef::Arc { curvature } => ShapeSpec::arc(*curvature),
            ConnectionShapeDef::Path {
                entity,
                segments,
                start_t,
                end_t,
            } => {
                outline = lookup(entity)?
                    .pathable()
                    .with_context(|| format!("entity {entity:?} has no outline"))?;
                let spec = ShapeSpec::path_range(outline.as_ref(), *start_t, *end_t);
                match segments {
                    Some(n) => spec.with_segments(*n),
                    None => spec,
                }
            }
        };
        let conn = Connection::new(from, from_anchor, to, to_anchor, spec)
            .with_context(|| format!("connecting {:?} -> {:?}", c.from, c.to))?;
        connections.push(RenderedConnection {
            from: c.from.clone(),
            to: c.to.clone(),
            shape: conn.shape_data().kind(),
            d: conn.to_svg_path_d(),
            bounds: bounds_array(conn.bounds()),
        });
    }

    let entities = scene
        .entities
        .iter()
        .filter_map(|def| nodes.get(def.id.as_str()).map(|n| (def, n)))
        .map(|(def, n)| RenderedEntity {
            id: def.id.clone(),
            bounds: bounds_array(n.entity().borrow().bounds(true)),
            d: n.path_d(),
        })
        .collect();

    Ok(RenderedScene {
        entities,
        fits,
        connections,
    })
}

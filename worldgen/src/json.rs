use crate::config::WorldParams;
use crate::error::LoadError;
use crate::geometry::limits;
use crate::items::{Building, Tree};
use crate::markings::{Marking, MarkingRecord};
use crate::model::{Point, Segment};
use crate::primitives::envelope::Envelope;
use crate::primitives::polygon::Polygon;
use crate::world::{World, WorldLayers};
use crate::Graph;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Serialize, Deserialize)]
struct GraphDoc {
    points: Vec<Point>,
    segments: Vec<Segment>,
}

pub fn graph_to_json(g: &Graph) -> Value {
    let doc = GraphDoc {
        points: g.points().map(|(_, p)| p).collect(),
        segments: g.segments().map(|(_, s)| s).collect(),
    };
    serde_json::to_value(doc).unwrap_or(Value::Null)
}

fn check_point(p: Point, field: &'static str) -> Result<(), LoadError> {
    if limits::in_coord_bounds(p.x) && limits::in_coord_bounds(p.y) {
        Ok(())
    } else {
        Err(LoadError::OutOfBounds { field })
    }
}

fn check_count(what: &'static str, got: usize, max: usize) -> Result<(), LoadError> {
    if got > max {
        return Err(LoadError::TooMany { what, got, max });
    }
    Ok(())
}

fn check_polygon(poly: &Polygon, field: &'static str) -> Result<(), LoadError> {
    check_count("polygon point", poly.points.len(), limits::MAX_POLYGON_POINTS)?;
    poly.points.iter().try_for_each(|p| check_point(*p, field))
}

fn build_graph(doc: GraphDoc) -> Result<Graph, LoadError> {
    check_count("point", doc.points.len(), limits::MAX_POINTS)?;
    check_count("segment", doc.segments.len(), limits::MAX_SEGMENTS)?;
    for p in &doc.points {
        check_point(*p, "points")?;
    }
    let mut g = Graph::new();
    for p in &doc.points {
        g.add_point(*p);
    }
    for (index, s) in doc.segments.iter().enumerate() {
        // endpoints bind to the first point with equal coordinates
        let a = g.contains_point(s.p1).ok_or(LoadError::DanglingEndpoint { index })?;
        let b = g.contains_point(s.p2).ok_or(LoadError::DanglingEndpoint { index })?;
        if a == b {
            return Err(LoadError::DegenerateSegment { index });
        }
        g.add_segment(a, b);
    }
    Ok(g)
}

pub fn graph_from_json(v: Value) -> Result<Graph, LoadError> {
    let doc: GraphDoc = serde_json::from_value(v)?;
    build_graph(doc).inspect_err(|e| log::warn!("graph load rejected: {}", e))
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WorldDoc {
    title: String,
    graph: GraphDoc,
    #[serde(flatten)]
    params: WorldParams,
    envelopes: Vec<Envelope>,
    road_borders: Vec<Segment>,
    buildings: Vec<Building>,
    trees: Vec<Tree>,
    lane_guides: Vec<Segment>,
    markings: Vec<MarkingRecord>,
    zoom: f64,
    offset: Point,
}

pub fn world_to_json(w: &World) -> Value {
    let doc = WorldDoc {
        title: w.title.clone(),
        graph: GraphDoc {
            points: w.graph.points().map(|(_, p)| p).collect(),
            segments: w.graph.segments().map(|(_, s)| s).collect(),
        },
        params: w.params,
        envelopes: w.layers.envelopes.clone(),
        road_borders: w.layers.road_borders.clone(),
        buildings: w.layers.buildings.clone(),
        trees: w.layers.trees.clone(),
        lane_guides: w.layers.lane_guides.clone(),
        markings: w.markings.iter().map(Marking::to_record).collect(),
        zoom: w.zoom,
        offset: w.offset,
    };
    serde_json::to_value(doc).unwrap_or(Value::Null)
}

/// Parts of a persisted world, validated and rebuilt.
pub struct WorldParts {
    pub title: String,
    pub graph: Graph,
    pub params: WorldParams,
    pub layers: WorldLayers,
    pub markings: Vec<Marking>,
    pub zoom: f64,
    pub offset: Point,
}

fn build_world(doc: WorldDoc) -> Result<WorldParts, LoadError> {
    doc.params.validate()?;
    let graph = build_graph(doc.graph)?;
    check_count("marking", doc.markings.len(), limits::MAX_MARKINGS)?;
    for m in &doc.markings {
        check_point(m.center, "markings")?;
        if !m.direction_vector.is_finite() || !m.width.is_finite() || !m.height.is_finite() {
            return Err(LoadError::OutOfBounds { field: "markings" });
        }
    }
    for e in &doc.envelopes {
        check_polygon(&e.poly, "envelopes")?;
    }
    for b in &doc.buildings {
        check_polygon(&b.base, "buildings")?;
    }
    for t in &doc.trees {
        check_point(t.center, "trees")?;
    }
    for s in doc.road_borders.iter().chain(&doc.lane_guides) {
        check_point(s.p1, "segments")?;
        check_point(s.p2, "segments")?;
    }
    if !doc.zoom.is_finite() || doc.zoom <= 0.0 {
        return Err(LoadError::OutOfBounds { field: "zoom" });
    }
    check_point(doc.offset, "offset")?;

    // trees are re-sized from the stored parameters
    let trees = doc.trees.into_iter().map(|t| Tree::new(t.center, doc.params.tree_size)).collect();
    Ok(WorldParts {
        title: doc.title,
        graph,
        params: doc.params,
        layers: WorldLayers {
            envelopes: doc.envelopes,
            road_borders: doc.road_borders,
            buildings: doc.buildings,
            trees,
            lane_guides: doc.lane_guides,
        },
        markings: doc.markings.iter().map(Marking::from_record).collect(),
        zoom: doc.zoom,
        offset: doc.offset,
    })
}

pub fn world_from_json(v: Value) -> Result<WorldParts, LoadError> {
    let doc: WorldDoc = serde_json::from_value(v)?;
    build_world(doc).inspect_err(|e| log::warn!("world load rejected: {}", e))
}

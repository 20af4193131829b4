pub mod config;
pub mod editor;
pub mod error;
pub mod items;
pub mod markings;
pub mod model;
pub mod render;
pub mod viewport;
pub mod world;
pub mod geometry {
    pub mod intersect;
    pub mod limits;
    pub mod math;
    pub mod tolerance;
}
pub mod primitives {
    pub mod envelope;
    pub mod polygon;
}
pub mod algorithms {
    pub mod buildings;
    pub mod containment;
    pub mod lights;
    pub mod picking;
    pub mod trees;
    pub mod union;
}
mod json;
pub mod svg;

pub use config::WorldParams;
pub use error::{GenerateError, LoadError, ParamsError};
pub use model::{Point, Segment};
pub use primitives::{envelope::Envelope, polygon::Polygon};
pub use world::{generate, World, WorldLayers};

use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

pub type PointId = u32;
pub type SegmentId = u32;

/// A graph segment stored as two point handles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub a: PointId,
    pub b: PointId,
}

/// The user-editable road skeleton.
///
/// Points live in an arena of slots addressed by [`PointId`]; segments refer
/// to their endpoints by id, so moving a point moves every segment attached
/// to it. Removed slots stay empty and ids are never reused. Iteration order
/// is insertion order.
///
/// Points are unique by value and segments unique by undirected value when
/// inserted through [`Graph::try_add_point`] / [`Graph::try_add_segment`].
#[derive(Clone, Debug, Default)]
pub struct Graph {
    pub(crate) points: Vec<Option<Point>>, // id is index
    pub(crate) edges: Vec<Option<Edge>>,   // id is index
}

impl Graph {
    pub fn new() -> Self {
        Graph { points: Vec::new(), edges: Vec::new() }
    }

    // Points
    pub fn add_point(&mut self, p: Point) -> PointId {
        let id = self.points.len() as PointId;
        self.points.push(Some(p));
        id
    }
    pub fn contains_point(&self, p: Point) -> Option<PointId> {
        self.points()
            .find(|(_, q)| *q == p)
            .map(|(id, _)| id)
    }
    /// Adds `p` unless an equal point exists or a coordinate is not finite.
    /// Returns the new id.
    pub fn try_add_point(&mut self, p: Point) -> Option<PointId> {
        if !p.is_finite() || self.contains_point(p).is_some() {
            return None;
        }
        Some(self.add_point(p))
    }
    pub fn point(&self, id: PointId) -> Option<Point> {
        self.points.get(id as usize).and_then(|p| *p)
    }
    pub fn move_point(&mut self, id: PointId, p: Point) -> bool {
        if !p.is_finite() {
            return false;
        }
        match self.points.get_mut(id as usize) {
            Some(Some(slot)) => {
                *slot = p;
                true
            }
            _ => false,
        }
    }
    /// Removes every segment touching `id`, then the point itself.
    /// Unknown ids are a no-op.
    pub fn remove_point(&mut self, id: PointId) -> bool {
        if self.point(id).is_none() {
            return false;
        }
        for sid in self.segments_with_point(id) {
            self.remove_segment(sid);
        }
        self.points[id as usize] = None;
        true
    }
    pub fn point_count(&self) -> usize {
        self.points.iter().filter(|p| p.is_some()).count()
    }
    pub fn points(&self) -> impl Iterator<Item = (PointId, Point)> + '_ {
        self.points
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.map(|p| (i as PointId, p)))
    }

    // Segments
    /// Adds a segment between two live points without any uniqueness check.
    pub fn add_segment(&mut self, a: PointId, b: PointId) -> Option<SegmentId> {
        self.point(a)?;
        self.point(b)?;
        let id = self.edges.len() as SegmentId;
        self.edges.push(Some(Edge { a, b }));
        Some(id)
    }
    /// Finds a segment equal (in either direction, by coordinates) to `seg`.
    pub fn contains_segment(&self, seg: &Segment) -> Option<SegmentId> {
        self.segments()
            .find(|(_, s)| s == seg)
            .map(|(id, _)| id)
    }
    /// Adds `a`-`b` unless its endpoints coincide or an equal segment exists.
    pub fn try_add_segment(&mut self, a: PointId, b: PointId) -> Option<SegmentId> {
        let seg = Segment::new(self.point(a)?, self.point(b)?);
        if seg.p1 == seg.p2 || self.contains_segment(&seg).is_some() {
            return None;
        }
        self.add_segment(a, b)
    }
    pub fn remove_segment(&mut self, id: SegmentId) -> bool {
        match self.edges.get_mut(id as usize) {
            Some(slot) if slot.is_some() => {
                *slot = None;
                true
            }
            _ => false,
        }
    }
    pub fn edge(&self, id: SegmentId) -> Option<Edge> {
        self.edges.get(id as usize).and_then(|e| *e)
    }
    /// The segment `id` with its endpoints resolved to coordinates.
    pub fn segment(&self, id: SegmentId) -> Option<Segment> {
        let e = self.edge(id)?;
        Some(Segment::new(self.point(e.a)?, self.point(e.b)?))
    }
    pub fn segment_count(&self) -> usize {
        self.edges.iter().filter(|e| e.is_some()).count()
    }
    pub fn edges(&self) -> impl Iterator<Item = (SegmentId, Edge)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.map(|e| (i as SegmentId, e)))
    }
    /// Live segments resolved to coordinates, in insertion order.
    pub fn segments(&self) -> impl Iterator<Item = (SegmentId, Segment)> + '_ {
        self.edges().filter_map(move |(id, e)| {
            Some((id, Segment::new(self.point(e.a)?, self.point(e.b)?)))
        })
    }
    pub fn segments_with_point(&self, id: PointId) -> Vec<SegmentId> {
        self.edges()
            .filter(|(_, e)| e.a == id || e.b == id)
            .map(|(sid, _)| sid)
            .collect()
    }
    pub fn degree(&self, id: PointId) -> usize {
        self.segments_with_point(id).len()
    }
    /// Points where more than two segments meet.
    pub fn intersections(&self) -> Vec<Point> {
        self.points()
            .filter(|(id, _)| self.degree(*id) > 2)
            .map(|(_, p)| p)
            .collect()
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.edges.clear();
    }

    /// Structural fingerprint used to detect edits between frames.
    ///
    /// Covers live point coordinates and segment endpoint coordinates in
    /// order; ids do not participate, so a reloaded graph hashes the same.
    pub fn hash(&self) -> u64 {
        let mut h = DefaultHasher::new();
        self.point_count().hash(&mut h);
        for (_, p) in self.points() {
            p.x.to_bits().hash(&mut h);
            p.y.to_bits().hash(&mut h);
        }
        self.segment_count().hash(&mut h);
        for (_, s) in self.segments() {
            for q in [s.p1, s.p2] {
                q.x.to_bits().hash(&mut h);
                q.y.to_bits().hash(&mut h);
            }
        }
        h.finish()
    }

    // JSON
    pub fn to_json_value(&self) -> serde_json::Value {
        json::graph_to_json(self)
    }
    pub fn from_json_value(v: serde_json::Value) -> Result<Graph, LoadError> {
        json::graph_from_json(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn try_add_point_dedups_by_value() {
        let mut g = Graph::new();
        assert_eq!(g.try_add_point(p(1.0, 1.0)), Some(0));
        assert_eq!(g.try_add_point(p(1.0, 1.0)), None);
        assert_eq!(g.point_count(), 1);
    }

    #[test]
    fn try_add_segment_rejects_duplicates_and_loops() {
        let mut g = Graph::new();
        let a = g.add_point(p(0.0, 0.0));
        let b = g.add_point(p(10.0, 0.0));
        let c = g.add_point(p(0.0, 0.0));
        assert!(g.try_add_segment(a, b).is_some());
        assert!(g.try_add_segment(b, a).is_none());
        assert!(g.try_add_segment(a, a).is_none());
        assert!(g.try_add_segment(a, c).is_none(), "coincident endpoints");
        assert!(g.try_add_segment(c, b).is_none(), "equal by value");
        assert_eq!(g.segment_count(), 1);
    }

    #[test]
    fn moving_a_point_moves_its_segments() {
        let mut g = Graph::new();
        let a = g.add_point(p(0.0, 0.0));
        let b = g.add_point(p(10.0, 0.0));
        let c = g.add_point(p(10.0, 10.0));
        let s1 = g.try_add_segment(a, b).unwrap();
        let s2 = g.try_add_segment(b, c).unwrap();
        assert!(g.move_point(b, p(5.0, 5.0)));
        assert_eq!(g.segment(s1).unwrap().p2, p(5.0, 5.0));
        assert_eq!(g.segment(s2).unwrap().p1, p(5.0, 5.0));
        assert!(!g.move_point(b, p(f64::NAN, 0.0)));
    }

    #[test]
    fn remove_missing_point_is_noop() {
        let mut g = Graph::new();
        let a = g.add_point(p(0.0, 0.0));
        let h = g.hash();
        assert!(!g.remove_point(a + 7));
        assert_eq!(g.hash(), h);
    }

    #[test]
    fn hash_changes_with_structure() {
        let mut g = Graph::new();
        let h0 = g.hash();
        let a = g.add_point(p(0.0, 0.0));
        let h1 = g.hash();
        assert_ne!(h0, h1);
        let b = g.add_point(p(1.0, 0.0));
        g.try_add_segment(a, b);
        let h2 = g.hash();
        assert_ne!(h1, h2);
        g.move_point(b, p(2.0, 0.0));
        assert_ne!(g.hash(), h2);
    }

    #[test]
    fn intersections_are_degree_three_or_more() {
        let mut g = Graph::new();
        let c = g.add_point(p(0.0, 0.0));
        for (x, y) in [(10.0, 0.0), (-10.0, 0.0), (0.0, 10.0)] {
            let q = g.add_point(p(x, y));
            g.try_add_segment(c, q);
        }
        assert_eq!(g.intersections(), vec![p(0.0, 0.0)]);
    }
}

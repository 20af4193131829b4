//! Closed rings of points and their boundary segments.

use serde::{Deserialize, Serialize};

use crate::algorithms::containment::ray_cast_contains;
use crate::geometry::intersect::get_intersection;
use crate::model::{Point, Segment};

/// An ordered ring of points.
///
/// `segments` starts out as the closed boundary `[points[i], points[(i+1)%n]]`.
/// The union pass may later split segments in place, after which
/// `segments.len()` can exceed `points.len()`; `points` is never touched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "PolygonRepr", into = "PolygonRepr")]
pub struct Polygon {
    pub points: Vec<Point>,
    pub segments: Vec<Segment>,
}

#[derive(Serialize, Deserialize)]
struct PolygonRepr {
    points: Vec<Point>,
}

impl From<PolygonRepr> for Polygon {
    fn from(r: PolygonRepr) -> Self {
        Polygon::new(r.points)
    }
}

impl From<Polygon> for PolygonRepr {
    fn from(p: Polygon) -> Self {
        PolygonRepr { points: p.points }
    }
}

impl Polygon {
    pub fn new(points: Vec<Point>) -> Self {
        let n = points.len();
        let segments = (0..n)
            .map(|i| Segment::new(points[i], points[(i + 1) % n]))
            .collect();
        Polygon { points, segments }
    }

    /// Even-odd ray cast from a fixed far point. Unreliable when the ray
    /// passes exactly through a vertex.
    pub fn contains_point(&self, point: Point) -> bool {
        ray_cast_contains(&self.segments, point)
    }

    /// Approximated by testing the segment's midpoint.
    pub fn contains_segment(&self, seg: &Segment) -> bool {
        self.contains_point(seg.midpoint())
    }

    pub fn distance_to_point(&self, point: Point) -> f64 {
        self.segments
            .iter()
            .map(|s| s.distance_to_point(point))
            .fold(f64::INFINITY, f64::min)
    }

    /// Smallest distance from any of `self`'s vertices to `other`'s boundary.
    pub fn distance_to_poly(&self, other: &Polygon) -> f64 {
        self.points
            .iter()
            .map(|p| other.distance_to_point(*p))
            .fold(f64::INFINITY, f64::min)
    }

    pub fn intersects_poly(&self, other: &Polygon) -> bool {
        self.segments.iter().any(|s1| {
            other
                .segments
                .iter()
                .any(|s2| get_intersection(s1.p1, s1.p2, s2.p1, s2.p2).is_some())
        })
    }

    /// `(min_x, min_y, max_x, max_y)`, or `None` for an empty ring.
    pub fn bbox(&self) -> Option<(f64, f64, f64, f64)> {
        bbox_of(self.points.iter().copied())
    }
}

pub fn bbox_of<I: IntoIterator<Item = Point>>(points: I) -> Option<(f64, f64, f64, f64)> {
    let mut it = points.into_iter();
    let first = it.next()?;
    Some(it.fold((first.x, first.y, first.x, first.y), |(x0, y0, x1, y1), p| {
        (x0.min(p.x), y0.min(p.y), x1.max(p.x), y1.max(p.y))
    }))
}

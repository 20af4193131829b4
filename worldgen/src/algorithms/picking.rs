use crate::geometry::math::nearest_point;
use crate::markings::Marking;
use crate::model::Point;
use crate::{Graph, PointId};

/// Nearest live graph point strictly within `threshold` of `loc`.
pub fn pick_point(g: &Graph, loc: Point, threshold: f64) -> Option<PointId> {
    let (ids, pts): (Vec<PointId>, Vec<Point>) = g.points().unzip();
    nearest_point(loc, &pts, threshold).map(|i| ids[i])
}

/// First marking (in placement order) whose footprint contains `loc`.
pub fn pick_marking(markings: &[Marking], loc: Point) -> Option<usize> {
    markings.iter().position(|m| m.poly.contains_point(loc))
}

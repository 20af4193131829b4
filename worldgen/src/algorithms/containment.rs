//! Point-in-polygon by ray casting.
//!
//! A ray is cast from [`OUTER_POINT`] to the query point and crossings with
//! each boundary segment are counted with the same parametric routine the
//! union pass uses. Odd means inside.

use crate::geometry::intersect::get_intersection;
use crate::geometry::tolerance::OUTER_POINT;
use crate::model::Point;
use crate::model::Segment;

/// Number of boundary segments crossed by the ray from [`OUTER_POINT`].
pub fn crossing_count(segments: &[Segment], point: Point) -> usize {
    segments
        .iter()
        .filter(|s| get_intersection(OUTER_POINT, point, s.p1, s.p2).is_some())
        .count()
}

#[inline]
pub fn ray_cast_contains(segments: &[Segment], point: Point) -> bool {
    crossing_count(segments, point) % 2 == 1
}

//! Boundary union of overlapping polygons.
//!
//! The union works on segment lists only:
//! 1. Every pair of polygons is broken against each other, splitting both
//!    crossing segments at the crossing point so their boundaries share it.
//! 2. A segment is kept when no *other* polygon contains its midpoint.
//!
//! The midpoint test is an approximation: a piece that clips another
//! polygon's corner can be kept or dropped wrongly. Callers (building
//! pruning, lane guides) are tuned to this behaviour, so it is kept as is.
//!
//! Breaking mutates the input polygons' `segments` and should run once per
//! generation on freshly built polygons.

use crate::geometry::intersect::get_intersection;
use crate::model::{Point, Segment};
use crate::primitives::polygon::Polygon;

/// Splits crossing segments of `a` and `b` in place. Returns the number of splits.
///
/// Splitting `a[i]` at a point inserts the remainder at `i + 1`, and the
/// same for `b[j]`. The scan then moves on to `b[j + 1]` (the fresh
/// remainder of `b`) while `a[i]` is the shortened piece, so new fragments
/// are still tested against the rest of the other polygon. Touches at an
/// exact end of `a[i]` (offset 0 or 1) never split, which stops a fragment
/// from being re-split at its own endpoint.
pub fn break_pair(a: &mut Polygon, b: &mut Polygon) -> usize {
    break_segments(&mut a.segments, &mut b.segments)
}

pub fn break_segments(segs1: &mut Vec<Segment>, segs2: &mut Vec<Segment>) -> usize {
    let mut splits = 0;
    let mut i = 0;
    while i < segs1.len() {
        let mut j = 0;
        while j < segs2.len() {
            let (s1, s2) = (segs1[i], segs2[j]);
            if let Some(int) = get_intersection(s1.p1, s1.p2, s2.p1, s2.p2) {
                if int.offset != 0.0 && int.offset != 1.0 {
                    let point = Point::new(int.x, int.y);
                    segs1[i].p2 = point;
                    segs1.insert(i + 1, Segment::new(point, s1.p2));
                    segs2[j].p2 = point;
                    segs2.insert(j + 1, Segment::new(point, s2.p2));
                    splits += 1;
                }
            }
            j += 1;
        }
        i += 1;
    }
    splits
}

/// Breaks every unordered pair `(i, j)` with `i < j`.
pub fn multi_break(polys: &mut [Polygon]) -> usize {
    let mut splits = 0;
    for i in 0..polys.len() {
        let (head, tail) = polys.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            splits += break_pair(a, b);
        }
    }
    splits
}

/// Outer boundary of `polys`, as a flat (possibly disjoint) list of segments.
pub fn union(polys: &mut [Polygon]) -> Vec<Segment> {
    let splits = multi_break(polys);
    log::trace!("union: {} polygons, {} splits", polys.len(), splits);

    let polys: &[Polygon] = polys;
    let mut kept = Vec::new();
    for (i, poly) in polys.iter().enumerate() {
        for seg in &poly.segments {
            let inside_other = polys
                .iter()
                .enumerate()
                .any(|(j, other)| i != j && other.contains_segment(seg));
            if !inside_other {
                kept.push(*seg);
            }
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon {
        Polygon::new(vec![
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x1, y1),
            Point::new(x0, y1),
        ])
    }

    #[test]
    fn split_inserts_after_and_keeps_chain() {
        let mut a = vec![Segment::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0))];
        let mut b = vec![Segment::new(Point::new(5.0, -5.0), Point::new(5.0, 5.0))];
        assert_eq!(break_segments(&mut a, &mut b), 1);
        assert_eq!(a.len(), 2);
        assert_eq!(b.len(), 2);
        assert_eq!(a[0].p2, Point::new(5.0, 0.0));
        assert_eq!(a[1], Segment::new(Point::new(5.0, 0.0), Point::new(10.0, 0.0)));
        assert_eq!(b[0].p2, a[0].p2);
        assert_eq!(b[1].p1, a[0].p2);
    }

    #[test]
    fn new_fragment_is_tested_against_remaining_segments() {
        // a crosses two segments of b; the second crossing lies on the
        // fragment produced by the first split.
        let mut a = vec![Segment::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0))];
        let mut b = vec![
            Segment::new(Point::new(3.0, -5.0), Point::new(3.0, 5.0)),
            Segment::new(Point::new(7.0, 5.0), Point::new(7.0, -5.0)),
        ];
        let splits = break_segments(&mut a, &mut b);
        assert_eq!(splits, 2);
        let xs: Vec<(f64, f64)> = a.iter().map(|s| (s.p1.x, s.p2.x)).collect();
        assert_eq!(xs, vec![(0.0, 3.0), (3.0, 7.0), (7.0, 10.0)]);
        assert_eq!(b.len(), 4);
    }

    #[test]
    fn endpoint_touch_does_not_split() {
        let mut a = vec![Segment::new(Point::new(0.0, 0.0), Point::new(5.0, 0.0))];
        let mut b = vec![Segment::new(Point::new(5.0, -5.0), Point::new(5.0, 5.0))];
        assert_eq!(break_segments(&mut a, &mut b), 0);
        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 1);
    }

    #[test]
    fn union_of_disjoint_keeps_everything() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(20.0, 0.0, 30.0, 10.0);
        let mut polys = vec![a.clone(), b.clone()];
        let out = union(&mut polys);
        let mut expected = a.segments.clone();
        expected.extend(b.segments.iter().copied());
        assert_eq!(out.len(), 8);
        for (o, e) in out.iter().zip(&expected) {
            assert_eq!(o.p1, e.p1);
            assert_eq!(o.p2, e.p2);
        }
    }

    #[test]
    fn union_of_empty_is_empty() {
        let mut polys: Vec<Polygon> = Vec::new();
        assert!(union(&mut polys).is_empty());
    }
}

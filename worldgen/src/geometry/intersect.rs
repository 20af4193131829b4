// Parametric segment-segment intersection.
// Near-parallel pairs (|det| <= EPS_INTERSECT) never intersect; touching at an
// endpoint counts as an intersection with offset exactly 0 or 1.

use super::math::lerp;
use super::tolerance::EPS_INTERSECT;
use crate::model::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub x: f64,
    pub y: f64,
    // Parameter along AB
    pub offset: f64,
}

pub fn get_intersection(a: Point, b: Point, c: Point, d: Point) -> Option<Intersection> {
    let t_top = (d.x - c.x) * (a.y - c.y) - (d.y - c.y) * (a.x - c.x);
    let u_top = (c.y - a.y) * (a.x - b.x) - (c.x - a.x) * (a.y - b.y);
    let bottom = (d.y - c.y) * (b.x - a.x) - (d.x - c.x) * (b.y - a.y);

    if bottom.abs() <= EPS_INTERSECT {
        return None;
    }
    let t = t_top / bottom;
    let u = u_top / bottom;
    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(Intersection { x: lerp(a.x, b.x, t), y: lerp(a.y, b.y, t), offset: t })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point { Point::new(x, y) }

    #[test]
    fn proper_cross() {
        let r = get_intersection(p(0.0, 0.0), p(2.0, 2.0), p(0.0, 2.0), p(2.0, 0.0)).expect("cross");
        assert!((r.offset - 0.5).abs() < 1e-12);
        assert!((r.x - 1.0).abs() < 1e-12 && (r.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn endpoint_touch_has_exact_offset() {
        let r = get_intersection(p(0.0, 0.0), p(1.0, 0.0), p(1.0, 0.0), p(1.0, 1.0)).expect("touch");
        assert_eq!(r.offset, 1.0);
    }

    #[test]
    fn shared_start_gives_offset_one_for_continuation() {
        // AB ends where CD starts; the split step relies on this being exactly 1
        let a = p(3.0, 7.0);
        let b = p(10.123, -4.5);
        let d = p(20.0, 33.3);
        let r = get_intersection(a, b, b, d).expect("touch");
        assert_eq!(r.offset, 1.0);
    }

    #[test]
    fn parallel_is_none() {
        assert!(get_intersection(p(0.0, 0.0), p(3.0, 0.0), p(0.0, 1.0), p(3.0, 1.0)).is_none());
        // collinear overlap has a zero determinant too
        assert!(get_intersection(p(0.0, 0.0), p(3.0, 0.0), p(1.0, 0.0), p(2.0, 0.0)).is_none());
    }

    #[test]
    fn disjoint_is_none() {
        assert!(get_intersection(p(0.0, 0.0), p(1.0, 1.0), p(5.0, 0.0), p(6.0, -3.0)).is_none());
    }
}

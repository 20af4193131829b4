use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

use crate::geometry::math::{distance, lerp};

/// A 2D coordinate. Also used as a direction vector.
///
/// Equality is exact: two points are equal only when both coordinates match
/// bit for bit (modulo `-0.0 == 0.0`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn dot(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn magnitude(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Unit vector in the same direction. A zero vector yields NaN components.
    pub fn normalize(self) -> Point {
        self * (1.0 / self.magnitude())
    }

    /// Angle from the positive x axis, in radians.
    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Moves `offset` units away from `self` along `angle`.
    pub fn translate(self, angle: f64, offset: f64) -> Point {
        Point {
            x: self.x + angle.cos() * offset,
            y: self.y + angle.sin() * offset,
        }
    }

    pub fn perpendicular(self) -> Point {
        Point { x: -self.y, y: self.x }
    }

    pub fn lerp(self, to: Point, t: f64) -> Point {
        Point {
            x: lerp(self.x, to.x, t),
            y: lerp(self.y, to.y, t),
        }
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    pub fn distance(self, other: Point) -> f64 {
        distance(self, other)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point {
    type Output = Point;
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

/// Result of projecting a point onto a segment's supporting line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub point: Point,
    /// Position along the segment; 0 at `p1`, 1 at `p2`.
    pub offset: f64,
}

/// A directed line between two points. Equality ignores direction.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Segment {
    pub p1: Point,
    pub p2: Point,
}

impl Segment {
    pub const fn new(p1: Point, p2: Point) -> Self {
        Segment { p1, p2 }
    }

    pub fn length(&self) -> f64 {
        distance(self.p1, self.p2)
    }

    pub fn direction_vector(&self) -> Point {
        (self.p2 - self.p1).normalize()
    }

    pub fn includes(&self, point: Point) -> bool {
        self.p1 == point || self.p2 == point
    }

    pub fn midpoint(&self) -> Point {
        self.p1.midpoint(self.p2)
    }

    pub fn project_point(&self, point: Point) -> Projection {
        let a = point - self.p1;
        let b = self.p2 - self.p1;
        let norm_b = b.normalize();
        let scaler = a.dot(norm_b);
        Projection {
            point: self.p1 + norm_b * scaler,
            offset: scaler / b.magnitude(),
        }
    }

    /// Distance to the closest point of the segment (not its supporting line).
    pub fn distance_to_point(&self, point: Point) -> f64 {
        let proj = self.project_point(point);
        if proj.offset > 0.0 && proj.offset < 1.0 {
            return distance(point, proj.point);
        }
        distance(point, self.p1).min(distance(point, self.p2))
    }
}

impl PartialEq for Segment {
    fn eq(&self, other: &Segment) -> bool {
        self.includes(other.p1) && self.includes(other.p2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_equality_is_exact() {
        let p = Point::new(1.0, 2.0);
        assert_eq!(p, p);
        assert_ne!(p, Point::new(1.0, 2.0 + 1e-12));
        assert_eq!(Point::new(3.0, 4.0), Point::new(3.0, 4.0));
    }

    #[test]
    fn segment_equality_ignores_direction() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(5.0, 1.0);
        assert_eq!(Segment::new(a, b), Segment::new(b, a));
        assert_ne!(Segment::new(a, b), Segment::new(a, Point::new(5.0, 2.0)));
    }

    #[test]
    fn distance_to_point_uses_endpoints_outside_span() {
        let s = Segment::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        assert!((s.distance_to_point(Point::new(5.0, 3.0)) - 3.0).abs() < 1e-12);
        assert!((s.distance_to_point(Point::new(13.0, 4.0)) - 5.0).abs() < 1e-12);
        assert!((s.distance_to_point(Point::new(-3.0, 0.0)) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn projection_offset_is_relative_to_length() {
        let s = Segment::new(Point::new(0.0, 0.0), Point::new(4.0, 0.0));
        let p = s.project_point(Point::new(1.0, 7.0));
        assert_eq!(p.point, Point::new(1.0, 0.0));
        assert!((p.offset - 0.25).abs() < 1e-12);
    }

    #[test]
    fn translate_and_angle_agree() {
        let o = Point::new(1.0, 1.0);
        let dir = Point::new(0.0, 2.0);
        let q = o.translate(dir.angle(), 3.0);
        assert!((q.x - 1.0).abs() < 1e-12);
        assert!((q.y - 4.0).abs() < 1e-12);
    }
}

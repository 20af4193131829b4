use crate::model::{Point, Segment};

#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[inline]
pub fn distance(p1: Point, p2: Point) -> f64 {
    (p1.x - p2.x).hypot(p1.y - p2.y)
}

/// Nearest point to `loc` strictly closer than `threshold`.
pub fn nearest_point<'a, I>(loc: Point, points: I, threshold: f64) -> Option<usize>
where
    I: IntoIterator<Item = &'a Point>,
{
    let mut best: Option<(usize, f64)> = None;
    for (i, p) in points.into_iter().enumerate() {
        let d = distance(*p, loc);
        if d < threshold && best.map_or(true, |(_, bd)| d < bd) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}

/// Nearest segment to `loc` strictly closer than `threshold`.
pub fn nearest_segment<'a, I>(loc: Point, segments: I, threshold: f64) -> Option<usize>
where
    I: IntoIterator<Item = &'a Segment>,
{
    let mut best: Option<(usize, f64)> = None;
    for (i, s) in segments.into_iter().enumerate() {
        let d = s.distance_to_point(loc);
        if d < threshold && best.map_or(true, |(_, bd)| d < bd) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}

/// Pushes `point` away from `view_point` to fake a roof at `height`.
///
/// The displacement saturates with distance (`atan(d/300)` normalised to
/// `[0,1)`), so points right under the viewer barely move.
pub fn fake_3d_point(point: Point, view_point: Point, height: f64) -> Point {
    let diff = point - view_point;
    let dist = diff.magnitude();
    if dist == 0.0 {
        return point;
    }
    let scaler = (dist / 300.0).atan() / std::f64::consts::FRAC_PI_2;
    point + diff.normalize() * (height * scaler)
}

//! Buildings and trees, drawn with a cheap perspective trick: every roof
//! point is pushed away from the view point (see [`fake_3d_point`]).

use std::cmp::Ordering;
use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::geometry::math::{fake_3d_point, lerp};
use crate::model::Point;
use crate::primitives::polygon::Polygon;
use crate::render::{Draw, DrawOptions, LineJoin, Surface};

pub const DEFAULT_BUILDING_HEIGHT: f64 = 200.0;
pub const DEFAULT_TREE_HEIGHT_COEF: f64 = 0.3;
const TREE_LEVELS: usize = 7;
const TREE_LEVEL_POINTS: usize = 32;

fn far_to_near(view_point: Point) -> impl Fn(&Polygon, &Polygon) -> Ordering {
    move |a: &Polygon, b: &Polygon| {
        b.distance_to_point(view_point)
            .partial_cmp(&a.distance_to_point(view_point))
            .unwrap_or(Ordering::Equal)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub base: Polygon,
    pub height: f64,
}

impl Building {
    pub fn new(base: Polygon) -> Self {
        Building { base, height: DEFAULT_BUILDING_HEIGHT }
    }

    pub fn draw(&self, s: &mut dyn Surface, view_point: Point) {
        let base = &self.base.points;
        let n = base.len();
        let top: Vec<Point> = base
            .iter()
            .map(|p| fake_3d_point(*p, view_point, self.height * 0.6))
            .collect();
        let ceiling = Polygon::new(top.clone());

        let mut sides: Vec<Polygon> = (0..n)
            .map(|i| {
                let next = (i + 1) % n;
                Polygon::new(vec![base[i], base[next], top[next], top[i]])
            })
            .collect();
        sides.sort_by(far_to_near(view_point));

        self.base.draw(
            s,
            &DrawOptions::new().fill_style("white").stroke("rgba(0,0,0,0.2)").line_width(20.0),
        );
        for side in &sides {
            side.draw(s, &DrawOptions::new().fill_style("white").stroke("#AAA"));
        }
        ceiling.draw(s, &DrawOptions::new().fill_style("white").stroke("white").line_width(6.0));

        // gabled roof needs the four corners of a rectangular footprint
        if n < 4 {
            return;
        }
        let ridge: Vec<Point> = [base[0].midpoint(base[1]), base[2].midpoint(base[3])]
            .iter()
            .map(|p| fake_3d_point(*p, view_point, self.height))
            .collect();
        let mut roof = vec![
            Polygon::new(vec![top[0], top[3], ridge[1], ridge[0]]),
            Polygon::new(vec![top[2], top[1], ridge[0], ridge[1]]),
        ];
        roof.sort_by(far_to_near(view_point));
        let roof_style = DrawOptions::new()
            .fill_style("#D44")
            .stroke("#C44")
            .line_width(8.0)
            .join(LineJoin::Round);
        for poly in &roof {
            poly.draw(s, &roof_style);
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "TreeRepr", into = "TreeRepr")]
pub struct Tree {
    pub center: Point,
    pub size: f64,
    pub height_coef: f64,
    /// Footprint, also the bottom level of the canopy.
    pub base: Polygon,
}

#[derive(Serialize, Deserialize)]
struct TreeRepr {
    center: Point,
    size: f64,
}

impl From<TreeRepr> for Tree {
    fn from(r: TreeRepr) -> Self {
        Tree::new(r.center, r.size)
    }
}

impl From<Tree> for TreeRepr {
    fn from(t: Tree) -> Self {
        TreeRepr { center: t.center, size: t.size }
    }
}

impl Tree {
    pub fn new(center: Point, size: f64) -> Self {
        let base = level(center.x, center, size);
        Tree { center, size, height_coef: DEFAULT_TREE_HEIGHT_COEF, base }
    }

    pub fn draw(&self, s: &mut dyn Surface, view_point: Point) {
        let top = self.center + (self.center - view_point) * self.height_coef;
        for lvl in 0..TREE_LEVELS {
            let t = lvl as f64 / (TREE_LEVELS - 1) as f64;
            let point = self.center.lerp(top, t);
            let color = format!("rgb(30,{},70)", lerp(50.0, 200.0, t));
            let size = lerp(self.size, 40.0, t);
            level(self.center.x, point, size)
                .draw(s, &DrawOptions::new().fill_style(&color).stroke("rgba(0,0,0,0)"));
        }
    }
}

/// A wobbly disc. The wobble is a pure function of `seed_x`, `size` and
/// angle so a tree looks the same every frame.
fn level(seed_x: f64, center: Point, size: f64) -> Polygon {
    let rad = size / 2.0;
    let points = (0..TREE_LEVEL_POINTS)
        .map(|i| {
            let a = i as f64 * PI / 16.0;
            let kind_of_random = (((a + seed_x) * size) % 17.0).cos().powi(2);
            let noisy_radius = rad * lerp(0.5, 1.0, kind_of_random);
            center.translate(a, noisy_radius)
        })
        .collect();
    Polygon::new(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::recorder::Recorder;

    fn rect() -> Polygon {
        Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(40.0, 0.0),
            Point::new(40.0, 20.0),
            Point::new(0.0, 20.0),
        ])
    }

    #[test]
    fn building_draws_base_sides_ceiling_roof() {
        let b = Building::new(rect());
        assert_eq!(b.height, 200.0);
        let mut r = Recorder::default();
        b.draw(&mut r, Point::new(500.0, 500.0));
        // base + 4 sides + ceiling + 2 roof halves
        assert_eq!(r.count("close"), 8);
        assert_eq!(r.count("fillStyle #D44"), 2);
    }

    #[test]
    fn tree_level_is_deterministic_and_bounded() {
        let t = Tree::new(Point::new(10.0, 20.0), 160.0);
        assert_eq!(t.base.points.len(), 32);
        assert_eq!(t, Tree::new(Point::new(10.0, 20.0), 160.0));
        for p in &t.base.points {
            let d = p.distance(t.center);
            assert!(d >= 40.0 - 1e-9 && d <= 80.0 + 1e-9);
        }
    }

    #[test]
    fn tree_draws_seven_levels() {
        let t = Tree::new(Point::new(0.0, 0.0), 100.0);
        let mut r = Recorder::default();
        t.draw(&mut r, Point::new(100.0, 0.0));
        assert_eq!(r.count("close"), 7);
        assert!(r.calls.contains(&"fillStyle rgb(30,50,70)".to_string()));
        assert!(r.calls.contains(&"fillStyle rgb(30,200,70)".to_string()));
    }

    #[test]
    fn tree_serializes_center_and_size_only() {
        let t = Tree::new(Point::new(1.0, 2.0), 50.0);
        let v = serde_json::to_value(&t).unwrap();
        assert_eq!(v, serde_json::json!({"center": {"x": 1.0, "y": 2.0}, "size": 50.0}));
        let back: Tree = serde_json::from_value(v).unwrap();
        assert_eq!(back, t);
    }
}

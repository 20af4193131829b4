//! Rejection-sampled tree scatter.
//!
//! Candidates are drawn uniformly inside the bounding box of the road
//! borders and building footprints. A candidate must keep clear of every
//! road and building, keep clear of the trees already placed, and still be
//! near something, so trees cluster along streets instead of filling empty
//! land. Sampling stops after [`MAX_TREE_TRIES`] rejections in a row.

use rand::Rng;

use crate::geometry::math::lerp;
use crate::geometry::tolerance::MAX_TREE_TRIES;
use crate::items::{Building, Tree};
use crate::model::{Point, Segment};
use crate::primitives::envelope::Envelope;
use crate::primitives::polygon::{bbox_of, Polygon};

fn acceptable(p: Point, illegal: &[&Polygon], trees: &[Tree], size: f64) -> bool {
    if illegal.iter().any(|poly| poly.contains_point(p) || poly.distance_to_point(p) < size / 2.0) {
        return false;
    }
    if trees.iter().any(|t| t.center.distance(p) < size) {
        return false;
    }
    illegal.iter().any(|poly| poly.distance_to_point(p) < size * 2.0)
}

pub fn generate_trees<R: Rng + ?Sized>(
    road_borders: &[Segment],
    buildings: &[Building],
    envelopes: &[Envelope],
    size: f64,
    rng: &mut R,
) -> Vec<Tree> {
    let outline = road_borders
        .iter()
        .flat_map(|s| [s.p1, s.p2])
        .chain(buildings.iter().flat_map(|b| b.base.points.iter().copied()));
    let Some((left, top, right, bottom)) = bbox_of(outline) else {
        return Vec::new();
    };

    let illegal: Vec<&Polygon> = buildings
        .iter()
        .map(|b| &b.base)
        .chain(envelopes.iter().map(|e| &e.poly))
        .collect();

    let mut trees: Vec<Tree> = Vec::new();
    let mut tries = 0;
    while tries < MAX_TREE_TRIES {
        let p = Point::new(lerp(left, right, rng.gen::<f64>()), lerp(bottom, top, rng.gen::<f64>()));
        if acceptable(p, &illegal, &trees, size) {
            trees.push(Tree::new(p, size));
            tries = 0;
        } else {
            tries += 1;
        }
    }
    trees
}

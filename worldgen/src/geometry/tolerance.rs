// Centralized tolerances and fixed constants for the generation pipeline

use crate::model::Point;

pub const EPS_INTERSECT: f64 = 0.001; // determinant guard for near-parallel lines
pub const EPS_OVERLAP: f64 = 0.001; // slack when comparing building gaps to spacing

// Ray-cast origin for point-in-polygon; must lie outside every polygon of interest
pub const OUTER_POINT: Point = Point::new(-1000.0, -1000.0);

// Consecutive rejections after which tree scattering stops
pub const MAX_TREE_TRIES: u32 = 100;

// Pick radius for editors, multiplied by the viewport zoom
pub const PICK_RADIUS: f64 = 10.0;

#[inline] pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool { (a - b).abs() <= eps }

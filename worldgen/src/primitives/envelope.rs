//! Rounded corridors around a skeleton segment.

use std::f64::consts::{FRAC_PI_2, PI};

use serde::{Deserialize, Serialize};

use crate::model::{Point, Segment};
use crate::primitives::polygon::Polygon;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub skeleton: Segment,
    pub poly: Polygon,
}

impl Envelope {
    /// Buffers `skeleton` by `width / 2` on every side.
    ///
    /// `roundness` is the number of angular steps per end cap; each cap gets
    /// `roundness + 1` points. 0 is treated as 1 (a plain rectangle).
    pub fn new(skeleton: Segment, width: f64, roundness: u32) -> Self {
        let poly = Self::generate_polygon(&skeleton, width, roundness);
        Envelope { skeleton, poly }
    }

    fn generate_polygon(skeleton: &Segment, width: f64, roundness: u32) -> Polygon {
        let Segment { p1, p2 } = *skeleton;
        let roundness = roundness.max(1);
        let radius = width / 2.0;
        let alpha = (p1 - p2).angle();
        let alpha_ccw = alpha - FRAC_PI_2;
        let step = PI / roundness as f64;

        let mut points: Vec<Point> = Vec::with_capacity(2 * (roundness as usize + 1));
        for k in 0..=roundness {
            points.push(p1.translate(alpha_ccw + k as f64 * step, radius));
        }
        for k in 0..=roundness {
            points.push(p2.translate(PI + alpha_ccw + k as f64 * step, radius));
        }
        Polygon::new(points)
    }
}

//! Traffic-light cycling.
//!
//! Each light belongs to the control center at its nearest graph
//! intersection. A center lets one light through at a time: green for
//! [`GREEN_TICKS`], yellow for [`YELLOW_TICKS`], then hands over to the next
//! light in placement order. Everything else at that center is red.

use crate::geometry::math::nearest_point;
use crate::markings::{LightState, Marking, MarkingType};
use crate::model::Point;

pub const GREEN_TICKS: u64 = 2;
pub const YELLOW_TICKS: u64 = 1;
pub const FRAMES_PER_TICK: u64 = 60;

#[derive(Clone, Debug, PartialEq)]
pub struct ControlCenter {
    pub point: Point,
    /// Indices into the marking list, in placement order.
    pub lights: Vec<usize>,
}

impl ControlCenter {
    pub fn cycle_ticks(&self) -> u64 {
        self.lights.len() as u64 * (GREEN_TICKS + YELLOW_TICKS)
    }
}

/// Groups every light marking under its nearest intersection. Lights with
/// no intersection to attach to are left out.
pub fn control_centers(markings: &[Marking], intersections: &[Point]) -> Vec<ControlCenter> {
    let mut centers: Vec<ControlCenter> = Vec::new();
    for (i, m) in markings.iter().enumerate() {
        if m.ty() != MarkingType::Light {
            continue;
        }
        let Some(k) = nearest_point(m.center, intersections, f64::MAX) else {
            continue;
        };
        let point = intersections[k];
        match centers.iter_mut().find(|c| c.point == point) {
            Some(c) => c.lights.push(i),
            None => centers.push(ControlCenter { point, lights: vec![i] }),
        }
    }
    centers
}

/// State of the `index`-th light of a center at `tick`.
pub fn light_state_at(center: &ControlCenter, index: usize, tick: u64) -> LightState {
    let ticks = center.cycle_ticks();
    if ticks == 0 {
        return LightState::Off;
    }
    let c_tick = tick % ticks;
    let active = (c_tick / (GREEN_TICKS + YELLOW_TICKS)) as usize;
    if index != active {
        return LightState::Red;
    }
    if c_tick % (GREEN_TICKS + YELLOW_TICKS) < GREEN_TICKS {
        LightState::Green
    } else {
        LightState::Yellow
    }
}

/// Sets every grouped light's state for `frame`.
pub fn update_lights(markings: &mut [Marking], intersections: &[Point], frame: u64) {
    let tick = frame / FRAMES_PER_TICK;
    for center in control_centers(markings, intersections) {
        for (k, &mi) in center.lights.iter().enumerate() {
            let state = light_state_at(&center, k, tick);
            markings[mi].set_light_state(state);
        }
    }
}

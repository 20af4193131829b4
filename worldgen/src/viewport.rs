//! Screen/world coordinate mapping for a pannable, zoomable canvas.
//!
//! World coordinates are screen coordinates relative to the canvas centre,
//! scaled by `zoom`, then shifted by the pan offset. Zoom grows as the
//! user zooms out, so a larger value shows more of the world.

use serde::{Deserialize, Serialize};

use crate::model::Point;

pub const MIN_ZOOM: f64 = 1.0;
pub const MAX_ZOOM: f64 = 5.0;
pub const ZOOM_STEP: f64 = 0.1;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Drag {
    pub start: Point,
    pub end: Point,
    pub offset: Point,
    pub active: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub zoom: f64,
    pub center: Point,
    pub offset: Point,
    pub drag: Drag,
}

impl Viewport {
    /// A viewport for a `width` x `height` canvas, centred on the origin.
    pub fn new(width: f64, height: f64) -> Self {
        let center = Point::new(width / 2.0, height / 2.0);
        Viewport { zoom: 1.0, center, offset: -center, drag: Drag::default() }
    }

    /// Steps the zoom by the sign of a wheel delta, clamped to
    /// `[MIN_ZOOM, MAX_ZOOM]`.
    pub fn zoom_by(&mut self, delta: f64) {
        if delta == 0.0 || delta.is_nan() {
            return;
        }
        self.zoom = (self.zoom + delta.signum() * ZOOM_STEP).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// World position under screen position `screen`. With
    /// `subtract_drag_offset` the in-progress pan is taken into account.
    pub fn get_mouse(&self, screen: Point, subtract_drag_offset: bool) -> Point {
        let p = (screen - self.center) * self.zoom - self.offset;
        if subtract_drag_offset {
            p - self.drag.offset
        } else {
            p
        }
    }

    /// Current pan including any drag in progress.
    pub fn get_offset(&self) -> Point {
        self.offset + self.drag.offset
    }

    /// World position the pseudo-3D items lean away from: the point under
    /// the canvas centre.
    pub fn view_point(&self) -> Point {
        -self.get_offset()
    }

    pub fn start_drag(&mut self, screen: Point) {
        self.drag = Drag { start: self.get_mouse(screen, false), active: true, ..Drag::default() };
    }

    pub fn drag_to(&mut self, screen: Point) {
        if !self.drag.active {
            return;
        }
        self.drag.end = self.get_mouse(screen, false);
        self.drag.offset = self.drag.end - self.drag.start;
    }

    /// Commits the drag into the pan offset.
    pub fn end_drag(&mut self) {
        if !self.drag.active {
            return;
        }
        self.offset = self.offset + self.drag.offset;
        self.drag = Drag::default();
    }

    /// Inverse of [`Viewport::get_mouse`] with the drag offset subtracted.
    pub fn to_screen(&self, world: Point) -> Point {
        (world + self.get_offset()) * (1.0 / self.zoom) + self.center
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_view_matches_screen_coordinates() {
        let v = Viewport::new(800.0, 600.0);
        assert_eq!(v.get_mouse(Point::new(0.0, 0.0), false), Point::new(0.0, 0.0));
        assert_eq!(v.get_mouse(Point::new(400.0, 300.0), false), Point::new(400.0, 300.0));
        assert_eq!(v.to_screen(Point::new(400.0, 300.0)), Point::new(400.0, 300.0));
        assert_eq!(v.view_point(), Point::new(400.0, 300.0));
    }

    #[test]
    fn zoom_is_clamped() {
        let mut v = Viewport::new(100.0, 100.0);
        v.zoom_by(-3.0);
        assert_eq!(v.zoom, 1.0);
        for _ in 0..100 {
            v.zoom_by(1.0);
        }
        assert_eq!(v.zoom, 5.0);
        v.zoom_by(0.0);
        assert_eq!(v.zoom, 5.0);
    }

    #[test]
    fn drag_pans_on_release() {
        let mut v = Viewport::new(100.0, 100.0);
        let before = v.offset;
        v.start_drag(Point::new(10.0, 10.0));
        v.drag_to(Point::new(30.0, 15.0));
        assert_eq!(v.drag.offset, Point::new(20.0, 5.0));
        assert_eq!(v.get_offset(), before + Point::new(20.0, 5.0));
        v.end_drag();
        assert!(!v.drag.active);
        assert_eq!(v.offset, before + Point::new(20.0, 5.0));
        assert_eq!(v.drag.offset, Point::new(0.0, 0.0));
    }

    #[test]
    fn to_screen_undoes_mouse_mapping_during_drag() {
        let mut v = Viewport::new(100.0, 100.0);
        v.zoom = 2.0;
        v.start_drag(Point::new(10.0, 10.0));
        v.drag_to(Point::new(30.0, 15.0));
        assert_eq!(v.drag.offset, Point::new(40.0, 10.0));
        let screen = Point::new(70.0, 40.0);
        let world = v.get_mouse(screen, true);
        assert_eq!(world, Point::new(50.0, 20.0));
        assert_eq!(v.to_screen(world), screen);
    }

    #[test]
    fn moves_without_drag_are_ignored() {
        let mut v = Viewport::new(100.0, 100.0);
        v.drag_to(Point::new(30.0, 15.0));
        v.end_drag();
        assert_eq!(v, Viewport::new(100.0, 100.0));
    }
}

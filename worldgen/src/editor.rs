//! Pointer-driven graph editing.
//!
//! The editor keeps only handles into the [`Graph`]; every event takes the
//! graph by reference so the world keeps sole ownership of it.

use crate::geometry::tolerance::PICK_RADIUS;
use crate::algorithms::picking::pick_point;
use crate::model::{Point, Segment};
use crate::render::{Draw, DrawOptions, Surface};
use crate::{Graph, PointId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Primary,
    Secondary,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphEditor {
    pub selected: Option<PointId>,
    pub hovered: Option<PointId>,
    pub mouse: Option<Point>,
    pub dragging: bool,
}

impl GraphEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// `mouse` is in world coordinates; `zoom` scales the hover radius.
    pub fn mouse_move(&mut self, graph: &mut Graph, mouse: Point, zoom: f64) {
        self.mouse = Some(mouse);
        self.hovered = pick_point(graph, mouse, PICK_RADIUS * zoom);
        if self.dragging {
            if let Some(id) = self.selected {
                graph.move_point(id, mouse);
            }
        }
    }

    pub fn mouse_down(&mut self, graph: &mut Graph, button: MouseButton) {
        let Some(mouse) = self.mouse else {
            return;
        };
        match button {
            MouseButton::Secondary => {
                if self.selected.is_some() {
                    self.selected = None;
                } else if let Some(id) = self.hovered {
                    self.remove_point(graph, id);
                }
            }
            MouseButton::Primary => {
                if let Some(id) = self.hovered {
                    self.select(graph, id);
                    self.dragging = true;
                    return;
                }
                let id = match graph.try_add_point(mouse) {
                    Some(id) => id,
                    None => match graph.contains_point(mouse) {
                        Some(id) => id,
                        None => return,
                    },
                };
                self.select(graph, id);
                self.hovered = Some(id);
            }
        }
    }

    pub fn mouse_up(&mut self) {
        self.dragging = false;
    }

    fn select(&mut self, graph: &mut Graph, id: PointId) {
        if let Some(prev) = self.selected {
            graph.try_add_segment(prev, id);
        }
        self.selected = Some(id);
    }

    fn remove_point(&mut self, graph: &mut Graph, id: PointId) {
        graph.remove_point(id);
        self.hovered = None;
        if self.selected == Some(id) {
            self.selected = None;
        }
    }

    /// Clears the graph and the editor state.
    pub fn dispose(&mut self, graph: &mut Graph) {
        graph.clear();
        self.selected = None;
        self.hovered = None;
    }

    /// Graph plus hover/selection highlights and the pending segment.
    pub fn display(&self, graph: &Graph, s: &mut dyn Surface) {
        for (_, seg) in graph.segments() {
            seg.draw(s, &DrawOptions::new());
        }
        for (_, p) in graph.points() {
            p.draw(s, &DrawOptions::new());
        }
        let hovered = self.hovered.and_then(|id| graph.point(id));
        if let Some(h) = hovered {
            h.draw(s, &DrawOptions::new().fill(true));
        }
        let Some(selected) = self.selected.and_then(|id| graph.point(id)) else {
            return;
        };
        let Some(intent) = hovered.or(self.mouse) else {
            return;
        };
        Segment::new(selected, intent).draw(s, &DrawOptions::new().dash(&[3.0, 3.0]));
        selected.draw(s, &DrawOptions::new().outline(true));
    }
}

use crate::canvas::CanvasSurface;
use crate::error;
use crate::interop::{arr_f64, arr_u32, new_obj, set_kv};
use crate::World;
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;
use worldgen::editor::MouseButton;
use worldgen::markings::MarkingType;
use worldgen::{Point, WorldParams};
type JsValue = wasm_bindgen::JsValue;

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn seed_from(seed: f64) -> Option<u64> {
    if !seed.is_finite() || seed < 0.0 {
        return None;
    }
    Some(seed as u64)
}

fn check_xy(x: f64, y: f64) -> Result<Point, JsValue> {
    if !x.is_finite() {
        return Err(error::non_finite("x"));
    }
    if !y.is_finite() {
        return Err(error::non_finite("y"));
    }
    Ok(Point::new(x, y))
}

#[wasm_bindgen]
impl World {
    /// `seed` drives tree placement; pass e.g. `Math.random() * 2 ** 32`.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64, seed: f64) -> World {
        crate::World::rs_new(width, height, seed_from(seed).unwrap_or(0))
    }

    pub fn title(&self) -> String {
        self.inner.title.clone()
    }
    pub fn set_title(&mut self, title: &str) {
        self.inner.title = title.to_string();
    }

    // Graph
    pub fn add_point(&mut self, x: f64, y: f64) -> Option<u32> {
        let p = check_xy(x, y).ok()?;
        self.inner.graph.try_add_point(p)
    }
    pub fn add_point_res(&mut self, x: f64, y: f64) -> JsValue {
        let p = match check_xy(x, y) {
            Ok(p) => p,
            Err(e) => return e,
        };
        match self.inner.graph.try_add_point(p) {
            Some(id) => error::ok(JsValue::from_f64(id as f64)),
            None => error::err("duplicate", "a point with these coordinates exists", None),
        }
    }
    pub fn move_point(&mut self, id: u32, x: f64, y: f64) -> bool {
        self.inner.graph.move_point(id, Point::new(x, y))
    }
    pub fn move_point_res(&mut self, id: u32, x: f64, y: f64) -> JsValue {
        let p = match check_xy(x, y) {
            Ok(p) => p,
            Err(e) => return e,
        };
        if self.inner.graph.point(id).is_none() {
            return error::invalid_id("point", id);
        }
        error::ok(JsValue::from_bool(self.inner.graph.move_point(id, p)))
    }
    pub fn get_point(&self, id: u32) -> JsValue {
        match self.inner.graph.point(id) {
            Some(p) => serde_wasm_bindgen::to_value(&p).unwrap_or(JsValue::NULL),
            None => JsValue::NULL,
        }
    }
    pub fn remove_point(&mut self, id: u32) -> bool {
        self.inner.graph.remove_point(id)
    }
    pub fn remove_point_res(&mut self, id: u32) -> JsValue {
        if self.inner.graph.point(id).is_none() {
            return error::invalid_id("point", id);
        }
        error::ok(JsValue::from_bool(self.inner.graph.remove_point(id)))
    }
    pub fn point_count(&self) -> u32 {
        self.inner.graph.point_count() as u32
    }
    pub fn add_segment(&mut self, a: u32, b: u32) -> Option<u32> {
        self.inner.graph.try_add_segment(a, b)
    }
    pub fn add_segment_res(&mut self, a: u32, b: u32) -> JsValue {
        if self.inner.graph.point(a).is_none() {
            return error::invalid_id("point", a);
        }
        if self.inner.graph.point(b).is_none() {
            return error::invalid_id("point", b);
        }
        match self.inner.graph.try_add_segment(a, b) {
            Some(id) => error::ok(JsValue::from_f64(id as f64)),
            None => error::err("invalid_segment", "segment is degenerate or already exists", None),
        }
    }
    pub fn remove_segment(&mut self, id: u32) -> bool {
        self.inner.graph.remove_segment(id)
    }
    pub fn remove_segment_res(&mut self, id: u32) -> JsValue {
        if self.inner.graph.edge(id).is_none() {
            return error::invalid_id("segment", id);
        }
        error::ok(JsValue::from_bool(self.inner.graph.remove_segment(id)))
    }
    pub fn segment_count(&self) -> u32 {
        self.inner.graph.segment_count() as u32
    }
    pub fn graph_hash(&self) -> u64 {
        self.inner.graph.hash()
    }
    /// Removes every point and segment.
    pub fn dispose(&mut self) {
        self.editor.dispose(&mut self.inner.graph);
    }

    // Typed arrays getters
    pub fn get_point_data(&self) -> JsValue {
        let mut ids = Vec::new();
        let mut pos = Vec::new();
        for (id, p) in self.inner.graph.points() {
            ids.push(id);
            pos.extend([p.x, p.y]);
        }
        let obj = new_obj();
        set_kv(&obj, "ids", &arr_u32(&ids).into());
        set_kv(&obj, "positions", &arr_f64(&pos).into());
        obj.into()
    }
    pub fn get_segment_data(&self) -> JsValue {
        let mut ids = Vec::new();
        let mut ends = Vec::new();
        for (id, e) in self.inner.graph.edges() {
            ids.push(id);
            ends.extend([e.a, e.b]);
        }
        let obj = new_obj();
        set_kv(&obj, "ids", &arr_u32(&ids).into());
        set_kv(&obj, "endpoints", &arr_u32(&ends).into());
        obj.into()
    }

    // Generation
    pub fn get_params(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.inner.params).unwrap_or(JsValue::NULL)
    }
    pub fn set_params_res(&mut self, params: JsValue) -> JsValue {
        let params: WorldParams = match serde_wasm_bindgen::from_value(params) {
            Ok(p) => p,
            Err(e) => return error::err("invalid_params", e.to_string(), None),
        };
        match self.inner.set_params(params) {
            Ok(()) => error::ok(JsValue::TRUE),
            Err(e) => error::generate_failed(&e),
        }
    }
    pub fn generate_res(&mut self) -> JsValue {
        match self.inner.generate() {
            Ok(()) => error::ok(JsValue::TRUE),
            Err(e) => error::generate_failed(&e),
        }
    }
    /// Rebuilds derived layers if the graph changed; returns whether it did.
    pub fn regenerate_if_changed(&mut self) -> bool {
        self.inner.regenerate_if_changed().unwrap_or(false)
    }
    pub fn regenerate_if_changed_res(&mut self) -> JsValue {
        match self.inner.regenerate_if_changed() {
            Ok(changed) => error::ok(JsValue::from_bool(changed)),
            Err(e) => error::generate_failed(&e),
        }
    }
    pub fn get_layers(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.inner.layers).unwrap_or(JsValue::NULL)
    }
    pub fn frame_count(&self) -> u64 {
        self.inner.frame_count()
    }
    pub fn update_lights(&mut self) {
        self.inner.update_lights();
    }

    // Markings
    pub fn marking_types(&self) -> Vec<String> {
        MarkingType::ALL.iter().map(|t| t.name().to_string()).collect()
    }
    /// Candidate marking under the world position, or null.
    pub fn marking_intent(&self, ty: &str, x: f64, y: f64) -> JsValue {
        let Some(ty) = MarkingType::from_name(ty) else {
            return JsValue::NULL;
        };
        match self.inner.marking_intent(ty, Point::new(x, y)) {
            Some(m) => serde_wasm_bindgen::to_value(&m.to_record()).unwrap_or(JsValue::NULL),
            None => JsValue::NULL,
        }
    }
    pub fn add_marking_res(&mut self, ty: &str, x: f64, y: f64) -> JsValue {
        let Some(kind) = MarkingType::from_name(ty) else {
            return error::unknown_marking(ty);
        };
        let p = match check_xy(x, y) {
            Ok(p) => p,
            Err(e) => return e,
        };
        let Some(m) = self.inner.marking_intent(kind, p) else {
            return error::ok(JsValue::FALSE);
        };
        error::ok(JsValue::from_bool(self.inner.add_marking(m)))
    }
    pub fn remove_marking_at(&mut self, x: f64, y: f64) -> bool {
        self.inner.remove_marking_at(Point::new(x, y)).is_some()
    }
    pub fn marking_count(&self) -> u32 {
        self.inner.markings.len() as u32
    }

    // Pointer input, screen coordinates
    pub fn pointer_move(&mut self, sx: f64, sy: f64) {
        let screen = Point::new(sx, sy);
        self.viewport.drag_to(screen);
        let mouse = self.viewport.get_mouse(screen, true);
        self.editor.mouse_move(&mut self.inner.graph, mouse, self.viewport.zoom);
    }
    /// `button`: 0 primary, 2 secondary (DOM numbering).
    pub fn pointer_down(&mut self, button: u8) {
        let b = match button {
            0 => MouseButton::Primary,
            2 => MouseButton::Secondary,
            _ => return,
        };
        self.editor.mouse_down(&mut self.inner.graph, b);
    }
    pub fn pointer_up(&mut self) {
        self.editor.mouse_up();
        self.viewport.end_drag();
        self.inner.offset = self.viewport.offset;
    }
    pub fn pan_start(&mut self, sx: f64, sy: f64) {
        self.viewport.start_drag(Point::new(sx, sy));
    }
    pub fn wheel(&mut self, delta_y: f64) {
        self.viewport.zoom_by(delta_y);
        self.inner.zoom = self.viewport.zoom;
    }
    pub fn zoom(&self) -> f64 {
        self.viewport.zoom
    }
    pub fn selected(&self) -> Option<u32> {
        self.editor.selected
    }
    pub fn hovered(&self) -> Option<u32> {
        self.editor.hovered
    }

    // Rendering
    /// One animation frame: regenerate if needed, step lights, draw world
    /// and editor overlay.
    pub fn frame(&mut self, ctx: &CanvasRenderingContext2d, width: f64, height: f64) -> JsValue {
        ctx.save();
        ctx.clear_rect(0.0, 0.0, width, height);
        let center = self.viewport.center;
        let offset = self.viewport.get_offset();
        let _ = ctx.translate(center.x, center.y);
        let _ = ctx.scale(1.0 / self.viewport.zoom, 1.0 / self.viewport.zoom);
        let _ = ctx.translate(offset.x, offset.y);

        let mut surface = CanvasSurface::new(ctx);
        let res = match self.inner.frame(&mut surface, self.viewport.view_point()) {
            Ok(changed) => {
                ctx.set_global_alpha(0.3);
                self.editor.display(&self.inner.graph, &mut surface);
                error::ok(JsValue::from_bool(changed))
            }
            Err(e) => error::generate_failed(&e),
        };
        ctx.restore();
        res
    }
    pub fn to_svg(&self) -> String {
        self.inner.to_svg(self.viewport.view_point())
    }

    // JSON
    pub fn to_json(&self) -> String {
        self.inner.to_json_value().to_string()
    }
    pub fn load_json_res(&mut self, text: &str, seed: f64) -> JsValue {
        let v: serde_json::Value = match serde_json::from_str(text) {
            Ok(v) => v,
            Err(e) => return error::err("invalid_json", e.to_string(), None),
        };
        match worldgen::World::from_json_value(v, seed_from(seed).unwrap_or(0)) {
            Ok(w) => {
                self.viewport.zoom = w.zoom.clamp(worldgen::viewport::MIN_ZOOM, worldgen::viewport::MAX_ZOOM);
                self.viewport.offset = w.offset;
                self.inner = w;
                self.editor = worldgen::editor::GraphEditor::new();
                error::ok(JsValue::TRUE)
            }
            Err(e) => error::invalid_json(&e),
        }
    }
}

//! [`Surface`] over a browser 2D canvas context.

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;
use worldgen::render::{LineCap, LineJoin, Surface};
use worldgen::Point;

pub struct CanvasSurface<'a> {
    ctx: &'a CanvasRenderingContext2d,
}

impl<'a> CanvasSurface<'a> {
    pub fn new(ctx: &'a CanvasRenderingContext2d) -> Self {
        CanvasSurface { ctx }
    }
}

fn join_name(j: LineJoin) -> &'static str {
    match j {
        LineJoin::Miter => "miter",
        LineJoin::Round => "round",
        LineJoin::Bevel => "bevel",
    }
}

fn cap_name(c: LineCap) -> &'static str {
    match c {
        LineCap::Butt => "butt",
        LineCap::Round => "round",
        LineCap::Square => "square",
    }
}

#[allow(deprecated)]
impl Surface for CanvasSurface<'_> {
    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }
    fn move_to(&mut self, p: Point) {
        self.ctx.move_to(p.x, p.y);
    }
    fn line_to(&mut self, p: Point) {
        self.ctx.line_to(p.x, p.y);
    }
    fn circle(&mut self, c: Point, r: f64) {
        self.ctx.move_to(c.x + r, c.y);
        let _ = self.ctx.arc(c.x, c.y, r, 0.0, TAU);
    }
    fn close_path(&mut self) {
        self.ctx.close_path();
    }
    fn fill(&mut self) {
        self.ctx.fill();
    }
    fn stroke(&mut self) {
        self.ctx.stroke();
    }
    fn set_fill_style(&mut self, style: &str) {
        self.ctx.set_fill_style(&JsValue::from_str(style));
    }
    fn set_stroke_style(&mut self, style: &str) {
        self.ctx.set_stroke_style(&JsValue::from_str(style));
    }
    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }
    fn set_line_join(&mut self, join: LineJoin) {
        self.ctx.set_line_join(join_name(join));
    }
    fn set_line_cap(&mut self, cap: LineCap) {
        self.ctx.set_line_cap(cap_name(cap));
    }
    fn set_line_dash(&mut self, dash: &[f64]) {
        let arr: js_sys::Array = dash.iter().map(|v| JsValue::from_f64(*v)).collect();
        let _ = self.ctx.set_line_dash(&arr);
    }
    fn fill_text(&mut self, text: &str, at: Point, angle: f64, size: f64, stretch: f64) {
        self.ctx.save();
        let _ = self.ctx.translate(at.x, at.y);
        let _ = self.ctx.rotate(angle);
        let _ = self.ctx.scale(1.0, stretch);
        self.ctx.set_font(&format!("bold {}px Arial", size));
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        let _ = self.ctx.fill_text(text, 0.0, 0.0);
        self.ctx.restore();
    }
}

//! Drawing sink abstraction and per-primitive styles.
//!
//! Geometry never talks to a concrete canvas. Everything drawable paints
//! through a [`Surface`], a small immediate-mode path API modelled on the
//! 2D canvas, so a browser canvas, an SVG writer or a test recorder can all
//! sit behind it.

use serde::{Deserialize, Serialize};

use crate::model::{Point, Segment};
use crate::primitives::envelope::Envelope;
use crate::primitives::polygon::Polygon;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

/// Style overrides. Unset fields fall back to the drawable's own default.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DrawOptions {
    pub size: Option<f64>,
    pub color: Option<String>,
    pub outline: Option<bool>,
    pub fill: Option<bool>,
    pub fill_style: Option<String>,
    pub stroke: Option<String>,
    pub line_width: Option<f64>,
    pub width: Option<f64>,
    pub dash: Option<Vec<f64>>,
    pub join: Option<LineJoin>,
    pub cap: Option<LineCap>,
}

impl DrawOptions {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn size(mut self, v: f64) -> Self {
        self.size = Some(v);
        self
    }
    pub fn color(mut self, v: &str) -> Self {
        self.color = Some(v.to_string());
        self
    }
    pub fn outline(mut self, v: bool) -> Self {
        self.outline = Some(v);
        self
    }
    pub fn fill(mut self, v: bool) -> Self {
        self.fill = Some(v);
        self
    }
    pub fn fill_style(mut self, v: &str) -> Self {
        self.fill_style = Some(v.to_string());
        self
    }
    pub fn stroke(mut self, v: &str) -> Self {
        self.stroke = Some(v.to_string());
        self
    }
    pub fn line_width(mut self, v: f64) -> Self {
        self.line_width = Some(v);
        self
    }
    pub fn width(mut self, v: f64) -> Self {
        self.width = Some(v);
        self
    }
    pub fn dash(mut self, v: &[f64]) -> Self {
        self.dash = Some(v.to_vec());
        self
    }
    pub fn join(mut self, v: LineJoin) -> Self {
        self.join = Some(v);
        self
    }
    pub fn cap(mut self, v: LineCap) -> Self {
        self.cap = Some(v);
        self
    }
}

/// A canvas-like immediate-mode target.
pub trait Surface {
    fn begin_path(&mut self);
    fn move_to(&mut self, p: Point);
    fn line_to(&mut self, p: Point);
    /// Adds a full circle to the current path.
    fn circle(&mut self, center: Point, radius: f64);
    fn close_path(&mut self);
    fn fill(&mut self);
    fn stroke(&mut self);

    fn set_fill_style(&mut self, style: &str);
    fn set_stroke_style(&mut self, style: &str);
    fn set_line_width(&mut self, width: f64);
    fn set_line_join(&mut self, join: LineJoin);
    fn set_line_cap(&mut self, cap: LineCap);
    fn set_line_dash(&mut self, dash: &[f64]);

    /// Centered text rotated by `angle` radians and stretched vertically by `stretch`.
    fn fill_text(&mut self, text: &str, at: Point, angle: f64, size: f64, stretch: f64);

    /// Named sprite centered at `at`. Surfaces without assets ignore it.
    fn draw_sprite(&mut self, _name: &str, _at: Point, _angle: f64) {}
}

/// Something that paints itself with caller-supplied style overrides.
pub trait Draw {
    fn draw(&self, surface: &mut dyn Surface, opts: &DrawOptions);
}

impl Draw for Point {
    fn draw(&self, s: &mut dyn Surface, opts: &DrawOptions) {
        let size = opts.size.unwrap_or(18.0);
        let color = opts.color.as_deref().unwrap_or("black");
        let rad = size / 2.0;
        s.begin_path();
        s.circle(*self, rad);
        s.set_fill_style(color);
        s.fill();
        if opts.outline.unwrap_or(false) {
            s.begin_path();
            s.set_line_width(2.0);
            s.set_stroke_style("yellow");
            s.circle(*self, rad * 0.6);
            s.stroke();
        }
        if opts.fill.unwrap_or(false) {
            s.begin_path();
            s.circle(*self, rad * 0.4);
            s.set_fill_style("yellow");
            s.fill();
        }
    }
}

impl Draw for Segment {
    fn draw(&self, s: &mut dyn Surface, opts: &DrawOptions) {
        s.begin_path();
        s.set_line_width(opts.width.unwrap_or(2.0));
        s.set_stroke_style(opts.color.as_deref().unwrap_or("black"));
        s.set_line_cap(opts.cap.unwrap_or_default());
        s.set_line_dash(opts.dash.as_deref().unwrap_or(&[]));
        s.move_to(self.p1);
        s.line_to(self.p2);
        s.stroke();
        s.set_line_dash(&[]);
    }
}

impl Draw for Polygon {
    fn draw(&self, s: &mut dyn Surface, opts: &DrawOptions) {
        let Some((first, rest)) = self.points.split_first() else {
            return;
        };
        s.begin_path();
        s.set_fill_style(opts.fill_style.as_deref().unwrap_or("rgba(0,0,255,0.3)"));
        s.set_stroke_style(opts.stroke.as_deref().unwrap_or("blue"));
        s.set_line_width(opts.line_width.unwrap_or(2.0));
        s.set_line_join(opts.join.unwrap_or_default());
        s.move_to(*first);
        for p in rest {
            s.line_to(*p);
        }
        s.close_path();
        s.fill();
        s.stroke();
    }
}

impl Draw for Envelope {
    fn draw(&self, s: &mut dyn Surface, opts: &DrawOptions) {
        self.poly.draw(s, opts);
    }
}

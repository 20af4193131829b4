use std::fmt::Write as _;

use crate::model::Point;
use crate::render::{LineCap, LineJoin, Surface};

/// A [`Surface`] that serialises every fill and stroke as an SVG element.
#[derive(Clone, Debug)]
pub struct SvgSurface {
    elements: Vec<String>,
    path: String,
    fill_style: String,
    stroke_style: String,
    line_width: f64,
    join: LineJoin,
    cap: LineCap,
    dash: Vec<f64>,
}

impl Default for SvgSurface {
    fn default() -> Self {
        SvgSurface {
            elements: Vec::new(),
            path: String::new(),
            fill_style: "black".to_string(),
            stroke_style: "black".to_string(),
            line_width: 1.0,
            join: LineJoin::Miter,
            cap: LineCap::Butt,
            dash: Vec::new(),
        }
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

fn escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn elements(&self) -> &[String] {
        &self.elements
    }

    /// Wraps the recorded elements in an `<svg>` root covering `view_box`
    /// (`min_x, min_y, width, height`).
    pub fn finish(&self, view_box: (f64, f64, f64, f64)) -> String {
        let (x, y, w, h) = view_box;
        let mut out = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{} {} {} {}\">",
            x, y, w, h
        );
        for e in &self.elements {
            out.push_str(e);
        }
        out.push_str("</svg>");
        out
    }
}

impl Surface for SvgSurface {
    fn begin_path(&mut self) {
        self.path.clear();
    }
    fn move_to(&mut self, p: Point) {
        let _ = write!(self.path, "M {} {} ", p.x, p.y);
    }
    fn line_to(&mut self, p: Point) {
        let _ = write!(self.path, "L {} {} ", p.x, p.y);
    }
    fn circle(&mut self, c: Point, r: f64) {
        // two half arcs; SVG has no single-command full circle
        let _ = write!(
            self.path,
            "M {} {} A {r} {r} 0 1 0 {} {} A {r} {r} 0 1 0 {} {} ",
            c.x - r,
            c.y,
            c.x + r,
            c.y,
            c.x - r,
            c.y,
            r = r
        );
    }
    fn close_path(&mut self) {
        self.path.push_str("Z ");
    }
    fn fill(&mut self) {
        if self.path.is_empty() {
            return;
        }
        self.elements.push(format!(
            "<path d=\"{}\" fill=\"{}\" stroke=\"none\"/>",
            self.path.trim_end(),
            escape(&self.fill_style)
        ));
    }
    fn stroke(&mut self) {
        if self.path.is_empty() {
            return;
        }
        let mut e = format!(
            "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" stroke-linejoin=\"{}\" stroke-linecap=\"{}\"",
            self.path.trim_end(),
            escape(&self.stroke_style),
            self.line_width,
            join_name(self.join),
            cap_name(self.cap)
        );
        if !self.dash.is_empty() {
            let d: Vec<String> = self.dash.iter().map(|v| v.to_string()).collect();
            let _ = write!(e, " stroke-dasharray=\"{}\"", d.join(" "));
        }
        e.push_str("/>");
        self.elements.push(e);
    }
    fn set_fill_style(&mut self, style: &str) {
        self.fill_style = style.to_string();
    }
    fn set_stroke_style(&mut self, style: &str) {
        self.stroke_style = style.to_string();
    }
    fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
    }
    fn set_line_join(&mut self, join: LineJoin) {
        self.join = join;
    }
    fn set_line_cap(&mut self, cap: LineCap) {
        self.cap = cap;
    }
    fn set_line_dash(&mut self, dash: &[f64]) {
        self.dash = dash.to_vec();
    }
    fn fill_text(&mut self, text: &str, at: Point, angle: f64, size: f64, stretch: f64) {
        self.elements.push(format!(
            "<text transform=\"translate({} {}) rotate({}) scale(1 {})\" font-family=\"Arial\" font-weight=\"bold\" font-size=\"{}\" text-anchor=\"middle\" dominant-baseline=\"middle\" fill=\"{}\">{}</text>",
            at.x,
            at.y,
            angle.to_degrees(),
            stretch,
            size,
            escape(&self.fill_style),
            escape(text)
        ));
    }
    fn draw_sprite(&mut self, name: &str, at: Point, angle: f64) {
        self.elements.push(format!(
            "<use href=\"#{}\" transform=\"translate({} {}) rotate({})\"/>",
            escape(name),
            at.x,
            at.y,
            angle.to_degrees()
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Segment;
    use crate::render::{Draw, DrawOptions};

    #[test]
    fn dashed_segment_becomes_stroked_path() {
        let mut s = SvgSurface::new();
        Segment::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0))
            .draw(&mut s, &DrawOptions::new().color("white").dash(&[10.0, 10.0]));
        assert_eq!(s.element_count(), 1);
        let e = &s.elements()[0];
        assert!(e.contains("d=\"M 0 0 L 10 0\""));
        assert!(e.contains("stroke=\"white\""));
        assert!(e.contains("stroke-dasharray=\"10 10\""));
    }

    #[test]
    fn text_is_escaped() {
        let mut s = SvgSurface::new();
        s.set_fill_style("white");
        s.fill_text("<P>", Point::new(1.0, 2.0), 0.0, 12.0, 3.0);
        assert!(s.elements()[0].contains("&lt;P&gt;"));
        let doc = s.finish((0.0, 0.0, 10.0, 10.0));
        assert!(doc.starts_with("<svg"));
        assert!(doc.ends_with("</svg>"));
    }
}

//! Road decals anchored to a segment.
//!
//! All variants share one footprint: a `width`-wide envelope around a
//! `height`-long support segment centred on `center` and aligned with
//! `direction_vector`. Only the way they paint differs, plus the traffic
//! light's state.

use serde::{Deserialize, Serialize};

use crate::model::{Point, Segment};
use crate::primitives::envelope::Envelope;
use crate::primitives::polygon::Polygon;
use crate::render::{Draw, DrawOptions, LineCap, Surface};

pub const LIGHT_HEIGHT: f64 = 18.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkingType {
    Start,
    Stop,
    Cross,
    Parking,
    Yield,
    Target,
    Light,
}

impl MarkingType {
    pub const ALL: [MarkingType; 7] = [
        MarkingType::Start,
        MarkingType::Stop,
        MarkingType::Cross,
        MarkingType::Parking,
        MarkingType::Yield,
        MarkingType::Target,
        MarkingType::Light,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MarkingType::Start => "start",
            MarkingType::Stop => "stop",
            MarkingType::Cross => "cross",
            MarkingType::Parking => "parking",
            MarkingType::Yield => "yield",
            MarkingType::Target => "target",
            MarkingType::Light => "light",
        }
    }

    pub fn from_name(name: &str) -> Option<MarkingType> {
        MarkingType::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Crossings sit on the graph skeleton; everything else on lane guides.
    pub fn targets_lane_guides(self) -> bool {
        !matches!(self, MarkingType::Cross)
    }

    /// Footprint `(width, height)` for a world with the given road width.
    pub fn size_for_road(self, road_width: f64) -> (f64, f64) {
        match self {
            MarkingType::Cross => (road_width, road_width / 2.0),
            _ => (road_width / 2.0, road_width / 2.0),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightState {
    #[default]
    Off,
    Green,
    Yellow,
    Red,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkingVariant {
    Start,
    Stop,
    Cross,
    Parking,
    Yield,
    Target,
    Light { state: LightState },
}

impl MarkingVariant {
    pub fn new(ty: MarkingType) -> Self {
        match ty {
            MarkingType::Start => MarkingVariant::Start,
            MarkingType::Stop => MarkingVariant::Stop,
            MarkingType::Cross => MarkingVariant::Cross,
            MarkingType::Parking => MarkingVariant::Parking,
            MarkingType::Yield => MarkingVariant::Yield,
            MarkingType::Target => MarkingVariant::Target,
            MarkingType::Light => MarkingVariant::Light { state: LightState::Off },
        }
    }

    pub fn ty(&self) -> MarkingType {
        match self {
            MarkingVariant::Start => MarkingType::Start,
            MarkingVariant::Stop => MarkingType::Stop,
            MarkingVariant::Cross => MarkingType::Cross,
            MarkingVariant::Parking => MarkingType::Parking,
            MarkingVariant::Yield => MarkingType::Yield,
            MarkingVariant::Target => MarkingType::Target,
            MarkingVariant::Light { .. } => MarkingType::Light,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Marking {
    pub variant: MarkingVariant,
    pub center: Point,
    pub direction_vector: Point,
    pub width: f64,
    pub height: f64,
    pub support: Segment,
    pub poly: Polygon,
}

/// Persisted form: placement only, geometry is rebuilt on load.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkingRecord {
    #[serde(rename = "type")]
    pub ty: MarkingType,
    pub center: Point,
    pub direction_vector: Point,
    pub width: f64,
    pub height: f64,
}

impl Marking {
    pub fn new(ty: MarkingType, center: Point, direction_vector: Point, width: f64, height: f64) -> Self {
        let height = if ty == MarkingType::Light { LIGHT_HEIGHT } else { height };
        let angle = direction_vector.angle();
        let support = Segment::new(
            center.translate(angle, height / 2.0),
            center.translate(angle, -height / 2.0),
        );
        let poly = Envelope::new(support, width, 1).poly;
        Marking {
            variant: MarkingVariant::new(ty),
            center,
            direction_vector,
            width,
            height,
            support,
            poly,
        }
    }

    pub fn ty(&self) -> MarkingType {
        self.variant.ty()
    }

    pub fn light_state(&self) -> Option<LightState> {
        match self.variant {
            MarkingVariant::Light { state } => Some(state),
            _ => None,
        }
    }

    /// No-op for anything but a light.
    pub fn set_light_state(&mut self, new_state: LightState) {
        if let MarkingVariant::Light { state } = &mut self.variant {
            *state = new_state;
        }
    }

    /// Painted edges of the footprint, per variant.
    pub fn borders(&self) -> Vec<Segment> {
        let seg = |i: usize| self.poly.segments.get(i).copied();
        match self.variant {
            MarkingVariant::Stop | MarkingVariant::Yield => seg(2).into_iter().collect(),
            MarkingVariant::Parking => [seg(0), seg(2)].into_iter().flatten().collect(),
            MarkingVariant::Light { .. } => seg(0).into_iter().collect(),
            _ => Vec::new(),
        }
    }

    pub fn to_record(&self) -> MarkingRecord {
        MarkingRecord {
            ty: self.ty(),
            center: self.center,
            direction_vector: self.direction_vector,
            width: self.width,
            height: self.height,
        }
    }

    pub fn from_record(r: &MarkingRecord) -> Self {
        Marking::new(r.ty, r.center, r.direction_vector, r.width, r.height)
    }

    fn text_angle(&self) -> f64 {
        self.direction_vector.angle() - std::f64::consts::FRAC_PI_2
    }

    pub fn draw(&self, s: &mut dyn Surface) {
        let white = DrawOptions::new().width(5.0).color("white");
        match self.variant {
            MarkingVariant::Stop | MarkingVariant::Yield | MarkingVariant::Parking => {
                for b in self.borders() {
                    b.draw(s, &white);
                }
                let (text, size) = match self.variant {
                    MarkingVariant::Stop => ("STOP", self.height * 0.3),
                    MarkingVariant::Yield => ("YIELD", self.height * 0.3),
                    _ => ("P", self.height * 0.9),
                };
                s.set_fill_style("white");
                s.fill_text(text, self.center, self.text_angle(), size, 3.0);
            }
            MarkingVariant::Cross => {
                let perp = self.direction_vector.perpendicular();
                let line = Segment::new(
                    self.center + perp * (self.width / 2.0),
                    self.center + perp * (-self.width / 2.0),
                );
                line.draw(
                    s,
                    &DrawOptions::new().width(self.height).color("white").dash(&[11.0, 11.0]),
                );
            }
            MarkingVariant::Target => {
                self.center.draw(s, &DrawOptions::new().color("red").size(30.0));
                self.center.draw(s, &DrawOptions::new().color("white").size(20.0));
                self.center.draw(s, &DrawOptions::new().color("red").size(10.0));
            }
            MarkingVariant::Start => {
                s.draw_sprite("car", self.center, self.text_angle());
            }
            MarkingVariant::Light { state } => self.draw_light(s, state),
        }
    }

    fn draw_light(&self, s: &mut dyn Surface, state: LightState) {
        let perp = self.direction_vector.perpendicular();
        let line = Segment::new(
            self.center + perp * (self.width / 2.0),
            self.center + perp * (-self.width / 2.0),
        );
        let green = line.p1.lerp(line.p2, 0.2);
        let yellow = line.p1.lerp(line.p2, 0.5);
        let red = line.p1.lerp(line.p2, 0.8);
        let bulb = self.height * 0.6;

        Segment::new(red, green).draw(s, &DrawOptions::new().width(self.height).cap(LineCap::Round));
        green.draw(s, &DrawOptions::new().size(bulb).color("#060"));
        yellow.draw(s, &DrawOptions::new().size(bulb).color("#660"));
        red.draw(s, &DrawOptions::new().size(bulb).color("#600"));

        match state {
            LightState::Green => green.draw(s, &DrawOptions::new().size(bulb).color("#0F0")),
            LightState::Yellow => yellow.draw(s, &DrawOptions::new().size(bulb).color("#FF0")),
            LightState::Red => red.draw(s, &DrawOptions::new().size(bulb).color("#F00")),
            LightState::Off => {}
        }
    }
}

impl Draw for Marking {
    fn draw(&self, s: &mut dyn Surface, _opts: &DrawOptions) {
        Marking::draw(self, s);
    }
}

/// A marking placement tool: turns a pointer position into a candidate
/// marking snapped onto the nearest target segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkingTool {
    pub ty: MarkingType,
    pub road_width: f64,
}

impl MarkingTool {
    pub fn new(ty: MarkingType, road_width: f64) -> Self {
        MarkingTool { ty, road_width }
    }

    /// Candidate marking for `mouse`, or `None` when no target segment is
    /// within `threshold` or the projection falls outside the segment.
    pub fn intent(&self, mouse: Point, targets: &[Segment], threshold: f64) -> Option<Marking> {
        let idx = crate::geometry::math::nearest_segment(mouse, targets, threshold)?;
        let seg = targets[idx];
        let proj = seg.project_point(mouse);
        if !(0.0..=1.0).contains(&proj.offset) {
            return None;
        }
        let (w, h) = self.ty.size_for_road(self.road_width);
        Some(Marking::new(self.ty, proj.point, seg.direction_vector(), w, h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::recorder::Recorder;

    #[test]
    fn footprint_is_aligned_with_direction() {
        let m = Marking::new(MarkingType::Stop, Point::new(0.0, 0.0), Point::new(1.0, 0.0), 50.0, 20.0);
        assert!((m.support.length() - 20.0).abs() < 1e-9);
        assert_eq!(m.poly.points.len(), 4);
        assert!(m.poly.contains_point(Point::new(5.0, 10.0)));
        assert!(!m.poly.contains_point(Point::new(15.0, 0.0)));
        assert_eq!(m.borders().len(), 1);
    }

    #[test]
    fn light_forces_height_and_tracks_state() {
        let mut m = Marking::new(MarkingType::Light, Point::new(0.0, 0.0), Point::new(0.0, 1.0), 50.0, 50.0);
        assert_eq!(m.height, LIGHT_HEIGHT);
        assert_eq!(m.light_state(), Some(LightState::Off));
        m.set_light_state(LightState::Green);
        assert_eq!(m.light_state(), Some(LightState::Green));
        let mut r = Recorder::default();
        m.draw(&mut r);
        assert!(r.calls.contains(&"fillStyle #0F0".to_string()));

        let mut stop = Marking::new(MarkingType::Stop, Point::new(0.0, 0.0), Point::new(0.0, 1.0), 50.0, 50.0);
        stop.set_light_state(LightState::Red);
        assert_eq!(stop.light_state(), None);
    }

    #[test]
    fn record_round_trip_rebuilds_geometry() {
        let m = Marking::new(MarkingType::Parking, Point::new(3.0, 4.0), Point::new(0.6, 0.8), 50.0, 50.0);
        let v = serde_json::to_value(m.to_record()).unwrap();
        assert_eq!(v["type"], "parking");
        assert!(v.get("directionVector").is_some());
        let back: MarkingRecord = serde_json::from_value(v).unwrap();
        assert_eq!(Marking::from_record(&back), m);
    }

    #[test]
    fn unknown_type_is_rejected() {
        let r: Result<MarkingRecord, _> = serde_json::from_value(serde_json::json!({
            "type": "banana", "center": {"x": 0.0, "y": 0.0},
            "directionVector": {"x": 1.0, "y": 0.0}, "width": 1.0, "height": 1.0
        }));
        assert!(r.is_err());
    }

    #[test]
    fn tool_snaps_to_nearest_segment() {
        let targets = [Segment::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0))];
        let tool = MarkingTool::new(MarkingType::Cross, 100.0);
        let m = tool.intent(Point::new(40.0, 5.0), &targets, 10.0).expect("intent");
        assert_eq!(m.center, Point::new(40.0, 0.0));
        assert_eq!((m.width, m.height), (100.0, 50.0));
        assert!(tool.intent(Point::new(40.0, 50.0), &targets, 10.0).is_none());
        assert!(tool.intent(Point::new(105.0, 0.0), &targets, 10.0).is_none());
    }

    #[test]
    fn names_round_trip() {
        for t in MarkingType::ALL {
            assert_eq!(MarkingType::from_name(t.name()), Some(t));
        }
        assert!(MarkingType::Stop.targets_lane_guides());
        assert!(!MarkingType::Cross.targets_lane_guides());
    }
}

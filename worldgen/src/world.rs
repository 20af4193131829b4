//! The generation pipeline and the world aggregate that drives it.
//!
//! [`generate`] is a pure function of a graph snapshot, the parameters and
//! the random stream used for tree scatter. [`World`] owns those inputs
//! together with the user's markings and decides when to call it: once per
//! frame it compares [`Graph::hash`] with the hash of the last generated
//! graph and rebuilds every derived layer wholesale on a mismatch.

use std::cmp::Ordering;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::algorithms::buildings::generate_buildings;
use crate::algorithms::lights;
use crate::algorithms::picking::pick_marking;
use crate::algorithms::trees::generate_trees;
use crate::algorithms::union::union;
use crate::config::WorldParams;
use crate::error::{GenerateError, LoadError};
use crate::geometry::limits;
use crate::items::{Building, Tree};
use crate::json;
use crate::markings::{Marking, MarkingTool, MarkingType};
use crate::model::{Point, Segment};
use crate::primitives::envelope::Envelope;
use crate::primitives::polygon::{bbox_of, Polygon};
use crate::render::{Draw, DrawOptions, Surface};
use crate::svg::SvgSurface;
use crate::Graph;

pub const DEFAULT_TITLE: &str = "World Editor";

/// Everything derived from the graph by one generation pass.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldLayers {
    pub envelopes: Vec<Envelope>,
    pub road_borders: Vec<Segment>,
    pub buildings: Vec<Building>,
    pub trees: Vec<Tree>,
    pub lane_guides: Vec<Segment>,
}

fn corridors(skeleton: &[Segment], width: f64, roundness: u32) -> Vec<Envelope> {
    skeleton.iter().map(|s| Envelope::new(*s, width, roundness)).collect()
}

fn outline(envelopes: &[Envelope]) -> Vec<Segment> {
    let mut polys: Vec<Polygon> = envelopes.iter().map(|e| e.poly.clone()).collect();
    union(&mut polys)
}

/// Rebuilds every derived layer from `graph`.
///
/// Roads, borders, buildings and lane guides depend only on the graph and
/// `params`; trees additionally consume draws from `rng`.
pub fn generate<R: Rng + ?Sized>(
    graph: &Graph,
    params: &WorldParams,
    rng: &mut R,
) -> Result<WorldLayers, GenerateError> {
    params.validate()?;
    let skeleton: Vec<Segment> = graph.segments().map(|(_, s)| s).collect();

    let envelopes = corridors(&skeleton, params.road_width, params.road_roundness);
    let road_borders = outline(&envelopes);
    let buildings = generate_buildings(&skeleton, params)?;
    let trees = generate_trees(&road_borders, &buildings, &envelopes, params.tree_size, rng);
    let lane_guides = outline(&corridors(&skeleton, params.road_width / 2.0, params.road_roundness));

    log::debug!(
        "generated {} envelopes, {} borders, {} buildings, {} trees, {} lane guides",
        envelopes.len(),
        road_borders.len(),
        buildings.len(),
        trees.len(),
        lane_guides.len()
    );
    Ok(WorldLayers { envelopes, road_borders, buildings, trees, lane_guides })
}

enum Item<'a> {
    Building(&'a Building),
    Tree(&'a Tree),
}

impl Item<'_> {
    fn base(&self) -> &Polygon {
        match self {
            Item::Building(b) => &b.base,
            Item::Tree(t) => &t.base,
        }
    }

    fn draw(&self, s: &mut dyn Surface, view_point: Point) {
        match self {
            Item::Building(b) => b.draw(s, view_point),
            Item::Tree(t) => t.draw(s, view_point),
        }
    }
}

/// The editable world: graph, parameters, derived layers and markings.
#[derive(Clone, Debug)]
pub struct World {
    pub title: String,
    pub graph: Graph,
    pub params: WorldParams,
    pub layers: WorldLayers,
    pub markings: Vec<Marking>,
    pub zoom: f64,
    pub offset: Point,
    rng: StdRng,
    last_hash: Option<u64>,
    frame_count: u64,
}

impl World {
    /// A world over `graph`, generated once up front. `seed` fixes the
    /// tree scatter stream.
    pub fn new(graph: Graph, params: WorldParams, seed: u64) -> Result<World, GenerateError> {
        let mut w = World { graph, params, ..World::empty(seed) };
        w.generate()?;
        Ok(w)
    }

    /// A world with an empty graph and default parameters.
    pub fn empty(seed: u64) -> World {
        let graph = Graph::new();
        let last_hash = Some(graph.hash());
        World {
            title: DEFAULT_TITLE.to_string(),
            graph,
            params: WorldParams::default(),
            layers: WorldLayers::default(),
            markings: Vec::new(),
            zoom: 1.0,
            offset: Point::new(0.0, 0.0),
            rng: StdRng::seed_from_u64(seed),
            last_hash,
            frame_count: 0,
        }
    }

    pub fn generate(&mut self) -> Result<(), GenerateError> {
        self.layers = generate(&self.graph, &self.params, &mut self.rng)?;
        self.last_hash = Some(self.graph.hash());
        Ok(())
    }

    /// Rebuilds the layers when the graph changed since the last pass.
    pub fn regenerate_if_changed(&mut self) -> Result<bool, GenerateError> {
        if self.last_hash == Some(self.graph.hash()) {
            return Ok(false);
        }
        self.generate()?;
        Ok(true)
    }

    /// Replaces the parameters and regenerates. On error nothing changes.
    pub fn set_params(&mut self, params: WorldParams) -> Result<(), GenerateError> {
        params.validate()?;
        let prev = std::mem::replace(&mut self.params, params);
        if let Err(e) = self.generate() {
            self.params = prev;
            return Err(e);
        }
        Ok(())
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Segments a marking of type `ty` snaps onto.
    pub fn marking_targets(&self, ty: MarkingType) -> Vec<Segment> {
        if ty.targets_lane_guides() {
            self.layers.lane_guides.clone()
        } else {
            self.graph.segments().map(|(_, s)| s).collect()
        }
    }

    pub fn marking_tool(&self, ty: MarkingType) -> MarkingTool {
        MarkingTool::new(ty, self.params.road_width)
    }

    /// Candidate marking of type `ty` under `mouse`, picking within
    /// `10 * zoom` world units.
    pub fn marking_intent(&self, ty: MarkingType, mouse: Point) -> Option<Marking> {
        let targets = self.marking_targets(ty);
        self.marking_tool(ty)
            .intent(mouse, &targets, crate::geometry::tolerance::PICK_RADIUS * self.zoom)
    }

    pub fn add_marking(&mut self, m: Marking) -> bool {
        if self.markings.len() >= limits::MAX_MARKINGS {
            return false;
        }
        self.markings.push(m);
        true
    }

    /// Removes the first marking whose footprint contains `p`.
    pub fn remove_marking_at(&mut self, p: Point) -> Option<Marking> {
        let i = pick_marking(&self.markings, p)?;
        Some(self.markings.remove(i))
    }

    /// Advances the frame counter and cycles traffic lights.
    pub fn update_lights(&mut self) {
        let intersections = self.graph.intersections();
        lights::update_lights(&mut self.markings, &intersections, self.frame_count);
        self.frame_count += 1;
    }

    /// Draws every layer back to front.
    pub fn draw(&self, s: &mut dyn Surface, view_point: Point) {
        let road = DrawOptions::new().fill_style("#BBB").stroke("#BBB").line_width(15.0);
        for env in &self.layers.envelopes {
            env.draw(s, &road);
        }
        for m in &self.markings {
            m.draw(s);
        }
        let centre_line = DrawOptions::new().color("white").width(4.0).dash(&[10.0, 10.0]);
        for (_, seg) in self.graph.segments() {
            seg.draw(s, &centre_line);
        }
        let border = DrawOptions::new().color("white").width(4.0);
        for seg in &self.layers.road_borders {
            seg.draw(s, &border);
        }

        let mut items: Vec<Item> = self
            .layers
            .buildings
            .iter()
            .map(Item::Building)
            .chain(self.layers.trees.iter().map(Item::Tree))
            .collect();
        items.sort_by(|a, b| {
            b.base()
                .distance_to_point(view_point)
                .partial_cmp(&a.base().distance_to_point(view_point))
                .unwrap_or(Ordering::Equal)
        });
        for item in &items {
            item.draw(s, view_point);
        }
    }

    /// One frame of the editor loop: regenerate if needed, step the lights,
    /// draw. Returns whether a regeneration happened.
    pub fn frame(&mut self, s: &mut dyn Surface, view_point: Point) -> Result<bool, GenerateError> {
        let changed = self.regenerate_if_changed()?;
        self.update_lights();
        self.draw(s, view_point);
        Ok(changed)
    }

    /// Bounding box of everything drawn, as `(min_x, min_y, width, height)`.
    pub fn view_box(&self) -> (f64, f64, f64, f64) {
        let half = self.params.road_width / 2.0;
        let pts = self
            .layers
            .envelopes
            .iter()
            .flat_map(|e| e.poly.points.iter().copied())
            .chain(self.layers.buildings.iter().flat_map(|b| b.base.points.iter().copied()))
            .chain(self.layers.trees.iter().flat_map(|t| t.base.points.iter().copied()))
            .chain(self.graph.points().map(|(_, p)| p));
        match bbox_of(pts) {
            Some((x0, y0, x1, y1)) => (x0 - half, y0 - half, x1 - x0 + 2.0 * half, y1 - y0 + 2.0 * half),
            None => (0.0, 0.0, 0.0, 0.0),
        }
    }

    pub fn to_svg(&self, view_point: Point) -> String {
        let mut s = SvgSurface::new();
        self.draw(&mut s, view_point);
        s.finish(self.view_box())
    }

    pub fn to_json_value(&self) -> Value {
        json::world_to_json(self)
    }

    /// Restores a saved world. Stored layers are kept as saved; the next
    /// regeneration only happens once the graph is edited.
    pub fn from_json_value(v: Value, seed: u64) -> Result<World, LoadError> {
        let parts = json::world_from_json(v)?;
        let last_hash = Some(parts.graph.hash());
        Ok(World {
            title: parts.title,
            graph: parts.graph,
            params: parts.params,
            layers: parts.layers,
            markings: parts.markings,
            zoom: parts.zoom,
            offset: parts.offset,
            rng: StdRng::seed_from_u64(seed),
            last_hash,
            frame_count: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markings::LightState;
    use crate::render::recorder::Recorder;

    fn cross() -> Graph {
        let mut g = Graph::new();
        let c = g.add_point(Point::new(0.0, 0.0));
        for (x, y) in [(400.0, 0.0), (-400.0, 0.0), (0.0, 400.0)] {
            let q = g.add_point(Point::new(x, y));
            g.try_add_segment(c, q);
        }
        g
    }

    #[test]
    fn empty_graph_generates_nothing() {
        let mut rng = StdRng::seed_from_u64(0);
        let layers = generate(&Graph::new(), &WorldParams::default(), &mut rng).unwrap();
        assert_eq!(layers, WorldLayers::default());
    }

    #[test]
    fn empty_world_needs_no_pass() {
        let mut w = World::empty(0);
        assert!(!w.regenerate_if_changed().unwrap());
        w.graph.add_point(Point::new(1.0, 1.0));
        assert!(w.regenerate_if_changed().unwrap());
        assert_eq!(w.layers, WorldLayers::default());
    }

    #[test]
    fn invalid_params_fail_generation() {
        let params = WorldParams { road_width: -1.0, ..WorldParams::default() };
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            generate(&cross(), &params, &mut rng),
            Err(GenerateError::Params(_))
        ));
    }

    #[test]
    fn one_envelope_per_segment() {
        let w = World::new(cross(), WorldParams::default(), 1).unwrap();
        assert_eq!(w.title, "World Editor");
        assert_eq!(w.layers.envelopes.len(), 3);
        assert!(!w.layers.road_borders.is_empty());
        assert!(!w.layers.lane_guides.is_empty());
        assert!(!w.layers.buildings.is_empty());
    }

    #[test]
    fn regenerates_only_on_change() {
        let mut w = World::new(cross(), WorldParams::default(), 1).unwrap();
        assert!(!w.regenerate_if_changed().unwrap());
        let p = w.graph.add_point(Point::new(0.0, -400.0));
        w.graph.try_add_segment(0, p);
        assert!(w.regenerate_if_changed().unwrap());
        assert_eq!(w.layers.envelopes.len(), 4);
        assert!(!w.regenerate_if_changed().unwrap());
    }

    #[test]
    fn rejected_params_keep_the_old_ones() {
        let mut w = World::new(cross(), WorldParams::default(), 1).unwrap();
        let bad = WorldParams { tree_size: f64::NAN, ..WorldParams::default() };
        assert!(w.set_params(bad).is_err());
        assert_eq!(w.params, WorldParams::default());
    }

    #[test]
    fn markings_target_guides_except_cross() {
        let w = World::new(cross(), WorldParams::default(), 1).unwrap();
        assert_eq!(w.marking_targets(MarkingType::Cross).len(), 3);
        assert_eq!(w.marking_targets(MarkingType::Stop), w.layers.lane_guides);
    }

    #[test]
    fn place_and_remove_marking() {
        let mut w = World::new(cross(), WorldParams::default(), 1).unwrap();
        let m = w.marking_intent(MarkingType::Cross, Point::new(200.0, 3.0)).unwrap();
        assert_eq!(m.center, Point::new(200.0, 0.0));
        assert_eq!((m.width, m.height), (100.0, 50.0));
        assert!(w.add_marking(m));
        assert!(w.remove_marking_at(Point::new(300.0, 300.0)).is_none());
        assert!(w.remove_marking_at(Point::new(200.0, 10.0)).is_some());
        assert!(w.markings.is_empty());
    }

    #[test]
    fn lights_cycle_with_frames() {
        let mut w = World::new(cross(), WorldParams::default(), 1).unwrap();
        let dir = Point::new(1.0, 0.0);
        w.add_marking(Marking::new(MarkingType::Light, Point::new(60.0, 0.0), dir, 50.0, 50.0));
        w.add_marking(Marking::new(MarkingType::Light, Point::new(-60.0, 0.0), dir, 50.0, 50.0));
        w.update_lights();
        assert_eq!(w.frame_count(), 1);
        assert_eq!(w.markings[0].light_state(), Some(LightState::Green));
        assert_eq!(w.markings[1].light_state(), Some(LightState::Red));
        for _ in 0..180 {
            w.update_lights();
        }
        // frame 180 is tick 3: second light's turn
        assert_eq!(w.markings[0].light_state(), Some(LightState::Red));
        assert_eq!(w.markings[1].light_state(), Some(LightState::Green));
    }

    #[test]
    fn draw_order_is_back_to_front() {
        let w = World::new(cross(), WorldParams::default(), 1).unwrap();
        let mut r = Recorder::default();
        w.draw(&mut r, Point::new(0.0, 0.0));
        let first_road = r.calls.iter().position(|c| c == "fillStyle #BBB").unwrap();
        let first_roof = r.calls.iter().position(|c| c == "fillStyle #D44").unwrap();
        assert!(first_road < first_roof);
        assert_eq!(r.count("dash [10.0, 10.0]"), 3);
    }

    #[test]
    fn svg_has_a_view_box() {
        let w = World::new(cross(), WorldParams::default(), 1).unwrap();
        let svg = w.to_svg(Point::new(0.0, 0.0));
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("stroke-dasharray=\"10 10\""));
        let empty = World::new(Graph::new(), WorldParams::default(), 1).unwrap();
        assert!(empty.to_svg(Point::new(0.0, 0.0)).contains("viewBox=\"0 0 0 0\""));
    }

    #[test]
    fn json_round_trip_keeps_layers() {
        let mut w = World::new(cross(), WorldParams::default(), 5).unwrap();
        w.add_marking(Marking::new(MarkingType::Stop, Point::new(100.0, 25.0), Point::new(1.0, 0.0), 50.0, 50.0));
        w.zoom = 2.0;
        let v = w.to_json_value();
        assert!(v.get("roadBorders").is_some());
        assert_eq!(v["roadWidth"], serde_json::json!(100.0));
        let mut back = World::from_json_value(v, 9).unwrap();
        assert_eq!(back.layers, w.layers);
        assert_eq!(back.markings, w.markings);
        assert_eq!(back.zoom, 2.0);
        assert_eq!(back.graph.hash(), w.graph.hash());
        assert!(!back.regenerate_if_changed().unwrap());
    }
}

use proptest::prelude::*;
use worldgen::{Envelope, Graph, Point, Polygon, Segment};

#[derive(Clone, Debug)]
enum Op {
    AddPoint { x: i16, y: i16 },
    MovePoint { idx: u16, x: i16, y: i16 },
    RemovePoint { idx: u16 },
    AddSegment { a: u16, b: u16 },
    RemoveSegment { idx: u16 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (-50i16..50, -50i16..50).prop_map(|(x, y)| Op::AddPoint { x, y }),
        (any::<u16>(), -50i16..50, -50i16..50).prop_map(|(idx, x, y)| Op::MovePoint { idx, x, y }),
        any::<u16>().prop_map(|idx| Op::RemovePoint { idx }),
        (any::<u16>(), any::<u16>()).prop_map(|(a, b)| Op::AddSegment { a, b }),
        any::<u16>().prop_map(|idx| Op::RemoveSegment { idx }),
    ]
}

fn pick<T: Copy>(items: &[T], idx: u16) -> Option<T> {
    if items.is_empty() {
        return None;
    }
    Some(items[idx as usize % items.len()])
}

fn apply_op(g: &mut Graph, op: Op) {
    let points: Vec<u32> = g.points().map(|(id, _)| id).collect();
    let edges: Vec<u32> = g.edges().map(|(id, _)| id).collect();
    match op {
        Op::AddPoint { x, y } => {
            g.try_add_point(Point::new(x as f64 * 10.0, y as f64 * 10.0));
        }
        Op::MovePoint { idx, x, y } => {
            let target = Point::new(x as f64 * 10.0, y as f64 * 10.0);
            if let Some(id) = pick(&points, idx) {
                // dragging onto an existing point would break uniqueness
                if g.contains_point(target).is_none() {
                    g.move_point(id, target);
                }
            }
        }
        Op::RemovePoint { idx } => {
            if let Some(id) = pick(&points, idx) {
                g.remove_point(id);
            }
        }
        Op::AddSegment { a, b } => {
            if let (Some(a), Some(b)) = (pick(&points, a), pick(&points, b)) {
                g.try_add_segment(a, b);
            }
        }
        Op::RemoveSegment { idx } => {
            if let Some(id) = pick(&edges, idx) {
                g.remove_segment(id);
            }
        }
    }
}

proptest! {
    #[test]
    fn graph_invariants_hold(ops in proptest::collection::vec(op_strategy(), 1..80)) {
        let mut g = Graph::new();
        for op in ops {
            apply_op(&mut g, op);

            for (_, e) in g.edges() {
                prop_assert!(g.point(e.a).is_some());
                prop_assert!(g.point(e.b).is_some());
            }
            let segs: Vec<Segment> = g.segments().map(|(_, s)| s).collect();
            prop_assert_eq!(segs.len(), g.segment_count());
            for (i, s) in segs.iter().enumerate() {
                prop_assert!(s.p1 != s.p2);
                for t in &segs[i + 1..] {
                    prop_assert!(s != t);
                }
            }
            let pts: Vec<Point> = g.points().map(|(_, p)| p).collect();
            for (i, p) in pts.iter().enumerate() {
                prop_assert!(!pts[i + 1..].contains(p));
            }
            prop_assert_eq!(g.clone().hash(), g.hash());
        }
    }

    #[test]
    fn polygon_segments_wind(coords in proptest::collection::vec((-1000i32..1000, -1000i32..1000), 1..40)) {
        let points: Vec<Point> = coords.iter().map(|&(x, y)| Point::new(x as f64, y as f64)).collect();
        let poly = Polygon::new(points.clone());
        prop_assert_eq!(poly.segments.len(), points.len());
        for (i, s) in poly.segments.iter().enumerate() {
            prop_assert_eq!(s.p1, points[i]);
            prop_assert_eq!(s.p2, poly.segments[(i + 1) % points.len()].p1);
        }
    }

    #[test]
    fn envelope_surrounds_its_skeleton(
        x1 in -500.0f64..500.0, y1 in -500.0f64..500.0,
        dx in 1.0f64..300.0, dy in -300.0f64..300.0,
        width in 2.0f64..200.0, roundness in 1u32..16,
    ) {
        let s = Segment::new(Point::new(x1, y1), Point::new(x1 + dx, y1 + dy));
        let env = Envelope::new(s, width, roundness);
        prop_assert_eq!(env.poly.points.len(), 2 * (roundness as usize + 1));
        for p in &env.poly.points {
            prop_assert!((s.distance_to_point(*p) - width / 2.0).abs() < 1e-6);
        }
    }
}

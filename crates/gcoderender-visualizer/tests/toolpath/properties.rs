use gcoderender_core::{Axis, AxisValues};
use gcoderender_visualizer::{
    AxisUpdate, BoundsAccumulator, CoordinateState, ToolpathParser, FLOATS_PER_VERTEX,
};
use glam::Vec3;
use proptest::prelude::*;

/// Absolute target `(x, y, z, e)` per move, three decimals like slicer output
fn moves() -> impl Strategy<Value = Vec<(f64, f64, f64, f64)>> {
    let coord = (-20_000i32..20_000).prop_map(|v| v as f64 / 100.0);
    let height = (0i32..5_000).prop_map(|v| v as f64 / 100.0);
    let extrude = (0i32..1_000).prop_map(|v| v as f64 / 100.0);
    prop::collection::vec((coord.clone(), coord, height, extrude), 0..60)
}

fn to_gcode(moves: &[(f64, f64, f64, f64)]) -> String {
    moves
        .iter()
        .map(|(x, y, z, e)| format!("G1 X{} Y{} Z{} E{}\n", x, y, z, e))
        .collect()
}

fn axis_values() -> impl Strategy<Value = AxisValues> {
    let v = -1_000.0f64..1_000.0;
    (v.clone(), v.clone(), v.clone(), v).prop_map(|(x, y, z, e)| AxisValues::new(x, y, z, e))
}

fn approx_eq(a: AxisValues, b: AxisValues) -> bool {
    let d = a - b;
    [d.x, d.y, d.z, d.e].iter().all(|v| v.abs() < 1e-9)
}

proptest! {
    #[test]
    fn prop_geometry_counts_follow_deposits(moves in moves()) {
        let model = ToolpathParser::default().parse_str(&to_gcode(&moves)).unwrap();

        let mut expected = 0usize;
        let mut prev = (0.0, 0.0, 0.0);
        for &(x, y, _, e) in &moves {
            if e > prev.2 && (x != prev.0 || y != prev.1) {
                expected += 1;
            }
            prev = (x, y, e);
        }

        prop_assert_eq!(model.stats().deposits, expected);
        prop_assert_eq!(model.vertex_count(), 2 * 6 * expected);
        prop_assert_eq!(model.index_count(), 6 * 6 * expected);
        prop_assert!(model.vertex_count() <= model.vertex_capacity());
        prop_assert!(model.indices().iter().all(|&i| (i as usize) < model.vertex_count()));
    }

    #[test]
    fn prop_normals_are_unit(moves in moves()) {
        let model = ToolpathParser::default().parse_str(&to_gcode(&moves)).unwrap();
        for vertex in model.vertices().chunks_exact(FLOATS_PER_VERTEX) {
            let normal = Vec3::new(vertex[3], vertex[4], vertex[5]);
            prop_assert!((normal.length() - 1.0).abs() < 1e-4, "normal {:?}", normal);
        }
    }

    #[test]
    fn prop_bounding_box_never_shrinks(
        points in prop::collection::vec((-500.0f32..500.0, -500.0f32..500.0, 0.0f32..300.0), 1..100)
    ) {
        let mut acc = BoundsAccumulator::new(None);
        let mut previous = None;
        for (x, y, z) in points {
            let point = Vec3::new(x, y, z);
            acc.include(point);
            let current = acc.bounds().unwrap();
            prop_assert!(current.contains(point));
            if let Some(prev) = previous {
                prop_assert!(current.contains_box(&prev));
            }
            previous = Some(current);
        }
    }

    #[test]
    fn prop_position_reset_preserves_absolute(
        start in axis_values(),
        offset in axis_values(),
        target in axis_values(),
    ) {
        let state = CoordinateState {
            working: start,
            offset,
            ..CoordinateState::new()
        };
        let before = state.absolute();

        let update = Axis::POSITIONAL
            .iter()
            .fold(AxisUpdate::default(), |u, &axis| u.with(axis, target.get(axis).unwrap()));
        let reset = state.reset_position(&update);

        prop_assert_eq!(reset.working, target);
        prop_assert!(approx_eq(reset.offset, offset + (start - target)));
        prop_assert!(approx_eq(reset.absolute(), before));

        // a move naming no axes stays where it was
        let idle = reset.moved_to(reset.resolve(&AxisUpdate::default()));
        prop_assert!(approx_eq(idle.absolute(), before));
    }

    #[test]
    fn prop_relative_move_matches_absolute_target(
        (x0, y0) in (-10_000i32..10_000, -10_000i32..10_000),
        (dx, dy) in (-10_000i32..10_000, -10_000i32..10_000),
    ) {
        let (x0, y0) = (x0 as f64 / 100.0, y0 as f64 / 100.0);
        let (dx, dy) = (dx as f64 / 100.0, dy as f64 / 100.0);

        let relative = format!("G1 X{} Y{} E1\nG91\nG1 X{} Y{} E1\n", x0, y0, dx, dy);
        let absolute = format!("G1 X{} Y{} E1\nG1 X{} Y{} E2\n", x0, y0, x0 + dx, y0 + dy);

        let parser = ToolpathParser::default();
        let rel = parser.parse_str(&relative).unwrap();
        let abs = parser.parse_str(&absolute).unwrap();

        prop_assert_eq!(rel.vertices(), abs.vertices());
        prop_assert_eq!(rel.bounding_box(), abs.bounding_box());
        prop_assert_eq!(rel.stats().deposits, abs.stats().deposits);
    }
}

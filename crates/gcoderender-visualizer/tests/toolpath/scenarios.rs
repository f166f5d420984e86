use gcoderender_core::{DepositRule, Error, GcodeError, PrintMode};
use gcoderender_visualizer::{
    MotionKind, ParserOptions, ToolpathParser, TubeMeshConfig, FLOATS_PER_VERTEX,
};
use glam::Vec3;

fn parse(text: &str) -> gcoderender_core::Result<gcoderender_visualizer::ToolpathModel> {
    ToolpathParser::default().parse_str(text)
}

#[test]
fn test_each_deposit_emits_one_tube() {
    let model = parse("G1 X10 Y0 Z0 E1\nG1 X10 Y10 Z0 E2\n").unwrap();

    assert_eq!(model.stats().deposits, 2);
    assert_eq!(model.vertex_count(), 2 * 12);
    assert_eq!(model.index_count(), 2 * 36);
    assert_eq!(model.vertices().len(), 2 * 12 * FLOATS_PER_VERTEX);

    let bbox = model.bounding_box().unwrap();
    assert_eq!(bbox.min, Vec3::new(0.0, 0.0, 0.0));
    assert_eq!(bbox.max, Vec3::new(10.0, 10.0, 0.0));
}

#[test]
fn test_lone_retract_has_no_geometry() {
    let model = parse("G1 E-1\n").unwrap();
    assert_eq!(model.stats().retracts, 1);
    assert_eq!(model.vertex_count(), 0);
    assert_eq!(model.index_count(), 0);
    assert!(model.bounding_box().is_none());
}

#[test]
fn test_inches_anywhere_fails() {
    let text = "G21\nG1 X10 Y0 E1\nG1 X10 Y10 E2\nG20\nG1 X0 Y0 E3\n";
    match parse(text) {
        Err(Error::Gcode(GcodeError::UnsupportedUnits { line_number, .. })) => {
            assert_eq!(line_number, 4)
        }
        other => panic!("expected UnsupportedUnits, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_travel_retract_restore_sequence() {
    let text = "\
G1 X10 Y10 E1
G1 E0.2
G0 X20 Y20
G1 E1
G1 X30 Y20 E2
";
    let stats = parse(text).unwrap().stats().clone();
    assert_eq!(stats.deposits, 2);
    assert_eq!(stats.retracts, 1);
    assert_eq!(stats.travels, 1);
    assert_eq!(stats.restores, 1);
}

#[test]
fn test_relative_positioning() {
    let absolute = parse("G1 X5 Y5 E1\nG1 X8 Y9 E3\n").unwrap();
    let relative = parse("G1 X5 Y5 E1\nG91\nG1 X3 Y4 E2\n").unwrap();
    assert_eq!(absolute.vertices(), relative.vertices());
    assert_eq!(absolute.bounding_box(), relative.bounding_box());
}

#[test]
fn test_position_reset_keeps_geometry_continuous() {
    // Z hop and extruder reset between two lines
    let text = "\
G1 X10 Y0 Z0.2 E1
G92 E0
G1 X20 Y0 E1
";
    let model = parse(text).unwrap();
    assert_eq!(model.stats().deposits, 2);
    let bbox = model.bounding_box().unwrap();
    assert_eq!(bbox.max, Vec3::new(20.0, 0.0, 0.2));
}

#[test]
fn test_bare_g92_zeroes_all_axes() {
    let text = "G1 X10 Y10 E5\nG92\nG1 X5 Y0 E1\n";
    let model = parse(text).unwrap();
    // working X5 after the reset is absolute X15
    let bbox = model.bounding_box().unwrap();
    assert_eq!(bbox.max.x, 15.0);
    assert_eq!(bbox.min.y, 0.0);
    assert_eq!(bbox.max.y, 10.0);
}

#[test]
fn test_unknown_axis_ignored() {
    let model = parse("G1 X10 Y0 A5 E1\n").unwrap();
    assert_eq!(model.stats().unknown_axes, 1);
    assert_eq!(model.stats().deposits, 1);
}

#[test]
fn test_lowercase_commands() {
    let model = parse("g1 x10 y0 e1\n").unwrap();
    assert_eq!(model.stats().deposits, 1);
}

#[test]
fn test_line_numbers_and_checksums() {
    let model = parse("N1 G1 X10 Y0 E1*44\nN2 G1 X10 Y10 E2*45\n").unwrap();
    assert_eq!(model.stats().deposits, 2);
}

#[test]
fn test_section_markers_gate_interpretation() {
    let text = "\
G1 X1 Y1 E1
; skirt
G1 X2 Y1 E2
; support-start
G1 X100 Y100 E3
; CONTOUR
G1 X3 Y1 E4
";
    let model = parse(text).unwrap();
    assert_eq!(model.stats().skipped_lines, 1);
    assert_eq!(model.stats().deposits, 3);
    assert_eq!(model.bounding_box().unwrap().max, Vec3::new(3.0, 1.0, 0.0));
}

#[test]
fn test_extrusion_only_rule() {
    let text = "G1 X10 Y10 E1\nG1 Z5 E2\n";

    let strict = parse(text).unwrap();
    assert_eq!(strict.stats().deposits, 1);
    assert_eq!(strict.stats().restores, 1);

    let options = ParserOptions {
        deposit_rule: DepositRule::ExtrusionOnly,
        ..ParserOptions::default()
    };
    let loose = ToolpathParser::new(options, TubeMeshConfig::default())
        .parse_str(text)
        .unwrap();
    assert_eq!(loose.stats().deposits, 2);
    assert_eq!(loose.bounding_box().unwrap().max.z, 5.0);
}

#[test]
fn test_degenerate_deposit_counted() {
    let options = ParserOptions {
        deposit_rule: DepositRule::ExtrusionOnly,
        ..ParserOptions::default()
    };
    let model = ToolpathParser::new(options, TubeMeshConfig::default())
        .parse_str("G1 X5 Y5\nG1 E1\n")
        .unwrap();
    assert_eq!(model.stats().deposits, 1);
    assert_eq!(model.stats().degenerate_segments, 1);
    assert_eq!(model.vertex_count(), 0);
}

#[test]
fn test_lines_style() {
    let parser = ToolpathParser::new(ParserOptions::default(), TubeMeshConfig::lines());
    let model = parser.parse_str("G1 X10 Y0 E1\nG1 X10 Y10 E2\n").unwrap();
    assert_eq!(model.vertex_count(), 4);
    assert_eq!(model.indices(), &[0, 1, 2, 3]);
}

#[test]
fn test_last_print_mode_wins() {
    let model = parse("M605 S2 X150\nG1 X10 E1\nM605 S3\n").unwrap();
    assert_eq!(model.print_mode(), PrintMode::Mirror);
    assert_eq!(model.sync_offset(), 150.0);
    assert_eq!(model.draw_instances(300.0).len(), 2);
}

#[test]
fn test_motion_classification_is_public() {
    use gcoderender_core::AxisValues;
    use gcoderender_visualizer::Motion;

    let m = Motion::classify(
        AxisValues::new(0.0, 0.0, 0.0, 2.0),
        AxisValues::new(0.0, 0.0, 0.0, 1.0),
        DepositRule::default(),
    );
    assert_eq!(m.kind, MotionKind::Retract);
}

#[test]
fn test_home_with_bare_axis_letters() {
    let model = parse("G28 X Y\nG1 X10 Y0 E1\n").unwrap();
    assert_eq!(model.stats().deposits, 1);
    assert_eq!(model.stats().commands, 2);
}

#[test]
fn test_malformed_set_position_fails() {
    let err = parse("G1 X10 Y0 E1\nG92 E0 Xoops\n").unwrap_err();
    assert_eq!(
        err.as_gcode_error(),
        Some(&GcodeError::MalformedArgument {
            line_number: 2,
            token: "Xoops".to_string(),
        })
    );
}

#[test]
fn test_sync_mode_without_offset_keeps_unset_offset() {
    let model = parse("M605 S2\nG1 X10 E1\n").unwrap();
    assert_eq!(model.print_mode(), PrintMode::Sync);
    assert_eq!(model.sync_offset(), -1.0);
}

#[test]
fn test_unaddressable_line_bound_fails() {
    let err = ToolpathParser::default()
        .parse_reader("G1 X10 Y0 E1\n".as_bytes(), usize::MAX)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Gcode(GcodeError::BufferCapacityExceeded {
            buffer: "vertices",
            requested: usize::MAX,
            ..
        })
    ));
}

#[test]
fn test_repeated_unknown_axes_counted_per_letter() {
    let text = "G1 X10 Y0 A1 E1\nG1 X20 Y0 A2 B1 E2\nG1 X30 Y0 A3 E3\n";
    let stats = parse(text).unwrap().stats().clone();
    assert_eq!(stats.unknown_axes, 4);
    assert_eq!(stats.unknown_axis_letters.get("A"), Some(&3));
    assert_eq!(stats.unknown_axis_letters.get("B"), Some(&1));
}

use gcoderender_core::{DepositRule, DrawStyle};
use gcoderender_settings::Config;
use gcoderender_visualizer::ToolpathParser;
use glam::Vec3;

const CONFIG_TOML: &str = r#"
[parser]
section_markers = ["PERIMETER", "INFILL"]
deposit_rule = "extrusion_only"
progress_interval = 0

[parser.bed_bounds]
min = [0.0, 0.0, 0.0]
max = [100.0, 100.0, 100.0]

[mesh]
style = "tubes"
ring_size = 8
radius = 0.2
"#;

#[test]
fn test_parser_from_toml_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, CONFIG_TOML).unwrap();

    let config = Config::load_from_file(&path).unwrap();
    let parser = ToolpathParser::from_config(&config);
    assert_eq!(parser.options().deposit_rule, DepositRule::ExtrusionOnly);
    assert_eq!(parser.mesh_config().ring_size, 8);
    assert_eq!(parser.mesh_config().style, DrawStyle::Tubes);

    let text = "\
G1 X10 Y10 E1
; PERIMETER
G1 X110 Y10 E2
; skirt
G1 X50 Y50 E3
";
    let model = parser.parse_str(text).unwrap();
    assert_eq!(model.stats().deposits, 2);
    assert_eq!(model.stats().skipped_lines, 1);
    assert_eq!(model.stats().out_of_bed_points, 1);
    assert_eq!(model.vertex_count(), 2 * 16);
    assert_eq!(model.index_count(), 2 * 48);

    let bbox = model.bounding_box().unwrap();
    assert_eq!(bbox.max, Vec3::new(10.0, 10.0, 0.0));
}

#[test]
fn test_radius_from_config() {
    let mut config = Config::default();
    config.mesh.radius = 2.0;
    let model = ToolpathParser::from_config(&config)
        .parse_str("G1 X10 Y0 E1\n")
        .unwrap();

    // first vertex sits one radius away from the start point
    let v = &model.vertices()[..3];
    let offset = Vec3::new(v[0], v[1], v[2]).length();
    assert!((offset - 2.0).abs() < 1e-5);
}

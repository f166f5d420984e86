use std::io::Write;

use gcoderender_core::Error;
use gcoderender_visualizer::ToolpathParser;
use tempfile::NamedTempFile;

fn write_gcode(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_parse_file_matches_parse_str() {
    let text = "\
; layer 0
G21
G90
M82
G28
G1 Z0.3 F3000
G1 X10 Y10 E0.5
G1 X20 Y10 E1.0
G1 X20 Y20 E1.5
G1 E1.0
G0 X0 Y0
";
    let file = write_gcode(text);
    let parser = ToolpathParser::default();

    let from_file = parser.parse_file(file.path()).unwrap();
    let from_str = parser.parse_str(text).unwrap();

    assert_eq!(from_file.vertices(), from_str.vertices());
    assert_eq!(from_file.indices(), from_str.indices());
    assert_eq!(from_file.bounding_box(), from_str.bounding_box());
    assert_eq!(from_file.stats(), from_str.stats());
    assert_eq!(from_file.stats().total_lines, 11);
    assert_eq!(from_file.stats().deposits, 3);
    assert_eq!(from_file.stats().ignored_codes.get("M82"), Some(&1));
}

#[test]
fn test_file_without_trailing_newline() {
    let file = write_gcode("G1 X10 Y0 E1");
    let model = ToolpathParser::default().parse_file(file.path()).unwrap();
    assert_eq!(model.vertex_count(), 12);
    assert_eq!(model.vertex_capacity(), 12);
}

#[test]
fn test_crlf_file() {
    let file = write_gcode("G90\r\nG1 X10 Y0 E1\r\nG1 X10 Y10 E2\r\n");
    let model = ToolpathParser::default().parse_file(file.path()).unwrap();
    assert_eq!(model.stats().deposits, 2);
}

#[test]
fn test_empty_file() {
    let file = write_gcode("");
    let model = ToolpathParser::default().parse_file(file.path()).unwrap();
    assert!(model.is_empty());
    assert_eq!(model.vertex_capacity(), 0);
    assert!(model.bounding_box().is_none());
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ToolpathParser::default()
        .parse_file(dir.path().join("missing.gcode"))
        .unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_directory_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let err = ToolpathParser::default().parse_file(dir.path()).unwrap_err();
    assert!(err.is_io_error());
}

#[test]
fn test_malformed_file_produces_no_model() {
    let file = write_gcode("G1 X10 Y0 E1\nG1 X1O Y0 E2\n");
    let err = ToolpathParser::default().parse_file(file.path()).unwrap_err();
    assert!(err.is_gcode_error());
    assert_eq!(err.as_gcode_error().and_then(|e| e.line_number()), Some(2));
}

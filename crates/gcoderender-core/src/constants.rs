//! Default values shared across crates

/// Vertices per tube ring
pub const DEFAULT_RING_SIZE: usize = 6;

/// Smallest ring that still encloses a volume
pub const MIN_RING_SIZE: usize = 3;

/// Tube radius in millimeters
pub const DEFAULT_TUBE_RADIUS: f32 = 0.5;

/// Lines between progress log events
pub const DEFAULT_PROGRESS_INTERVAL: usize = 100_000;

/// Sync offset reported when `M605 S2` never set one
pub const UNSET_SYNC_OFFSET: f64 = -1.0;

/// Comment delimiter
pub const COMMENT_DELIMITER: char = ';';

/// Section-marker comments that (re)enable interpretation
pub const DEFAULT_SECTION_MARKERS: &[&str] = &[
    "CONTOUR", "LAYER_NO", "BRIM", "SKIRT", "layer", "skirt", "solid", "outer", "inner",
];

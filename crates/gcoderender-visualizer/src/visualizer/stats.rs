//! Per-parse statistics

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::gcode::motion::{Motion, MotionKind};

/// Counters collected during one parse
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolpathStats {
    /// Lines read, including blank and comment lines
    pub total_lines: usize,
    /// Commands with a registered handler that were executed
    pub commands: usize,
    /// Command lines suppressed by the section gate
    pub skipped_lines: usize,
    pub deposits: usize,
    pub travels: usize,
    pub retracts: usize,
    pub restores: usize,
    /// Deposit motions with zero direction (no geometry emitted)
    pub degenerate_segments: usize,
    /// Ignored axis letters outside X, Y, Z, E, F
    pub unknown_axes: usize,
    /// Occurrences of each ignored axis letter
    pub unknown_axis_letters: BTreeMap<String, usize>,
    /// Deposit points outside the bed volume on at least one axis
    pub out_of_bed_points: usize,
    /// Occurrences of codes without a handler
    pub ignored_codes: BTreeMap<String, usize>,
    /// Total length of deposit paths
    pub deposit_length: f64,
    /// Total extruder advance over deposit motions
    pub extruded_length: f64,
}

impl ToolpathStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_motion(&mut self, motion: &Motion) {
        match motion.kind {
            MotionKind::Deposit => {
                self.deposits += 1;
                self.deposit_length += motion.length();
                self.extruded_length += motion.extruded();
            }
            MotionKind::Travel => self.travels += 1,
            MotionKind::Retract => self.retracts += 1,
            MotionKind::Restore => self.restores += 1,
        }
    }

    /// Count an ignored code; returns true on its first occurrence
    pub fn record_ignored(&mut self, code: &str) -> bool {
        let key = code.to_ascii_uppercase();
        let count = self.ignored_codes.entry(key).or_insert(0);
        *count += 1;
        *count == 1
    }

    /// Count an ignored axis letter; returns true on its first occurrence
    pub fn record_unknown_axis(&mut self, axis: char) -> bool {
        self.unknown_axes += 1;
        let count = self
            .unknown_axis_letters
            .entry(axis.to_string())
            .or_insert(0);
        *count += 1;
        *count == 1
    }

    /// Motions of every class
    pub fn motions(&self) -> usize {
        self.deposits + self.travels + self.retracts + self.restores
    }

    /// Ignored command occurrences over all codes
    pub fn ignored_commands(&self) -> usize {
        self.ignored_codes.values().sum()
    }
}

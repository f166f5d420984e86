//! Printable summary of a parsed toolpath

use std::fmt;

use gcoderender_core::{DrawStyle, PrintMode};
use gcoderender_visualizer::{BoundingBox, ToolpathModel, ToolpathStats};
use serde::Serialize;

/// What the command-line tool reports about a model
#[derive(Debug, Clone, Serialize)]
pub struct ModelSummary {
    pub style: DrawStyle,
    pub vertices: usize,
    pub vertex_capacity: usize,
    pub indices: usize,
    pub index_capacity: usize,
    pub bounding_box: Option<BoundingBox>,
    pub print_mode: PrintMode,
    pub sync_offset: f64,
    /// Bounds over every print-mode draw instance, when the bed width is known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene_bounds: Option<BoundingBox>,
    pub stats: ToolpathStats,
}

impl ModelSummary {
    /// Summary that also frames the print-mode copies on a bed `bed_width` wide
    pub fn with_bed_width(model: &ToolpathModel, bed_width: f32) -> Self {
        Self {
            scene_bounds: model.scene_bounds(bed_width),
            ..Self::from(model)
        }
    }
}

fn write_bounds(f: &mut fmt::Formatter<'_>, label: &str, bbox: &BoundingBox) -> fmt::Result {
    writeln!(
        f,
        "{:<14}X[{:.3}, {:.3}] Y[{:.3}, {:.3}] Z[{:.3}, {:.3}]",
        label, bbox.min.x, bbox.max.x, bbox.min.y, bbox.max.y, bbox.min.z, bbox.max.z
    )
}

impl From<&ToolpathModel> for ModelSummary {
    fn from(model: &ToolpathModel) -> Self {
        Self {
            style: model.style(),
            vertices: model.vertex_count(),
            vertex_capacity: model.vertex_capacity(),
            indices: model.index_count(),
            index_capacity: model.index_capacity(),
            bounding_box: model.bounding_box(),
            print_mode: model.print_mode(),
            sync_offset: model.sync_offset(),
            scene_bounds: None,
            stats: model.stats().clone(),
        }
    }
}

impl fmt::Display for ModelSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = &self.stats;
        writeln!(f, "Style:        {}", self.style)?;
        writeln!(
            f,
            "Vertices:     {} (capacity {})",
            self.vertices, self.vertex_capacity
        )?;
        writeln!(
            f,
            "Indices:      {} (capacity {})",
            self.indices, self.index_capacity
        )?;
        match &self.bounding_box {
            Some(bbox) => write_bounds(f, "Bounds:", bbox)?,
            None => writeln!(f, "Bounds:       none (no material deposited)")?,
        }
        match self.print_mode {
            PrintMode::Sync if self.sync_offset > 0.0 => writeln!(
                f,
                "Print mode:   {} (offset {:.3})",
                self.print_mode, self.sync_offset
            )?,
            _ => writeln!(f, "Print mode:   {}", self.print_mode)?,
        }
        if let Some(scene) = &self.scene_bounds {
            if self.print_mode != PrintMode::Normal {
                write_bounds(f, "Scene:", scene)?;
            }
        }
        writeln!(f, "Lines:        {}", stats.total_lines)?;
        writeln!(
            f,
            "Motions:      {} deposit, {} travel, {} retract, {} restore",
            stats.deposits, stats.travels, stats.retracts, stats.restores
        )?;
        writeln!(
            f,
            "Deposited:    {:.3} mm path, {:.3} mm filament",
            stats.deposit_length, stats.extruded_length
        )?;
        if stats.skipped_lines > 0 {
            writeln!(f, "Skipped:      {} lines", stats.skipped_lines)?;
        }
        if stats.degenerate_segments > 0 {
            writeln!(f, "Degenerate:   {} segments", stats.degenerate_segments)?;
        }
        if stats.unknown_axes > 0 {
            writeln!(f, "Unknown axes: {}", stats.unknown_axes)?;
        }
        if stats.out_of_bed_points > 0 {
            writeln!(f, "Off bed:      {} points", stats.out_of_bed_points)?;
        }
        if !stats.ignored_codes.is_empty() {
            let codes: Vec<String> = stats
                .ignored_codes
                .iter()
                .map(|(code, count)| format!("{}x{}", code, count))
                .collect();
            writeln!(f, "Ignored:      {}", codes.join(" "))?;
        }
        Ok(())
    }
}

//! Configuration for GCodeRender
//!
//! Configuration is organized into two sections:
//! - Parser settings (section markers, deposit rule, bed limits)
//! - Mesh settings (draw style, ring size, tube radius)
//!
//! Files are JSON or TOML, chosen by extension.

use gcoderender_core::constants::{
    DEFAULT_PROGRESS_INTERVAL, DEFAULT_RING_SIZE, DEFAULT_SECTION_MARKERS, DEFAULT_TUBE_RADIUS,
    MIN_RING_SIZE,
};
use gcoderender_core::{DepositRule, DrawStyle};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{SettingsError, SettingsResult};

/// Printable volume of the machine bed, in millimeters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BedBounds {
    /// Minimum X, Y, Z
    pub min: [f32; 3],
    /// Maximum X, Y, Z
    pub max: [f32; 3],
}

impl BedBounds {
    pub fn new(min: [f32; 3], max: [f32; 3]) -> Self {
        Self { min, max }
    }

    /// Bed width along X
    pub fn width(&self) -> f32 {
        self.max[0] - self.min[0]
    }
}

/// Command interpretation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserSettings {
    /// First comment words that enable interpretation of the following lines
    pub section_markers: Vec<String>,
    /// Which extruding moves count as deposits
    pub deposit_rule: DepositRule,
    /// Remove `N<line>` prefixes and `*<checksum>` suffixes
    pub strip_line_numbers: bool,
    /// Lines between progress log events (0 disables)
    pub progress_interval: usize,
    /// Deposits outside this volume are left out of the bounding box
    pub bed_bounds: Option<BedBounds>,
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            section_markers: DEFAULT_SECTION_MARKERS
                .iter()
                .map(|m| m.to_string())
                .collect(),
            deposit_rule: DepositRule::default(),
            strip_line_numbers: true,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            bed_bounds: None,
        }
    }
}

/// Mesh generation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshSettings {
    /// Primitive topology per deposit segment
    pub style: DrawStyle,
    /// Vertices per tube ring
    pub ring_size: usize,
    /// Tube radius in millimeters
    pub radius: f32,
}

impl Default for MeshSettings {
    fn default() -> Self {
        Self {
            style: DrawStyle::default(),
            ring_size: DEFAULT_RING_SIZE,
            radius: DEFAULT_TUBE_RADIUS,
        }
    }
}

/// Complete configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub parser: ParserSettings,
    pub mesh: MeshSettings,
}

impl Config {
    /// Create a configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// `<config dir>/gcoderender/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("gcoderender").join("config.toml"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no configuration directory on this platform".into())
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = match extension(path) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            other => {
                return Err(SettingsError::UnsupportedFormat(
                    other.unwrap_or("<none>").to_string(),
                ))
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match extension(path) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            other => {
                return Err(SettingsError::UnsupportedFormat(
                    other.unwrap_or("<none>").to_string(),
                ))
            }
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if self.mesh.ring_size < MIN_RING_SIZE {
            return Err(SettingsError::invalid(
                "mesh.ring_size",
                format!("must be at least {}", MIN_RING_SIZE),
            ));
        }
        if !self.mesh.radius.is_finite() || self.mesh.radius <= 0.0 {
            return Err(SettingsError::invalid(
                "mesh.radius",
                "must be a positive finite number",
            ));
        }
        if self
            .parser
            .section_markers
            .iter()
            .any(|m| m.trim().is_empty() || m.contains(char::is_whitespace))
        {
            return Err(SettingsError::invalid(
                "parser.section_markers",
                "markers must be single non-empty words",
            ));
        }
        if let Some(bed) = &self.parser.bed_bounds {
            if (0..3).any(|i| {
                matches!(
                    bed.min[i].partial_cmp(&bed.max[i]),
                    None | Some(std::cmp::Ordering::Greater)
                )
            }) {
                return Err(SettingsError::invalid(
                    "parser.bed_bounds",
                    "min must not exceed max on any axis",
                ));
            }
        }
        Ok(())
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

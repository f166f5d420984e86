//! Data models shared by the parser, the mesh generator and the settings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

/// Axis letter understood by motion and set-position commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
    /// Extruder (cumulative deposited material length)
    E,
    /// Feed rate; accepted but has no geometric effect
    F,
}

impl Axis {
    /// Positional axes carried by [`AxisValues`]
    pub const POSITIONAL: [Axis; 4] = [Axis::X, Axis::Y, Axis::Z, Axis::E];

    /// Map a (case-insensitive) letter to an axis
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'X' => Some(Axis::X),
            'Y' => Some(Axis::Y),
            'Z' => Some(Axis::Z),
            'E' => Some(Axis::E),
            'F' => Some(Axis::F),
            _ => None,
        }
    }

    /// Upper-case letter of this axis
    pub fn letter(self) -> char {
        match self {
            Axis::X => 'X',
            Axis::Y => 'Y',
            Axis::Z => 'Z',
            Axis::E => 'E',
            Axis::F => 'F',
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// X, Y, Z and E values
///
/// Used both for positions (working or absolute) and for the offset that
/// position-reset commands accumulate between the two frames.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisValues {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub e: f64,
}

impl AxisValues {
    /// All axes at zero
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        e: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64, e: f64) -> Self {
        Self { x, y, z, e }
    }

    /// Value of a positional axis; `F` has no slot and reads as `None`
    pub fn get(&self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::X => Some(self.x),
            Axis::Y => Some(self.y),
            Axis::Z => Some(self.z),
            Axis::E => Some(self.e),
            Axis::F => None,
        }
    }

    /// Copy with one positional axis replaced; `F` leaves the values untouched
    pub fn with(mut self, axis: Axis, value: f64) -> Self {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
            Axis::Z => self.z = value,
            Axis::E => self.e = value,
            Axis::F => {}
        }
        self
    }
}

impl Add for AxisValues {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.x + rhs.x,
            self.y + rhs.y,
            self.z + rhs.z,
            self.e + rhs.e,
        )
    }
}

impl Sub for AxisValues {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(
            self.x - rhs.x,
            self.y - rhs.y,
            self.z - rhs.z,
            self.e - rhs.e,
        )
    }
}

/// Print mode selected by `M605`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrintMode {
    /// Single toolpath
    #[default]
    Normal,
    /// Second head duplicates the toolpath shifted by the sync offset
    Sync,
    /// Second head duplicates the toolpath mirrored across the bed midline
    Mirror,
}

impl PrintMode {
    /// Mode for an `M605 S<n>` selector; unknown selectors yield `None`
    pub fn from_selector(selector: f64) -> Option<Self> {
        if selector == 0.0 || selector == 1.0 {
            Some(Self::Normal)
        } else if selector == 2.0 {
            Some(Self::Sync)
        } else if selector == 3.0 {
            Some(Self::Mirror)
        } else {
            None
        }
    }
}

impl fmt::Display for PrintMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Sync => write!(f, "sync"),
            Self::Mirror => write!(f, "mirror"),
        }
    }
}

/// Rule deciding which extruding moves become deposit geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepositRule {
    /// E increases and X or Y changes
    #[default]
    TravelAndExtrusion,
    /// E increases, regardless of spatial movement
    ExtrusionOnly,
}

impl fmt::Display for DepositRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TravelAndExtrusion => write!(f, "travel-and-extrusion"),
            Self::ExtrusionOnly => write!(f, "extrusion-only"),
        }
    }
}

impl FromStr for DepositRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "travel-and-extrusion" | "strict" => Ok(Self::TravelAndExtrusion),
            "extrusion-only" | "loose" => Ok(Self::ExtrusionOnly),
            _ => Err(format!("Unknown deposit rule: {}", s)),
        }
    }
}

/// Primitive topology emitted per deposit segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawStyle {
    /// Open hexagonal (or N-gonal) tubes, triangle list
    #[default]
    Tubes,
    /// One line primitive per segment, line list
    Lines,
}

impl fmt::Display for DrawStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tubes => write!(f, "tubes"),
            Self::Lines => write!(f, "lines"),
        }
    }
}

impl FromStr for DrawStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tubes" | "tube" => Ok(Self::Tubes),
            "lines" | "line" => Ok(Self::Lines),
            _ => Err(format!("Unknown draw style: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_letters() {
        assert_eq!(Axis::from_letter('x'), Some(Axis::X));
        assert_eq!(Axis::from_letter('E'), Some(Axis::E));
        assert_eq!(Axis::from_letter('Q'), None);
        assert_eq!(Axis::F.letter(), 'F');
    }

    #[test]
    fn test_axis_values_with() {
        let v = AxisValues::ZERO.with(Axis::Y, 2.5).with(Axis::F, 99.0);
        assert_eq!(v, AxisValues::new(0.0, 2.5, 0.0, 0.0));
        assert_eq!(v.get(Axis::F), None);
        assert_eq!(
            v + AxisValues::new(1.0, 1.0, 1.0, 1.0) - v,
            AxisValues::new(1.0, 1.0, 1.0, 1.0)
        );
    }

    #[test]
    fn test_print_mode_selector() {
        assert_eq!(PrintMode::from_selector(0.0), Some(PrintMode::Normal));
        assert_eq!(PrintMode::from_selector(1.0), Some(PrintMode::Normal));
        assert_eq!(PrintMode::from_selector(2.0), Some(PrintMode::Sync));
        assert_eq!(PrintMode::from_selector(3.0), Some(PrintMode::Mirror));
        assert_eq!(PrintMode::from_selector(4.0), None);
    }

    #[test]
    fn test_enum_serde_names() {
        assert_eq!(
            serde_json::to_string(&DepositRule::ExtrusionOnly).unwrap(),
            "\"extrusion_only\""
        );
        assert_eq!(serde_json::to_string(&DrawStyle::Lines).unwrap(), "\"lines\"");
        assert_eq!(
            "extrusion_only".parse::<DepositRule>(),
            Ok(DepositRule::ExtrusionOnly)
        );
    }
}

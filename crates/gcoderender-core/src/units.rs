//! Measurement units selected by G20/G21

use serde::{Deserialize, Serialize};
use std::fmt;

/// Length units of a command stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Millimeters (G21)
    Millimeters,
    /// Inches (G20)
    Inches,
}

impl Default for Units {
    fn default() -> Self {
        Self::Millimeters
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Millimeters => write!(f, "millimeters"),
            Self::Inches => write!(f, "inches"),
        }
    }
}

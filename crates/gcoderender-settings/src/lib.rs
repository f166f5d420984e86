//! GCodeRender Settings Crate
//!
//! Handles preview configuration: loading and saving JSON/TOML files,
//! defaults, and validation.

pub mod config;
pub mod error;

pub use config::{BedBounds, Config, MeshSettings, ParserSettings};
pub use error::{SettingsError, SettingsResult};

//! # GCodeRender
//!
//! Toolpath preview geometry for 3D-printer G-code:
//! - Parses the command stream (positioning modes, position resets, print modes)
//! - Classifies motions into travel, deposit, retract and restore
//! - Emits deposit motions as tube meshes in pre-sized vertex/index buffers
//! - Tracks the bounding volume of deposited material for camera framing
//!
//! ## Architecture
//!
//! GCodeRender is organized as a workspace with multiple crates:
//!
//! 1. **gcoderender-core** - Errors, axis/position types, print modes, constants
//! 2. **gcoderender-settings** - Configuration files and validation
//! 3. **gcoderender-visualizer** - Parser, command dispatch, mesh generation, model
//! 4. **gcoderender** - This crate: re-exports and the command-line tool

pub mod summary;

pub use gcoderender_core::{
    Axis, AxisValues, DepositRule, DrawStyle, Error, GcodeError, PrintMode, Result, Units,
};

pub use gcoderender_settings::{
    BedBounds, Config, MeshSettings, ParserSettings, SettingsError, SettingsResult,
};

pub use gcoderender_visualizer::{
    BoundingBox, CommandTable, CoordinateState, GeometryBuffer, Motion, MotionKind,
    ParserOptions, ToolpathModel, ToolpathParser, ToolpathRenderer, ToolpathStats,
    TubeMeshConfig, FLOATS_PER_VERTEX,
};

pub use summary::ModelSummary;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr, so stdout stays clean for reports
/// - RUST_LOG environment variable support (default level INFO)
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.to_string()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

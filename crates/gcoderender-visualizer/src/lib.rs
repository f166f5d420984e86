//! # GCodeRender Visualizer
//!
//! Toolpath parsing and extrusion mesh generation for GCodeRender.
//! Reads a G-code command stream, tracks coordinate state, classifies
//! motions and turns deposit motions into tube geometry ready for upload
//! to a rendering backend.

pub mod gcode;
pub mod visualizer;

pub use gcode::{
    Arguments, AxisUpdate, Command, CommandContext, CommandHandler, CommandTable,
    CoordinateState, Motion, MotionKind, ParserOptions, SectionGate, Token, Tokenizer,
    ToolpathFile, ToolpathParser, Transition,
};

pub use visualizer::{
    BoundingBox, BoundsAccumulator, GeometryBuffer, ToolpathModel, ToolpathRenderer,
    ToolpathStats, TubeMeshConfig, TubeMeshGenerator, FLOATS_PER_VERTEX,
};

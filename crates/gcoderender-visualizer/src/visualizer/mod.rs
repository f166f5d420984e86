//! Geometry side: bounding volume, buffers, tube meshes and the model

pub mod bbox;
pub mod buffers;
pub mod model;
pub mod renderer;
pub mod stats;
pub mod tube_mesh;

pub use bbox::{BoundingBox, BoundsAccumulator};
pub use buffers::GeometryBuffer;
pub use model::ToolpathModel;
pub use renderer::ToolpathRenderer;
pub use stats::ToolpathStats;
pub use tube_mesh::{perpendicular_basis, TubeMeshConfig, TubeMeshGenerator, FLOATS_PER_VERTEX};

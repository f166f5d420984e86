//! The parse result handed to a rendering backend

use gcoderender_core::{DrawStyle, PrintMode};
use glam::{Mat4, Vec3};

use super::bbox::BoundingBox;
use super::buffers::GeometryBuffer;
use super::stats::ToolpathStats;
use super::tube_mesh::FLOATS_PER_VERTEX;

/// Geometry and metadata for one toolpath
///
/// Produced once per parse and read-only afterwards. Buffers expose only
/// their filled part; capacities are reported separately.
#[derive(Debug, Clone)]
pub struct ToolpathModel {
    vertices: GeometryBuffer<f32>,
    indices: GeometryBuffer<u32>,
    bounding_box: Option<BoundingBox>,
    print_mode: PrintMode,
    sync_offset: f64,
    style: DrawStyle,
    stats: ToolpathStats,
}

impl ToolpathModel {
    pub(crate) fn new(
        vertices: GeometryBuffer<f32>,
        indices: GeometryBuffer<u32>,
        bounding_box: Option<BoundingBox>,
        print_mode: PrintMode,
        sync_offset: f64,
        style: DrawStyle,
        stats: ToolpathStats,
    ) -> Self {
        Self {
            vertices,
            indices,
            bounding_box,
            print_mode,
            sync_offset,
            style,
            stats,
        }
    }

    /// Interleaved `[x, y, z, nx, ny, nz]` floats
    pub fn vertices(&self) -> &[f32] {
        self.vertices.as_slice()
    }

    pub fn indices(&self) -> &[u32] {
        self.indices.as_slice()
    }

    pub fn vertex_buffer(&self) -> &GeometryBuffer<f32> {
        &self.vertices
    }

    pub fn index_buffer(&self) -> &GeometryBuffer<u32> {
        &self.indices
    }

    /// Number of vertices (not floats)
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / FLOATS_PER_VERTEX
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Vertices the buffer was sized for
    pub fn vertex_capacity(&self) -> usize {
        self.vertices.capacity() / FLOATS_PER_VERTEX
    }

    pub fn index_capacity(&self) -> usize {
        self.indices.capacity()
    }

    /// Extent of deposited material; `None` if nothing was deposited
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.bounding_box
    }

    /// Mode selected by the last `M605`
    pub fn print_mode(&self) -> PrintMode {
        self.print_mode
    }

    /// Head distance in sync mode; negative when never set
    pub fn sync_offset(&self) -> f64 {
        self.sync_offset
    }

    /// Primitive topology of the index buffer
    pub fn style(&self) -> DrawStyle {
        self.style
    }

    pub fn stats(&self) -> &ToolpathStats {
        &self.stats
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Model transforms to draw the buffers with
    ///
    /// Always starts with the identity. Sync adds a copy shifted along X by
    /// the sync offset (only when the offset is positive); Mirror adds a copy
    /// reflected across `x = bed_width / 2`.
    pub fn draw_instances(&self, bed_width: f32) -> Vec<Mat4> {
        let mut instances = vec![Mat4::IDENTITY];
        match self.print_mode {
            PrintMode::Normal => {}
            PrintMode::Sync => {
                if self.sync_offset > 0.0 {
                    instances.push(Mat4::from_translation(Vec3::new(
                        self.sync_offset as f32,
                        0.0,
                        0.0,
                    )));
                }
            }
            PrintMode::Mirror => {
                instances.push(
                    Mat4::from_translation(Vec3::new(bed_width, 0.0, 0.0))
                        * Mat4::from_scale(Vec3::new(-1.0, 1.0, 1.0)),
                );
            }
        }
        instances
    }

    /// Bounding box covering every draw instance, for camera framing
    pub fn scene_bounds(&self, bed_width: f32) -> Option<BoundingBox> {
        let bounds = self.bounding_box?;
        self.draw_instances(bed_width)
            .iter()
            .map(|transform| bounds.transformed(transform))
            .reduce(|acc, b| acc.union(&b))
    }
}

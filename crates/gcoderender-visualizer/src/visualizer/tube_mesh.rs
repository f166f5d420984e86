//! Tube-mesh generation for deposit segments
//!
//! Every deposit segment becomes an open N-gonal tube: one ring of N vertices
//! around the start point and one around the end point, with the wall between
//! them triangulated. Vertices are interleaved `[x, y, z, nx, ny, nz]`; the
//! two rings are interleaved too, so vertex `2k` lies on the start ring and
//! `2k + 1` on the end ring at the same angle. Segments are independent
//! primitives: no caps, no welding.

use gcoderender_core::constants::{DEFAULT_RING_SIZE, DEFAULT_TUBE_RADIUS, MIN_RING_SIZE};
use gcoderender_core::{DrawStyle, GcodeError};
use gcoderender_settings::MeshSettings;
use glam::Vec3;
use tracing::trace;

use super::buffers::GeometryBuffer;

/// Floats per interleaved vertex (position + normal)
pub const FLOATS_PER_VERTEX: usize = 6;

/// Geometry parameters for the generator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TubeMeshConfig {
    pub style: DrawStyle,
    /// Vertices per ring
    pub ring_size: usize,
    pub radius: f32,
}

impl Default for TubeMeshConfig {
    fn default() -> Self {
        Self {
            style: DrawStyle::Tubes,
            ring_size: DEFAULT_RING_SIZE,
            radius: DEFAULT_TUBE_RADIUS,
        }
    }
}

impl From<&MeshSettings> for TubeMeshConfig {
    fn from(settings: &MeshSettings) -> Self {
        Self {
            style: settings.style,
            ring_size: settings.ring_size,
            radius: settings.radius,
        }
    }
}

impl TubeMeshConfig {
    pub fn lines() -> Self {
        Self {
            style: DrawStyle::Lines,
            ..Self::default()
        }
    }

    fn effective_ring_size(&self) -> usize {
        self.ring_size.max(MIN_RING_SIZE)
    }

    /// Vertices emitted per non-degenerate segment
    pub fn vertices_per_segment(&self) -> usize {
        match self.style {
            DrawStyle::Tubes => 2 * self.effective_ring_size(),
            DrawStyle::Lines => 2,
        }
    }

    /// Indices emitted per non-degenerate segment
    pub fn indices_per_segment(&self) -> usize {
        match self.style {
            DrawStyle::Tubes => 6 * self.effective_ring_size(),
            DrawStyle::Lines => 2,
        }
    }
}

/// Appends segment geometry into pre-sized buffers
#[derive(Debug, Clone)]
pub struct TubeMeshGenerator {
    config: TubeMeshConfig,
    /// `(sin θ_k, cos θ_k)` for every ring position
    ring: Vec<(f32, f32)>,
    vertices: GeometryBuffer<f32>,
    indices: GeometryBuffer<u32>,
    scratch_vertices: Vec<f32>,
    scratch_indices: Vec<u32>,
}

impl TubeMeshGenerator {
    /// Generator with room for `max_segments` segments
    ///
    /// # Errors
    /// [`GcodeError::BufferCapacityExceeded`] when the buffers for
    /// `max_segments` cannot be allocated.
    pub fn new(config: TubeMeshConfig, max_segments: usize) -> Result<Self, GcodeError> {
        let ring_size = config.effective_ring_size();
        let ring = (0..ring_size)
            .map(|k| {
                let angle = k as f32 * std::f32::consts::TAU / ring_size as f32;
                angle.sin_cos()
            })
            .collect();

        let vertex_floats = config.vertices_per_segment() * FLOATS_PER_VERTEX;
        let index_count = config.indices_per_segment();

        Ok(Self {
            config,
            ring,
            vertices: GeometryBuffer::with_capacity(
                "vertices",
                max_segments.saturating_mul(vertex_floats),
            )?,
            indices: GeometryBuffer::with_capacity(
                "indices",
                max_segments.saturating_mul(index_count),
            )?,
            scratch_vertices: Vec::with_capacity(vertex_floats),
            scratch_indices: Vec::with_capacity(index_count),
        })
    }

    pub fn config(&self) -> &TubeMeshConfig {
        &self.config
    }

    /// Vertices written so far
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / FLOATS_PER_VERTEX
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Append geometry for the segment `start -> end`
    ///
    /// Returns `Ok(false)` without writing anything when the direction is
    /// the zero vector.
    pub fn append_segment(&mut self, start: Vec3, end: Vec3) -> Result<bool, GcodeError> {
        let direction = end - start;
        if direction == Vec3::ZERO {
            trace!("Skipping zero-length deposit segment at {:?}", start);
            return Ok(false);
        }

        let base = self.base_index()?;
        self.scratch_vertices.clear();
        self.scratch_indices.clear();

        match self.config.style {
            DrawStyle::Tubes => {
                let Some((perp1, perp2)) = perpendicular_basis(direction) else {
                    trace!("No perpendicular basis for direction {:?}", direction);
                    return Ok(false);
                };
                self.build_tube(base, start, end, perp1, perp2);
            }
            DrawStyle::Lines => {
                push_vertex(&mut self.scratch_vertices, start, Vec3::ZERO);
                push_vertex(&mut self.scratch_vertices, end, Vec3::ZERO);
                self.scratch_indices.extend_from_slice(&[base, base + 1]);
            }
        }

        self.vertices.push_slice(&self.scratch_vertices)?;
        self.indices.push_slice(&self.scratch_indices)?;
        Ok(true)
    }

    fn build_tube(&mut self, base: u32, start: Vec3, end: Vec3, perp1: Vec3, perp2: Vec3) {
        let radius = self.config.radius;
        for &(sin, cos) in &self.ring {
            let normal = sin * perp1 + cos * perp2;
            push_vertex(&mut self.scratch_vertices, start + radius * normal, normal);
            push_vertex(&mut self.scratch_vertices, end + radius * normal, normal);
        }

        let n = self.ring.len() as u32;
        for k in 0..n - 1 {
            let a = base + 2 * k;
            self.scratch_indices
                .extend_from_slice(&[a, a + 1, a + 2, a + 1, a + 3, a + 2]);
        }
        // closing quad back to the first ring position
        let last = base + 2 * (n - 1);
        self.scratch_indices
            .extend_from_slice(&[last, last + 1, base, last + 1, base + 1, base]);
    }

    /// Index of the next vertex; every index of the segment must fit in u32
    fn base_index(&self) -> Result<u32, GcodeError> {
        let base = self.vertex_count();
        let requested = base + self.config.vertices_per_segment();
        if requested > u32::MAX as usize {
            return Err(GcodeError::BufferCapacityExceeded {
                buffer: "indices",
                capacity: u32::MAX as usize,
                requested,
            });
        }
        Ok(base as u32)
    }

    /// Hand the filled buffers over
    pub fn into_buffers(self) -> (GeometryBuffer<f32>, GeometryBuffer<u32>) {
        (self.vertices, self.indices)
    }
}

fn push_vertex(out: &mut Vec<f32>, position: Vec3, normal: Vec3) {
    out.extend_from_slice(&[
        position.x, position.y, position.z, normal.x, normal.y, normal.z,
    ]);
}

/// Two unit vectors perpendicular to `direction` and to each other
///
/// `perp1 = normalize(direction × X)`, falling back to `direction × Y` when
/// the direction is parallel to X; `perp2 = normalize(direction × perp1)`.
pub fn perpendicular_basis(direction: Vec3) -> Option<(Vec3, Vec3)> {
    let perp1 = direction
        .cross(Vec3::X)
        .try_normalize()
        .or_else(|| direction.cross(Vec3::Y).try_normalize())?;
    let perp2 = direction.cross(perp1).try_normalize()?;
    Some((perp1, perp2))
}

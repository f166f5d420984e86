//! Axis-aligned bounding volume of deposited material

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Axis-aligned box; `min <= max` on every axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Degenerate box around a single point
    pub fn from_point(point: Vec3) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Grow to include `point`; never shrinks
    pub fn extend(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Smallest box covering both
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    pub fn contains_box(&self, other: &Self) -> bool {
        self.contains(other.min) && self.contains(other.max)
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn depth(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn height(&self) -> f32 {
        self.max.z - self.min.z
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// The eight corners
    pub fn corners(&self) -> [Vec3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vec3::new(a.x, a.y, a.z),
            Vec3::new(b.x, a.y, a.z),
            Vec3::new(a.x, b.y, a.z),
            Vec3::new(b.x, b.y, a.z),
            Vec3::new(a.x, a.y, b.z),
            Vec3::new(b.x, a.y, b.z),
            Vec3::new(a.x, b.y, b.z),
            Vec3::new(b.x, b.y, b.z),
        ]
    }

    /// Bounding box of this box under an affine transform
    pub fn transformed(&self, transform: &Mat4) -> Self {
        let corners = self.corners();
        let first = transform.transform_point3(corners[0]);
        corners[1..]
            .iter()
            .fold(Self::from_point(first), |mut acc, corner| {
                acc.extend(transform.transform_point3(*corner));
                acc
            })
    }
}

/// Incremental bounding volume with an optional admission filter
///
/// Absent until every axis has seen an admitted coordinate. With a filter
/// (the machine bed), each axis and side is judged on its own: a coordinate
/// can lower that axis' minimum only if it is not below the bed minimum, and
/// raise the maximum only if it is not above the bed maximum. A point off
/// the bed in X still extends Y and Z.
#[derive(Debug, Clone)]
pub struct BoundsAccumulator {
    min: Vec3,
    max: Vec3,
    filter: Option<BoundingBox>,
    rejected: usize,
}

impl Default for BoundsAccumulator {
    fn default() -> Self {
        Self::new(None)
    }
}

impl BoundsAccumulator {
    pub fn new(filter: Option<BoundingBox>) -> Self {
        Self {
            min: Vec3::INFINITY,
            max: Vec3::NEG_INFINITY,
            filter,
            rejected: 0,
        }
    }

    /// Fold in a point; returns false if it lies outside the filter on any axis
    pub fn include(&mut self, point: Vec3) -> bool {
        let Some(filter) = &self.filter else {
            self.min = self.min.min(point);
            self.max = self.max.max(point);
            return true;
        };

        let above_floor = point.cmpge(filter.min);
        let below_ceiling = point.cmple(filter.max);
        self.min = Vec3::select(above_floor, self.min.min(point), self.min);
        self.max = Vec3::select(below_ceiling, self.max.max(point), self.max);

        let inside = above_floor.all() && below_ceiling.all();
        if !inside {
            self.rejected += 1;
            tracing::trace!("Point {:?} outside bed volume, clipped per axis", point);
        }
        inside
    }

    pub fn bounds(&self) -> Option<BoundingBox> {
        self.min.cmple(self.max).all().then(|| BoundingBox {
            min: self.min,
            max: self.max,
        })
    }

    /// Points outside the filter on at least one axis
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    pub fn finish(self) -> Option<BoundingBox> {
        self.bounds()
    }
}

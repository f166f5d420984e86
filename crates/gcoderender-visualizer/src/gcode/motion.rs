//! Motion classification
//!
//! Each G0/G1 produces a [`Motion`] between two absolute positions. Only
//! deposit motions carry geometry; retract and restore only change the
//! extruder axis.

use gcoderender_core::{AxisValues, DepositRule};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Classification of one motion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotionKind {
    /// Movement without deposition
    Travel,
    /// Material laid down along the path
    Deposit,
    /// Extruder withdrawn without XY movement
    Retract,
    /// Extruder re-advanced without XY movement
    Restore,
}

/// A classified motion between two absolute positions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub kind: MotionKind,
    pub start: AxisValues,
    pub end: AxisValues,
}

impl Motion {
    /// Classify the move from `start` to `end` (both absolute)
    pub fn classify(start: AxisValues, end: AxisValues, rule: DepositRule) -> Self {
        let xy_moved = end.x != start.x || end.y != start.y;
        let extruded = end.e - start.e;

        let kind = if extruded > 0.0 && (xy_moved || rule == DepositRule::ExtrusionOnly) {
            MotionKind::Deposit
        } else if !xy_moved && extruded < 0.0 {
            MotionKind::Retract
        } else if !xy_moved && extruded > 0.0 {
            MotionKind::Restore
        } else {
            MotionKind::Travel
        };

        Self { kind, start, end }
    }

    pub fn is_deposit(&self) -> bool {
        self.kind == MotionKind::Deposit
    }

    /// Change of the extruder axis
    pub fn extruded(&self) -> f64 {
        self.end.e - self.start.e
    }

    /// Spatial length of the move
    pub fn length(&self) -> f64 {
        let [dx, dy, dz] = [
            self.end.x - self.start.x,
            self.end.y - self.start.y,
            self.end.z - self.start.z,
        ];
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Start point in render precision
    pub fn start_point(&self) -> Vec3 {
        to_vec3(&self.start)
    }

    /// End point in render precision
    pub fn end_point(&self) -> Vec3 {
        to_vec3(&self.end)
    }
}

fn to_vec3(v: &AxisValues) -> Vec3 {
    Vec3::new(v.x as f32, v.y as f32, v.z as f32)
}

//! Coordinate-state tracking
//!
//! [`CoordinateState`] is a plain value: every command handler takes the
//! current state and returns the next one. The working position is what the
//! command stream talks about (after relative-mode resolution); the absolute
//! position is `working + offset`, where the offset is only changed by
//! position resets (G92).

use gcoderender_core::constants::UNSET_SYNC_OFFSET;
use gcoderender_core::{Axis, AxisValues, PrintMode};
use serde::{Deserialize, Serialize};

/// Per-axis values named by one command; absent axes are `None`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisUpdate {
    values: [Option<f64>; 4],
}

impl AxisUpdate {
    /// Every positional axis set to zero (bare `G92`)
    pub const ALL_ZERO: Self = Self {
        values: [Some(0.0); 4],
    };

    fn slot(axis: Axis) -> Option<usize> {
        match axis {
            Axis::X => Some(0),
            Axis::Y => Some(1),
            Axis::Z => Some(2),
            Axis::E => Some(3),
            Axis::F => None,
        }
    }

    /// Set a positional axis; `F` is ignored
    pub fn set(&mut self, axis: Axis, value: f64) {
        if let Some(slot) = Self::slot(axis) {
            self.values[slot] = Some(value);
        }
    }

    pub fn with(mut self, axis: Axis, value: f64) -> Self {
        self.set(axis, value);
        self
    }

    pub fn get(&self, axis: Axis) -> Option<f64> {
        Self::slot(axis).and_then(|slot| self.values[slot])
    }

    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    /// Named axes with their values, in X, Y, Z, E order
    pub fn iter(&self) -> impl Iterator<Item = (Axis, f64)> + '_ {
        Axis::POSITIONAL
            .iter()
            .zip(self.values.iter())
            .filter_map(|(axis, value)| value.map(|v| (*axis, v)))
    }
}

/// Interpreter state carried from one command to the next
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateState {
    /// Position in the working frame
    pub working: AxisValues,
    /// Working-to-absolute translation accumulated by position resets
    pub offset: AxisValues,
    /// Motion arguments are deltas (G91) rather than targets (G90)
    pub relative: bool,
    pub print_mode: PrintMode,
    /// Distance between heads in sync mode; [`UNSET_SYNC_OFFSET`] until set
    pub sync_offset: f64,
}

impl Default for CoordinateState {
    fn default() -> Self {
        Self {
            working: AxisValues::ZERO,
            offset: AxisValues::ZERO,
            relative: false,
            print_mode: PrintMode::Normal,
            sync_offset: UNSET_SYNC_OFFSET,
        }
    }
}

impl CoordinateState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Absolute (world) position
    pub fn absolute(&self) -> AxisValues {
        self.working + self.offset
    }

    /// Switch between absolute (G90) and relative (G91) arguments
    pub fn with_relative(self, relative: bool) -> Self {
        Self { relative, ..self }
    }

    /// Working position a motion to `target` would reach
    ///
    /// Named axes are added (relative mode) or replaced (absolute mode);
    /// the others keep their current working value.
    pub fn resolve(&self, target: &AxisUpdate) -> AxisValues {
        target.iter().fold(self.working, |working, (axis, value)| {
            let current = working.get(axis).unwrap_or(0.0);
            let next = if self.relative { current + value } else { value };
            working.with(axis, next)
        })
    }

    /// State after moving to a resolved working position
    pub fn moved_to(self, working: AxisValues) -> Self {
        Self { working, ..self }
    }

    /// Redefine the position of the named axes without moving (G92)
    ///
    /// The absolute position is preserved: for every named axis
    /// `offset += working - value` and `working = value`.
    pub fn reset_position(self, target: &AxisUpdate) -> Self {
        let (working, offset) = target.iter().fold(
            (self.working, self.offset),
            |(working, offset), (axis, value)| {
                let current = working.get(axis).unwrap_or(0.0);
                let shift = offset.get(axis).unwrap_or(0.0) + current - value;
                (working.with(axis, value), offset.with(axis, shift))
            },
        );
        Self {
            working,
            offset,
            ..self
        }
    }

    /// Select a print mode (M605); the sync offset only changes when given
    pub fn with_print_mode(self, print_mode: PrintMode, sync_offset: Option<f64>) -> Self {
        Self {
            print_mode,
            sync_offset: sync_offset.unwrap_or(self.sync_offset),
            ..self
        }
    }
}

//! # GCodeRender Core
//!
//! Core types, errors, and constants for GCodeRender.
//! Provides the vocabulary shared by the settings crate and the
//! toolpath parser / mesh generator.

pub mod constants;
pub mod data;
pub mod error;
pub mod units;

pub use data::{Axis, AxisValues, DepositRule, DrawStyle, PrintMode};
pub use error::{Error, GcodeError, Result};
pub use units::Units;

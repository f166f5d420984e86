//! Error handling for GCodeRender
//!
//! Provides the error taxonomy shared by every crate in the workspace:
//! - G-Code errors (malformed arguments, unsupported units, buffer limits)
//! - I/O errors (input file cannot be opened or read)
//! - Configuration errors
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

use crate::units::Units;

/// G-Code error type
///
/// Represents errors raised while interpreting a toolpath command stream.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GcodeError {
    /// An argument token is not `<letter><float>`
    #[error("Malformed argument '{token}' at line {line_number}")]
    MalformedArgument {
        /// The 1-based line number of the offending command.
        line_number: usize,
        /// The token that failed to decode.
        token: String,
    },

    /// Units other than millimeters were selected
    #[error("Unsupported units at line {line_number}: {units} (only millimeters are supported)")]
    UnsupportedUnits {
        /// The 1-based line number of the units command.
        line_number: usize,
        /// The units that were requested.
        units: Units,
    },

    /// Axis letter outside X, Y, Z, E, F in a motion command.
    ///
    /// Never returned by the parser; the axis is logged and ignored.
    #[error("Unknown axis '{axis}' at line {line_number}")]
    UnknownAxis {
        /// The 1-based line number of the motion command.
        line_number: usize,
        /// The unrecognized axis letter.
        axis: char,
    },

    /// A geometry buffer ran out of reserved space
    #[error("{buffer} buffer capacity exceeded: {requested} elements requested, {capacity} reserved")]
    BufferCapacityExceeded {
        /// Which buffer overflowed.
        buffer: &'static str,
        /// Elements reserved before the parse.
        capacity: usize,
        /// Elements that would have been stored.
        requested: usize,
    },
}

impl GcodeError {
    /// Whether this error aborts a parse
    pub fn is_fatal(&self) -> bool {
        !matches!(self, GcodeError::UnknownAxis { .. })
    }

    /// Line number the error refers to, if any
    pub fn line_number(&self) -> Option<usize> {
        match self {
            GcodeError::MalformedArgument { line_number, .. }
            | GcodeError::UnsupportedUnits { line_number, .. }
            | GcodeError::UnknownAxis { line_number, .. } => Some(*line_number),
            GcodeError::BufferCapacityExceeded { .. } => None,
        }
    }
}

/// Main error type for GCodeRender
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// G-Code error
    #[error(transparent)]
    Gcode(#[from] GcodeError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {reason}")]
    Config {
        /// Why the configuration was rejected.
        reason: String,
    },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Create a configuration error
    pub fn config(reason: impl Into<String>) -> Self {
        Error::Config {
            reason: reason.into(),
        }
    }

    /// Check if this is a G-Code error
    pub fn is_gcode_error(&self) -> bool {
        matches!(self, Error::Gcode(_))
    }

    /// Check if this is an I/O error
    pub fn is_io_error(&self) -> bool {
        matches!(self, Error::Io(_))
    }

    /// Borrow the inner G-Code error, if this is one
    pub fn as_gcode_error(&self) -> Option<&GcodeError> {
        match self {
            Error::Gcode(err) => Some(err),
            _ => None,
        }
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

//! Command dispatch table
//!
//! Maps command codes to handler functions. Each handler receives the
//! current [`CoordinateState`] and the raw argument text and returns a
//! [`Transition`]: the next state plus the motion it produced, if any.
//! Handlers decode their own arguments, so only the commands that read
//! coordinates can fail on a malformed token. Codes without a handler are
//! ignored by the parser.

use std::borrow::Cow;
use std::collections::HashMap;

use gcoderender_core::{Axis, DepositRule, GcodeError, PrintMode, Units};

use super::args::Arguments;
use super::motion::Motion;
use super::state::{AxisUpdate, CoordinateState};

/// Inputs a handler sees besides the state
#[derive(Debug, Clone, Copy)]
pub struct CommandContext<'a> {
    /// Argument text after the code, if any
    pub args: Option<&'a str>,
    /// 1-based line number, for diagnostics
    pub line_number: usize,
    pub deposit_rule: DepositRule,
}

impl CommandContext<'_> {
    /// Decode the arguments, failing on the first malformed token
    pub fn arguments(&self) -> Result<Arguments, GcodeError> {
        Arguments::decode(self.args, self.line_number)
    }

    /// Decode the arguments, dropping malformed tokens
    pub fn lenient_arguments(&self) -> Arguments {
        Arguments::decode_lenient(self.args)
    }
}

/// Outcome of one command
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: CoordinateState,
    pub motion: Option<Motion>,
    /// Axis letters that were ignored because they are not X, Y, Z, E or F
    pub unknown_axes: Vec<char>,
}

impl Transition {
    pub fn to(state: CoordinateState) -> Self {
        Self {
            state,
            motion: None,
            unknown_axes: Vec::new(),
        }
    }
}

/// Handler signature stored in the table
pub type CommandHandler =
    fn(CoordinateState, &CommandContext<'_>) -> Result<Transition, GcodeError>;

/// Code-to-handler lookup
#[derive(Clone)]
pub struct CommandTable {
    handlers: HashMap<String, CommandHandler>,
}

impl std::fmt::Debug for CommandTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandTable")
            .field("codes", &self.codes())
            .finish()
    }
}

impl CommandTable {
    /// A table without handlers
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Handlers for the command subset that affects geometry
    pub fn standard() -> Self {
        let mut table = Self::empty();
        table
            .register("G0", linear_move)
            .register("G1", linear_move)
            .register("G20", units_inches)
            .register("G21", no_op)
            .register("G28", no_op)
            .register("G90", absolute_positioning)
            .register("G91", relative_positioning)
            .register("G92", set_position)
            .register("M605", select_print_mode);
        table
    }

    /// Add or replace the handler for a code (case-insensitive)
    pub fn register(&mut self, code: &str, handler: CommandHandler) -> &mut Self {
        self.handlers.insert(code.to_ascii_uppercase(), handler);
        self
    }

    /// Handler for a code, if one is registered
    pub fn get(&self, code: &str) -> Option<CommandHandler> {
        let key = if code.bytes().any(|b| b.is_ascii_lowercase()) {
            Cow::Owned(code.to_ascii_uppercase())
        } else {
            Cow::Borrowed(code)
        };
        self.handlers.get(key.as_ref()).copied()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// Registered codes, sorted
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Split decoded arguments into positional axes and unknown letters
fn positional_axes(args: &Arguments) -> (AxisUpdate, Vec<char>) {
    let mut update = AxisUpdate::default();
    let mut unknown = Vec::new();
    for (letter, value) in args.iter() {
        match Axis::from_letter(letter) {
            Some(axis) => update.set(axis, value),
            None => unknown.push(letter),
        }
    }
    (update, unknown)
}

/// G0/G1: move to the named coordinates and classify the motion
pub fn linear_move(
    state: CoordinateState,
    ctx: &CommandContext<'_>,
) -> Result<Transition, GcodeError> {
    let (target, unknown_axes) = positional_axes(&ctx.arguments()?);
    let start = state.absolute();
    let next = state.moved_to(state.resolve(&target));
    let motion = Motion::classify(start, next.absolute(), ctx.deposit_rule);

    Ok(Transition {
        state: next,
        motion: Some(motion),
        unknown_axes,
    })
}

/// G20: inches are not supported by the geometry pipeline
pub fn units_inches(
    _state: CoordinateState,
    ctx: &CommandContext<'_>,
) -> Result<Transition, GcodeError> {
    Err(GcodeError::UnsupportedUnits {
        line_number: ctx.line_number,
        units: Units::Inches,
    })
}

/// G21, G28: accepted, no geometric effect
pub fn no_op(state: CoordinateState, _ctx: &CommandContext<'_>) -> Result<Transition, GcodeError> {
    Ok(Transition::to(state))
}

/// G90
pub fn absolute_positioning(
    state: CoordinateState,
    _ctx: &CommandContext<'_>,
) -> Result<Transition, GcodeError> {
    Ok(Transition::to(state.with_relative(false)))
}

/// G91
pub fn relative_positioning(
    state: CoordinateState,
    _ctx: &CommandContext<'_>,
) -> Result<Transition, GcodeError> {
    Ok(Transition::to(state.with_relative(true)))
}

/// G92: redefine the current position; no arguments resets all axes to zero
pub fn set_position(
    state: CoordinateState,
    ctx: &CommandContext<'_>,
) -> Result<Transition, GcodeError> {
    let args = ctx.arguments()?;
    let (target, unknown_axes) = if args.is_empty() {
        (AxisUpdate::ALL_ZERO, Vec::new())
    } else {
        positional_axes(&args)
    };

    Ok(Transition {
        state: state.reset_position(&target),
        motion: None,
        unknown_axes,
    })
}

/// M605: S0/S1 normal, S2 sync (X sets the offset), S3 mirror
///
/// Malformed tokens are dropped rather than failing the parse.
pub fn select_print_mode(
    state: CoordinateState,
    ctx: &CommandContext<'_>,
) -> Result<Transition, GcodeError> {
    let args = ctx.lenient_arguments();
    let mode = args.get('S').and_then(PrintMode::from_selector);

    let next = match mode {
        Some(PrintMode::Sync) => state.with_print_mode(PrintMode::Sync, args.get('X')),
        Some(mode) => state.with_print_mode(mode, None),
        None => state,
    };
    Ok(Transition::to(next))
}

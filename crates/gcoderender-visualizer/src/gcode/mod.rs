//! G-code interpretation: tokenizer, argument decoder, coordinate state,
//! motion classification, command dispatch and the parser driver

pub mod args;
pub mod dispatch;
pub mod motion;
pub mod parser;
pub mod state;
pub mod stream;
pub mod tokenizer;

pub use args::Arguments;
pub use dispatch::{CommandContext, CommandHandler, CommandTable, Transition};
pub use motion::{Motion, MotionKind};
pub use parser::{ParserOptions, ToolpathParser};
pub use state::{AxisUpdate, CoordinateState};
pub use stream::{count_lines, for_each_line, ToolpathFile};
pub use tokenizer::{split_command, split_comment, Command, SectionGate, Token, Tokenizer};

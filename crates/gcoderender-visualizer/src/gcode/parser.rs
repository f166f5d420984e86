//! Toolpath parser driver
//!
//! Runs the single forward pass over a command stream: tokenize each line,
//! dispatch interpreted commands through the [`CommandTable`], and feed
//! deposit motions to the bounding-volume accumulator and the mesh generator.
//! Buffers are sized from a line-count upper bound before the pass starts.

use std::io::BufRead;
use std::path::Path;

use gcoderender_core::{DepositRule, GcodeError, Result};
use gcoderender_settings::{Config, ParserSettings};
use glam::Vec3;
use tracing::{debug, trace, warn};

use super::dispatch::{CommandContext, CommandTable};
use super::motion::Motion;
use super::state::CoordinateState;
use super::stream::{self, ToolpathFile};
use super::tokenizer::{Command, SectionGate, Token, Tokenizer};
use crate::visualizer::{
    BoundingBox, BoundsAccumulator, ToolpathModel, ToolpathStats, TubeMeshConfig,
    TubeMeshGenerator,
};

/// Command interpretation options
#[derive(Debug, Clone, PartialEq)]
pub struct ParserOptions {
    /// Comment keywords that enable interpretation of the following lines
    pub section_markers: Vec<String>,
    pub deposit_rule: DepositRule,
    /// Remove `N<line>` prefixes and `*<checksum>` suffixes
    pub strip_line_numbers: bool,
    /// Lines between progress events (0 disables)
    pub progress_interval: usize,
    /// Deposit points outside this volume are not framed
    pub bed_bounds: Option<BoundingBox>,
}

impl From<&ParserSettings> for ParserOptions {
    fn from(settings: &ParserSettings) -> Self {
        Self {
            section_markers: settings.section_markers.clone(),
            deposit_rule: settings.deposit_rule,
            strip_line_numbers: settings.strip_line_numbers,
            progress_interval: settings.progress_interval,
            bed_bounds: settings
                .bed_bounds
                .map(|bed| BoundingBox::new(Vec3::from_array(bed.min), Vec3::from_array(bed.max))),
        }
    }
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self::from(&ParserSettings::default())
    }
}

/// Parses toolpath command streams into [`ToolpathModel`]s
///
/// The parser itself is immutable configuration; every parse owns its own
/// state, so one parser can serve independent parses on several threads.
#[derive(Debug, Clone, Default)]
pub struct ToolpathParser {
    options: ParserOptions,
    mesh: TubeMeshConfig,
    commands: CommandTable,
}

impl ToolpathParser {
    pub fn new(options: ParserOptions, mesh: TubeMeshConfig) -> Self {
        Self {
            options,
            mesh,
            commands: CommandTable::standard(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            ParserOptions::from(&config.parser),
            TubeMeshConfig::from(&config.mesh),
        )
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    pub fn mesh_config(&self) -> &TubeMeshConfig {
        &self.mesh
    }

    /// Parse a file: one pass to count lines, a second to parse
    ///
    /// # Errors
    /// I/O failures, malformed arguments, unsupported units.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<ToolpathModel> {
        let file = ToolpathFile::open(path)?;
        let line_count = file.count_lines()?;
        debug!(
            "Parsing {} ({} lines, {} bytes)",
            file.path().display(),
            line_count,
            file.file_size()
        );

        let mut run = ParseRun::new(self, line_count)?;
        file.for_each_line(|line_number, line| run.feed(line_number, line))?;
        Ok(run.finish())
    }

    /// Parse in-memory text
    pub fn parse_str(&self, text: &str) -> Result<ToolpathModel> {
        let mut run = ParseRun::new(self, text.lines().count())?;
        for (index, line) in text.lines().enumerate() {
            run.feed(index + 1, line)?;
        }
        Ok(run.finish())
    }

    /// Parse a stream whose line count is at most `line_bound`
    ///
    /// Buffers are sized from `line_bound`; a stream with more deposit
    /// motions than that fails with `BufferCapacityExceeded`, as does a
    /// bound too large to allocate for.
    pub fn parse_reader<R: BufRead>(&self, reader: R, line_bound: usize) -> Result<ToolpathModel> {
        let mut run = ParseRun::new(self, line_bound)?;
        stream::for_each_line(reader, |line_number, line| run.feed(line_number, line))?;
        Ok(run.finish())
    }
}

/// State owned by a single parse
struct ParseRun<'p> {
    parser: &'p ToolpathParser,
    tokenizer: Tokenizer,
    state: CoordinateState,
    mesh: TubeMeshGenerator,
    bounds: BoundsAccumulator,
    stats: ToolpathStats,
}

impl<'p> ParseRun<'p> {
    fn new(parser: &'p ToolpathParser, line_bound: usize) -> Result<Self> {
        let options = &parser.options;
        // every line can hold at most one deposit motion
        let mesh = TubeMeshGenerator::new(parser.mesh, line_bound)?;
        debug!(
            "Reserved geometry for {} segments ({} style)",
            line_bound, parser.mesh.style
        );

        Ok(Self {
            parser,
            tokenizer: Tokenizer::new(
                SectionGate::new(options.section_markers.iter().cloned()),
                options.strip_line_numbers,
            ),
            state: CoordinateState::new(),
            mesh,
            bounds: BoundsAccumulator::new(options.bed_bounds),
            stats: ToolpathStats::new(),
        })
    }

    fn feed(&mut self, line_number: usize, line: &str) -> Result<()> {
        self.stats.total_lines += 1;
        let interval = self.parser.options.progress_interval;
        if interval > 0 && line_number % interval == 0 {
            debug!(
                "Parsed {} lines, {} deposit segments",
                line_number, self.stats.deposits
            );
        }

        match self.tokenizer.tokenize(line) {
            Token::Empty | Token::Comment(_) => Ok(()),
            Token::Skipped => {
                self.stats.skipped_lines += 1;
                Ok(())
            }
            Token::Command(command) => self.execute(command, line_number),
        }
    }

    fn execute(&mut self, command: Command<'_>, line_number: usize) -> Result<()> {
        let Some(handler) = self.parser.commands.get(command.code) else {
            if self.stats.record_ignored(command.code) {
                debug!(
                    "Ignoring unsupported command {} (first seen at line {})",
                    command.code, line_number
                );
            }
            return Ok(());
        };

        let ctx = CommandContext {
            args: command.args,
            line_number,
            deposit_rule: self.parser.options.deposit_rule,
        };
        let transition = handler(self.state, &ctx)?;

        self.stats.commands += 1;
        for axis in transition.unknown_axes {
            let err = GcodeError::UnknownAxis { line_number, axis };
            if self.stats.record_unknown_axis(axis) {
                warn!("{}; ignoring it", err);
            } else {
                trace!("{}; ignoring it", err);
            }
        }
        self.state = transition.state;
        if let Some(motion) = transition.motion {
            self.apply_motion(&motion)?;
        }
        Ok(())
    }

    fn apply_motion(&mut self, motion: &Motion) -> Result<()> {
        self.stats.record_motion(motion);
        if !motion.is_deposit() {
            return Ok(());
        }

        let (start, end) = (motion.start_point(), motion.end_point());
        self.bounds.include(start);
        self.bounds.include(end);
        if !self.mesh.append_segment(start, end)? {
            self.stats.degenerate_segments += 1;
        }
        Ok(())
    }

    fn finish(mut self) -> ToolpathModel {
        self.stats.out_of_bed_points = self.bounds.rejected();
        let style = self.mesh.config().style;
        let (vertices, indices) = self.mesh.into_buffers();

        debug!(
            "Parse finished: {} lines, {} deposits, {} vertices, {} indices, print mode {}",
            self.stats.total_lines,
            self.stats.deposits,
            vertices.len() / crate::visualizer::FLOATS_PER_VERTEX,
            indices.len(),
            self.state.print_mode
        );

        ToolpathModel::new(
            vertices,
            indices,
            self.bounds.finish(),
            self.state.print_mode,
            self.state.sync_offset,
            style,
            self.stats,
        )
    }
}

//! Line tokenizer and section gate
//!
//! Splits a raw line into an optional comment and an optional command
//! (code + argument string). Comments feed the [`SectionGate`], which
//! decides whether the lines that follow are interpreted at all.

use std::collections::HashSet;
use std::sync::OnceLock;

use gcoderender_core::constants::COMMENT_DELIMITER;
use regex::Regex;

/// Gate toggled by section-marker comments
///
/// Lines before the first marker are always interpreted. A comment whose
/// first word is on the allow-list opens the gate, any other comment closes it.
#[derive(Debug, Clone)]
pub struct SectionGate {
    markers: HashSet<String>,
    skip: bool,
}

impl SectionGate {
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            markers: markers.into_iter().map(Into::into).collect(),
            skip: false,
        }
    }

    /// Update the gate from a non-empty comment body
    pub fn observe_comment(&mut self, comment: &str) {
        let keyword = comment.split_whitespace().next().unwrap_or("");
        self.skip = !self.markers.contains(keyword);
    }

    /// Whether commands are currently being skipped
    pub fn is_skipping(&self) -> bool {
        self.skip
    }

    /// Whether `keyword` is a recognized section marker
    pub fn is_marker(&self, keyword: &str) -> bool {
        self.markers.contains(keyword)
    }
}

/// A command code with its raw argument string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command<'a> {
    /// First word, e.g. `G1`
    pub code: &'a str,
    /// Everything after the first word, if anything
    pub args: Option<&'a str>,
}

/// Result of tokenizing one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Nothing to interpret
    Empty,
    /// The line carried a comment; it updated the gate
    Comment(&'a str),
    /// A command that the closed gate suppressed
    Skipped,
    /// A command to interpret
    Command(Command<'a>),
}

/// Stateful line tokenizer
#[derive(Debug, Clone)]
pub struct Tokenizer {
    gate: SectionGate,
    strip_line_numbers: bool,
}

impl Tokenizer {
    pub fn new(gate: SectionGate, strip_line_numbers: bool) -> Self {
        Self {
            gate,
            strip_line_numbers,
        }
    }

    pub fn gate(&self) -> &SectionGate {
        &self.gate
    }

    /// Tokenize one line, updating the section gate as a side effect
    pub fn tokenize<'a>(&mut self, line: &'a str) -> Token<'a> {
        let (command_text, comment) = split_comment(line);

        if let Some(comment) = comment {
            self.gate.observe_comment(comment);
            return Token::Comment(comment);
        }

        let command_text = if self.strip_line_numbers {
            strip_line_number(command_text)
        } else {
            command_text.trim()
        };

        if command_text.is_empty() {
            return Token::Empty;
        }
        if self.gate.is_skipping() {
            return Token::Skipped;
        }

        match split_command(command_text) {
            Some(command) => Token::Command(command),
            None => Token::Empty,
        }
    }
}

/// Split on the first comment delimiter; an empty comment counts as absent
pub fn split_comment(line: &str) -> (&str, Option<&str>) {
    match line.split_once(COMMENT_DELIMITER) {
        Some((command, comment)) => {
            let comment = comment.trim();
            (command, (!comment.is_empty()).then_some(comment))
        }
        None => (line, None),
    }
}

/// Split trimmed command text into code and argument string
pub fn split_command(text: &str) -> Option<Command<'_>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    match text.split_once(char::is_whitespace) {
        Some((code, args)) => {
            let args = args.trim();
            Some(Command {
                code,
                args: (!args.is_empty()).then_some(args),
            })
        }
        None => Some(Command {
            code: text,
            args: None,
        }),
    }
}

/// Remove a leading `N<digits>` word and a trailing `*<digits>` checksum
fn strip_line_number(text: &str) -> &str {
    let text = text.trim();
    let starts_with_n = text.starts_with(['N', 'n']);
    if !starts_with_n && !text.contains('*') {
        return text;
    }

    static LINE_NUMBER_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = LINE_NUMBER_REGEX.get_or_init(|| {
        Regex::new(r"^(?:[Nn]\d+(?:\s+|$))?(?P<body>.*?)(?:\s*\*\d*)?$")
            .expect("invalid regex pattern")
    });

    regex
        .captures(text)
        .and_then(|caps| caps.name("body"))
        .map(|body| body.as_str().trim())
        .unwrap_or(text)
}

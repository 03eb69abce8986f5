//! Classified line types produced by the parsing pipeline.

use serde::{Deserialize, Serialize};

use crate::platform::PlatformTag;

/// Semantic role of a single log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    /// Exception headline or error message
    Error,

    /// A frame of a stack trace
    StackFrame,

    /// Anything else: context, metadata, async gaps
    Info,
}

impl LineKind {
    /// Short fixed-width label used by the text renderer.
    pub fn label(&self) -> &'static str {
        match self {
            LineKind::Error => "ERROR",
            LineKind::StackFrame => "FRAME",
            LineKind::Info => "INFO",
        }
    }
}

impl std::fmt::Display for LineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One classified, non-blank line of a crash log.
///
/// Location fields are only ever populated for [`LineKind::StackFrame`] lines
/// and only when the line actually encodes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedLine {
    pub kind: LineKind,

    /// The input line with surrounding whitespace trimmed (never empty)
    pub text: String,

    /// File, package path, or binary image the frame points into
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,

    /// 1-based line number within `source_file`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_line: Option<u32>,

    /// 1-based column number within `source_file`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_column: Option<u32>,

    /// Function, method, or symbol name of the frame
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol_name: Option<String>,
}

impl ParsedLine {
    pub fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            source_file: None,
            source_line: None,
            source_column: None,
            symbol_name: None,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(LineKind::Error, text)
    }

    pub fn frame(text: impl Into<String>) -> Self {
        Self::new(LineKind::StackFrame, text)
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(LineKind::Info, text)
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.source_file = Some(file.into());
        self
    }

    /// Set the line number from a captured digit string.
    ///
    /// Values that do not fit a `u32` leave the field absent.
    pub fn with_line(mut self, line: &str) -> Self {
        self.source_line = line.parse().ok();
        self
    }

    pub fn with_column(mut self, column: &str) -> Self {
        self.source_column = column.parse().ok();
        self
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol_name = Some(symbol.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.kind == LineKind::Error
    }

    pub fn is_frame(&self) -> bool {
        self.kind == LineKind::StackFrame
    }

    /// Returns `file:line:col`, `file:line`, or `file` depending on which
    /// parts were extracted.
    pub fn location(&self) -> Option<String> {
        let file = self.source_file.as_deref()?;
        Some(match (self.source_line, self.source_column) {
            (Some(line), Some(col)) => format!("{file}:{line}:{col}"),
            (Some(line), None) => format!("{file}:{line}"),
            _ => file.to_string(),
        })
    }
}

/// Per-kind line counts of a parsed log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LineSummary {
    pub errors: usize,
    pub frames: usize,
    pub info: usize,
}

impl LineSummary {
    pub fn total(&self) -> usize {
        self.errors + self.frames + self.info
    }
}

/// Result of one pipeline invocation.
///
/// `tag` is `None` only when auto-detection failed, in which case `lines` is
/// empty and the caller should ask for an explicit platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedLog {
    pub tag: Option<PlatformTag>,
    pub lines: Vec<ParsedLine>,
}

impl ParsedLog {
    pub fn new(tag: Option<PlatformTag>, lines: Vec<ParsedLine>) -> Self {
        Self { tag, lines }
    }

    /// The empty result returned when auto-detection finds no platform.
    pub fn undetected() -> Self {
        Self::default()
    }

    pub fn is_undetected(&self) -> bool {
        self.tag.is_none()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn summary(&self) -> LineSummary {
        self.lines
            .iter()
            .fold(LineSummary::default(), |mut acc, line| {
                match line.kind {
                    LineKind::Error => acc.errors += 1,
                    LineKind::StackFrame => acc.frames += 1,
                    LineKind::Info => acc.info += 1,
                }
                acc
            })
    }

    /// The first `Error` line, usually the exception headline.
    pub fn first_error(&self) -> Option<&ParsedLine> {
        self.lines.iter().find(|l| l.is_error())
    }

    pub fn frames(&self) -> impl Iterator<Item = &ParsedLine> {
        self.lines.iter().filter(|l| l.is_frame())
    }

    /// Plain-text export: every line's text joined with `\n`.
    pub fn to_plain_text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

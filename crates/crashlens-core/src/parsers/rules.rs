//! Ordered first-match-wins line classification.
//!
//! Every platform parser is a [`RuleSet`]: a list of named rules tried top to
//! bottom, a fallback for lines no rule claims, and an initial mode. The mode
//! is a small `Copy` enum threaded through a fold over the lines, so a parser
//! never holds state between calls.

use tracing::trace;

use crate::types::ParsedLine;

/// The line a rule is asked to classify.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LineContext<'a, M> {
    /// Trimmed input line, copied verbatim into `ParsedLine::text`
    pub text: &'a str,

    /// Part of the line the rules match against (the text minus any
    /// transport prefix the parser strips, e.g. a logcat header)
    pub body: &'a str,

    /// Position among the non-blank lines, starting at 0
    pub index: usize,

    /// Parser mode before this line
    pub mode: M,
}

/// A rule's verdict: the classified line and, optionally, a new mode.
#[derive(Debug)]
pub(crate) struct Classified<M> {
    pub line: ParsedLine,
    pub next_mode: Option<M>,
}

impl<M> Classified<M> {
    /// Classify without changing mode.
    pub fn stay(line: ParsedLine) -> Self {
        Self {
            line,
            next_mode: None,
        }
    }

    /// Classify and switch to `mode` for the following lines.
    pub fn switch(line: ParsedLine, mode: M) -> Self {
        Self {
            line,
            next_mode: Some(mode),
        }
    }
}

pub(crate) type Rule<M> = fn(&LineContext<'_, M>) -> Option<Classified<M>>;

/// A complete classification strategy for one platform.
pub(crate) struct RuleSet<M: 'static> {
    pub name: &'static str,
    pub initial_mode: M,
    pub rules: &'static [(&'static str, Rule<M>)],
    pub fallback: fn(&LineContext<'_, M>) -> ParsedLine,
    pub body: fn(&str) -> &str,
}

impl<M: Copy + std::fmt::Debug> RuleSet<M> {
    /// Classify every non-blank line of `raw`, preserving input order.
    pub fn classify(&self, raw: &str) -> Vec<ParsedLine> {
        let (lines, final_mode) = non_blank_lines(raw).enumerate().fold(
            (Vec::new(), self.initial_mode),
            |(mut out, mode), (index, text)| {
                let ctx = LineContext {
                    text,
                    body: (self.body)(text),
                    index,
                    mode,
                };
                let (line, next_mode) = self.apply(&ctx);
                out.push(line);
                (out, next_mode)
            },
        );

        trace!(
            parser = self.name,
            lines = lines.len(),
            ?final_mode,
            "classified log"
        );
        lines
    }

    fn apply(&self, ctx: &LineContext<'_, M>) -> (ParsedLine, M) {
        for (rule_name, rule) in self.rules {
            if let Some(classified) = rule(ctx) {
                trace!(
                    parser = self.name,
                    rule = rule_name,
                    index = ctx.index,
                    kind = %classified.line.kind,
                    "rule matched"
                );
                return (classified.line, classified.next_mode.unwrap_or(ctx.mode));
            }
        }
        ((self.fallback)(ctx), ctx.mode)
    }
}

/// Trimmed, non-blank lines in input order. Handles `\n` and `\r\n`.
pub(crate) fn non_blank_lines(raw: &str) -> impl Iterator<Item = &str> {
    raw.lines().map(str::trim).filter(|line| !line.is_empty())
}

/// Body extractor for parsers that match against the whole line.
pub(crate) fn whole_line(text: &str) -> &str {
    text
}

/// Fallback used by parsers whose unmatched lines are always `Info`.
pub(crate) fn info_fallback<M>(ctx: &LineContext<'_, M>) -> ParsedLine {
    ParsedLine::info(ctx.text)
}

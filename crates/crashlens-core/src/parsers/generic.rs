//! JavaScript-style stack traces (React Native, Metro, Node).
//!
//! The first line is the exception headline; frames look like
//! `at fn (file:line:col)` or, for anonymous frames, `at file:line:col`.

use regex::Regex;
use std::sync::LazyLock;

use super::rules::{info_fallback, whole_line, Classified, LineContext, RuleSet};
use crate::types::ParsedLine;

/// Matches `at Foo (/src/Foo.js:10:5)`
/// Captures: 1=function, 2=file, 3=line, 4=column
static NAMED_FRAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^at\s+(.+?)\s+\((.+?):(\d+):(\d+)\)$").expect("Invalid NAMED_FRAME_REGEX")
});

/// Matches `at /src/Foo.js:10:5`
/// Captures: 1=file, 2=line, 3=column
static ANONYMOUS_FRAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^at\s+(.+?):(\d+):(\d+)$").expect("Invalid ANONYMOUS_FRAME_REGEX")
});

static RULES: RuleSet<()> = RuleSet {
    name: "react-native",
    initial_mode: (),
    rules: &[
        ("headline", headline),
        ("named_frame", named_frame),
        ("anonymous_frame", anonymous_frame),
    ],
    fallback: info_fallback,
    body: whole_line,
};

/// Parse a JavaScript-style stack trace.
pub fn parse(raw: &str) -> Vec<ParsedLine> {
    RULES.classify(raw)
}

fn headline(ctx: &LineContext<'_, ()>) -> Option<Classified<()>> {
    (ctx.index == 0).then(|| Classified::stay(ParsedLine::error(ctx.text)))
}

fn named_frame(ctx: &LineContext<'_, ()>) -> Option<Classified<()>> {
    let caps = NAMED_FRAME_REGEX.captures(ctx.body)?;
    Some(Classified::stay(
        ParsedLine::frame(ctx.text)
            .with_symbol(&caps[1])
            .with_file(&caps[2])
            .with_line(&caps[3])
            .with_column(&caps[4]),
    ))
}

fn anonymous_frame(ctx: &LineContext<'_, ()>) -> Option<Classified<()>> {
    let caps = ANONYMOUS_FRAME_REGEX.captures(ctx.body)?;
    Some(Classified::stay(
        ParsedLine::frame(ctx.text)
            .with_file(&caps[1])
            .with_line(&caps[2])
            .with_column(&caps[3]),
    ))
}

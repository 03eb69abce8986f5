//! Dart VM stack traces (Flutter).

use regex::Regex;
use std::sync::LazyLock;

use super::rules::{info_fallback, whole_line, Classified, LineContext, RuleSet};
use crate::types::ParsedLine;

/// Async suspension marker printed between awaited frames.
pub(crate) const ASYNC_GAP_MARKER: &str = "<asynchronous suspension>";

/// Matches `#0      main (package:app/main.dart:15:3)`
/// Captures: 1=frame number, 2=function, 3=package path, 4=line, 5=column
static PACKAGE_FRAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#(\d+)\s+(.+?)\s+\((package:.+?):(\d+):(\d+)\)$")
        .expect("Invalid PACKAGE_FRAME_REGEX")
});

/// Matches `#1      _rootRunUnary (dart:async/zone.dart:1406:47)` and
/// absolute file paths.
/// Captures: 1=frame number, 2=function, 3=file, 4=line, 5=column
static FILE_FRAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#(\d+)\s+(.+?)\s+\((.+?):(\d+):(\d+)\)$").expect("Invalid FILE_FRAME_REGEX")
});

/// Matches frames without a column: `#0      main (package:app/main.dart:15)`
/// Captures: 1=frame number, 2=function, 3=file, 4=line
static FRAME_NO_COL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#(\d+)\s+(.+?)\s+\((.+?):(\d+)\)$").expect("Invalid FRAME_NO_COL_REGEX")
});

/// Matches the `package:stack_trace` terse format:
/// `package:app/main.dart 15:3  main`
/// Captures: 1=file, 2=line, 3=column, 4=function
static FRIENDLY_FRAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^((?:package:|dart:|/)\S+)\s+(\d+):(\d+)\s+(.+)$")
        .expect("Invalid FRIENDLY_FRAME_REGEX")
});

static RULES: RuleSet<()> = RuleSet {
    name: "flutter",
    initial_mode: (),
    rules: &[
        ("exception_message", exception_message),
        ("package_frame", package_frame),
        ("file_frame", file_frame),
        ("frame_no_column", frame_no_column),
        ("friendly_frame", friendly_frame),
        ("async_gap", async_gap),
    ],
    fallback: info_fallback,
    body: whole_line,
};

/// Parse a Dart stack trace.
pub fn parse(raw: &str) -> Vec<ParsedLine> {
    RULES.classify(raw)
}

/// A leading line that is not a frame is the exception message.
fn exception_message(ctx: &LineContext<'_, ()>) -> Option<Classified<()>> {
    (ctx.index == 0 && !ctx.body.starts_with('#'))
        .then(|| Classified::stay(ParsedLine::error(ctx.text)))
}

fn package_frame(ctx: &LineContext<'_, ()>) -> Option<Classified<()>> {
    full_frame(ctx, &PACKAGE_FRAME_REGEX)
}

fn file_frame(ctx: &LineContext<'_, ()>) -> Option<Classified<()>> {
    full_frame(ctx, &FILE_FRAME_REGEX)
}

fn full_frame(ctx: &LineContext<'_, ()>, regex: &Regex) -> Option<Classified<()>> {
    let caps = regex.captures(ctx.body)?;
    Some(Classified::stay(
        ParsedLine::frame(ctx.text)
            .with_symbol(&caps[2])
            .with_file(&caps[3])
            .with_line(&caps[4])
            .with_column(&caps[5]),
    ))
}

fn frame_no_column(ctx: &LineContext<'_, ()>) -> Option<Classified<()>> {
    let caps = FRAME_NO_COL_REGEX.captures(ctx.body)?;
    Some(Classified::stay(
        ParsedLine::frame(ctx.text)
            .with_symbol(&caps[2])
            .with_file(&caps[3])
            .with_line(&caps[4]),
    ))
}

fn friendly_frame(ctx: &LineContext<'_, ()>) -> Option<Classified<()>> {
    let caps = FRIENDLY_FRAME_REGEX.captures(ctx.body)?;
    Some(Classified::stay(
        ParsedLine::frame(ctx.text)
            .with_file(&caps[1])
            .with_line(&caps[2])
            .with_column(&caps[3])
            .with_symbol(caps[4].trim()),
    ))
}

fn async_gap(ctx: &LineContext<'_, ()>) -> Option<Classified<()>> {
    ctx.body
        .contains(ASYNC_GAP_MARKER)
        .then(|| Classified::stay(ParsedLine::info(ctx.text)))
}

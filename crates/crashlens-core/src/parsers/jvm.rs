//! JVM exceptions as printed by Android's logcat.
//!
//! Lines may carry a logcat header (`E/AndroidRuntime( 4521): ` or a
//! `threadtime` timestamp prefix). Rules match against the message after that
//! header; `ParsedLine::text` keeps the full line.

use regex::Regex;
use std::sync::LazyLock;

use super::rules::{info_fallback, Classified, LineContext, RuleSet};
use crate::types::ParsedLine;

/// Marker AndroidRuntime prints at the top of an uncaught exception.
const CRASH_MARKER: &str = "FATAL EXCEPTION";

/// Matches logcat headers:
/// - brief/process: `E/AndroidRuntime( 4521): `, `E/AndroidRuntime: `
/// - threadtime: `03-14 09:26:53.123  4521  4521 E AndroidRuntime: `
static LOGCAT_HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        ^(?:
            [VDIWEFA]/[^\s(:]+\s*(?:\(\s*\d+\s*\))?:
          | \d{2}-\d{2}\s+\d{2}:\d{2}:\d{2}\.\d{3}\s+\d+\s+\d+\s+[VDIWEFA]\s+[^:]+?:
        )\s*",
    )
    .expect("Invalid LOGCAT_HEADER_REGEX")
});

/// Matches `at com.app.Main.onCreate(Main.java:24)`
/// Captures: 1=method, 2=file, 3=line
static FRAME_WITH_LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^at\s+([^\s(]+)\(([^()]+?):(\d+)\)").expect("Invalid FRAME_WITH_LINE_REGEX")
});

/// Matches `at java.lang.reflect.Method.invoke(Native Method)`
/// Captures: 1=method, 2=file
static FRAME_NO_LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^at\s+([^\s(]+)\(([^()]+)\)").expect("Invalid FRAME_NO_LINE_REGEX")
});

/// Matches a bare exception headline such as
/// `android.os.NetworkOnMainThreadException` or `com.app.SyncError: timed out`
static EXCEPTION_HEADLINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_$][\w$]*(?:\.[\w$]+)+(?:Exception|Error)(?::.*)?$")
        .expect("Invalid EXCEPTION_HEADLINE_REGEX")
});

/// Whether we are past an AndroidRuntime crash marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Idle,
    InException,
}

static RULES: RuleSet<Mode> = RuleSet {
    name: "android-logcat",
    initial_mode: Mode::Idle,
    rules: &[
        ("frame_with_line", frame_with_line),
        ("frame_no_line", frame_no_line),
        ("crash_marker", crash_marker),
        ("process_info", process_info),
        ("exception_class", exception_class),
        ("exception_context", exception_context),
    ],
    fallback: info_fallback,
    body: strip_logcat_header,
};

/// Parse a logcat JVM exception.
pub fn parse(raw: &str) -> Vec<ParsedLine> {
    RULES.classify(raw)
}

/// Remove a leading logcat header, returning the message body.
pub(crate) fn strip_logcat_header(text: &str) -> &str {
    match LOGCAT_HEADER_REGEX.find(text) {
        Some(header) => &text[header.end()..],
        None => text,
    }
}

fn frame_with_line(ctx: &LineContext<'_, Mode>) -> Option<Classified<Mode>> {
    let caps = FRAME_WITH_LINE_REGEX.captures(ctx.body)?;
    Some(Classified::stay(
        ParsedLine::frame(ctx.text)
            .with_symbol(&caps[1])
            .with_file(&caps[2])
            .with_line(&caps[3]),
    ))
}

fn frame_no_line(ctx: &LineContext<'_, Mode>) -> Option<Classified<Mode>> {
    let caps = FRAME_NO_LINE_REGEX.captures(ctx.body)?;
    Some(Classified::stay(
        ParsedLine::frame(ctx.text)
            .with_symbol(&caps[1])
            .with_file(&caps[2]),
    ))
}

fn crash_marker(ctx: &LineContext<'_, Mode>) -> Option<Classified<Mode>> {
    ctx.body
        .contains(CRASH_MARKER)
        .then(|| Classified::switch(ParsedLine::error(ctx.text), Mode::InException))
}

fn process_info(ctx: &LineContext<'_, Mode>) -> Option<Classified<Mode>> {
    (ctx.body.starts_with("Process:") || ctx.body.starts_with("PID:"))
        .then(|| Classified::stay(ParsedLine::info(ctx.text)))
}

fn exception_class(ctx: &LineContext<'_, Mode>) -> Option<Classified<Mode>> {
    (ctx.body.starts_with("java.") || ctx.body.starts_with("kotlin."))
        .then(|| Classified::stay(ParsedLine::error(ctx.text)))
}

/// After a crash marker, chained causes and non-`java.` exception types are
/// part of the error too.
fn exception_context(ctx: &LineContext<'_, Mode>) -> Option<Classified<Mode>> {
    if ctx.mode != Mode::InException {
        return None;
    }
    (ctx.body.starts_with("Caused by:") || EXCEPTION_HEADLINE_REGEX.is_match(ctx.body))
        .then(|| Classified::stay(ParsedLine::error(ctx.text)))
}

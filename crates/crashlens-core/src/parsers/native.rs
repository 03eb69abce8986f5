//! Apple-style native crash reports.
//!
//! Only the crashed thread's backtrace counts as the stack trace: the mode
//! switches on at `Thread N Crashed:` and off again at `Binary Images:`.
//! Numbered frames (`0  Module  0x1a2b3c  symbol + 16`) are recognised
//! anywhere in the report.

use regex::Regex;
use std::sync::LazyLock;

use super::rules::{whole_line, Classified, LineContext, RuleSet};
use crate::types::ParsedLine;

/// Matches `0   libobjc.A.dylib   0x00000001a2b4c3d0 objc_msgSend + 16`
/// Captures: 1=frame index, 2=module, 3=address, 4=symbol
static FRAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\s+(\S+)\s+(0x[0-9a-fA-F]+)\s+(.+)$").expect("Invalid FRAME_REGEX")
});

/// Matches thread headers: `Thread 0`, `Thread 1:`, `Thread 3 name: ...`
static THREAD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Thread \d+").expect("Invalid THREAD_REGEX"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Outside,
    InStackTrace,
}

static RULES: RuleSet<Mode> = RuleSet {
    name: "ios-crash",
    initial_mode: Mode::Outside,
    rules: &[
        ("exception_type", exception_type),
        ("crashed_thread", crashed_thread),
        ("binary_images", binary_images),
        ("thread_header", thread_header),
        ("numbered_frame", numbered_frame),
    ],
    fallback: stack_or_info,
    body: whole_line,
};

/// Parse a native crash report.
pub fn parse(raw: &str) -> Vec<ParsedLine> {
    RULES.classify(raw)
}

fn exception_type(ctx: &LineContext<'_, Mode>) -> Option<Classified<Mode>> {
    ctx.body
        .starts_with("Exception Type:")
        .then(|| Classified::stay(ParsedLine::error(ctx.text)))
}

fn crashed_thread(ctx: &LineContext<'_, Mode>) -> Option<Classified<Mode>> {
    ctx.body
        .contains("Crashed:")
        .then(|| Classified::switch(ParsedLine::info(ctx.text), Mode::InStackTrace))
}

fn binary_images(ctx: &LineContext<'_, Mode>) -> Option<Classified<Mode>> {
    ctx.body
        .starts_with("Binary Images:")
        .then(|| Classified::switch(ParsedLine::info(ctx.text), Mode::Outside))
}

fn thread_header(ctx: &LineContext<'_, Mode>) -> Option<Classified<Mode>> {
    THREAD_REGEX
        .is_match(ctx.body)
        .then(|| Classified::stay(ParsedLine::info(ctx.text)))
}

fn numbered_frame(ctx: &LineContext<'_, Mode>) -> Option<Classified<Mode>> {
    let caps = FRAME_REGEX.captures(ctx.body)?;
    Some(Classified::stay(
        ParsedLine::frame(ctx.text)
            .with_file(&caps[2])
            .with_symbol(caps[4].trim()),
    ))
}

/// Unrecognised lines inside the crashed thread are still frames, just
/// without structured fields.
fn stack_or_info(ctx: &LineContext<'_, Mode>) -> ParsedLine {
    match ctx.mode {
        Mode::InStackTrace => ParsedLine::frame(ctx.text),
        Mode::Outside => ParsedLine::info(ctx.text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LineKind;

    fn kinds(lines: &[ParsedLine]) -> Vec<LineKind> {
        lines.iter().map(|l| l.kind).collect()
    }

    #[test]
    fn test_exception_type_is_error() {
        let lines = parse("Exception Type:  EXC_BAD_ACCESS (SIGSEGV)");
        assert_eq!(lines[0].kind, LineKind::Error);
    }

    #[test]
    fn test_numbered_frame_fields() {
        let lines = parse(
            "1   MyApp                           0x0000000100a1b2c4 -[ProfileViewController viewDidLoad] + 120",
        );
        let frame = &lines[0];
        assert_eq!(frame.kind, LineKind::StackFrame);
        assert_eq!(frame.source_file.as_deref(), Some("MyApp"));
        assert_eq!(
            frame.symbol_name.as_deref(),
            Some("-[ProfileViewController viewDidLoad] + 120")
        );
        assert_eq!(frame.source_line, None);
        assert_eq!(frame.source_column, None);
    }

    #[test]
    fn test_crashed_mode_turns_unmatched_lines_into_frames() {
        let raw = "\
Hardware Model: iPhone14,2
Thread 0 Crashed:
<unsymbolicated frame>
Binary Images:
0x100a10000 - 0x100b2ffff MyApp arm64";
        let lines = parse(raw);

        assert_eq!(
            kinds(&lines),
            vec![
                LineKind::Info,
                LineKind::Info,
                LineKind::StackFrame,
                LineKind::Info,
                LineKind::Info,
            ]
        );
        assert_eq!(lines[2].source_file, None);
        assert_eq!(lines[2].symbol_name, None);
    }

    #[test]
    fn test_numbered_frames_match_outside_crashed_thread() {
        let lines = parse("Thread 1:\n0   libsystem_kernel.dylib   0x00000001d2e3f4a8 __workq_kernreturn + 8");
        assert_eq!(kinds(&lines), vec![LineKind::Info, LineKind::StackFrame]);
        assert_eq!(
            lines[1].source_file.as_deref(),
            Some("libsystem_kernel.dylib")
        );
    }

    #[test]
    fn test_thread_headers_are_info_inside_stack() {
        let lines = parse("Thread 0 Crashed:\nThread 0 name: Dispatch queue: main");
        assert_eq!(kinds(&lines), vec![LineKind::Info, LineKind::Info]);
    }

    #[test]
    fn test_crashed_thread_line_beats_thread_header_rule() {
        // Both rules match; the mode must still flip.
        let lines = parse("Thread 3 Crashed:\nmystery");
        assert_eq!(kinds(&lines), vec![LineKind::Info, LineKind::StackFrame]);
    }
}

//! Human-readable rendering of a parsed log for the terminal.

use crashlens_core::{LineSummary, ParsedLine, ParsedLog};

/// Width of the kind column (`ERROR`, `FRAME`, `INFO`).
const KIND_WIDTH: usize = 6;

/// Render `log` as an annotated listing.
///
/// ```text
/// Platform: React Native (react-native)
/// Lines:    1 error, 1 frame, 0 info
///
/// ERROR  TypeError: boom
/// FRAME  at Foo (/src/Foo.js:10:5)
///        -> Foo @ /src/Foo.js:10:5
/// ```
pub fn render_text(log: &ParsedLog, show_locations: bool) -> String {
    let mut out = String::new();

    match log.tag {
        Some(tag) => out.push_str(&format!("Platform: {} ({})\n", tag.label(), tag.id())),
        None => out.push_str("Platform: unknown\n"),
    }
    out.push_str(&format!("Lines:    {}\n", summary_line(&log.summary())));

    if log.is_empty() {
        return out;
    }
    out.push('\n');

    for line in &log.lines {
        out.push_str(&format!(
            "{:<width$} {}\n",
            line.kind.label(),
            line.text,
            width = KIND_WIDTH
        ));
        if show_locations {
            if let Some(detail) = frame_detail(line) {
                out.push_str(&format!("{:<width$} -> {}\n", "", detail, width = KIND_WIDTH));
            }
        }
    }

    out
}

/// `"2 errors, 1 frame, 3 info"`
pub fn summary_line(summary: &LineSummary) -> String {
    format!(
        "{} {}, {} {}, {} info",
        summary.errors,
        plural(summary.errors, "error", "errors"),
        summary.frames,
        plural(summary.frames, "frame", "frames"),
        summary.info
    )
}

fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 {
        one
    } else {
        many
    }
}

fn frame_detail(line: &ParsedLine) -> Option<String> {
    match (line.symbol_name.as_deref(), line.location()) {
        (Some(symbol), Some(location)) => Some(format!("{symbol} @ {location}")),
        (Some(symbol), None) => Some(symbol.to_string()),
        (None, Some(location)) => Some(location),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crashlens_core::{run, PlatformSelector, PlatformTag};

    #[test]
    fn test_render_generic_trace() {
        let log = run(
            "TypeError: boom\n  at Foo (/src/Foo.js:10:5)\n  at /src/index.js:1:2\nnote",
            PlatformSelector::Auto,
        );
        let expected = "\
Platform: React Native (react-native)
Lines:    1 error, 2 frames, 1 info

ERROR  TypeError: boom
FRAME  at Foo (/src/Foo.js:10:5)
       -> Foo @ /src/Foo.js:10:5
FRAME  at /src/index.js:1:2
       -> /src/index.js:1:2
INFO   note
";
        assert_eq!(render_text(&log, true), expected);
    }

    #[test]
    fn test_render_without_locations() {
        let log = run(
            "TypeError: boom\nat Foo (/src/Foo.js:10:5)",
            PlatformSelector::Auto,
        );
        let rendered = render_text(&log, false);
        assert!(!rendered.contains("->"));
        assert!(rendered.ends_with("FRAME  at Foo (/src/Foo.js:10:5)\n"));
    }

    #[test]
    fn test_render_native_frame_symbol_and_module() {
        let log = run(
            "Thread 0 Crashed:\n0   MyApp   0x0000000100a1b2c4 main + 12",
            PlatformTag::NativeCrashReport.into(),
        );
        let rendered = render_text(&log, true);
        assert!(rendered.contains("       -> main + 12 @ MyApp\n"));
    }

    #[test]
    fn test_render_undetected() {
        let rendered = render_text(&ParsedLog::undetected(), true);
        assert_eq!(rendered, "Platform: unknown\nLines:    0 errors, 0 frames, 0 info\n");
    }

    #[test]
    fn test_summary_line_pluralization() {
        let summary = LineSummary {
            errors: 1,
            frames: 0,
            info: 2,
        };
        assert_eq!(summary_line(&summary), "1 error, 0 frames, 2 info");
    }
}

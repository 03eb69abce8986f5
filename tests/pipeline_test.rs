//! End-to-end classification of captured crash logs

use crashlens::config::OutputFormat;
use crashlens::{parse_command, Outcome, ParseOptions};
use crashlens_core::{detect, parse_as, run, LineKind, ParsedLog, PlatformSelector, PlatformTag};

const REACT_NATIVE: &str = include_str!("fixtures/logs/react_native.txt");
const ANDROID_LOGCAT: &str = include_str!("fixtures/logs/android_logcat.txt");
const IOS_CRASH: &str = include_str!("fixtures/logs/ios_crash.txt");
const FLUTTER: &str = include_str!("fixtures/logs/flutter.txt");
const UNKNOWN: &str = include_str!("fixtures/logs/unknown.txt");

const FIXTURES: [(&str, PlatformTag); 4] = [
    (REACT_NATIVE, PlatformTag::GenericStackTrace),
    (ANDROID_LOGCAT, PlatformTag::JvmException),
    (IOS_CRASH, PlatformTag::NativeCrashReport),
    (FLUTTER, PlatformTag::DartStackTrace),
];

fn kinds(log: &ParsedLog) -> Vec<LineKind> {
    log.lines.iter().map(|l| l.kind).collect()
}

fn non_blank_trimmed(raw: &str) -> Vec<&str> {
    raw.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect()
}

#[test]
fn test_fixtures_detect_their_platform() {
    for (raw, tag) in FIXTURES {
        assert_eq!(detect(raw), Some(tag), "fixture for {tag}");
    }
    assert_eq!(detect(UNKNOWN), None);
}

#[test]
fn test_unknown_fixture_is_undetected() {
    let log = run(UNKNOWN, PlatformSelector::Auto);
    assert!(log.is_undetected());
    assert!(log.lines.is_empty());
}

#[test]
fn test_lines_are_trimmed_non_blank_and_in_order() {
    for (raw, _) in FIXTURES {
        let expected = non_blank_trimmed(raw);
        for tag in PlatformTag::ALL {
            let log = parse_as(raw, tag);
            let texts: Vec<&str> = log.lines.iter().map(|l| l.text.as_str()).collect();
            assert_eq!(texts, expected, "parsing as {tag}");
            assert_eq!(log.to_plain_text(), expected.join("\n"));
        }
    }
}

#[test]
fn test_parsing_is_deterministic() {
    for (raw, _) in FIXTURES {
        assert_eq!(
            run(raw, PlatformSelector::Auto),
            run(raw, PlatformSelector::Auto)
        );
    }
}

#[test]
fn test_react_native_fixture() {
    let log = run(REACT_NATIVE, PlatformSelector::Auto);
    assert_eq!(log.tag, Some(PlatformTag::GenericStackTrace));
    assert_eq!(
        kinds(&log),
        vec![
            LineKind::Error,
            LineKind::Info,
            LineKind::Info,
            LineKind::Info,
            LineKind::StackFrame,
            LineKind::StackFrame,
            LineKind::StackFrame,
            LineKind::StackFrame,
        ]
    );

    let first = &log.lines[4];
    assert_eq!(first.symbol_name.as_deref(), Some("CartBadge"));
    assert_eq!(
        first.source_file.as_deref(),
        Some("/Users/dev/shop/src/components/CartBadge.tsx")
    );
    assert_eq!(first.source_line, Some(14));
    assert_eq!(first.source_column, Some(31));

    let anonymous = &log.lines[6];
    assert_eq!(anonymous.symbol_name, None);
    assert_eq!(anonymous.source_line, Some(149));

    let bundle = &log.lines[7];
    assert_eq!(bundle.symbol_name.as_deref(), Some("Object.<anonymous>"));
    assert_eq!(bundle.source_line, Some(118432));
    assert_eq!(bundle.source_column, Some(27));
}

#[test]
fn test_android_logcat_fixture() {
    let log = run(ANDROID_LOGCAT, PlatformSelector::Auto);
    assert_eq!(log.tag, Some(PlatformTag::JvmException));
    assert_eq!(
        kinds(&log),
        vec![
            LineKind::Info,       // --------- beginning of crash
            LineKind::Error,      // FATAL EXCEPTION
            LineKind::Info,       // Process: ..., PID: ...
            LineKind::Error,      // java.lang.RuntimeException
            LineKind::StackFrame, // ActivityThread.java:3449
            LineKind::StackFrame, // Looper.java:223
            LineKind::StackFrame, // Native Method
            LineKind::Error,      // Caused by: kotlin...
            LineKind::StackFrame, // MainActivity.kt:42
            LineKind::Info,       // ... 11 more
            LineKind::Info,       // ActivityTaskManager
        ]
    );

    // Text keeps the logcat header; fields come from the message body
    let frame = &log.lines[8];
    assert!(frame.text.starts_with("03-14 09:26:53.123"));
    assert_eq!(
        frame.symbol_name.as_deref(),
        Some("com.example.shop.MainActivity.onCreate")
    );
    assert_eq!(frame.source_file.as_deref(), Some("MainActivity.kt"));
    assert_eq!(frame.source_line, Some(42));

    let native = &log.lines[6];
    assert_eq!(native.source_file.as_deref(), Some("Native Method"));
    assert_eq!(native.source_line, None);

    assert!(log
        .first_error()
        .is_some_and(|l| l.text.ends_with("FATAL EXCEPTION: main")));
}

#[test]
fn test_ios_crash_fixture() {
    let log = run(IOS_CRASH, PlatformSelector::Auto);
    assert_eq!(log.tag, Some(PlatformTag::NativeCrashReport));

    let summary = log.summary();
    assert_eq!(summary.errors, 1);
    assert_eq!(summary.frames, 5);
    assert_eq!(summary.info, 11);

    let error = log.first_error().unwrap();
    assert!(error.text.starts_with("Exception Type:"));

    let frames: Vec<_> = log.frames().collect();
    assert_eq!(frames[0].source_file.as_deref(), Some("libobjc.A.dylib"));
    assert_eq!(frames[0].symbol_name.as_deref(), Some("objc_msgSend + 16"));
    assert_eq!(frames[1].source_file.as_deref(), Some("Shop"));
    assert_eq!(
        frames[1].symbol_name.as_deref(),
        Some("-[CartViewController viewDidLoad] + 120 (CartViewController.m:42)")
    );

    // Unsymbolicated line inside the crashed thread
    assert_eq!(frames[3].text, "<redacted>");
    assert_eq!(frames[3].source_file, None);

    // Binary image lines are outside the stack trace
    let last = log.lines.last().unwrap();
    assert!(last.text.starts_with("0x100a10000"));
    assert_eq!(last.kind, LineKind::Info);
}

#[test]
fn test_flutter_fixture() {
    let log = run(FLUTTER, PlatformSelector::Auto);
    assert_eq!(log.tag, Some(PlatformTag::DartStackTrace));
    assert_eq!(
        kinds(&log),
        vec![
            LineKind::Error,
            LineKind::StackFrame,
            LineKind::StackFrame,
            LineKind::StackFrame,
            LineKind::Info,
            LineKind::StackFrame,
            LineKind::StackFrame,
        ]
    );

    assert_eq!(log.lines[1].symbol_name.as_deref(), Some("_CartPageState.build"));
    assert_eq!(
        log.lines[3].source_file.as_deref(),
        Some("dart:async/zone.dart")
    );

    let no_column = &log.lines[5];
    assert_eq!(
        no_column.source_file.as_deref(),
        Some("package:shop/data/cart_repository.dart")
    );
    assert_eq!(no_column.source_line, Some(88));
    assert_eq!(no_column.source_column, None);
}

#[test]
fn test_explicit_platform_overrides_detection() {
    let log = run(
        ANDROID_LOGCAT,
        PlatformSelector::Explicit(PlatformTag::DartStackTrace),
    );
    assert_eq!(log.tag, Some(PlatformTag::DartStackTrace));
    assert_eq!(log.lines[0].kind, LineKind::Error);
    assert!(log.lines[1..].iter().all(|l| l.kind == LineKind::Info));
}

#[test]
fn test_detection_precedence_on_mixed_log() {
    let mixed = format!("{FLUTTER}\n{ANDROID_LOGCAT}");
    assert_eq!(detect(&mixed), Some(PlatformTag::JvmException));

    let mixed = format!("{IOS_CRASH}\n{REACT_NATIVE}");
    assert_eq!(detect(&mixed), Some(PlatformTag::GenericStackTrace));
}

#[test]
fn test_parse_command_on_fixture() {
    let options = ParseOptions {
        format: OutputFormat::Json,
        ..Default::default()
    };
    let mut out = Vec::new();
    let mut err = Vec::new();
    let outcome = parse_command(FLUTTER, &options, &mut out, &mut err).unwrap();
    assert_eq!(outcome, Outcome::Success);
    assert!(err.is_empty());

    let log: ParsedLog = serde_json::from_slice(&out).unwrap();
    assert_eq!(log, run(FLUTTER, PlatformSelector::Auto));
}

#[test]
fn test_parse_command_on_unknown_fixture() {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let outcome = parse_command(UNKNOWN, &ParseOptions::default(), &mut out, &mut err).unwrap();
    assert_eq!(outcome, Outcome::PlatformRequired);
    assert!(out.is_empty());
    assert!(String::from_utf8(err).unwrap().contains("--platform"));
}

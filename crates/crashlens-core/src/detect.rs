//! Platform detection from raw log text.
//!
//! Heuristics are checked in a fixed order and the first match wins, so a log
//! that mentions both `TypeError:` and `FATAL EXCEPTION:` is treated as a
//! JavaScript trace.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::parsers::dart::ASYNC_GAP_MARKER;
use crate::platform::PlatformTag;

/// Matches a numbered Dart frame pointing into a package:
/// `#0      main (package:app/main.dart:15:3)`
static DART_PACKAGE_FRAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"#\d+\s+.*\(package:").expect("Invalid DART_PACKAGE_FRAME_REGEX")
});

type Heuristic = fn(&str) -> bool;

/// Detection heuristics in precedence order.
static HEURISTICS: [(PlatformTag, Heuristic); 4] = [
    (PlatformTag::GenericStackTrace, looks_like_js_trace),
    (PlatformTag::JvmException, looks_like_jvm_exception),
    (PlatformTag::NativeCrashReport, looks_like_native_crash),
    (PlatformTag::DartStackTrace, looks_like_dart_trace),
];

/// Guess the platform of `raw`, or `None` if nothing matches.
///
/// Deterministic and side-effect free.
pub fn detect(raw: &str) -> Option<PlatformTag> {
    let detected = HEURISTICS
        .iter()
        .find(|(_, matches)| matches(raw))
        .map(|(tag, _)| *tag);

    match detected {
        Some(tag) => debug!(platform = %tag, "detected platform"),
        None => debug!(bytes = raw.len(), "no platform heuristic matched"),
    }
    detected
}

fn looks_like_js_trace(raw: &str) -> bool {
    raw.contains("TypeError:")
        || raw.contains("ReferenceError:")
        || (raw.contains("at ") && raw.contains("node_modules"))
}

fn looks_like_jvm_exception(raw: &str) -> bool {
    raw.contains("FATAL EXCEPTION:")
        || raw.contains("AndroidRuntime")
        || (raw.contains("java.") && raw.contains("Exception"))
}

fn looks_like_native_crash(raw: &str) -> bool {
    raw.contains("Exception Type:")
        || (raw.contains("Thread") && raw.contains("Crashed:"))
        || raw.contains("Binary Images:")
}

fn looks_like_dart_trace(raw: &str) -> bool {
    raw.contains("package:flutter/")
        || DART_PACKAGE_FRAME_REGEX.is_match(raw)
        || raw.contains(ASYNC_GAP_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_js_markers() {
        assert_eq!(
            detect("TypeError: undefined is not a function"),
            Some(PlatformTag::GenericStackTrace)
        );
        assert_eq!(
            detect("ReferenceError: foo is not defined"),
            Some(PlatformTag::GenericStackTrace)
        );
        assert_eq!(
            detect("Error: x\n  at f (/app/node_modules/lib/a.js:1:1)"),
            Some(PlatformTag::GenericStackTrace)
        );
    }

    #[test]
    fn test_at_without_node_modules_is_not_js() {
        assert_eq!(detect("look at this"), None);
    }

    #[test]
    fn test_detect_jvm_markers() {
        assert_eq!(
            detect("FATAL EXCEPTION: main"),
            Some(PlatformTag::JvmException)
        );
        assert_eq!(
            detect("E/AndroidRuntime(123): boom"),
            Some(PlatformTag::JvmException)
        );
        assert_eq!(
            detect("java.lang.IllegalStateException: nope"),
            Some(PlatformTag::JvmException)
        );
        assert_eq!(detect("java.lang.Thread"), None);
    }

    #[test]
    fn test_detect_native_markers() {
        assert_eq!(
            detect("Exception Type:  EXC_CRASH (SIGABRT)"),
            Some(PlatformTag::NativeCrashReport)
        );
        assert_eq!(
            detect("Thread 0 Crashed:\n0 MyApp 0x1 main + 1"),
            Some(PlatformTag::NativeCrashReport)
        );
        assert_eq!(
            detect("Binary Images:\n0x1 - 0x2 MyApp"),
            Some(PlatformTag::NativeCrashReport)
        );
    }

    #[test]
    fn test_detect_dart_markers() {
        assert_eq!(
            detect("#5 build (package:flutter/src/widgets/framework.dart:1:1)"),
            Some(PlatformTag::DartStackTrace)
        );
        assert_eq!(
            detect("#0      main (package:app/main.dart:15:3)"),
            Some(PlatformTag::DartStackTrace)
        );
        assert_eq!(
            detect("<asynchronous suspension>"),
            Some(PlatformTag::DartStackTrace)
        );
    }

    #[test]
    fn test_precedence_js_beats_jvm() {
        let raw = "FATAL EXCEPTION: main\nTypeError: x is undefined";
        assert_eq!(detect(raw), Some(PlatformTag::GenericStackTrace));
    }

    #[test]
    fn test_precedence_jvm_beats_native() {
        let raw = "FATAL EXCEPTION: main\nException Type: EXC_BAD_ACCESS";
        assert_eq!(detect(raw), Some(PlatformTag::JvmException));
    }

    #[test]
    fn test_precedence_native_beats_dart() {
        let raw = "Binary Images:\n#0 main (package:app/main.dart:1:1)";
        assert_eq!(detect(raw), Some(PlatformTag::NativeCrashReport));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(detect(""), None);
        assert_eq!(detect("hello world"), None);
    }

    #[test]
    fn test_descriptor_examples_detect_as_their_own_platform() {
        for tag in PlatformTag::ALL {
            assert_eq!(detect(tag.descriptor().example), Some(tag));
        }
    }

    #[test]
    fn test_detect_is_deterministic() {
        let raw = PlatformTag::NativeCrashReport.descriptor().example;
        assert_eq!(detect(raw), detect(raw));
    }
}

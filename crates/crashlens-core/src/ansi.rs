//! ANSI escape code handling for pasted crash logs.
//!
//! Logs copied out of a colourised terminal (`adb logcat -v color`, Metro,
//! `flutter run`) carry SGR sequences that would otherwise end up inside
//! `ParsedLine::text` and break the frame patterns.

use regex::Regex;
use std::sync::LazyLock;

/// Matches CSI sequences (`ESC [ ... letter`), OSC sequences terminated by
/// BEL or ST, and two-byte escapes.
static ANSI_ESCAPE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        \x1b\[[0-9;?]*[A-Za-z]                # CSI
        | \x1b\][^\x07\x1b]*(?:\x07|\x1b\\)   # OSC
        | \x1b[A-Za-z]                        # two-byte escape
        ",
    )
    .expect("ANSI regex pattern is valid")
});

/// Remove every ANSI escape sequence from `input`, keeping all visible text.
///
/// # Examples
///
/// ```
/// use crashlens_core::strip_ansi_codes;
///
/// assert_eq!(strip_ansi_codes("\x1b[31mE/AndroidRuntime\x1b[0m"), "E/AndroidRuntime");
/// ```
pub fn strip_ansi_codes(input: &str) -> String {
    ANSI_ESCAPE_PATTERN.replace_all(input, "").into_owned()
}

/// Check if a string contains ANSI escape sequences.
pub fn contains_ansi_codes(input: &str) -> bool {
    ANSI_ESCAPE_PATTERN.is_match(input)
}

//! The entry point callers use: detect (if asked), dispatch, parse.

use tracing::{debug, info};

use crate::detect::detect;
use crate::parsers::dispatch;
use crate::platform::{PlatformSelector, PlatformTag};
use crate::types::ParsedLog;

/// Classify a crash log.
///
/// With [`PlatformSelector::Auto`] the platform is detected first; if no
/// heuristic matches, the result is [`ParsedLog::undetected`] and nothing is
/// parsed. An explicit platform always wins, even if the text looks like
/// something else.
///
/// # Examples
///
/// ```
/// use crashlens_core::{run, LineKind, PlatformSelector, PlatformTag};
///
/// let log = run("FATAL EXCEPTION: main\njava.lang.NullPointerException", PlatformSelector::Auto);
/// assert_eq!(log.tag, Some(PlatformTag::JvmException));
/// assert_eq!(log.lines[1].kind, LineKind::Error);
///
/// assert!(run("hello world", PlatformSelector::Auto).is_undetected());
/// ```
pub fn run(raw: &str, selector: PlatformSelector) -> ParsedLog {
    let tag = match selector {
        PlatformSelector::Explicit(tag) => tag,
        PlatformSelector::Auto => match detect(raw) {
            Some(tag) => tag,
            None => {
                info!("Platform auto-detection failed; explicit platform required");
                return ParsedLog::undetected();
            }
        },
    };

    parse_as(raw, tag)
}

/// Parse `raw` with the parser for `tag`, skipping detection.
pub fn parse_as(raw: &str, tag: PlatformTag) -> ParsedLog {
    let lines = dispatch(tag)(raw);
    debug!(platform = %tag, lines = lines.len(), "parsed crash log");
    ParsedLog::new(Some(tag), lines)
}

//! Per-platform line parsers and the dispatcher that picks one.
//!
//! Every parser has the same shape: it splits the text into trimmed lines,
//! drops blank ones, and classifies each remaining line as `Error`,
//! `StackFrame`, or `Info` using an ordered rule list. Parsers never fail; a
//! log in the wrong format simply comes back as mostly `Info`.

pub mod dart;
pub mod generic;
pub mod jvm;
pub mod native;
pub(crate) mod rules;

use crate::platform::PlatformTag;
use crate::types::ParsedLine;

/// Signature shared by all platform parsers.
pub type ParserFn = fn(&str) -> Vec<ParsedLine>;

/// Select the parser for `tag`.
pub fn dispatch(tag: PlatformTag) -> ParserFn {
    match tag {
        PlatformTag::GenericStackTrace => generic::parse,
        PlatformTag::JvmException => jvm::parse,
        PlatformTag::NativeCrashReport => native::parse,
        PlatformTag::DartStackTrace => dart::parse,
    }
}

//! # crashlens-core - Crash Log Classification
//!
//! Foundation crate for crashlens. Turns a pasted crash log into an ordered
//! list of classified lines (`Error`, `StackFrame`, `Info`) with source
//! locations extracted where the format encodes them.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, thiserror, regex, tracing).
//!
//! ## Public API
//!
//! ### Pipeline (`pipeline`)
//! - [`run()`] - Detect (optionally) and parse a log in one call
//! - [`parse_as()`] - Parse with a known platform
//!
//! ### Platforms (`platform`)
//! - [`PlatformTag`] - The four supported log families
//! - [`PlatformSelector`] - A fixed platform or `auto`
//! - [`PLATFORMS`] - Static [`PlatformDescriptor`] table (labels, examples, extensions)
//!
//! ### Detection and parsing (`detect`, `parsers`)
//! - [`detect()`] - Ordered heuristics, first match wins
//! - [`dispatch()`] - Parser lookup for a [`PlatformTag`]
//!
//! ### Domain Types (`types`)
//! - [`ParsedLine`], [`LineKind`] - One classified line
//! - [`ParsedLog`], [`LineSummary`] - A pipeline result and its per-kind counts
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Error enum for everything around the (infallible) pipeline
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use crashlens_core::prelude::*;
//! ```

pub mod ansi;
pub mod detect;
pub mod error;
pub mod logging;
pub mod parsers;
pub mod pipeline;
pub mod platform;
pub mod types;

/// Prelude for common imports used throughout crashlens
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use ansi::{contains_ansi_codes, strip_ansi_codes};
pub use detect::detect;
pub use error::{Error, Result, ResultExt};
pub use parsers::{dispatch, ParserFn};
pub use pipeline::{parse_as, run};
pub use platform::{PlatformDescriptor, PlatformSelector, PlatformTag, PLATFORMS};
pub use types::{LineKind, LineSummary, ParsedLine, ParsedLog};

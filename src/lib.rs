//! crashlens Library
//!
//! Command-line front end for `crashlens-core`: configuration, rendering,
//! exports, and the commands the `crashlens` binary dispatches to.

// Module declarations
pub mod commands;
pub mod config;
pub mod export;
pub mod render;

// Re-export main entry points
pub use commands::{
    detect_command, example_command, parse_command, platforms_command, read_input,
    report_usage_error, Outcome, ParseOptions,
};

//! Exporting parsed logs to files.
//!
//! Plain-text exports contain the trimmed lines joined with newlines and use
//! the platform's preferred extension; JSON exports contain the whole
//! [`ParsedLog`].

use chrono::{DateTime, Local};
use crashlens_core::prelude::*;
use crashlens_core::{ParsedLog, PlatformTag};
use std::path::{Path, PathBuf};

use crate::config::OutputFormat;

/// Serialize `log` for an export file.
pub fn export_contents(log: &ParsedLog, format: OutputFormat) -> Result<String> {
    if format.is_json() {
        let mut json = serde_json::to_string_pretty(log)?;
        json.push('\n');
        Ok(json)
    } else {
        let mut text = log.to_plain_text();
        text.push('\n');
        Ok(text)
    }
}

/// File name for an export: `crash-<id>-<YYYYmmdd-HHMMSS>.<ext>`.
pub fn export_file_name(tag: PlatformTag, format: OutputFormat, at: DateTime<Local>) -> String {
    let extension = if format.is_json() {
        "json"
    } else {
        tag.descriptor().file_extension
    };
    format!(
        "crash-{}-{}.{}",
        tag.id(),
        at.format("%Y%m%d-%H%M%S"),
        extension
    )
}

/// Write `log` to `path`, creating parent directories as needed.
pub fn write_export(path: &Path, log: &ParsedLog, format: OutputFormat) -> Result<()> {
    let contents = export_contents(log, format)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::export(path, e.to_string()))?;
    }
    std::fs::write(path, contents).map_err(|e| Error::export(path, e.to_string()))?;

    info!(
        "Exported {} lines as {} to {}",
        log.lines.len(),
        format,
        path.display()
    );
    Ok(())
}

/// Write `log` into `dir` under a generated file name and return the path.
///
/// Undetected logs have nothing to export and are rejected.
pub fn export_to_dir(dir: &Path, log: &ParsedLog, format: OutputFormat) -> Result<PathBuf> {
    let tag = log
        .tag
        .ok_or_else(|| Error::export(dir, "no platform was detected, nothing to export"))?;
    let path = dir.join(export_file_name(tag, format, Local::now()));
    write_export(&path, log, format)?;
    Ok(path)
}

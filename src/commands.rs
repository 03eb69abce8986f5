//! Command implementations behind the `crashlens` binary.
//!
//! Commands write results to `out` and diagnostics to `err` so they can be
//! tested without a terminal; `main.rs` passes stdout and stderr.

use crashlens_core::prelude::*;
use crashlens_core::{
    contains_ansi_codes, run, strip_ansi_codes, ParsedLog, PlatformSelector, PlatformTag,
    PLATFORMS,
};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::config::OutputFormat;
use crate::export::{export_contents, export_to_dir, write_export};
use crate::render::render_text;

/// How a command finished, mapped to the process exit status by `main`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// Bad platform id or config value, already reported to the user
    UsageError,
    /// Auto-detection found no platform; the user must pass `--platform`
    PlatformRequired,
}

impl Outcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Success => 0,
            Outcome::UsageError => 1,
            Outcome::PlatformRequired => 2,
        }
    }
}

/// Fully resolved options for `crashlens parse` (config merged with flags).
#[derive(Debug, Clone)]
pub struct ParseOptions {
    pub selector: PlatformSelector,
    pub format: OutputFormat,
    pub strip_ansi: bool,
    pub show_locations: bool,
    /// Write the export to this exact file
    pub output: Option<PathBuf>,
    /// Write the export into this directory under a generated name
    pub export_dir: Option<PathBuf>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            selector: PlatformSelector::Auto,
            format: OutputFormat::Text,
            strip_ansi: false,
            show_locations: true,
            output: None,
            export_dir: None,
        }
    }
}

/// Read the crash log from `path`, or from stdin when `path` is `None` or `-`.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path.filter(|p| p.as_os_str() != "-") {
        Some(path) => {
            debug!("Reading crash log from {}", path.display());
            std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
        }
        None => {
            debug!("Reading crash log from stdin");
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("reading stdin")?;
            Ok(raw)
        }
    }
}

/// `crashlens parse`
pub fn parse_command(
    raw: &str,
    options: &ParseOptions,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<Outcome> {
    let text = prepare_input(raw, options.strip_ansi, err)?;
    let log = run(&text, options.selector);

    if log.is_undetected() {
        write_platform_hint(err)?;
        return Ok(Outcome::PlatformRequired);
    }

    let summary = log.summary();
    info!(
        platform = ?log.tag,
        errors = summary.errors,
        frames = summary.frames,
        info = summary.info,
        "Parsed crash log"
    );

    if let Some(path) = &options.output {
        write_export(path, &log, options.format)?;
        writeln!(err, "Exported {} lines to {}", log.lines.len(), path.display())?;
    } else if let Some(dir) = &options.export_dir {
        let path = export_to_dir(dir, &log, options.format)?;
        writeln!(err, "Exported {} lines to {}", log.lines.len(), path.display())?;
    } else {
        write_log(&log, options, out)?;
    }

    Ok(Outcome::Success)
}

/// `crashlens detect`
pub fn detect_command(
    raw: &str,
    strip_ansi: bool,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<Outcome> {
    let text = prepare_input(raw, strip_ansi, err)?;
    match crashlens_core::detect(&text) {
        Some(tag) => {
            writeln!(out, "{}", tag.id())?;
            Ok(Outcome::Success)
        }
        None => {
            writeln!(out, "unknown")?;
            Ok(Outcome::PlatformRequired)
        }
    }
}

/// `crashlens platforms`
pub fn platforms_command(out: &mut impl Write) -> Result<()> {
    let id_width = PLATFORMS.iter().map(|p| p.id.len()).max().unwrap_or(0);
    let label_width = PLATFORMS.iter().map(|p| p.label.len()).max().unwrap_or(0);

    for platform in &PLATFORMS {
        writeln!(
            out,
            "{:<id_width$}  {:<label_width$}  .{:<5}  {}",
            platform.id, platform.label, platform.file_extension, platform.description,
        )?;
    }
    Ok(())
}

/// `crashlens example <platform>`
pub fn example_command(tag: PlatformTag, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}", tag.descriptor().example)?;
    Ok(())
}

/// Turn a usage error into a friendly message on `err`.
///
/// Other errors are handed back for `main` to report.
pub fn report_usage_error(error: Error, err: &mut impl Write) -> Result<Outcome> {
    if !error.is_usage_error() {
        return Err(error);
    }
    writeln!(err, "❌ {error}")?;
    writeln!(
        err,
        "   Check .crashlens/config.toml or pass --platform explicitly."
    )?;
    Ok(Outcome::UsageError)
}

fn prepare_input(raw: &str, strip_ansi: bool, err: &mut impl Write) -> Result<String> {
    if strip_ansi {
        return Ok(strip_ansi_codes(raw));
    }
    if contains_ansi_codes(raw) {
        warn!("Input contains ANSI escape codes and stripping is off");
        writeln!(
            err,
            "note: input contains ANSI escape codes; pass --strip-ansi if frames are not recognised"
        )?;
    }
    Ok(raw.to_string())
}

fn write_log(log: &ParsedLog, options: &ParseOptions, out: &mut impl Write) -> Result<()> {
    match options.format {
        OutputFormat::Text => out.write_all(render_text(log, options.show_locations).as_bytes())?,
        OutputFormat::Plain | OutputFormat::Json => {
            out.write_all(export_contents(log, options.format)?.as_bytes())?
        }
    }
    Ok(())
}

fn write_platform_hint(err: &mut impl Write) -> Result<()> {
    writeln!(err, "Could not detect the platform of this log.")?;
    writeln!(
        err,
        "Pass --platform with one of: {}",
        PlatformTag::ids().join(", ")
    )?;
    Ok(())
}

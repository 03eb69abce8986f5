//! Configuration types for crashlens
//!
//! Defines:
//! - `Settings` - Project settings loaded from `.crashlens/config.toml`
//! - `InputSettings`, `OutputSettings` - Its sections
//! - `OutputFormat` - How `crashlens parse` prints results

use crashlens_core::prelude::*;
use crashlens_core::PlatformSelector;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application settings (.crashlens/config.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub input: InputSettings,

    #[serde(default)]
    pub output: OutputSettings,
}

/// How logs are read and which parser is used
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InputSettings {
    /// "auto" or a platform id (react-native, android-logcat, ios-crash, flutter)
    #[serde(default = "default_platform")]
    pub default_platform: String,

    /// Remove ANSI colour codes before parsing
    #[serde(default)]
    pub strip_ansi: bool,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            default_platform: default_platform(),
            strip_ansi: false,
        }
    }
}

impl InputSettings {
    /// The configured platform selector.
    ///
    /// An unknown id is a configuration error rather than a silent fallback
    /// to auto-detection.
    pub fn selector(&self) -> Result<PlatformSelector> {
        self.default_platform
            .parse::<PlatformSelector>()
            .map_err(|e| Error::config(format!("input.default_platform: {e}")))
    }
}

fn default_platform() -> String {
    PlatformSelector::AUTO_ID.to_string()
}

/// Output format for parsed logs
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Annotated, human-readable listing
    #[default]
    Text,

    /// Trimmed lines only, joined with newlines
    Plain,

    /// Pretty-printed JSON
    Json,
}

impl OutputFormat {
    /// Whether exports in this format are JSON documents.
    pub fn is_json(&self) -> bool {
        matches!(self, OutputFormat::Json)
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Plain => write!(f, "plain"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Output settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputSettings {
    #[serde(default)]
    pub format: OutputFormat,

    /// Show `file:line:col` under frames in text mode
    #[serde(default = "default_true")]
    pub show_locations: bool,

    /// Export every parse into this directory; empty prints to stdout
    #[serde(default)]
    pub export_dir: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            show_locations: true,
            export_dir: String::new(),
        }
    }
}

impl OutputSettings {
    pub fn export_dir(&self) -> Option<PathBuf> {
        let dir = self.export_dir.trim();
        (!dir.is_empty()).then(|| PathBuf::from(dir))
    }
}

fn default_true() -> bool {
    true
}

//! Settings parser for .crashlens/config.toml

use super::types::Settings;
use crashlens_core::prelude::*;
use std::path::Path;

pub const CONFIG_FILENAME: &str = "config.toml";
pub const CRASHLENS_DIR: &str = ".crashlens";

const DEFAULT_CONFIG: &str = r#"# crashlens configuration

[input]
default_platform = "auto"   # auto | react-native | android-logcat | ios-crash | flutter
strip_ansi = false          # Remove ANSI colour codes before parsing

[output]
format = "text"             # text | plain | json
show_locations = true       # Show file:line:col under frames in text mode
export_dir = ""             # Empty = print to stdout instead of exporting
"#;

/// Load settings from .crashlens/config.toml
///
/// Returns default settings if file doesn't exist or can't be parsed.
pub fn load_settings(project_path: &Path) -> Settings {
    let config_path = project_path.join(CRASHLENS_DIR).join(CONFIG_FILENAME);

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Create the default config file in .crashlens/
///
/// Returns `true` if a file was written, `false` if one already existed.
pub fn init_config_dir(project_path: &Path) -> Result<bool> {
    let crashlens_dir = project_path.join(CRASHLENS_DIR);

    if !crashlens_dir.exists() {
        std::fs::create_dir_all(&crashlens_dir)
            .map_err(|e| Error::config(format!("Failed to create .crashlens dir: {}", e)))?;
    }

    let config_path = crashlens_dir.join(CONFIG_FILENAME);
    if config_path.exists() {
        debug!("Config already present at {:?}", config_path);
        return Ok(false);
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .map_err(|e| Error::config(format!("Failed to write config.toml: {}", e)))?;
    info!("Wrote default config to {:?}", config_path);

    Ok(true)
}

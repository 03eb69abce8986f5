//! Configuration file parsing for crashlens
//!
//! Supports:
//! - `.crashlens/config.toml` - Project settings (default platform, output format)

pub mod settings;
pub mod types;

pub use settings::{init_config_dir, load_settings, CONFIG_FILENAME, CRASHLENS_DIR};
pub use types::*;

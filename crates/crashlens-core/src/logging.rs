//! Logging configuration using tracing

use chrono::{NaiveDate, Utc};
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{Error, Result};

/// Environment variable holding the tracing filter directive.
pub const LOG_ENV_VAR: &str = "CRASHLENS_LOG";

const DEFAULT_FILTER: &str = "crashlens=info,crashlens_core=info,warn";

/// Daily files are named `<prefix>.<YYYY-MM-DD>` (UTC date).
const LOG_FILE_PREFIX: &str = "crashlens.log";

/// Initialize the logging subsystem
///
/// Logs are written to `~/.local/share/crashlens/logs/` so that stdout stays
/// reserved for command output. Log level is controlled by `CRASHLENS_LOG`.
///
/// # Examples
/// ```bash
/// CRASHLENS_LOG=debug crashlens parse crash.txt
/// CRASHLENS_LOG=crashlens_core=trace crashlens detect crash.txt
/// ```
pub fn init() -> Result<()> {
    let log_dir = get_log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let env_filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(daily_appender(&log_dir))
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .try_init()
        .map_err(|e| Error::init(format!("tracing subscriber: {e}")))?;

    tracing::info!("crashlens {} starting", env!("CARGO_PKG_VERSION"));
    tracing::debug!("Log file: {}", get_current_log_file().display());

    Ok(())
}

fn daily_appender(log_dir: &Path) -> RollingFileAppender {
    RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_PREFIX)
}

/// Get the log directory path
fn get_log_directory() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("crashlens").join("logs")
}

/// Get the log file path for the current day
pub fn get_current_log_file() -> PathBuf {
    log_file_in(&get_log_directory(), Utc::now().date_naive())
}

/// The file the daily appender writes to on `date`.
fn log_file_in(log_dir: &Path, date: NaiveDate) -> PathBuf {
    log_dir.join(format!("{LOG_FILE_PREFIX}.{}", date.format("%Y-%m-%d")))
}

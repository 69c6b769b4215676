//! Tracing setup

use std::path::{Path, PathBuf};

use kernel::error::app_error::{AppError, AppResult};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const CRATES: [&str; 5] = ["vendor_check", "search", "records", "agent", "platform"];

/// Rotated files kept next to the current one
const MAX_LOG_FILES: usize = 5;

/// Directive applied when `RUST_LOG` is not set
pub fn default_directive(level: &str, verbose: bool) -> String {
    let level = if verbose { "debug" } else { level };
    CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Directory and file name prefix for a log path
fn split_log_path(path: &Path) -> (PathBuf, String) {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let prefix = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "vendor-check.log".to_string());
    (dir, prefix)
}

/// Daily-rotated appender writing `<path>.<date>`
fn file_appender(path: &Path) -> AppResult<RollingFileAppender> {
    let (dir, prefix) = split_log_path(path);
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .max_log_files(MAX_LOG_FILES)
        .build(&dir)
        .map_err(|e| {
            AppError::configuration(format!("Cannot open log file {}", path.display()))
                .with_source(e)
        })
}

/// Install the global subscriber: stderr always, plus `log_file` when given
pub fn init(level: &str, verbose: bool, log_file: Option<&Path>) -> AppResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(level, verbose)));

    let file_layer = match log_file {
        Some(path) => Some(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(file_appender(path)?),
        ),
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .map_err(|e| AppError::internal(format!("Logging already initialized: {e}")))
}

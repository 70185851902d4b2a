//! Logging setup for a training run.
//!
//! Installs a global tracing subscriber writing to a per-run log file and,
//! optionally, to stdout. Files are named after the wall-clock time at which
//! the run started.

use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use time::{format_description::FormatItem, macros::format_description, OffsetDateTime, UtcOffset};
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter, Registry};


pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_FILE_PREFIX: &str = "regselect";
pub const DEFAULT_LEVEL: &str = "info";

/// Where and how verbosely a run logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub log_dir: PathBuf,
    pub file_prefix: String,
    /// Default level, overridden by `RUST_LOG` when set.
    pub level: String,
    /// Mirror events to stdout in addition to the log file.
    pub stdout: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            level: DEFAULT_LEVEL.to_string(),
            stdout: false,
        }
    }
}

/// Errors that may occur while initializing logging.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to prepare log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to create log file at {path}: {source}")]
    CreateLogFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid log level {0:?}")]
    InvalidLevel(String),
    #[error("Failed to format log filename time: {0}")]
    FormatTime(time::error::Format),
    #[error("Failed to install global tracing subscriber: {0}")]
    SetGlobal(tracing::subscriber::SetGlobalDefaultError),
}

/// Keeps the background log writer alive. Buffered events are flushed when
/// the guard is dropped, so hold it until the run is over.
#[must_use = "dropping the guard stops file logging"]
pub struct LoggingGuard {
    _worker: WorkerGuard,
    log_path: PathBuf,
}

impl LoggingGuard {
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }
}

/// Initialize tracing for this process.
///
/// The subscriber is process-global: a second call fails with
/// [`LoggingError::SetGlobal`].
pub fn init(config: &LoggingConfig) -> Result<LoggingGuard, LoggingError> {
    let default_level = LevelFilter::from_str(&config.level)
        .map_err(|_| LoggingError::InvalidLevel(config.level.clone()))?;

    fs::create_dir_all(&config.log_dir).map_err(|source| LoggingError::CreateDir {
        path: config.log_dir.clone(),
        source,
    })?;
    let log_file_name = format_log_file_name(&config.file_prefix, now_local_or_utc())?;
    let log_path = config.log_dir.join(&log_file_name);
    ensure_file_exists(&log_path)?;

    let file_appender = rolling::never(&config.log_dir, log_file_name);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let timer = build_timer();
    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();
    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_line_number(true)
        .with_timer(timer.clone())
        .with_writer(file_writer);
    let stdout_layer = config.stdout.then(|| {
        fmt::layer()
            .with_line_number(true)
            .with_timer(timer)
            .with_writer(std::io::stdout)
    });

    let subscriber = Registry::default()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer);
    tracing::subscriber::set_global_default(subscriber).map_err(LoggingError::SetGlobal)?;

    tracing::info!("Logging initialized; log file at {}", log_path.display());
    Ok(LoggingGuard {
        _worker: guard,
        log_path,
    })
}

fn ensure_file_exists(path: &Path) -> Result<(), LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(|_| ())
        .map_err(|source| LoggingError::CreateLogFile {
            path: path.to_path_buf(),
            source,
        })
}

fn format_log_file_name(prefix: &str, now: OffsetDateTime) -> Result<String, LoggingError> {
    const NAME_FORMAT: &[FormatItem<'_>] =
        format_description!("[month]_[day]_[year]_[hour]_[minute]_[second]");
    let name = now.format(NAME_FORMAT).map_err(LoggingError::FormatTime)?;
    Ok(format!("{prefix}_{name}.log"))
}

fn build_timer() -> fmt::time::OffsetTime<&'static [FormatItem<'static>]> {
    const DISPLAY_FORMAT: &[FormatItem<'static>] =
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    fmt::time::OffsetTime::new(offset, DISPLAY_FORMAT)
}

fn now_local_or_utc() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

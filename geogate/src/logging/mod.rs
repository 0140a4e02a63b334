//! Tracing subscriber setup.
//!
//! The library only emits events through `tracing` macros. Binaries call
//! [`init_logging`] once at startup to decide where those events go: the
//! console always, plus a daily-rolling file when a directory is configured.

use std::path::PathBuf;

use thiserror::Error;
use time::format_description::well_known::Rfc3339;
use time::UtcOffset;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::time::OffsetTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Default log level when neither the config file nor `RUST_LOG` says otherwise.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// File name prefix for rolled log files.
pub const DEFAULT_LOG_FILE_PREFIX: &str = "geogate.log";

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Default level; `RUST_LOG` directives take precedence.
    pub level: String,
    /// Directory for rolling log files. Console only when `None`.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            directory: None,
            file_prefix: DEFAULT_LOG_FILE_PREFIX.to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }
}

/// Errors from [`init_logging`].
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log level '{0}'")]
    InvalidLevel(String),

    #[error("failed to create log directory {}: {source}", path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("a global subscriber is already installed: {0}")]
    AlreadyInitialized(String),
}

/// Keeps the background file writer alive. Dropping it flushes pending lines.
#[must_use = "dropping the guard stops file logging"]
#[derive(Debug)]
pub struct LoggingGuard {
    file_writer: Option<WorkerGuard>,
}

impl LoggingGuard {
    /// Whether a file layer was installed.
    pub fn has_file_output(&self) -> bool {
        self.file_writer.is_some()
    }
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Fails on an unparseable level, an uncreatable log directory, or when a
/// subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<LoggingGuard, LoggingError> {
    let level: LevelFilter = config
        .level
        .trim()
        .parse()
        .map_err(|_| LoggingError::InvalidLevel(config.level.clone()))?;

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    // The local offset is unavailable on some platforms once threads exist.
    let timer = OffsetTime::local_rfc_3339()
        .unwrap_or_else(|_| OffsetTime::new(UtcOffset::UTC, Rfc3339));

    let console = fmt::layer()
        .with_timer(timer.clone())
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file_layer, file_writer) = match &config.directory {
        Some(directory) => {
            std::fs::create_dir_all(directory).map_err(|source| {
                LoggingError::CreateDirectory {
                    path: directory.clone(),
                    source,
                }
            })?;
            let appender = tracing_appender::rolling::daily(directory, &config.file_prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_timer(timer)
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .try_init()
        .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))?;

    Ok(LoggingGuard {
        file_writer,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert!(config.directory.is_none());
    }

    #[test]
    fn test_invalid_level_rejected() {
        let config = LoggingConfig::default().with_level("chatty");
        let err = init_logging(&config).unwrap_err();
        assert!(matches!(err, LoggingError::InvalidLevel(ref level) if level == "chatty"));
    }

    // The only test in this binary that installs a global subscriber.
    #[test]
    fn test_init_with_file_then_reinit_fails() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("logs");
        let config = LoggingConfig::default()
            .with_level("debug")
            .with_directory(&log_dir);

        let guard = init_logging(&config).unwrap();
        assert!(guard.has_file_output());
        assert!(log_dir.is_dir());

        let err = init_logging(&LoggingConfig::default()).unwrap_err();
        assert!(matches!(err, LoggingError::AlreadyInitialized(_)));
    }
}

//! Shared command setup: configuration loading and logging.

use std::path::{Path, PathBuf};

use geogate::config::{config_file_path, ConfigFile};
use geogate::logging::{init_logging, LoggingGuard};
use tracing::debug;

use crate::error::CliError;

/// Loaded configuration plus the logging guard for one CLI invocation.
pub struct CliRunner {
    config: ConfigFile,
    config_path: PathBuf,
    _logging: LoggingGuard,
}

impl CliRunner {
    /// Loads the configuration and installs logging.
    ///
    /// `verbose` raises the configured level: once for debug, twice for trace.
    pub fn new(config_path: Option<&Path>, verbose: u8) -> Result<Self, CliError> {
        let config_path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(config_file_path);
        let config = ConfigFile::load_from(&config_path)?;

        let mut logging = config.logging_config();
        match verbose {
            0 => {}
            1 => logging.level = "debug".to_string(),
            _ => logging.level = "trace".to_string(),
        }
        let guard = init_logging(&logging)?;

        Ok(Self {
            config,
            config_path,
            _logging: guard,
        })
    }

    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn log_startup(&self, command: &str) {
        debug!(
            command,
            version = env!("CARGO_PKG_VERSION"),
            config = %self.config_path.display(),
            deployment = %self.config.deployment_region(),
            "geogate starting"
        );
    }
}

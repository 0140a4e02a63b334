//! CLI error type.

use geogate::adapter::AdapterConstructionError;
use geogate::config::ConfigError;
use geogate::logging::LoggingError;
use geogate::provider::ProviderError;
use thiserror::Error;

/// Errors surfaced to the user by the `geogate` binary.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    ConfigFile(#[from] ConfigError),

    #[error("Failed to initialise logging: {0}")]
    Logging(#[from] LoggingError),

    #[error("Failed to set up detection: {0}")]
    Detection(#[from] ProviderError),

    #[error("Adapter construction failed: {0}")]
    Adapter(#[from] AdapterConstructionError),

    #[error("Failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("Failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}

//! The INI configuration file and its mapping onto runtime configs.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use ini::{Ini, Properties};
use thiserror::Error;
use tracing::debug;

use crate::adapter::{AdapterConfig, DeploymentRegion, DocumentStoreConfig, RelationalConfig};
use crate::detection::DEFAULT_ATTEMPT_TIMEOUT;
use crate::logging::LoggingConfig;
use crate::provider::{ProviderConfig, IPAPI_BASE_URL, IPINFO_BASE_URL, IP_API_BASE_URL};
use crate::resolver::{ResolverConfig, DEFAULT_CACHE_TTL};

/// Errors reading or interpreting the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed configuration: {0}")]
    Parse(String),

    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// Location of the configuration file: `<config dir>/geogate/config.ini`.
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("geogate")
        .join("config.ini")
}

/// `[detection]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionSettings {
    pub timeout_ms: u64,
    pub primary_url: String,
    pub secondary_url: String,
    pub tertiary_url: String,
    pub tertiary_token: Option<String>,
}

impl Default for DetectionSettings {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_ATTEMPT_TIMEOUT.as_millis() as u64,
            primary_url: IPAPI_BASE_URL.to_string(),
            secondary_url: IP_API_BASE_URL.to_string(),
            tertiary_url: IPINFO_BASE_URL.to_string(),
            tertiary_token: None,
        }
    }
}

/// `[cache]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSettings {
    pub ttl_secs: u64,
    pub max_entries: Option<u64>,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_secs: DEFAULT_CACHE_TTL.as_secs(),
            max_entries: None,
        }
    }
}

/// Parsed configuration file.
///
/// Every key is optional. A missing file yields the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub detection: DetectionSettings,
    pub cache: CacheSettings,
    pub deployment: DeploymentRegion,
    pub document_store: DocumentStoreConfig,
    pub relational: RelationalConfig,
    pub logging: LoggingConfig,
}

impl ConfigFile {
    /// Loads from [`config_file_path`].
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path())
    }

    /// Loads from `path`, returning defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "No configuration file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&contents)?;
        debug!(path = %path.display(), "Configuration loaded");
        Ok(config)
    }

    /// Parses INI text. Unknown sections and keys are ignored.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        let mut config = Self::default();

        if let Some(section) = ini.section(Some("detection")) {
            let detection = &mut config.detection;
            if let Some(v) = number(section, "detection", "timeout_ms")? {
                if v == 0 {
                    return Err(invalid("detection.timeout_ms", "0", "must be positive"));
                }
                detection.timeout_ms = v;
            }
            set_string(section, "primary_url", &mut detection.primary_url);
            set_string(section, "secondary_url", &mut detection.secondary_url);
            set_string(section, "tertiary_url", &mut detection.tertiary_url);
            detection.tertiary_token = optional(section, "tertiary_token");
        }

        if let Some(section) = ini.section(Some("cache")) {
            if let Some(v) = number(section, "cache", "ttl_secs")? {
                config.cache.ttl_secs = v;
            }
            config.cache.max_entries = number(section, "cache", "max_entries")?;
        }

        if let Some(section) = ini.section(Some("deployment")) {
            if let Some(raw) = optional(section, "region") {
                config.deployment = raw
                    .parse()
                    .map_err(|reason| invalid("deployment.region", &raw, reason))?;
            }
        }

        if let Some(section) = ini.section(Some("document_store")) {
            config.document_store.env_id = optional(section, "env_id");
            set_string(section, "region", &mut config.document_store.region);
        }

        if let Some(section) = ini.section(Some("relational")) {
            config.relational.url = optional(section, "url");
            config.relational.anon_key = optional(section, "anon_key");
        }

        if let Some(section) = ini.section(Some("logging")) {
            set_string(section, "level", &mut config.logging.level);
            config.logging.directory = optional(section, "directory").map(PathBuf::from);
        }

        Ok(config)
    }

    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            primary_url: self.detection.primary_url.clone(),
            secondary_url: self.detection.secondary_url.clone(),
            tertiary_url: self.detection.tertiary_url.clone(),
            tertiary_token: self.detection.tertiary_token.clone(),
        }
    }

    pub fn resolver_config(&self) -> ResolverConfig {
        let mut config = ResolverConfig::default()
            .with_ttl(Duration::from_secs(self.cache.ttl_secs))
            .with_default_timeout(Duration::from_millis(self.detection.timeout_ms));
        if let Some(max_entries) = self.cache.max_entries {
            config = config.with_max_entries(max_entries);
        }
        config
    }

    pub fn adapter_config(&self) -> AdapterConfig {
        AdapterConfig {
            document_store: self.document_store.clone(),
            relational: self.relational.clone(),
        }
    }

    pub fn logging_config(&self) -> LoggingConfig {
        self.logging.clone()
    }

    pub fn deployment_region(&self) -> DeploymentRegion {
        self.deployment
    }
}

/// Trimmed, non-empty value for `key`.
fn optional(section: &Properties, key: &str) -> Option<String> {
    section
        .get(key)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn set_string(section: &Properties, key: &str, target: &mut String) {
    if let Some(value) = optional(section, key) {
        *target = value;
    }
}

fn number<T>(section: &Properties, name: &str, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    optional(section, key)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| invalid(&format!("{}.{}", name, key), &raw, e))
        })
        .transpose()
}

fn invalid(key: &str, value: &str, reason: impl std::fmt::Display) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

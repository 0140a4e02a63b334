//! Addressable configuration keys for `section.key` lookups.

use std::fmt;
use std::str::FromStr;

use super::file::ConfigFile;

/// Every key the configuration file understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    DetectionTimeoutMs,
    DetectionPrimaryUrl,
    DetectionSecondaryUrl,
    DetectionTertiaryUrl,
    DetectionTertiaryToken,
    CacheTtlSecs,
    CacheMaxEntries,
    DeploymentRegion,
    DocumentStoreEnvId,
    DocumentStoreRegion,
    RelationalUrl,
    RelationalAnonKey,
    LoggingLevel,
    LoggingDirectory,
}

impl ConfigKey {
    /// All keys in file order.
    pub fn all() -> &'static [ConfigKey] {
        use ConfigKey::*;
        &[
            DetectionTimeoutMs,
            DetectionPrimaryUrl,
            DetectionSecondaryUrl,
            DetectionTertiaryUrl,
            DetectionTertiaryToken,
            CacheTtlSecs,
            CacheMaxEntries,
            DeploymentRegion,
            DocumentStoreEnvId,
            DocumentStoreRegion,
            RelationalUrl,
            RelationalAnonKey,
            LoggingLevel,
            LoggingDirectory,
        ]
    }

    pub fn section(&self) -> &'static str {
        use ConfigKey::*;
        match self {
            DetectionTimeoutMs | DetectionPrimaryUrl | DetectionSecondaryUrl
            | DetectionTertiaryUrl | DetectionTertiaryToken => "detection",
            CacheTtlSecs | CacheMaxEntries => "cache",
            DeploymentRegion => "deployment",
            DocumentStoreEnvId | DocumentStoreRegion => "document_store",
            RelationalUrl | RelationalAnonKey => "relational",
            LoggingLevel | LoggingDirectory => "logging",
        }
    }

    pub fn key_name(&self) -> &'static str {
        use ConfigKey::*;
        match self {
            DetectionTimeoutMs => "timeout_ms",
            DetectionPrimaryUrl => "primary_url",
            DetectionSecondaryUrl => "secondary_url",
            DetectionTertiaryUrl => "tertiary_url",
            DetectionTertiaryToken => "tertiary_token",
            CacheTtlSecs => "ttl_secs",
            CacheMaxEntries => "max_entries",
            DeploymentRegion => "region",
            DocumentStoreEnvId => "env_id",
            DocumentStoreRegion => "region",
            RelationalUrl => "url",
            RelationalAnonKey => "anon_key",
            LoggingLevel => "level",
            LoggingDirectory => "directory",
        }
    }

    /// Full `section.key` name.
    pub fn name(&self) -> String {
        format!("{}.{}", self.section(), self.key_name())
    }

    /// Whether the value should be masked when displayed.
    pub fn is_secret(&self) -> bool {
        matches!(
            self,
            ConfigKey::DetectionTertiaryToken | ConfigKey::RelationalAnonKey
        )
    }

    /// Current value as text. Empty when unset.
    pub fn get(&self, config: &ConfigFile) -> String {
        use ConfigKey::*;
        let optional = |v: &Option<String>| v.clone().unwrap_or_default();
        match self {
            DetectionTimeoutMs => config.detection.timeout_ms.to_string(),
            DetectionPrimaryUrl => config.detection.primary_url.clone(),
            DetectionSecondaryUrl => config.detection.secondary_url.clone(),
            DetectionTertiaryUrl => config.detection.tertiary_url.clone(),
            DetectionTertiaryToken => optional(&config.detection.tertiary_token),
            CacheTtlSecs => config.cache.ttl_secs.to_string(),
            CacheMaxEntries => config
                .cache
                .max_entries
                .map(|n| n.to_string())
                .unwrap_or_default(),
            DeploymentRegion => config.deployment.to_string(),
            DocumentStoreEnvId => optional(&config.document_store.env_id),
            DocumentStoreRegion => config.document_store.region.clone(),
            RelationalUrl => optional(&config.relational.url),
            RelationalAnonKey => optional(&config.relational.anon_key),
            LoggingLevel => config.logging.level.clone(),
            LoggingDirectory => config
                .logging
                .directory
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section(), self.key_name())
    }
}

impl FromStr for ConfigKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ConfigKey::all()
            .iter()
            .copied()
            .find(|key| key.name() == wanted)
            .ok_or_else(|| format!("unknown configuration key '{}'", s))
    }
}

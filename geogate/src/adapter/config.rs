//! Settings consumed by the concrete adapters.

use super::error::AdapterConstructionError;
use super::types::{AdapterKind, DeploymentRegion};

/// Default region for the document store.
pub const DEFAULT_DOCUMENT_STORE_REGION: &str = "ap-shanghai";

/// Document-store backend settings (CHINA deployments).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentStoreConfig {
    /// Environment identifier. Required.
    pub env_id: Option<String>,
    pub region: String,
}

impl Default for DocumentStoreConfig {
    fn default() -> Self {
        Self {
            env_id: None,
            region: DEFAULT_DOCUMENT_STORE_REGION.to_string(),
        }
    }
}

/// Relational backend settings (INTERNATIONAL deployments).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationalConfig {
    /// Project URL. Required, must be https (plain http is accepted for localhost).
    pub url: Option<String>,
    /// Public API key. Required.
    pub anon_key: Option<String>,
}

/// Settings for every adapter the factory can build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdapterConfig {
    pub document_store: DocumentStoreConfig,
    pub relational: RelationalConfig,
}

impl AdapterConfig {
    pub fn with_document_store(mut self, env_id: impl Into<String>) -> Self {
        self.document_store.env_id = Some(env_id.into());
        self
    }

    pub fn with_relational(mut self, url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        self.relational.url = Some(url.into());
        self.relational.anon_key = Some(anon_key.into());
        self
    }
}

/// Returns the trimmed value of a required setting.
pub(crate) fn required<'a>(
    value: &'a Option<String>,
    kind: AdapterKind,
    region: DeploymentRegion,
    setting: &'static str,
) -> Result<&'a str, AdapterConstructionError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(AdapterConstructionError::MissingSetting {
            kind,
            region,
            setting,
        })
}

/// Validated document-store endpoint for a CHINA adapter.
pub(crate) fn document_store_endpoint(
    config: &DocumentStoreConfig,
    kind: AdapterKind,
) -> Result<String, AdapterConstructionError> {
    let region = DeploymentRegion::China;
    let env_id = required(&config.env_id, kind, region, "document_store.env_id")?;

    if !env_id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(AdapterConstructionError::InvalidSetting {
            kind,
            region,
            setting: "document_store.env_id",
            reason: "only ASCII letters, digits and '-' are allowed".to_string(),
        });
    }

    Ok(format!("https://{}.{}.tcloudbase.com", env_id, config.region.trim()))
}

/// Validated project URL and key for an INTERNATIONAL adapter.
pub(crate) fn relational_endpoint(
    config: &RelationalConfig,
    kind: AdapterKind,
) -> Result<(String, String), AdapterConstructionError> {
    let region = DeploymentRegion::International;
    let url = required(&config.url, kind, region, "relational.url")?;
    let anon_key = required(&config.anon_key, kind, region, "relational.anon_key")?;

    let local = url.starts_with("http://localhost") || url.starts_with("http://127.0.0.1");
    if !url.starts_with("https://") && !local {
        return Err(AdapterConstructionError::InvalidSetting {
            kind,
            region,
            setting: "relational.url",
            reason: format!("'{}' is not an https URL", url),
        });
    }

    Ok((url.trim_end_matches('/').to_string(), anon_key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_rejects_blank() {
        let blank = Some("   ".to_string());
        let result = required(
            &blank,
            AdapterKind::Auth,
            DeploymentRegion::International,
            "relational.anon_key",
        );
        assert!(matches!(
            result,
            Err(AdapterConstructionError::MissingSetting { .. })
        ));
    }

    #[test]
    fn test_document_store_endpoint() {
        let config = AdapterConfig::default().with_document_store("prod-7g2k");
        let endpoint = document_store_endpoint(&config.document_store, AdapterKind::Database);
        assert_eq!(
            endpoint,
            Ok("https://prod-7g2k.ap-shanghai.tcloudbase.com".to_string())
        );
    }

    #[test]
    fn test_document_store_endpoint_rejects_bad_env_id() {
        let config = AdapterConfig::default().with_document_store("prod/../x");
        let result = document_store_endpoint(&config.document_store, AdapterKind::Auth);
        assert!(matches!(
            result,
            Err(AdapterConstructionError::InvalidSetting { .. })
        ));
    }

    #[test]
    fn test_relational_endpoint() {
        let config = AdapterConfig::default().with_relational("https://abc.example.co/", "key");
        let result = relational_endpoint(&config.relational, AdapterKind::Auth);
        assert_eq!(
            result,
            Ok(("https://abc.example.co".to_string(), "key".to_string()))
        );

        let local = AdapterConfig::default().with_relational("http://localhost:54321", "key");
        assert!(relational_endpoint(&local.relational, AdapterKind::Auth).is_ok());
    }

    #[test]
    fn test_relational_endpoint_requires_https() {
        let config = AdapterConfig::default().with_relational("http://abc.example.co", "key");
        let result = relational_endpoint(&config.relational, AdapterKind::Database);
        assert!(matches!(
            result,
            Err(AdapterConstructionError::InvalidSetting {
                setting: "relational.url",
                ..
            })
        ));
    }

    #[test]
    fn test_relational_endpoint_requires_key() {
        let mut config = AdapterConfig::default().with_relational("https://abc.example.co", "");
        config.relational.anon_key = None;
        let result = relational_endpoint(&config.relational, AdapterKind::Database);
        assert_eq!(
            result,
            Err(AdapterConstructionError::MissingSetting {
                kind: AdapterKind::Database,
                region: DeploymentRegion::International,
                setting: "relational.anon_key",
            })
        );
    }

    #[test]
    fn test_builder() {
        let config = AdapterConfig::default()
            .with_document_store("prod-7g2k")
            .with_relational("https://abc.example.co", "key");

        assert_eq!(config.document_store.env_id.as_deref(), Some("prod-7g2k"));
        assert_eq!(config.document_store.region, "ap-shanghai");
        assert_eq!(config.relational.url.as_deref(), Some("https://abc.example.co"));
    }
}

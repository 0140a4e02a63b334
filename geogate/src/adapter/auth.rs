//! Authentication adapters.

use super::config::{
    document_store_endpoint, relational_endpoint, DocumentStoreConfig, RelationalConfig,
};
use super::error::AdapterConstructionError;
use super::types::{AdapterKind, DeploymentRegion};
use crate::region::AuthMethod;

/// Authentication provider for one deployment.
pub trait AuthAdapter: Send + Sync {
    fn provider_name(&self) -> &str;

    fn deployment_region(&self) -> DeploymentRegion;

    /// Methods this provider can sign a user in with.
    fn supported_methods(&self) -> &'static [AuthMethod];

    /// Where to send the browser to start `method`, if it is redirect-based.
    fn sign_in_url(&self, method: AuthMethod) -> Option<String>;

    fn supports(&self, method: AuthMethod) -> bool {
        self.supported_methods().contains(&method)
    }
}

/// Auth against the document-store backend (CHINA deployments).
#[derive(Debug)]
pub struct DocumentStoreAuth {
    endpoint: String,
}

impl DocumentStoreAuth {
    const METHODS: &'static [AuthMethod] = &[AuthMethod::WechatLogin, AuthMethod::PhoneOtp];

    pub fn new(config: &DocumentStoreConfig) -> Result<Self, AdapterConstructionError> {
        Ok(Self {
            endpoint: document_store_endpoint(config, AdapterKind::Auth)?,
        })
    }
}

impl AuthAdapter for DocumentStoreAuth {
    fn provider_name(&self) -> &str {
        "document-store-auth"
    }

    fn deployment_region(&self) -> DeploymentRegion {
        DeploymentRegion::China
    }

    fn supported_methods(&self) -> &'static [AuthMethod] {
        Self::METHODS
    }

    fn sign_in_url(&self, method: AuthMethod) -> Option<String> {
        match method {
            AuthMethod::WechatLogin => Some(format!("{}/auth/v1/wechat/authorize", self.endpoint)),
            _ => None,
        }
    }
}

/// Managed auth on the relational backend (INTERNATIONAL deployments).
#[derive(Debug)]
pub struct RelationalAuth {
    url: String,
    anon_key: String,
}

impl RelationalAuth {
    const METHODS: &'static [AuthMethod] = &[AuthMethod::Google, AuthMethod::EmailPassword];

    pub fn new(config: &RelationalConfig) -> Result<Self, AdapterConstructionError> {
        let (url, anon_key) = relational_endpoint(config, AdapterKind::Auth)?;
        Ok(Self { url, anon_key })
    }

    /// Key sent as the `apikey` header on auth requests.
    pub fn anon_key(&self) -> &str {
        &self.anon_key
    }
}

impl AuthAdapter for RelationalAuth {
    fn provider_name(&self) -> &str {
        "relational-auth"
    }

    fn deployment_region(&self) -> DeploymentRegion {
        DeploymentRegion::International
    }

    fn supported_methods(&self) -> &'static [AuthMethod] {
        Self::METHODS
    }

    fn sign_in_url(&self, method: AuthMethod) -> Option<String> {
        match method {
            AuthMethod::Google => Some(format!("{}/auth/v1/authorize?provider=google", self.url)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::AdapterConfig;
    use crate::region::Region;

    #[test]
    fn test_document_store_auth() {
        let config = AdapterConfig::default().with_document_store("env-1");
        let auth = DocumentStoreAuth::new(&config.document_store).unwrap();

        assert_eq!(auth.deployment_region(), DeploymentRegion::China);
        assert!(auth.supports(AuthMethod::WechatLogin));
        assert!(!auth.supports(AuthMethod::Google));
        assert_eq!(
            auth.sign_in_url(AuthMethod::WechatLogin).as_deref(),
            Some("https://env-1.ap-shanghai.tcloudbase.com/auth/v1/wechat/authorize")
        );
        assert_eq!(auth.sign_in_url(AuthMethod::PhoneOtp), None);
    }

    #[test]
    fn test_relational_auth() {
        let config = AdapterConfig::default().with_relational("https://proj.example.co", "anon");
        let auth = RelationalAuth::new(&config.relational).unwrap();

        assert_eq!(auth.anon_key(), "anon");
        assert_eq!(
            auth.sign_in_url(AuthMethod::Google).as_deref(),
            Some("https://proj.example.co/auth/v1/authorize?provider=google")
        );
        assert_eq!(auth.sign_in_url(AuthMethod::EmailPassword), None);
    }

    #[test]
    fn test_methods_match_region_table() {
        assert_eq!(
            DocumentStoreAuth::METHODS,
            Region::China.profile().auth_methods
        );
        assert_eq!(RelationalAuth::METHODS, Region::Usa.profile().auth_methods);
    }

    #[test]
    fn test_missing_config_fails() {
        let result = DocumentStoreAuth::new(&AdapterConfig::default().document_store);
        assert!(result.is_err());
    }
}

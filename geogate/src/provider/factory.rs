//! Construction of the network strategies in chain order.

use std::sync::Arc;

use tracing::debug;

use super::ip_api::{IpApiComProvider, IP_API_BASE_URL};
use super::ipapi::{IpApiProvider, IPAPI_BASE_URL};
use super::ipinfo::{IpInfoProvider, IPINFO_BASE_URL};
use super::{AsyncHttpClient, AsyncReqwestClient, DetectionProvider, ProviderError};

/// Endpoints for the three network strategies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub primary_url: String,
    pub secondary_url: String,
    pub tertiary_url: String,
    /// Optional access token for the tertiary service.
    pub tertiary_token: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            primary_url: IPAPI_BASE_URL.to_string(),
            secondary_url: IP_API_BASE_URL.to_string(),
            tertiary_url: IPINFO_BASE_URL.to_string(),
            tertiary_token: None,
        }
    }
}

/// Builds the network strategies over a shared HTTP client.
///
/// # Example
///
/// ```ignore
/// use geogate::provider::{ProviderConfig, ProviderFactory};
///
/// let factory = ProviderFactory::with_reqwest()?;
/// let providers = factory.create(&ProviderConfig::default());
/// assert_eq!(providers.len(), 3);
/// ```
pub struct ProviderFactory<C: AsyncHttpClient + Clone + 'static> {
    http_client: C,
}

impl ProviderFactory<AsyncReqwestClient> {
    /// Creates a factory backed by a fresh reqwest client.
    pub fn with_reqwest() -> Result<Self, ProviderError> {
        Ok(Self::new(AsyncReqwestClient::new()?))
    }
}

impl<C: AsyncHttpClient + Clone + 'static> ProviderFactory<C> {
    pub fn new(http_client: C) -> Self {
        Self { http_client }
    }

    /// Primary, secondary and tertiary strategies, in that order.
    pub fn create(&self, config: &ProviderConfig) -> Vec<Arc<dyn DetectionProvider>> {
        let mut tertiary =
            IpInfoProvider::with_base_url(self.http_client.clone(), &config.tertiary_url);
        if let Some(token) = &config.tertiary_token {
            tertiary = tertiary.with_token(token);
        }

        debug!(
            primary = %config.primary_url,
            secondary = %config.secondary_url,
            tertiary = %config.tertiary_url,
            "Building detection providers"
        );

        let primary = IpApiProvider::with_base_url(self.http_client.clone(), &config.primary_url);
        let secondary =
            IpApiComProvider::with_base_url(self.http_client.clone(), &config.secondary_url);

        vec![
            Arc::new(primary) as Arc<dyn DetectionProvider>,
            Arc::new(secondary) as Arc<dyn DetectionProvider>,
            Arc::new(tertiary) as Arc<dyn DetectionProvider>,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockAsyncHttpClient;

    #[test]
    fn test_create_order() {
        let factory = ProviderFactory::new(MockAsyncHttpClient::json("{}"));
        let providers = factory.create(&ProviderConfig::default());

        let names: Vec<&str> = providers.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["ipapi", "ip-api", "ipinfo"]);
    }

    #[tokio::test]
    async fn test_create_uses_configured_urls() {
        let client = MockAsyncHttpClient::json(r#"{"country":"US"}"#);
        let factory = ProviderFactory::new(client.clone());
        let config = ProviderConfig {
            tertiary_url: "http://geo.internal".to_string(),
            tertiary_token: Some("t0k".to_string()),
            ..Default::default()
        };

        let providers = factory.create(&config);
        let result = providers[2]
            .lookup("8.8.8.8", std::time::Duration::from_secs(1))
            .await;

        assert_eq!(result, Ok("US".to_string()));
        assert_eq!(
            client.requests(),
            vec!["http://geo.internal/8.8.8.8/json?token=t0k".to_string()]
        );
    }
}

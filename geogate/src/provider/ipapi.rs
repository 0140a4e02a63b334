//! ipapi.co lookup (primary strategy).
//!
//! # URL Pattern
//!
//! `https://ipapi.co/{ip}/json/`
//!
//! # Response
//!
//! Success carries `country_code`. Failures come back with HTTP 200 and an
//! `error: true` flag plus a `reason`, so the flag must be checked before the
//! country field.

use std::time::Duration;

use serde::Deserialize;

use crate::provider::types::{country_from_field, parse_ip};
use crate::provider::{AsyncHttpClient, BoxFuture, DetectionProvider, ProviderError};

/// Default base URL for ipapi.co.
pub const IPAPI_BASE_URL: &str = "https://ipapi.co";

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    #[serde(default)]
    error: bool,
    reason: Option<String>,
    country_code: Option<String>,
}

/// Primary lookup against ipapi.co or a compatible service.
pub struct IpApiProvider<C: AsyncHttpClient> {
    http_client: C,
    base_url: String,
}

impl<C: AsyncHttpClient> IpApiProvider<C> {
    /// Creates a provider against the public ipapi.co endpoint.
    pub fn new(http_client: C) -> Self {
        Self::with_base_url(http_client, IPAPI_BASE_URL)
    }

    /// Creates a provider against a custom base URL.
    pub fn with_base_url(http_client: C, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn build_url(&self, ip: &str) -> String {
        format!("{}/{}/json/", self.base_url, ip)
    }

    fn parse(body: &[u8]) -> Result<String, ProviderError> {
        let response: IpApiResponse = serde_json::from_slice(body)
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        if response.error {
            return Err(ProviderError::ServiceError(
                response.reason.unwrap_or_else(|| "unspecified".to_string()),
            ));
        }

        country_from_field(response.country_code.as_deref())
    }
}

impl<C: AsyncHttpClient> DetectionProvider for IpApiProvider<C> {
    fn name(&self) -> &str {
        "ipapi"
    }

    fn lookup<'a>(
        &'a self,
        ip: &'a str,
        timeout: Duration,
    ) -> BoxFuture<'a, Result<String, ProviderError>> {
        Box::pin(async move {
            let ip = parse_ip(ip)?;
            let body = self.http_client.get(&self.build_url(&ip.to_string()), timeout).await?;
            Self::parse(&body)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockAsyncHttpClient;

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[test]
    fn test_url_construction() {
        let provider = IpApiProvider::new(MockAsyncHttpClient::json("{}"));
        assert_eq!(provider.build_url("8.8.8.8"), "https://ipapi.co/8.8.8.8/json/");
    }

    #[test]
    fn test_custom_base_url_trailing_slash() {
        let provider =
            IpApiProvider::with_base_url(MockAsyncHttpClient::json("{}"), "http://localhost:9000/");
        assert_eq!(
            provider.build_url("1.2.3.4"),
            "http://localhost:9000/1.2.3.4/json/"
        );
    }

    #[tokio::test]
    async fn test_lookup_success() {
        let client = MockAsyncHttpClient::json(r#"{"ip":"8.8.8.8","country_code":"US"}"#);
        let provider = IpApiProvider::new(client.clone());

        let result = provider.lookup("8.8.8.8", TIMEOUT).await;
        assert_eq!(result, Ok("US".to_string()));
        assert_eq!(client.requests(), vec!["https://ipapi.co/8.8.8.8/json/".to_string()]);
    }

    #[tokio::test]
    async fn test_lookup_error_flag() {
        let client = MockAsyncHttpClient::json(
            r#"{"ip":"8.8.8.8","error":true,"reason":"RateLimited","country_code":"US"}"#,
        );
        let provider = IpApiProvider::new(client);

        let result = provider.lookup("8.8.8.8", TIMEOUT).await;
        assert_eq!(
            result,
            Err(ProviderError::ServiceError("RateLimited".to_string()))
        );
    }

    #[tokio::test]
    async fn test_lookup_missing_field() {
        let provider = IpApiProvider::new(MockAsyncHttpClient::json(r#"{"ip":"8.8.8.8"}"#));

        let result = provider.lookup("8.8.8.8", TIMEOUT).await;
        assert_eq!(result, Err(ProviderError::MissingCountry));
    }

    #[tokio::test]
    async fn test_lookup_other_vendor_field_is_not_accepted() {
        let provider = IpApiProvider::new(MockAsyncHttpClient::json(r#"{"countryCode":"US"}"#));

        let result = provider.lookup("8.8.8.8", TIMEOUT).await;
        assert_eq!(result, Err(ProviderError::MissingCountry));
    }

    #[tokio::test]
    async fn test_lookup_invalid_json() {
        let provider = IpApiProvider::new(MockAsyncHttpClient::json("<html>"));

        let result = provider.lookup("8.8.8.8", TIMEOUT).await;
        assert!(matches!(result, Err(ProviderError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_lookup_rejects_non_ip_without_request() {
        let client = MockAsyncHttpClient::json(r#"{"country_code":"US"}"#);
        let provider = IpApiProvider::new(client.clone());

        let result = provider.lookup("../admin", TIMEOUT).await;
        assert!(matches!(result, Err(ProviderError::NotApplicable(_))));
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn test_lookup_network_error() {
        let provider = IpApiProvider::new(MockAsyncHttpClient::new(Err(
            ProviderError::HttpError("Connection refused".to_string()),
        )));

        match provider.lookup("8.8.8.8", TIMEOUT).await {
            Err(ProviderError::HttpError(msg)) => assert!(msg.contains("Connection refused")),
            other => panic!("Expected HttpError, got {:?}", other),
        }
    }
}

//! ipinfo.io lookup (tertiary strategy).
//!
//! # URL Pattern
//!
//! `https://ipinfo.io/{ip}/json` with an optional `?token=` query parameter.
//!
//! # Response
//!
//! The country is in a bare `country` field. Reserved addresses come back as
//! `{"bogon": true}`; errors carry an `error` object with `title`/`message`.

use std::time::Duration;

use serde::Deserialize;

use crate::provider::types::{country_from_field, parse_ip};
use crate::provider::{AsyncHttpClient, BoxFuture, DetectionProvider, ProviderError};

/// Default base URL for ipinfo.io.
pub const IPINFO_BASE_URL: &str = "https://ipinfo.io";

#[derive(Debug, Deserialize)]
struct IpInfoError {
    title: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IpInfoResponse {
    #[serde(default)]
    bogon: bool,
    error: Option<IpInfoError>,
    country: Option<String>,
}

/// Tertiary lookup against ipinfo.io or a compatible service.
pub struct IpInfoProvider<C: AsyncHttpClient> {
    http_client: C,
    base_url: String,
    token: Option<String>,
}

impl<C: AsyncHttpClient> IpInfoProvider<C> {
    pub fn new(http_client: C) -> Self {
        Self::with_base_url(http_client, IPINFO_BASE_URL)
    }

    pub fn with_base_url(http_client: C, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Sets the access token appended to each request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn build_url(&self, ip: &str) -> String {
        match &self.token {
            Some(token) => format!("{}/{}/json?token={}", self.base_url, ip, token),
            None => format!("{}/{}/json", self.base_url, ip),
        }
    }

    fn parse(body: &[u8]) -> Result<String, ProviderError> {
        let response: IpInfoResponse = serde_json::from_slice(body)
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        if let Some(error) = response.error {
            let detail = error
                .message
                .or(error.title)
                .unwrap_or_else(|| "unspecified".to_string());
            return Err(ProviderError::ServiceError(detail));
        }
        if response.bogon {
            return Err(ProviderError::ServiceError("bogon address".to_string()));
        }

        country_from_field(response.country.as_deref())
    }
}

impl<C: AsyncHttpClient> DetectionProvider for IpInfoProvider<C> {
    fn name(&self) -> &str {
        "ipinfo"
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
        let provider = IpInfoProvider::new(MockAsyncHttpClient::json("{}"));
        assert_eq!(provider.build_url("8.8.4.4"), "https://ipinfo.io/8.8.4.4/json");

        let provider = provider.with_token("abc123");
        assert_eq!(
            provider.build_url("8.8.4.4"),
            "https://ipinfo.io/8.8.4.4/json?token=abc123"
        );
    }

    #[tokio::test]
    async fn test_lookup_success() {
        let provider = IpInfoProvider::new(MockAsyncHttpClient::json(
            r#"{"ip":"8.8.4.4","country":"in","org":"AS15169"}"#,
        ));

        let result = provider.lookup("8.8.4.4", TIMEOUT).await;
        assert_eq!(result, Ok("IN".to_string()));
    }

    #[tokio::test]
    async fn test_lookup_bogon() {
        let provider = IpInfoProvider::new(MockAsyncHttpClient::json(
            r#"{"ip":"198.51.100.1","bogon":true}"#,
        ));

        let result = provider.lookup("198.51.100.1", TIMEOUT).await;
        assert_eq!(
            result,
            Err(ProviderError::ServiceError("bogon address".to_string()))
        );
    }

    #[tokio::test]
    async fn test_lookup_error_object() {
        let provider = IpInfoProvider::new(MockAsyncHttpClient::json(
            r#"{"error":{"title":"Wrong ip","message":"Please provide a valid IP address"}}"#,
        ));

        let result = provider.lookup("8.8.4.4", TIMEOUT).await;
        assert_eq!(
            result,
            Err(ProviderError::ServiceError(
                "Please provide a valid IP address".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_lookup_missing_country() {
        let provider = IpInfoProvider::new(MockAsyncHttpClient::json(r#"{"ip":"8.8.4.4"}"#));

        let result = provider.lookup("8.8.4.4", TIMEOUT).await;
        assert_eq!(result, Err(ProviderError::MissingCountry));
    }
}

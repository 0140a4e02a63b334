//! ip-api.com lookup (secondary strategy).
//!
//! # URL Pattern
//!
//! `http://ip-api.com/json/{ip}?fields=status,message,countryCode`
//!
//! # Response
//!
//! `status` is `"success"` or `"fail"`; on failure `message` explains why
//! (`"private range"`, `"reserved range"`, `"invalid query"`). The country is
//! in the camel-cased `countryCode` field.

use std::time::Duration;

use serde::Deserialize;

use crate::provider::types::{country_from_field, parse_ip};
use crate::provider::{AsyncHttpClient, BoxFuture, DetectionProvider, ProviderError};

/// Default base URL for ip-api.com.
pub const IP_API_BASE_URL: &str = "http://ip-api.com";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IpApiComResponse {
    status: Option<String>,
    message: Option<String>,
    country_code: Option<String>,
}

/// Secondary lookup against ip-api.com or a compatible service.
pub struct IpApiComProvider<C: AsyncHttpClient> {
    http_client: C,
    base_url: String,
}

impl<C: AsyncHttpClient> IpApiComProvider<C> {
    pub fn new(http_client: C) -> Self {
        Self::with_base_url(http_client, IP_API_BASE_URL)
    }

    pub fn with_base_url(http_client: C, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn build_url(&self, ip: &str) -> String {
        format!(
            "{}/json/{}?fields=status,message,countryCode",
            self.base_url, ip
        )
    }

    fn parse(body: &[u8]) -> Result<String, ProviderError> {
        let response: IpApiComResponse = serde_json::from_slice(body)
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        match response.status.as_deref() {
            Some("success") => country_from_field(response.country_code.as_deref()),
            Some("fail") => Err(ProviderError::ServiceError(
                response.message.unwrap_or_else(|| "unspecified".to_string()),
            )),
            Some(other) => Err(ProviderError::InvalidResponse(format!(
                "unexpected status '{}'",
                other
            ))),
            None => Err(ProviderError::InvalidResponse("missing status".to_string())),
        }
    }
}

impl<C: AsyncHttpClient> DetectionProvider for IpApiComProvider<C> {
    fn name(&self) -> &str {
        "ip-api"
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
        let provider = IpApiComProvider::new(MockAsyncHttpClient::json("{}"));
        assert_eq!(
            provider.build_url("203.0.113.5"),
            "http://ip-api.com/json/203.0.113.5?fields=status,message,countryCode"
        );
    }

    #[tokio::test]
    async fn test_lookup_success() {
        let provider = IpApiComProvider::new(MockAsyncHttpClient::json(
            r#"{"status":"success","countryCode":"SG"}"#,
        ));

        let result = provider.lookup("203.0.113.5", TIMEOUT).await;
        assert_eq!(result, Ok("SG".to_string()));
    }

    #[tokio::test]
    async fn test_lookup_fail_status() {
        let provider = IpApiComProvider::new(MockAsyncHttpClient::json(
            r#"{"status":"fail","message":"reserved range"}"#,
        ));

        let result = provider.lookup("203.0.113.5", TIMEOUT).await;
        assert_eq!(
            result,
            Err(ProviderError::ServiceError("reserved range".to_string()))
        );
    }

    #[tokio::test]
    async fn test_lookup_missing_status() {
        let provider = IpApiComProvider::new(MockAsyncHttpClient::json(r#"{"countryCode":"SG"}"#));

        let result = provider.lookup("203.0.113.5", TIMEOUT).await;
        assert!(matches!(result, Err(ProviderError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_lookup_snake_case_field_is_not_accepted() {
        let provider = IpApiComProvider::new(MockAsyncHttpClient::json(
            r#"{"status":"success","country_code":"SG"}"#,
        ));

        let result = provider.lookup("203.0.113.5", TIMEOUT).await;
        assert_eq!(result, Err(ProviderError::MissingCountry));
    }
}

//! Core provider types and traits.

use std::future::Future;
use std::net::IpAddr;
use std::pin::Pin;
use std::time::Duration;

use thiserror::Error;

use crate::region::normalize_country_code;

/// Boxed future type for dyn-compatible async methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Errors a single detection strategy can report.
///
/// None of these ever leave the detection chain: the chain logs them and moves
/// on to the next strategy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// Transport failure or non-2xx status.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// The attempt exceeded its time budget.
    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    /// The body was not the JSON the strategy expects.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The service answered with its own error indicator.
    #[error("Service error: {0}")]
    ServiceError(String),

    /// The response carried no usable country code.
    #[error("Response has no usable country code")]
    MissingCountry,

    /// The strategy does not handle this input.
    #[error("Not applicable: {0}")]
    NotApplicable(String),
}

/// One way of turning a client IP into a country code.
///
/// Implementations own their request building and response validation, and
/// return the country code already normalised to upper-case alpha-2.
pub trait DetectionProvider: Send + Sync {
    /// Human-readable name used in logs.
    fn name(&self) -> &str;

    /// Looks up the country for `ip`, spending at most `timeout` on I/O.
    fn lookup<'a>(
        &'a self,
        ip: &'a str,
        timeout: Duration,
    ) -> BoxFuture<'a, Result<String, ProviderError>>;
}

/// Parses `ip` as an address before it is placed in a request URL.
pub(crate) fn parse_ip(ip: &str) -> Result<IpAddr, ProviderError> {
    ip.trim()
        .parse()
        .map_err(|_| ProviderError::NotApplicable(format!("'{}' is not an IP address", ip)))
}

/// Validates a vendor-supplied country field.
pub(crate) fn country_from_field(field: Option<&str>) -> Result<String, ProviderError> {
    field
        .and_then(normalize_country_code)
        .ok_or(ProviderError::MissingCountry)
}

//! Country detection providers.
//!
//! Each network strategy turns a client IP into a country code through a
//! different lookup service, with its own URL shape and its own idea of what
//! a failed answer looks like. All of them sit behind [`DetectionProvider`]
//! so the [`DetectionChain`](crate::detection::DetectionChain) can walk them
//! in order, and all of them speak HTTP through [`AsyncHttpClient`] so tests
//! can substitute canned responses.
//!
//! # Factory Pattern
//!
//! ```ignore
//! use geogate::provider::{ProviderConfig, ProviderFactory};
//!
//! let factory = ProviderFactory::with_reqwest()?;
//! let providers = factory.create(&ProviderConfig::default());
//! ```

mod factory;
mod heuristic;
mod http;
mod ip_api;
mod ipapi;
mod ipinfo;
mod types;

pub use factory::{ProviderConfig, ProviderFactory};
pub use heuristic::{
    is_local_address, LocalNetworkHeuristic, PRIVATE_NETWORK_COUNTRY, PUBLIC_FALLBACK_COUNTRY,
};
pub use http::{AsyncHttpClient, AsyncReqwestClient};
pub use ip_api::{IpApiComProvider, IP_API_BASE_URL};
pub use ipapi::{IpApiProvider, IPAPI_BASE_URL};
pub use ipinfo::{IpInfoProvider, IPINFO_BASE_URL};
pub use types::{BoxFuture, DetectionProvider, ProviderError};

#[cfg(test)]
pub use http::tests::MockAsyncHttpClient;

//! The public entry point for per-request capability resolution.

use std::net::IpAddr;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use futures::FutureExt;
use reqwest::header::HeaderMap;
use tracing::error;

use super::headers::client_ip_from_headers;
use crate::detection::DetectionChain;
use crate::provider::{ProviderConfig, ProviderError, ProviderFactory};
use crate::region::{self, CapabilityDescriptor};
use crate::resolver::{Resolver, ResolverConfig, ResolverStats};

/// Per-call options for [`CapabilityRouter::resolve`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Per-attempt timeout. Falls back to the resolver's default when unset.
    pub timeout: Option<Duration>,
}

impl ResolveOptions {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }
}

/// Resolves a visitor IP to a complete [`CapabilityDescriptor`].
///
/// Every method here is infallible. Detection failures are absorbed by the
/// chain, and anything unexpected below the router is replaced with
/// [`CapabilityDescriptor::last_resort`].
///
/// # Example
///
/// ```ignore
/// use geogate::provider::ProviderConfig;
/// use geogate::resolver::ResolverConfig;
/// use geogate::router::{CapabilityRouter, ResolveOptions};
///
/// let router =
///     CapabilityRouter::from_config(&ProviderConfig::default(), ResolverConfig::default())?;
/// let descriptor = router.resolve("8.8.8.8", ResolveOptions::default()).await;
/// println!("{} pays in {}", descriptor.country_code(), descriptor.currency());
/// ```
#[derive(Clone)]
pub struct CapabilityRouter {
    resolver: Resolver,
}

impl CapabilityRouter {
    pub fn new(resolver: Resolver) -> Self {
        Self { resolver }
    }

    /// Builds the production chain over reqwest and wraps it in a resolver.
    ///
    /// # Errors
    ///
    /// Fails only if the HTTP client cannot be created.
    pub fn from_config(
        providers: &ProviderConfig,
        resolver: ResolverConfig,
    ) -> Result<Self, ProviderError> {
        let factory = ProviderFactory::with_reqwest()?;
        let chain = DetectionChain::new(factory.create(providers));
        Ok(Self::new(Resolver::new(chain, resolver)))
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Resolves `ip`. Never fails.
    pub async fn resolve(&self, ip: &str, options: ResolveOptions) -> CapabilityDescriptor {
        let timeout = options
            .timeout
            .unwrap_or(self.resolver.config().default_timeout);

        match AssertUnwindSafe(self.resolver.get_or_resolve_with_timeout(ip, timeout))
            .catch_unwind()
            .await
        {
            Ok(descriptor) => descriptor,
            Err(_) => {
                error!(ip, "Resolution pipeline panicked, serving last-resort descriptor");
                CapabilityDescriptor::last_resort()
            }
        }
    }

    /// Resolves the client behind an incoming request.
    pub async fn resolve_request(
        &self,
        headers: &HeaderMap,
        peer: Option<IpAddr>,
    ) -> CapabilityDescriptor {
        let ip = client_ip_from_headers(headers, peer);
        self.resolve(&ip, ResolveOptions::default()).await
    }

    /// Pure classification with no detection or caching.
    pub fn classify(&self, country_code: &str) -> CapabilityDescriptor {
        region::classify(country_code)
    }

    pub fn clear_cache(&self) {
        self.resolver.clear_cache();
    }

    pub fn cache_stats(&self) -> ResolverStats {
        self.resolver.stats()
    }
}

impl std::fmt::Debug for CapabilityRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapabilityRouter")
            .field("resolver", &self.resolver)
            .finish()
    }
}

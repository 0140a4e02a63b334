//! Resolver configuration.

use std::time::Duration;

use crate::detection::DEFAULT_ATTEMPT_TIMEOUT;

/// Default freshness window for a cached resolution (1 hour).
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

/// Configuration for the [`Resolver`](super::Resolver).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// How long a resolution is served from cache before the chain runs again.
    pub ttl: Duration,

    /// Upper bound on cached IPs. `None` keeps every IP until overwritten.
    pub max_entries: Option<u64>,

    /// Per-attempt timeout used when the caller does not supply one.
    pub default_timeout: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_CACHE_TTL,
            max_entries: None,
            default_timeout: DEFAULT_ATTEMPT_TIMEOUT,
        }
    }
}

impl ResolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cache freshness window.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Bound the number of cached IPs.
    pub fn with_max_entries(mut self, max_entries: u64) -> Self {
        self.max_entries = Some(max_entries);
        self
    }

    /// Set the default per-attempt timeout.
    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ResolverConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(3600));
        assert_eq!(config.max_entries, None);
        assert_eq!(config.default_timeout, Duration::from_millis(5000));
    }

    #[test]
    fn test_builder() {
        let config = ResolverConfig::new()
            .with_ttl(Duration::from_secs(60))
            .with_max_entries(10_000)
            .with_default_timeout(Duration::from_millis(800));

        assert_eq!(config.ttl, Duration::from_secs(60));
        assert_eq!(config.max_entries, Some(10_000));
        assert_eq!(config.default_timeout, Duration::from_millis(800));
    }
}

//! Resolution cache and request coalescer.
//!
//! # State Machine (per IP)
//!
//! ```text
//! absent ──call──► in-flight ──chain completes──► cached-fresh
//!                     ▲   │                            │
//!       call (joins) ─┘   └─ entry removed            ttl
//!                                                      ▼
//! cached-stale ──call──► (treated as absent)      cached-stale
//! ```
//!
//! # Thread Safety
//!
//! The in-flight map is a `DashMap` and the absent → in-flight transition
//! happens inside its `entry()` guard, so two callers can never both start a
//! run for the same IP. The guard is released before anything is awaited:
//! joiners wait on a cloned [`Shared`] future, not on a lock. Unrelated IPs
//! only ever contend on a map shard.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use futures::future::{BoxFuture, FutureExt, Shared};
use moka::sync::Cache;
use tokio::time::Instant;
use tracing::{debug, error, info};

use super::config::ResolverConfig;
use super::stats::{ResolverMetrics, ResolverStats};
use crate::detection::DetectionChain;
use crate::region::CapabilityDescriptor;

type PendingResolution = Shared<BoxFuture<'static, CapabilityDescriptor>>;

#[derive(Debug, Clone)]
struct CacheEntry {
    descriptor: CapabilityDescriptor,
    resolved_at: Instant,
}

/// A cached resolution as seen by [`Resolver::peek`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedResolution {
    pub descriptor: CapabilityDescriptor,
    pub age: Duration,
    pub fresh: bool,
}

/// Caches resolutions per IP and runs at most one detection chain per IP at
/// a time.
///
/// Cloning is cheap and every clone shares the same cache, so one resolver
/// is built at process start and handed to every request handler.
///
/// # Example
///
/// ```ignore
/// use geogate::detection::DetectionChain;
/// use geogate::resolver::{Resolver, ResolverConfig};
///
/// let resolver = Resolver::new(DetectionChain::new(providers), ResolverConfig::default());
/// let descriptor = resolver.get_or_resolve("8.8.8.8").await;
/// ```
#[derive(Clone)]
pub struct Resolver {
    inner: Arc<ResolverInner>,
}

struct ResolverInner {
    chain: DetectionChain,
    config: ResolverConfig,
    cache: Cache<String, CacheEntry>,
    in_flight: DashMap<String, PendingResolution>,
    metrics: ResolverMetrics,
}

impl Resolver {
    pub fn new(chain: DetectionChain, config: ResolverConfig) -> Self {
        let mut builder = Cache::builder();
        if let Some(max_entries) = config.max_entries {
            builder = builder.max_capacity(max_entries);
        }

        info!(
            ttl_secs = config.ttl.as_secs(),
            max_entries = ?config.max_entries,
            providers = ?chain.provider_names(),
            "Resolver created"
        );

        Self {
            inner: Arc::new(ResolverInner {
                chain,
                config,
                cache: builder.build(),
                in_flight: DashMap::new(),
                metrics: ResolverMetrics::default(),
            }),
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.inner.config
    }

    pub fn chain(&self) -> &DetectionChain {
        &self.inner.chain
    }

    /// Resolves `ip` with the configured default per-attempt timeout.
    pub async fn get_or_resolve(&self, ip: &str) -> CapabilityDescriptor {
        self.get_or_resolve_with_timeout(ip, self.inner.config.default_timeout)
            .await
    }

    /// Resolves `ip`, serving a fresh cache entry or joining a run already in
    /// flight when there is one.
    ///
    /// `timeout` only applies if this call starts a new chain run; callers
    /// that join share the timeout of the run they join.
    ///
    /// # Panics
    ///
    /// Starting a new run spawns it on the current tokio runtime, so this
    /// panics when called outside one. The IP is not left marked in flight.
    pub async fn get_or_resolve_with_timeout(
        &self,
        ip: &str,
        timeout: Duration,
    ) -> CapabilityDescriptor {
        let key = ip.trim();

        if let Some(descriptor) = self.inner.fresh(key) {
            self.inner.metrics.hit();
            return descriptor;
        }

        let pending = match self.inner.in_flight.entry(key.to_string()) {
            Entry::Occupied(entry) => {
                self.inner.metrics.coalesced();
                debug!(ip = key, "Joining in-flight resolution");
                entry.get().clone()
            }
            Entry::Vacant(entry) => {
                // A run may have finished between the cache read and taking the entry.
                if let Some(descriptor) = self.inner.fresh(key) {
                    self.inner.metrics.hit();
                    return descriptor;
                }
                self.inner.metrics.miss();
                let pending = ResolverInner::start_resolution(
                    Arc::clone(&self.inner),
                    key.to_string(),
                    timeout,
                );
                // Driven independently so it completes even if every caller goes away.
                // Spawned before it is published so a missing runtime leaves no entry.
                tokio::spawn(pending.clone());
                entry.insert(pending.clone());
                pending
            }
        };

        pending.await
    }

    /// The cached resolution for `ip`, fresh or stale, without any I/O.
    pub fn peek(&self, ip: &str) -> Option<CachedResolution> {
        self.inner.cache.get(ip.trim()).map(|entry| {
            let age = entry.resolved_at.elapsed();
            CachedResolution {
                descriptor: entry.descriptor,
                age,
                fresh: age < self.inner.config.ttl,
            }
        })
    }

    /// Whether a resolution for `ip` is currently running.
    pub fn is_in_flight(&self, ip: &str) -> bool {
        self.inner.in_flight.contains_key(ip.trim())
    }

    /// Drops one cached entry. A run in flight for `ip` is not affected.
    pub fn invalidate(&self, ip: &str) {
        self.inner.cache.invalidate(ip.trim());
    }

    /// Drops every cached entry. Runs in flight are not cancelled.
    pub fn clear_cache(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks();
        info!("Resolver cache cleared");
    }

    /// Counters plus current cache and in-flight sizes.
    pub fn stats(&self) -> ResolverStats {
        self.inner.cache.run_pending_tasks();
        self.inner
            .metrics
            .snapshot(self.inner.cache.entry_count(), self.inner.in_flight.len())
    }
}

impl ResolverInner {
    fn fresh(&self, ip: &str) -> Option<CapabilityDescriptor> {
        self.cache
            .get(ip)
            .filter(|entry| entry.resolved_at.elapsed() < self.config.ttl)
            .map(|entry| entry.descriptor)
    }

    /// Builds the shared run for `ip`. Nothing executes until it is polled.
    fn start_resolution(inner: Arc<Self>, ip: String, timeout: Duration) -> PendingResolution {
        async move {
            inner.metrics.chain_run();

            let outcome = AssertUnwindSafe(inner.chain.resolve(&ip, timeout))
                .catch_unwind()
                .await;

            let descriptor = match outcome {
                Ok(descriptor) => {
                    inner.cache.insert(
                        ip.clone(),
                        CacheEntry {
                            descriptor: descriptor.clone(),
                            resolved_at: Instant::now(),
                        },
                    );
                    descriptor
                }
                // Not cached, so the next request retries.
                Err(_) => {
                    error!(ip = %ip, "Detection chain panicked, serving last-resort descriptor");
                    CapabilityDescriptor::last_resort()
                }
            };

            inner.in_flight.remove(&ip);
            descriptor
        }
        .boxed()
        .shared()
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("config", &self.inner.config)
            .field("chain", &self.inner.chain)
            .field("in_flight", &self.inner.in_flight.len())
            .finish_non_exhaustive()
    }
}

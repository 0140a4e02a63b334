//! Resolver counters.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Lock-free counters updated on the resolution path.
#[derive(Debug, Default)]
pub(crate) struct ResolverMetrics {
    hits: AtomicU64,
    misses: AtomicU64,
    coalesced: AtomicU64,
    chain_runs: AtomicU64,
}

impl ResolverMetrics {
    pub(crate) fn hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn coalesced(&self) {
        self.coalesced.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn chain_run(&self) {
        self.chain_runs.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self, entries: u64, in_flight: usize) -> ResolverStats {
        ResolverStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            coalesced: self.coalesced.load(Ordering::Relaxed),
            chain_runs: self.chain_runs.load(Ordering::Relaxed),
            entries,
            in_flight,
        }
    }
}

/// Point-in-time view of the resolver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolverStats {
    /// Calls answered from a fresh cache entry.
    pub hits: u64,
    /// Calls that started a new chain run.
    pub misses: u64,
    /// Calls that joined a run already in flight.
    pub coalesced: u64,
    /// Chain runs started.
    pub chain_runs: u64,
    /// Cached IPs, fresh or stale.
    pub entries: u64,
    /// Resolutions currently in flight.
    pub in_flight: usize,
}

impl ResolverStats {
    /// Fraction of calls answered without starting a chain run.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses + self.coalesced;
        if total == 0 {
            0.0
        } else {
            (self.hits + self.coalesced) as f64 / total as f64
        }
    }
}

impl fmt::Display for ResolverStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} entries, {} in flight, {} hits, {} misses, {} coalesced, {} chain runs",
            self.entries, self.in_flight, self.hits, self.misses, self.coalesced, self.chain_runs
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot() {
        let metrics = ResolverMetrics::default();
        metrics.hit();
        metrics.hit();
        metrics.miss();
        metrics.coalesced();
        metrics.chain_run();

        let stats = metrics.snapshot(7, 1);
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.coalesced, 1);
        assert_eq!(stats.chain_runs, 1);
        assert_eq!(stats.entries, 7);
        assert_eq!(stats.in_flight, 1);
        assert!((stats.hit_rate() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_rate_empty() {
        assert_eq!(ResolverStats::default().hit_rate(), 0.0);
    }
}

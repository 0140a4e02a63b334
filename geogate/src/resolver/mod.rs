//! Resolution cache and request coalescer.
//!
//! [`Resolver`] sits between the [`CapabilityRouter`](crate::router::CapabilityRouter)
//! and the [`DetectionChain`](crate::detection::DetectionChain). It remembers
//! each IP's descriptor for a fixed TTL and makes sure concurrent callers for
//! the same IP share one chain run.
//!
//! Every completed chain run is cached, including runs where every network
//! strategy failed and the fallback heuristic answered, so a persistently
//! failing IP is retried once per TTL rather than once per request.

mod config;
mod coalescer;
mod stats;

pub use config::{ResolverConfig, DEFAULT_CACHE_TTL};
pub use coalescer::{CachedResolution, Resolver};
pub use stats::ResolverStats;

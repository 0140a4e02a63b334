//! Capability routing.
//!
//! [`CapabilityRouter`] is what request handlers hold. It resolves a visitor
//! IP through the [`Resolver`](crate::resolver::Resolver) and guarantees a
//! complete descriptor comes back whatever happens underneath.

mod capability;
mod headers;

pub use capability::{CapabilityRouter, ResolveOptions};
pub use headers::client_ip_from_headers;

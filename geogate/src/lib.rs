//! GeoGate - Visitor region detection and capability routing
//!
//! This library maps a visitor's IP address to one of six coarse regions and
//! the capabilities that follow from it: currency, payment rails, sign-in
//! methods, the database backend that should serve the visitor, and whether
//! a regulated privacy regime applies.
//!
//! Detection walks an ordered chain of lookup services with a per-attempt
//! timeout and always ends with a local heuristic, so resolution never fails.
//! Results are cached per IP and concurrent lookups for the same IP share a
//! single chain run.
//!
//! Separately, the [`adapter`] module builds the auth and database adapters
//! for the region this process is deployed in.

pub mod adapter;
pub mod config;
pub mod detection;
pub mod logging;
pub mod provider;
pub mod region;
pub mod resolver;
pub mod router;

pub use router::{CapabilityRouter, ResolveOptions};

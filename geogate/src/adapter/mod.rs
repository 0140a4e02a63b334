//! Deployment adapters.
//!
//! The deployment region is a process-level setting: a service deployed in
//! China talks to the document-store backend for both auth and data, and an
//! international deployment talks to the relational backend. The
//! [`AdapterFactory`] builds each (kind, region) adapter once and keeps it for
//! the life of the process.
//!
//! Which deployment a visitor *should* be served from is a separate question
//! answered per request by
//! [`CapabilityDescriptor::is_served_by`](crate::region::CapabilityDescriptor::is_served_by).

mod auth;
mod config;
mod database;
mod error;
mod factory;
mod types;

pub use auth::{AuthAdapter, DocumentStoreAuth, RelationalAuth};
pub use config::{
    AdapterConfig, DocumentStoreConfig, RelationalConfig, DEFAULT_DOCUMENT_STORE_REGION,
};
pub use database::{DatabaseAdapter, DocumentStoreDatabase, RelationalDatabase};
pub use error::AdapterConstructionError;
pub use factory::AdapterFactory;
pub use types::{AdapterHandle, AdapterKind, DeploymentRegion};

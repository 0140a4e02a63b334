//! Database adapters.

use super::config::{
    document_store_endpoint, relational_endpoint, DocumentStoreConfig, RelationalConfig,
};
use super::error::AdapterConstructionError;
use super::types::AdapterKind;
use crate::region::DatabaseBackend;

/// Storage backend for one deployment.
pub trait DatabaseAdapter: Send + Sync {
    fn provider_name(&self) -> &str;

    fn backend(&self) -> DatabaseBackend;

    /// Base URL requests are sent to.
    fn endpoint(&self) -> &str;

    /// Resource path for a collection or table.
    fn collection_path(&self, name: &str) -> String;
}

/// Document-store backend (CHINA deployments).
#[derive(Debug)]
pub struct DocumentStoreDatabase {
    endpoint: String,
}

impl DocumentStoreDatabase {
    pub fn new(config: &DocumentStoreConfig) -> Result<Self, AdapterConstructionError> {
        Ok(Self {
            endpoint: document_store_endpoint(config, AdapterKind::Database)?,
        })
    }
}

impl DatabaseAdapter for DocumentStoreDatabase {
    fn provider_name(&self) -> &str {
        "document-store"
    }

    fn backend(&self) -> DatabaseBackend {
        DatabaseBackend::DocumentStore
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn collection_path(&self, name: &str) -> String {
        format!("{}/database/collections/{}", self.endpoint, name)
    }
}

/// Relational backend (INTERNATIONAL deployments).
#[derive(Debug)]
pub struct RelationalDatabase {
    url: String,
    anon_key: String,
}

impl RelationalDatabase {
    pub fn new(config: &RelationalConfig) -> Result<Self, AdapterConstructionError> {
        let (url, anon_key) = relational_endpoint(config, AdapterKind::Database)?;
        Ok(Self { url, anon_key })
    }

    pub fn anon_key(&self) -> &str {
        &self.anon_key
    }
}

impl DatabaseAdapter for RelationalDatabase {
    fn provider_name(&self) -> &str {
        "relational"
    }

    fn backend(&self) -> DatabaseBackend {
        DatabaseBackend::Relational
    }

    fn endpoint(&self) -> &str {
        &self.url
    }

    fn collection_path(&self, name: &str) -> String {
        format!("{}/rest/v1/{}", self.url, name)
    }
}

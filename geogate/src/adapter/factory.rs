//! Memoised adapter construction keyed by (kind, deployment region).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{error, info};

use super::auth::{AuthAdapter, DocumentStoreAuth, RelationalAuth};
use super::config::AdapterConfig;
use super::database::{DatabaseAdapter, DocumentStoreDatabase, RelationalDatabase};
use super::error::AdapterConstructionError;
use super::types::{AdapterHandle, AdapterKind, DeploymentRegion};

type Slot<T> = Mutex<Option<Result<Arc<T>, AdapterConstructionError>>>;

/// Builds each adapter once and hands out the same instance afterwards.
///
/// Every (kind, region) pair has its own slot. The first caller for a pair
/// constructs the adapter while holding that slot's lock, so concurrent
/// first-use callers see exactly one construction attempt. The outcome is
/// kept either way: the configuration cannot change, so a failed pair keeps
/// returning the same error without trying again.
///
/// # Example
///
/// ```
/// use geogate::adapter::{AdapterConfig, AdapterFactory, AdapterKind, DeploymentRegion};
///
/// let factory = AdapterFactory::new(AdapterConfig::default().with_document_store("prod-1"));
/// let first = factory.get_adapter(AdapterKind::Database, DeploymentRegion::China).unwrap();
/// let second = factory.get_adapter(AdapterKind::Database, DeploymentRegion::China).unwrap();
/// assert!(first.ptr_eq(&second));
/// ```
pub struct AdapterFactory {
    config: AdapterConfig,
    china_auth: Slot<dyn AuthAdapter>,
    china_database: Slot<dyn DatabaseAdapter>,
    international_auth: Slot<dyn AuthAdapter>,
    international_database: Slot<dyn DatabaseAdapter>,
    constructions: AtomicUsize,
}

impl AdapterFactory {
    pub fn new(config: AdapterConfig) -> Self {
        Self {
            config,
            china_auth: Mutex::new(None),
            china_database: Mutex::new(None),
            international_auth: Mutex::new(None),
            international_database: Mutex::new(None),
            constructions: AtomicUsize::new(0),
        }
    }

    /// Returns the adapter for `kind` in `region`, building it on first use.
    ///
    /// # Errors
    ///
    /// [`AdapterConstructionError`] when the configuration for the target
    /// provider is missing or invalid.
    pub fn get_adapter(
        &self,
        kind: AdapterKind,
        region: DeploymentRegion,
    ) -> Result<AdapterHandle, AdapterConstructionError> {
        match kind {
            AdapterKind::Auth => self.auth(region).map(AdapterHandle::Auth),
            AdapterKind::Database => self.database(region).map(AdapterHandle::Database),
        }
    }

    /// Auth adapter for `region`.
    pub fn auth(
        &self,
        region: DeploymentRegion,
    ) -> Result<Arc<dyn AuthAdapter>, AdapterConstructionError> {
        let slot = match region {
            DeploymentRegion::China => &self.china_auth,
            DeploymentRegion::International => &self.international_auth,
        };

        self.get_or_construct(slot, AdapterKind::Auth, region, || {
            let adapter: Arc<dyn AuthAdapter> = match region {
                DeploymentRegion::China => {
                    Arc::new(DocumentStoreAuth::new(&self.config.document_store)?)
                }
                DeploymentRegion::International => {
                    Arc::new(RelationalAuth::new(&self.config.relational)?)
                }
            };
            Ok(adapter)
        })
    }

    /// Database adapter for `region`.
    pub fn database(
        &self,
        region: DeploymentRegion,
    ) -> Result<Arc<dyn DatabaseAdapter>, AdapterConstructionError> {
        let slot = match region {
            DeploymentRegion::China => &self.china_database,
            DeploymentRegion::International => &self.international_database,
        };

        self.get_or_construct(slot, AdapterKind::Database, region, || {
            let adapter: Arc<dyn DatabaseAdapter> = match region {
                DeploymentRegion::China => {
                    Arc::new(DocumentStoreDatabase::new(&self.config.document_store)?)
                }
                DeploymentRegion::International => {
                    Arc::new(RelationalDatabase::new(&self.config.relational)?)
                }
            };
            Ok(adapter)
        })
    }

    /// Number of construction attempts so far, successful or not.
    pub fn construction_count(&self) -> usize {
        self.constructions.load(Ordering::SeqCst)
    }

    fn get_or_construct<T: ?Sized>(
        &self,
        slot: &Slot<T>,
        kind: AdapterKind,
        region: DeploymentRegion,
        construct: impl FnOnce() -> Result<Arc<T>, AdapterConstructionError>,
    ) -> Result<Arc<T>, AdapterConstructionError> {
        let mut slot = slot.lock();
        if let Some(outcome) = slot.as_ref() {
            return outcome.clone();
        }

        self.constructions.fetch_add(1, Ordering::SeqCst);
        let outcome = construct();
        match &outcome {
            Ok(_) => info!(kind = %kind, region = %region, "Adapter constructed"),
            Err(e) => {
                error!(kind = %kind, region = %region, error = %e, "Adapter construction failed")
            }
        }

        *slot = Some(outcome.clone());
        outcome
    }
}

impl std::fmt::Debug for AdapterFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterFactory")
            .field("constructions", &self.construction_count())
            .finish_non_exhaustive()
    }
}

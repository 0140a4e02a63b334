//! Adapter selection keys and handles.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::auth::AuthAdapter;
use super::database::DatabaseAdapter;
use crate::region::{DatabaseBackend, DeploymentTarget};

/// Which external collaborator an adapter talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdapterKind {
    Auth,
    Database,
}

impl AdapterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdapterKind::Auth => "auth",
            AdapterKind::Database => "database",
        }
    }
}

impl fmt::Display for AdapterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdapterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auth" => Ok(AdapterKind::Auth),
            "database" | "db" => Ok(AdapterKind::Database),
            other => Err(format!("unknown adapter kind '{}'", other)),
        }
    }
}

/// Where this process is deployed.
///
/// A process-level setting fixed by configuration. It is not the visitor's
/// detected [`Region`](crate::region::Region).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeploymentRegion {
    China,
    #[default]
    International,
}

impl DeploymentRegion {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentRegion::China => "china",
            DeploymentRegion::International => "international",
        }
    }

    /// Backend this deployment stores data in.
    pub fn database_backend(&self) -> DatabaseBackend {
        match self {
            DeploymentRegion::China => DatabaseBackend::DocumentStore,
            DeploymentRegion::International => DatabaseBackend::Relational,
        }
    }

    pub fn deployment_target(&self) -> DeploymentTarget {
        self.database_backend().deployment_target()
    }
}

impl fmt::Display for DeploymentRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeploymentRegion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "china" | "cn" => Ok(DeploymentRegion::China),
            "international" | "intl" | "global" => Ok(DeploymentRegion::International),
            other => Err(format!("unknown deployment region '{}'", other)),
        }
    }
}

/// A constructed adapter, shared for the life of the process.
#[derive(Clone)]
pub enum AdapterHandle {
    Auth(Arc<dyn AuthAdapter>),
    Database(Arc<dyn DatabaseAdapter>),
}

impl AdapterHandle {
    pub fn kind(&self) -> AdapterKind {
        match self {
            AdapterHandle::Auth(_) => AdapterKind::Auth,
            AdapterHandle::Database(_) => AdapterKind::Database,
        }
    }

    /// Name of the backing provider.
    pub fn provider_name(&self) -> &str {
        match self {
            AdapterHandle::Auth(adapter) => adapter.provider_name(),
            AdapterHandle::Database(adapter) => adapter.provider_name(),
        }
    }

    pub fn as_auth(&self) -> Option<&Arc<dyn AuthAdapter>> {
        match self {
            AdapterHandle::Auth(adapter) => Some(adapter),
            AdapterHandle::Database(_) => None,
        }
    }

    pub fn as_database(&self) -> Option<&Arc<dyn DatabaseAdapter>> {
        match self {
            AdapterHandle::Database(adapter) => Some(adapter),
            AdapterHandle::Auth(_) => None,
        }
    }

    /// Whether both handles point at the same adapter instance.
    pub fn ptr_eq(&self, other: &AdapterHandle) -> bool {
        match (self, other) {
            (AdapterHandle::Auth(a), AdapterHandle::Auth(b)) => Arc::ptr_eq(a, b),
            (AdapterHandle::Database(a), AdapterHandle::Database(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for AdapterHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterHandle")
            .field("kind", &self.kind())
            .field("provider", &self.provider_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind() {
        assert_eq!("auth".parse::<AdapterKind>(), Ok(AdapterKind::Auth));
        assert_eq!("DB".parse::<AdapterKind>(), Ok(AdapterKind::Database));
        assert!("storage".parse::<AdapterKind>().is_err());
    }

    #[test]
    fn test_parse_deployment_region() {
        assert_eq!("China".parse(), Ok(DeploymentRegion::China));
        assert_eq!("global".parse(), Ok(DeploymentRegion::International));
        assert!("mars".parse::<DeploymentRegion>().is_err());
    }

    #[test]
    fn test_deployment_backends() {
        assert_eq!(
            DeploymentRegion::China.database_backend(),
            DatabaseBackend::DocumentStore
        );
        assert_eq!(
            DeploymentRegion::International.deployment_target(),
            DeploymentTarget::GlobalEdge
        );
        assert_eq!(DeploymentRegion::default(), DeploymentRegion::International);
    }
}

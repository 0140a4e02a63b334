//! Adapter construction errors.

use thiserror::Error;

use super::types::{AdapterKind, DeploymentRegion};

/// Raised the first time an adapter cannot be built from configuration.
///
/// There is no region-appropriate backend to substitute, so callers should
/// treat this as fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdapterConstructionError {
    /// A required setting is absent or empty.
    #[error("{kind} adapter for {region} deployment requires '{setting}'")]
    MissingSetting {
        kind: AdapterKind,
        region: DeploymentRegion,
        setting: &'static str,
    },

    /// A setting is present but unusable.
    #[error("{kind} adapter for {region} deployment has invalid '{setting}': {reason}")]
    InvalidSetting {
        kind: AdapterKind,
        region: DeploymentRegion,
        setting: &'static str,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = AdapterConstructionError::MissingSetting {
            kind: AdapterKind::Database,
            region: DeploymentRegion::China,
            setting: "document_store.env_id",
        };
        assert_eq!(
            err.to_string(),
            "database adapter for china deployment requires 'document_store.env_id'"
        );
    }
}

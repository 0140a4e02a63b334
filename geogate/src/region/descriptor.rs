//! The resolved capability bundle handed to request handlers.

use serde::Serialize;

use super::types::{
    AuthMethod, Currency, DatabaseBackend, DeploymentTarget, PaymentMethod, Region,
};
use crate::adapter::DeploymentRegion;

/// Immutable capability bundle for a visitor.
///
/// Only [`region`](Self::region) and [`country_code`](Self::country_code) are
/// inputs; every other field is read from the region's
/// [`RegionProfile`](super::RegionProfile), so two descriptors with the same
/// region agree on everything except the country code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityDescriptor {
    region: Region,
    country_code: String,
    currency: Currency,
    payment_methods: &'static [PaymentMethod],
    auth_methods: &'static [AuthMethod],
    database_backend: DatabaseBackend,
    deployment_target: DeploymentTarget,
    regulated_privacy: bool,
}

impl CapabilityDescriptor {
    /// Builds the descriptor for `region`, tagging it with `country_code`.
    pub fn for_region(region: Region, country_code: impl Into<String>) -> Self {
        let profile = region.profile();
        Self {
            region,
            country_code: country_code.into(),
            currency: profile.currency,
            payment_methods: profile.payment_methods,
            auth_methods: profile.auth_methods,
            database_backend: profile.database_backend,
            deployment_target: profile.deployment_target(),
            regulated_privacy: profile.regulated_privacy,
        }
    }

    /// Descriptor returned when the resolution pipeline itself breaks.
    ///
    /// Always the generic international bundle, never CHINA.
    pub fn last_resort() -> Self {
        Self::for_region(Region::Usa, "")
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// ISO 3166-1 alpha-2 code, empty when undetermined.
    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn payment_methods(&self) -> &'static [PaymentMethod] {
        self.payment_methods
    }

    pub fn auth_methods(&self) -> &'static [AuthMethod] {
        self.auth_methods
    }

    pub fn database_backend(&self) -> DatabaseBackend {
        self.database_backend
    }

    pub fn deployment_target(&self) -> DeploymentTarget {
        self.deployment_target
    }

    pub fn regulated_privacy(&self) -> bool {
        self.regulated_privacy
    }

    pub fn supports_payment(&self, method: PaymentMethod) -> bool {
        self.payment_methods.contains(&method)
    }

    pub fn supports_auth(&self, method: AuthMethod) -> bool {
        self.auth_methods.contains(&method)
    }

    /// First payment rail offered in this region, if any.
    pub fn preferred_payment(&self) -> Option<PaymentMethod> {
        self.payment_methods.first().copied()
    }

    /// Whether a process deployed in `deployment` stores this visitor's data
    /// on the backend their region expects.
    pub fn is_served_by(&self, deployment: DeploymentRegion) -> bool {
        deployment.database_backend() == self.database_backend
    }

    /// Whether every capability field agrees with the region table.
    pub fn is_consistent(&self) -> bool {
        *self == Self::for_region(self.region, self.country_code.clone())
    }
}

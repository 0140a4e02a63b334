//! Per-region capability table.
//!
//! Every capability attribute lives in one [`RegionProfile`] row, and rows are
//! selected by an exhaustive `match` on [`Region`]. Adding a region without a
//! row is a compile error, and no attribute can drift from the others.

use super::types::{AuthMethod, Currency, DatabaseBackend, DeploymentTarget, PaymentMethod, Region};

/// Capability row for a single region.
#[derive(Debug, PartialEq, Eq)]
pub struct RegionProfile {
    pub currency: Currency,
    pub payment_methods: &'static [PaymentMethod],
    pub auth_methods: &'static [AuthMethod],
    pub database_backend: DatabaseBackend,
    pub regulated_privacy: bool,
}

impl RegionProfile {
    /// Hosting target, derived from the backend so the 1:1 pairing holds.
    pub fn deployment_target(&self) -> DeploymentTarget {
        self.database_backend.deployment_target()
    }
}

const INTERNATIONAL_PAYMENTS: &[PaymentMethod] = &[PaymentMethod::Stripe, PaymentMethod::PayPal];
const INTERNATIONAL_AUTH: &[AuthMethod] = &[AuthMethod::Google, AuthMethod::EmailPassword];

static CHINA: RegionProfile = RegionProfile {
    currency: Currency::CNY,
    payment_methods: &[PaymentMethod::WechatPay, PaymentMethod::Alipay],
    auth_methods: &[AuthMethod::WechatLogin, AuthMethod::PhoneOtp],
    database_backend: DatabaseBackend::DocumentStore,
    regulated_privacy: false,
};

static USA: RegionProfile = RegionProfile {
    currency: Currency::USD,
    payment_methods: INTERNATIONAL_PAYMENTS,
    auth_methods: INTERNATIONAL_AUTH,
    database_backend: DatabaseBackend::Relational,
    regulated_privacy: false,
};

// No payment rails are offered under strict data-protection law.
static EUROPE: RegionProfile = RegionProfile {
    currency: Currency::EUR,
    payment_methods: &[],
    auth_methods: &[AuthMethod::EmailPassword],
    database_backend: DatabaseBackend::Relational,
    regulated_privacy: true,
};

static INDIA: RegionProfile = RegionProfile {
    currency: Currency::INR,
    payment_methods: INTERNATIONAL_PAYMENTS,
    auth_methods: INTERNATIONAL_AUTH,
    database_backend: DatabaseBackend::Relational,
    regulated_privacy: false,
};

static SINGAPORE: RegionProfile = RegionProfile {
    currency: Currency::SGD,
    payment_methods: INTERNATIONAL_PAYMENTS,
    auth_methods: INTERNATIONAL_AUTH,
    database_backend: DatabaseBackend::Relational,
    regulated_privacy: false,
};

static OTHER: RegionProfile = RegionProfile {
    currency: Currency::USD,
    payment_methods: INTERNATIONAL_PAYMENTS,
    auth_methods: INTERNATIONAL_AUTH,
    database_backend: DatabaseBackend::Relational,
    regulated_privacy: false,
};

impl Region {
    /// Capability row for this region.
    pub fn profile(&self) -> &'static RegionProfile {
        match self {
            Region::China => &CHINA,
            Region::Usa => &USA,
            Region::Europe => &EUROPE,
            Region::India => &INDIA,
            Region::Singapore => &SINGAPORE,
            Region::Other => &OTHER,
        }
    }
}

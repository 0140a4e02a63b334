//! Closed vocabularies shared by the classifier, the router and the adapters.

use std::fmt;

use serde::Serialize;

/// Coarse bucket driving every downstream capability decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Region {
    China,
    Usa,
    Europe,
    India,
    Singapore,
    Other,
}

impl Region {
    /// Every region, in table order.
    pub const ALL: [Region; 6] = [
        Region::China,
        Region::Usa,
        Region::Europe,
        Region::India,
        Region::Singapore,
        Region::Other,
    ];

    /// Stable identifier used in logs and CLI output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::China => "CHINA",
            Region::Usa => "USA",
            Region::Europe => "EUROPE",
            Region::India => "INDIA",
            Region::Singapore => "SINGAPORE",
            Region::Other => "OTHER",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ISO 4217 currency used for pricing in a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Currency {
    CNY,
    USD,
    EUR,
    INR,
    SGD,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::CNY => "CNY",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::INR => "INR",
            Currency::SGD => "SGD",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Payment rail identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Internationally generic card rail.
    Stripe,
    /// Internationally generic wallet rail.
    PayPal,
    WechatPay,
    Alipay,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Stripe => "stripe",
            PaymentMethod::PayPal => "paypal",
            PaymentMethod::WechatPay => "wechat_pay",
            PaymentMethod::Alipay => "alipay",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authentication method identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    EmailPassword,
    Google,
    WechatLogin,
    PhoneOtp,
}

impl AuthMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMethod::EmailPassword => "email_password",
            AuthMethod::Google => "google",
            AuthMethod::WechatLogin => "wechat_login",
            AuthMethod::PhoneOtp => "phone_otp",
        }
    }
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storage backend family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DatabaseBackend {
    /// Document-store oriented backend (BACKEND_A).
    DocumentStore,
    /// Relational backend with managed auth (BACKEND_B).
    Relational,
}

impl DatabaseBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseBackend::DocumentStore => "document_store",
            DatabaseBackend::Relational => "relational",
        }
    }

    /// Hosting target paired with this backend.
    pub fn deployment_target(&self) -> DeploymentTarget {
        match self {
            DatabaseBackend::DocumentStore => DeploymentTarget::MainlandCloud,
            DatabaseBackend::Relational => DeploymentTarget::GlobalEdge,
        }
    }
}

impl fmt::Display for DatabaseBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hosting target, 1:1 with [`DatabaseBackend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentTarget {
    MainlandCloud,
    GlobalEdge,
}

impl DeploymentTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentTarget::MainlandCloud => "mainland_cloud",
            DeploymentTarget::GlobalEdge => "global_edge",
        }
    }
}

impl fmt::Display for DeploymentTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

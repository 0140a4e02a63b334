//! Region classification and the capability vocabulary.
//!
//! [`classify`] is pure and total: it turns any string into a
//! [`CapabilityDescriptor`], falling back to [`Region::Other`] for anything it
//! does not recognise.
//!
//! ```
//! use geogate::region::{classify, Region, Currency};
//!
//! let descriptor = classify("DE");
//! assert_eq!(descriptor.region(), Region::Europe);
//! assert_eq!(descriptor.currency(), Currency::EUR);
//! assert!(descriptor.payment_methods().is_empty());
//! ```

mod classifier;
mod descriptor;
mod profile;
mod types;

pub use classifier::{classify, normalize_country_code, region_for};
pub use descriptor::CapabilityDescriptor;
pub use profile::RegionProfile;
pub use types::{AuthMethod, Currency, DatabaseBackend, DeploymentTarget, PaymentMethod, Region};

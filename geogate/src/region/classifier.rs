//! Country code → region classification.

use super::descriptor::CapabilityDescriptor;
use super::types::Region;

/// Countries under strict data-protection law: the EU member states, the
/// remaining EEA states, the United Kingdom and Switzerland.
const REGULATED_COUNTRIES: &[&str] = &[
    "AT", "BE", "BG", "HR", "CY", "CZ", "DK", "EE", "FI", "FR", "DE", "GR", "HU", "IE", "IT",
    "LV", "LT", "LU", "MT", "NL", "PL", "PT", "RO", "SK", "SI", "ES", "SE", // EU
    "IS", "LI", "NO", // EEA
    "GB", "CH",
];

/// Normalises a raw country code to upper-case ISO 3166-1 alpha-2.
///
/// Returns `None` unless the trimmed input is exactly two ASCII letters.
pub fn normalize_country_code(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.len() == 2 && trimmed.bytes().all(|b| b.is_ascii_alphabetic()) {
        Some(trimmed.to_ascii_uppercase())
    } else {
        None
    }
}

/// Maps a normalised country code onto its region.
pub fn region_for(country_code: &str) -> Region {
    match country_code {
        "CN" => Region::China,
        "US" => Region::Usa,
        "IN" => Region::India,
        "SG" => Region::Singapore,
        code if REGULATED_COUNTRIES.contains(&code) => Region::Europe,
        _ => Region::Other,
    }
}

/// Classifies a country code into a full capability descriptor.
///
/// Total: malformed or unknown input yields [`Region::Other`] with an empty
/// country code rather than an error.
pub fn classify(country_code: &str) -> CapabilityDescriptor {
    match normalize_country_code(country_code) {
        Some(code) => CapabilityDescriptor::for_region(region_for(&code), code),
        None => CapabilityDescriptor::for_region(Region::Other, ""),
    }
}

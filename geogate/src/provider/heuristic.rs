//! Local network heuristic.
//!
//! Decides between two fixed countries without any I/O: addresses that can
//! only come from the local or private network map to [`PRIVATE_NETWORK_COUNTRY`],
//! everything else to [`PUBLIC_FALLBACK_COUNTRY`]. The detection chain uses it
//! both as the up-front shortcut for local addresses and as the last strategy
//! when every network lookup fails.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Country assumed for loopback, empty and private-range addresses.
pub const PRIVATE_NETWORK_COUNTRY: &str = "CN";

/// Country assumed for public addresses no service could resolve.
pub const PUBLIC_FALLBACK_COUNTRY: &str = "US";

/// Returns true for empty, loopback, link-local and private-range addresses.
///
/// Strings that do not parse as an IP address are not considered local.
pub fn is_local_address(ip: &str) -> bool {
    let ip = ip.trim();
    if ip.is_empty() || ip.eq_ignore_ascii_case("localhost") || ip.eq_ignore_ascii_case("unknown")
    {
        return true;
    }

    match ip.parse::<IpAddr>() {
        Ok(IpAddr::V4(v4)) => is_local_v4(&v4),
        Ok(IpAddr::V6(v6)) => is_local_v6(&v6),
        Err(_) => false,
    }
}

fn is_local_v4(ip: &Ipv4Addr) -> bool {
    let [a, b, ..] = ip.octets();
    ip.is_private()
        || ip.is_loopback()
        || ip.is_link_local()
        || ip.is_unspecified()
        // 100.64.0.0/10 carrier-grade NAT
        || (a == 100 && (b & 0xc0) == 64)
}

fn is_local_v6(ip: &Ipv6Addr) -> bool {
    if let Some(v4) = ip.to_ipv4_mapped() {
        return is_local_v4(&v4);
    }
    let first = ip.segments()[0];
    ip.is_loopback()
        || ip.is_unspecified()
        // fc00::/7 unique local
        || (first & 0xfe00) == 0xfc00
        // fe80::/10 link local
        || (first & 0xffc0) == 0xfe80
}

/// The no-I/O strategy. Infallible by construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalNetworkHeuristic;

impl LocalNetworkHeuristic {
    pub fn name(&self) -> &str {
        "local-network"
    }

    /// Country code for `ip`.
    pub fn country_for(&self, ip: &str) -> &'static str {
        if is_local_address(ip) {
            PRIVATE_NETWORK_COUNTRY
        } else {
            PUBLIC_FALLBACK_COUNTRY
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_addresses() {
        for ip in [
            "",
            "  ",
            "localhost",
            "unknown",
            "127.0.0.1",
            "10.0.0.5",
            "172.16.4.1",
            "172.31.255.255",
            "192.168.1.20",
            "169.254.10.10",
            "100.64.0.1",
            "0.0.0.0",
            "::1",
            "::",
            "fd12:3456:789a::1",
            "fe80::1",
            "::ffff:192.168.0.1",
        ] {
            assert!(is_local_address(ip), "{:?} should be local", ip);
        }
    }

    #[test]
    fn test_public_addresses() {
        for ip in [
            "8.8.8.8",
            "203.0.113.5",
            "172.32.0.1",
            "100.128.0.1",
            "2001:4860:4860::8888",
            "::ffff:8.8.8.8",
        ] {
            assert!(!is_local_address(ip), "{:?} should be public", ip);
        }
    }

    #[test]
    fn test_garbage_is_not_local() {
        assert!(!is_local_address("not-an-ip"));
        assert_eq!(
            LocalNetworkHeuristic.country_for("not-an-ip"),
            PUBLIC_FALLBACK_COUNTRY
        );
    }

    #[test]
    fn test_country_for() {
        let heuristic = LocalNetworkHeuristic;
        assert_eq!(heuristic.country_for("10.0.0.5"), "CN");
        assert_eq!(heuristic.country_for(""), "CN");
        assert_eq!(heuristic.country_for("8.8.8.8"), "US");
    }
}

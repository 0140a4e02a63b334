//! Client address extraction from proxy headers.

use std::net::IpAddr;

use reqwest::header::HeaderMap;

/// Headers consulted for the client address, most specific first.
const FORWARDING_HEADERS: [&str; 3] = ["x-forwarded-for", "x-real-ip", "cf-connecting-ip"];

/// Returns the visitor's IP as a string.
///
/// Takes the first entry of `x-forwarded-for`, then `x-real-ip`, then
/// `cf-connecting-ip`, then the socket `peer` address. A candidate that does
/// not parse as an IP address is skipped. When nothing usable is found the
/// result is empty, which the detection chain treats as a local address.
pub fn client_ip_from_headers(headers: &HeaderMap, peer: Option<IpAddr>) -> String {
    for name in FORWARDING_HEADERS {
        let Some(value) = headers.get(name).and_then(|v| v.to_str().ok()) else {
            continue;
        };

        // x-forwarded-for is "client, proxy1, proxy2"
        let candidate = value.split(',').next().unwrap_or_default().trim();
        if let Some(ip) = parse_candidate(candidate) {
            return ip.to_string();
        }
    }

    peer.map(|ip| ip.to_string()).unwrap_or_default()
}

fn parse_candidate(candidate: &str) -> Option<IpAddr> {
    if candidate.is_empty() {
        return None;
    }
    // Some proxies bracket IPv6 addresses.
    candidate
        .trim_start_matches('[')
        .trim_end_matches(']')
        .parse()
        .ok()
}

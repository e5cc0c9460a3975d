//! Client IP resolution behind Cloudflare and Fly.io.

use std::net::{IpAddr, SocketAddr};

use axum::http::HeaderMap;

/// Headers checked in order; `x-forwarded-for` contributes its first entry.
const IP_HEADERS: [&str; 4] = [
    "cf-connecting-ip",
    "x-forwarded-for",
    "x-real-ip",
    "fly-client-ip",
];

/// Best guess at the originating client address.
///
/// Falls back to the socket peer when no proxy header parses as an IP.
#[must_use]
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> Option<IpAddr> {
    IP_HEADERS
        .iter()
        .find_map(|name| {
            headers
                .get(*name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.split(',').next())
                .and_then(|v| v.trim().parse::<IpAddr>().ok())
        })
        .or_else(|| peer.map(|addr| addr.ip()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn peer() -> Option<SocketAddr> {
        Some("10.0.0.9:51234".parse().unwrap())
    }

    #[test]
    fn test_cloudflare_header_wins() {
        let mut headers = HeaderMap::new();
        headers.insert("cf-connecting-ip", HeaderValue::from_static("203.0.113.7"));
        headers.insert("x-forwarded-for", HeaderValue::from_static("198.51.100.1"));

        assert_eq!(client_ip(&headers, peer()), Some("203.0.113.7".parse().unwrap()));
    }

    #[test]
    fn test_first_forwarded_for_entry() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("198.51.100.1, 10.0.0.2, 10.0.0.3"),
        );

        assert_eq!(client_ip(&headers, peer()), Some("198.51.100.1".parse().unwrap()));
    }

    #[test]
    fn test_garbage_header_falls_through() {
        let mut headers = HeaderMap::new();
        headers.insert("cf-connecting-ip", HeaderValue::from_static("not-an-ip"));
        headers.insert("fly-client-ip", HeaderValue::from_static("2001:db8::1"));

        assert_eq!(client_ip(&headers, peer()), Some("2001:db8::1".parse().unwrap()));
    }

    #[test]
    fn test_peer_fallback() {
        assert_eq!(
            client_ip(&HeaderMap::new(), peer()),
            Some("10.0.0.9".parse().unwrap())
        );
        assert_eq!(client_ip(&HeaderMap::new(), None), None);
    }
}

//! Per-client rate limiting using the token bucket algorithm.

use axum::http::Request;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::net::IpAddr;
use std::sync::Arc;
use tower_governor::{
    GovernorError, GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Keys requests by client IP.
///
/// Uses the socket peer address, or `X-Forwarded-For` / `X-Real-IP` /
/// `Forwarded` headers when running behind a trusted proxy. Header-based
/// keys are spoofable, so `behind_proxy` must stay off for direct exposure.
#[derive(Debug, Clone, Copy)]
pub struct ClientIpKeyExtractor {
    behind_proxy: bool,
}

impl ClientIpKeyExtractor {
    pub fn new(behind_proxy: bool) -> Self {
        Self { behind_proxy }
    }
}

impl KeyExtractor for ClientIpKeyExtractor {
    type Key = IpAddr;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        if self.behind_proxy {
            SmartIpKeyExtractor.extract(req)
        } else {
            PeerIpKeyExtractor.extract(req)
        }
    }
}

/// Creates the rate limiter applied to `/api/*`.
///
/// Clients get a bucket of `burst_size` requests; one request is added back
/// every `per_second` seconds. Requests exceeding the limit receive
/// `429 Too Many Requests`.
///
/// # Panics
///
/// Panics if `per_second` or `burst_size` is zero. Both are rejected by
/// [`crate::config::Config::validate`] before the router is built.
pub fn layer(
    per_second: u64,
    burst_size: u32,
    behind_proxy: bool,
) -> GovernorLayer<ClientIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(per_second)
            .burst_size(burst_size)
            .key_extractor(ClientIpKeyExtractor::new(behind_proxy))
            .finish()
            .expect("rate limit values must be non-zero"),
    );

    GovernorLayer::new(governor_conf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::ConnectInfo;
    use std::net::SocketAddr;

    fn request_from(peer: &str, forwarded_for: Option<&str>) -> Request<()> {
        let mut builder = Request::builder().uri("/api/shorten");
        if let Some(value) = forwarded_for {
            builder = builder.header("x-forwarded-for", value);
        }
        let mut req = builder.body(()).unwrap();
        let addr: SocketAddr = peer.parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        req
    }

    #[test]
    fn test_direct_mode_ignores_forwarded_header() {
        let extractor = ClientIpKeyExtractor::new(false);
        let req = request_from("10.0.0.1:5000", Some("203.0.113.7"));

        let key = extractor.extract(&req).unwrap();
        assert_eq!(key, "10.0.0.1".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn test_proxy_mode_uses_forwarded_header() {
        let extractor = ClientIpKeyExtractor::new(true);
        let req = request_from("10.0.0.1:5000", Some("203.0.113.7"));

        let key = extractor.extract(&req).unwrap();
        assert_eq!(key, "203.0.113.7".parse::<IpAddr>().unwrap());
    }
}

//! Rate limiting middleware using token bucket algorithm.

use axum::Router;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

use crate::state::AppState;

/// Applies the public rate limit tier to a router.
///
/// # Limits
///
/// - **Rate**: 2 requests per second
/// - **Burst**: 100 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// Per client IP. With `behind_proxy` the IP comes from
/// `X-Forwarded-For` / `X-Real-IP` (trustworthy only behind a reverse
/// proxy); otherwise from the socket peer address.
pub fn public(router: Router<AppState>, behind_proxy: bool) -> Router<AppState> {
    if behind_proxy {
        router.layer(layer_with(SmartIpKeyExtractor, 2, 100))
    } else {
        router.layer(layer_with(PeerIpKeyExtractor, 2, 100))
    }
}

/// Applies the strict rate limit tier used for credential submission.
///
/// # Limits
///
/// - **Rate**: 1 request per second
/// - **Burst**: 10 requests
pub fn strict(router: Router<AppState>, behind_proxy: bool) -> Router<AppState> {
    if behind_proxy {
        router.layer(layer_with(SmartIpKeyExtractor, 1, 10))
    } else {
        router.layer(layer_with(PeerIpKeyExtractor, 1, 10))
    }
}

fn layer_with<K: KeyExtractor>(
    key_extractor: K,
    per_second: u64,
    burst_size: u32,
) -> GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(key_extractor)
            .per_second(per_second)
            .burst_size(burst_size)
            .finish()
            .unwrap(),
    );

    GovernorLayer::new(governor_conf)
}

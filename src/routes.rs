//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`  - Health check: store, click queue (public)
//! - `GET  /{code}`  - Short link redirect (public)
//! - `/api/*`        - Management API (rate limited)
//!
//! # Middleware
//!
//! - **Path normalization** - Trailing slash handling
//! - **Tracing** - Structured request/response logging
//! - **Timeout** - Requests exceeding the configured limit get `408`
//! - **Security headers** - `nosniff`, `DENY` framing, XSS protection
//! - **Rate limiting** - Per-IP token bucket on `/api/*`

use std::time::Duration;

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{rate_limit, security_headers, tracing};
use crate::config::Config;
use crate::state::AppState;
use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::timeout::TimeoutLayer;

/// Constructs the application router with all routes and middleware.
///
/// Rate limiting keys on the peer address, so the router must be served
/// with `into_make_service_with_connect_info::<SocketAddr>()` unless
/// `rate_limit_enabled` is off.
pub fn app_router(state: AppState, config: &Config) -> NormalizePath<Router> {
    let mut api_router = api::routes::api_routes();
    if config.rate_limit_enabled {
        api_router = api_router.layer(rate_limit::layer(
            config.rate_limit_per_second,
            config.rate_limit_burst,
            config.behind_proxy,
        ));
    }

    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .nest("/api", api_router)
        .with_state(state);

    let router = security_headers::apply(router)
        .layer(timeout_layer(config.request_timeout_seconds))
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

/// Answers `408 Request Timeout` once a request runs longer than `seconds`.
fn timeout_layer(seconds: u64) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, Duration::from_secs(seconds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    #[tokio::test(start_paused = true)]
    async fn test_slow_request_gets_408() {
        let app = Router::new()
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    "done"
                }),
            )
            .layer(timeout_layer(1));

        let request = Request::builder().uri("/slow").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }
}

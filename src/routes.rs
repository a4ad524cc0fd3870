//! Top-level router configuration combining pages and operational routes.
//!
//! # Route Structure
//!
//! - `GET  /`            - Marketing pages (public)
//! - `GET  /health`      - Health check: backend, sessions, refresh worker (public)
//! - `/login`, `/logout` - Session endpoints (strict rate limit)
//! - `/dashboard/*`      - Role-based dashboards (cookie session required)
//! - `/static/*`         - Static assets
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Authentication** - Signed session cookie on `/dashboard/*`
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::rate_limit;
use crate::state::AppState;
use crate::web;
use crate::web::middleware::web_auth;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket
///   address; enable only behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let dashboard = web::routes::protected_routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        web_auth::layer,
    ));
    let dashboard = rate_limit::public(dashboard, behind_proxy);

    let auth_pages = rate_limit::strict(web::routes::auth_routes(), behind_proxy);
    let public_pages = rate_limit::public(web::routes::public_routes(), behind_proxy);

    let router = assemble(state, public_pages, auth_pages, dashboard);
    NormalizePathLayer::trim_trailing_slash().layer(router)
}

/// Router without rate limiting or path normalization.
///
/// Integration tests drive this directly: the governor layers need a socket
/// peer address that in-process test transports do not provide.
pub fn unlimited_router(state: AppState) -> Router {
    let dashboard = web::routes::protected_routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        web_auth::layer,
    ));

    assemble(
        state,
        web::routes::public_routes(),
        web::routes::auth_routes(),
        dashboard,
    )
}

fn assemble(
    state: AppState,
    public_pages: Router<AppState>,
    auth_pages: Router<AppState>,
    dashboard: Router<AppState>,
) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .merge(public_pages)
        .merge(auth_pages)
        .nest("/dashboard", dashboard)
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
        .layer(api::middleware::tracing::layer())
}

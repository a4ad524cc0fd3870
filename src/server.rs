//! HTTP server initialization and runtime setup.
//!
//! Wires the backend client, gateways, services and the background refresh
//! worker, then hands the router to Axum.

use crate::application::services::{
    AuthService, MemberService, MetaService, PaymentService, PlanService, TrainerService,
    UserService, run_refresh_worker,
};
use crate::application::session::MemoryTokenStore;
use crate::config::Config;
use crate::infrastructure::backend::{
    BackendClient, HttpAuthGateway, HttpMemberGateway, HttpMetaGateway, HttpPaymentGateway,
    HttpPlanGateway, HttpTrainerGateway, HttpUserGateway,
};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use chrono::Utc;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Backend HTTP client and one gateway per resource
/// - In-memory session store
/// - Background token-refresh worker
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - The HTTP client cannot be constructed
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let client = Arc::new(BackendClient::new(
        &config.backend_api_url,
        Duration::from_secs(config.backend_timeout_seconds),
    )?);
    tracing::info!("Backend client ready for {}", config.backend_api_url);

    let store = Arc::new(MemoryTokenStore::new());

    let auth_gateway = Arc::new(HttpAuthGateway::new(
        client.clone(),
        Duration::from_secs(config.access_token_ttl_seconds),
        Duration::from_secs(config.refresh_token_ttl_seconds),
    ));
    let auth_service = Arc::new(AuthService::new(
        auth_gateway,
        store.clone(),
        config.session_signing_secret.clone(),
        Duration::from_secs(config.token_refresh_margin_seconds),
    ));

    let refresh_interval = Duration::from_secs(config.token_refresh_interval_seconds);
    let (tick_tx, tick_rx) = watch::channel(Utc::now());
    tokio::spawn(run_refresh_worker(
        auth_service.clone(),
        refresh_interval,
        tick_tx,
    ));
    tracing::info!(
        "Refresh worker started (every {}s)",
        refresh_interval.as_secs()
    );

    let state = AppState {
        auth_service,
        member_service: Arc::new(MemberService::new(Arc::new(HttpMemberGateway::new(
            client.clone(),
        )))),
        trainer_service: Arc::new(TrainerService::new(Arc::new(HttpTrainerGateway::new(
            client.clone(),
        )))),
        plan_service: Arc::new(PlanService::new(Arc::new(HttpPlanGateway::new(
            client.clone(),
        )))),
        payment_service: Arc::new(PaymentService::new(Arc::new(HttpPaymentGateway::new(
            client.clone(),
        )))),
        user_service: Arc::new(UserService::new(Arc::new(HttpUserGateway::new(
            client.clone(),
        )))),
        meta_service: Arc::new(MetaService::new(Arc::new(HttpMetaGateway::new(client)))),
        store,
        refresh_ticks: tick_rx,
        refresh_interval,
        cookie_secure: config.secure_cookies(),
    };

    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .await?;

    Ok(())
}

//! Handler for the health check endpoint.

use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::application::session::TokenStore;
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Backend**: Public plan listing probe against the backend API
/// 2. **Sessions**: Session store reachability and live session count
/// 3. **Refresh worker**: Last sweep heartbeat within two periods
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let backend_check = check_backend(&state).await;
    let sessions_check = check_sessions(&state).await;
    let worker_check = check_refresh_worker(&state);

    let all_healthy = backend_check.status == "ok"
        && sessions_check.status == "ok"
        && worker_check.status == "ok";

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            backend: backend_check,
            sessions: sessions_check,
            refresh_worker: worker_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Probes the backend with the unauthenticated plan listing.
async fn check_backend(state: &AppState) -> CheckStatus {
    match state.plan_service.list_public().await {
        Ok(plans) => CheckStatus {
            status: "ok".to_string(),
            message: Some(format!("Connected, {} public plans", plans.len())),
        },
        Err(e) => CheckStatus {
            status: "error".to_string(),
            message: Some(format!("Backend error: {}", e)),
        },
    }
}

/// Reports the live session count.
async fn check_sessions(state: &AppState) -> CheckStatus {
    CheckStatus {
        status: "ok".to_string(),
        message: Some(format!("{} active sessions", state.store.count().await)),
    }
}

/// Checks that the refresh sweep ticked within the last two periods.
fn check_refresh_worker(state: &AppState) -> CheckStatus {
    let last_tick = *state.refresh_ticks.borrow();
    let age = Utc::now() - last_tick;
    let limit = chrono::Duration::seconds(2 * state.refresh_interval.as_secs() as i64);

    if age <= limit {
        CheckStatus {
            status: "ok".to_string(),
            message: Some(format!("Last sweep {}s ago", age.num_seconds())),
        }
    } else {
        CheckStatus {
            status: "error".to_string(),
            message: Some(format!(
                "No sweep for {}s (period {}s)",
                age.num_seconds(),
                state.refresh_interval.as_secs()
            )),
        }
    }
}

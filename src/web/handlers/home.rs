//! Public marketing pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};

use crate::domain::entities::Plan;
use crate::state::AppState;

/// Template for the landing page.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub plans: Vec<Plan>,
}

/// Template for the public plan catalog.
#[derive(Template, WebTemplate)]
#[template(path = "plans.html")]
pub struct PlansTemplate {
    pub plans: Vec<Plan>,
}

/// Renders the landing page.
///
/// # Endpoint
///
/// `GET /`
///
/// The plan section degrades to empty when the backend is unreachable; the
/// marketing page itself always renders.
pub async fn home_handler(State(state): State<AppState>) -> impl IntoResponse {
    HomeTemplate {
        plans: public_plans(&state).await,
    }
}

/// Renders the public plan catalog.
///
/// # Endpoint
///
/// `GET /plans`
pub async fn plans_handler(State(state): State<AppState>) -> impl IntoResponse {
    PlansTemplate {
        plans: public_plans(&state).await,
    }
}

async fn public_plans(state: &AppState) -> Vec<Plan> {
    state.plan_service.list_public().await.unwrap_or_else(|e| {
        tracing::warn!("public plan list unavailable: {e}");
        Vec::new()
    })
}

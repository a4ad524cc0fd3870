//! Dashboard overview page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};

use crate::application::session::AccessToken;
use crate::domain::entities::{DashboardStats, Member, Payment, User};
use crate::error::AppError;
use crate::state::AppState;
use crate::web::table::{Column, TableSpec, TableView};

/// Template for the dashboard overview.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub user: User,
    pub stats: DashboardStats,
    pub recent_members: TableView,
    pub recent_payments: TableView,
}

/// Renders the role-based overview.
///
/// # Endpoint
///
/// `GET /dashboard`
///
/// Members have no aggregate view and land on their profile instead. The
/// stat cards and the two recent tables degrade independently when `/meta`
/// endpoints fail.
pub async fn dashboard_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Extension(token): Extension<AccessToken>,
) -> Result<Response, AppError> {
    if user.is_member() {
        return Ok(Redirect::to("/dashboard/profile").into_response());
    }

    let overview = state.meta_service.overview(token.as_str()).await;

    let recent_members = recent_member_columns().fixed(&overview.recent_members);
    let recent_payments = recent_payment_columns().fixed(&overview.recent_payments);

    Ok(DashboardTemplate {
        user,
        stats: overview.stats,
        recent_members,
        recent_payments,
    }
    .into_response())
}

fn recent_member_columns() -> TableSpec<Member> {
    TableSpec::new(vec![
        Column::field("Name", "name"),
        Column::field("Email", "email"),
        Column::field("Plan", "planName"),
        Column::derived("Joined", |m: &Member| {
            m.joined_at.format("%Y-%m-%d").to_string()
        }),
    ])
    .empty_message("No recent members")
}

fn recent_payment_columns() -> TableSpec<Payment> {
    TableSpec::new(vec![
        Column::field("Member", "memberName"),
        Column::field("Plan", "planName"),
        Column::derived("Amount", |p: &Payment| p.amount_label()),
        Column::derived("Status", |p: &Payment| p.status.label().to_string()),
        Column::derived("Date", |p: &Payment| {
            p.paid_at.format("%Y-%m-%d").to_string()
        }),
    ])
    .empty_message("No recent payments")
}

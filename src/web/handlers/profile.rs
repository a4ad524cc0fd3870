//! Own-account page: membership details and payment history.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::application::session::AccessToken;
use crate::domain::entities::{Member, Payment, User};
use crate::domain::gateways::{PageQuery, PaymentQuery};
use crate::error::AppError;
use crate::state::AppState;
use crate::web::table::{ClientQuery, Column, PageUrl, TableSpec, TableView};

/// Template for the profile page.
#[derive(Template, WebTemplate)]
#[template(path = "profile.html")]
pub struct ProfileTemplate {
    pub user: User,
    /// The member record behind this account; staff accounts have none.
    pub member: Option<Member>,
    pub payments: TableView,
}

#[derive(Debug, Deserialize)]
pub struct ProfileParams {
    pub page: Option<u32>,
    pub search: Option<String>,
}

/// Renders the logged-in account's profile.
///
/// # Endpoint
///
/// `GET /dashboard/profile` (any role)
///
/// The payment history is fetched once and paged client-side: the set is
/// small and bounded, so the table filters and slices in memory while the
/// URL still carries `page` and `search`.
pub async fn profile_page(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Extension(token): Extension<AccessToken>,
    Query(params): Query<ProfileParams>,
) -> Result<ProfileTemplate, AppError> {
    let member = state
        .member_service
        .get(token.as_str(), &user.id)
        .await
        .ok();

    let payments = state
        .payment_service
        .list(
            token.as_str(),
            &PaymentQuery {
                page: PageQuery::new(Some(1), Some(100), None),
                member_id: Some(user.id.clone()),
                ..Default::default()
            },
        )
        .await
        .map(|page| page.items)
        .unwrap_or_else(|e| {
            tracing::warn!("payment history unavailable: {e}");
            Vec::new()
        });

    let url = PageUrl::new("/dashboard/profile")
        .with_opt("search", &params.search)
        .with_opt("page", &params.page);

    let payments = payment_columns().client(
        &payments,
        &ClientQuery {
            search: params.search.clone(),
            page: params.page,
            page_size: None,
        },
        &url,
    );

    Ok(ProfileTemplate {
        user,
        member,
        payments,
    })
}

fn payment_columns() -> TableSpec<Payment> {
    TableSpec::new(vec![
        Column::field("Plan", "planName"),
        Column::derived("Amount", |p: &Payment| p.amount_label()),
        Column::field("Method", "method"),
        Column::derived("Status", |p: &Payment| p.status.label().to_string()),
        Column::derived("Date", |p: &Payment| {
            p.paid_at.format("%Y-%m-%d").to_string()
        }),
    ])
    .empty_message("No payments yet")
}

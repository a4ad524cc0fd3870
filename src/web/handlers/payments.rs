//! Payment history page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension,
    extract::{Query, State},
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::application::session::AccessToken;
use crate::domain::entities::{Payment, PaymentStatus, Role, User};
use crate::domain::gateways::{PageQuery, PaymentQuery};
use crate::error::AppError;
use crate::state::AppState;
use crate::web::handlers::{empty_as_none, require};
use crate::web::table::{Column, PageUrl, ServerSearch, TableSpec, TableView};

/// Template for the payment history list.
#[derive(Template, WebTemplate)]
#[template(path = "payments.html")]
pub struct PaymentsTemplate {
    pub user: User,
    pub table: TableView,
    pub status: String,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Deserialize)]
pub struct PaymentsParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub status: Option<PaymentStatus>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub from: Option<NaiveDate>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub to: Option<NaiveDate>,
}

/// Renders the payment history.
///
/// # Endpoint
///
/// `GET /dashboard/payments` (admin)
///
/// # Query Parameters
///
/// `page`, `limit`, `search`, `status`, `from`, `to` - forwarded to the
/// backend; the date range is inclusive and validated before the request
/// goes out.
pub async fn payments_page(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Extension(token): Extension<AccessToken>,
    Query(params): Query<PaymentsParams>,
) -> Result<PaymentsTemplate, AppError> {
    require(&user, Role::Admin)?;

    let query = PaymentQuery {
        page: PageQuery::new(params.page, params.limit, params.search.clone()),
        status: params.status,
        member_id: None,
        from: params.from,
        to: params.to,
    };
    let page = state.payment_service.list(token.as_str(), &query).await?;

    let url = PageUrl::new("/dashboard/payments")
        .with_opt("search", &params.search)
        .with_opt("status", &params.status.map(|s| s.as_str().to_string()))
        .with_opt("from", &params.from)
        .with_opt("to", &params.to)
        .with_opt("page", &params.page);

    let table = payment_columns().server(
        &page.items,
        &page.meta,
        &url,
        Some(ServerSearch {
            term: params.search.clone(),
        }),
    );

    Ok(PaymentsTemplate {
        user,
        table,
        status: params
            .status
            .map(|s| s.as_str().to_string())
            .unwrap_or_default(),
        from: params.from.map(|d| d.to_string()).unwrap_or_default(),
        to: params.to.map(|d| d.to_string()).unwrap_or_default(),
    })
}

fn payment_columns() -> TableSpec<Payment> {
    TableSpec::new(vec![
        Column::field("Member", "memberName"),
        Column::field("Plan", "planName"),
        Column::derived("Amount", |p: &Payment| p.amount_label()),
        Column::field("Method", "method"),
        Column::derived("Status", |p: &Payment| p.status.label().to_string())
            .rendered(status_badge),
        Column::derived("Date", |p: &Payment| {
            p.paid_at.format("%Y-%m-%d").to_string()
        }),
    ])
    .empty_message("No payments found")
}

fn status_badge(payment: &Payment) -> String {
    format!(
        "<span class=\"badge badge-{}\">{}</span>",
        payment.status.as_str(),
        payment.status.label()
    )
}

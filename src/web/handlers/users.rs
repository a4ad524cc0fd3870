//! Portal account administration page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension,
    extract::{Path, Query, State},
    response::Redirect,
};
use serde::Deserialize;

use crate::application::session::AccessToken;
use crate::domain::entities::{Role, User};
use crate::domain::gateways::{PageQuery, UserQuery};
use crate::error::AppError;
use crate::state::AppState;
use crate::web::handlers::{empty_as_none, require};
use crate::web::table::{Column, PageUrl, RowAction, ServerSearch, TableSpec, TableView};

/// Template for the account list.
#[derive(Template, WebTemplate)]
#[template(path = "users.html")]
pub struct UsersTemplate {
    pub user: User,
    pub table: TableView,
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct UsersParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub role: Option<Role>,
}

/// Renders the portal account list.
///
/// # Endpoint
///
/// `GET /dashboard/users` (super-admin)
pub async fn users_page(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Extension(token): Extension<AccessToken>,
    Query(params): Query<UsersParams>,
) -> Result<UsersTemplate, AppError> {
    require(&user, Role::SuperAdmin)?;

    let query = UserQuery {
        page: PageQuery::new(params.page, params.limit, params.search.clone()),
        role: params.role,
        is_active: None,
    };
    let page = state.user_service.list(token.as_str(), &query).await?;

    let url = PageUrl::new("/dashboard/users")
        .with_opt("search", &params.search)
        .with_opt("role", &params.role.map(|r| r.as_str().to_string()))
        .with_opt("page", &params.page);

    let table = user_columns().server(
        &page.items,
        &page.meta,
        &url,
        Some(ServerSearch {
            term: params.search.clone(),
        }),
    );

    Ok(UsersTemplate {
        user,
        table,
        role: params
            .role
            .map(|r| r.as_str().to_string())
            .unwrap_or_default(),
    })
}

#[derive(Debug, Deserialize)]
pub struct ActiveParams {
    pub value: bool,
}

/// Enables or disables an account and returns to the list.
///
/// # Endpoint
///
/// `POST /dashboard/users/{id}/active?value=<bool>` (super-admin)
pub async fn user_set_active(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Extension(token): Extension<AccessToken>,
    Path(id): Path<String>,
    Query(params): Query<ActiveParams>,
) -> Result<Redirect, AppError> {
    require(&user, Role::SuperAdmin)?;
    state
        .user_service
        .set_active(token.as_str(), &id, params.value)
        .await?;
    Ok(Redirect::to("/dashboard/users"))
}

fn user_columns() -> TableSpec<User> {
    TableSpec::new(vec![
        Column::field("Name", "name"),
        Column::field("Email", "email"),
        Column::derived("Role", |u: &User| u.role_label().to_string()),
        Column::derived("Status", |u: &User| {
            if u.is_active { "Active" } else { "Disabled" }.to_string()
        }),
    ])
    .with_actions(|u| {
        if u.is_active {
            vec![RowAction::post(
                "Disable",
                format!("/dashboard/users/{}/active?value=false", u.id),
            )]
        } else {
            vec![RowAction::post(
                "Enable",
                format!("/dashboard/users/{}/active?value=true", u.id),
            )]
        }
    })
    .empty_message("No accounts found")
}

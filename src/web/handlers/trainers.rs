//! Trainer pages: admin listings and trainer rosters.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use serde_json::json;

use crate::application::session::AccessToken;
use crate::domain::entities::{Member, Role, Trainer, User};
use crate::domain::gateways::{PageQuery, TrainerQuery};
use crate::error::AppError;
use crate::state::AppState;
use crate::web::handlers::require;
use crate::web::table::{Column, PageUrl, RowAction, ServerSearch, TableSpec, TableView};

/// Template for the trainer list.
#[derive(Template, WebTemplate)]
#[template(path = "trainers.html")]
pub struct TrainersTemplate {
    pub user: User,
    pub table: TableView,
}

/// Template for a trainer profile with their roster.
#[derive(Template, WebTemplate)]
#[template(path = "trainer_detail.html")]
pub struct TrainerDetailTemplate {
    pub user: User,
    pub trainer: Trainer,
    pub roster: TableView,
}

/// Template for a trainer's own roster.
#[derive(Template, WebTemplate)]
#[template(path = "my_members.html")]
pub struct MyMembersTemplate {
    pub user: User,
    pub table: TableView,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
}

impl ListParams {
    fn page_query(&self) -> PageQuery {
        PageQuery::new(self.page, self.limit, self.search.clone())
    }
}

/// Renders the trainer list.
///
/// # Endpoint
///
/// `GET /dashboard/trainers` (admin)
pub async fn trainers_page(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Extension(token): Extension<AccessToken>,
    Query(params): Query<ListParams>,
) -> Result<TrainersTemplate, AppError> {
    require(&user, Role::Admin)?;

    let query = TrainerQuery {
        page: params.page_query(),
        is_active: None,
    };
    let page = state.trainer_service.list(token.as_str(), &query).await?;

    let url = PageUrl::new("/dashboard/trainers")
        .with_opt("search", &params.search)
        .with_opt("page", &params.page);

    let table = trainer_columns().server(
        &page.items,
        &page.meta,
        &url,
        Some(ServerSearch {
            term: params.search.clone(),
        }),
    );

    Ok(TrainersTemplate { user, table })
}

/// Renders a trainer profile with their member roster.
///
/// # Endpoint
///
/// `GET /dashboard/trainers/{id}`
///
/// Admins may open any trainer; a trainer may open themself.
pub async fn trainer_detail_page(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Extension(token): Extension<AccessToken>,
    Path(id): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<TrainerDetailTemplate, AppError> {
    if !user.is_admin() && !(user.is_trainer() && user.id == id) {
        return Err(AppError::forbidden(
            "Insufficient role",
            json!({ "trainer": id }),
        ));
    }

    let trainer = state.trainer_service.get(token.as_str(), &id).await?;
    let roster = state
        .trainer_service
        .members(token.as_str(), &id, &params.page_query())
        .await?;

    let url = PageUrl::new(format!("/dashboard/trainers/{id}")).with_opt("page", &params.page);
    let roster = roster_columns().server(&roster.items, &roster.meta, &url, None);

    Ok(TrainerDetailTemplate {
        user,
        trainer,
        roster,
    })
}

/// Renders the logged-in trainer's own roster.
///
/// # Endpoint
///
/// `GET /dashboard/my-members` (trainer)
pub async fn my_members_page(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Extension(token): Extension<AccessToken>,
    Query(params): Query<ListParams>,
) -> Result<MyMembersTemplate, AppError> {
    require(&user, Role::Trainer)?;

    let page = state
        .trainer_service
        .members(token.as_str(), &user.id, &params.page_query())
        .await?;

    let url = PageUrl::new("/dashboard/my-members")
        .with_opt("search", &params.search)
        .with_opt("page", &params.page);

    let table = roster_columns().server(
        &page.items,
        &page.meta,
        &url,
        Some(ServerSearch {
            term: params.search.clone(),
        }),
    );

    Ok(MyMembersTemplate { user, table })
}

fn trainer_columns() -> TableSpec<Trainer> {
    TableSpec::new(vec![
        Column::field("Name", "name"),
        Column::field("Email", "email"),
        Column::derived("Specialties", |t: &Trainer| t.specialties_label()),
        Column::derived("Members", |t: &Trainer| {
            t.member_count.map(|n| n.to_string()).unwrap_or_default()
        }),
        Column::derived("Status", |t: &Trainer| {
            if t.is_active { "Active" } else { "Inactive" }.to_string()
        }),
    ])
    .with_actions(|t| vec![RowAction::link("View", format!("/dashboard/trainers/{}", t.id))])
    .empty_message("No trainers found")
}

fn roster_columns() -> TableSpec<Member> {
    TableSpec::new(vec![
        Column::field("Name", "name"),
        Column::field("Email", "email"),
        Column::derived("Status", |m: &Member| m.status.label().to_string()),
        Column::field("Plan", "planName"),
        Column::derived("Joined", |m: &Member| {
            m.joined_at.format("%Y-%m-%d").to_string()
        }),
    ])
    .empty_message("No members assigned")
}

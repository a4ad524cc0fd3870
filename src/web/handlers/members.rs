//! Member management pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension, Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::application::session::AccessToken;
use crate::domain::entities::{
    Member, MemberStatus, NewMember, Plan, Role, Trainer, UpdateMember, User,
};
use crate::domain::gateways::{MemberQuery, PageQuery, PlanQuery, TrainerQuery};
use crate::error::AppError;
use crate::state::AppState;
use crate::web::handlers::{empty_as_none, none_if_empty, require};
use crate::web::table::{Column, PageUrl, RowAction, ServerSearch, TableSpec, TableView};

/// Template for the member list.
#[derive(Template, WebTemplate)]
#[template(path = "members.html")]
pub struct MembersTemplate {
    pub user: User,
    pub table: TableView,
    pub status: String,
    pub plans: Vec<Plan>,
    pub plan_id: String,
}

/// Template for the create/edit member form.
#[derive(Template, WebTemplate)]
#[template(path = "member_form.html")]
pub struct MemberFormTemplate {
    pub user: User,
    pub title: &'static str,
    pub action: String,
    pub form: MemberFormValues,
    pub editing: bool,
    pub plans: Vec<Plan>,
    pub trainers: Vec<Trainer>,
    pub error: Option<String>,
}

/// Current form values, echoed back on validation failure.
#[derive(Debug, Clone, Default)]
pub struct MemberFormValues {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub plan_id: String,
    pub trainer_id: String,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct MembersParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub status: Option<MemberStatus>,
    #[serde(rename = "planId", default, deserialize_with = "empty_as_none")]
    pub plan_id: Option<String>,
}

/// HTML form payload; input names are camelCase like the backend fields.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub plan_id: String,
    #[serde(default)]
    pub trainer_id: String,
    #[serde(default)]
    pub status: String,
}

impl MemberForm {
    fn values(&self) -> MemberFormValues {
        MemberFormValues {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            plan_id: self.plan_id.clone(),
            trainer_id: self.trainer_id.clone(),
            status: self.status.clone(),
        }
    }

    fn to_new(&self) -> NewMember {
        NewMember {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: none_if_empty(&self.phone),
            plan_id: none_if_empty(&self.plan_id),
            trainer_id: none_if_empty(&self.trainer_id),
        }
    }

    fn to_update(&self) -> UpdateMember {
        UpdateMember {
            name: none_if_empty(&self.name),
            email: none_if_empty(&self.email),
            phone: none_if_empty(&self.phone),
            status: match self.status.as_str() {
                "active" => Some(MemberStatus::Active),
                "inactive" => Some(MemberStatus::Inactive),
                "suspended" => Some(MemberStatus::Suspended),
                _ => None,
            },
            plan_id: none_if_empty(&self.plan_id),
            trainer_id: none_if_empty(&self.trainer_id),
        }
    }
}

/// Renders the member list.
///
/// # Endpoint
///
/// `GET /dashboard/members` (admin)
///
/// # Query Parameters
///
/// `page`, `limit`, `search`, `status`, `planId` - all forwarded to the
/// backend, which paginates and searches; the table renders in server mode
/// with an explicit search form.
pub async fn members_page(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Extension(token): Extension<AccessToken>,
    Query(params): Query<MembersParams>,
) -> Result<MembersTemplate, AppError> {
    require(&user, Role::Admin)?;

    let query = MemberQuery {
        page: PageQuery::new(params.page, params.limit, params.search.clone()),
        status: params.status,
        plan_id: params.plan_id.clone(),
        ..Default::default()
    };

    let page = state.member_service.list(token.as_str(), &query).await?;

    let url = PageUrl::new("/dashboard/members")
        .with_opt("search", &params.search)
        .with_opt("status", &params.status.map(|s| s.as_str().to_string()))
        .with_opt("planId", &params.plan_id)
        .with_opt("page", &params.page);

    let table = member_columns().server(
        &page.items,
        &page.meta,
        &url,
        Some(ServerSearch {
            term: params.search.clone(),
        }),
    );

    // The status/plan filter selects sit next to the search form.
    let plans = filter_plans(&state, token.as_str()).await;

    Ok(MembersTemplate {
        user,
        table,
        status: params
            .status
            .map(|s| s.as_str().to_string())
            .unwrap_or_default(),
        plans,
        plan_id: params.plan_id.unwrap_or_default(),
    })
}

/// Renders the empty member form.
///
/// # Endpoint
///
/// `GET /dashboard/members/new` (admin)
pub async fn new_member_form(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Extension(token): Extension<AccessToken>,
) -> Result<MemberFormTemplate, AppError> {
    require(&user, Role::Admin)?;
    let (plans, trainers) = form_options(&state, token.as_str()).await;

    Ok(MemberFormTemplate {
        user,
        title: "New member",
        action: "/dashboard/members/new".to_string(),
        form: MemberFormValues::default(),
        editing: false,
        plans,
        trainers,
        error: None,
    })
}

/// Creates a member.
///
/// # Endpoint
///
/// `POST /dashboard/members/new` (admin)
///
/// Validation failures re-render the form with the message and the entered
/// values; success redirects to the list.
pub async fn create_member(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Extension(token): Extension<AccessToken>,
    Form(form): Form<MemberForm>,
) -> Result<Response, AppError> {
    require(&user, Role::Admin)?;

    match state
        .member_service
        .create(token.as_str(), &form.to_new())
        .await
    {
        Ok(_) => Ok(Redirect::to("/dashboard/members").into_response()),
        Err(e @ AppError::Validation { .. }) => {
            let (plans, trainers) = form_options(&state, token.as_str()).await;
            Ok(MemberFormTemplate {
                user,
                title: "New member",
                action: "/dashboard/members/new".to_string(),
                form: form.values(),
                editing: false,
                plans,
                trainers,
                error: Some(e.message().to_string()),
            }
            .into_response())
        }
        Err(e) => Err(e),
    }
}

/// Renders the edit form prefilled with the member's current values.
///
/// # Endpoint
///
/// `GET /dashboard/members/{id}/edit` (admin)
pub async fn edit_member_form(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Extension(token): Extension<AccessToken>,
    Path(id): Path<String>,
) -> Result<MemberFormTemplate, AppError> {
    require(&user, Role::Admin)?;

    let member = state.member_service.get(token.as_str(), &id).await?;
    let (plans, trainers) = form_options(&state, token.as_str()).await;

    Ok(MemberFormTemplate {
        user,
        title: "Edit member",
        action: format!("/dashboard/members/{id}/edit"),
        form: MemberFormValues {
            name: member.name,
            email: member.email,
            phone: member.phone.unwrap_or_default(),
            plan_id: member.plan_id.unwrap_or_default(),
            trainer_id: member.trainer_id.unwrap_or_default(),
            status: member.status.as_str().to_string(),
        },
        editing: true,
        plans,
        trainers,
        error: None,
    })
}

/// Applies a member update.
///
/// # Endpoint
///
/// `POST /dashboard/members/{id}/edit` (admin)
pub async fn update_member(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Extension(token): Extension<AccessToken>,
    Path(id): Path<String>,
    Form(form): Form<MemberForm>,
) -> Result<Response, AppError> {
    require(&user, Role::Admin)?;

    match state
        .member_service
        .update(token.as_str(), &id, &form.to_update())
        .await
    {
        Ok(_) => Ok(Redirect::to("/dashboard/members").into_response()),
        Err(e @ AppError::Validation { .. }) => {
            let (plans, trainers) = form_options(&state, token.as_str()).await;
            Ok(MemberFormTemplate {
                user,
                title: "Edit member",
                action: format!("/dashboard/members/{id}/edit"),
                form: form.values(),
                editing: true,
                plans,
                trainers,
                error: Some(e.message().to_string()),
            }
            .into_response())
        }
        Err(e) => Err(e),
    }
}

/// Removes a member and returns to the list.
///
/// # Endpoint
///
/// `POST /dashboard/members/{id}/delete` (admin)
pub async fn delete_member(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Extension(token): Extension<AccessToken>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    require(&user, Role::Admin)?;
    state.member_service.delete(token.as_str(), &id).await?;
    Ok(Redirect::to("/dashboard/members"))
}

fn member_columns() -> TableSpec<Member> {
    TableSpec::new(vec![
        Column::field("Name", "name"),
        Column::field("Email", "email"),
        Column::derived("Status", |m: &Member| m.status.label().to_string())
            .rendered(status_badge),
        Column::field("Plan", "planName"),
        Column::field("Trainer", "trainerName"),
        Column::derived("Joined", |m: &Member| {
            m.joined_at.format("%Y-%m-%d").to_string()
        }),
    ])
    .with_actions(|m| {
        vec![
            RowAction::link("Edit", format!("/dashboard/members/{}/edit", m.id)),
            RowAction::post("Delete", format!("/dashboard/members/{}/delete", m.id)),
        ]
    })
    .empty_message("No members found")
}

fn status_badge(member: &Member) -> String {
    format!(
        "<span class=\"badge badge-{}\">{}</span>",
        member.status.as_str(),
        member.status.label()
    )
}

/// Select-box data for the member form; both selects degrade to empty lists
/// when the backend call fails so the form still renders.
async fn form_options(state: &AppState, access: &str) -> (Vec<Plan>, Vec<Trainer>) {
    let wide = PageQuery::new(Some(1), Some(100), None);

    let plan_query = PlanQuery {
        page: wide.clone(),
        is_active: Some(true),
    };
    let trainer_query = TrainerQuery {
        page: wide,
        is_active: Some(true),
    };
    let (plans, trainers) = tokio::join!(
        state.plan_service.list(access, &plan_query),
        state.trainer_service.list(access, &trainer_query),
    );

    (
        plans.map(|p| p.items).unwrap_or_else(|e| {
            tracing::warn!("plan options unavailable: {e}");
            Vec::new()
        }),
        trainers.map(|p| p.items).unwrap_or_else(|e| {
            tracing::warn!("trainer options unavailable: {e}");
            Vec::new()
        }),
    )
}

async fn filter_plans(state: &AppState, access: &str) -> Vec<Plan> {
    state
        .plan_service
        .list(
            access,
            &PlanQuery {
                page: PageQuery::new(Some(1), Some(100), None),
                is_active: Some(true),
            },
        )
        .await
        .map(|p| p.items)
        .unwrap_or_else(|e| {
            tracing::warn!("plan filter options unavailable: {e}");
            Vec::new()
        })
}

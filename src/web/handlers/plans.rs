//! Plan management pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension, Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::application::session::AccessToken;
use crate::domain::entities::{NewPlan, Plan, Role, UpdatePlan, User};
use crate::domain::gateways::{PageQuery, PlanQuery};
use crate::error::AppError;
use crate::state::AppState;
use crate::web::handlers::{none_if_empty, require};
use crate::web::table::{Column, PageUrl, RowAction, TableSpec, TableView};

/// Template for the plan management list.
#[derive(Template, WebTemplate)]
#[template(path = "plans_admin.html")]
pub struct PlansAdminTemplate {
    pub user: User,
    pub table: TableView,
}

/// Template for the create/edit plan form.
#[derive(Template, WebTemplate)]
#[template(path = "plan_form.html")]
pub struct PlanFormTemplate {
    pub user: User,
    pub title: &'static str,
    pub action: String,
    pub form: PlanFormValues,
    pub error: Option<String>,
}

/// Current form values, echoed back on validation failure.
#[derive(Debug, Clone, Default)]
pub struct PlanFormValues {
    pub name: String,
    pub description: String,
    pub price: String,
    pub duration_months: String,
    /// Newline-separated feature list, as typed into the textarea.
    pub features: String,
}

#[derive(Debug, Deserialize)]
pub struct PlanListParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// HTML form payload. Numeric fields arrive as text and are parsed here so
/// a typo re-renders the form instead of failing extraction with a 422.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub duration_months: String,
    #[serde(default)]
    pub features: String,
}

impl PlanForm {
    fn values(&self) -> PlanFormValues {
        PlanFormValues {
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price.clone(),
            duration_months: self.duration_months.clone(),
            features: self.features.clone(),
        }
    }

    fn feature_list(&self) -> Vec<String> {
        self.features
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn parse_numbers(&self) -> Result<(f64, u32), String> {
        let price: f64 = self
            .price
            .trim()
            .parse()
            .map_err(|_| "Price must be a number".to_string())?;
        let duration: u32 = self
            .duration_months
            .trim()
            .parse()
            .map_err(|_| "Duration must be a whole number of months".to_string())?;
        Ok((price, duration))
    }

    fn to_new(&self) -> Result<NewPlan, String> {
        let (price, duration_months) = self.parse_numbers()?;
        Ok(NewPlan {
            name: self.name.trim().to_string(),
            description: none_if_empty(&self.description),
            price,
            duration_months,
            features: self.feature_list(),
        })
    }

    fn to_update(&self) -> Result<UpdatePlan, String> {
        let (price, duration_months) = self.parse_numbers()?;
        Ok(UpdatePlan {
            name: none_if_empty(&self.name),
            description: none_if_empty(&self.description),
            price: Some(price),
            duration_months: Some(duration_months),
            features: Some(self.feature_list()),
        })
    }
}

/// Renders the plan management list.
///
/// # Endpoint
///
/// `GET /dashboard/plans` (admin)
pub async fn plans_admin_page(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Extension(token): Extension<AccessToken>,
    Query(params): Query<PlanListParams>,
) -> Result<PlansAdminTemplate, AppError> {
    require(&user, Role::Admin)?;

    let query = PlanQuery {
        page: PageQuery::new(params.page, params.limit, None),
        is_active: None,
    };
    let page = state.plan_service.list(token.as_str(), &query).await?;

    let url = PageUrl::new("/dashboard/plans").with_opt("page", &params.page);
    let table = plan_columns().server(&page.items, &page.meta, &url, None);

    Ok(PlansAdminTemplate { user, table })
}

/// Renders the empty plan form.
///
/// # Endpoint
///
/// `GET /dashboard/plans/new` (admin)
pub async fn new_plan_form(
    Extension(user): Extension<User>,
) -> Result<PlanFormTemplate, AppError> {
    require(&user, Role::Admin)?;

    Ok(PlanFormTemplate {
        user,
        title: "New plan",
        action: "/dashboard/plans/new".to_string(),
        form: PlanFormValues::default(),
        error: None,
    })
}

/// Creates a plan.
///
/// # Endpoint
///
/// `POST /dashboard/plans/new` (admin)
pub async fn create_plan(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Extension(token): Extension<AccessToken>,
    Form(form): Form<PlanForm>,
) -> Result<Response, AppError> {
    require(&user, Role::Admin)?;

    let rerender = |form: &PlanForm, user: User, message: String| {
        PlanFormTemplate {
            user,
            title: "New plan",
            action: "/dashboard/plans/new".to_string(),
            form: form.values(),
            error: Some(message),
        }
        .into_response()
    };

    let plan = match form.to_new() {
        Ok(plan) => plan,
        Err(message) => return Ok(rerender(&form, user, message)),
    };

    match state.plan_service.create(token.as_str(), &plan).await {
        Ok(_) => Ok(Redirect::to("/dashboard/plans").into_response()),
        Err(e @ AppError::Validation { .. }) => {
            Ok(rerender(&form, user, e.message().to_string()))
        }
        Err(e) => Err(e),
    }
}

/// Renders the edit form prefilled with the plan's current values.
///
/// # Endpoint
///
/// `GET /dashboard/plans/{id}/edit` (admin)
pub async fn edit_plan_form(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Extension(token): Extension<AccessToken>,
    Path(id): Path<String>,
) -> Result<PlanFormTemplate, AppError> {
    require(&user, Role::Admin)?;

    let plan = state.plan_service.get(token.as_str(), &id).await?;

    Ok(PlanFormTemplate {
        user,
        title: "Edit plan",
        action: format!("/dashboard/plans/{id}/edit"),
        form: PlanFormValues {
            name: plan.name,
            description: plan.description.unwrap_or_default(),
            price: format!("{:.2}", plan.price),
            duration_months: plan.duration_months.to_string(),
            features: plan.features.join("\n"),
        },
        error: None,
    })
}

/// Applies a plan update.
///
/// # Endpoint
///
/// `POST /dashboard/plans/{id}/edit` (admin)
pub async fn update_plan(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Extension(token): Extension<AccessToken>,
    Path(id): Path<String>,
    Form(form): Form<PlanForm>,
) -> Result<Response, AppError> {
    require(&user, Role::Admin)?;

    let rerender = |form: &PlanForm, user: User, action: String, message: String| {
        PlanFormTemplate {
            user,
            title: "Edit plan",
            action,
            form: form.values(),
            error: Some(message),
        }
        .into_response()
    };

    let action = format!("/dashboard/plans/{id}/edit");

    let update = match form.to_update() {
        Ok(update) => update,
        Err(message) => return Ok(rerender(&form, user, action, message)),
    };

    match state.plan_service.update(token.as_str(), &id, &update).await {
        Ok(_) => Ok(Redirect::to("/dashboard/plans").into_response()),
        Err(e @ AppError::Validation { .. }) => {
            Ok(rerender(&form, user, action, e.message().to_string()))
        }
        Err(e) => Err(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct ActiveParams {
    pub value: bool,
}

/// Activates or retires a plan and returns to the list.
///
/// # Endpoint
///
/// `POST /dashboard/plans/{id}/active?value=<bool>` (admin)
pub async fn plan_set_active(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Extension(token): Extension<AccessToken>,
    Path(id): Path<String>,
    Query(params): Query<ActiveParams>,
) -> Result<Redirect, AppError> {
    require(&user, Role::Admin)?;
    state
        .plan_service
        .set_active(token.as_str(), &id, params.value)
        .await?;
    Ok(Redirect::to("/dashboard/plans"))
}

fn plan_columns() -> TableSpec<Plan> {
    TableSpec::new(vec![
        Column::field("Name", "name"),
        Column::derived("Price", |p: &Plan| p.price_label()),
        Column::derived("Duration", |p: &Plan| p.duration_label()),
        Column::derived("Features", |p: &Plan| p.features.len().to_string()),
        Column::derived("Status", |p: &Plan| p.status_label().to_string()),
    ])
    .with_actions(|p| {
        let toggle = if p.is_active {
            RowAction::post(
                "Retire",
                format!("/dashboard/plans/{}/active?value=false", p.id),
            )
        } else {
            RowAction::post(
                "Activate",
                format!("/dashboard/plans/{}/active?value=true", p.id),
            )
        };
        vec![
            RowAction::link("Edit", format!("/dashboard/plans/{}/edit", p.id)),
            toggle,
        ]
    })
    .empty_message("No plans configured")
}

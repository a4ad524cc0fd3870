//! Page route configuration.

use crate::state::AppState;
use crate::web::handlers::{
    create_member, create_plan, dashboard_handler, delete_member, edit_member_form,
    edit_plan_form, home_handler, login_form, login_submit, logout, members_page,
    my_members_page, new_member_form, new_plan_form, payments_page, plan_set_active,
    plans_admin_page, plans_handler, profile_page, trainer_detail_page, trainers_page,
    update_member, update_plan, user_set_active, users_page,
};
use axum::{
    Router,
    routing::{get, post},
};

/// Public marketing routes without authentication.
///
/// # Endpoints
///
/// - `GET /` - Landing page
/// - `GET /plans` - Public plan catalog
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home_handler))
        .route("/plans", get(plans_handler))
}

/// Login and logout routes.
///
/// Kept apart from [`public_routes`] so the login form can carry a stricter
/// rate limit than the rest of the site.
///
/// # Endpoints
///
/// - `GET /login` - Login page
/// - `POST /login` - Credential submission
/// - `POST /logout` - Session teardown
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_form).post(login_submit))
        .route("/logout", post(logout))
}

/// Protected dashboard routes requiring a session cookie.
///
/// Protected via [`crate::web::middleware::web_auth`]; role checks happen
/// per handler.
///
/// # Endpoints
///
/// - `GET  /` - Role-based overview
/// - `GET  /members`, `/members/new`, `/members/{id}/edit` - Member management (admin)
/// - `POST /members/new`, `/members/{id}/edit`, `/members/{id}/delete`
/// - `GET  /trainers`, `/trainers/{id}` - Trainer management (admin; trainers may open themselves)
/// - `GET  /my-members` - Trainer's own roster
/// - `GET  /plans`, `/plans/new`, `/plans/{id}/edit` - Plan management (admin)
/// - `POST /plans/new`, `/plans/{id}/edit`, `/plans/{id}/active`
/// - `GET  /payments` - Payment history (admin)
/// - `GET  /users`, `POST /users/{id}/active` - Account administration (super-admin)
/// - `GET  /profile` - Own account (any role)
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard_handler))
        .route("/members", get(members_page))
        .route("/members/new", get(new_member_form).post(create_member))
        .route(
            "/members/{id}/edit",
            get(edit_member_form).post(update_member),
        )
        .route("/members/{id}/delete", post(delete_member))
        .route("/trainers", get(trainers_page))
        .route("/trainers/{id}", get(trainer_detail_page))
        .route("/my-members", get(my_members_page))
        .route("/plans", get(plans_admin_page))
        .route("/plans/new", get(new_plan_form).post(create_plan))
        .route("/plans/{id}/edit", get(edit_plan_form).post(update_plan))
        .route("/plans/{id}/active", post(plan_set_active))
        .route("/payments", get(payments_page))
        .route("/users", get(users_page))
        .route("/users/{id}/active", post(user_set_active))
        .route("/profile", get(profile_page))
}

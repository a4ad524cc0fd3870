//! Login and logout handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;

use crate::application::session::{SESSION_COOKIE, SessionId};
use crate::state::AppState;

/// Template for the login page.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub email: String,
}

/// Renders the login form.
///
/// # Endpoint
///
/// `GET /login`
pub async fn login_form() -> impl IntoResponse {
    LoginTemplate {
        error: None,
        email: String::new(),
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Exchanges credentials for a session cookie.
///
/// # Endpoint
///
/// `POST /login`
///
/// On success the session cookie is set and the browser is redirected to
/// the dashboard. On failure the form re-renders with the backend's message
/// and the entered email; the password is never echoed.
pub async fn login_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let email = form.email.trim().to_string();

    if email.is_empty() || form.password.is_empty() {
        return LoginTemplate {
            error: Some("Email and password are required".to_string()),
            email,
        }
        .into_response();
    }

    match state.auth_service.login(&email, &form.password).await {
        Ok((id, _user)) => {
            let jar = jar.add(session_cookie(&state, &id));
            (jar, Redirect::to("/dashboard")).into_response()
        }
        Err(e) => {
            tracing::debug!("login rejected: {e}");
            LoginTemplate {
                error: Some(e.message().to_string()),
                email,
            }
            .into_response()
        }
    }
}

/// Tears down the session and clears the cookie.
///
/// # Endpoint
///
/// `POST /logout`
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Redirect) {
    if let Some(cookie) = jar.get(SESSION_COOKIE)
        && let Some(id) = state.auth_service.session_from_cookie(cookie.value())
    {
        state.auth_service.logout(&id).await;
    }

    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, Redirect::to("/login"))
}

fn session_cookie(state: &AppState, id: &SessionId) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, state.auth_service.cookie_value(id));
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_secure(state.cookie_secure);
    cookie
}

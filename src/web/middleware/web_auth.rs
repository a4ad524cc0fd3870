//! Session-cookie middleware for the dashboard.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::application::session::SESSION_COOKIE;
use crate::state::AppState;

/// Authenticates dashboard requests using the signed session cookie.
///
/// # Authentication Flow
///
/// 1. Extract the `gym_session` cookie and verify its HMAC
/// 2. Load the session record from the token store
/// 3. Run the token through [`AuthService::ensure_fresh`] so the handler
///    always works with an access token outside the refresh margin - this
///    is the "refresh before most calls" behavior, and it shares the
///    in-flight guard with the background sweep
/// 4. Inject the account snapshot and access token as request extensions
///
/// # Differences from an API middleware
///
/// Failures redirect to `/login` instead of returning `401 Unauthorized`;
/// in a browser context the login page is the useful response.
///
/// [`AuthService::ensure_fresh`]: crate::application::services::AuthService::ensure_fresh
pub async fn layer(
    State(st): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, Redirect> {
    let to_login = || Redirect::to("/login");

    let raw = jar.get(SESSION_COOKIE).map(|cookie| cookie.value());
    let id = raw
        .and_then(|value| st.auth_service.session_from_cookie(value))
        .ok_or_else(to_login)?;

    let user = st
        .auth_service
        .current_user(&id)
        .await
        .ok_or_else(to_login)?;

    let token = st.auth_service.ensure_fresh(&id).await.map_err(|e| {
        tracing::debug!(session = %id, "session rejected: {e}");
        to_login()
    })?;

    req.extensions_mut().insert(user);
    req.extensions_mut().insert(token);
    req.extensions_mut().insert(id);

    Ok(next.run(req).await)
}

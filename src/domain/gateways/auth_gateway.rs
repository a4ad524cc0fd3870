//! Gateway trait for authentication against the backend.

use crate::domain::entities::User;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

/// An access/refresh token pair with absolute expirations.
///
/// The backend delivers both tokens as `Set-Cookie` headers on login and
/// refresh; the gateway implementation resolves relative cookie lifetimes
/// into the absolute timestamps stored here.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
    pub access_expires_at: DateTime<Utc>,
    pub refresh_expires_at: DateTime<Utc>,
}

impl TokenPair {
    /// Whether the access token expires within `margin` from now.
    pub fn access_expires_within(&self, margin: Duration) -> bool {
        self.access_expires_at - margin <= Utc::now()
    }

    /// Whether the refresh token has lapsed; such a session can only log in again.
    pub fn refresh_expired(&self) -> bool {
        self.refresh_expires_at <= Utc::now()
    }
}

/// Gateway interface for the backend's `/auth` endpoints.
///
/// # Implementations
///
/// - [`crate::infrastructure::backend::HttpAuthGateway`] - REST implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchanges credentials for a token pair and the account snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] on bad credentials and
    /// [`AppError::Upstream`] when the backend is unreachable.
    async fn login(&self, email: &str, password: &str) -> Result<(TokenPair, User), AppError>;

    /// Posts the current refresh token and returns the replacement pair.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] when the refresh token is invalid
    /// or revoked.
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError>;

    /// Invalidates the token pair server-side. Best-effort; local session
    /// teardown does not depend on it.
    async fn logout(&self, access_token: &str) -> Result<(), AppError>;

    /// Fetches the account behind an access token.
    async fn me(&self, access_token: &str) -> Result<User, AppError>;
}

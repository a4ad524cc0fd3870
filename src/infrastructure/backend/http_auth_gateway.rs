//! REST implementation of the auth gateway.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use crate::domain::entities::User;
use crate::domain::gateways::{AuthGateway, TokenPair};
use crate::error::AppError;
use crate::infrastructure::backend::client::{BackendClient, SetCookie};

const ACCESS_COOKIE: &str = "accessToken";
const REFRESH_COOKIE: &str = "refreshToken";

/// Auth gateway over the backend's `/auth` endpoints.
///
/// Login and refresh responses deliver tokens as `Set-Cookie` headers with
/// server-provided expirations; the fallback TTLs cover backends that omit
/// the expiry attributes.
pub struct HttpAuthGateway {
    client: Arc<BackendClient>,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl HttpAuthGateway {
    pub fn new(
        client: Arc<BackendClient>,
        access_ttl: StdDuration,
        refresh_ttl: StdDuration,
    ) -> Self {
        Self {
            client,
            access_ttl: Duration::seconds(access_ttl.as_secs() as i64),
            refresh_ttl: Duration::seconds(refresh_ttl.as_secs() as i64),
        }
    }

    fn token_pair(&self, cookies: &[SetCookie]) -> Option<TokenPair> {
        let now = Utc::now();
        let access = cookies.iter().find(|c| c.name == ACCESS_COOKIE)?;
        let refresh = cookies.iter().find(|c| c.name == REFRESH_COOKIE)?;

        Some(TokenPair {
            access: access.value.clone(),
            refresh: refresh.value.clone(),
            access_expires_at: access.expires_at(now, self.access_ttl),
            refresh_expires_at: refresh.expires_at(now, self.refresh_ttl),
        })
    }

    fn missing_cookies() -> AppError {
        AppError::upstream(
            "Backend response omitted auth cookies",
            json!({ "expected": [ACCESS_COOKIE, REFRESH_COOKIE] }),
        )
    }
}

#[async_trait]
impl AuthGateway for HttpAuthGateway {
    async fn login(&self, email: &str, password: &str) -> Result<(TokenPair, User), AppError> {
        let (envelope, cookies) = self
            .client
            .post_with_cookies::<_, User>(
                "/auth/login",
                &json!({ "email": email, "password": password }),
            )
            .await?;

        let user = envelope.into_data()?;
        let tokens = self.token_pair(&cookies).ok_or_else(Self::missing_cookies)?;

        Ok((tokens, user))
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let (envelope, cookies) = self
            .client
            .post_with_cookies::<_, serde_json::Value>(
                "/auth/refresh",
                &json!({ "refreshToken": refresh_token }),
            )
            .await?;

        envelope.ensure_success()?;
        self.token_pair(&cookies).ok_or_else(Self::missing_cookies)
    }

    async fn logout(&self, access_token: &str) -> Result<(), AppError> {
        let envelope = self
            .client
            .post_json::<_, serde_json::Value>("/auth/logout", &json!({}), Some(access_token))
            .await?;
        envelope.ensure_success()?;
        Ok(())
    }

    async fn me(&self, access_token: &str) -> Result<User, AppError> {
        let envelope = self
            .client
            .get_json::<User>("/auth/me", &[], Some(access_token))
            .await?;
        Ok(envelope.into_data()?)
    }
}

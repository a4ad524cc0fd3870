//! Session lifecycle and access-token refresh.
//!
//! Every refresh trigger in the system - the session middleware running
//! before a page handler, and the background sweep - funnels into
//! [`AuthService::refresh_session`], which holds a per-session lock so
//! concurrent triggers collapse into a single backend call.

use chrono::{Duration, Utc};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration as StdDuration;
use tokio::sync::{Mutex, watch};

use crate::application::session::{
    AccessToken, CookieCodec, SessionId, SessionRecord, TokenStore,
};
use crate::domain::entities::User;
use crate::domain::gateways::AuthGateway;
use crate::error::AppError;

/// Service owning login, logout, and token refresh.
pub struct AuthService<G: AuthGateway, S: TokenStore> {
    gateway: Arc<G>,
    store: Arc<S>,
    codec: CookieCodec,
    refresh_margin: Duration,
    /// One lock per live session; refresh triggers serialize on it.
    refresh_locks: Mutex<HashMap<SessionId, Arc<Mutex<()>>>>,
}

impl<G: AuthGateway, S: TokenStore> AuthService<G, S> {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `gateway` - backend `/auth` operations
    /// - `store` - server-side session storage
    /// - `signing_secret` - HMAC key for session cookies
    /// - `refresh_margin` - refresh tokens expiring within this window
    pub fn new(
        gateway: Arc<G>,
        store: Arc<S>,
        signing_secret: String,
        refresh_margin: StdDuration,
    ) -> Self {
        Self {
            gateway,
            store,
            codec: CookieCodec::new(signing_secret),
            refresh_margin: Duration::seconds(refresh_margin.as_secs() as i64),
            refresh_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Exchanges credentials for a server-side session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] on bad credentials; backend
    /// failures pass through as-is.
    pub async fn login(&self, email: &str, password: &str) -> Result<(SessionId, User), AppError> {
        let (tokens, user) = self.gateway.login(email, password).await?;

        let id = SessionId::generate();
        self.store
            .insert(
                id.clone(),
                SessionRecord {
                    user: user.clone(),
                    tokens,
                    created_at: Utc::now(),
                },
            )
            .await;

        tracing::info!(user = %user.email, role = user.role.as_str(), "session opened");
        Ok((id, user))
    }

    /// Tears down a session, best-effort invalidating the tokens upstream.
    pub async fn logout(&self, id: &SessionId) {
        if let Some(record) = self.store.get(id).await
            && let Err(e) = self.gateway.logout(&record.tokens.access).await
        {
            tracing::debug!("backend logout failed: {e}");
        }
        self.drop_session(id).await;
    }

    /// Signed cookie value for a session id.
    pub fn cookie_value(&self, id: &SessionId) -> String {
        self.codec.encode(id)
    }

    /// Verifies a cookie value and extracts the session id.
    pub fn session_from_cookie(&self, raw: &str) -> Option<SessionId> {
        self.codec.decode(raw)
    }

    /// Account snapshot for a live session.
    pub async fn current_user(&self, id: &SessionId) -> Option<User> {
        self.store.get(id).await.map(|record| record.user)
    }

    /// Returns an access token that outlives the refresh margin, refreshing
    /// first when needed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] when the session is gone or cannot
    /// be refreshed; callers redirect to the login page.
    pub async fn ensure_fresh(&self, id: &SessionId) -> Result<AccessToken, AppError> {
        let record = self.store.get(id).await.ok_or_else(session_expired)?;

        if !record.tokens.access_expires_within(self.refresh_margin) {
            return Ok(AccessToken(record.tokens.access));
        }

        self.refresh_session(id).await
    }

    /// Refreshes the session's token pair against the backend.
    ///
    /// All refresh triggers route through here. The per-session lock plus
    /// the re-check after acquiring it collapse concurrent triggers into one
    /// backend call; losers of the race observe the fresh pair and return
    /// without touching the network.
    ///
    /// On refresh failure the session is dropped so the next request lands
    /// on the login page.
    pub async fn refresh_session(&self, id: &SessionId) -> Result<AccessToken, AppError> {
        let lock = {
            let mut locks = self.refresh_locks.lock().await;
            locks.entry(id.clone()).or_default().clone()
        };
        let _guard = lock.lock().await;

        let record = self.store.get(id).await.ok_or_else(session_expired)?;

        // A competing trigger may have refreshed while we waited on the lock.
        if !record.tokens.access_expires_within(self.refresh_margin) {
            return Ok(AccessToken(record.tokens.access));
        }

        if record.tokens.refresh_expired() {
            self.drop_session(id).await;
            return Err(AppError::unauthorized(
                "Session expired",
                json!({ "reason": "refresh token lapsed" }),
            ));
        }

        match self.gateway.refresh(&record.tokens.refresh).await {
            Ok(tokens) => {
                let access = AccessToken(tokens.access.clone());
                self.store.set_tokens(id, tokens).await;
                Ok(access)
            }
            Err(e) => {
                tracing::warn!(session = %id, "token refresh rejected: {e}");
                self.drop_session(id).await;
                Err(e)
            }
        }
    }

    /// Sessions the background sweep should refresh now.
    pub async fn sessions_needing_refresh(&self) -> Vec<SessionId> {
        self.store
            .expiring_before(Utc::now() + self.refresh_margin)
            .await
    }

    async fn drop_session(&self, id: &SessionId) {
        self.store.remove(id).await;
        self.refresh_locks.lock().await.remove(id);
    }
}

fn session_expired() -> AppError {
    AppError::unauthorized("Session expired", json!({}))
}

/// Background refresh sweep.
///
/// Wakes every `period` (the original deployment polled every 14 minutes),
/// refreshes sessions whose access token is inside the margin, and reports
/// liveness through the watch channel for `/health`.
pub async fn run_refresh_worker<G: AuthGateway, S: TokenStore>(
    service: Arc<AuthService<G, S>>,
    period: StdDuration,
    heartbeat: watch::Sender<chrono::DateTime<Utc>>,
) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        let _ = heartbeat.send(Utc::now());

        let due = service.sessions_needing_refresh().await;
        if due.is_empty() {
            continue;
        }

        tracing::debug!(count = due.len(), "refresh sweep");
        for id in due {
            if let Err(e) = service.refresh_session(&id).await {
                tracing::warn!(session = %id, "background refresh failed: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::session::MemoryTokenStore;
    use crate::domain::entities::Role;
    use crate::domain::gateways::{MockAuthGateway, TokenPair};

    fn test_user() -> User {
        User {
            id: "u1".to_string(),
            name: "Dana Cole".to_string(),
            email: "dana@gym.test".to_string(),
            role: Role::Admin,
            is_active: true,
            created_at: None,
        }
    }

    fn tokens_expiring_in(access: &str, expires_in: Duration) -> TokenPair {
        TokenPair {
            access: access.to_string(),
            refresh: "refresh-token".to_string(),
            access_expires_at: Utc::now() + expires_in,
            refresh_expires_at: Utc::now() + Duration::days(7),
        }
    }

    fn service_with(
        gateway: MockAuthGateway,
    ) -> AuthService<MockAuthGateway, MemoryTokenStore> {
        AuthService::new(
            Arc::new(gateway),
            Arc::new(MemoryTokenStore::new()),
            "test-secret".to_string(),
            StdDuration::from_secs(60),
        )
    }

    async fn seeded_session<S: TokenStore>(
        service: &AuthService<MockAuthGateway, S>,
        tokens: TokenPair,
    ) -> SessionId {
        let id = SessionId::generate();
        service
            .store
            .insert(
                id.clone(),
                SessionRecord {
                    user: test_user(),
                    tokens,
                    created_at: Utc::now(),
                },
            )
            .await;
        id
    }

    #[tokio::test]
    async fn test_login_opens_session_with_verifiable_cookie() {
        let mut gateway = MockAuthGateway::new();
        gateway.expect_login().times(1).returning(|_, _| {
            Ok((
                tokens_expiring_in("access", Duration::minutes(15)),
                test_user(),
            ))
        });

        let service = service_with(gateway);
        let (id, user) = service.login("dana@gym.test", "hunter2").await.unwrap();

        assert_eq!(user.id, "u1");
        let cookie = service.cookie_value(&id);
        assert_eq!(service.session_from_cookie(&cookie), Some(id.clone()));
        assert!(service.current_user(&id).await.is_some());
    }

    #[tokio::test]
    async fn test_ensure_fresh_skips_network_for_fresh_tokens() {
        // No expect_refresh: any call would panic the test.
        let service = service_with(MockAuthGateway::new());
        let id = seeded_session(
            &service,
            tokens_expiring_in("fresh-access", Duration::minutes(15)),
        )
        .await;

        let token = service.ensure_fresh(&id).await.unwrap();
        assert_eq!(token.as_str(), "fresh-access");
    }

    #[tokio::test]
    async fn test_ensure_fresh_refreshes_stale_tokens() {
        let mut gateway = MockAuthGateway::new();
        gateway
            .expect_refresh()
            .withf(|refresh| refresh == "refresh-token")
            .times(1)
            .returning(|_| Ok(tokens_expiring_in("new-access", Duration::minutes(15))));

        let service = service_with(gateway);
        let id = seeded_session(
            &service,
            tokens_expiring_in("stale-access", Duration::seconds(10)),
        )
        .await;

        let token = service.ensure_fresh(&id).await.unwrap();
        assert_eq!(token.as_str(), "new-access");

        // The replacement pair is stored atomically.
        let record = service.store.get(&id).await.unwrap();
        assert_eq!(record.tokens.access, "new-access");
    }

    #[tokio::test]
    async fn test_concurrent_triggers_collapse_into_one_refresh() {
        let mut gateway = MockAuthGateway::new();
        gateway
            .expect_refresh()
            .times(1)
            .returning(|_| Ok(tokens_expiring_in("new-access", Duration::minutes(15))));

        let service = Arc::new(service_with(gateway));
        let id = seeded_session(
            service.as_ref(),
            tokens_expiring_in("stale-access", Duration::seconds(10)),
        )
        .await;

        let (a, b) = tokio::join!(
            service.ensure_fresh(&id),
            service.refresh_session(&id)
        );

        assert_eq!(a.unwrap().as_str(), "new-access");
        assert_eq!(b.unwrap().as_str(), "new-access");
    }

    #[tokio::test]
    async fn test_refresh_failure_drops_session() {
        let mut gateway = MockAuthGateway::new();
        gateway.expect_refresh().times(1).returning(|_| {
            Err(AppError::unauthorized("revoked", serde_json::json!({})))
        });

        let service = service_with(gateway);
        let id = seeded_session(
            &service,
            tokens_expiring_in("stale-access", Duration::seconds(10)),
        )
        .await;

        assert!(service.ensure_fresh(&id).await.is_err());
        assert!(service.current_user(&id).await.is_none());
    }

    #[tokio::test]
    async fn test_lapsed_refresh_token_drops_session_without_network() {
        let service = service_with(MockAuthGateway::new());

        let mut tokens = tokens_expiring_in("stale-access", Duration::seconds(10));
        tokens.refresh_expires_at = Utc::now() - Duration::seconds(1);
        let id = seeded_session(&service, tokens).await;

        assert!(service.ensure_fresh(&id).await.is_err());
        assert!(service.current_user(&id).await.is_none());
    }

    #[tokio::test]
    async fn test_sessions_needing_refresh_honors_margin() {
        let service = service_with(MockAuthGateway::new());
        let stale = seeded_session(
            &service,
            tokens_expiring_in("a", Duration::seconds(10)),
        )
        .await;
        let _fresh = seeded_session(
            &service,
            tokens_expiring_in("b", Duration::minutes(15)),
        )
        .await;

        let due = service.sessions_needing_refresh().await;
        assert_eq!(due, vec![stale]);
    }
}

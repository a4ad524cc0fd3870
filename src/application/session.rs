//! Server-side sessions and the signed cookie that references them.
//!
//! Auth state is an explicit session object: the browser holds only a signed
//! session id, while the backend's token pair lives server-side behind the
//! [`TokenStore`] interface. Nothing else in the codebase reads cookies.
//!
//! # Cookie Format
//!
//! ```text
//! gym_session=<32 hex chars>.<64 hex HMAC-SHA256>
//! ```
//!
//! The MAC is keyed by `SESSION_SIGNING_SECRET`; a tampered or malformed
//! value decodes to nothing and the request counts as unauthenticated.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::User;
use crate::domain::gateways::TokenPair;

type HmacSha256 = Hmac<Sha256>;

/// Name of the browser session cookie.
pub const SESSION_COOKIE: &str = "gym_session";

/// Length of random bytes behind a session id (hex-encoded to 32 chars).
const SESSION_ID_BYTES: usize = 16;

/// Opaque session identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Generates a cryptographically secure random session id.
    ///
    /// # Panics
    ///
    /// Panics if the system random number generator fails (extremely rare).
    pub fn generate() -> Self {
        let mut buffer = [0u8; SESSION_ID_BYTES];
        getrandom::fill(&mut buffer).expect("Failed to generate random bytes");
        Self(hex::encode(buffer))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An access token on its way into a page handler.
#[derive(Debug, Clone)]
pub struct AccessToken(pub String);

impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Signs and verifies session cookie values.
pub struct CookieCodec {
    signing_secret: String,
}

impl CookieCodec {
    pub fn new(signing_secret: String) -> Self {
        Self { signing_secret }
    }

    fn mac(&self, id: &str) -> HmacSha256 {
        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(id.as_bytes());
        mac
    }

    /// Produces the cookie value `<id>.<hmac-hex>`.
    pub fn encode(&self, id: &SessionId) -> String {
        let tag = self.mac(id.as_str()).finalize().into_bytes();
        format!("{}.{}", id.as_str(), hex::encode(tag))
    }

    /// Verifies a cookie value and extracts the session id.
    ///
    /// Returns `None` for malformed values and bad signatures; verification
    /// is constant-time via [`Mac::verify_slice`].
    pub fn decode(&self, raw: &str) -> Option<SessionId> {
        let (id, sig_hex) = raw.split_once('.')?;

        if id.len() != SESSION_ID_BYTES * 2 || !id.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        let sig = hex::decode(sig_hex).ok()?;
        self.mac(id).verify_slice(&sig).ok()?;

        Some(SessionId(id.to_string()))
    }
}

/// Everything the portal keeps for one logged-in browser.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub user: User,
    pub tokens: TokenPair,
    pub created_at: DateTime<Utc>,
}

/// Storage interface for session records.
///
/// # Implementations
///
/// - [`MemoryTokenStore`] - in-process map, the production default
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn insert(&self, id: SessionId, record: SessionRecord);

    async fn get(&self, id: &SessionId) -> Option<SessionRecord>;

    /// Atomically replaces the token pair of an existing session.
    ///
    /// Returns `false` when the session is gone (logged out concurrently).
    async fn set_tokens(&self, id: &SessionId, tokens: TokenPair) -> bool;

    async fn remove(&self, id: &SessionId);

    /// Sessions whose access token expires at or before `deadline`.
    async fn expiring_before(&self, deadline: DateTime<Utc>) -> Vec<SessionId>;

    async fn count(&self) -> usize;
}

/// In-memory session store.
///
/// Sessions die with the process; browsers then land back on the login page,
/// which matches how the original deployment behaved on restart.
#[derive(Default)]
pub struct MemoryTokenStore {
    sessions: RwLock<HashMap<SessionId, SessionRecord>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn insert(&self, id: SessionId, record: SessionRecord) {
        self.sessions.write().await.insert(id, record);
    }

    async fn get(&self, id: &SessionId) -> Option<SessionRecord> {
        self.sessions.read().await.get(id).cloned()
    }

    async fn set_tokens(&self, id: &SessionId, tokens: TokenPair) -> bool {
        match self.sessions.write().await.get_mut(id) {
            Some(record) => {
                record.tokens = tokens;
                true
            }
            None => false,
        }
    }

    async fn remove(&self, id: &SessionId) {
        self.sessions.write().await.remove(id);
    }

    async fn expiring_before(&self, deadline: DateTime<Utc>) -> Vec<SessionId> {
        self.sessions
            .read()
            .await
            .iter()
            .filter(|(_, record)| record.tokens.access_expires_at <= deadline)
            .map(|(id, _)| id.clone())
            .collect()
    }

    async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

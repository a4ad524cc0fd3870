//! Shared HTTP wrapper for the backend API.
//!
//! `BackendClient` is the single place requests are built: it joins paths
//! onto the configured base URL, replays the caller's access token the way
//! the backend expects it, and decodes the uniform envelope. Gateway
//! implementations stay one-liners on top of it.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use reqwest::{Client, RequestBuilder, Response, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration as StdDuration;

use crate::infrastructure::backend::envelope::Envelope;
use crate::infrastructure::backend::error::GatewayError;

/// A single `Set-Cookie` header, reduced to what token capture needs.
#[derive(Debug, Clone, PartialEq)]
pub struct SetCookie {
    pub name: String,
    pub value: String,
    /// `Max-Age` in seconds; takes precedence over `Expires`.
    pub max_age: Option<i64>,
    pub expires: Option<DateTime<Utc>>,
}

impl SetCookie {
    /// Resolves the cookie lifetime into an absolute expiry.
    ///
    /// Falls back to `default_ttl` when the backend sent neither `Max-Age`
    /// nor a parseable `Expires`.
    pub fn expires_at(&self, now: DateTime<Utc>, default_ttl: Duration) -> DateTime<Utc> {
        if let Some(max_age) = self.max_age {
            return now + Duration::seconds(max_age);
        }
        self.expires.unwrap_or(now + default_ttl)
    }
}

/// Parses one `Set-Cookie` header value.
///
/// Only the name/value pair and the expiry attributes are kept; everything
/// else (`Path`, `HttpOnly`, ...) is the backend's business.
pub fn parse_set_cookie(raw: &str) -> Option<SetCookie> {
    let mut parts = raw.split(';');

    let first = parts.next()?.trim();
    let (name, value) = first.split_once('=')?;
    if name.is_empty() {
        return None;
    }

    let mut max_age = None;
    let mut expires = None;

    for attr in parts {
        let attr = attr.trim();
        if let Some((key, val)) = attr.split_once('=') {
            if key.eq_ignore_ascii_case("max-age") {
                max_age = val.trim().parse::<i64>().ok();
            } else if key.eq_ignore_ascii_case("expires") {
                expires = DateTime::parse_from_rfc2822(val.trim())
                    .ok()
                    .map(|dt| dt.with_timezone(&Utc));
            }
        }
    }

    Some(SetCookie {
        name: name.to_string(),
        value: value.to_string(),
        max_age,
        expires,
    })
}

/// HTTP client for the backend API.
///
/// # Auth Replay
///
/// Authenticated requests carry the access token twice, matching what the
/// backend accepts:
///
/// ```text
/// Cookie: accessToken=<token>
/// Authorization: Bearer <token>
/// ```
pub struct BackendClient {
    http: Client,
    base_url: String,
}

impl BackendClient {
    /// Creates a client for the given base URL with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(base_url: &str, timeout: StdDuration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authed(req: RequestBuilder, access: &str) -> RequestBuilder {
        req.header(header::COOKIE, format!("accessToken={access}"))
            .bearer_auth(access)
    }

    /// `GET` with optional query pairs and auth.
    ///
    /// # Errors
    ///
    /// See [`GatewayError`] for the taxonomy; non-2xx statuses map via
    /// [`GatewayError::from_status`].
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
        access: Option<&str>,
    ) -> Result<Envelope<T>, GatewayError> {
        let mut req = self.http.get(self.url(path));
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(access) = access {
            req = Self::authed(req, access);
        }
        Self::execute(req).await
    }

    /// `POST` with a JSON body.
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        access: Option<&str>,
    ) -> Result<Envelope<T>, GatewayError> {
        let mut req = self.http.post(self.url(path)).json(body);
        if let Some(access) = access {
            req = Self::authed(req, access);
        }
        Self::execute(req).await
    }

    /// `PATCH` with a JSON body.
    pub async fn patch_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        access: Option<&str>,
    ) -> Result<Envelope<T>, GatewayError> {
        let mut req = self.http.patch(self.url(path)).json(body);
        if let Some(access) = access {
            req = Self::authed(req, access);
        }
        Self::execute(req).await
    }

    /// `DELETE`.
    pub async fn delete_json<T: DeserializeOwned>(
        &self,
        path: &str,
        access: Option<&str>,
    ) -> Result<Envelope<T>, GatewayError> {
        let mut req = self.http.delete(self.url(path));
        if let Some(access) = access {
            req = Self::authed(req, access);
        }
        Self::execute(req).await
    }

    /// `POST` that also returns the response's `Set-Cookie` headers.
    ///
    /// Login and refresh deliver tokens this way; everything else goes
    /// through [`Self::post_json`].
    pub async fn post_with_cookies<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(Envelope<T>, Vec<SetCookie>), GatewayError> {
        let response = self.http.post(self.url(path)).json(body).send().await?;

        let cookies: Vec<SetCookie> = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(parse_set_cookie)
            .collect();

        let envelope = Self::decode(response).await?;
        Ok((envelope, cookies))
    }

    async fn execute<T: DeserializeOwned>(req: RequestBuilder) -> Result<Envelope<T>, GatewayError> {
        let response = req.send().await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<Envelope<T>, GatewayError> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(GatewayError::from_status(status, extract_message(&text)));
        }

        response
            .json::<Envelope<T>>()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))
    }
}

/// Pulls the envelope `message` out of an error body, falling back to the
/// raw text for backends that answer errors without the envelope.
fn extract_message(body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorShape {
        message: Option<String>,
    }

    serde_json::from_str::<ErrorShape>(body)
        .ok()
        .and_then(|shape| shape.message)
        .unwrap_or_else(|| body.chars().take(200).collect())
}

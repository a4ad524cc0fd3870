//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Required Variables
//!
//! - `BACKEND_API_URL` - Base URL of the gym backend API, e.g. `https://api.gym.example.com`
//! - `SESSION_SIGNING_SECRET` - HMAC key for session cookie signatures
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `EXTERNAL_URL` - Public URL of this portal; an `https` scheme marks session cookies `Secure`
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `BEHIND_PROXY` - Read client IPs from forwarded headers (default: `false`)
//! - `BACKEND_TIMEOUT_SECONDS` - Per-request backend timeout (default: 10)
//! - `TOKEN_REFRESH_INTERVAL_SECONDS` - Background refresh sweep period (default: 840)
//! - `TOKEN_REFRESH_MARGIN_SECONDS` - Refresh tokens expiring within this margin (default: 60)
//! - `ACCESS_TOKEN_TTL_SECONDS` - Fallback access-token lifetime when the backend
//!   sends no cookie expiry (default: 900)
//! - `REFRESH_TOKEN_TTL_SECONDS` - Fallback refresh-token lifetime (default: 604800)

use anyhow::{Context, Result};
use std::env;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub backend_api_url: String,
    pub listen_addr: String,
    pub external_url: Option<String>,
    pub log_level: String,
    pub log_format: String,
    /// When true, rate limiting reads client IP from X-Forwarded-For / X-Real-IP headers.
    /// Enable only when the service is behind a trusted reverse proxy.
    pub behind_proxy: bool,
    /// HMAC signing secret for session cookies.
    /// Loaded from `SESSION_SIGNING_SECRET`. Must be non-empty.
    pub session_signing_secret: String,
    /// Per-request timeout for backend API calls in seconds.
    pub backend_timeout_seconds: u64,
    /// Period of the background token-refresh sweep in seconds.
    pub token_refresh_interval_seconds: u64,
    /// Sessions whose access token expires within this margin are refreshed.
    pub token_refresh_margin_seconds: u64,
    /// Fallback access-token lifetime when the backend omits a cookie expiry.
    pub access_token_ttl_seconds: u64,
    /// Fallback refresh-token lifetime when the backend omits a cookie expiry.
    pub refresh_token_ttl_seconds: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `BACKEND_API_URL` or `SESSION_SIGNING_SECRET` is missing.
    pub fn from_env() -> Result<Self> {
        let backend_api_url =
            env::var("BACKEND_API_URL").context("BACKEND_API_URL must be set")?;

        let session_signing_secret =
            env::var("SESSION_SIGNING_SECRET").context("SESSION_SIGNING_SECRET must be set")?;

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let external_url = env::var("EXTERNAL_URL").ok();
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let behind_proxy = env::var("BEHIND_PROXY")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        let backend_timeout_seconds = env::var("BACKEND_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let token_refresh_interval_seconds = env::var("TOKEN_REFRESH_INTERVAL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(840);

        let token_refresh_margin_seconds = env::var("TOKEN_REFRESH_MARGIN_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(60);

        let access_token_ttl_seconds = env::var("ACCESS_TOKEN_TTL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(900);

        let refresh_token_ttl_seconds = env::var("REFRESH_TOKEN_TTL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(604_800);

        Ok(Self {
            backend_api_url,
            listen_addr,
            external_url,
            log_level,
            log_format,
            behind_proxy,
            session_signing_secret,
            backend_timeout_seconds,
            token_refresh_interval_seconds,
            token_refresh_margin_seconds,
            access_token_ttl_seconds,
            refresh_token_ttl_seconds,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `BACKEND_API_URL` is not an absolute http(s) URL
    /// - `SESSION_SIGNING_SECRET` is empty
    /// - `LOG_FORMAT` is not `text` or `json`
    /// - `LISTEN` is invalid
    /// - refresh timing values are out of range
    pub fn validate(&self) -> Result<()> {
        if !self.backend_api_url.starts_with("http://")
            && !self.backend_api_url.starts_with("https://")
        {
            anyhow::bail!(
                "BACKEND_API_URL must start with 'http://' or 'https://', got '{}'",
                self.backend_api_url
            );
        }

        if url::Url::parse(&self.backend_api_url).is_err() {
            anyhow::bail!("BACKEND_API_URL is not a valid URL: '{}'", self.backend_api_url);
        }

        if self.session_signing_secret.is_empty() {
            anyhow::bail!("SESSION_SIGNING_SECRET must not be empty");
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if let Some(ref external_url) = self.external_url
            && !external_url.starts_with("http://")
            && !external_url.starts_with("https://")
        {
            anyhow::bail!(
                "EXTERNAL_URL must start with 'http://' or 'https://', got '{}'",
                external_url
            );
        }

        if self.backend_timeout_seconds == 0 || self.backend_timeout_seconds > 120 {
            anyhow::bail!(
                "BACKEND_TIMEOUT_SECONDS must be between 1 and 120, got {}",
                self.backend_timeout_seconds
            );
        }

        if self.token_refresh_interval_seconds < 60 {
            anyhow::bail!(
                "TOKEN_REFRESH_INTERVAL_SECONDS must be at least 60, got {}",
                self.token_refresh_interval_seconds
            );
        }

        if self.token_refresh_margin_seconds == 0
            || self.token_refresh_margin_seconds >= self.access_token_ttl_seconds
        {
            anyhow::bail!(
                "TOKEN_REFRESH_MARGIN_SECONDS must be between 1 and the access token TTL, got {}",
                self.token_refresh_margin_seconds
            );
        }

        if self.refresh_token_ttl_seconds <= self.access_token_ttl_seconds {
            anyhow::bail!(
                "REFRESH_TOKEN_TTL_SECONDS must exceed ACCESS_TOKEN_TTL_SECONDS, got {}",
                self.refresh_token_ttl_seconds
            );
        }

        Ok(())
    }

    /// Returns whether session cookies should carry the `Secure` attribute.
    ///
    /// Driven by the scheme of `EXTERNAL_URL`; a portal served over plain
    /// HTTP (local development) must not set `Secure` or the browser drops
    /// the cookie.
    pub fn secure_cookies(&self) -> bool {
        self.external_url
            .as_deref()
            .is_some_and(|url| url.starts_with("https://"))
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Backend API: {}", self.backend_api_url);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!(
            "  Token refresh: every {}s, margin {}s",
            self.token_refresh_interval_seconds,
            self.token_refresh_margin_seconds
        );
        tracing::info!("  Secure cookies: {}", self.secure_cookies());
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn test_config() -> Config {
        Config {
            backend_api_url: "https://api.gym.example.com".to_string(),
            listen_addr: "0.0.0.0:3000".to_string(),
            external_url: None,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            behind_proxy: false,
            session_signing_secret: "test-secret".to_string(),
            backend_timeout_seconds: 10,
            token_refresh_interval_seconds: 840,
            token_refresh_margin_seconds: 60,
            access_token_ttl_seconds: 900,
            refresh_token_ttl_seconds: 604_800,
        }
    }

    #[test]
    fn test_config_validation() {
        let mut config = test_config();
        assert!(config.validate().is_ok());

        // Invalid backend URL scheme
        config.backend_api_url = "ftp://api.gym.example.com".to_string();
        assert!(config.validate().is_err());

        config.backend_api_url = "https://api.gym.example.com".to_string();

        // Empty signing secret
        config.session_signing_secret = String::new();
        assert!(config.validate().is_err());

        config.session_signing_secret = "test-secret".to_string();

        // Invalid log format
        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());

        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        // Invalid listen address
        config.listen_addr = "3000".to_string();
        assert!(config.validate().is_err());

        config.listen_addr = "0.0.0.0:3000".to_string();

        // Refresh sweep faster than a minute
        config.token_refresh_interval_seconds = 30;
        assert!(config.validate().is_err());

        config.token_refresh_interval_seconds = 840;

        // Margin must stay below the access token lifetime
        config.token_refresh_margin_seconds = 900;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_secure_cookies_follows_external_url_scheme() {
        let mut config = test_config();
        assert!(!config.secure_cookies());

        config.external_url = Some("http://gym.example.com".to_string());
        assert!(!config.secure_cookies());

        config.external_url = Some("https://gym.example.com".to_string());
        assert!(config.secure_cookies());
    }

    #[test]
    #[serial]
    fn test_from_env_requires_backend_url() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::remove_var("BACKEND_API_URL");
            env::set_var("SESSION_SIGNING_SECRET", "secret");
        }

        assert!(Config::from_env().is_err());

        unsafe {
            env::remove_var("SESSION_SIGNING_SECRET");
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("BACKEND_API_URL", "https://api.gym.example.com");
            env::set_var("SESSION_SIGNING_SECRET", "secret");
            env::remove_var("LISTEN");
            env::remove_var("LOG_FORMAT");
            env::remove_var("TOKEN_REFRESH_INTERVAL_SECONDS");
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.listen_addr, "0.0.0.0:3000");
        assert_eq!(config.log_format, "text");
        assert_eq!(config.token_refresh_interval_seconds, 840);
        assert_eq!(config.access_token_ttl_seconds, 900);

        // Cleanup
        unsafe {
            env::remove_var("BACKEND_API_URL");
            env::remove_var("SESSION_SIGNING_SECRET");
        }
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("BACKEND_API_URL", "https://api.gym.example.com");
            env::set_var("SESSION_SIGNING_SECRET", "secret");
            env::set_var("TOKEN_REFRESH_INTERVAL_SECONDS", "300");
            env::set_var("BEHIND_PROXY", "true");
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.token_refresh_interval_seconds, 300);
        assert!(config.behind_proxy);

        // Cleanup
        unsafe {
            env::remove_var("BACKEND_API_URL");
            env::remove_var("SESSION_SIGNING_SECRET");
            env::remove_var("TOKEN_REFRESH_INTERVAL_SECONDS");
            env::remove_var("BEHIND_PROXY");
        }
    }
}

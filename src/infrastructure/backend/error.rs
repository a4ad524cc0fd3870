//! Wire-level errors from the backend API.

use crate::error::AppError;
use reqwest::StatusCode;
use serde_json::json;
use thiserror::Error;

/// Errors produced while talking to the backend.
///
/// Status-driven variants carry the backend's envelope `message` when one
/// could be decoded, otherwise the raw body text.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("backend request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// A 4xx rejection or a `success=false` envelope.
    #[error("rejected: {0}")]
    Rejected(String),

    #[error("backend error {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("malformed backend response: {0}")]
    Decode(String),
}

impl GatewayError {
    pub fn from_status(status: StatusCode, message: String) -> Self {
        let msg = if message.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        } else {
            message
        };

        match status {
            StatusCode::UNAUTHORIZED => GatewayError::Unauthorized(msg),
            StatusCode::FORBIDDEN => GatewayError::Forbidden(msg),
            StatusCode::NOT_FOUND => GatewayError::NotFound(msg),
            status if status.is_client_error() => GatewayError::Rejected(msg),
            status => GatewayError::Upstream {
                status: status.as_u16(),
                message: msg,
            },
        }
    }
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Transport(e) => AppError::upstream(
                "Backend unreachable",
                json!({ "reason": e.to_string() }),
            ),
            GatewayError::Unauthorized(message) => AppError::unauthorized(message, json!({})),
            GatewayError::Forbidden(message) => AppError::forbidden(message, json!({})),
            GatewayError::NotFound(message) => AppError::not_found(message, json!({})),
            GatewayError::Rejected(message) => AppError::bad_request(message, json!({})),
            GatewayError::Upstream { status, message } => {
                AppError::upstream("Backend error", json!({ "status": status, "message": message }))
            }
            GatewayError::Decode(reason) => AppError::upstream(
                "Malformed backend response",
                json!({ "reason": reason }),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_mapping() {
        assert!(matches!(
            GatewayError::from_status(StatusCode::UNAUTHORIZED, String::new()),
            GatewayError::Unauthorized(_)
        ));
        assert!(matches!(
            GatewayError::from_status(StatusCode::NOT_FOUND, "missing".to_string()),
            GatewayError::NotFound(m) if m == "missing"
        ));
        assert!(matches!(
            GatewayError::from_status(StatusCode::UNPROCESSABLE_ENTITY, "bad".to_string()),
            GatewayError::Rejected(_)
        ));
        assert!(matches!(
            GatewayError::from_status(StatusCode::BAD_GATEWAY, String::new()),
            GatewayError::Upstream { status: 502, .. }
        ));
    }

    #[test]
    fn test_empty_message_falls_back_to_reason() {
        let err = GatewayError::from_status(StatusCode::NOT_FOUND, String::new());
        assert!(matches!(err, GatewayError::NotFound(m) if m == "Not Found"));
    }

    #[test]
    fn test_app_error_mapping() {
        let app: AppError = GatewayError::Unauthorized("expired".to_string()).into();
        assert!(matches!(app, AppError::Unauthorized { .. }));

        let app: AppError = GatewayError::Rejected("dup email".to_string()).into();
        assert!(matches!(app, AppError::Validation { .. }));
    }
}

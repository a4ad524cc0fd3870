//! The backend's uniform response envelope.
//!
//! Every endpoint answers
//! `{ success, message, data, meta?, timestamp }` with camelCase keys; list
//! endpoints add the pagination descriptor under `meta`.

use crate::domain::page::{Page, PageMeta};
use crate::infrastructure::backend::error::GatewayError;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: serde::de::Deserialize<'de>"))]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub meta: Option<PageMeta>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl<T> Envelope<T> {
    /// Checks the `success` flag for endpoints whose `data` carries nothing
    /// useful (deletes, logout).
    pub fn ensure_success(&self) -> Result<(), GatewayError> {
        if self.success {
            Ok(())
        } else {
            Err(GatewayError::Rejected(self.message.clone()))
        }
    }

    /// Unwraps `data`, treating `success=false` as a rejection and a missing
    /// payload on success as a malformed response.
    pub fn into_data(self) -> Result<T, GatewayError> {
        if !self.success {
            return Err(GatewayError::Rejected(self.message));
        }
        self.data.ok_or_else(|| {
            GatewayError::Decode("missing data on successful response".to_string())
        })
    }
}

impl<T> Envelope<Vec<T>> {
    /// Unwraps a list payload together with its pagination descriptor.
    ///
    /// Endpoints that return the whole set at once omit `meta`; those get a
    /// synthetic single-page descriptor.
    pub fn into_page(self) -> Result<Page<T>, GatewayError> {
        if !self.success {
            return Err(GatewayError::Rejected(self.message));
        }
        let items = self.data.ok_or_else(|| {
            GatewayError::Decode("missing data on successful response".to_string())
        })?;
        let meta = self.meta.unwrap_or_else(|| PageMeta::single_page(items.len()));
        Ok(Page { items, meta })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: String,
    }

    #[test]
    fn test_decodes_full_envelope() {
        let json = r#"{
            "success": true,
            "message": "ok",
            "data": [{"id": "a"}, {"id": "b"}],
            "meta": {"page": 1, "limit": 2, "total": 5, "totalPages": 3, "hasNext": true, "hasPrev": false},
            "timestamp": "2026-03-01T00:00:00Z"
        }"#;
        let envelope: Envelope<Vec<Item>> = serde_json::from_str(json).unwrap();
        let page = envelope.into_page().unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.meta.total_pages, 3);
        assert!(page.meta.has_next);
    }

    #[test]
    fn test_missing_meta_synthesizes_single_page() {
        let json = r#"{"success": true, "message": "", "data": [{"id": "a"}]}"#;
        let envelope: Envelope<Vec<Item>> = serde_json::from_str(json).unwrap();
        let page = envelope.into_page().unwrap();
        assert_eq!(page.meta.page, 1);
        assert_eq!(page.meta.total, 1);
        assert!(!page.meta.has_next);
    }

    #[test]
    fn test_failure_envelope_is_rejection() {
        let json = r#"{"success": false, "message": "Email already registered", "data": null}"#;
        let envelope: Envelope<Item> = serde_json::from_str(json).unwrap();
        let err = envelope.into_data().unwrap_err();
        assert!(matches!(err, GatewayError::Rejected(m) if m == "Email already registered"));
    }

    #[test]
    fn test_success_without_data_is_decode_error() {
        let json = r#"{"success": true, "message": "ok", "data": null}"#;
        let envelope: Envelope<Item> = serde_json::from_str(json).unwrap();
        assert!(matches!(
            envelope.into_data().unwrap_err(),
            GatewayError::Decode(_)
        ));
    }

    #[test]
    fn test_ensure_success_ignores_payload() {
        let json = r#"{"success": true, "message": "deleted", "data": null}"#;
        let envelope: Envelope<serde_json::Value> = serde_json::from_str(json).unwrap();
        assert!(envelope.ensure_success().is_ok());
    }
}

//! Gym members and the form payloads that create or change them.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

/// Compiled regex for phone validation: digits, spaces, and separators with
/// an optional leading `+`.
static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9][0-9 ()\-]{6,19}$").unwrap());

/// Membership lifecycle state as the backend reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    Active,
    Inactive,
    Suspended,
}

impl MemberStatus {
    pub fn label(&self) -> &'static str {
        match self {
            MemberStatus::Active => "Active",
            MemberStatus::Inactive => "Inactive",
            MemberStatus::Suspended => "Suspended",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MemberStatus::Active => "active",
            MemberStatus::Inactive => "inactive",
            MemberStatus::Suspended => "suspended",
        }
    }
}

/// A gym member as the backend reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub status: MemberStatus,
    #[serde(default)]
    pub plan_id: Option<String>,
    #[serde(default)]
    pub plan_name: Option<String>,
    #[serde(default)]
    pub trainer_id: Option<String>,
    #[serde(default)]
    pub trainer_name: Option<String>,
    pub joined_at: DateTime<Utc>,
}

/// Payload for creating a member.
///
/// Doubles as the HTML form shape and the backend request body: field names
/// are camelCase both in `<input name=...>` and on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewMember {
    #[validate(length(min = 2, max = 100, message = "Name must be 2-100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(regex(path = "*PHONE_REGEX", message = "Invalid phone number"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trainer_id: Option<String>,
}

/// Payload for updating a member. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMember {
    #[validate(length(min = 2, max = 100, message = "Name must be 2-100 characters"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[validate(email(message = "Invalid email address"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[validate(regex(path = "*PHONE_REGEX", message = "Invalid phone number"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<MemberStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trainer_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_decodes_backend_shape() {
        let json = r#"{
            "id": "m1",
            "name": "Ann Ruiz",
            "email": "ann@example.com",
            "phone": "+1 555 0100",
            "status": "active",
            "planId": "p1",
            "planName": "Gold",
            "joinedAt": "2026-02-01T09:00:00Z"
        }"#;
        let member: Member = serde_json::from_str(json).unwrap();
        assert_eq!(member.status, MemberStatus::Active);
        assert_eq!(member.plan_name.as_deref(), Some("Gold"));
        assert!(member.trainer_id.is_none());
    }

    #[test]
    fn test_new_member_validation() {
        let valid = NewMember {
            name: "Ann Ruiz".to_string(),
            email: "ann@example.com".to_string(),
            phone: Some("+1 555 0100".to_string()),
            plan_id: None,
            trainer_id: None,
        };
        assert!(valid.validate().is_ok());

        let bad_email = NewMember {
            email: "not-an-email".to_string(),
            ..valid.clone()
        };
        assert!(bad_email.validate().is_err());

        let bad_phone = NewMember {
            phone: Some("abc".to_string()),
            ..valid.clone()
        };
        assert!(bad_phone.validate().is_err());

        let short_name = NewMember {
            name: "A".to_string(),
            ..valid
        };
        assert!(short_name.validate().is_err());
    }

    #[test]
    fn test_update_member_serializes_only_present_fields() {
        let update = UpdateMember {
            status: Some(MemberStatus::Suspended),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "suspended" }));
    }
}

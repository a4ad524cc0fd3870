//! Portal accounts and their roles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account role, ordered by privilege.
///
/// Declaration order matters: derived `Ord` gives
/// `Member < Trainer < Admin < SuperAdmin`, which role gating relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Member,
    Trainer,
    Admin,
    SuperAdmin,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::Member => "Member",
            Role::Trainer => "Trainer",
            Role::Admin => "Admin",
            Role::SuperAdmin => "Super Admin",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Member => "member",
            Role::Trainer => "trainer",
            Role::Admin => "admin",
            Role::SuperAdmin => "super_admin",
        }
    }
}

/// An authenticated account as the backend reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

impl User {
    /// Template helpers; Askama expressions call these instead of comparing
    /// enum paths inline.
    pub fn is_super_admin(&self) -> bool {
        self.role == Role::SuperAdmin
    }

    pub fn is_admin(&self) -> bool {
        self.role >= Role::Admin
    }

    pub fn is_trainer(&self) -> bool {
        self.role == Role::Trainer
    }

    pub fn is_member(&self) -> bool {
        self.role == Role::Member
    }

    pub fn role_label(&self) -> &'static str {
        self.role.label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_ordering() {
        assert!(Role::SuperAdmin > Role::Admin);
        assert!(Role::Admin > Role::Trainer);
        assert!(Role::Trainer > Role::Member);
    }

    #[test]
    fn test_role_wire_format() {
        assert_eq!(
            serde_json::to_string(&Role::SuperAdmin).unwrap(),
            r#""super_admin""#
        );
        let role: Role = serde_json::from_str(r#""trainer""#).unwrap();
        assert_eq!(role, Role::Trainer);
    }

    #[test]
    fn test_user_decodes_camel_case() {
        let json = r#"{
            "id": "u1",
            "name": "Dana Cole",
            "email": "dana@gym.test",
            "role": "admin",
            "isActive": true,
            "createdAt": "2026-01-05T10:00:00Z"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert!(user.is_admin());
        assert!(!user.is_super_admin());
    }
}

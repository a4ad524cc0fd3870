//! Membership plans and their form payloads.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A membership tier with price, duration, and feature list.
///
/// Prices are display-only decimals straight from the backend; the portal
/// never does money arithmetic beyond formatting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub duration_months: u32,
    #[serde(default)]
    pub features: Vec<String>,
    pub is_active: bool,
}

impl Plan {
    pub fn price_label(&self) -> String {
        format!("${:.2}", self.price)
    }

    pub fn duration_label(&self) -> String {
        if self.duration_months == 1 {
            "1 month".to_string()
        } else {
            format!("{} months", self.duration_months)
        }
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_active { "Active" } else { "Retired" }
    }
}

/// Payload for creating a plan. Features arrive from the form as one
/// newline-separated textarea value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewPlan {
    #[validate(length(min = 2, max = 60, message = "Name must be 2-60 characters"))]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[validate(range(min = 0.01, message = "Price must be positive"))]
    pub price: f64,

    #[validate(range(min = 1, max = 36, message = "Duration must be 1-36 months"))]
    pub duration_months: u32,

    #[serde(default)]
    pub features: Vec<String>,
}

/// Payload for updating a plan. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlan {
    #[validate(length(min = 2, max = 60, message = "Name must be 2-60 characters"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[validate(range(min = 0.01, message = "Price must be positive"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    #[validate(range(min = 1, max = 36, message = "Duration must be 1-36 months"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_months: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_labels() {
        let plan = Plan {
            id: "p1".to_string(),
            name: "Gold".to_string(),
            description: None,
            price: 49.5,
            duration_months: 12,
            features: vec!["Sauna".to_string()],
            is_active: true,
        };
        assert_eq!(plan.price_label(), "$49.50");
        assert_eq!(plan.duration_label(), "12 months");
        assert_eq!(plan.status_label(), "Active");
    }

    #[test]
    fn test_new_plan_rejects_free_plans() {
        let plan = NewPlan {
            name: "Free".to_string(),
            price: 0.0,
            duration_months: 1,
            ..Default::default()
        };
        assert!(plan.validate().is_err());
    }
}

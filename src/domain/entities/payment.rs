//! Payment records as the backend reports them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    Pending,
    Failed,
}

impl PaymentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Failed => "Failed",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Pending => "pending",
            PaymentStatus::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub member_id: String,
    #[serde(default)]
    pub member_name: Option<String>,
    #[serde(default)]
    pub plan_name: Option<String>,
    pub amount: f64,
    /// Free-form method tag from the payment provider ("card", "cash", ...).
    #[serde(default)]
    pub method: Option<String>,
    pub status: PaymentStatus,
    pub paid_at: DateTime<Utc>,
}

impl Payment {
    pub fn amount_label(&self) -> String {
        format!("${:.2}", self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_decodes_backend_shape() {
        let json = r#"{
            "id": "pay1",
            "memberId": "m1",
            "memberName": "Ann Ruiz",
            "planName": "Gold",
            "amount": 49.5,
            "method": "card",
            "status": "paid",
            "paidAt": "2026-03-01T12:00:00Z"
        }"#;
        let payment: Payment = serde_json::from_str(json).unwrap();
        assert_eq!(payment.status, PaymentStatus::Paid);
        assert_eq!(payment.amount_label(), "$49.50");
    }
}

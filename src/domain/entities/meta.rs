//! Aggregated dashboard figures from the backend's `/meta` endpoints.

use serde::{Deserialize, Serialize};

/// Overview counters for the dashboard landing page.
///
/// Every field defaults so a degraded `/meta/dashboard` response still
/// renders a page of zeros instead of failing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default)]
    pub total_members: u64,
    #[serde(default)]
    pub active_members: u64,
    #[serde(default)]
    pub total_trainers: u64,
    #[serde(default)]
    pub active_plans: u64,
    #[serde(default)]
    pub monthly_revenue: f64,
    #[serde(default)]
    pub new_members_this_month: u64,
}

impl DashboardStats {
    pub fn revenue_label(&self) -> String {
        format!("${:.2}", self.monthly_revenue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_stats_decode_with_defaults() {
        let stats: DashboardStats =
            serde_json::from_str(r#"{"totalMembers": 120, "monthlyRevenue": 5400.0}"#).unwrap();
        assert_eq!(stats.total_members, 120);
        assert_eq!(stats.active_members, 0);
        assert_eq!(stats.revenue_label(), "$5400.00");
    }
}

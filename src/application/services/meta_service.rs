//! Dashboard overview service.

use std::sync::Arc;

use crate::domain::entities::{DashboardStats, Member, Payment};
use crate::domain::gateways::MetaGateway;

/// Rows shown in the "recent" tables on the overview page.
const RECENT_LIMIT: u32 = 5;

/// Everything the dashboard landing page renders.
#[derive(Debug, Default)]
pub struct Overview {
    pub stats: DashboardStats,
    pub recent_members: Vec<Member>,
    pub recent_payments: Vec<Payment>,
}

pub struct MetaService<G: MetaGateway> {
    gateway: Arc<G>,
}

impl<G: MetaGateway> MetaService<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Fetches all overview sections concurrently and awaits them jointly.
    ///
    /// A failed section degrades to its default value with a warning rather
    /// than failing the page; the dashboard always renders.
    pub async fn overview(&self, access: &str) -> Overview {
        let (stats, members, payments) = tokio::join!(
            self.gateway.dashboard_stats(access),
            self.gateway.recent_members(access, RECENT_LIMIT),
            self.gateway.recent_payments(access, RECENT_LIMIT),
        );

        Overview {
            stats: stats.unwrap_or_else(|e| {
                tracing::warn!("dashboard stats unavailable: {e}");
                DashboardStats::default()
            }),
            recent_members: members.unwrap_or_else(|e| {
                tracing::warn!("recent members unavailable: {e}");
                Vec::new()
            }),
            recent_payments: payments.unwrap_or_else(|e| {
                tracing::warn!("recent payments unavailable: {e}");
                Vec::new()
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gateways::MockMetaGateway;
    use crate::error::AppError;
    use serde_json::json;

    #[tokio::test]
    async fn test_failed_section_degrades_to_default() {
        let mut gateway = MockMetaGateway::new();
        gateway.expect_dashboard_stats().times(1).returning(|_| {
            Ok(DashboardStats {
                total_members: 42,
                ..Default::default()
            })
        });
        gateway
            .expect_recent_members()
            .times(1)
            .returning(|_, _| Ok(vec![]));
        gateway
            .expect_recent_payments()
            .times(1)
            .returning(|_, _| Err(AppError::upstream("down", json!({}))));

        let service = MetaService::new(Arc::new(gateway));
        let overview = service.overview("token").await;

        assert_eq!(overview.stats.total_members, 42);
        assert!(overview.recent_payments.is_empty());
    }
}

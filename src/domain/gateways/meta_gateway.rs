//! Gateway trait for dashboard aggregates.

use crate::domain::entities::{DashboardStats, Member, Payment};
use crate::error::AppError;
use async_trait::async_trait;

/// Gateway interface for the backend's `/meta` endpoints.
///
/// These feed the dashboard overview; each call is independent so the page
/// can degrade section by section when one of them fails.
///
/// # Implementations
///
/// - [`crate::infrastructure::backend::HttpMetaGateway`] - REST implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetaGateway: Send + Sync {
    /// Overview counters for the stat cards.
    async fn dashboard_stats(&self, access: &str) -> Result<DashboardStats, AppError>;

    /// Most recent payments, newest first.
    async fn recent_payments(&self, access: &str, limit: u32) -> Result<Vec<Payment>, AppError>;

    /// Most recently joined members, newest first.
    async fn recent_members(&self, access: &str, limit: u32) -> Result<Vec<Member>, AppError>;
}

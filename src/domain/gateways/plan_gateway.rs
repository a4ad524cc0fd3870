//! Gateway trait for the plan catalog.

use crate::domain::entities::{NewPlan, Plan, UpdatePlan};
use crate::domain::gateways::PageQuery;
use crate::domain::page::Page;
use crate::error::AppError;
use async_trait::async_trait;

/// Filters for the backend's `GET /plan` listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanQuery {
    pub page: PageQuery,
    pub is_active: Option<bool>,
}

impl PlanQuery {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        self.page.push_pairs(&mut pairs);
        if let Some(is_active) = self.is_active {
            pairs.push(("isActive", is_active.to_string()));
        }
        pairs
    }
}

/// Gateway interface for the backend's `/plan` endpoints.
///
/// # Implementations
///
/// - [`crate::infrastructure::backend::HttpPlanGateway`] - REST implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlanGateway: Send + Sync {
    /// Lists active plans without authentication, for the marketing pages.
    async fn list_public(&self) -> Result<Vec<Plan>, AppError>;

    /// Lists plans matching the query.
    async fn list(&self, access: &str, query: &PlanQuery) -> Result<Page<Plan>, AppError>;

    /// Fetches a single plan.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown ids.
    async fn get(&self, access: &str, id: &str) -> Result<Plan, AppError>;

    /// Creates a plan and returns the backend's canonical record.
    async fn create(&self, access: &str, plan: &NewPlan) -> Result<Plan, AppError>;

    /// Applies a partial update and returns the refreshed record.
    async fn update(&self, access: &str, id: &str, update: &UpdatePlan) -> Result<Plan, AppError>;

    /// Activates or retires a plan.
    async fn set_active(&self, access: &str, id: &str, is_active: bool) -> Result<Plan, AppError>;
}

//! Gateway trait for trainer listings and rosters.

use crate::domain::entities::{Member, Trainer};
use crate::domain::gateways::PageQuery;
use crate::domain::page::Page;
use crate::error::AppError;
use async_trait::async_trait;

/// Filters for the backend's `GET /trainer` listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainerQuery {
    pub page: PageQuery,
    pub is_active: Option<bool>,
}

impl TrainerQuery {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        self.page.push_pairs(&mut pairs);
        if let Some(is_active) = self.is_active {
            pairs.push(("isActive", is_active.to_string()));
        }
        pairs
    }
}

/// Gateway interface for the backend's `/trainer` endpoints.
///
/// # Implementations
///
/// - [`crate::infrastructure::backend::HttpTrainerGateway`] - REST implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TrainerGateway: Send + Sync {
    /// Lists trainers matching the query.
    async fn list(&self, access: &str, query: &TrainerQuery) -> Result<Page<Trainer>, AppError>;

    /// Fetches a single trainer.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown ids.
    async fn get(&self, access: &str, id: &str) -> Result<Trainer, AppError>;

    /// Lists the members assigned to a trainer.
    async fn members(
        &self,
        access: &str,
        trainer_id: &str,
        page: &PageQuery,
    ) -> Result<Page<Member>, AppError>;
}

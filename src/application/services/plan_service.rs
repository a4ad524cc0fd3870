//! Plan catalog service.

use std::sync::Arc;

use crate::application::services::normalized;
use crate::domain::entities::{NewPlan, Plan, UpdatePlan};
use crate::domain::gateways::{PlanGateway, PlanQuery};
use crate::domain::page::Page;
use crate::error::AppError;
use validator::Validate;

pub struct PlanService<G: PlanGateway> {
    gateway: Arc<G>,
}

impl<G: PlanGateway> PlanService<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Active plans for the marketing pages; no authentication.
    pub async fn list_public(&self) -> Result<Vec<Plan>, AppError> {
        self.gateway.list_public().await
    }

    /// Lists plans with paging defaults applied.
    pub async fn list(&self, access: &str, query: &PlanQuery) -> Result<Page<Plan>, AppError> {
        let query = PlanQuery {
            page: normalized(&query.page),
            ..query.clone()
        };
        self.gateway.list(access, &query).await
    }

    /// Fetches a single plan.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown ids.
    pub async fn get(&self, access: &str, id: &str) -> Result<Plan, AppError> {
        self.gateway.get(access, id).await
    }

    /// Validates and creates a plan.
    pub async fn create(&self, access: &str, plan: &NewPlan) -> Result<Plan, AppError> {
        plan.validate().map_err(AppError::from_validation)?;
        self.gateway.create(access, plan).await
    }

    /// Validates and applies a partial update.
    pub async fn update(
        &self,
        access: &str,
        id: &str,
        update: &UpdatePlan,
    ) -> Result<Plan, AppError> {
        update.validate().map_err(AppError::from_validation)?;
        self.gateway.update(access, id, update).await
    }

    /// Activates or retires a plan.
    pub async fn set_active(
        &self,
        access: &str,
        id: &str,
        is_active: bool,
    ) -> Result<Plan, AppError> {
        self.gateway.set_active(access, id, is_active).await
    }
}

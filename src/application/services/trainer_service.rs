//! Trainer listing service.

use std::sync::Arc;

use crate::application::services::normalized;
use crate::domain::entities::{Member, Trainer};
use crate::domain::gateways::{PageQuery, TrainerGateway, TrainerQuery};
use crate::domain::page::Page;
use crate::error::AppError;

pub struct TrainerService<G: TrainerGateway> {
    gateway: Arc<G>,
}

impl<G: TrainerGateway> TrainerService<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Lists trainers with paging defaults applied.
    pub async fn list(
        &self,
        access: &str,
        query: &TrainerQuery,
    ) -> Result<Page<Trainer>, AppError> {
        let query = TrainerQuery {
            page: normalized(&query.page),
            ..query.clone()
        };
        self.gateway.list(access, &query).await
    }

    /// Fetches a single trainer.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown ids.
    pub async fn get(&self, access: &str, id: &str) -> Result<Trainer, AppError> {
        self.gateway.get(access, id).await
    }

    /// Lists the members assigned to a trainer.
    pub async fn members(
        &self,
        access: &str,
        trainer_id: &str,
        page: &PageQuery,
    ) -> Result<Page<Member>, AppError> {
        self.gateway
            .members(access, trainer_id, &normalized(page))
            .await
    }
}

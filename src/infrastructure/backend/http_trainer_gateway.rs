//! REST implementation of the trainer gateway.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::entities::{Member, Trainer};
use crate::domain::gateways::{PageQuery, TrainerGateway, TrainerQuery};
use crate::domain::page::Page;
use crate::error::AppError;
use crate::infrastructure::backend::client::BackendClient;

/// Trainer gateway over the backend's `/trainer` endpoints.
pub struct HttpTrainerGateway {
    client: Arc<BackendClient>,
}

impl HttpTrainerGateway {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TrainerGateway for HttpTrainerGateway {
    async fn list(&self, access: &str, query: &TrainerQuery) -> Result<Page<Trainer>, AppError> {
        let envelope = self
            .client
            .get_json::<Vec<Trainer>>("/trainer", &query.to_pairs(), Some(access))
            .await?;
        Ok(envelope.into_page()?)
    }

    async fn get(&self, access: &str, id: &str) -> Result<Trainer, AppError> {
        let envelope = self
            .client
            .get_json::<Trainer>(&format!("/trainer/{id}"), &[], Some(access))
            .await?;
        Ok(envelope.into_data()?)
    }

    async fn members(
        &self,
        access: &str,
        trainer_id: &str,
        page: &PageQuery,
    ) -> Result<Page<Member>, AppError> {
        let mut pairs = Vec::new();
        page.push_pairs(&mut pairs);

        let envelope = self
            .client
            .get_json::<Vec<Member>>(
                &format!("/trainer/{trainer_id}/members"),
                &pairs,
                Some(access),
            )
            .await?;
        Ok(envelope.into_page()?)
    }
}

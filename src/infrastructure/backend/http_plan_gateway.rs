//! REST implementation of the plan gateway.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::{NewPlan, Plan, UpdatePlan};
use crate::domain::gateways::{PlanGateway, PlanQuery};
use crate::domain::page::Page;
use crate::error::AppError;
use crate::infrastructure::backend::client::BackendClient;

/// Plan gateway over the backend's `/plan` endpoints.
pub struct HttpPlanGateway {
    client: Arc<BackendClient>,
}

impl HttpPlanGateway {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PlanGateway for HttpPlanGateway {
    async fn list_public(&self) -> Result<Vec<Plan>, AppError> {
        // The marketing pages only ever show purchasable plans.
        let envelope = self
            .client
            .get_json::<Vec<Plan>>("/plan", &[("isActive", "true".to_string())], None)
            .await?;
        Ok(envelope.into_data()?)
    }

    async fn list(&self, access: &str, query: &PlanQuery) -> Result<Page<Plan>, AppError> {
        let envelope = self
            .client
            .get_json::<Vec<Plan>>("/plan", &query.to_pairs(), Some(access))
            .await?;
        Ok(envelope.into_page()?)
    }

    async fn get(&self, access: &str, id: &str) -> Result<Plan, AppError> {
        let envelope = self
            .client
            .get_json::<Plan>(&format!("/plan/{id}"), &[], Some(access))
            .await?;
        Ok(envelope.into_data()?)
    }

    async fn create(&self, access: &str, plan: &NewPlan) -> Result<Plan, AppError> {
        let envelope = self
            .client
            .post_json::<_, Plan>("/plan", plan, Some(access))
            .await?;
        Ok(envelope.into_data()?)
    }

    async fn update(&self, access: &str, id: &str, update: &UpdatePlan) -> Result<Plan, AppError> {
        let envelope = self
            .client
            .patch_json::<_, Plan>(&format!("/plan/{id}"), update, Some(access))
            .await?;
        Ok(envelope.into_data()?)
    }

    async fn set_active(&self, access: &str, id: &str, is_active: bool) -> Result<Plan, AppError> {
        let envelope = self
            .client
            .patch_json::<_, Plan>(
                &format!("/plan/{id}/active"),
                &json!({ "isActive": is_active }),
                Some(access),
            )
            .await?;
        Ok(envelope.into_data()?)
    }
}

//! REST implementation of the meta gateway.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::entities::{DashboardStats, Member, Payment};
use crate::domain::gateways::MetaGateway;
use crate::error::AppError;
use crate::infrastructure::backend::client::BackendClient;

/// Meta gateway over the backend's `/meta` endpoints.
pub struct HttpMetaGateway {
    client: Arc<BackendClient>,
}

impl HttpMetaGateway {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MetaGateway for HttpMetaGateway {
    async fn dashboard_stats(&self, access: &str) -> Result<DashboardStats, AppError> {
        let envelope = self
            .client
            .get_json::<DashboardStats>("/meta/dashboard", &[], Some(access))
            .await?;
        Ok(envelope.into_data()?)
    }

    async fn recent_payments(&self, access: &str, limit: u32) -> Result<Vec<Payment>, AppError> {
        let envelope = self
            .client
            .get_json::<Vec<Payment>>(
                "/meta/recent-payments",
                &[("limit", limit.to_string())],
                Some(access),
            )
            .await?;
        Ok(envelope.into_data()?)
    }

    async fn recent_members(&self, access: &str, limit: u32) -> Result<Vec<Member>, AppError> {
        let envelope = self
            .client
            .get_json::<Vec<Member>>(
                "/meta/recent-members",
                &[("limit", limit.to_string())],
                Some(access),
            )
            .await?;
        Ok(envelope.into_data()?)
    }
}

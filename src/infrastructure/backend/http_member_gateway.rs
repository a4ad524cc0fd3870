//! REST implementation of the member gateway.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::entities::{Member, NewMember, UpdateMember};
use crate::domain::gateways::{MemberGateway, MemberQuery};
use crate::domain::page::Page;
use crate::error::AppError;
use crate::infrastructure::backend::client::BackendClient;

/// Member gateway over the backend's `/member` endpoints.
pub struct HttpMemberGateway {
    client: Arc<BackendClient>,
}

impl HttpMemberGateway {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MemberGateway for HttpMemberGateway {
    async fn list(&self, access: &str, query: &MemberQuery) -> Result<Page<Member>, AppError> {
        let envelope = self
            .client
            .get_json::<Vec<Member>>("/member", &query.to_pairs(), Some(access))
            .await?;
        Ok(envelope.into_page()?)
    }

    async fn get(&self, access: &str, id: &str) -> Result<Member, AppError> {
        let envelope = self
            .client
            .get_json::<Member>(&format!("/member/{id}"), &[], Some(access))
            .await?;
        Ok(envelope.into_data()?)
    }

    async fn create(&self, access: &str, member: &NewMember) -> Result<Member, AppError> {
        let envelope = self
            .client
            .post_json::<_, Member>("/member", member, Some(access))
            .await?;
        Ok(envelope.into_data()?)
    }

    async fn update(
        &self,
        access: &str,
        id: &str,
        update: &UpdateMember,
    ) -> Result<Member, AppError> {
        let envelope = self
            .client
            .patch_json::<_, Member>(&format!("/member/{id}"), update, Some(access))
            .await?;
        Ok(envelope.into_data()?)
    }

    async fn delete(&self, access: &str, id: &str) -> Result<(), AppError> {
        let envelope = self
            .client
            .delete_json::<serde_json::Value>(&format!("/member/{id}"), Some(access))
            .await?;
        envelope.ensure_success()?;
        Ok(())
    }
}

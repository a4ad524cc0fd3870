//! REST implementation of the user gateway.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::User;
use crate::domain::gateways::{UserGateway, UserQuery};
use crate::domain::page::Page;
use crate::error::AppError;
use crate::infrastructure::backend::client::BackendClient;

/// User gateway over the backend's `/user` endpoints.
pub struct HttpUserGateway {
    client: Arc<BackendClient>,
}

impl HttpUserGateway {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UserGateway for HttpUserGateway {
    async fn list(&self, access: &str, query: &UserQuery) -> Result<Page<User>, AppError> {
        let envelope = self
            .client
            .get_json::<Vec<User>>("/user", &query.to_pairs(), Some(access))
            .await?;
        Ok(envelope.into_page()?)
    }

    async fn set_active(&self, access: &str, id: &str, is_active: bool) -> Result<User, AppError> {
        let envelope = self
            .client
            .patch_json::<_, User>(
                &format!("/user/{id}/active"),
                &json!({ "isActive": is_active }),
                Some(access),
            )
            .await?;
        Ok(envelope.into_data()?)
    }
}

//! Portal account administration service.

use std::sync::Arc;

use crate::application::services::normalized;
use crate::domain::entities::User;
use crate::domain::gateways::{UserGateway, UserQuery};
use crate::domain::page::Page;
use crate::error::AppError;

pub struct UserService<G: UserGateway> {
    gateway: Arc<G>,
}

impl<G: UserGateway> UserService<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Lists portal accounts with paging defaults applied.
    pub async fn list(&self, access: &str, query: &UserQuery) -> Result<Page<User>, AppError> {
        let query = UserQuery {
            page: normalized(&query.page),
            ..query.clone()
        };
        self.gateway.list(access, &query).await
    }

    /// Enables or disables an account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown ids.
    pub async fn set_active(
        &self,
        access: &str,
        id: &str,
        is_active: bool,
    ) -> Result<User, AppError> {
        self.gateway.set_active(access, id, is_active).await
    }
}

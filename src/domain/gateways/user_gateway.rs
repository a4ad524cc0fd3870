//! Gateway trait for portal account administration.

use crate::domain::entities::{Role, User};
use crate::domain::gateways::PageQuery;
use crate::domain::page::Page;
use crate::error::AppError;
use async_trait::async_trait;

/// Filters for the backend's `GET /user` listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserQuery {
    pub page: PageQuery,
    pub role: Option<Role>,
    pub is_active: Option<bool>,
}

impl UserQuery {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        self.page.push_pairs(&mut pairs);
        if let Some(role) = self.role {
            pairs.push(("role", role.as_str().to_string()));
        }
        if let Some(is_active) = self.is_active {
            pairs.push(("isActive", is_active.to_string()));
        }
        pairs
    }
}

/// Gateway interface for the backend's `/user` endpoints.
///
/// # Implementations
///
/// - [`crate::infrastructure::backend::HttpUserGateway`] - REST implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserGateway: Send + Sync {
    /// Lists portal accounts matching the query.
    async fn list(&self, access: &str, query: &UserQuery) -> Result<Page<User>, AppError>;

    /// Enables or disables an account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown ids.
    async fn set_active(&self, access: &str, id: &str, is_active: bool) -> Result<User, AppError>;
}

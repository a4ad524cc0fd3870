//! Gateway trait definitions for the domain layer.
//!
//! This module defines the interfaces (traits) that abstract the remote
//! backend API, which is this system's only data store. The traits follow
//! the Repository pattern: the domain states what operations exist, the
//! infrastructure layer says how they reach the wire.
//!
//! # Architecture
//!
//! - Traits define the contract for remote operations
//! - Implementations live in `crate::infrastructure::backend`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Gateways
//!
//! - [`AuthGateway`] - Login, logout, token refresh, current account
//! - [`MemberGateway`] - Member CRUD and trainer assignment
//! - [`TrainerGateway`] - Trainer listings and rosters
//! - [`PlanGateway`] - Plan catalog and management
//! - [`PaymentGateway`] - Payment history
//! - [`UserGateway`] - Portal account administration
//! - [`MetaGateway`] - Dashboard aggregates

pub mod auth_gateway;
pub mod member_gateway;
pub mod meta_gateway;
pub mod payment_gateway;
pub mod plan_gateway;
pub mod trainer_gateway;
pub mod user_gateway;

pub use auth_gateway::{AuthGateway, TokenPair};
pub use member_gateway::{MemberGateway, MemberQuery};
pub use meta_gateway::MetaGateway;
pub use payment_gateway::{PaymentGateway, PaymentQuery};
pub use plan_gateway::{PlanGateway, PlanQuery};
pub use trainer_gateway::{TrainerGateway, TrainerQuery};
pub use user_gateway::{UserGateway, UserQuery};

#[cfg(test)]
pub use auth_gateway::MockAuthGateway;
#[cfg(test)]
pub use member_gateway::MockMemberGateway;
#[cfg(test)]
pub use meta_gateway::MockMetaGateway;
#[cfg(test)]
pub use payment_gateway::MockPaymentGateway;
#[cfg(test)]
pub use plan_gateway::MockPlanGateway;
#[cfg(test)]
pub use trainer_gateway::MockTrainerGateway;
#[cfg(test)]
pub use user_gateway::MockUserGateway;

/// Common list-query parameters shared by every paginated endpoint.
///
/// Serialized as `page`, `limit` and `search` query-string pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
}

impl PageQuery {
    pub fn new(page: Option<u32>, limit: Option<u32>, search: Option<String>) -> Self {
        Self {
            page,
            limit,
            // Blank search boxes submit empty strings; treat them as absent.
            search: search.filter(|s| !s.trim().is_empty()),
        }
    }

    /// Appends the present parameters to a query-pair list.
    pub fn push_pairs(&self, pairs: &mut Vec<(&'static str, String)>) {
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(ref search) = self.search {
            pairs.push(("search", search.clone()));
        }
    }
}

//! Gateway trait for member management.

use crate::domain::entities::{Member, MemberStatus, NewMember, UpdateMember};
use crate::domain::gateways::PageQuery;
use crate::domain::page::Page;
use crate::error::AppError;
use async_trait::async_trait;

/// Filters for the backend's `GET /member` listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberQuery {
    pub page: PageQuery,
    pub status: Option<MemberStatus>,
    pub plan_id: Option<String>,
    pub trainer_id: Option<String>,
    pub sort_by: Option<String>,
    /// `asc` or `desc`; only meaningful together with `sort_by`.
    pub order: Option<String>,
}

impl MemberQuery {
    /// Query-string pairs in the backend's parameter vocabulary.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        self.page.push_pairs(&mut pairs);
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        if let Some(ref plan_id) = self.plan_id {
            pairs.push(("planId", plan_id.clone()));
        }
        if let Some(ref trainer_id) = self.trainer_id {
            pairs.push(("trainerId", trainer_id.clone()));
        }
        if let Some(ref sort_by) = self.sort_by {
            pairs.push(("sortBy", sort_by.clone()));
        }
        if let Some(ref order) = self.order {
            pairs.push(("order", order.clone()));
        }
        pairs
    }
}

/// Gateway interface for the backend's `/member` endpoints.
///
/// # Implementations
///
/// - [`crate::infrastructure::backend::HttpMemberGateway`] - REST implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemberGateway: Send + Sync {
    /// Lists members matching the query, one page at a time.
    async fn list(&self, access: &str, query: &MemberQuery) -> Result<Page<Member>, AppError>;

    /// Fetches a single member.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown ids.
    async fn get(&self, access: &str, id: &str) -> Result<Member, AppError>;

    /// Creates a member and returns the backend's canonical record.
    async fn create(&self, access: &str, member: &NewMember) -> Result<Member, AppError>;

    /// Applies a partial update and returns the refreshed record.
    async fn update(
        &self,
        access: &str,
        id: &str,
        update: &UpdateMember,
    ) -> Result<Member, AppError>;

    /// Removes a member.
    async fn delete(&self, access: &str, id: &str) -> Result<(), AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_pairs_use_backend_parameter_names() {
        let query = MemberQuery {
            page: PageQuery::new(Some(2), Some(10), Some("ann".to_string())),
            status: Some(MemberStatus::Active),
            plan_id: Some("p1".to_string()),
            trainer_id: None,
            sort_by: Some("joinedAt".to_string()),
            order: Some("desc".to_string()),
        };

        let pairs = query.to_pairs();
        assert_eq!(
            pairs,
            vec![
                ("page", "2".to_string()),
                ("limit", "10".to_string()),
                ("search", "ann".to_string()),
                ("status", "active".to_string()),
                ("planId", "p1".to_string()),
                ("sortBy", "joinedAt".to_string()),
                ("order", "desc".to_string()),
            ]
        );
    }
}

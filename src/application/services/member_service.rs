//! Member management service.

use std::sync::Arc;

use crate::application::services::normalized;
use crate::domain::entities::{Member, NewMember, UpdateMember};
use crate::domain::gateways::{MemberGateway, MemberQuery};
use crate::domain::page::Page;
use crate::error::AppError;
use validator::Validate;

/// Service for member listings and lifecycle operations.
///
/// Validation happens here, before any bytes reach the backend; the backend
/// remains the authority and may still reject what passes locally.
pub struct MemberService<G: MemberGateway> {
    gateway: Arc<G>,
}

impl<G: MemberGateway> MemberService<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Lists members with paging defaults applied.
    pub async fn list(&self, access: &str, query: &MemberQuery) -> Result<Page<Member>, AppError> {
        let query = MemberQuery {
            page: normalized(&query.page),
            ..query.clone()
        };
        self.gateway.list(access, &query).await
    }

    /// Fetches a single member.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown ids.
    pub async fn get(&self, access: &str, id: &str) -> Result<Member, AppError> {
        self.gateway.get(access, id).await
    }

    /// Validates and creates a member.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] listing the failed fields; the
    /// gateway is not contacted in that case.
    pub async fn create(&self, access: &str, member: &NewMember) -> Result<Member, AppError> {
        member.validate().map_err(AppError::from_validation)?;
        self.gateway.create(access, member).await
    }

    /// Validates and applies a partial update.
    pub async fn update(
        &self,
        access: &str,
        id: &str,
        update: &UpdateMember,
    ) -> Result<Member, AppError> {
        update.validate().map_err(AppError::from_validation)?;
        self.gateway.update(access, id, update).await
    }

    /// Removes a member.
    pub async fn delete(&self, access: &str, id: &str) -> Result<(), AppError> {
        self.gateway.delete(access, id).await
    }
}

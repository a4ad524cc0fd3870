//! Business logic services for the application layer.
//!
//! Each service is generic over its gateway trait so unit tests can swap in
//! mocks; the concrete wiring happens in [`crate::server`].

pub mod auth_service;
pub mod member_service;
pub mod meta_service;
pub mod payment_service;
pub mod plan_service;
pub mod trainer_service;
pub mod user_service;

pub use auth_service::{AuthService, run_refresh_worker};
pub use member_service::MemberService;
pub use meta_service::{MetaService, Overview};
pub use payment_service::PaymentService;
pub use plan_service::PlanService;
pub use trainer_service::TrainerService;
pub use user_service::UserService;

use crate::domain::gateways::PageQuery;

pub(crate) const DEFAULT_PAGE_SIZE: u32 = 10;
pub(crate) const MAX_PAGE_SIZE: u32 = 100;

/// Fills in paging defaults and clamps the page size before a query goes to
/// the backend.
pub(crate) fn normalized(page: &PageQuery) -> PageQuery {
    PageQuery {
        page: Some(page.page.unwrap_or(1).max(1)),
        limit: Some(page.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)),
        search: page.search.clone().filter(|s| !s.trim().is_empty()),
    }
}

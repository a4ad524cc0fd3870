//! # gym-portal
//!
//! A server-rendered gym management portal built with Axum and Askama.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Entities mirroring the backend API and gateway traits
//! - **Application Layer** ([`application`]) - Sessions, token refresh, and service orchestration
//! - **Infrastructure Layer** ([`infrastructure`]) - HTTP gateways to the external backend
//! - **Web Layer** ([`web`]) - HTML dashboards, the generic table module, and session middleware
//! - **API Layer** ([`api`]) - Operational endpoints and shared HTTP middleware
//!
//! The portal owns no domain data: members, trainers, plans, payments and
//! users live in an external backend reached over REST. Every page render
//! forwards to that backend with the caller's access token and reshapes the
//! uniform response envelope into typed values.
//!
//! ## Features
//!
//! - Role-based dashboards (super-admin, admin, trainer, member)
//! - Generic table rendering with client- and server-side pagination
//! - Cookie sessions with background access-token refresh
//! - Rate limiting and observability
//!
//! ## Quick Start
//!
//! ```bash
//! # Set required environment variables
//! export BACKEND_API_URL="https://api.gym.example.com"
//! export SESSION_SIGNING_SECRET="change-me"
//!
//! # Start the service
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AuthService, MemberService, PlanService};
    pub use crate::application::session::{MemoryTokenStore, SessionId, TokenStore};
    pub use crate::domain::entities::{Member, Plan, Role, User};
    pub use crate::domain::page::{Page, PageMeta};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}

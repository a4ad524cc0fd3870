//! HTTP access to the external gym backend.
//!
//! # Modules
//!
//! - [`client`] - The shared request wrapper ([`BackendClient`]) handling
//!   auth replay, envelope decoding, and `Set-Cookie` token capture
//! - [`envelope`] - The backend's uniform response envelope
//! - [`error`] - Wire-level error taxonomy and its mapping into [`crate::error::AppError`]
//! - One `http_*_gateway` module per domain gateway trait

pub mod client;
pub mod envelope;
pub mod error;

pub mod http_auth_gateway;
pub mod http_member_gateway;
pub mod http_meta_gateway;
pub mod http_payment_gateway;
pub mod http_plan_gateway;
pub mod http_trainer_gateway;
pub mod http_user_gateway;

pub use client::BackendClient;
pub use envelope::Envelope;
pub use error::GatewayError;

pub use http_auth_gateway::HttpAuthGateway;
pub use http_member_gateway::HttpMemberGateway;
pub use http_meta_gateway::HttpMetaGateway;
pub use http_payment_gateway::HttpPaymentGateway;
pub use http_plan_gateway::HttpPlanGateway;
pub use http_trainer_gateway::HttpTrainerGateway;
pub use http_user_gateway::HttpUserGateway;

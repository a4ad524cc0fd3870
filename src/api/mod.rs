//! Operational API surface and shared HTTP middleware.
//!
//! The portal deliberately exposes no JSON CRUD API of its own - the
//! backend owns that. What lives here:
//!
//! - [`handlers`] - `/health` component checks
//! - [`dto`] - response shapes for the above
//! - [`middleware`] - request tracing and rate limiting shared by all routes

pub mod dto;
pub mod handlers;
pub mod middleware;

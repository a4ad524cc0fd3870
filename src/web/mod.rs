//! Web layer for the browser-facing portal.
//!
//! Provides the marketing pages and the role-based dashboards, all rendered
//! server-side with Askama templates.
//!
//! # Modules
//!
//! - [`handlers`] - Template rendering handlers
//! - [`middleware`] - Session-cookie middleware
//! - [`routes`] - Page route configuration
//! - [`table`] - Generic table rendering (client- and server-side pagination)

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod table;

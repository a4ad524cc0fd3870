//! Core domain types and gateway traits.
//!
//! The domain layer contains:
//! - [`entities`] - Typed mirrors of the backend API's response shapes
//! - [`gateways`] - Trait definitions for remote operations (implemented in infrastructure)
//! - [`page`] - Pagination descriptor and paged result sets

pub mod entities;
pub mod gateways;
pub mod page;

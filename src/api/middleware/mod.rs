//! HTTP middleware shared by all route groups.

pub mod rate_limit;
pub mod tracing;

//! Infrastructure layer: everything that touches the wire.
//!
//! The portal's only store is the external backend API; [`backend`] holds
//! the HTTP client and the gateway implementations over it.

pub mod backend;

//! Middleware Module
//!
//! Request-level middleware. Currently only bearer-token authentication.

pub mod auth;

pub use auth::{auth_middleware, AuthUser};

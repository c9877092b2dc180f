//! HTTP handlers for authentication endpoints.

pub mod login;
pub mod me;
pub mod profile;
pub mod register;
pub mod types;

//! API Error Module
//!
//! This module defines the error taxonomy shared by every HTTP handler and
//! repository in the service, and the conversion of those errors into JSON
//! HTTP responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports
//! ├── types.rs      - Error type definitions and status mapping
//! └── conversion.rs - IntoResponse / From implementations
//! ```
//!
//! # Taxonomy
//!
//! - `BadRequest` - malformed id, body, or enum value
//! - `Unauthorized` - missing/invalid/expired token
//! - `Forbidden` - ownership or membership violation
//! - `NotFound` - missing document
//! - `Conflict` - duplicate review / duplicate registration
//! - `Internal` - store failure, encoding failure
//!
//! Handlers fail fast with the first applicable error; there are no retries
//! and no partial responses on error.

pub mod conversion;
pub mod types;

pub use types::ApiError;

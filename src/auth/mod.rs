//! Authentication Module
//!
//! User accounts, password verification, and signed session tokens.
//!
//! ```text
//! auth/
//! ├── mod.rs       - Module exports
//! ├── users.rs     - User model and store operations
//! ├── sessions.rs  - Token issuance and validation
//! └── handlers/    - HTTP handlers
//!     ├── mod.rs
//!     ├── types.rs    - Request/response types
//!     ├── register.rs - POST /api/auth/register
//!     ├── login.rs    - POST /api/auth/login
//!     ├── me.rs       - GET /api/auth/me
//!     └── profile.rs  - GET|PUT /api/auth/profile
//! ```
//!
//! # Flow
//!
//! 1. **Register**: email + display name + password, password stored only as
//!    a bcrypt hash.
//! 2. **Login**: credentials verified, signed token returned. Invalid
//!    credentials answer 401 without revealing which part was wrong.
//! 3. **Protected routes**: the auth middleware verifies the bearer token
//!    and attaches the caller's identity to the request.

pub mod handlers;
pub mod sessions;
pub mod users;

pub use handlers::login::login;
pub use handlers::me::get_me;
pub use handlers::profile::{get_profile, update_profile};
pub use handlers::register::register;

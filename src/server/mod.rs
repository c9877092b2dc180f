//! Server Module
//!
//! Configuration loading, shared application state, and server
//! initialization (store connection, migrations, router construction).
//!
//! ```text
//! server/
//! ├── mod.rs    - Module exports
//! ├── config.rs - Environment-driven configuration
//! ├── state.rs  - AppState and FromRef implementations
//! └── init.rs   - Store connection and app construction
//! ```

pub mod config;
pub mod init;
pub mod state;

pub use config::{AuthConfig, ServerConfig};
pub use state::AppState;

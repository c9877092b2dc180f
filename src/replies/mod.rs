//! Post replies with like toggling.
//!
//! ## Module Structure
//!
//! ```text
//! replies/
//! ├── mod.rs       - Module exports
//! ├── db.rs        - Reply model, joined views, store operations
//! └── handlers.rs  - HTTP handlers for /api/reply
//! ```

pub mod db;
pub mod handlers;

pub use handlers::{create_reply, delete_reply, post_replies, toggle_like_reply};

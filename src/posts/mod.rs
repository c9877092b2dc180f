//! Club posts: the feed content, gated on club membership.
//!
//! ## Module Structure
//!
//! ```text
//! posts/
//! ├── mod.rs       - Module exports
//! ├── db.rs        - Post model, feed views, store operations
//! └── handlers.rs  - HTTP handlers for /api/post
//! ```

pub mod db;
pub mod handlers;

pub use handlers::{club_posts, create_post, delete_post, random_posts, toggle_like_post};

//! Post comments with like toggling.
//!
//! ## Module Structure
//!
//! ```text
//! comments/
//! ├── mod.rs       - Module exports
//! ├── db.rs        - Comment model and store operations
//! └── handlers.rs  - HTTP handlers for /api/comment
//! ```

pub mod db;
pub mod handlers;

pub use handlers::{create_comment, delete_comment, post_comments, toggle_like_comment};

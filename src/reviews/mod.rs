//! Book reviews: one per (user, book), feeding the book's aggregate rating.
//!
//! ## Module Structure
//!
//! ```text
//! reviews/
//! ├── mod.rs       - Module exports
//! ├── db.rs        - Review model, store operations, rating recompute
//! └── handlers.rs  - HTTP handlers for /api/reviews
//! ```

pub mod db;
pub mod handlers;

pub use handlers::{create_review, delete_review, list_reviews, update_review, user_reviews};

//! Reading-status marks: one per (user, book), with a closed status set.
//!
//! ## Module Structure
//!
//! ```text
//! marks/
//! ├── mod.rs           - Module exports
//! ├── db.rs            - MarkStatus, Mark model, upsert and store operations
//! ├── achievements.rs  - Read-count achievement observer
//! └── handlers.rs      - HTTP handlers for /api/marks
//! ```

pub mod achievements;
pub mod db;
pub mod handlers;

pub use db::MarkStatus;
pub use handlers::{create_mark, delete_mark, get_mark_by_book, update_mark, user_marks};

//! Book clubs: groups with an owner and a member set, hosting posts.
//!
//! The owner is inserted into the member set at creation and can never be
//! removed through `leave`.
//!
//! ## Module Structure
//!
//! ```text
//! clubs/
//! ├── mod.rs       - Module exports
//! ├── db.rs        - Club model, membership set, store operations
//! └── handlers.rs  - HTTP handlers for /api/club
//! ```

pub mod db;
pub mod handlers;

pub use db::is_club_member;
pub use handlers::{
    check_membership, create_club, delete_club, get_club, join_club, leave_club, list_clubs,
    recommended_clubs, update_club, user_clubs,
};

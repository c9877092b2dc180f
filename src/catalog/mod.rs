//! Book catalog: the `books` resource and its composite read-models.
//!
//! ## Module Structure
//!
//! ```text
//! catalog/
//! ├── mod.rs        - Module exports
//! ├── books.rs      - Book model and store operations
//! ├── views.rs      - Composite view assembly (author/category/genres/tags)
//! └── handlers.rs   - HTTP handlers for /api/books
//! ```

pub mod books;
pub mod handlers;
pub mod views;

pub use handlers::{
    create_book, delete_book, get_book, list_books, recommended_books, search_books, update_book,
};

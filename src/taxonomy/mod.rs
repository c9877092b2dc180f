//! Catalog taxonomy: authors, categories, genres, and tags.
//!
//! All four resources are flat named entities with the same CRUD shape;
//! they share one store implementation parameterized by [`Kind`] and thin
//! per-resource handlers.
//!
//! ## Module Structure
//!
//! ```text
//! taxonomy/
//! ├── mod.rs        - Module exports and the Kind enum
//! ├── store.rs      - Shared named-entity store operations
//! └── handlers.rs   - HTTP handlers for the four route groups
//! ```

pub mod handlers;
pub mod store;

/// The four named-entity resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Author,
    Category,
    Genre,
    Tag,
}

impl Kind {
    /// Store table backing this resource.
    pub fn table(self) -> &'static str {
        match self {
            Kind::Author => "authors",
            Kind::Category => "categories",
            Kind::Genre => "genres",
            Kind::Tag => "tags",
        }
    }

    /// Human label used in response messages.
    pub fn label(self) -> &'static str {
        match self {
            Kind::Author => "Author",
            Kind::Category => "Category",
            Kind::Genre => "Genre",
            Kind::Tag => "Tag",
        }
    }
}

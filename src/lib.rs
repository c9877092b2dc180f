//! Bookwarm - Main Library
//!
//! Bookwarm is a social book-cataloguing service: a shared catalog of
//! books, authors, categories, genres and tags, plus the social layer
//! around it (book clubs, reading marks, reviews, posts, comments,
//! replies, likes).
//!
//! # Module Structure
//!
//! - **`server`** - Configuration, shared state, startup
//! - **`routes`** - Router assembly and the `/api` route table
//! - **`middleware`** - JWT extraction and the `AuthUser` extractor
//! - **`auth`** - Registration, login, profile handlers
//! - **`catalog`** - Books, composite book views, recommendations
//! - **`taxonomy`** - Authors, categories, genres, tags (named entities)
//! - **`clubs`** - Book clubs and membership
//! - **`marks`** - Per-user reading status, achievement checks
//! - **`reviews`** - Ratings, comments, aggregate book rating
//! - **`posts`** / **`comments`** / **`replies`** - Club discussion threads
//! - **`likes`** - Shared like-set helper for the discussion tables
//! - **`uploads`** - Multipart image storage
//! - **`error`** - `ApiError` and conversions into HTTP responses
//!
//! # Usage
//!
//! ```rust,no_run
//! use bookwarm::server::config::ServerConfig;
//! use bookwarm::server::init::{connect_database, create_app};
//!
//! # async fn example() -> Result<(), sqlx::Error> {
//! let config = ServerConfig::from_env();
//! let pool = connect_database(&config.database_url).await?;
//! let app = create_app(pool, &config);
//! // Serve `app` with axum::serve
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! Handlers return `Result<_, ApiError>`; `ApiError` carries the HTTP
//! status and serializes as `{"error": "..."}`. Store errors convert via
//! `From<sqlx::Error>`, so `?` is enough at the call sites.

pub mod auth;
pub mod catalog;
pub mod clubs;
pub mod comments;
pub mod error;
pub mod likes;
pub mod marks;
pub mod middleware;
pub mod posts;
pub mod replies;
pub mod reviews;
pub mod routes;
pub mod server;
pub mod taxonomy;
pub mod uploads;

#[cfg(test)]
pub mod test_support;

//! Shared fixtures for unit tests inside the crate.
//!
//! Integration tests under `tests/` carry their own copy in
//! `tests/common`; this module only exists for `#[cfg(test)]` modules.

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

/// In-memory store with the full schema applied.
///
/// A single connection keeps the `:memory:` database alive and shared for
/// the whole test.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("failed to run migrations");

    pool
}

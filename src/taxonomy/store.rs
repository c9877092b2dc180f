/**
 * Named-Entity Store Operations
 *
 * One implementation for authors, categories, genres, and tags; the table
 * is selected by `Kind`. Table names are compile-time constants, never
 * user input.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::taxonomy::Kind;

/// A flat named entity.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct NamedEntity {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// All entities of one kind, alphabetical.
pub async fn list(pool: &SqlitePool, kind: Kind) -> Result<Vec<NamedEntity>, sqlx::Error> {
    let sql = format!("SELECT * FROM {} ORDER BY name", kind.table());
    sqlx::query_as::<_, NamedEntity>(&sql).fetch_all(pool).await
}

/// Insert a new entity.
pub async fn create(
    pool: &SqlitePool,
    kind: Kind,
    name: &str,
) -> Result<NamedEntity, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let sql = format!(
        "INSERT INTO {} (id, name, created_at, updated_at) VALUES (?, ?, ?, ?)",
        kind.table()
    );
    sqlx::query(&sql)
        .bind(id)
        .bind(name)
        .bind(now)
        .bind(now)
        .execute(pool)
        .await?;

    Ok(NamedEntity {
        id,
        name: name.to_string(),
        created_at: now,
        updated_at: now,
    })
}

/// Rename an entity. Returns the updated row, or `None` if it does not exist.
pub async fn update(
    pool: &SqlitePool,
    kind: Kind,
    id: Uuid,
    name: &str,
) -> Result<Option<NamedEntity>, sqlx::Error> {
    let sql = format!(
        "UPDATE {} SET name = ?, updated_at = ? WHERE id = ?",
        kind.table()
    );
    let result = sqlx::query(&sql)
        .bind(name)
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    let sql = format!("SELECT * FROM {} WHERE id = ?", kind.table());
    sqlx::query_as::<_, NamedEntity>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Delete an entity. Returns `false` if it does not exist.
pub async fn delete(pool: &SqlitePool, kind: Kind, id: Uuid) -> Result<bool, sqlx::Error> {
    let sql = format!("DELETE FROM {} WHERE id = ?", kind.table());
    let result = sqlx::query(&sql).bind(id).execute(pool).await?;
    Ok(result.rows_affected() > 0)
}

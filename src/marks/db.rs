/**
 * Mark Model and Store Operations
 *
 * A mark records a user's reading status for a book. The store enforces
 * one mark per (user, book); `upsert_mark` rides that constraint with
 * `ON CONFLICT .. DO UPDATE`, so concurrent creates for the same pair
 * collapse to a single row.
 */

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::catalog::books::{self, Book};

/// The closed set of reading statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum MarkStatus {
    WantToRead,
    NowReading,
    Read,
    DidNotFinish,
}

impl MarkStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            MarkStatus::WantToRead => "want_to_read",
            MarkStatus::NowReading => "now_reading",
            MarkStatus::Read => "read",
            MarkStatus::DidNotFinish => "did_not_finish",
        }
    }
}

impl fmt::Display for MarkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarkStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "want_to_read" => Ok(MarkStatus::WantToRead),
            "now_reading" => Ok(MarkStatus::NowReading),
            "read" => Ok(MarkStatus::Read),
            "did_not_finish" => Ok(MarkStatus::DidNotFinish),
            _ => Err(()),
        }
    }
}

/// A mark row.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Mark {
    pub id: Uuid,
    pub book_id: Uuid,
    pub user_id: Uuid,
    pub status: MarkStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A mark joined with its book; a dangling book reference yields `None`.
#[derive(Debug, Clone, Serialize)]
pub struct MarkWithBook {
    #[serde(flatten)]
    pub mark: Mark,
    pub book: Option<Book>,
}

/// Insert or update the caller's mark for a book. Returns the stored mark
/// and whether a new row was created.
pub async fn upsert_mark(
    pool: &SqlitePool,
    user_id: Uuid,
    book_id: Uuid,
    status: MarkStatus,
) -> Result<(Mark, bool), sqlx::Error> {
    let existed = get_mark_by_user_and_book(pool, user_id, book_id)
        .await?
        .is_some();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO marks (id, book_id, user_id, status, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        ON CONFLICT(user_id, book_id)
        DO UPDATE SET status = excluded.status, updated_at = excluded.updated_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(book_id)
    .bind(user_id)
    .bind(status)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    let mark = get_mark_by_user_and_book(pool, user_id, book_id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;
    Ok((mark, !existed))
}

/// Get a mark by id.
pub async fn get_mark(pool: &SqlitePool, id: Uuid) -> Result<Option<Mark>, sqlx::Error> {
    sqlx::query_as::<_, Mark>("SELECT * FROM marks WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Get a user's mark for one book.
pub async fn get_mark_by_user_and_book(
    pool: &SqlitePool,
    user_id: Uuid,
    book_id: Uuid,
) -> Result<Option<Mark>, sqlx::Error> {
    sqlx::query_as::<_, Mark>("SELECT * FROM marks WHERE user_id = ? AND book_id = ?")
        .bind(user_id)
        .bind(book_id)
        .fetch_optional(pool)
        .await
}

/// Change a mark's status.
pub async fn set_mark_status(
    pool: &SqlitePool,
    id: Uuid,
    status: MarkStatus,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE marks SET status = ?, updated_at = ? WHERE id = ?")
        .bind(status)
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Delete a mark.
pub async fn delete_mark(pool: &SqlitePool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM marks WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// A user's marks joined with book detail, newest first.
pub async fn marks_for_user(
    pool: &SqlitePool,
    user_id: Uuid,
) -> Result<Vec<MarkWithBook>, sqlx::Error> {
    let marks =
        sqlx::query_as::<_, Mark>("SELECT * FROM marks WHERE user_id = ? ORDER BY updated_at DESC")
            .bind(user_id)
            .fetch_all(pool)
            .await?;

    let mut out = Vec::with_capacity(marks.len());
    for mark in marks {
        let book = books::get_book(pool, mark.book_id).await?;
        out.push(MarkWithBook { mark, book });
    }
    Ok(out)
}

/// How many books this user has marked `read`.
pub async fn count_read(pool: &SqlitePool, user_id: Uuid) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) =
        sqlx::query_as("SELECT count(*) FROM marks WHERE user_id = ? AND status = 'read'")
            .bind(user_id)
            .fetch_one(pool)
            .await?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_pool;

    #[tokio::test]
    async fn test_upsert_creates_then_updates() {
        let pool = test_pool().await;
        let user = Uuid::new_v4();
        let book = Uuid::new_v4();

        let (first, created) = upsert_mark(&pool, user, book, MarkStatus::NowReading)
            .await
            .unwrap();
        assert!(created);
        assert_eq!(first.status, MarkStatus::NowReading);

        let (second, created) = upsert_mark(&pool, user, book, MarkStatus::Read)
            .await
            .unwrap();
        assert!(!created);
        assert_eq!(second.id, first.id);
        assert_eq!(second.status, MarkStatus::Read);

        let (count,): (i64,) = sqlx::query_as("SELECT count(*) FROM marks")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_status_parsing_rejects_free_form() {
        assert_eq!("want_to_read".parse(), Ok(MarkStatus::WantToRead));
        assert_eq!("did_not_finish".parse(), Ok(MarkStatus::DidNotFinish));
        assert!("finished".parse::<MarkStatus>().is_err());
        assert!("Read".parse::<MarkStatus>().is_err());
    }

    #[tokio::test]
    async fn test_count_read_only_counts_read() {
        let pool = test_pool().await;
        let user = Uuid::new_v4();

        upsert_mark(&pool, user, Uuid::new_v4(), MarkStatus::Read)
            .await
            .unwrap();
        upsert_mark(&pool, user, Uuid::new_v4(), MarkStatus::NowReading)
            .await
            .unwrap();
        upsert_mark(&pool, Uuid::new_v4(), Uuid::new_v4(), MarkStatus::Read)
            .await
            .unwrap();

        assert_eq!(count_read(&pool, user).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_marks_for_user_tolerates_dangling_book() {
        let pool = test_pool().await;
        let user = Uuid::new_v4();
        upsert_mark(&pool, user, Uuid::new_v4(), MarkStatus::WantToRead)
            .await
            .unwrap();

        let marks = marks_for_user(&pool, user).await.unwrap();
        assert_eq!(marks.len(), 1);
        assert!(marks[0].book.is_none());
    }
}

/**
 * Book Model and Store Operations
 *
 * Books reference authors, series, and categories by id and carry their
 * genres and tags through join tables. References are not enforced by the
 * store; a dangling reference simply resolves to nothing at view time.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

/// A book row.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub author_id: Option<Uuid>,
    pub series_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub publish_year: Option<i64>,
    pub page_count: Option<i64>,
    /// Mean of current review ratings, recomputed on review writes.
    pub rating: f64,
    pub cover_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted on create and update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub author_id: Option<Uuid>,
    #[serde(default)]
    pub series_id: Option<Uuid>,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub genres: Vec<Uuid>,
    #[serde(default)]
    pub tag_ids: Vec<Uuid>,
    #[serde(default)]
    pub publish_year: Option<i64>,
    #[serde(default)]
    pub page_count: Option<i64>,
    #[serde(default)]
    pub cover_image: Option<String>,
}

/// Insert a new book together with its genre and tag links.
pub async fn create_book(pool: &SqlitePool, input: &BookInput) -> Result<Book, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO books
            (id, title, description, author_id, series_id, category_id,
             publish_year, page_count, rating, cover_image, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, 0, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(&input.title)
    .bind(&input.description)
    .bind(input.author_id)
    .bind(input.series_id)
    .bind(input.category_id)
    .bind(input.publish_year)
    .bind(input.page_count)
    .bind(&input.cover_image)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    set_book_genres(pool, id, &input.genres).await?;
    set_book_tags(pool, id, &input.tag_ids).await?;

    get_book(pool, id).await?.ok_or(sqlx::Error::RowNotFound)
}

/// Get a book by id.
pub async fn get_book(pool: &SqlitePool, id: Uuid) -> Result<Option<Book>, sqlx::Error> {
    sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// All books, newest first.
pub async fn list_books(pool: &SqlitePool) -> Result<Vec<Book>, sqlx::Error> {
    sqlx::query_as::<_, Book>("SELECT * FROM books ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}

/// Overwrite the mutable fields of a book and replace its genre/tag links.
/// Returns `false` when no such book exists.
pub async fn update_book(
    pool: &SqlitePool,
    id: Uuid,
    input: &BookInput,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE books
        SET title = ?, description = ?, author_id = ?, series_id = ?,
            category_id = ?, publish_year = ?, page_count = ?,
            cover_image = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&input.title)
    .bind(&input.description)
    .bind(input.author_id)
    .bind(input.series_id)
    .bind(input.category_id)
    .bind(input.publish_year)
    .bind(input.page_count)
    .bind(&input.cover_image)
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(false);
    }

    set_book_genres(pool, id, &input.genres).await?;
    set_book_tags(pool, id, &input.tag_ids).await?;
    Ok(true)
}

/// Delete a book and its links. Returns `false` when no such book exists.
pub async fn delete_book(pool: &SqlitePool, id: Uuid) -> Result<bool, sqlx::Error> {
    sqlx::query("DELETE FROM book_genres WHERE book_id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    sqlx::query("DELETE FROM book_tags WHERE book_id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    let result = sqlx::query("DELETE FROM books WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Case-insensitive substring search on title.
pub async fn search_books(pool: &SqlitePool, query: &str) -> Result<Vec<Book>, sqlx::Error> {
    sqlx::query_as::<_, Book>(
        "SELECT * FROM books WHERE title LIKE '%' || ? || '%' ORDER BY title",
    )
    .bind(query)
    .fetch_all(pool)
    .await
}

/// Whether a book with this id exists.
pub async fn book_exists(pool: &SqlitePool, id: Uuid) -> Result<bool, sqlx::Error> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM books WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.is_some())
}

async fn set_book_genres(
    pool: &SqlitePool,
    book_id: Uuid,
    genre_ids: &[Uuid],
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM book_genres WHERE book_id = ?")
        .bind(book_id)
        .execute(pool)
        .await?;
    for genre_id in genre_ids {
        sqlx::query("INSERT OR IGNORE INTO book_genres (book_id, genre_id) VALUES (?, ?)")
            .bind(book_id)
            .bind(genre_id)
            .execute(pool)
            .await?;
    }
    Ok(())
}

async fn set_book_tags(
    pool: &SqlitePool,
    book_id: Uuid,
    tag_ids: &[Uuid],
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM book_tags WHERE book_id = ?")
        .bind(book_id)
        .execute(pool)
        .await?;
    for tag_id in tag_ids {
        sqlx::query("INSERT OR IGNORE INTO book_tags (book_id, tag_id) VALUES (?, ?)")
            .bind(book_id)
            .bind(tag_id)
            .execute(pool)
            .await?;
    }
    Ok(())
}

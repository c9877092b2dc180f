/**
 * Catalog View Assembly
 *
 * Composite read-models: a book joined with its author, category, genres,
 * and tags. A reference that resolves to nothing (deleted author, unknown
 * category) projects as `null` or an empty list, never an error.
 */

use serde::Serialize;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::catalog::books::{self, Book};

/// A joined name-bearing reference (author, category, genre, tag).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct NamedRef {
    pub id: Uuid,
    pub name: String,
}

/// A book with its references resolved.
#[derive(Debug, Clone, Serialize)]
pub struct BookView {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub author: Option<NamedRef>,
    pub category: Option<NamedRef>,
    pub genres: Vec<NamedRef>,
    pub tags: Vec<NamedRef>,
    pub series_id: Option<Uuid>,
    pub publish_year: Option<i64>,
    pub page_count: Option<i64>,
    pub rating: f64,
    pub cover_image: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// A recommendation entry: aggregate rating over current reviews.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct RecommendedBook {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    pub avg_rating: f64,
    pub review_count: i64,
}

async fn named_ref(
    pool: &SqlitePool,
    table: &str,
    id: Option<Uuid>,
) -> Result<Option<NamedRef>, sqlx::Error> {
    let Some(id) = id else { return Ok(None) };
    // `table` is one of our own fixed table names, never user input.
    let sql = format!("SELECT id, name FROM {table} WHERE id = ?");
    sqlx::query_as::<_, NamedRef>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Resolve a book's references into a [`BookView`].
pub async fn assemble_book_view(pool: &SqlitePool, book: Book) -> Result<BookView, sqlx::Error> {
    let author = named_ref(pool, "authors", book.author_id).await?;
    let category = named_ref(pool, "categories", book.category_id).await?;

    let genres = sqlx::query_as::<_, NamedRef>(
        r#"
        SELECT g.id, g.name FROM genres g
        JOIN book_genres bg ON bg.genre_id = g.id
        WHERE bg.book_id = ?
        ORDER BY g.name
        "#,
    )
    .bind(book.id)
    .fetch_all(pool)
    .await?;

    let tags = sqlx::query_as::<_, NamedRef>(
        r#"
        SELECT t.id, t.name FROM tags t
        JOIN book_tags bt ON bt.tag_id = t.id
        WHERE bt.book_id = ?
        ORDER BY t.name
        "#,
    )
    .bind(book.id)
    .fetch_all(pool)
    .await?;

    Ok(BookView {
        id: book.id,
        title: book.title,
        description: book.description,
        author,
        category,
        genres,
        tags,
        series_id: book.series_id,
        publish_year: book.publish_year,
        page_count: book.page_count,
        rating: book.rating,
        cover_image: book.cover_image,
        created_at: book.created_at,
        updated_at: book.updated_at,
    })
}

/// All books as views, newest first.
pub async fn list_book_views(pool: &SqlitePool) -> Result<Vec<BookView>, sqlx::Error> {
    let mut views = Vec::new();
    for book in books::list_books(pool).await? {
        views.push(assemble_book_view(pool, book).await?);
    }
    Ok(views)
}

/// Top 6 books by average review rating, then review count. Books with no
/// reviews never appear. Averages are rounded to one decimal.
pub async fn recommended_books(pool: &SqlitePool) -> Result<Vec<RecommendedBook>, sqlx::Error> {
    let mut rows = sqlx::query_as::<_, RecommendedBook>(
        r#"
        SELECT b.id, b.title, b.description, b.cover_image,
               avg(r.rating) AS avg_rating,
               count(r.id) AS review_count
        FROM books b
        JOIN reviews r ON r.book_id = b.id
        GROUP BY b.id
        ORDER BY avg_rating DESC, review_count DESC
        LIMIT 6
        "#,
    )
    .fetch_all(pool)
    .await?;

    for row in &mut rows {
        row.avg_rating = (row.avg_rating * 10.0).round() / 10.0;
    }
    Ok(rows)
}

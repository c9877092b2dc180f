/**
 * Book Handlers
 *
 * GET    /api/books              - all books with references resolved
 * POST   /api/books              - create (auth)
 * GET    /api/books/{id}         - one book with references resolved
 * PUT    /api/books/{id}         - update (auth)
 * DELETE /api/books/{id}         - delete (auth)
 * GET    /api/books/search?query - title substring search
 * GET    /api/books/recommended  - top rated by reviews
 */

use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::Deserialize;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::catalog::books::{self, Book, BookInput};
use crate::catalog::views::{self, BookView};
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: String,
}

pub async fn list_books(State(pool): State<SqlitePool>) -> Result<Json<Vec<BookView>>, ApiError> {
    Ok(Json(views::list_book_views(&pool).await?))
}

pub async fn get_book(
    State(pool): State<SqlitePool>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookView>, ApiError> {
    let book = books::get_book(&pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Book not found"))?;
    Ok(Json(views::assemble_book_view(&pool, book).await?))
}

pub async fn create_book(
    State(pool): State<SqlitePool>,
    Json(input): Json<BookInput>,
) -> Result<Json<BookView>, ApiError> {
    if input.title.trim().is_empty() {
        return Err(ApiError::bad_request("Title is required"));
    }

    let book = books::create_book(&pool, &input).await?;
    tracing::info!("Book created: {} ({})", book.title, book.id);
    Ok(Json(views::assemble_book_view(&pool, book).await?))
}

/// Update a book. On success the enriched view is returned; if the re-fetch
/// fails after the write landed, answer with a plain success message instead.
pub async fn update_book(
    State(pool): State<SqlitePool>,
    Path(id): Path<Uuid>,
    Json(input): Json<BookInput>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if input.title.trim().is_empty() {
        return Err(ApiError::bad_request("Title is required"));
    }

    if !books::update_book(&pool, id, &input).await? {
        return Err(ApiError::not_found("Book not found"));
    }

    let enriched = match books::get_book(&pool, id).await {
        Ok(Some(book)) => views::assemble_book_view(&pool, book).await.ok(),
        Ok(None) => None,
        Err(e) => {
            tracing::warn!("Book {} updated but re-fetch failed: {:?}", id, e);
            None
        }
    };

    match enriched {
        Some(view) => Ok(Json(serde_json::to_value(view)?)),
        None => Ok(Json(
            serde_json::json!({ "message": "Book updated successfully" }),
        )),
    }
}

pub async fn delete_book(
    State(pool): State<SqlitePool>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !books::delete_book(&pool, id).await? {
        return Err(ApiError::not_found("Book not found"));
    }
    tracing::info!("Book deleted: {}", id);
    Ok(Json(
        serde_json::json!({ "message": "Book deleted successfully" }),
    ))
}

pub async fn search_books(
    State(pool): State<SqlitePool>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Book>>, ApiError> {
    if params.query.trim().is_empty() {
        return Err(ApiError::bad_request("Query is required"));
    }
    Ok(Json(books::search_books(&pool, params.query.trim()).await?))
}

pub async fn recommended_books(
    State(pool): State<SqlitePool>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let recs = views::recommended_books(&pool).await?;
    Ok(Json(serde_json::json!({ "books": recs })))
}

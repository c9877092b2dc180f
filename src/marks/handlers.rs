/**
 * Mark Handlers
 *
 * POST   /api/marks            - upsert the caller's mark for a book
 * GET    /api/marks/user       - the caller's marks with book detail
 * GET    /api/marks/{book_id}  - the caller's mark for one book
 * PUT    /api/marks/{mark_id}  - change status (owner only)
 * DELETE /api/marks/{mark_id}  - delete (owner only)
 *
 * All routes are authenticated. A transition to `read` runs the
 * achievement observer and attaches the unlock, if any.
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::marks::achievements::evaluate_read_achievements;
use crate::marks::db::{self, MarkStatus, MarkWithBook};
use crate::middleware::auth::AuthUser;

#[derive(Debug, Deserialize)]
pub struct CreateMarkRequest {
    pub book_id: Uuid,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMarkRequest {
    pub status: String,
}

fn parse_status(raw: &str) -> Result<MarkStatus, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request("Invalid status"))
}

pub async fn create_mark(
    State(pool): State<SqlitePool>,
    auth_user: AuthUser,
    Json(request): Json<CreateMarkRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let status = parse_status(&request.status)?;

    let (mark, created) = db::upsert_mark(&pool, auth_user.user_id, request.book_id, status).await?;
    tracing::info!(
        "Mark {} for user {} book {}: {}",
        if created { "created" } else { "updated" },
        auth_user.user_id,
        request.book_id,
        status
    );

    let achievement = if status == MarkStatus::Read {
        evaluate_read_achievements(&pool, auth_user.user_id).await
    } else {
        None
    };

    let (code, message) = if created {
        (StatusCode::CREATED, "Mark created successfully")
    } else {
        (StatusCode::OK, "Mark updated successfully")
    };

    Ok((
        code,
        Json(serde_json::json!({
            "message": message,
            "mark_id": mark.id,
            "achievement": achievement,
        })),
    ))
}

pub async fn user_marks(
    State(pool): State<SqlitePool>,
    auth_user: AuthUser,
) -> Result<Json<Vec<MarkWithBook>>, ApiError> {
    Ok(Json(db::marks_for_user(&pool, auth_user.user_id).await?))
}

pub async fn get_mark_by_book(
    State(pool): State<SqlitePool>,
    Path(book_id): Path<Uuid>,
    auth_user: AuthUser,
) -> Result<Json<db::Mark>, ApiError> {
    db::get_mark_by_user_and_book(&pool, auth_user.user_id, book_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Mark not found for this user and book"))
}

pub async fn update_mark(
    State(pool): State<SqlitePool>,
    Path(mark_id): Path<Uuid>,
    auth_user: AuthUser,
    Json(request): Json<UpdateMarkRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let status = parse_status(&request.status)?;

    let mark = db::get_mark(&pool, mark_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Mark not found"))?;
    if mark.user_id != auth_user.user_id {
        return Err(ApiError::forbidden("Mark does not belong to user"));
    }

    db::set_mark_status(&pool, mark_id, status).await?;

    let achievement = if status == MarkStatus::Read {
        evaluate_read_achievements(&pool, auth_user.user_id).await
    } else {
        None
    };

    Ok(Json(serde_json::json!({
        "message": "Mark updated successfully",
        "mark_id": mark_id,
        "achievement": achievement,
    })))
}

pub async fn delete_mark(
    State(pool): State<SqlitePool>,
    Path(mark_id): Path<Uuid>,
    auth_user: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mark = db::get_mark(&pool, mark_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Mark not found"))?;
    if mark.user_id != auth_user.user_id {
        return Err(ApiError::forbidden("Mark does not belong to user"));
    }

    db::delete_mark(&pool, mark_id).await?;
    Ok(Json(
        serde_json::json!({ "message": "Mark deleted successfully" }),
    ))
}

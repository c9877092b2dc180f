/**
 * Reply Handlers
 *
 * POST   /api/reply/post/{post_id}/reply    - create (auth)
 * GET    /api/reply/post/{post_id}/replies  - a post's replies
 * PUT    /api/reply/{reply_id}/like         - toggle like (auth)
 * DELETE /api/reply/{reply_id}              - delete (auth, author only)
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
use crate::likes::{self, REPLY_LIKES};
use crate::middleware::auth::AuthUser;
use crate::replies::db;

#[derive(Debug, Deserialize)]
pub struct CreateReplyRequest {
    pub content: String,
}

pub async fn create_reply(
    State(pool): State<SqlitePool>,
    Path(post_id): Path<Uuid>,
    auth_user: AuthUser,
    Json(request): Json<CreateReplyRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    if request.content.trim().is_empty() {
        return Err(ApiError::bad_request("Content is required"));
    }

    let reply = db::create_reply(&pool, post_id, auth_user.user_id, request.content.trim()).await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "Reply created",
            "reply": reply,
        })),
    ))
}

pub async fn post_replies(
    State(pool): State<SqlitePool>,
    Path(post_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let replies = db::replies_for_post(&pool, post_id).await?;
    Ok(Json(serde_json::json!({ "replies": replies })))
}

pub async fn toggle_like_reply(
    State(pool): State<SqlitePool>,
    Path(reply_id): Path<Uuid>,
    auth_user: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    if db::get_reply(&pool, reply_id).await?.is_none() {
        return Err(ApiError::not_found("Reply not found"));
    }

    let liked = likes::toggle(&pool, REPLY_LIKES, reply_id, auth_user.user_id).await?;
    let message = if liked { "Liked reply" } else { "Unliked reply" };
    Ok(Json(serde_json::json!({ "message": message })))
}

pub async fn delete_reply(
    State(pool): State<SqlitePool>,
    Path(reply_id): Path<Uuid>,
    auth_user: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let reply = db::get_reply(&pool, reply_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Reply not found"))?;
    if reply.user_id != auth_user.user_id {
        return Err(ApiError::forbidden("You are not the owner of this reply"));
    }

    db::delete_reply(&pool, reply_id).await?;
    Ok(Json(
        serde_json::json!({ "message": "Reply deleted successfully" }),
    ))
}

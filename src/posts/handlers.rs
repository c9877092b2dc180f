/**
 * Post Handlers
 *
 * GET    /api/post?clubId=    - a club's feed
 * GET    /api/post/random     - discover feed, 10 random posts
 * POST   /api/post            - create (auth, club members only)
 * DELETE /api/post/{id}       - delete (auth, author only)
 * PUT    /api/post/{id}/like  - toggle like (auth)
 */

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::catalog::books::book_exists;
use crate::clubs::db::is_club_member;
use crate::error::ApiError;
use crate::likes::{self, POST_LIKES};
use crate::middleware::auth::AuthUser;
use crate::posts::db;

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub club_id: Uuid,
    pub content: String,
    #[serde(default)]
    pub book_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubFeedParams {
    pub club_id: Uuid,
}

pub async fn create_post(
    State(pool): State<SqlitePool>,
    auth_user: AuthUser,
    Json(request): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    if request.content.trim().is_empty() {
        return Err(ApiError::bad_request("Content is required"));
    }

    if !is_club_member(&pool, request.club_id, auth_user.user_id).await? {
        return Err(ApiError::forbidden("You are not a member of this club"));
    }

    if let Some(book_id) = request.book_id {
        if !book_exists(&pool, book_id).await? {
            return Err(ApiError::bad_request("Selected book not found"));
        }
    }

    let post = db::create_post(
        &pool,
        request.club_id,
        auth_user.user_id,
        request.content.trim(),
        request.book_id,
    )
    .await?;

    tracing::info!("Post {} created in club {}", post.id, post.club_id);
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "Post created successfully",
            "post_id": post.id,
            "post": post,
        })),
    ))
}

pub async fn club_posts(
    State(pool): State<SqlitePool>,
    Query(params): Query<ClubFeedParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let posts = db::posts_for_club(&pool, params.club_id).await?;
    Ok(Json(serde_json::json!({
        "posts": posts,
        "count": posts.len(),
    })))
}

pub async fn random_posts(
    State(pool): State<SqlitePool>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let posts = db::random_posts(&pool).await?;
    Ok(Json(serde_json::json!({
        "posts": posts,
        "count": posts.len(),
    })))
}

pub async fn toggle_like_post(
    State(pool): State<SqlitePool>,
    Path(id): Path<Uuid>,
    auth_user: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    if db::get_post(&pool, id).await?.is_none() {
        return Err(ApiError::not_found("Post not found"));
    }

    let liked = likes::toggle(&pool, POST_LIKES, id, auth_user.user_id).await?;
    let message = if liked { "Post liked" } else { "Post unliked" };
    Ok(Json(serde_json::json!({ "message": message })))
}

pub async fn delete_post(
    State(pool): State<SqlitePool>,
    Path(id): Path<Uuid>,
    auth_user: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let post = db::get_post(&pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    if !is_club_member(&pool, post.club_id, auth_user.user_id).await? {
        return Err(ApiError::forbidden("You are not a member of this club"));
    }
    if post.user_id != auth_user.user_id {
        return Err(ApiError::forbidden("You are not the owner of this post"));
    }

    db::delete_post(&pool, id).await?;
    tracing::info!("Post deleted: {}", id);
    Ok(Json(
        serde_json::json!({ "message": "Post deleted successfully" }),
    ))
}

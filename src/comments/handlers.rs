/**
 * Comment Handlers
 *
 * GET    /api/comment?postId=    - a post's comments
 * POST   /api/comment            - create (auth)
 * DELETE /api/comment/{id}       - delete (auth, author only)
 * PUT    /api/comment/{id}/like  - toggle like (auth)
 */

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::comments::db::{self, Comment, CommentWithLikes};
use crate::error::ApiError;
use crate::likes::{self, COMMENT_LIKES};
use crate::middleware::auth::AuthUser;

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub post_id: Uuid,
    pub content: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostCommentsParams {
    pub post_id: Uuid,
}

pub async fn create_comment(
    State(pool): State<SqlitePool>,
    auth_user: AuthUser,
    Json(request): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    if request.content.trim().is_empty() {
        return Err(ApiError::bad_request("Content is required"));
    }

    let comment = db::create_comment(
        &pool,
        request.post_id,
        auth_user.user_id,
        request.content.trim(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn post_comments(
    State(pool): State<SqlitePool>,
    Query(params): Query<PostCommentsParams>,
) -> Result<Json<Vec<CommentWithLikes>>, ApiError> {
    Ok(Json(db::comments_for_post(&pool, params.post_id).await?))
}

pub async fn toggle_like_comment(
    State(pool): State<SqlitePool>,
    Path(id): Path<Uuid>,
    auth_user: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    if db::get_comment(&pool, id).await?.is_none() {
        return Err(ApiError::not_found("Comment not found"));
    }

    let liked = likes::toggle(&pool, COMMENT_LIKES, id, auth_user.user_id).await?;
    let message = if liked {
        "Comment liked"
    } else {
        "Comment unliked"
    };
    Ok(Json(serde_json::json!({ "message": message })))
}

pub async fn delete_comment(
    State(pool): State<SqlitePool>,
    Path(id): Path<Uuid>,
    auth_user: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let comment = db::get_comment(&pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Comment not found"))?;
    if comment.user_id != auth_user.user_id {
        return Err(ApiError::forbidden("You are not the owner"));
    }

    db::delete_comment(&pool, id).await?;
    Ok(Json(serde_json::json!({ "message": "Comment deleted" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_pool;

    fn auth(user_id: Uuid) -> AuthUser {
        AuthUser {
            user_id,
            email: "a@x.com".to_string(),
            display_name: "Alice".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let pool = test_pool().await;
        let post = Uuid::new_v4();
        let user = Uuid::new_v4();

        let (code, comment) = create_comment(
            State(pool.clone()),
            auth(user),
            Json(CreateCommentRequest {
                post_id: post,
                content: "nice".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(code, StatusCode::CREATED);
        assert_eq!(comment.user_id, user);

        let listed = post_comments(State(pool), Query(PostCommentsParams { post_id: post }))
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn test_like_messages() {
        let pool = test_pool().await;
        let comment = db::create_comment(&pool, Uuid::new_v4(), Uuid::new_v4(), "hi")
            .await
            .unwrap();
        let fan = Uuid::new_v4();

        let body = toggle_like_comment(State(pool.clone()), Path(comment.id), auth(fan))
            .await
            .unwrap();
        assert_eq!(body["message"], "Comment liked");

        let body = toggle_like_comment(State(pool), Path(comment.id), auth(fan))
            .await
            .unwrap();
        assert_eq!(body["message"], "Comment unliked");
    }

    #[tokio::test]
    async fn test_delete_is_author_only() {
        let pool = test_pool().await;
        let author = Uuid::new_v4();
        let comment = db::create_comment(&pool, Uuid::new_v4(), author, "mine")
            .await
            .unwrap();

        let err = delete_comment(State(pool.clone()), Path(comment.id), auth(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);

        delete_comment(State(pool), Path(comment.id), auth(author))
            .await
            .unwrap();
    }
}

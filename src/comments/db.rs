/**
 * Comment Model and Store Operations
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::likes::{self, COMMENT_LIKES};

/// A comment row.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A comment with its like set attached.
#[derive(Debug, Clone, Serialize)]
pub struct CommentWithLikes {
    #[serde(flatten)]
    pub comment: Comment,
    pub likes: Vec<Uuid>,
    pub likes_count: i64,
}

/// Insert a new comment.
pub async fn create_comment(
    pool: &SqlitePool,
    post_id: Uuid,
    user_id: Uuid,
    content: &str,
) -> Result<Comment, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO comments (id, post_id, user_id, content, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(post_id)
    .bind(user_id)
    .bind(content)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(Comment {
        id,
        post_id,
        user_id,
        content: content.to_string(),
        created_at: now,
        updated_at: now,
    })
}

/// Get a comment by id.
pub async fn get_comment(pool: &SqlitePool, id: Uuid) -> Result<Option<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>("SELECT * FROM comments WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Delete a comment and its like set.
pub async fn delete_comment(pool: &SqlitePool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM comment_likes WHERE comment_id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    sqlx::query("DELETE FROM comments WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// A post's comments, oldest first, with like sets.
pub async fn comments_for_post(
    pool: &SqlitePool,
    post_id: Uuid,
) -> Result<Vec<CommentWithLikes>, sqlx::Error> {
    let comments = sqlx::query_as::<_, Comment>(
        "SELECT * FROM comments WHERE post_id = ? ORDER BY created_at",
    )
    .bind(post_id)
    .fetch_all(pool)
    .await?;

    let mut out = Vec::with_capacity(comments.len());
    for comment in comments {
        let likes = likes::likes(pool, COMMENT_LIKES, comment.id).await?;
        let likes_count = likes.len() as i64;
        out.push(CommentWithLikes {
            comment,
            likes,
            likes_count,
        });
    }
    Ok(out)
}

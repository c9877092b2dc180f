/**
 * Reply Model and Store Operations
 *
 * Reply views join the author with outer semantics; a deleted account
 * projects as nulls. Listed oldest first, reading order.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::likes::{self, REPLY_LIKES};

/// A reply row.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Reply {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A reply joined with its author and like set.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ReplyView {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub user_display_name: Option<String>,
    pub user_profile_image: Option<String>,
    #[sqlx(skip)]
    pub likes: Vec<Uuid>,
    #[sqlx(skip)]
    pub likes_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert a new reply.
pub async fn create_reply(
    pool: &SqlitePool,
    post_id: Uuid,
    user_id: Uuid,
    content: &str,
) -> Result<Reply, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO replies (id, post_id, user_id, content, created_at, updated_at)
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

    Ok(Reply {
        id,
        post_id,
        user_id,
        content: content.to_string(),
        created_at: now,
        updated_at: now,
    })
}

/// Get a reply by id.
pub async fn get_reply(pool: &SqlitePool, id: Uuid) -> Result<Option<Reply>, sqlx::Error> {
    sqlx::query_as::<_, Reply>("SELECT * FROM replies WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Delete a reply and its like set.
pub async fn delete_reply(pool: &SqlitePool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM reply_likes WHERE reply_id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    sqlx::query("DELETE FROM replies WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// A post's replies joined with authors, oldest first.
pub async fn replies_for_post(
    pool: &SqlitePool,
    post_id: Uuid,
) -> Result<Vec<ReplyView>, sqlx::Error> {
    let mut views = sqlx::query_as::<_, ReplyView>(
        r#"
        SELECT r.id, r.post_id, r.user_id, r.content,
               u.displayname AS user_display_name,
               u.profile_img_url AS user_profile_image,
               r.created_at, r.updated_at
        FROM replies r
        LEFT JOIN users u ON u.id = r.user_id
        WHERE r.post_id = ?
        ORDER BY r.created_at
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await?;

    for view in &mut views {
        view.likes = likes::likes(pool, REPLY_LIKES, view.id).await?;
        view.likes_count = view.likes.len() as i64;
    }
    Ok(views)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_pool;

    #[tokio::test]
    async fn test_replies_in_reading_order_with_null_author() {
        let pool = test_pool().await;
        let post = Uuid::new_v4();

        create_reply(&pool, post, Uuid::new_v4(), "first").await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        create_reply(&pool, post, Uuid::new_v4(), "second").await.unwrap();

        let replies = replies_for_post(&pool, post).await.unwrap();
        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0].content, "first");
        assert!(replies[0].user_display_name.is_none());
    }

    #[tokio::test]
    async fn test_like_set_attached() {
        let pool = test_pool().await;
        let post = Uuid::new_v4();
        let reply = create_reply(&pool, post, Uuid::new_v4(), "hi").await.unwrap();
        let fan = Uuid::new_v4();
        likes::toggle(&pool, REPLY_LIKES, reply.id, fan).await.unwrap();

        let replies = replies_for_post(&pool, post).await.unwrap();
        assert_eq!(replies[0].likes, vec![fan]);
        assert_eq!(replies[0].likes_count, 1);
    }
}

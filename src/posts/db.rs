/**
 * Post Model and Store Operations
 *
 * Feed views join each post with its author and optional book; both joins
 * use outer semantics, so a deleted user or book projects as nulls. The
 * like set is attached as an id array plus a count, where an absent set
 * counts as zero.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::likes::{self, POST_LIKES};

/// A post row.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub club_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub book_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A feed entry: post joined with author, optional book, and like set.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PostView {
    pub id: Uuid,
    pub club_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub user_display_name: Option<String>,
    pub user_profile_image: Option<String>,
    pub book_id: Option<Uuid>,
    pub book_title: Option<String>,
    /// Only present on the discover feed.
    pub club_name: Option<String>,
    #[sqlx(skip)]
    pub likes: Vec<Uuid>,
    #[sqlx(skip)]
    pub likes_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

const VIEW_SELECT: &str = r#"
    SELECT p.id, p.club_id, p.user_id, p.content,
           u.displayname AS user_display_name,
           u.profile_img_url AS user_profile_image,
           p.book_id,
           b.title AS book_title,
           c.name AS club_name,
           p.created_at, p.updated_at
    FROM posts p
    LEFT JOIN users u ON u.id = p.user_id
    LEFT JOIN books b ON b.id = p.book_id
    LEFT JOIN clubs c ON c.id = p.club_id
"#;

/// Insert a new post.
pub async fn create_post(
    pool: &SqlitePool,
    club_id: Uuid,
    user_id: Uuid,
    content: &str,
    book_id: Option<Uuid>,
) -> Result<Post, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO posts (id, club_id, user_id, content, book_id, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(club_id)
    .bind(user_id)
    .bind(content)
    .bind(book_id)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(Post {
        id,
        club_id,
        user_id,
        content: content.to_string(),
        book_id,
        created_at: now,
        updated_at: now,
    })
}

/// Get a post by id.
pub async fn get_post(pool: &SqlitePool, id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Delete a post and its like set.
pub async fn delete_post(pool: &SqlitePool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM post_likes WHERE post_id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    sqlx::query("DELETE FROM posts WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

async fn attach_likes(pool: &SqlitePool, views: &mut [PostView]) -> Result<(), sqlx::Error> {
    for view in views.iter_mut() {
        view.likes = likes::likes(pool, POST_LIKES, view.id).await?;
        view.likes_count = view.likes.len() as i64;
    }
    Ok(())
}

/// A club's feed, newest first.
pub async fn posts_for_club(
    pool: &SqlitePool,
    club_id: Uuid,
) -> Result<Vec<PostView>, sqlx::Error> {
    let sql = format!("{VIEW_SELECT} WHERE p.club_id = ? ORDER BY p.created_at DESC");
    let mut views = sqlx::query_as::<_, PostView>(&sql)
        .bind(club_id)
        .fetch_all(pool)
        .await?;
    attach_likes(pool, &mut views).await?;
    Ok(views)
}

/// The discover feed: 10 posts sampled at random across all clubs.
pub async fn random_posts(pool: &SqlitePool) -> Result<Vec<PostView>, sqlx::Error> {
    let sql = format!("{VIEW_SELECT} ORDER BY RANDOM() LIMIT 10");
    let mut views = sqlx::query_as::<_, PostView>(&sql).fetch_all(pool).await?;
    attach_likes(pool, &mut views).await?;
    Ok(views)
}

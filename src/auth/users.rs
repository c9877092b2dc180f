/**
 * User Model and Store Operations
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

/// A user document.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    /// Unique email address, the login identifier.
    pub email: String,
    /// Bcrypt hash. Never serialized into responses by the handlers.
    pub password_hash: String,
    pub displayname: String,
    pub profile_img_url: Option<String>,
    pub bg_img_url: Option<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create a new user. The caller hashes the password.
pub async fn create_user(
    pool: &SqlitePool,
    email: String,
    displayname: String,
    password_hash: String,
) -> Result<User, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO users (id, email, password_hash, displayname, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(&email)
    .bind(&password_hash)
    .bind(&displayname)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(User {
        id,
        email,
        password_hash,
        displayname,
        profile_img_url: None,
        bg_img_url: None,
        bio: None,
        created_at: now,
        updated_at: now,
    })
}

/// Get a user by email, or `None` if no such user exists.
pub async fn get_user_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await
}

/// Get a user by id, or `None` if no such user exists.
pub async fn get_user_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Update profile fields. Image URLs are only touched when a new upload was
/// provided; `None` leaves the stored value alone.
pub async fn update_profile(
    pool: &SqlitePool,
    user_id: Uuid,
    displayname: &str,
    bio: &str,
    profile_img_url: Option<&str>,
    bg_img_url: Option<&str>,
) -> Result<(), sqlx::Error> {
    let now = Utc::now();

    sqlx::query(
        r#"
        UPDATE users
        SET displayname = ?,
            bio = ?,
            profile_img_url = COALESCE(?, profile_img_url),
            bg_img_url = COALESCE(?, bg_img_url),
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(displayname)
    .bind(bio)
    .bind(profile_img_url)
    .bind(bg_img_url)
    .bind(now)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_pool;

    #[tokio::test]
    async fn test_create_and_fetch_user() {
        let pool = test_pool().await;

        let user = create_user(
            &pool,
            "a@x.com".to_string(),
            "Alice".to_string(),
            "hash".to_string(),
        )
        .await
        .unwrap();

        let by_email = get_user_by_email(&pool, "a@x.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, user.id);
        assert_eq!(by_email.displayname, "Alice");

        let by_id = get_user_by_id(&pool, user.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "a@x.com");
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let pool = test_pool().await;

        create_user(&pool, "a@x.com".into(), "Alice".into(), "h".into())
            .await
            .unwrap();
        let err = create_user(&pool, "a@x.com".into(), "Alias".into(), "h".into())
            .await
            .unwrap_err();
        match err {
            sqlx::Error::Database(db) => assert!(db.is_unique_violation()),
            other => panic!("expected unique violation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_profile_keeps_images_when_not_provided() {
        let pool = test_pool().await;
        let user = create_user(&pool, "a@x.com".into(), "Alice".into(), "h".into())
            .await
            .unwrap();

        update_profile(&pool, user.id, "Alice", "hi", Some("/uploads/1_p.png"), None)
            .await
            .unwrap();
        update_profile(&pool, user.id, "Alice B", "hello", None, None)
            .await
            .unwrap();

        let updated = get_user_by_id(&pool, user.id).await.unwrap().unwrap();
        assert_eq!(updated.displayname, "Alice B");
        assert_eq!(updated.bio.as_deref(), Some("hello"));
        assert_eq!(updated.profile_img_url.as_deref(), Some("/uploads/1_p.png"));
    }
}

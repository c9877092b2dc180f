/**
 * Club Model and Store Operations
 *
 * Membership lives in `club_members` with a unique (club, user) pair, so
 * join and leave are idempotent insert-or-ignore / delete primitives. The
 * owner's row is written at creation time.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

/// A club row.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Club {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A club with its member id set, the shape list endpoints return.
#[derive(Debug, Clone, Serialize)]
pub struct ClubWithMembers {
    #[serde(flatten)]
    pub club: Club,
    pub members: Vec<Uuid>,
}

/// A recommendation entry: club plus owner name and member count.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct RecommendedClub {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    pub owner_id: Uuid,
    /// `None` when the owner account no longer exists.
    pub owner_display_name: Option<String>,
    pub member_count: i64,
    #[sqlx(skip)]
    pub members: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create a club and seed its member set with the owner.
pub async fn create_club(
    pool: &SqlitePool,
    name: &str,
    description: Option<&str>,
    cover_image: Option<&str>,
    owner_id: Uuid,
) -> Result<Club, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO clubs (id, name, description, cover_image, owner_id, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(description)
    .bind(cover_image)
    .bind(owner_id)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    add_member(pool, id, owner_id).await?;

    Ok(Club {
        id,
        name: name.to_string(),
        description: description.map(str::to_string),
        cover_image: cover_image.map(str::to_string),
        owner_id,
        created_at: now,
        updated_at: now,
    })
}

/// Get a club by id.
pub async fn get_club(pool: &SqlitePool, id: Uuid) -> Result<Option<Club>, sqlx::Error> {
    sqlx::query_as::<_, Club>("SELECT * FROM clubs WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// All clubs, newest first, with member sets.
pub async fn list_clubs(pool: &SqlitePool) -> Result<Vec<ClubWithMembers>, sqlx::Error> {
    let clubs = sqlx::query_as::<_, Club>("SELECT * FROM clubs ORDER BY created_at DESC")
        .fetch_all(pool)
        .await?;
    with_members(pool, clubs).await
}

/// Clubs the user owns or belongs to.
pub async fn clubs_for_user(
    pool: &SqlitePool,
    user_id: Uuid,
) -> Result<Vec<ClubWithMembers>, sqlx::Error> {
    let clubs = sqlx::query_as::<_, Club>(
        r#"
        SELECT DISTINCT c.* FROM clubs c
        LEFT JOIN club_members m ON m.club_id = c.id
        WHERE c.owner_id = ? OR m.user_id = ?
        ORDER BY c.created_at DESC
        "#,
    )
    .bind(user_id)
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    with_members(pool, clubs).await
}

async fn with_members(
    pool: &SqlitePool,
    clubs: Vec<Club>,
) -> Result<Vec<ClubWithMembers>, sqlx::Error> {
    let mut out = Vec::with_capacity(clubs.len());
    for club in clubs {
        let members = member_ids(pool, club.id).await?;
        out.push(ClubWithMembers { club, members });
    }
    Ok(out)
}

/// Member ids of a club, oldest first.
pub async fn member_ids(pool: &SqlitePool, club_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error> {
    let rows: Vec<(Uuid,)> =
        sqlx::query_as("SELECT user_id FROM club_members WHERE club_id = ? ORDER BY rowid")
            .bind(club_id)
            .fetch_all(pool)
            .await?;
    Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// Add a user to a club's member set. Already a member is a no-op.
pub async fn add_member(pool: &SqlitePool, club_id: Uuid, user_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT OR IGNORE INTO club_members (club_id, user_id) VALUES (?, ?)")
        .bind(club_id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Remove a user from a club's member set. Not a member is a no-op.
pub async fn remove_member(
    pool: &SqlitePool,
    club_id: Uuid,
    user_id: Uuid,
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM club_members WHERE club_id = ? AND user_id = ?")
        .bind(club_id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// True iff the user owns the club or sits in its member set.
pub async fn is_club_member(
    pool: &SqlitePool,
    club_id: Uuid,
    user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let row: Option<(i64,)> = sqlx::query_as(
        r#"
        SELECT 1 FROM clubs c
        LEFT JOIN club_members m ON m.club_id = c.id AND m.user_id = ?
        WHERE c.id = ? AND (c.owner_id = ? OR m.user_id IS NOT NULL)
        "#,
    )
    .bind(user_id)
    .bind(club_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(row.is_some())
}

/// Update name/description and, when a new upload arrived, the cover image.
/// Returns `false` when no such club exists.
pub async fn update_club(
    pool: &SqlitePool,
    id: Uuid,
    name: &str,
    description: Option<&str>,
    cover_image: Option<&str>,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE clubs
        SET name = ?, description = ?,
            cover_image = COALESCE(?, cover_image),
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(name)
    .bind(description)
    .bind(cover_image)
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Delete a club and its member set. Returns `false` when no such club exists.
pub async fn delete_club(pool: &SqlitePool, id: Uuid) -> Result<bool, sqlx::Error> {
    sqlx::query("DELETE FROM club_members WHERE club_id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    let result = sqlx::query("DELETE FROM clubs WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Top 6 clubs by member count, owner name joined with outer semantics.
pub async fn recommended_clubs(pool: &SqlitePool) -> Result<Vec<RecommendedClub>, sqlx::Error> {
    let mut clubs = sqlx::query_as::<_, RecommendedClub>(
        r#"
        SELECT c.id, c.name, c.description, c.cover_image, c.owner_id,
               u.displayname AS owner_display_name,
               (SELECT count(*) FROM club_members m WHERE m.club_id = c.id) AS member_count,
               c.created_at, c.updated_at
        FROM clubs c
        LEFT JOIN users u ON u.id = c.owner_id
        ORDER BY member_count DESC
        LIMIT 6
        "#,
    )
    .fetch_all(pool)
    .await?;

    for club in &mut clubs {
        club.members = member_ids(pool, club.id).await?;
    }
    Ok(clubs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_pool;

    #[tokio::test]
    async fn test_owner_is_seeded_as_member() {
        let pool = test_pool().await;
        let owner = Uuid::new_v4();

        let club = create_club(&pool, "Readers", None, None, owner).await.unwrap();
        assert_eq!(member_ids(&pool, club.id).await.unwrap(), vec![owner]);
        assert!(is_club_member(&pool, club.id, owner).await.unwrap());
    }

    #[tokio::test]
    async fn test_join_is_idempotent() {
        let pool = test_pool().await;
        let owner = Uuid::new_v4();
        let joiner = Uuid::new_v4();
        let club = create_club(&pool, "Readers", None, None, owner).await.unwrap();

        add_member(&pool, club.id, joiner).await.unwrap();
        add_member(&pool, club.id, joiner).await.unwrap();

        assert_eq!(member_ids(&pool, club.id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_non_member_is_not_member() {
        let pool = test_pool().await;
        let club = create_club(&pool, "Readers", None, None, Uuid::new_v4())
            .await
            .unwrap();

        assert!(!is_club_member(&pool, club.id, Uuid::new_v4()).await.unwrap());
    }

    #[tokio::test]
    async fn test_clubs_for_user_covers_owned_and_joined() {
        let pool = test_pool().await;
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let owned = create_club(&pool, "Alice's", None, None, alice).await.unwrap();
        let joined = create_club(&pool, "Bob's", None, None, bob).await.unwrap();
        add_member(&pool, joined.id, alice).await.unwrap();
        create_club(&pool, "Other", None, None, bob).await.unwrap();

        let clubs = clubs_for_user(&pool, alice).await.unwrap();
        let ids: Vec<Uuid> = clubs.iter().map(|c| c.club.id).collect();
        assert_eq!(clubs.len(), 2);
        assert!(ids.contains(&owned.id) && ids.contains(&joined.id));
    }

    #[tokio::test]
    async fn test_recommended_orders_by_member_count() {
        let pool = test_pool().await;
        let small = create_club(&pool, "Small", None, None, Uuid::new_v4())
            .await
            .unwrap();
        let big = create_club(&pool, "Big", None, None, Uuid::new_v4())
            .await
            .unwrap();
        add_member(&pool, big.id, Uuid::new_v4()).await.unwrap();
        add_member(&pool, big.id, Uuid::new_v4()).await.unwrap();

        let recs = recommended_clubs(&pool).await.unwrap();
        assert_eq!(recs[0].id, big.id);
        assert_eq!(recs[0].member_count, 3);
        assert_eq!(recs[1].id, small.id);
        // Owner rows were never created as users.
        assert!(recs[0].owner_display_name.is_none());
    }
}

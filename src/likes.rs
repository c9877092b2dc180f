/**
 * Like Sets
 *
 * Posts, comments, and replies each carry a set of liking users, stored in
 * a join table with a unique (resource, user) pair. Toggling is a delete
 * followed by an insert-or-ignore, so both directions are idempotent.
 */

use sqlx::SqlitePool;
use uuid::Uuid;

/// One like join table.
#[derive(Debug, Clone, Copy)]
pub struct LikeSet {
    table: &'static str,
    key: &'static str,
}

pub const POST_LIKES: LikeSet = LikeSet {
    table: "post_likes",
    key: "post_id",
};
pub const COMMENT_LIKES: LikeSet = LikeSet {
    table: "comment_likes",
    key: "comment_id",
};
pub const REPLY_LIKES: LikeSet = LikeSet {
    table: "reply_likes",
    key: "reply_id",
};

/// Users who like this resource, in like order.
pub async fn likes(pool: &SqlitePool, set: LikeSet, id: Uuid) -> Result<Vec<Uuid>, sqlx::Error> {
    let sql = format!(
        "SELECT user_id FROM {} WHERE {} = ? ORDER BY rowid",
        set.table, set.key
    );
    let rows: Vec<(Uuid,)> = sqlx::query_as(&sql).bind(id).fetch_all(pool).await?;
    Ok(rows.into_iter().map(|(user_id,)| user_id).collect())
}

/// Flip the user's like. Returns `true` when the resource is now liked.
pub async fn toggle(
    pool: &SqlitePool,
    set: LikeSet,
    id: Uuid,
    user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let sql = format!("DELETE FROM {} WHERE {} = ? AND user_id = ?", set.table, set.key);
    let removed = sqlx::query(&sql)
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?
        .rows_affected();
    if removed > 0 {
        return Ok(false);
    }

    let sql = format!(
        "INSERT OR IGNORE INTO {} ({}, user_id) VALUES (?, ?)",
        set.table, set.key
    );
    sqlx::query(&sql).bind(id).bind(user_id).execute(pool).await?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_pool;

    #[tokio::test]
    async fn test_toggle_flips_membership() {
        let pool = test_pool().await;
        let post = Uuid::new_v4();
        let user = Uuid::new_v4();

        assert!(toggle(&pool, POST_LIKES, post, user).await.unwrap());
        assert_eq!(likes(&pool, POST_LIKES, post).await.unwrap(), vec![user]);

        assert!(!toggle(&pool, POST_LIKES, post, user).await.unwrap());
        assert!(likes(&pool, POST_LIKES, post).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sets_are_independent() {
        let pool = test_pool().await;
        let id = Uuid::new_v4();
        let user = Uuid::new_v4();

        toggle(&pool, COMMENT_LIKES, id, user).await.unwrap();
        assert!(likes(&pool, REPLY_LIKES, id).await.unwrap().is_empty());
    }
}

/**
 * Review Model and Store Operations
 *
 * One review per (user, book), enforced by a unique index rather than a
 * check-then-insert. Every review write ends with a recompute of the
 * book's aggregate rating; the model is eventually consistent, so a later
 * write always reconverges the aggregate.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

/// A review row.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Review {
    pub id: Uuid,
    pub book_id: Uuid,
    pub user_id: Uuid,
    /// 1 through 5.
    pub rating: i64,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A review joined with its author; a deleted account projects as nulls.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ReviewView {
    pub id: Uuid,
    pub book_id: Uuid,
    pub user_id: Uuid,
    pub rating: i64,
    pub comment: String,
    pub user_display_name: Option<String>,
    pub user_profile_pic: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

const VIEW_SELECT: &str = r#"
    SELECT r.id, r.book_id, r.user_id, r.rating, r.comment,
           u.displayname AS user_display_name,
           u.profile_img_url AS user_profile_pic,
           r.created_at, r.updated_at
    FROM reviews r
    LEFT JOIN users u ON u.id = r.user_id
"#;

/// Insert a review. A second review for the same (user, book) surfaces as
/// a unique violation.
pub async fn create_review(
    pool: &SqlitePool,
    book_id: Uuid,
    user_id: Uuid,
    rating: i64,
    comment: &str,
) -> Result<Review, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO reviews (id, book_id, user_id, rating, comment, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(book_id)
    .bind(user_id)
    .bind(rating)
    .bind(comment)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(Review {
        id,
        book_id,
        user_id,
        rating,
        comment: comment.to_string(),
        created_at: now,
        updated_at: now,
    })
}

/// Get a review by id.
pub async fn get_review(pool: &SqlitePool, id: Uuid) -> Result<Option<Review>, sqlx::Error> {
    sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Get a review joined with its author.
pub async fn get_review_view(
    pool: &SqlitePool,
    id: Uuid,
) -> Result<Option<ReviewView>, sqlx::Error> {
    let sql = format!("{VIEW_SELECT} WHERE r.id = ?");
    sqlx::query_as::<_, ReviewView>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// All reviews of a book, newest first.
pub async fn reviews_for_book(
    pool: &SqlitePool,
    book_id: Uuid,
) -> Result<Vec<ReviewView>, sqlx::Error> {
    let sql = format!("{VIEW_SELECT} WHERE r.book_id = ? ORDER BY r.created_at DESC");
    sqlx::query_as::<_, ReviewView>(&sql)
        .bind(book_id)
        .fetch_all(pool)
        .await
}

/// All reviews written by a user, newest first.
pub async fn reviews_for_user(
    pool: &SqlitePool,
    user_id: Uuid,
) -> Result<Vec<ReviewView>, sqlx::Error> {
    let sql = format!("{VIEW_SELECT} WHERE r.user_id = ? ORDER BY r.created_at DESC");
    sqlx::query_as::<_, ReviewView>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await
}

/// Overwrite a review's rating and comment.
pub async fn update_review(
    pool: &SqlitePool,
    id: Uuid,
    rating: i64,
    comment: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE reviews SET rating = ?, comment = ?, updated_at = ? WHERE id = ?")
        .bind(rating)
        .bind(comment)
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Delete a review.
pub async fn delete_review(pool: &SqlitePool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM reviews WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Recompute a book's aggregate rating as the mean of its current reviews.
/// When no reviews remain, the stored rating is left unchanged.
pub async fn recompute_book_rating(pool: &SqlitePool, book_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE books
        SET rating = (SELECT avg(rating) FROM reviews WHERE book_id = ?)
        WHERE id = ?
          AND EXISTS (SELECT 1 FROM reviews WHERE book_id = ?)
        "#,
    )
    .bind(book_id)
    .bind(book_id)
    .bind(book_id)
    .execute(pool)
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::books::{create_book, get_book, BookInput};
    use crate::test_support::test_pool;

    async fn seed_book(pool: &SqlitePool) -> Uuid {
        let input = BookInput {
            title: "Dune".to_string(),
            description: None,
            author_id: None,
            series_id: None,
            category_id: None,
            genres: vec![],
            tag_ids: vec![],
            publish_year: None,
            page_count: None,
            cover_image: None,
        };
        create_book(pool, &input).await.unwrap().id
    }

    #[tokio::test]
    async fn test_second_review_for_same_pair_violates_unique() {
        let pool = test_pool().await;
        let book = seed_book(&pool).await;
        let user = Uuid::new_v4();

        create_review(&pool, book, user, 5, "great").await.unwrap();
        let err = create_review(&pool, book, user, 1, "changed my mind")
            .await
            .unwrap_err();
        match err {
            sqlx::Error::Database(db) => assert!(db.is_unique_violation()),
            other => panic!("expected unique violation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_recompute_tracks_review_set() {
        let pool = test_pool().await;
        let book = seed_book(&pool).await;

        let r1 = create_review(&pool, book, Uuid::new_v4(), 4, "").await.unwrap();
        create_review(&pool, book, Uuid::new_v4(), 2, "").await.unwrap();
        recompute_book_rating(&pool, book).await.unwrap();
        assert_eq!(get_book(&pool, book).await.unwrap().unwrap().rating, 3.0);

        update_review(&pool, r1.id, 5, "").await.unwrap();
        recompute_book_rating(&pool, book).await.unwrap();
        assert_eq!(get_book(&pool, book).await.unwrap().unwrap().rating, 3.5);
    }

    #[tokio::test]
    async fn test_recompute_with_no_reviews_leaves_rating() {
        let pool = test_pool().await;
        let book = seed_book(&pool).await;

        let review = create_review(&pool, book, Uuid::new_v4(), 5, "").await.unwrap();
        recompute_book_rating(&pool, book).await.unwrap();
        assert_eq!(get_book(&pool, book).await.unwrap().unwrap().rating, 5.0);

        delete_review(&pool, review.id).await.unwrap();
        recompute_book_rating(&pool, book).await.unwrap();
        // No reviews left: the last computed value stays in place.
        assert_eq!(get_book(&pool, book).await.unwrap().unwrap().rating, 5.0);
    }

    #[tokio::test]
    async fn test_view_tolerates_deleted_author_account() {
        let pool = test_pool().await;
        let book = seed_book(&pool).await;
        let review = create_review(&pool, book, Uuid::new_v4(), 4, "solid")
            .await
            .unwrap();

        let view = get_review_view(&pool, review.id).await.unwrap().unwrap();
        assert_eq!(view.rating, 4);
        assert!(view.user_display_name.is_none());
    }
}

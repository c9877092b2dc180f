/**
 * Review Handlers
 *
 * POST   /api/reviews              - create (auth, one per user and book)
 * GET    /api/reviews/{book_id}    - reviews of a book plus aggregates
 * PUT    /api/reviews/{review_id}  - update (owner only)
 * DELETE /api/reviews/{review_id}  - delete (owner only)
 * GET    /api/reviews/user/me      - the caller's reviews (auth)
 *
 * Every write recomputes the book's aggregate rating afterwards.
 */

use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::Deserialize;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::catalog::books::book_exists;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::reviews::db::{self, ReviewView};

#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub book_id: Uuid,
    pub rating: i64,
    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateReviewRequest {
    pub rating: i64,
    #[serde(default)]
    pub comment: String,
}

fn check_rating(rating: i64) -> Result<(), ApiError> {
    if !(1..=5).contains(&rating) {
        return Err(ApiError::bad_request("Rating must be between 1 and 5"));
    }
    Ok(())
}

pub async fn create_review(
    State(pool): State<SqlitePool>,
    auth_user: AuthUser,
    Json(request): Json<CreateReviewRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    check_rating(request.rating)?;

    if !book_exists(&pool, request.book_id).await? {
        return Err(ApiError::not_found("Book not found"));
    }

    let review = db::create_review(
        &pool,
        request.book_id,
        auth_user.user_id,
        request.rating,
        &request.comment,
    )
    .await
    .map_err(|err| match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            ApiError::conflict("You have already reviewed this book")
        }
        _ => err.into(),
    })?;

    db::recompute_book_rating(&pool, request.book_id).await?;
    tracing::info!(
        "Review created for book {} by {}",
        request.book_id,
        auth_user.user_id
    );

    // The enriched re-fetch is best effort; the write already landed.
    let payload = match db::get_review_view(&pool, review.id).await {
        Ok(Some(view)) => serde_json::to_value(view)?,
        Ok(None) => serde_json::to_value(&review)?,
        Err(e) => {
            tracing::warn!("Review {} created but re-fetch failed: {:?}", review.id, e);
            serde_json::to_value(&review)?
        }
    };

    Ok(Json(serde_json::json!({
        "message": "Review submitted successfully",
        "review": payload,
    })))
}

pub async fn list_reviews(
    State(pool): State<SqlitePool>,
    Path(book_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !book_exists(&pool, book_id).await? {
        return Err(ApiError::not_found("Book not found"));
    }

    let reviews = db::reviews_for_book(&pool, book_id).await?;
    let average = if reviews.is_empty() {
        0.0
    } else {
        reviews.iter().map(|r| r.rating as f64).sum::<f64>() / reviews.len() as f64
    };

    Ok(Json(serde_json::json!({
        "reviews": reviews,
        "average_rating": average,
        "total_reviews": reviews.len(),
    })))
}

pub async fn update_review(
    State(pool): State<SqlitePool>,
    Path(review_id): Path<Uuid>,
    auth_user: AuthUser,
    Json(request): Json<UpdateReviewRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    check_rating(request.rating)?;

    let review = db::get_review(&pool, review_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Review not found"))?;
    if review.user_id != auth_user.user_id {
        return Err(ApiError::forbidden("Unauthorized"));
    }

    db::update_review(&pool, review_id, request.rating, &request.comment).await?;
    db::recompute_book_rating(&pool, review.book_id).await?;

    let payload = match db::get_review_view(&pool, review_id).await {
        Ok(Some(view)) => serde_json::to_value(view)?,
        other => {
            if let Err(e) = other {
                tracing::warn!("Review {} updated but re-fetch failed: {:?}", review_id, e);
            }
            serde_json::to_value(&review)?
        }
    };

    Ok(Json(serde_json::json!({ "review": payload })))
}

pub async fn delete_review(
    State(pool): State<SqlitePool>,
    Path(review_id): Path<Uuid>,
    auth_user: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let review = db::get_review(&pool, review_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Review not found"))?;
    if review.user_id != auth_user.user_id {
        return Err(ApiError::forbidden("Unauthorized"));
    }

    db::delete_review(&pool, review_id).await?;
    db::recompute_book_rating(&pool, review.book_id).await?;
    tracing::info!("Review deleted: {}", review_id);

    Ok(Json(serde_json::json!({ "message": "Review deleted" })))
}

pub async fn user_reviews(
    State(pool): State<SqlitePool>,
    auth_user: AuthUser,
) -> Result<Json<Vec<ReviewView>>, ApiError> {
    Ok(Json(db::reviews_for_user(&pool, auth_user.user_id).await?))
}

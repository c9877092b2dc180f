/**
 * Taxonomy Handlers
 *
 * Four identical route groups:
 *
 * GET|POST /api/authors, PUT|DELETE /api/authors/{id}
 * GET|POST /api/categories, PUT|DELETE /api/categories/{id}
 * GET|POST /api/genres, PUT|DELETE /api/genres/{id}
 * GET|POST /api/tags, PUT|DELETE /api/tags/{id}
 */

use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::Deserialize;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::taxonomy::store::{self, NamedEntity};
use crate::taxonomy::Kind;

#[derive(Debug, Deserialize)]
pub struct NameInput {
    pub name: String,
}

async fn list(pool: SqlitePool, kind: Kind) -> Result<Json<Vec<NamedEntity>>, ApiError> {
    Ok(Json(store::list(&pool, kind).await?))
}

async fn create(
    pool: SqlitePool,
    kind: Kind,
    input: NameInput,
) -> Result<Json<NamedEntity>, ApiError> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(ApiError::bad_request("Name is required"));
    }
    let entity = store::create(&pool, kind, name).await?;
    tracing::info!("{} created: {} ({})", kind.label(), entity.name, entity.id);
    Ok(Json(entity))
}

async fn update(
    pool: SqlitePool,
    kind: Kind,
    id: Uuid,
    input: NameInput,
) -> Result<Json<NamedEntity>, ApiError> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(ApiError::bad_request("Name is required"));
    }
    store::update(&pool, kind, id, name)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("{} not found", kind.label())))
}

async fn delete(
    pool: SqlitePool,
    kind: Kind,
    id: Uuid,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !store::delete(&pool, kind, id).await? {
        return Err(ApiError::not_found(format!("{} not found", kind.label())));
    }
    Ok(Json(serde_json::json!({
        "message": format!("{} deleted successfully", kind.label())
    })))
}

macro_rules! taxonomy_handlers {
    ($kind:expr, $list:ident, $create:ident, $update:ident, $delete:ident) => {
        pub async fn $list(
            State(pool): State<SqlitePool>,
        ) -> Result<Json<Vec<NamedEntity>>, ApiError> {
            list(pool, $kind).await
        }

        pub async fn $create(
            State(pool): State<SqlitePool>,
            Json(input): Json<NameInput>,
        ) -> Result<Json<NamedEntity>, ApiError> {
            create(pool, $kind, input).await
        }

        pub async fn $update(
            State(pool): State<SqlitePool>,
            Path(id): Path<Uuid>,
            Json(input): Json<NameInput>,
        ) -> Result<Json<NamedEntity>, ApiError> {
            update(pool, $kind, id, input).await
        }

        pub async fn $delete(
            State(pool): State<SqlitePool>,
            Path(id): Path<Uuid>,
        ) -> Result<Json<serde_json::Value>, ApiError> {
            delete(pool, $kind, id).await
        }
    };
}

taxonomy_handlers!(Kind::Author, list_authors, create_author, update_author, delete_author);
taxonomy_handlers!(
    Kind::Category,
    list_categories,
    create_category,
    update_category,
    delete_category
);
taxonomy_handlers!(Kind::Genre, list_genres, create_genre, update_genre, delete_genre);
taxonomy_handlers!(Kind::Tag, list_tags, create_tag, update_tag, delete_tag);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_pool;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_create_and_list_authors() {
        let pool = test_pool().await;

        create_author(
            State(pool.clone()),
            Json(NameInput {
                name: "Ursula K. Le Guin".into(),
            }),
        )
        .await
        .unwrap();

        let all = list_authors(State(pool)).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Ursula K. Le Guin");
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let pool = test_pool().await;

        let err = create_genre(State(pool), Json(NameInput { name: "  ".into() }))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_missing_tag_is_not_found() {
        let pool = test_pool().await;

        let err = update_tag(
            State(pool),
            Path(Uuid::new_v4()),
            Json(NameInput { name: "sci-fi".into() }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_category() {
        let pool = test_pool().await;
        let created = create_category(
            State(pool.clone()),
            Json(NameInput { name: "Fiction".into() }),
        )
        .await
        .unwrap();

        let response = delete_category(State(pool.clone()), Path(created.id))
            .await
            .unwrap();
        assert_eq!(response["message"], "Category deleted successfully");

        let err = delete_category(State(pool), Path(created.id))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }
}

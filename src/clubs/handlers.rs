/**
 * Club Handlers
 *
 * GET    /api/club                       - all clubs with member sets
 * POST   /api/club                       - create (multipart, auth)
 * GET    /api/club/{id}                  - detail with owner display name
 * PUT    /api/club/{id}                  - update (multipart, auth)
 * DELETE /api/club/{id}                  - delete (auth)
 * POST   /api/club/{id}/join             - join member set (auth)
 * POST   /api/club/{id}/leave            - leave member set (auth, never the owner)
 * GET    /api/club/user                  - clubs the caller owns or joined (auth)
 * GET    /api/club/recommended           - top clubs by member count
 * GET    /api/club/{id}/check-membership - membership probe (auth)
 */

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    response::Json,
};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::auth::users::get_user_by_id;
use crate::clubs::db::{self, ClubWithMembers};
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::uploads::store_upload;

/// Fields extracted from the club multipart form.
struct ClubForm {
    name: String,
    description: Option<String>,
    cover_image: Option<String>,
}

async fn read_club_form(
    upload_dir: &PathBuf,
    mut multipart: Multipart,
) -> Result<ClubForm, ApiError> {
    let mut name = String::new();
    let mut description = None;
    let mut cover_image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::bad_request("Failed to parse form"))?
    {
        match field.name().unwrap_or_default().to_string().as_str() {
            "name" => {
                name = field
                    .text()
                    .await
                    .map_err(|_| ApiError::bad_request("Invalid name field"))?;
            }
            "description" => {
                description = Some(
                    field
                        .text()
                        .await
                        .map_err(|_| ApiError::bad_request("Invalid description field"))?,
                );
            }
            "cover_image" => {
                let filename = field.file_name().unwrap_or("cover").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|_| ApiError::bad_request("Failed to read uploaded file"))?;
                cover_image = Some(store_upload(upload_dir, &filename, &bytes)?);
            }
            _ => {}
        }
    }

    if name.trim().is_empty() {
        return Err(ApiError::bad_request("Club name is required"));
    }
    name = name.trim().to_string();

    Ok(ClubForm {
        name,
        description,
        cover_image,
    })
}

pub async fn create_club(
    State(pool): State<SqlitePool>,
    State(upload_dir): State<Arc<PathBuf>>,
    auth_user: AuthUser,
    multipart: Multipart,
) -> Result<Json<serde_json::Value>, ApiError> {
    let form = read_club_form(&upload_dir, multipart).await?;

    let club = db::create_club(
        &pool,
        &form.name,
        form.description.as_deref(),
        form.cover_image.as_deref(),
        auth_user.user_id,
    )
    .await?;

    tracing::info!("Club created: {} ({})", club.name, club.id);
    Ok(Json(serde_json::json!({
        "message": "Club created successfully",
        "id": club.id,
    })))
}

pub async fn list_clubs(
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<ClubWithMembers>>, ApiError> {
    Ok(Json(db::list_clubs(&pool).await?))
}

pub async fn get_club(
    State(pool): State<SqlitePool>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let club = db::get_club(&pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Club not found"))?;

    // A deleted owner projects as null, not an error.
    let owner_display_name = get_user_by_id(&pool, club.owner_id)
        .await?
        .map(|u| u.displayname);
    let members = db::member_ids(&pool, club.id).await?;

    Ok(Json(serde_json::json!({
        "id": club.id,
        "name": club.name,
        "description": club.description,
        "cover_image": club.cover_image,
        "owner_id": club.owner_id,
        "owner_display_name": owner_display_name,
        "members": members,
        "created_at": club.created_at,
        "updated_at": club.updated_at,
    })))
}

pub async fn join_club(
    State(pool): State<SqlitePool>,
    Path(id): Path<Uuid>,
    auth_user: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    if db::get_club(&pool, id).await?.is_none() {
        return Err(ApiError::not_found("Club not found"));
    }

    db::add_member(&pool, id, auth_user.user_id).await?;
    tracing::info!("User {} joined club {}", auth_user.user_id, id);
    Ok(Json(
        serde_json::json!({ "message": "Joined club successfully" }),
    ))
}

pub async fn leave_club(
    State(pool): State<SqlitePool>,
    Path(id): Path<Uuid>,
    auth_user: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let club = db::get_club(&pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Club not found"))?;

    if club.owner_id == auth_user.user_id {
        return Err(ApiError::forbidden("Owner cannot leave their own club"));
    }

    db::remove_member(&pool, id, auth_user.user_id).await?;
    tracing::info!("User {} left club {}", auth_user.user_id, id);
    Ok(Json(
        serde_json::json!({ "message": "Left club successfully" }),
    ))
}

pub async fn update_club(
    State(pool): State<SqlitePool>,
    State(upload_dir): State<Arc<PathBuf>>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<serde_json::Value>, ApiError> {
    let form = read_club_form(&upload_dir, multipart).await?;

    let updated = db::update_club(
        &pool,
        id,
        &form.name,
        form.description.as_deref(),
        form.cover_image.as_deref(),
    )
    .await?;
    if !updated {
        return Err(ApiError::not_found("Club not found"));
    }

    Ok(Json(serde_json::json!({
        "message": "Club updated successfully",
        "id": id,
    })))
}

pub async fn delete_club(
    State(pool): State<SqlitePool>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !db::delete_club(&pool, id).await? {
        return Err(ApiError::not_found("Club not found"));
    }
    tracing::info!("Club deleted: {}", id);
    Ok(Json(
        serde_json::json!({ "message": "Club deleted successfully" }),
    ))
}

pub async fn user_clubs(
    State(pool): State<SqlitePool>,
    auth_user: AuthUser,
) -> Result<Json<Vec<ClubWithMembers>>, ApiError> {
    Ok(Json(db::clubs_for_user(&pool, auth_user.user_id).await?))
}

pub async fn recommended_clubs(
    State(pool): State<SqlitePool>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let clubs = db::recommended_clubs(&pool).await?;
    Ok(Json(serde_json::json!({ "clubs": clubs })))
}

pub async fn check_membership(
    State(pool): State<SqlitePool>,
    Path(id): Path<Uuid>,
    auth_user: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let is_member = db::is_club_member(&pool, id, auth_user.user_id).await?;
    Ok(Json(serde_json::json!({ "isMember": is_member })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_pool;
    use axum::http::StatusCode;

    fn auth(user_id: Uuid) -> AuthUser {
        AuthUser {
            user_id,
            email: "a@x.com".to_string(),
            display_name: "Alice".to_string(),
        }
    }

    #[tokio::test]
    async fn test_owner_leave_is_forbidden() {
        let pool = test_pool().await;
        let owner = Uuid::new_v4();
        let club = db::create_club(&pool, "Readers", None, None, owner)
            .await
            .unwrap();

        let err = leave_club(State(pool), Path(club.id), auth(owner))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_member_can_join_and_leave() {
        let pool = test_pool().await;
        let owner = Uuid::new_v4();
        let member = Uuid::new_v4();
        let club = db::create_club(&pool, "Readers", None, None, owner)
            .await
            .unwrap();

        join_club(State(pool.clone()), Path(club.id), auth(member))
            .await
            .unwrap();
        assert!(db::is_club_member(&pool, club.id, member).await.unwrap());

        leave_club(State(pool.clone()), Path(club.id), auth(member))
            .await
            .unwrap();
        assert!(!db::is_club_member(&pool, club.id, member).await.unwrap());
    }

    #[tokio::test]
    async fn test_join_missing_club_is_not_found() {
        let pool = test_pool().await;

        let err = join_club(State(pool), Path(Uuid::new_v4()), auth(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_detail_tolerates_deleted_owner() {
        let pool = test_pool().await;
        let club = db::create_club(&pool, "Readers", None, None, Uuid::new_v4())
            .await
            .unwrap();

        let detail = get_club(State(pool), Path(club.id)).await.unwrap();
        assert_eq!(detail["name"], "Readers");
        assert!(detail["owner_display_name"].is_null());
        assert_eq!(detail["members"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_check_membership() {
        let pool = test_pool().await;
        let owner = Uuid::new_v4();
        let club = db::create_club(&pool, "Readers", None, None, owner)
            .await
            .unwrap();

        let yes = check_membership(State(pool.clone()), Path(club.id), auth(owner))
            .await
            .unwrap();
        assert_eq!(yes["isMember"], true);

        let no = check_membership(State(pool), Path(club.id), auth(Uuid::new_v4()))
            .await
            .unwrap();
        assert_eq!(no["isMember"], false);
    }
}

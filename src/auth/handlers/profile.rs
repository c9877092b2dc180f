/**
 * Profile Handlers
 *
 * GET /api/auth/profile - full profile of the authenticated user
 * PUT /api/auth/profile - update display name, bio, and images
 *
 * The update arrives as a multipart form (`displayname`, `bio`,
 * `profile_picture`, `cover_photo`); image fields are handed to the upload
 * store and replaced only when present.
 */

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    response::Json,
};
use sqlx::SqlitePool;

use crate::auth::users::{get_user_by_id, update_profile as store_profile};
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::uploads::store_upload;

pub async fn get_profile(
    State(pool): State<SqlitePool>,
    auth_user: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let user = get_user_by_id(&pool, auth_user.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(serde_json::json!({
        "displayname": user.displayname,
        "profile_img_url": user.profile_img_url,
        "bg_img_url": user.bg_img_url,
        "bio": user.bio,
        "email": user.email,
        "created_at": user.created_at,
        "updated_at": user.updated_at,
    })))
}

pub async fn update_profile(
    State(pool): State<SqlitePool>,
    State(upload_dir): State<Arc<PathBuf>>,
    auth_user: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, ApiError> {
    let user = get_user_by_id(&pool, auth_user.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let mut displayname = user.displayname.clone();
    let mut bio = user.bio.clone().unwrap_or_default();
    let mut profile_img_url: Option<String> = None;
    let mut bg_img_url: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::bad_request("Failed to parse form"))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "displayname" => {
                let value = field
                    .text()
                    .await
                    .map_err(|_| ApiError::bad_request("Invalid displayname field"))?;
                if !value.trim().is_empty() {
                    displayname = value.trim().to_string();
                }
            }
            "bio" => {
                bio = field
                    .text()
                    .await
                    .map_err(|_| ApiError::bad_request("Invalid bio field"))?;
            }
            "profile_picture" | "cover_photo" => {
                let filename = field.file_name().unwrap_or("image").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|_| ApiError::bad_request("Failed to read uploaded file"))?;
                let url = store_upload(&upload_dir, &filename, &bytes)?;
                if name == "profile_picture" {
                    profile_img_url = Some(url);
                } else {
                    bg_img_url = Some(url);
                }
            }
            _ => {}
        }
    }

    store_profile(
        &pool,
        auth_user.user_id,
        &displayname,
        &bio,
        profile_img_url.as_deref(),
        bg_img_url.as_deref(),
    )
    .await?;

    tracing::info!("Profile updated for {}", auth_user.user_id);
    Ok(Json(
        serde_json::json!({ "message": "Profile updated successfully" }),
    ))
}

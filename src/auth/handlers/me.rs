/**
 * Current User Handler
 *
 * GET /api/auth/me
 *
 * Returns the authenticated user's public identity. The token already names
 * the user; the store lookup confirms the account still exists.
 */

use axum::{extract::State, response::Json};
use sqlx::SqlitePool;

use crate::auth::handlers::types::MeResponse;
use crate::auth::users::get_user_by_id;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;

pub async fn get_me(
    State(pool): State<SqlitePool>,
    auth_user: AuthUser,
) -> Result<Json<MeResponse>, ApiError> {
    let user = get_user_by_id(&pool, auth_user.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(MeResponse {
        id: user.id.to_string(),
        displayname: user.displayname,
        profile_img_url: user.profile_img_url,
        email: user.email,
    }))
}

/**
 * Login Handler
 *
 * POST /api/auth/login
 *
 * Looks up the user by email, verifies the password with bcrypt, and
 * issues a session token. Wrong email and wrong password answer the same
 * 401 so the endpoint cannot be used to enumerate accounts.
 */

use std::sync::Arc;

use axum::{extract::State, response::Json};
use bcrypt::verify;
use sqlx::SqlitePool;

use crate::auth::handlers::types::{LoginRequest, LoginResponse};
use crate::auth::sessions::create_token;
use crate::auth::users::get_user_by_email;
use crate::error::ApiError;
use crate::server::config::AuthConfig;

/// Authenticate a user and return a session token.
///
/// # Errors
///
/// * `401 Unauthorized` - unknown email or wrong password
/// * `500 Internal Server Error` - store or token failure
pub async fn login(
    State(pool): State<SqlitePool>,
    State(auth): State<Arc<AuthConfig>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    tracing::info!("Login request for {}", request.email);

    let user = get_user_by_email(&pool, &request.email)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Login for unknown email: {}", request.email);
            ApiError::unauthorized("Invalid email or password")
        })?;

    let valid = verify(&request.password, &user.password_hash).map_err(|e| {
        tracing::error!("Password verification error: {:?}", e);
        ApiError::internal("Verification error")
    })?;

    if !valid {
        tracing::warn!("Invalid password for {}", request.email);
        return Err(ApiError::unauthorized("Invalid email or password"));
    }

    let token = create_token(&user, &auth).map_err(|e| {
        tracing::error!("Failed to create token: {:?}", e);
        ApiError::internal("Failed to create token")
    })?;

    tracing::info!("User logged in: {} ({})", user.displayname, user.email);

    Ok(Json(LoginResponse {
        message: "User login successfully".to_string(),
        token,
        displayname: user.displayname,
        profile_img_url: user.profile_img_url,
    }))
}

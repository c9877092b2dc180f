/**
 * Registration Handler
 *
 * POST /api/auth/register
 *
 * 1. Validate email format, display name, and password length
 * 2. Hash the password with bcrypt
 * 3. Create the user; a duplicate email answers 409
 */

use axum::{extract::State, response::Json};
use bcrypt::{hash, DEFAULT_COST};
use sqlx::SqlitePool;

use crate::auth::handlers::types::{RegisterRequest, RegisterResponse};
use crate::auth::users::{create_user, get_user_by_email};
use crate::error::ApiError;

/// Register a new user.
///
/// # Errors
///
/// * `400 Bad Request` - invalid email, empty display name, short password
/// * `409 Conflict` - a user with this email already exists
/// * `500 Internal Server Error` - hashing or store failure
pub async fn register(
    State(pool): State<SqlitePool>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, ApiError> {
    tracing::info!("Registration request for {}", request.email);

    if !request.email.contains('@') {
        return Err(ApiError::bad_request("Invalid email format"));
    }
    if request.displayname.trim().is_empty() {
        return Err(ApiError::bad_request("Display name is required"));
    }
    if request.password.len() < 8 {
        return Err(ApiError::bad_request(
            "Password must be at least 8 characters",
        ));
    }

    if get_user_by_email(&pool, &request.email).await?.is_some() {
        tracing::warn!("Email already registered: {}", request.email);
        return Err(ApiError::conflict("Email already registered"));
    }

    let password_hash = hash(&request.password, DEFAULT_COST).map_err(|e| {
        tracing::error!("Failed to hash password: {:?}", e);
        ApiError::internal("Hashing error")
    })?;

    // The unique index on email closes the remaining race: a concurrent
    // registration for the same address surfaces as Conflict here.
    let user = create_user(
        &pool,
        request.email.clone(),
        request.displayname.trim().to_string(),
        password_hash,
    )
    .await?;

    tracing::info!("User registered: {} ({})", user.displayname, user.email);

    Ok(Json(RegisterResponse {
        message: "User registered successfully".to_string(),
        user_id: user.id.to_string(),
    }))
}

/**
 * Authentication Middleware
 *
 * Protects routes that require a logged-in user. The middleware extracts
 * the bearer token from the Authorization header, verifies signature and
 * expiry, and attaches the caller's identity to the request extensions.
 *
 * Handlers receive the identity through the `AuthUser` extractor.
 */

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::sessions::{user_id_from_claims, verify_token};
use crate::error::ApiError;
use crate::server::state::AppState;

/// Identity extracted from a verified token.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
    pub display_name: String,
}

/// Verify the bearer token and attach `AuthUser` to the request.
///
/// Returns 401 when the header is missing, malformed, or the token does not
/// verify.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("Missing Authorization header");
            ApiError::unauthorized("Authorization header is required")
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::warn!("Invalid Authorization header format");
        ApiError::unauthorized("Invalid token format")
    })?;

    let claims = verify_token(token, &state.auth).map_err(|e| {
        tracing::warn!("Token rejected: {:?}", e);
        ApiError::unauthorized("Invalid or expired token")
    })?;

    let user_id = user_id_from_claims(&claims).map_err(|e| {
        tracing::error!("Invalid user id in token: {:?}", e);
        ApiError::unauthorized("Invalid token claims")
    })?;

    request.extensions_mut().insert(AuthUser {
        user_id,
        email: claims.email,
        display_name: claims.displayname,
    });

    Ok(next.run(request).await)
}

impl axum::extract::FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<AuthUser>().cloned().ok_or_else(|| {
            tracing::warn!("AuthUser not found in request extensions");
            ApiError::unauthorized("User not authenticated")
        })
    }
}

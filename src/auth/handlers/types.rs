/**
 * Authentication Handler Types
 *
 * Request and response bodies shared by the auth handlers.
 */

use serde::{Deserialize, Serialize};

/// Registration request.
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub displayname: String,
    /// Hashed before storage, never persisted in the clear.
    pub password: String,
}

/// Registration response.
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: String,
}

/// Login request.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response: the session token plus the display fields the client
/// shows immediately after login.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub displayname: String,
    pub profile_img_url: Option<String>,
}

/// Current-user response for `GET /api/auth/me`.
#[derive(Debug, Serialize, Deserialize)]
pub struct MeResponse {
    pub id: String,
    pub displayname: String,
    pub profile_img_url: Option<String>,
    pub email: String,
}

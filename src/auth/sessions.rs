/**
 * Session Tokens
 *
 * Issues and validates the signed, time-limited tokens that carry a user's
 * identity. The token binds {user id, email, display name}; expiry comes
 * from `AuthConfig::token_ttl` rather than a hard-coded constant.
 */

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::auth::users::User;
use crate::server::config::AuthConfig;

/// Token claims.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub email: String,
    pub displayname: String,
    /// Expiration time (Unix timestamp).
    pub exp: u64,
    /// Issued-at time (Unix timestamp).
    pub iat: u64,
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Create a signed token for a user.
pub fn create_token(
    user: &User,
    config: &AuthConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = unix_now();

    let claims = Claims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        displayname: user.displayname.clone(),
        exp: now + config.token_ttl.as_secs(),
        iat: now,
    };

    let key = EncodingKey::from_secret(config.jwt_secret.as_ref());
    encode(&Header::default(), &claims, &key)
}

/// Verify signature and expiry, returning the claims.
pub fn verify_token(
    token: &str,
    config: &AuthConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(config.jwt_secret.as_ref());
    let token_data = decode::<Claims>(token, &key, &Validation::default())?;
    Ok(token_data.claims)
}

/// Extract the user id from a verified token.
pub fn user_id_from_claims(claims: &Claims) -> Result<Uuid, uuid::Error> {
    Uuid::parse_str(&claims.sub)
}

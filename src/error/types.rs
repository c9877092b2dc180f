/**
 * API Error Types
 *
 * This module defines the error enum returned by HTTP handlers and
 * repositories. Each variant carries a human-readable message and maps to
 * exactly one HTTP status code.
 *
 * Store errors are not distinguished by subtype: any `sqlx` failure becomes
 * `Internal`, except "no matching row" which becomes `NotFound`. The
 * conversion lives in `error::conversion`.
 */

use axum::http::StatusCode;
use thiserror::Error;

/// Service-wide error type.
///
/// Every handler returns `Result<_, ApiError>`; the `IntoResponse`
/// implementation renders the error as `{"error": "<message>"}` with the
/// matching status code.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed identifier, body, or enum value.
    #[error("{0}")]
    BadRequest(String),

    /// Missing, invalid, or expired credentials.
    #[error("{0}")]
    Unauthorized(String),

    /// Ownership or membership violation.
    #[error("{0}")]
    Forbidden(String),

    /// The referenced document does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A uniqueness invariant would be violated.
    #[error("{0}")]
    Conflict(String),

    /// Store or encoding failure. Logged at the point of origin.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            ApiError::bad_request("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::unauthorized("x").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::forbidden("x").status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::conflict("x").status_code(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::internal("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_message_passthrough() {
        let err = ApiError::not_found("Book not found");
        assert_eq!(err.to_string(), "Book not found");
    }
}

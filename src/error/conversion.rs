/**
 * Error Conversion
 *
 * Converts `ApiError` into an HTTP response and maps store errors into the
 * service taxonomy.
 *
 * # Response Format
 *
 * ```json
 * {"error": "Book not found"}
 * ```
 */

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::types::ApiError;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("internal error: {}", self);
        }
        let body = serde_json::json!({ "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}

/// Store errors collapse to two cases: a missing row is `NotFound`, a
/// violated unique constraint is `Conflict`, anything else is `Internal`.
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => ApiError::not_found("Not found"),
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                ApiError::conflict("Already exists")
            }
            _ => {
                tracing::error!("database error: {:?}", err);
                ApiError::internal("Database error")
            }
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("serialization error: {:?}", err);
        ApiError::internal("Serialization error")
    }
}

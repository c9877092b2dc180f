/**
 * Router Assembly
 *
 * Combines the API route table with the ambient layers:
 *
 * 1. `/api` routes (public + protected groups)
 * 2. `/uploads` static file serving for stored images
 * 3. A 5-second per-request timeout; an elapsed deadline answers 504
 * 4. A JSON 404 fallback
 */

use std::time::Duration;

use axum::{error_handling::HandleErrorLayer, http::StatusCode, response::Json, BoxError, Router};
use tower::{timeout::TimeoutLayer, ServiceBuilder};
use tower_http::services::ServeDir;

use crate::routes::api_routes::configure_api_routes;
use crate::server::state::AppState;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

async fn handle_layer_error(err: BoxError) -> (StatusCode, Json<serde_json::Value>) {
    if err.is::<tower::timeout::error::Elapsed>() {
        return (
            StatusCode::GATEWAY_TIMEOUT,
            Json(serde_json::json!({ "error": "Request timed out" })),
        );
    }
    tracing::error!("unhandled layer error: {:?}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": "Internal server error" })),
    )
}

async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "Not found" })),
    )
}

/// Create the Axum router with all routes and layers configured.
pub fn create_router(state: AppState) -> Router {
    let uploads = ServeDir::new(state.upload_dir.as_ref());

    configure_api_routes(&state)
        .nest_service("/uploads", uploads)
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_layer_error))
                .layer(TimeoutLayer::new(REQUEST_TIMEOUT)),
        )
        .with_state(state)
}

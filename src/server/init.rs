/**
 * Server Initialization
 *
 * Connects to the store, runs migrations, and assembles the Axum
 * application from configuration. `main` stays thin; tests call
 * `create_app` directly with their own pool.
 */

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::routes::router::create_router;
use crate::server::config::ServerConfig;
use crate::server::state::AppState;

/// Connect to the store and run pending migrations.
pub async fn connect_database(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    tracing::info!("Connecting to database at {}", database_url);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations completed");

    Ok(pool)
}

/// Build the application router from a connected pool and configuration.
///
/// Also makes sure the upload directory exists so `/uploads` serving and
/// multipart handlers have somewhere to write.
pub fn create_app(pool: SqlitePool, config: &ServerConfig) -> axum::Router {
    if let Err(e) = std::fs::create_dir_all(&config.upload_dir) {
        tracing::warn!("Failed to create upload directory: {:?}", e);
    }

    let state = AppState::new(pool, config.auth.clone(), config.upload_dir.clone());
    create_router(state)
}

/**
 * Bookwarm Server Entry Point
 *
 * Loads configuration from the environment, connects to the store, and
 * serves the Axum application.
 */

use bookwarm::server::config::ServerConfig;
use bookwarm::server::init::{connect_database, create_app};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info,bookwarm=debug".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .init();

    let config = ServerConfig::from_env();
    let pool = connect_database(&config.database_url).await?;
    let app = create_app(pool, &config);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

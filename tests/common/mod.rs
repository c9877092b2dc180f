//! Shared fixtures for the API integration tests.
//!
//! Each test gets its own in-memory store and its own temporary upload
//! directory, so tests are independent and can run in parallel.

use std::time::Duration;

use axum_test::TestServer;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tempfile::TempDir;

use bookwarm::routes::create_router;
use bookwarm::server::config::AuthConfig;
use bookwarm::server::state::AppState;

pub struct TestApp {
    pub server: TestServer,
    pub pool: SqlitePool,
    // Held so uploaded files are cleaned up when the app is dropped.
    _upload_dir: TempDir,
}

/// Build a full application over an in-memory store.
pub async fn spawn_app() -> TestApp {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("failed to run migrations");

    let upload_dir = tempfile::tempdir().expect("failed to create upload dir");
    let auth = AuthConfig {
        jwt_secret: "integration-test-secret".to_string(),
        token_ttl: Duration::from_secs(3600),
    };

    let state = AppState::new(pool.clone(), auth, upload_dir.path().to_path_buf());
    let server = TestServer::new(create_router(state)).expect("failed to build test server");

    TestApp {
        server,
        pool,
        _upload_dir: upload_dir,
    }
}

/// Register a user and log in, returning the session token.
pub async fn register_and_login(server: &TestServer, email: &str, displayname: &str) -> String {
    let response = server
        .post("/api/auth/register")
        .json(&serde_json::json!({
            "email": email,
            "displayname": displayname,
            "password": "password123",
        }))
        .await;
    response.assert_status_ok();

    let response = server
        .post("/api/auth/login")
        .json(&serde_json::json!({
            "email": email,
            "password": "password123",
        }))
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    body["token"]
        .as_str()
        .expect("login returned no token")
        .to_string()
}

/// Create a book through the API and return its id.
pub async fn create_book(server: &TestServer, token: &str, title: &str) -> String {
    let response = server
        .post("/api/books")
        .authorization_bearer(token)
        .json(&serde_json::json!({ "title": title }))
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    body["id"].as_str().expect("book has no id").to_string()
}

/// Create a club through the API and return its id.
pub async fn create_club(server: &TestServer, token: &str, name: &str) -> String {
    let form = axum_test::multipart::MultipartForm::new()
        .add_text("name", name.to_string())
        .add_text("description", "A club for tests");

    let response = server
        .post("/api/club")
        .authorization_bearer(token)
        .multipart(form)
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    body["id"].as_str().expect("club has no id").to_string()
}

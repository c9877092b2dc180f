/**
 * Application State
 *
 * `AppState` is the state container handed to the Axum router. Handlers are
 * stateless between requests; everything authoritative lives in the store,
 * which is reached through the injected `SqlitePool` handle (no ambient
 * global connection).
 *
 * The `FromRef` implementations let handlers extract only the part of the
 * state they need, e.g. `State(pool): State<SqlitePool>`.
 */

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::server::config::AuthConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Store connection pool. Injected, never global.
    pub pool: SqlitePool,
    /// Token issuance policy (secret, TTL).
    pub auth: Arc<AuthConfig>,
    /// Directory where uploaded images are written.
    pub upload_dir: Arc<PathBuf>,
}

impl AppState {
    pub fn new(pool: SqlitePool, auth: AuthConfig, upload_dir: PathBuf) -> Self {
        Self {
            pool,
            auth: Arc::new(auth),
            upload_dir: Arc::new(upload_dir),
        }
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<AppState> for Arc<AuthConfig> {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}

impl FromRef<AppState> for Arc<PathBuf> {
    fn from_ref(state: &AppState) -> Self {
        state.upload_dir.clone()
    }
}

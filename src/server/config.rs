/**
 * Server Configuration
 *
 * Configuration is read from environment variables with development
 * defaults. `main` loads a `.env` file first via `dotenv`, so a local
 * checkout only needs a `.env` to override anything.
 *
 * | Variable          | Default               |
 * |-------------------|-----------------------|
 * | `SERVER_PORT`     | `8080`                |
 * | `DATABASE_URL`    | `sqlite:bookwarm.db?mode=rwc` |
 * | `JWT_SECRET`      | dev-only fallback     |
 * | `TOKEN_TTL_HOURS` | `72`                  |
 * | `UPLOAD_DIR`      | `uploads`             |
 */

use std::path::PathBuf;
use std::time::Duration;

/// Token issuance policy: signing secret and time-to-live.
///
/// The TTL is a policy knob, not a constant; historical deployments ranged
/// from minutes to days.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl: Duration,
}

impl AuthConfig {
    pub fn from_env() -> Self {
        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set, using development fallback");
            "bookwarm-dev-secret-change-in-production".to_string()
        });

        let ttl_hours = std::env::var("TOKEN_TTL_HOURS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(72);

        Self {
            jwt_secret,
            token_ttl: Duration::from_secs(ttl_hours * 60 * 60),
        }
    }
}

/// Full server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub database_url: String,
    pub upload_dir: PathBuf,
    pub auth: AuthConfig,
}

impl ServerConfig {
    /// Load configuration from the environment.
    pub fn from_env() -> Self {
        let port = std::env::var("SERVER_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(8080);

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:bookwarm.db?mode=rwc".to_string());

        let upload_dir = std::env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("uploads"));

        Self {
            port,
            database_url,
            upload_dir,
            auth: AuthConfig::from_env(),
        }
    }
}

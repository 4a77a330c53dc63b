use std::path::PathBuf;

use questlab_core::scoring::ScoringConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except `ADMIN_TOKEN` have defaults suitable for local
/// development. The admin credential is deliberately injection-only:
/// there is no baked-in fallback.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Bearer token required on admin endpoints.
    pub admin_token: String,
    /// Base URL under which rendered avatar assets are hosted.
    pub assets_base_url: String,
    /// Path of the catalog snapshot file for the reload endpoint.
    pub store_path: PathBuf,
    /// Base URL of the text-generation inference server.
    pub textgen_url: String,
    /// Starting experience for explicitly created users.
    pub default_exp: f64,
    /// Starting money for explicitly created users.
    pub default_money: i64,
    /// Upper bound on tip regeneration attempts before falling back.
    pub tip_max_attempts: u32,
    /// Activity score tuning constants.
    pub scoring: ScoringConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `ADMIN_TOKEN`          | (required)                 |
    /// | `ASSETS_BASE_URL`      | `http://localhost:3000/assets` |
    /// | `STORE_PATH`           | `./store.json`             |
    /// | `TEXTGEN_URL`          | `http://localhost:9090`    |
    /// | `DEFAULT_EXP`          | `0`                        |
    /// | `DEFAULT_MONEY`        | `200`                      |
    /// | `TIP_MAX_ATTEMPTS`     | `4`                        |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let admin_token = std::env::var("ADMIN_TOKEN").expect("ADMIN_TOKEN must be set");

        let assets_base_url = std::env::var("ASSETS_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000/assets".into());

        let store_path = PathBuf::from(
            std::env::var("STORE_PATH").unwrap_or_else(|_| "./store.json".into()),
        );

        let textgen_url =
            std::env::var("TEXTGEN_URL").unwrap_or_else(|_| "http://localhost:9090".into());

        let default_exp: f64 = std::env::var("DEFAULT_EXP")
            .unwrap_or_else(|_| "0".into())
            .parse()
            .expect("DEFAULT_EXP must be a valid number");

        let default_money: i64 = std::env::var("DEFAULT_MONEY")
            .unwrap_or_else(|_| "200".into())
            .parse()
            .expect("DEFAULT_MONEY must be a valid i64");

        let tip_max_attempts: u32 = std::env::var("TIP_MAX_ATTEMPTS")
            .unwrap_or_else(|_| "4".into())
            .parse()
            .expect("TIP_MAX_ATTEMPTS must be a valid u32");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            admin_token,
            assets_base_url,
            store_path,
            textgen_url,
            default_exp,
            default_money,
            tip_max_attempts,
            scoring: ScoringConfig::default(),
        }
    }
}

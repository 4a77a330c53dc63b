use std::sync::Arc;

use questlab_textgen::TextGenerator;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; inner data is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: questlab_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Text-generation client (trait object so tests can script output).
    pub textgen: Arc<dyn TextGenerator>,
}

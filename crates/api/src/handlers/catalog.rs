//! Handlers for catalog snapshot reads and synchronization.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use questlab_db::models::catalog::CatalogSnapshot;

use crate::engine::catalog;
use crate::error::AppResult;
use crate::middleware::auth::RequireAdmin;
use crate::state::AppState;

/// GET /api/v1/catalog
///
/// Read the full persisted catalog.
pub async fn get_catalog(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let snapshot = catalog::snapshot(&state.pool).await?;
    Ok(Json(snapshot))
}

/// PUT /api/v1/catalog
///
/// Replace the persisted catalog with the supplied snapshot (admin).
/// Absent entries are deleted; the snapshot is authoritative per kind.
pub async fn replace_catalog(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Json(snapshot): Json<CatalogSnapshot>,
) -> AppResult<impl IntoResponse> {
    let result = catalog::reconcile(&state.pool, &snapshot).await?;
    Ok(Json(result))
}

/// POST /api/v1/catalog/reload
///
/// Re-read the configured snapshot file and reconcile from it (admin).
pub async fn reload_catalog(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let result = catalog::reload(&state.pool, &state.config.store_path).await?;
    Ok(Json(result))
}

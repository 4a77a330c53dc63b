//! Route definitions for the catalog store.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Catalog routes mounted at `/catalog`.
///
/// ```text
/// GET  /         -> get_catalog
/// PUT  /         -> replace_catalog (admin)
/// POST /reload   -> reload_catalog (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/catalog",
            get(catalog::get_catalog).put(catalog::replace_catalog),
        )
        .route("/catalog/reload", post(catalog::reload_catalog))
}

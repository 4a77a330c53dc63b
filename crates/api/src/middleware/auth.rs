//! Fixed-credential admin check for Axum handlers.
//!
//! Administrative endpoints (user management, catalog replacement) are
//! guarded by a single bearer token injected via configuration. Telemetry
//! endpoints stay open: they are hit by the device widget, which has no
//! credential store.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use questlab_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Extractor that rejects the request unless it carries the admin token.
///
/// ```ignore
/// async fn my_handler(_admin: RequireAdmin) -> AppResult<Json<()>> { ... }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RequireAdmin;

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        if token != state.config.admin_token {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Invalid admin token".into(),
            )));
        }

        Ok(RequireAdmin)
    }
}

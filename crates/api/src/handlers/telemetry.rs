//! Device-facing telemetry endpoints.
//!
//! Each one runs the same pipeline: lazy-fetch the user, convert the
//! reported signals into an experience floor, promote, then project the
//! result (level state, tip text, or avatar key). No auth: these are hit
//! by the companion widget.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use questlab_core::avatar;

use crate::engine::{progression, tips};
use crate::engine::progression::TelemetrySignals;
use crate::error::AppResult;
use crate::state::AppState;

/// Derived avatar presentation info.
#[derive(Debug, Serialize)]
pub struct AvatarInfo {
    /// Deterministic composite key over the progression state.
    pub key: String,
    /// Resolved asset URL for the current figure image.
    pub url: String,
}

/// GET /api/v1/users/{username}/level
///
/// Score the telemetry, promote, and return the full progression state.
pub async fn get_level(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(signals): Query<TelemetrySignals>,
) -> AppResult<impl IntoResponse> {
    let user = progression::get_user(&state.pool, &username, true).await?;
    let user =
        progression::telemetry_promote(&state.pool, &state.config.scoring, user, &signals).await?;
    Ok(Json(user))
}

/// GET /api/v1/users/{username}/tip
///
/// Score the telemetry, promote, and return a generated tip.
pub async fn get_tip(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(signals): Query<TelemetrySignals>,
) -> AppResult<impl IntoResponse> {
    let user = progression::get_user(&state.pool, &username, true).await?;

    // Category selection needs the pre-promotion timestamp; promotion
    // stamps last_online to now.
    let last_online = user.last_online;
    progression::telemetry_promote(&state.pool, &state.config.scoring, user, &signals).await?;

    let tip = tips::generate_tip(
        state.textgen.as_ref(),
        last_online,
        signals.expavg_score,
        state.config.tip_max_attempts,
    )
    .await?;

    Ok(Json(tip))
}

/// GET /api/v1/users/{username}/avatar
///
/// Score the telemetry, promote, and return the avatar key plus the
/// resolved asset URL. Asset bytes are served by the asset host, not us.
pub async fn get_avatar(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(signals): Query<TelemetrySignals>,
) -> AppResult<impl IntoResponse> {
    let user = progression::get_user(&state.pool, &username, true).await?;
    let user =
        progression::telemetry_promote(&state.pool, &state.config.scoring, user, &signals).await?;

    let key = avatar::avatar_key(
        user.gender.as_str(),
        user.theme.as_str(),
        user.has_android,
        user.total_hosts,
        user.max_streak,
        user.level,
        user.item_level,
    );
    let path = avatar::asset_path(user.gender.as_str(), user.theme.as_str(), user.item_level);
    let url = format!(
        "{}/{path}",
        state.config.assets_base_url.trim_end_matches('/')
    );

    Ok(Json(AvatarInfo { key, url }))
}

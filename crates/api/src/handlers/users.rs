//! Handlers for user management and progression mutations.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use questlab_db::models::catalog::ObjectKind;

use crate::engine::progression;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::RequireAdmin;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 64))]
    pub username: String,
    /// Starting experience; server default when omitted.
    pub default_exp: Option<f64>,
    /// Starting money; server default when omitted.
    pub default_money: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct PromoteRequest {
    pub exp_added: f64,
}

#[derive(Debug, Deserialize)]
pub struct PayRequest {
    pub money_added: i64,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct PurchaseOptions {
    #[serde(default = "default_true")]
    pub select_after_purchase: bool,
}

/// POST /api/v1/users
///
/// Create a new user (admin). 409 if the username is taken.
pub async fn create_user(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let default_exp = input.default_exp.unwrap_or(state.config.default_exp);
    let default_money = input.default_money.unwrap_or(state.config.default_money);

    let user =
        progression::create_user(&state.pool, &input.username, default_exp, default_money).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/v1/users/{username}
///
/// Fetch a user (admin). Strict: 404 when absent.
pub async fn get_user(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<impl IntoResponse> {
    let user = progression::get_user(&state.pool, &username, false).await?;
    Ok(Json(user))
}

/// GET /api/v1/users/{username}/filled
///
/// Fetch a user with every catalog reference resolved (admin).
/// 400 when a referenced object no longer exists.
pub async fn get_user_filled(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<impl IntoResponse> {
    let user = progression::get_user(&state.pool, &username, false).await?;
    let filled = progression::fill_in(&state.pool, user).await?;
    Ok(Json(filled))
}

/// POST /api/v1/users/{username}/promote
///
/// Add experience to a user (admin).
pub async fn promote_user(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(input): Json<PromoteRequest>,
) -> AppResult<impl IntoResponse> {
    let user = progression::get_user(&state.pool, &username, false).await?;
    let user = progression::promote(
        &state.pool,
        user,
        &progression::PromoteArgs {
            exp_added: Some(input.exp_added),
            ..Default::default()
        },
    )
    .await?;

    tracing::info!(username = %user.username, exp_added = input.exp_added, "User promoted");
    Ok(Json(user))
}

/// POST /api/v1/users/{username}/pay
///
/// Add money to a user (admin).
pub async fn pay_user(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(input): Json<PayRequest>,
) -> AppResult<impl IntoResponse> {
    let user = progression::get_user(&state.pool, &username, false).await?;
    let user = progression::pay(&state.pool, user, input.money_added).await?;

    tracing::info!(username = %user.username, money_added = input.money_added, "User paid");
    Ok(Json(user))
}

/// POST /api/v1/users/{username}/purchase/{kind}/{id}
///
/// Purchase a catalog object (admin). By default the object is equipped
/// immediately; pass `?select_after_purchase=false` to only own it.
pub async fn purchase(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path((username, kind, object_id)): Path<(String, ObjectKind, String)>,
    Query(options): Query<PurchaseOptions>,
) -> AppResult<impl IntoResponse> {
    let user = progression::purchase(
        &state.pool,
        &username,
        kind,
        &object_id,
        options.select_after_purchase,
    )
    .await?;
    Ok(Json(user))
}

/// POST /api/v1/users/{username}/gender
///
/// Toggle gender. Lazily creates the user; device-facing, no auth.
pub async fn switch_gender(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<impl IntoResponse> {
    progression::switch_gender(&state.pool, &username).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/users/{username}/theme
///
/// Toggle theme. Lazily creates the user; device-facing, no auth.
pub async fn switch_theme(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<impl IntoResponse> {
    progression::switch_theme(&state.pool, &username).await?;
    Ok(StatusCode::NO_CONTENT)
}

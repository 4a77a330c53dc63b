//! Route definitions for user management, progression, and telemetry.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{telemetry, users};
use crate::state::AppState;

/// User routes mounted at `/users`.
///
/// ```text
/// POST /                                    -> create_user (admin)
/// GET  /{username}                          -> get_user (admin)
/// GET  /{username}/filled                   -> get_user_filled (admin)
/// POST /{username}/promote                  -> promote_user (admin)
/// POST /{username}/pay                      -> pay_user (admin)
/// POST /{username}/purchase/{kind}/{id}     -> purchase (admin)
/// POST /{username}/gender                   -> switch_gender
/// POST /{username}/theme                    -> switch_theme
/// GET  /{username}/level                    -> get_level (telemetry)
/// GET  /{username}/tip                      -> get_tip (telemetry)
/// GET  /{username}/avatar                   -> get_avatar (telemetry)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", post(users::create_user))
        .route("/users/{username}", get(users::get_user))
        .route("/users/{username}/filled", get(users::get_user_filled))
        .route("/users/{username}/promote", post(users::promote_user))
        .route("/users/{username}/pay", post(users::pay_user))
        .route(
            "/users/{username}/purchase/{kind}/{id}",
            post(users::purchase),
        )
        .route("/users/{username}/gender", post(users::switch_gender))
        .route("/users/{username}/theme", post(users::switch_theme))
        .route("/users/{username}/level", get(telemetry::get_level))
        .route("/users/{username}/tip", get(telemetry::get_tip))
        .route("/users/{username}/avatar", get(telemetry::get_avatar))
}

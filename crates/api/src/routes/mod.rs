pub mod catalog;
pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users                                    create (admin)
/// /users/{username}                         get (admin)
/// /users/{username}/filled                  get with resolved objects (admin)
/// /users/{username}/promote                 add experience (admin)
/// /users/{username}/pay                     add money (admin)
/// /users/{username}/purchase/{kind}/{id}    purchase object (admin)
/// /users/{username}/gender                  toggle gender
/// /users/{username}/theme                   toggle theme
/// /users/{username}/level                   telemetry -> progression state
/// /users/{username}/tip                     telemetry -> generated tip
/// /users/{username}/avatar                  telemetry -> avatar key + URL
///
/// /catalog                                  get snapshot, replace (admin)
/// /catalog/reload                           reload from file (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(users::router())
        .merge(catalog::router())
}

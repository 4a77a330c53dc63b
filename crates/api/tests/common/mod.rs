#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use questlab_api::config::ServerConfig;
use questlab_api::router::build_app_router;
use questlab_api::state::AppState;
use questlab_core::scoring::ScoringConfig;
use questlab_textgen::{TextGenError, TextGenerator};

/// Admin token used by every test.
pub const ADMIN_TOKEN: &str = "test-admin-token";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        admin_token: ADMIN_TOKEN.to_string(),
        assets_base_url: "http://localhost:3000/assets".to_string(),
        store_path: PathBuf::from("./store.json"),
        textgen_url: "http://localhost:9090".to_string(),
        default_exp: 0.0,
        default_money: 200,
        tip_max_attempts: 3,
        scoring: ScoringConfig::default(),
    }
}

/// Text generator that appends a period to the seed.
///
/// Output is always acceptable, so tests that don't care about generation
/// behaviour get a deterministic tip on the first attempt.
pub struct EchoTextGenerator;

#[async_trait::async_trait]
impl TextGenerator for EchoTextGenerator {
    async fn generate(&self, seed: &str) -> Result<String, TextGenError> {
        Ok(format!("{seed}."))
    }
}

/// One scripted generator outcome.
pub enum Scripted {
    Text(&'static str),
    Outage,
}

/// Text generator that replays a script, then echoes.
pub struct ScriptedTextGenerator {
    responses: Mutex<VecDeque<Scripted>>,
}

impl ScriptedTextGenerator {
    pub fn new(responses: Vec<Scripted>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
        })
    }
}

#[async_trait::async_trait]
impl TextGenerator for ScriptedTextGenerator {
    async fn generate(&self, seed: &str) -> Result<String, TextGenError> {
        match self.responses.lock().unwrap().pop_front() {
            Some(Scripted::Text(text)) => Ok(text.to_string()),
            Some(Scripted::Outage) => Err(TextGenError::Connection("scripted outage".into())),
            None => Ok(format!("{seed}.")),
        }
    }
}

/// Build the application router with a custom config and generator.
///
/// Mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack that production uses.
pub fn build_test_app_with(
    pool: PgPool,
    config: ServerConfig,
    textgen: Arc<dyn TextGenerator>,
) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        textgen,
    };
    build_app_router(state, &config)
}

/// Build the application router with test defaults.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config(), Arc::new(EchoTextGenerator))
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn get_auth(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("GET")
            .uri(uri)
            .header("authorization", format!("Bearer {ADMIN_TOKEN}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_auth(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("authorization", format!("Bearer {ADMIN_TOKEN}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json_auth(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .header("authorization", format!("Bearer {ADMIN_TOKEN}"))
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn put_json_auth(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("PUT")
            .uri(uri)
            .header("content-type", "application/json")
            .header("authorization", format!("Bearer {ADMIN_TOKEN}"))
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

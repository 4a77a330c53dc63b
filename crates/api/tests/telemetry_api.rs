//! HTTP-level integration tests for the telemetry-driven endpoints
//! (level, tip, avatar).

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, Scripted, ScriptedTextGenerator};
use sqlx::PgPool;

use questlab_db::models::rules::RuleLevel;
use questlab_db::repositories::RuleRepo;

/// Telemetry query for a host registered long ago: the age term saturates
/// the sigmoid, so the score approaches `50 * (cpus + 1)`.
const OLD_HOST: &str = "expavg_score=0.0&cpus=0&registration_time=2020-01-01T00:00:00Z";

// ---------------------------------------------------------------------------
// Level
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn level_lazily_creates_and_scores(pool: PgPool) {
    RuleRepo::upsert_level(&pool, &RuleLevel { level: 2, exp_gte: 30.0 })
        .await
        .unwrap();

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/users/bob/level?{OLD_HOST}")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    // Score saturates just under 50, clearing the level-2 threshold.
    assert!(json["total_exp"].as_f64().unwrap() > 30.0);
    assert!(json["total_exp"].as_f64().unwrap() < 50.0);
    assert_eq!(json["level"], 2);

    // The lazily created user is persisted.
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/users/bob").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn absolute_score_never_regresses_experience(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, &format!("/api/v1/users/bob/level?{OLD_HOST}")).await).await;
    let first_exp = json["total_exp"].as_f64().unwrap();

    // A much younger registration produces a lower score; experience must
    // hold at the max of the two.
    let app = common::build_test_app(pool);
    let young = "expavg_score=0.0&cpus=0&registration_time=2026-01-01T00:00:00Z";
    let json = body_json(get(app, &format!("/api/v1/users/bob/level?{young}")).await).await;
    assert!(json["total_exp"].as_f64().unwrap() >= first_exp);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn android_flag_latches_and_hosts_overwrite(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let with_android =
        "expavg_score=0.0&cpus=4&registration_time=2020-01-01T00:00:00Z&has_android=true";
    get(app, &format!("/api/v1/users/bob/level?{with_android}")).await;

    // Next ping without the flag and with fewer workers.
    let app = common::build_test_app(pool.clone());
    let quieter = "expavg_score=0.0&cpus=2&registration_time=2020-01-01T00:00:00Z";
    let json = body_json(get(app, &format!("/api/v1/users/bob/level?{quieter}")).await).await;

    assert_eq!(json["has_android"], true);
    assert_eq!(json["total_hosts"], 2);
}

// ---------------------------------------------------------------------------
// Avatar
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn avatar_returns_key_and_asset_url(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/users/bob/avatar?{OLD_HOST}")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    // Fresh user, no rules seeded: male/light, no android, single host,
    // streak bucket 1, level 1, item tier 1.
    assert_eq!(json["key"], "male_light_0_0_1_1_1");
    assert_eq!(
        json["url"],
        "http://localhost:3000/assets/light/adv_man/adv_man_1.png"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn avatar_reflects_multihost(pool: PgPool) {
    let app = common::build_test_app(pool);
    let multi = "expavg_score=0.0&cpus=4&registration_time=2020-01-01T00:00:00Z";
    let json = body_json(get(app, &format!("/api/v1/users/bob/avatar?{multi}")).await).await;

    let key = json["key"].as_str().unwrap();
    assert!(key.starts_with("male_light_0_1_"), "unexpected key: {key}");
}

// ---------------------------------------------------------------------------
// Tips
// ---------------------------------------------------------------------------

fn scripted_app(pool: PgPool, script: Vec<Scripted>) -> axum::Router {
    common::build_test_app_with(pool, common::test_config(), ScriptedTextGenerator::new(script))
}

#[sqlx::test(migrations = "../db/migrations")]
async fn tip_returns_polished_generator_output(pool: PgPool) {
    let app = scripted_app(
        pool,
        vec![Scripted::Text("Keep the burners warm.\nand the next li")],
    );
    let response = get(app, &format!("/api/v1/users/bob/tip?{OLD_HOST}")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    // Trailing line dropped by cleanup.
    assert_eq!(json["text"], "Keep the burners warm.");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn tip_with_digits_is_regenerated(pool: PgPool) {
    let app = scripted_app(
        pool,
        vec![
            Scripted::Text("You crunched 42 units today"),
            Scripted::Text("A calm day in the lab"),
        ],
    );
    let json = body_json(get(app, &format!("/api/v1/users/bob/tip?{OLD_HOST}")).await).await;

    assert_eq!(json["text"], "A calm day in the lab.");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn tip_exhaustion_falls_back_to_a_static_phrase(pool: PgPool) {
    // Three attempts allowed by the test config; all unacceptable.
    let app = scripted_app(
        pool,
        vec![
            Scripted::Text("1"),
            Scripted::Text("2"),
            Scripted::Text("3"),
        ],
    );
    let json = body_json(get(app, &format!("/api/v1/users/bob/tip?{OLD_HOST}")).await).await;

    let text = json["text"].as_str().unwrap();
    assert!(!text.is_empty());
    assert!(
        !text.chars().any(|c| c.is_numeric()),
        "fallback tip must not contain digits: {text}"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn tip_generator_outage_returns_502(pool: PgPool) {
    let app = scripted_app(pool, vec![Scripted::Outage]);
    let response = get(app, &format!("/api/v1/users/bob/tip?{OLD_HOST}")).await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UPSTREAM_GENERATION_FAILED");
}

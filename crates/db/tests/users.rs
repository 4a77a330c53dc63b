//! Integration tests for the user repository: seeded defaults and the
//! optimistic-concurrency write path.

use sqlx::PgPool;

use questlab_db::models::user::{Gender, Theme};
use questlab_db::repositories::UserRepo;

#[sqlx::test(migrations = "./migrations")]
async fn create_seeds_defaults(pool: PgPool) {
    let user = UserRepo::create(&pool, "alice", 0.0, 200).await.unwrap();

    assert_eq!(user.username, "alice");
    assert_eq!(user.gender, Gender::Male);
    assert_eq!(user.theme, Theme::Light);
    assert_eq!(user.level, 1);
    assert_eq!(user.item_level, 1);
    assert_eq!(user.total_money, 200);
    assert_eq!(user.table, "default");
    assert_eq!(user.chair, "default");
    assert_eq!(user.owned_tables, vec!["default".to_string()]);
    assert_eq!(user.owned_chairs, vec!["default".to_string()]);
    assert!(user.owned_misc.is_empty());
    assert!(user.misc.is_empty());
    assert_eq!(user.version, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_username_is_rejected(pool: PgPool) {
    UserRepo::create(&pool, "alice", 0.0, 0).await.unwrap();
    let err = UserRepo::create(&pool, "alice", 0.0, 0).await.unwrap_err();

    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.code().as_deref(), Some("23505"));
        }
        other => panic!("expected unique violation, got {other:?}"),
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn find_by_username_misses_cleanly(pool: PgPool) {
    assert!(UserRepo::find_by_username(&pool, "ghost").await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn update_bumps_the_version_token(pool: PgPool) {
    let mut user = UserRepo::create(&pool, "alice", 0.0, 200).await.unwrap();
    user.total_exp = 42.0;

    let updated = UserRepo::update(&pool, &user).await.unwrap().unwrap();
    assert!((updated.total_exp - 42.0).abs() < f64::EPSILON);
    assert_eq!(updated.version, user.version + 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn stale_version_write_is_refused(pool: PgPool) {
    let fresh = UserRepo::create(&pool, "alice", 0.0, 200).await.unwrap();

    // First writer wins.
    let mut first = fresh.clone();
    first.total_money = 500;
    assert!(UserRepo::update(&pool, &first).await.unwrap().is_some());

    // Second writer still holds the old token and must be refused.
    let mut second = fresh;
    second.total_money = 999;
    assert!(UserRepo::update(&pool, &second).await.unwrap().is_none());

    let stored = UserRepo::find_by_username(&pool, "alice").await.unwrap().unwrap();
    assert_eq!(stored.total_money, 500);
}

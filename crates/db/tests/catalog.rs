//! Integration tests for the polymorphic catalog repository.

use sqlx::PgPool;

use questlab_db::models::catalog::{CatalogObject, ObjectKind};
use questlab_db::repositories::CatalogRepo;

fn object(id: &str, cost: i64) -> CatalogObject {
    CatalogObject {
        id: id.to_string(),
        description: format!("{id} description"),
        asset: format!("{id}.png"),
        cost,
        min_level: 1,
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn kinds_are_isolated_namespaces(pool: PgPool) {
    CatalogRepo::upsert(&pool, ObjectKind::Table, &object("oak", 100)).await.unwrap();
    CatalogRepo::upsert(&pool, ObjectKind::Chair, &object("oak", 50)).await.unwrap();

    let table = CatalogRepo::find(&pool, ObjectKind::Table, "oak").await.unwrap().unwrap();
    let chair = CatalogRepo::find(&pool, ObjectKind::Chair, "oak").await.unwrap().unwrap();
    assert_eq!(table.cost, 100);
    assert_eq!(chair.cost, 50);

    assert!(CatalogRepo::find(&pool, ObjectKind::Misc, "oak").await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn upsert_overwrites_and_still_counts(pool: PgPool) {
    assert_eq!(
        CatalogRepo::upsert(&pool, ObjectKind::Table, &object("oak", 100)).await.unwrap(),
        1
    );
    assert_eq!(
        CatalogRepo::upsert(&pool, ObjectKind::Table, &object("oak", 150)).await.unwrap(),
        1
    );

    let stored = CatalogRepo::find(&pool, ObjectKind::Table, "oak").await.unwrap().unwrap();
    assert_eq!(stored.cost, 150);
    assert_eq!(CatalogRepo::list(&pool, ObjectKind::Table).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn list_by_ids_skips_missing(pool: PgPool) {
    CatalogRepo::upsert(&pool, ObjectKind::Misc, &object("flask", 10)).await.unwrap();
    CatalogRepo::upsert(&pool, ObjectKind::Misc, &object("burner", 20)).await.unwrap();

    let found = CatalogRepo::list_by_ids(
        &pool,
        ObjectKind::Misc,
        &["flask".to_string(), "ghost".to_string()],
    )
    .await
    .unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, "flask");
}

#[sqlx::test(migrations = "./migrations")]
async fn delete_absent_prunes_only_the_given_kind(pool: PgPool) {
    CatalogRepo::upsert(&pool, ObjectKind::Table, &object("oak", 100)).await.unwrap();
    CatalogRepo::upsert(&pool, ObjectKind::Table, &object("pine", 80)).await.unwrap();
    CatalogRepo::upsert(&pool, ObjectKind::Chair, &object("stool", 30)).await.unwrap();

    let deleted = CatalogRepo::delete_absent(&pool, ObjectKind::Table, &["oak".to_string()])
        .await
        .unwrap();
    assert_eq!(deleted, 1);

    // The chair survives a table prune.
    assert!(CatalogRepo::find(&pool, ObjectKind::Chair, "stool").await.unwrap().is_some());
    let tables: Vec<String> = CatalogRepo::list(&pool, ObjectKind::Table)
        .await
        .unwrap()
        .into_iter()
        .map(|o| o.id)
        .collect();
    assert_eq!(tables, vec!["oak".to_string()]);
}

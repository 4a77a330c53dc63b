//! Catalog snapshot assembly and reconciliation.

use std::path::Path;

use sqlx::PgPool;

use questlab_db::models::catalog::{CatalogSnapshot, ObjectKind, SyncResult};
use questlab_db::repositories::{CatalogRepo, RuleRepo};

use crate::error::{AppError, AppResult};

/// Read the full persisted catalog as one snapshot.
pub async fn snapshot(pool: &PgPool) -> AppResult<CatalogSnapshot> {
    Ok(CatalogSnapshot {
        tables: CatalogRepo::list(pool, ObjectKind::Table).await?,
        chairs: CatalogRepo::list(pool, ObjectKind::Chair).await?,
        misc: CatalogRepo::list(pool, ObjectKind::Misc).await?,
        rule_levels: RuleRepo::list_levels(pool).await?,
        rule_items: RuleRepo::list_items(pool).await?,
    })
}

/// Make the incoming snapshot authoritative, kind by kind.
///
/// For each of the five entity kinds: upsert everything present (every
/// upsert counts toward `modified_count`, overwrites included), then
/// delete whatever the snapshot no longer mentions. Kinds reconcile
/// independently; a failure part-way leaves earlier kinds applied.
pub async fn reconcile(pool: &PgPool, snapshot: &CatalogSnapshot) -> AppResult<SyncResult> {
    let mut result = SyncResult::default();

    let object_sets = [
        (ObjectKind::Table, &snapshot.tables),
        (ObjectKind::Chair, &snapshot.chairs),
        (ObjectKind::Misc, &snapshot.misc),
    ];
    for (kind, objects) in object_sets {
        for object in objects {
            result.modified_count += CatalogRepo::upsert(pool, kind, object).await?;
        }
        let keep: Vec<String> = objects.iter().map(|o| o.id.clone()).collect();
        result.deleted_count += CatalogRepo::delete_absent(pool, kind, &keep).await?;
    }

    for rule in &snapshot.rule_levels {
        result.modified_count += RuleRepo::upsert_level(pool, rule).await?;
    }
    let keep_levels: Vec<i32> = snapshot.rule_levels.iter().map(|r| r.level).collect();
    result.deleted_count += RuleRepo::delete_levels_absent(pool, &keep_levels).await?;

    for rule in &snapshot.rule_items {
        result.modified_count += RuleRepo::upsert_item(pool, rule).await?;
    }
    let keep_items: Vec<String> = snapshot.rule_items.iter().map(|r| r.item.clone()).collect();
    result.deleted_count += RuleRepo::delete_items_absent(pool, &keep_items).await?;

    tracing::info!(
        modified = result.modified_count,
        deleted = result.deleted_count,
        "Catalog reconciled",
    );
    Ok(result)
}

/// Reload the catalog from the configured snapshot file.
pub async fn reload(pool: &PgPool, path: &Path) -> AppResult<SyncResult> {
    let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
        AppError::InternalError(format!("Failed to read catalog snapshot {}: {e}", path.display()))
    })?;

    let snapshot: CatalogSnapshot = serde_json::from_str(&raw).map_err(|e| {
        AppError::InternalError(format!(
            "Invalid catalog snapshot {}: {e}",
            path.display()
        ))
    })?;

    reconcile(pool, &snapshot).await
}

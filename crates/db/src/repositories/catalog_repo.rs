//! Repository for the `catalog_objects` table.
//!
//! One polymorphic table serves all three collections; every operation is
//! parameterized by [`ObjectKind`] instead of duplicating per-type code.

use sqlx::PgPool;

use crate::models::catalog::{CatalogObject, ObjectKind};

const COLUMNS: &str = "id, description, asset, cost, min_level";

/// Lookup and sync operations for purchasable objects.
pub struct CatalogRepo;

impl CatalogRepo {
    /// Find one object by kind and id.
    pub async fn find(
        pool: &PgPool,
        kind: ObjectKind,
        id: &str,
    ) -> Result<Option<CatalogObject>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM catalog_objects WHERE kind = $1 AND id = $2");
        sqlx::query_as::<_, CatalogObject>(&query)
            .bind(kind)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All objects of one kind, id-ordered.
    pub async fn list(pool: &PgPool, kind: ObjectKind) -> Result<Vec<CatalogObject>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM catalog_objects WHERE kind = $1 ORDER BY id");
        sqlx::query_as::<_, CatalogObject>(&query)
            .bind(kind)
            .fetch_all(pool)
            .await
    }

    /// Objects of one kind restricted to the given ids, id-ordered.
    ///
    /// Missing ids are simply absent from the result; the caller decides
    /// whether that is an error.
    pub async fn list_by_ids(
        pool: &PgPool,
        kind: ObjectKind,
        ids: &[String],
    ) -> Result<Vec<CatalogObject>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM catalog_objects
             WHERE kind = $1 AND id = ANY($2)
             ORDER BY id"
        );
        sqlx::query_as::<_, CatalogObject>(&query)
            .bind(kind)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Upsert one object keyed by `(kind, id)`.
    pub async fn upsert(
        pool: &PgPool,
        kind: ObjectKind,
        object: &CatalogObject,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO catalog_objects (kind, id, description, asset, cost, min_level)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (kind, id) DO UPDATE SET
                description = EXCLUDED.description,
                asset = EXCLUDED.asset,
                cost = EXCLUDED.cost,
                min_level = EXCLUDED.min_level",
        )
        .bind(kind)
        .bind(&object.id)
        .bind(&object.description)
        .bind(&object.asset)
        .bind(object.cost)
        .bind(object.min_level)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete every object of `kind` whose id is not in `keep`.
    pub async fn delete_absent(
        pool: &PgPool,
        kind: ObjectKind,
        keep: &[String],
    ) -> Result<u64, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM catalog_objects WHERE kind = $1 AND NOT (id = ANY($2))")
                .bind(kind)
                .bind(keep)
                .execute(pool)
                .await?;
        Ok(result.rows_affected())
    }
}

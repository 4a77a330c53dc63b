//! Repository for the `rule_levels` and `rule_items` threshold tables.
//!
//! Both tables answer the same two questions: "which threshold has this
//! experience already cleared" (greatest lower bound, strict) and "what is
//! the rule at an exact level". GLB queries order by `exp_gte DESC` with a
//! `level DESC` tie-break so duplicate thresholds resolve deterministically.

use sqlx::PgPool;

use crate::models::rules::{RuleItem, RuleLevel};

/// Lookup and sync operations for progression rules.
pub struct RuleRepo;

impl RuleRepo {
    // -- level rules --

    /// Highest level rule with `exp_gte` strictly below `exp`, if any.
    pub async fn level_for_exp(pool: &PgPool, exp: f64) -> Result<Option<RuleLevel>, sqlx::Error> {
        sqlx::query_as::<_, RuleLevel>(
            "SELECT level, exp_gte FROM rule_levels
             WHERE exp_gte < $1
             ORDER BY exp_gte DESC, level DESC
             LIMIT 1",
        )
        .bind(exp)
        .fetch_optional(pool)
        .await
    }

    /// Exact-match lookup by level number.
    pub async fn level_at(pool: &PgPool, level: i32) -> Result<Option<RuleLevel>, sqlx::Error> {
        sqlx::query_as::<_, RuleLevel>("SELECT level, exp_gte FROM rule_levels WHERE level = $1")
            .bind(level)
            .fetch_optional(pool)
            .await
    }

    /// All level rules, threshold-ordered.
    pub async fn list_levels(pool: &PgPool) -> Result<Vec<RuleLevel>, sqlx::Error> {
        sqlx::query_as::<_, RuleLevel>("SELECT level, exp_gte FROM rule_levels ORDER BY exp_gte")
            .fetch_all(pool)
            .await
    }

    /// Upsert one level rule keyed by level number.
    pub async fn upsert_level(pool: &PgPool, rule: &RuleLevel) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO rule_levels (level, exp_gte) VALUES ($1, $2)
             ON CONFLICT (level) DO UPDATE SET exp_gte = EXCLUDED.exp_gte",
        )
        .bind(rule.level)
        .bind(rule.exp_gte)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete every level rule whose level is not in `keep`.
    pub async fn delete_levels_absent(pool: &PgPool, keep: &[i32]) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM rule_levels WHERE NOT (level = ANY($1))")
            .bind(keep)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    // -- item rules --

    /// Highest item rule with `exp_gte` strictly below `exp`, if any.
    pub async fn item_for_exp(pool: &PgPool, exp: f64) -> Result<Option<RuleItem>, sqlx::Error> {
        sqlx::query_as::<_, RuleItem>(
            "SELECT item, level, exp_gte FROM rule_items
             WHERE exp_gte < $1
             ORDER BY exp_gte DESC, level DESC
             LIMIT 1",
        )
        .bind(exp)
        .fetch_optional(pool)
        .await
    }

    /// Exact-match lookup by item tier level.
    pub async fn item_at_level(pool: &PgPool, level: i32) -> Result<Option<RuleItem>, sqlx::Error> {
        sqlx::query_as::<_, RuleItem>(
            "SELECT item, level, exp_gte FROM rule_items
             WHERE level = $1
             ORDER BY exp_gte, item
             LIMIT 1",
        )
        .bind(level)
        .fetch_optional(pool)
        .await
    }

    /// All item rules, threshold-ordered.
    pub async fn list_items(pool: &PgPool) -> Result<Vec<RuleItem>, sqlx::Error> {
        sqlx::query_as::<_, RuleItem>(
            "SELECT item, level, exp_gte FROM rule_items ORDER BY exp_gte",
        )
        .fetch_all(pool)
        .await
    }

    /// Upsert one item rule keyed by item token.
    pub async fn upsert_item(pool: &PgPool, rule: &RuleItem) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO rule_items (item, level, exp_gte) VALUES ($1, $2, $3)
             ON CONFLICT (item) DO UPDATE
                SET level = EXCLUDED.level, exp_gte = EXCLUDED.exp_gte",
        )
        .bind(&rule.item)
        .bind(rule.level)
        .bind(rule.exp_gte)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete every item rule whose token is not in `keep`.
    pub async fn delete_items_absent(pool: &PgPool, keep: &[String]) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM rule_items WHERE NOT (item = ANY($1))")
            .bind(keep)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}

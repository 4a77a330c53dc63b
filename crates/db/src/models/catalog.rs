//! Purchasable catalog objects and the snapshot payload.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::rules::{RuleItem, RuleLevel};

/// The three catalog collections, as one tag instead of per-type code paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "object_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Table,
    Chair,
    Misc,
}

impl ObjectKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Chair => "chair",
            Self::Misc => "misc",
        }
    }
}

/// A purchasable cosmetic object. Immutable outside catalog sync.
///
/// The kind is carried separately (snapshot arrays are already per kind),
/// so the same shape serves tables, chairs, and misc items.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CatalogObject {
    pub id: String,
    pub description: String,
    pub asset: String,
    pub cost: i64,
    pub min_level: i32,
}

/// Full catalog snapshot: the unit of bulk synchronization and the on-disk
/// reload format. Not a persistent entity itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub tables: Vec<CatalogObject>,
    #[serde(default)]
    pub chairs: Vec<CatalogObject>,
    #[serde(default)]
    pub misc: Vec<CatalogObject>,
    #[serde(default)]
    pub rule_levels: Vec<RuleLevel>,
    #[serde(default)]
    pub rule_items: Vec<RuleItem>,
}

/// Outcome of one snapshot reconciliation.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SyncResult {
    pub modified_count: u64,
    pub deleted_count: u64,
}

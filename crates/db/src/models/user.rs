//! User entity model and projections.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use questlab_core::types::Timestamp;

use crate::models::catalog::CatalogObject;

/// Two-valued gender field, toggled by the switch endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "gender", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn toggled(self) -> Self {
        match self {
            Self::Male => Self::Female,
            Self::Female => Self::Male,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

/// Two-valued presentation theme, toggled by the switch endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "theme", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Full user row from the `users` table.
///
/// Invariants maintained by the promotion engine: `total_exp`, `level`,
/// `item_level`, and the `owned_*` sets only grow; `current_streak` never
/// exceeds `max_streak`; an equipped id is always a member of the matching
/// owned set.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub username: String,
    pub gender: Gender,
    pub theme: Theme,
    pub last_online: Timestamp,
    pub level: i32,
    pub level_name: String,
    pub year: String,
    pub until_next_level: f64,
    pub total_exp: f64,
    pub total_money: i64,
    pub item_level: i32,
    pub next_item: String,
    pub until_next_item: f64,
    pub current_streak: i32,
    pub max_streak: i32,
    pub has_android: bool,
    pub total_hosts: i32,
    /// Equipped table id.
    #[sqlx(rename = "table_id")]
    pub table: String,
    /// Equipped chair id.
    #[sqlx(rename = "chair_id")]
    pub chair: String,
    /// Equipped misc ids (multi-valued slot).
    pub misc: Vec<String>,
    pub owned_tables: Vec<String>,
    pub owned_chairs: Vec<String>,
    pub owned_misc: Vec<String>,
    /// Optimistic concurrency token; internal, never exposed.
    #[serde(skip_serializing)]
    pub version: i64,
    #[serde(skip_serializing)]
    pub created_at: Timestamp,
    #[serde(skip_serializing)]
    pub updated_at: Timestamp,
}

/// User with every referenced catalog id resolved to the full object.
#[derive(Debug, Clone, Serialize)]
pub struct UserFilled {
    pub username: String,
    pub gender: Gender,
    pub theme: Theme,
    pub level: i32,
    pub total_exp: f64,
    pub total_money: i64,
    pub table: CatalogObject,
    pub chair: CatalogObject,
    pub misc: Vec<CatalogObject>,
    pub owned_tables: Vec<CatalogObject>,
    pub owned_chairs: Vec<CatalogObject>,
    pub owned_misc: Vec<CatalogObject>,
}

/// Tip payload returned by the tip endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct UserTip {
    pub text: String,
}

//! Progression threshold rules.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Minimum cumulative experience required for a level.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct RuleLevel {
    pub level: i32,
    pub exp_gte: f64,
}

/// Minimum cumulative experience required for an item tier.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct RuleItem {
    /// Item tier token (e.g. `"microscope"`).
    pub item: String,
    pub level: i32,
    pub exp_gte: f64,
}

//! Repository for the `users` table.

use sqlx::PgPool;

use crate::models::user::User;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "username, gender, theme, last_online, level, level_name, year, \
                       until_next_level, total_exp, total_money, item_level, next_item, \
                       until_next_item, current_streak, max_streak, has_android, total_hosts, \
                       table_id, chair_id, misc, owned_tables, owned_chairs, owned_misc, \
                       version, created_at, updated_at";

/// CRUD operations for users, keyed by username.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user with seeded defaults, returning the created row.
    ///
    /// Everything beyond the starting experience and money comes from the
    /// column defaults (level 1, `default` table/chair, seeded owned sets).
    pub async fn create(
        pool: &PgPool,
        username: &str,
        total_exp: f64,
        total_money: i64,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, total_exp, total_money)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .bind(total_exp)
            .bind(total_money)
            .fetch_one(pool)
            .await
    }

    /// Find a user by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Write back a mutated user under optimistic concurrency.
    ///
    /// The row is updated only when the stored `version` still matches the
    /// one the caller read; the token is bumped atomically. Returns the
    /// refreshed row, or `None` when a concurrent writer won the race (the
    /// caller re-reads and retries).
    pub async fn update(pool: &PgPool, user: &User) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                gender = $3,
                theme = $4,
                last_online = $5,
                level = $6,
                level_name = $7,
                year = $8,
                until_next_level = $9,
                total_exp = $10,
                total_money = $11,
                item_level = $12,
                next_item = $13,
                until_next_item = $14,
                current_streak = $15,
                max_streak = $16,
                has_android = $17,
                total_hosts = $18,
                table_id = $19,
                chair_id = $20,
                misc = $21,
                owned_tables = $22,
                owned_chairs = $23,
                owned_misc = $24,
                version = version + 1,
                updated_at = NOW()
             WHERE username = $1 AND version = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&user.username)
            .bind(user.version)
            .bind(user.gender)
            .bind(user.theme)
            .bind(user.last_online)
            .bind(user.level)
            .bind(&user.level_name)
            .bind(&user.year)
            .bind(user.until_next_level)
            .bind(user.total_exp)
            .bind(user.total_money)
            .bind(user.item_level)
            .bind(&user.next_item)
            .bind(user.until_next_item)
            .bind(user.current_streak)
            .bind(user.max_streak)
            .bind(user.has_android)
            .bind(user.total_hosts)
            .bind(&user.table)
            .bind(&user.chair)
            .bind(&user.misc)
            .bind(&user.owned_tables)
            .bind(&user.owned_chairs)
            .bind(&user.owned_misc)
            .fetch_optional(pool)
            .await
    }
}

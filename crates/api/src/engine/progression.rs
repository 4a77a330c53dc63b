//! User progression state machine: promote, pay, purchase, toggles.

use chrono::Utc;
use sqlx::PgPool;

use questlab_core::error::CoreError;
use questlab_core::progression::{self, Streak};
use questlab_core::scoring::ScoringConfig;
use questlab_core::types::Timestamp;
use questlab_db::models::catalog::{CatalogObject, ObjectKind};
use questlab_db::models::user::{User, UserFilled};
use questlab_db::repositories::{CatalogRepo, RuleRepo, UserRepo};

use crate::error::{AppError, AppResult};

/// Retry budget for optimistic read-modify-write cycles. A conflict means
/// another request for the same user won the race; the cycle re-reads and
/// re-applies, so losing is cheap.
const MAX_WRITE_ATTEMPTS: u32 = 3;

/// Inputs to one promotion pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromoteArgs {
    /// Experience delta to add.
    pub exp_added: Option<f64>,
    /// Absolute experience floor; never lowers the stored value.
    pub exp_absolute: Option<f64>,
    /// One-way latch: once reported true it stays true.
    pub has_android: bool,
    /// Overwrites the stored host count when nonzero.
    pub total_hosts: i32,
}

/// Telemetry signals reported by the companion widget.
#[derive(Debug, Clone, Copy, serde::Deserialize)]
pub struct TelemetrySignals {
    #[serde(default)]
    pub total_score: f64,
    pub expavg_score: f64,
    pub cpus: i32,
    pub registration_time: Timestamp,
    #[serde(default)]
    pub has_android: bool,
}

fn user_not_found(username: &str) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "User",
        id: username.to_string(),
    })
}

/// Fetch a user, optionally lazy-creating with zero defaults.
///
/// This is the single lazy-creation policy point: strict callers (admin
/// reads, purchases) pass `do_create = false` and get `NotFound`;
/// device-facing telemetry and toggle paths pass `true`.
pub async fn get_user(pool: &PgPool, username: &str, do_create: bool) -> AppResult<User> {
    match UserRepo::find_by_username(pool, username).await? {
        Some(user) => Ok(user),
        None if do_create => create_user(pool, username, 0.0, 0).await,
        None => Err(user_not_found(username)),
    }
}

/// Create a new user with seeded defaults.
///
/// Runs one zero-delta promotion and one zero payment immediately so the
/// derived fields (labels, distances, streak) are populated from the
/// start rather than on first telemetry contact.
pub async fn create_user(
    pool: &PgPool,
    username: &str,
    default_exp: f64,
    default_money: i64,
) -> AppResult<User> {
    if UserRepo::find_by_username(pool, username).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "User already exists: {username}"
        ))));
    }

    let user = UserRepo::create(pool, username, default_exp, default_money).await?;
    tracing::info!(username, "User created");

    let user = promote(pool, user, &PromoteArgs::default()).await?;
    pay(pool, user, 0).await
}

/// Apply one promotion pass to an in-memory user.
///
/// Field order matters: the streak comparison must see the *old*
/// `last_online`, which is only stamped to now at the very end.
async fn apply_promotion(
    pool: &PgPool,
    user: &mut User,
    args: &PromoteArgs,
    now: Timestamp,
) -> AppResult<()> {
    if let Some(delta) = args.exp_added {
        user.total_exp += delta;
    }
    if let Some(floor) = args.exp_absolute {
        user.total_exp = user.total_exp.max(floor);
    }

    let resolved = RuleRepo::level_for_exp(pool, user.total_exp).await?;
    user.level = progression::raise_level(user.level, resolved.map(|r| r.level));
    let labels = progression::level_labels(user.level);
    user.level_name = labels.name.to_string();
    user.year = labels.year.to_string();

    let next_level = RuleRepo::level_at(pool, user.level + 1).await?;
    user.until_next_level =
        progression::until_next(next_level.map(|r| r.exp_gte), user.total_exp);

    let resolved_item = RuleRepo::item_for_exp(pool, user.total_exp).await?;
    user.item_level = progression::raise_level(user.item_level, resolved_item.map(|r| r.level));

    match RuleRepo::item_at_level(pool, user.item_level + 1).await? {
        Some(rule) => {
            user.until_next_item = rule.exp_gte - user.total_exp;
            user.next_item = rule.item;
        }
        None => {
            user.until_next_item = 0.0;
            user.next_item.clear();
        }
    }

    let streak = progression::advance_streak(
        user.last_online,
        now,
        Streak {
            current: user.current_streak,
            max: user.max_streak,
        },
    );
    user.current_streak = streak.current;
    user.max_streak = streak.max;

    if args.has_android {
        user.has_android = true;
    }
    if args.total_hosts != 0 {
        user.total_hosts = args.total_hosts;
    }

    user.last_online = now;
    Ok(())
}

/// Promote a user and persist the result.
///
/// On a version conflict the user is re-read and the promotion re-applied
/// against the fresh row, so concurrent deltas are never lost.
pub async fn promote(pool: &PgPool, mut user: User, args: &PromoteArgs) -> AppResult<User> {
    for _ in 0..MAX_WRITE_ATTEMPTS {
        apply_promotion(pool, &mut user, args, Utc::now()).await?;

        match UserRepo::update(pool, &user).await? {
            Some(updated) => return Ok(updated),
            None => {
                tracing::debug!(username = %user.username, "Promotion lost a write race, retrying");
                user = UserRepo::find_by_username(pool, &user.username)
                    .await?
                    .ok_or_else(|| user_not_found(&user.username))?;
            }
        }
    }

    Err(AppError::Core(CoreError::Conflict(format!(
        "User is being modified concurrently: {}",
        user.username
    ))))
}

/// Re-read, mutate, and persist a user under the optimistic token.
///
/// The closure re-runs on every retry, so precondition checks inside it
/// are always evaluated against fresh state.
async fn persist_mutation<F>(pool: &PgPool, mut user: User, mut mutate: F) -> AppResult<User>
where
    F: FnMut(&mut User) -> Result<(), CoreError>,
{
    for _ in 0..MAX_WRITE_ATTEMPTS {
        mutate(&mut user)?;

        match UserRepo::update(pool, &user).await? {
            Some(updated) => return Ok(updated),
            None => {
                user = UserRepo::find_by_username(pool, &user.username)
                    .await?
                    .ok_or_else(|| user_not_found(&user.username))?;
            }
        }
    }

    Err(AppError::Core(CoreError::Conflict(format!(
        "User is being modified concurrently: {}",
        user.username
    ))))
}

/// Add (or, with a negative delta, remove) money.
pub async fn pay(pool: &PgPool, user: User, money_added: i64) -> AppResult<User> {
    persist_mutation(pool, user, |u| {
        u.total_money += money_added;
        Ok(())
    })
    .await
}

/// Purchase a catalog object for a user.
///
/// Fails with `NotFound` for an unknown object, `AlreadyOwned` when the id
/// is already in the matching ownership set, and `InsufficientFunds` when
/// the balance does not cover the cost. On success the cost is debited,
/// the id joins the ownership set, and with `select_after_purchase` the
/// object is equipped as well.
pub async fn purchase(
    pool: &PgPool,
    username: &str,
    kind: ObjectKind,
    object_id: &str,
    select_after_purchase: bool,
) -> AppResult<User> {
    let user = get_user(pool, username, false).await?;

    let object = CatalogRepo::find(pool, kind, object_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Catalog object",
                id: object_id.to_string(),
            })
        })?;

    let updated = persist_mutation(pool, user, |u| {
        let owned = match kind {
            ObjectKind::Table => &mut u.owned_tables,
            ObjectKind::Chair => &mut u.owned_chairs,
            ObjectKind::Misc => &mut u.owned_misc,
        };
        if owned.iter().any(|id| id == object_id) {
            return Err(CoreError::AlreadyOwned {
                kind: kind.as_str(),
                id: object_id.to_string(),
            });
        }
        if u.total_money < object.cost {
            return Err(CoreError::InsufficientFunds {
                cost: object.cost,
                balance: u.total_money,
            });
        }

        u.total_money -= object.cost;
        owned.push(object_id.to_string());

        if select_after_purchase {
            match kind {
                ObjectKind::Table => u.table = object_id.to_string(),
                ObjectKind::Chair => u.chair = object_id.to_string(),
                ObjectKind::Misc => u.misc.push(object_id.to_string()),
            }
        }
        Ok(())
    })
    .await?;

    tracing::info!(
        username,
        kind = kind.as_str(),
        object_id,
        cost = object.cost,
        "Purchase completed",
    );
    Ok(updated)
}

/// Toggle the two-valued gender field, lazily creating the user.
pub async fn switch_gender(pool: &PgPool, username: &str) -> AppResult<User> {
    let user = get_user(pool, username, true).await?;
    persist_mutation(pool, user, |u| {
        u.gender = u.gender.toggled();
        Ok(())
    })
    .await
}

/// Toggle the two-valued theme field, lazily creating the user.
pub async fn switch_theme(pool: &PgPool, username: &str) -> AppResult<User> {
    let user = get_user(pool, username, true).await?;
    persist_mutation(pool, user, |u| {
        u.theme = u.theme.toggled();
        Ok(())
    })
    .await
}

/// Resolve every catalog reference on a user to the full object.
///
/// A dangling id (equipped or owned) is an `InvalidState` error: the
/// client sees exactly which reference broke instead of silently getting
/// a thinner user.
pub async fn fill_in(pool: &PgPool, user: User) -> AppResult<UserFilled> {
    let table = resolve_equipped(pool, ObjectKind::Table, &user.table).await?;
    let chair = resolve_equipped(pool, ObjectKind::Chair, &user.chair).await?;

    let mut misc = Vec::with_capacity(user.misc.len());
    for id in &user.misc {
        misc.push(resolve_equipped(pool, ObjectKind::Misc, id).await?);
    }

    let owned_tables = resolve_owned(pool, ObjectKind::Table, &user.owned_tables).await?;
    let owned_chairs = resolve_owned(pool, ObjectKind::Chair, &user.owned_chairs).await?;
    let owned_misc = resolve_owned(pool, ObjectKind::Misc, &user.owned_misc).await?;

    Ok(UserFilled {
        username: user.username,
        gender: user.gender,
        theme: user.theme,
        level: user.level,
        total_exp: user.total_exp,
        total_money: user.total_money,
        table,
        chair,
        misc,
        owned_tables,
        owned_chairs,
        owned_misc,
    })
}

async fn resolve_equipped(
    pool: &PgPool,
    kind: ObjectKind,
    id: &str,
) -> AppResult<CatalogObject> {
    CatalogRepo::find(pool, kind, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::InvalidState(format!(
            "Equipped {} does not resolve: {id}",
            kind.as_str()
        )))
    })
}

async fn resolve_owned(
    pool: &PgPool,
    kind: ObjectKind,
    ids: &[String],
) -> AppResult<Vec<CatalogObject>> {
    let objects = CatalogRepo::list_by_ids(pool, kind, ids).await?;
    if objects.len() != ids.len() {
        let missing: Vec<&str> = ids
            .iter()
            .filter(|id| !objects.iter().any(|o| &o.id == *id))
            .map(String::as_str)
            .collect();
        return Err(AppError::Core(CoreError::InvalidState(format!(
            "Owned {} ids do not resolve: {}",
            kind.as_str(),
            missing.join(", ")
        ))));
    }
    Ok(objects)
}

/// Telemetry entry point: convert signals to an experience floor and
/// promote the already-fetched user.
///
/// Callers fetch the user first (usually with lazy creation) so they can
/// capture pre-promotion state such as `last_online` for tip category
/// selection.
pub async fn telemetry_promote(
    pool: &PgPool,
    scoring: &ScoringConfig,
    user: User,
    signals: &TelemetrySignals,
) -> AppResult<User> {
    let score = scoring.activity_score(
        signals.total_score,
        signals.expavg_score,
        signals.cpus,
        signals.registration_time,
        Utc::now(),
    );

    promote(
        pool,
        user,
        &PromoteArgs {
            exp_added: None,
            exp_absolute: Some(score),
            has_android: signals.has_android,
            total_hosts: signals.cpus,
        },
    )
    .await
}

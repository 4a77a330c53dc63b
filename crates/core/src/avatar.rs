//! Avatar key derivation.
//!
//! Projects the progression state onto a deterministic asset key. The key
//! identifies a pre-rendered image; resolving it to bytes is the asset
//! host's job, not ours.

/// Bucket a max streak into the 1 / 7 / 14 tiers used by the rendered assets.
pub fn streak_bucket(max_streak: i32) -> i32 {
    if max_streak >= 14 {
        14
    } else if max_streak >= 7 {
        7
    } else {
        1
    }
}

/// Composite avatar key:
/// `{gender}_{theme}_{android}_{multihost}_{streak}_{level}_{item_level}`.
///
/// `android` and `multihost` are 0/1 flags; a host counts as multi-host
/// from two workers up.
pub fn avatar_key(
    gender: &str,
    theme: &str,
    has_android: bool,
    total_hosts: i32,
    max_streak: i32,
    level: i32,
    item_level: i32,
) -> String {
    format!(
        "{gender}_{theme}_{}_{}_{}_{level}_{item_level}",
        u8::from(has_android),
        u8::from(total_hosts >= 2),
        streak_bucket(max_streak),
    )
}

/// Relative path of the rendered figure image for the current item tier.
///
/// Tier N unlocks the image for tier N-1, with a floor of 1, so a fresh
/// user still resolves to a valid asset.
pub fn asset_path(gender: &str, theme: &str, item_level: i32) -> String {
    let figure = if gender == "male" { "adv_man" } else { "adv_woman" };
    format!("{theme}/{figure}/{figure}_{}.png", item_level.saturating_sub(1).max(1))
}

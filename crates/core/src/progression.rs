//! Pure progression state transitions.
//!
//! Level raises, next-threshold distances, display labels, and the
//! consecutive-day streak counter. The promotion engine in `questlab-api`
//! feeds these with values resolved from the rule tables; nothing here
//! touches the database.

use crate::types::Timestamp;

/// Display labels derived from a level number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelLabels {
    pub name: &'static str,
    pub year: &'static str,
}

/// Academic-career display labels for levels 1..=15.
///
/// Levels past the end of the table clamp to the last entry, so a rule
/// table that outgrows the label map degrades gracefully instead of
/// panicking mid-promotion.
const LEVEL_LABELS: [LevelLabels; 15] = [
    LevelLabels { name: "applicant", year: "" },
    LevelLabels { name: "bachelor", year: "year 1" },
    LevelLabels { name: "bachelor", year: "year 2" },
    LevelLabels { name: "bachelor", year: "year 3" },
    LevelLabels { name: "bachelor", year: "year 4" },
    LevelLabels { name: "master", year: "year 1" },
    LevelLabels { name: "master", year: "year 2" },
    LevelLabels { name: "doctoral student", year: "year 1" },
    LevelLabels { name: "doctoral student", year: "year 2" },
    LevelLabels { name: "doctoral student", year: "year 3" },
    LevelLabels { name: "doctoral student", year: "year 4" },
    LevelLabels { name: "phd", year: "" },
    LevelLabels { name: "professor", year: "" },
    LevelLabels { name: "professor", year: "" },
    LevelLabels { name: "professor", year: "" },
];

/// Look up display labels for a level, clamping out-of-range values.
pub fn level_labels(level: i32) -> LevelLabels {
    let idx = level.clamp(1, LEVEL_LABELS.len() as i32) as usize - 1;
    LEVEL_LABELS[idx]
}

/// Apply a resolved rule level to the current level.
///
/// Levels are monotonic: a resolved level below the current one (possible
/// only if the rule table shrank) never lowers the stored level.
pub fn raise_level(current: i32, resolved: Option<i32>) -> i32 {
    match resolved {
        Some(level) if level >= current => level,
        _ => current,
    }
}

/// Distance to the next threshold, or 0 when no further rule exists
/// (max level reached).
pub fn until_next(next_exp_gte: Option<f64>, total_exp: f64) -> f64 {
    next_exp_gte.map_or(0.0, |exp_gte| exp_gte - total_exp)
}

/// Consecutive-day engagement counter state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Streak {
    pub current: i32,
    pub max: i32,
}

/// Advance the streak given the previous `last_online` and the current time.
///
/// Compares UTC calendar dates. A gap of more than one day resets the
/// counter to zero before the day-change increment, so coming back after
/// a break starts a fresh streak at 1. Repeat calls on the same day are
/// no-ops.
pub fn advance_streak(last_online: Timestamp, now: Timestamp, streak: Streak) -> Streak {
    let delta_days = (now.date_naive() - last_online.date_naive()).num_days();

    let mut current = streak.current;
    if delta_days > 1 {
        current = 0;
    }
    if delta_days != 0 {
        current += 1;
    }

    Streak {
        current,
        max: streak.max.max(current),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn day(d: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2026, 3, d, 12, 0, 0).unwrap()
    }

    // -- raise_level --

    #[test]
    fn level_raises_when_resolved_is_higher() {
        assert_eq!(raise_level(1, Some(3)), 3);
    }

    #[test]
    fn level_holds_when_no_rule_resolves() {
        assert_eq!(raise_level(4, None), 4);
    }

    #[test]
    fn level_never_lowers() {
        assert_eq!(raise_level(5, Some(2)), 5);
    }

    // -- until_next --

    #[test]
    fn until_next_is_distance_to_threshold() {
        assert!((until_next(Some(200.0), 150.0) - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn until_next_is_zero_at_max_level() {
        assert!(until_next(None, 9999.0).abs() < f64::EPSILON);
    }

    // -- level_labels --

    #[test]
    fn labels_for_known_levels() {
        assert_eq!(level_labels(1).name, "applicant");
        assert_eq!(level_labels(2), LevelLabels { name: "bachelor", year: "year 1" });
        assert_eq!(level_labels(7), LevelLabels { name: "master", year: "year 2" });
        assert_eq!(level_labels(12).name, "phd");
    }

    #[test]
    fn labels_clamp_out_of_range() {
        assert_eq!(level_labels(0).name, "applicant");
        assert_eq!(level_labels(99).name, "professor");
    }

    // -- advance_streak --

    #[test]
    fn same_day_does_not_drift() {
        let s = Streak { current: 3, max: 5 };
        assert_eq!(advance_streak(day(10), day(10), s), s);
    }

    #[test]
    fn next_day_increments() {
        let s = advance_streak(day(10), day(11), Streak { current: 3, max: 5 });
        assert_eq!(s, Streak { current: 4, max: 5 });
    }

    #[test]
    fn increment_raises_max() {
        let s = advance_streak(day(10), day(11), Streak { current: 5, max: 5 });
        assert_eq!(s, Streak { current: 6, max: 6 });
    }

    #[test]
    fn gap_resets_then_counts_the_return_day() {
        let s = advance_streak(day(10), day(14), Streak { current: 9, max: 9 });
        assert_eq!(s, Streak { current: 1, max: 9 });
    }

    #[test]
    fn time_of_day_is_irrelevant() {
        // 23:50 one day to 00:10 the next is still a one-day change.
        let last = Utc.with_ymd_and_hms(2026, 3, 10, 23, 50, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2026, 3, 11, 0, 10, 0).unwrap();
        let s = advance_streak(last, now, Streak { current: 1, max: 1 });
        assert_eq!(s, Streak { current: 2, max: 2 });
    }
}

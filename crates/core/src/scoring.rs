//! Activity score computation.
//!
//! Converts raw host telemetry (cumulative score, exponential-moving-average
//! activity, worker count, registration age) into a single experience floor.
//! The result is fed into promotion as an absolute experience value, so it
//! must never be treated as a delta.

use crate::types::Timestamp;

/// Seconds per day, for registration-age conversion.
const SECS_PER_DAY: f64 = 86_400.0;

/// Tuning constants for the activity score.
///
/// The values are empirical and load-bearing: changing them changes every
/// user's experience floor on the next telemetry ping. Kept in one place
/// instead of inline literals so that behavioural compatibility is auditable.
#[derive(Debug, Clone, Copy)]
pub struct ScoringConfig {
    /// Per-worker base contribution. With `cpus` workers the pre-sigmoid
    /// ceiling is `base_rate * (cpus + 1)`.
    pub base_rate: f64,
    /// Gain applied to the blended age/activity signal before the sigmoid.
    pub activity_gain: f64,
    /// Gain applied to the long-term cumulative score addend.
    pub raw_score_gain: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_rate: 50.0,
            activity_gain: 0.01,
            raw_score_gain: 0.001,
        }
    }
}

/// Logistic sigmoid.
fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

impl ScoringConfig {
    /// Compute the activity score for one telemetry sample.
    ///
    /// `base_rate * (cpus + 1) * sigmoid(activity_gain * (age_days + expavg_score))
    ///  + raw_score_gain * total_score`
    ///
    /// where `age_days` is the time since host registration in days.
    /// Monotone in registration age and bounded above by
    /// `base_rate * (cpus + 1) + raw_score_gain * total_score`.
    pub fn activity_score(
        &self,
        total_score: f64,
        expavg_score: f64,
        cpus: i32,
        registration_time: Timestamp,
        now: Timestamp,
    ) -> f64 {
        let age_days = (now - registration_time).num_seconds() as f64 / SECS_PER_DAY;
        self.base_rate * (f64::from(cpus) + 1.0)
            * sigmoid(self.activity_gain * (age_days + expavg_score))
            + self.raw_score_gain * total_score
    }
}

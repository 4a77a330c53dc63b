//! Tip generation flow: category selection, bounded regeneration, fallback.

use chrono::Utc;

use questlab_core::error::CoreError;
use questlab_core::tips;
use questlab_core::types::Timestamp;
use questlab_db::models::user::UserTip;
use questlab_textgen::TextGenerator;

use crate::error::{AppError, AppResult};

/// Produce a tip for a user.
///
/// `last_online` must be the pre-promotion value; promotion stamps the
/// field to now, which would pin the category to the same-day branches.
///
/// The generator is asked up to `max_attempts` times while the polished
/// output is unacceptable (no letters, or any digit). On exhaustion the
/// seed phrase itself is served, so the endpoint degrades to a static tip
/// rather than an error. A transport failure, by contrast, is surfaced as
/// an upstream error: the caller should know the service is down.
pub async fn generate_tip(
    textgen: &dyn TextGenerator,
    last_online: Timestamp,
    expavg_score: f64,
    max_attempts: u32,
) -> AppResult<UserTip> {
    let category = tips::tip_category(last_online, Utc::now(), expavg_score);
    let seed = tips::seed_phrase(category, &mut rand::rng());

    for attempt in 1..=max_attempts {
        let raw = textgen
            .generate(seed)
            .await
            .map_err(|e| AppError::Core(CoreError::UpstreamGeneration(e.to_string())))?;

        let text = tips::polish(&raw);
        if tips::is_acceptable(&text) {
            tracing::debug!(category = category.as_str(), attempt, "Tip accepted");
            return Ok(UserTip { text });
        }

        tracing::debug!(category = category.as_str(), attempt, "Tip rejected, regenerating");
    }

    tracing::warn!(
        category = category.as_str(),
        max_attempts,
        "Tip generation exhausted attempts, serving seed phrase",
    );
    Ok(UserTip {
        text: tips::polish(seed),
    })
}

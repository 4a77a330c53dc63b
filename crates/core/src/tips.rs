//! Tip category selection and generated-text cleanup.
//!
//! A tip starts from a seed phrase picked by category, gets expanded by the
//! external text generator, and is then polished here. The generator output
//! is untrusted: it may be truncated mid-sentence, span several lines, or
//! contain digits (which rendered tips must not). [`polish`] normalizes the
//! text and [`is_acceptable`] gates the bounded regeneration loop.

use rand::Rng;

use crate::types::Timestamp;

/// Sentence terminators recognized by the cleanup rules.
const TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Activity level above which a user counts as busy.
pub const BUSY_THRESHOLD: f64 = 0.5;

/// Which phrase pool seeds the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipCategory {
    /// First contact of the calendar day.
    Greeting,
    /// Actively crunching; short affirming phrases.
    Busy,
    /// Low activity; longer, reflective phrases.
    Idle,
}

const GREETING_PHRASES: &[&str] = &[
    "Hello again, good to see you back in the lab",
    "Welcome back, the glassware missed you",
    "A new day, a fresh page in the lab journal",
];

const BUSY_PHRASES: &[&str] = &[
    "Great pace today",
    "The experiments are humming along",
    "Solid progress, keep it running",
];

const IDLE_PHRASES: &[&str] = &[
    "A quiet bench is a fine place to sketch the next experiment",
    "Sometimes the best result is a well-rested researcher",
    "The microscope is patient, it will wait for your next discovery",
];

impl TipCategory {
    /// Token used for logging and as the generation-context label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::Busy => "busy",
            Self::Idle => "idle",
        }
    }

    /// Seed phrases for this category.
    pub fn phrases(self) -> &'static [&'static str] {
        match self {
            Self::Greeting => GREETING_PHRASES,
            Self::Busy => BUSY_PHRASES,
            Self::Idle => IDLE_PHRASES,
        }
    }
}

/// Pick the tip category for a user.
///
/// `last_online` must be the value from *before* the current promotion,
/// otherwise the greeting branch can never fire (promotion stamps
/// `last_online` to now).
pub fn tip_category(last_online: Timestamp, now: Timestamp, expavg_score: f64) -> TipCategory {
    if last_online.date_naive() != now.date_naive() {
        TipCategory::Greeting
    } else if expavg_score > BUSY_THRESHOLD {
        TipCategory::Busy
    } else {
        TipCategory::Idle
    }
}

/// Pick a random seed phrase from the category's pool.
pub fn seed_phrase<R: Rng + ?Sized>(category: TipCategory, rng: &mut R) -> &'static str {
    let pool = category.phrases();
    pool[rng.random_range(0..pool.len())]
}

/// Normalize raw generator output into a presentable tip.
///
/// Rules, in order: trim; drop the trailing line of multi-line output;
/// drop the trailing clause when more than two sentence-terminator-delimited
/// clauses are present (the tail is usually cut off mid-thought); trim a
/// dangling trailing comma-clause and append `.` when no terminal
/// punctuation remains.
pub fn polish(raw: &str) -> String {
    let text = raw.trim();
    let text = drop_trailing_line(text);
    let text = drop_truncated_clause(text);
    ensure_terminal(text)
}

/// A tip is renderable when it contains at least one letter and no digits.
pub fn is_acceptable(text: &str) -> bool {
    text.chars().any(char::is_alphabetic) && !text.chars().any(char::is_numeric)
}

fn drop_trailing_line(text: &str) -> &str {
    match text.rfind('\n') {
        Some(idx) => text[..idx].trim_end(),
        None => text,
    }
}

fn drop_truncated_clause(text: &str) -> &str {
    let Some(last_term) = text.rfind(TERMINATORS) else {
        return text;
    };
    if text[last_term + 1..].trim().is_empty() {
        // Ends on a complete sentence; nothing dangles.
        return text;
    }
    let clauses = text
        .split(TERMINATORS)
        .filter(|clause| !clause.trim().is_empty())
        .count();
    if clauses > 2 {
        text[..=last_term].trim_end()
    } else {
        text
    }
}

fn ensure_terminal(text: &str) -> String {
    let mut out = text.trim_end().to_string();
    if out.is_empty() || out.ends_with(TERMINATORS) {
        return out;
    }
    let tail_start = out.rfind(TERMINATORS).map_or(0, |idx| idx + 1);
    if let Some(comma) = out[tail_start..].rfind(',') {
        out.truncate(tail_start + comma);
        while out.ends_with(char::is_whitespace) {
            out.pop();
        }
    }
    out.push('.');
    out
}

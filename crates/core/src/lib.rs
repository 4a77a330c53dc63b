//! Pure domain logic for the questlab progression backend.
//!
//! Everything in this crate is I/O-free: the activity score function,
//! the level/streak state transitions, tip category selection and
//! post-processing, and avatar key derivation. Persistence and HTTP
//! live in `questlab-db` and `questlab-api`.

pub mod avatar;
pub mod error;
pub mod progression;
pub mod scoring;
pub mod tips;
pub mod types;

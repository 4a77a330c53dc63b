//! Client library for the external text-generation service.
//!
//! The progression engine only needs one capability: turn a short seed
//! phrase into a longer tip. [`TextGenerator`] is that seam; the HTTP
//! implementation lives in [`client`], and tests substitute scripted
//! fakes.

pub mod client;

pub use client::{HttpTextGenerator, TextGenError, TextGenerator};

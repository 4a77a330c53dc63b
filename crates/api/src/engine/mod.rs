//! The progression engine.
//!
//! Orchestrates the read-modify-write cycles behind every user mutation
//! (promotion, payment, purchase, toggles), the telemetry-driven scoring
//! flow, tip generation, and catalog snapshot reconciliation. Pure state
//! transitions live in `questlab_core`; this layer wires them to the
//! repositories and the text generator.

pub mod catalog;
pub mod progression;
pub mod tips;

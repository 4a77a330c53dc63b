//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row, plus the transfer payloads built from it.

pub mod catalog;
pub mod rules;
pub mod user;

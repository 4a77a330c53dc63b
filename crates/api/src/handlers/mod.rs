pub mod catalog;
pub mod telemetry;
pub mod users;

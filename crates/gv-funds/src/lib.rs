pub mod config;
pub mod error;
pub mod funds;
pub mod telemetry;

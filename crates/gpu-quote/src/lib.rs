pub mod config;
pub mod error;
pub mod import;
pub mod pricing;
pub mod telemetry;

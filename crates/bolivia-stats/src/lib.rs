pub mod charts;
pub mod config;
pub mod error;
pub mod export;
pub mod sections;
pub mod tables;
pub mod telemetry;

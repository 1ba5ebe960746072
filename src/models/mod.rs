//! Data models for the latency probe

pub mod config;
pub mod metrics;

// Re-export main model types
pub use config::Config;
pub use metrics::{LatencyMeasurement, ProbeReport};

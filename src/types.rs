//! Type definitions and aliases

use std::time::Duration;
use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use crate::error::{AppError, Result};

/// Latency classification used for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PerformanceLevel {
    /// Good latency (< 100 ms)
    Good,
    /// Moderate latency (100-500 ms)
    Moderate,
    /// Poor latency (>= 500 ms)
    Poor,
}

impl PerformanceLevel {
    /// Classify a probe round trip
    pub fn from_duration(duration: Duration) -> Self {
        Self::from_millis(duration.as_millis() as u64)
    }

    /// Classify a round trip given in whole milliseconds
    pub fn from_millis(millis: u64) -> Self {
        if millis < 100 {
            Self::Good
        } else if millis < 500 {
            Self::Moderate
        } else {
            Self::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Moderate => "moderate",
            Self::Poor => "poor",
        }
    }
}

/// Outcome of a single probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    /// Response headers arrived
    Success,
    /// Request failed before headers arrived
    Failed,
    /// Request exceeded the configured timeout
    Timeout,
}

impl ProbeStatus {
    /// Derive the status from a probe error
    pub fn from_error(error: &AppError) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else {
            Self::Failed
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failed => "failed",
            Self::Timeout => "timeout",
        }
    }
}

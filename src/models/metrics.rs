//! Latency measurement and probe report data models

use crate::error::AppError;
use crate::types::{PerformanceLevel, ProbeStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Successful outcome of one HTTP/3 probe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatencyMeasurement {
    /// URL that was probed
    pub url: String,

    /// Wall-clock time from request start until response headers arrived
    pub elapsed: Duration,

    /// HTTP status code of the response
    pub http_status: u16,

    /// Negotiated protocol version, e.g. "HTTP/3.0"
    pub http_version: String,

    /// When the probe completed
    pub timestamp: DateTime<Utc>,
}

impl LatencyMeasurement {
    pub fn new(url: String, elapsed: Duration, http_status: u16, http_version: String) -> Self {
        Self {
            url,
            elapsed,
            http_status,
            http_version,
            timestamp: Utc::now(),
        }
    }

    /// Elapsed time truncated to whole milliseconds
    pub fn millis(&self) -> u64 {
        u64::try_from(self.elapsed.as_millis()).unwrap_or(u64::MAX)
    }

    /// Elapsed time with sub-millisecond precision
    pub fn millis_f64(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }

    pub fn performance_level(&self) -> PerformanceLevel {
        PerformanceLevel::from_duration(self.elapsed)
    }
}

/// Serializable record of a probe, successful or not
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeReport {
    pub url: String,
    pub status: ProbeStatus,

    /// Collapsed latency: elapsed milliseconds, or 0 on failure
    pub latency_ms: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_status: Option<u16>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    pub timestamp: DateTime<Utc>,
}

impl ProbeReport {
    /// Build a report from the discriminated probe result
    pub fn from_outcome(url: &str, outcome: &Result<LatencyMeasurement, AppError>) -> Self {
        match outcome {
            Ok(measurement) => Self::success(measurement),
            Err(error) => Self::failure(url, error),
        }
    }

    pub fn success(measurement: &LatencyMeasurement) -> Self {
        Self {
            url: measurement.url.clone(),
            status: ProbeStatus::Success,
            latency_ms: measurement.millis(),
            http_status: Some(measurement.http_status),
            http_version: Some(measurement.http_version.clone()),
            error_category: None,
            error_message: None,
            timestamp: measurement.timestamp,
        }
    }

    pub fn failure(url: &str, error: &AppError) -> Self {
        Self {
            url: url.to_string(),
            status: ProbeStatus::from_error(error),
            latency_ms: 0,
            http_status: None,
            http_version: None,
            error_category: Some(error.category().to_string()),
            error_message: Some(error.to_string()),
            timestamp: Utc::now(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ProbeStatus::Success
    }

    pub fn performance_level(&self) -> Option<PerformanceLevel> {
        self.is_success()
            .then(|| PerformanceLevel::from_millis(self.latency_ms))
    }
}

//! Configuration data model and validation

use crate::logging::LogLevel;
use crate::probe::ProbeConfig;
use crate::types::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Upper bound accepted for the probe timeout
pub const MAX_TIMEOUT_MS: u64 = 300_000;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// URLs to probe, in order
    #[serde(default)]
    pub target_urls: Vec<String>,

    /// Total request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Extra root certificate (PEM or DER) trusted in addition to the built-in roots
    #[serde(default)]
    pub ca_cert_path: Option<PathBuf>,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Print results as JSON
    #[serde(default)]
    pub json_output: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,

    /// Explicit log level, overriding the verbose/debug derived one
    #[serde(default)]
    pub log_level: Option<LogLevel>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_urls: Vec::new(),
            timeout_ms: default_timeout_ms(),
            ca_cert_path: None,
            enable_color: default_enable_color(),
            json_output: false,
            verbose: false,
            debug: false,
            log_level: None,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Log level in effect: explicit level, else derived from debug/verbose
    pub fn effective_log_level(&self) -> LogLevel {
        if let Some(level) = self.log_level {
            level
        } else if self.debug {
            LogLevel::Debug
        } else if self.verbose {
            LogLevel::Info
        } else {
            LogLevel::Warn
        }
    }

    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Result<()> {
        for url in &self.target_urls {
            validate_target_url(url)?;
        }

        if self.timeout_ms == 0 {
            return Err(AppError::config("Timeout must be greater than 0"));
        }

        if self.timeout_ms > MAX_TIMEOUT_MS {
            return Err(AppError::config(format!(
                "Timeout cannot exceed {} ms, got: {}",
                MAX_TIMEOUT_MS, self.timeout_ms
            )));
        }

        if let Some(path) = &self.ca_cert_path {
            if !path.is_file() {
                return Err(AppError::config(format!(
                    "CA certificate file not found: {}",
                    path.display()
                )));
            }
        }

        Ok(())
    }

    /// Build the probe configuration, reading the CA certificate if one is set
    pub fn probe_config(&self) -> Result<ProbeConfig> {
        let mut probe_config = ProbeConfig::default().with_timeout(self.timeout());

        if let Some(path) = &self.ca_cert_path {
            let bytes = std::fs::read(path).map_err(|e| {
                AppError::io(format!("Failed to read CA certificate {}: {}", path.display(), e))
            })?;
            probe_config = probe_config.with_root_certificate(bytes);
        }

        Ok(probe_config)
    }

    /// Merge process environment variables into this configuration
    pub fn merge_from_env(&mut self) -> Result<()> {
        self.merge_from_vars(|key| std::env::var(key).ok())
    }

    /// Merge variables from an arbitrary lookup into this configuration
    pub fn merge_from_vars<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(urls) = lookup("PROBE_URLS") {
            self.target_urls = split_list(&urls);
        }

        if let Some(timeout) = lookup("PROBE_TIMEOUT_MS") {
            self.timeout_ms = timeout.trim().parse().map_err(|e| {
                AppError::config(format!("Invalid PROBE_TIMEOUT_MS value '{}': {}", timeout, e))
            })?;
        }

        if let Some(path) = lookup("PROBE_CA_CERT") {
            let path = path.trim();
            if !path.is_empty() {
                self.ca_cert_path = Some(PathBuf::from(path));
            }
        }

        if let Some(enable_color) = lookup("ENABLE_COLOR") {
            self.enable_color = enable_color.trim().parse().map_err(|e| {
                AppError::config(format!("Invalid ENABLE_COLOR value '{}': {}", enable_color, e))
            })?;
        }

        if let Some(level) = lookup("PROBE_LOG_LEVEL") {
            self.log_level = Some(level.parse::<LogLevel>().map_err(|e| {
                AppError::config(format!("Invalid PROBE_LOG_LEVEL value '{}': {}", level, e))
            })?);
        }

        Ok(())
    }
}

/// Check that a target URL parses and uses https, the only scheme HTTP/3 serves
pub fn validate_target_url(url: &str) -> Result<()> {
    if url.is_empty() {
        return Err(AppError::config("Target URL cannot be empty"));
    }

    let parsed = url::Url::parse(url)
        .map_err(|e| AppError::config(format!("Invalid target URL '{}': {}", url, e)))?;

    match parsed.scheme() {
        "https" => Ok(()),
        other => Err(AppError::config(format!(
            "Target URL '{}' must use https, not {}",
            url, other
        ))),
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

// Default value functions for serde
fn default_timeout_ms() -> u64 {
    crate::defaults::DEFAULT_TIMEOUT.as_millis() as u64
}

fn default_enable_color() -> bool {
    crate::defaults::DEFAULT_ENABLE_COLOR
}

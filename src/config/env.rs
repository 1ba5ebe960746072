//! Environment variable handling and .env file management

use crate::error::{AppError, Result};
use std::path::Path;

/// Environment variable configuration manager
pub struct EnvManager;

impl EnvManager {
    /// Load .env from the current directory if it exists
    pub fn load_env_file(debug: bool) -> Result<()> {
        Self::load_env_file_from(Path::new(".env"), debug)
    }

    /// Load a specific .env file if it exists; existing variables win
    pub fn load_env_file_from(path: &Path, debug: bool) -> Result<()> {
        if path.exists() {
            dotenv::from_path(path)
                .map_err(|e| AppError::config(format!("Failed to load {}: {}", path.display(), e)))?;

            if debug {
                eprintln!("Loaded configuration from {}", path.display());
            }
        } else if debug {
            eprintln!("No {} file found, using defaults and CLI arguments", path.display());
        }

        Ok(())
    }

    /// Create example .env file content
    pub fn create_example_env_content() -> String {
        r#"# h3probe configuration
#
# Values here are defaults; environment variables and command-line
# arguments override them.

# URLs to probe (comma-separated)
# PROBE_URLS=https://cloudflare-quic.com/,https://www.google.com/

# Total request timeout in milliseconds (1-300000)
# PROBE_TIMEOUT_MS=10000

# Extra root certificate (PEM or DER) to trust, e.g. for a local test server
# PROBE_CA_CERT=/path/to/ca.pem

# Enable colored output (true/false)
# ENABLE_COLOR=true

# Log level (trace, debug, info, warn, error)
# PROBE_LOG_LEVEL=warn
"#.to_string()
    }

    /// Save example .env file to disk; an existing file is left untouched
    pub fn save_example_env_file(path: &Path) -> Result<()> {
        if path.exists() {
            return Err(AppError::config(format!(
                "{} already exists, not overwriting it",
                path.display()
            )));
        }

        std::fs::write(path, Self::create_example_env_content())
            .map_err(|e| AppError::io(format!("Failed to write example .env file: {}", e)))
    }

    /// Validate one environment variable's format
    pub fn validate_env_var(key: &str, value: &str) -> Result<()> {
        match key {
            "PROBE_URLS" => {
                for url in value.split(',').map(str::trim).filter(|u| !u.is_empty()) {
                    crate::models::config::validate_target_url(url)?;
                }
            }
            "PROBE_TIMEOUT_MS" => {
                let timeout: u64 = value.trim().parse()
                    .map_err(|e| AppError::config(format!("Invalid PROBE_TIMEOUT_MS value '{}': {}", value, e)))?;
                if timeout == 0 || timeout > crate::models::config::MAX_TIMEOUT_MS {
                    return Err(AppError::config(format!(
                        "PROBE_TIMEOUT_MS must be between 1 and {}, got: {}",
                        crate::models::config::MAX_TIMEOUT_MS, timeout
                    )));
                }
            }
            "ENABLE_COLOR" => {
                value.trim().parse::<bool>()
                    .map_err(|e| AppError::config(format!("Invalid ENABLE_COLOR value '{}': {}", value, e)))?;
            }
            "PROBE_LOG_LEVEL" => {
                value.parse::<crate::logging::LogLevel>()?;
            }
            _ => {}
        }

        Ok(())
    }

    /// Supported environment variables with descriptions and examples
    pub fn get_supported_env_vars() -> Vec<(&'static str, &'static str, &'static str)> {
        vec![
            ("PROBE_URLS", "Comma-separated list of URLs to probe", "https://cloudflare-quic.com/"),
            ("PROBE_TIMEOUT_MS", "Request timeout in milliseconds (1-300000)", "10000"),
            ("PROBE_CA_CERT", "Extra root certificate to trust", "/path/to/ca.pem"),
            ("ENABLE_COLOR", "Enable colored output", "true"),
            ("PROBE_LOG_LEVEL", "Log level", "warn"),
        ]
    }

    /// Validate all currently set environment variables, returning warnings
    pub fn validate_current_env() -> Vec<String> {
        Self::get_supported_env_vars()
            .into_iter()
            .filter_map(|(var_name, _, _)| {
                let value = std::env::var(var_name).ok()?;
                Self::validate_env_var(var_name, &value)
                    .err()
                    .map(|e| format!("Warning: {}", e))
            })
            .collect()
    }
}

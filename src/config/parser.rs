//! Configuration parsing from CLI arguments and environment variables

use crate::{
    cli::Cli,
    config::env::EnvManager,
    error::{AppError, Result},
    models::Config,
};

/// Configuration parser that combines CLI arguments with environment variables
pub struct ConfigParser {
    cli: Cli,
}

impl ConfigParser {
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Parse and build the complete configuration
    ///
    /// Precedence, highest first: CLI, environment, .env file, defaults.
    pub fn parse(&self) -> Result<Config> {
        let mut config = Config::default();

        EnvManager::load_env_file(self.cli.debug)?;
        config.merge_from_env()?;

        self.apply_cli_overrides(&mut config)?;

        if config.target_urls.is_empty() {
            return Err(AppError::config(
                "No URL to probe: pass one as an argument, with --url, or set PROBE_URLS",
            ));
        }

        config.validate()?;
        Ok(config)
    }

    /// Output settings for reporting an error when `parse` failed
    ///
    /// Only the presentation fields are taken from the environment and CLI,
    /// so a bad URL or timeout cannot stop the error itself from printing.
    pub fn fallback_config(&self) -> Config {
        self.fallback_config_from_vars(|key| std::env::var(key).ok())
    }

    pub fn fallback_config_from_vars<F>(&self, lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(enable_color) = lookup("ENABLE_COLOR").and_then(|v| v.trim().parse().ok()) {
            config.enable_color = enable_color;
        }
        if self.cli.no_color {
            config.enable_color = false;
        }

        config.json_output = self.cli.json;
        config.verbose = self.cli.verbose;
        config.debug = self.cli.debug;
        config
    }

    /// Apply CLI argument overrides to configuration
    pub fn apply_cli_overrides(&self, config: &mut Config) -> Result<()> {
        self.cli.validate().map_err(AppError::config)?;

        let urls = self.cli.get_urls();
        if !urls.is_empty() {
            config.target_urls = urls;
        }

        if let Some(timeout_ms) = self.cli.timeout_ms {
            config.timeout_ms = timeout_ms;
        }

        if let Some(ref path) = self.cli.ca_cert {
            config.ca_cert_path = Some(path.clone());
        }

        if self.cli.no_color {
            config.enable_color = false;
        }

        config.json_output = self.cli.json;
        config.verbose = self.cli.verbose;
        config.debug = self.cli.debug;

        Ok(())
    }
}

/// Configuration summary for debug output
pub fn display_config_summary(config: &Config) -> String {
    let mut summary = Vec::new();

    summary.push(format!("Target URLs: {}", config.target_urls.join(", ")));
    summary.push(format!("Timeout: {}ms", config.timeout_ms));
    summary.push(format!(
        "CA certificate: {}",
        config.ca_cert_path.as_ref().map_or("none".to_string(), |p| p.display().to_string())
    ));
    summary.push(format!("Color Output: {}", config.enable_color));
    summary.push(format!("JSON Output: {}", config.json_output));
    summary.push(format!("Log Level: {}", config.effective_log_level().as_str()));

    summary.join("\n")
}

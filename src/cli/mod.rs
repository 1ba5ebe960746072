//! Command-line interface

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Long version string with build information from build.rs
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\nbuilt:  ", env!("BUILD_TIME"),
    "\ncommit: ", env!("GIT_COMMIT"),
    "\ntarget: ", env!("TARGET_TRIPLE"),
);

/// Measure the latency of a single HTTP/3 request per URL
#[derive(Parser, Debug, Clone)]
#[command(name = "h3probe")]
#[command(version, long_version = LONG_VERSION, about, long_about = None)]
pub struct Cli {
    /// URLs to probe, in order
    #[arg(value_name = "URL")]
    pub targets: Vec<String>,

    /// Additional URL to probe (can be used multiple times)
    #[arg(long = "url", action = ArgAction::Append)]
    pub urls: Vec<String>,

    /// Total request timeout in milliseconds
    #[arg(short, long = "timeout-ms", value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Extra root certificate (PEM or DER) to trust
    #[arg(long, value_name = "FILE")]
    pub ca_cert: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,

    /// Write an example .env file to the current directory and exit
    #[arg(long)]
    pub create_config: bool,
}

impl Cli {
    /// All URLs given on the command line, positional ones first
    pub fn get_urls(&self) -> Vec<String> {
        self.targets
            .iter()
            .chain(self.urls.iter())
            .cloned()
            .collect()
    }

    /// Validate CLI arguments for conflicts
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_ms == Some(0) {
            return Err("--timeout-ms must be greater than 0".to_string());
        }
        Ok(())
    }
}

//! HTTP/3 latency probe
//!
//! Measures the time from sending one HTTP/3 GET request until its response
//! headers arrive. [`measure`] returns whole milliseconds and collapses every
//! failure to `0`; [`LatencyProbe::probe`](probe::Probe::probe) keeps the
//! failure reason. Only `https://` URLs are probed; any other scheme fails
//! without touching the network.
//!
//! # Build requirement
//!
//! HTTP/3 support in reqwest is gated behind `--cfg reqwest_unstable`. This
//! repository sets it in `.cargo/config.toml`, but Cargo only reads that file
//! for the workspace being built. A crate depending on this library must set
//! the flag itself, for example in its own `.cargo/config.toml`:
//!
//! ```toml
//! [build]
//! rustflags = ["--cfg", "reqwest_unstable"]
//! ```
//!
//! or with `RUSTFLAGS="--cfg reqwest_unstable"`. Without it reqwest fails to
//! compile.
//!
//! ```no_run
//! # async fn run() {
//! let ms = h3_latency_probe::measure("https://cloudflare-quic.com/").await;
//! println!("{} ms", ms);
//! # }
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod probe;
pub mod types;

// Re-export commonly used types
pub use error::{AppError, Result};
pub use models::{Config, LatencyMeasurement, ProbeReport};
pub use probe::{measure, LatencyProbe, Probe, ProbeConfig};
pub use output::{OutputFormatter, OutputFormatterFactory};

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");

/// Default configuration values
pub mod defaults {
    use std::time::Duration;

    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
    pub const DEFAULT_ENABLE_COLOR: bool = true;
}

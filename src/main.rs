//! h3probe - measure the latency of one HTTP/3 request per URL

use clap::Parser;
use h3_latency_probe::{
    cli::Cli,
    config::{display_config_summary, ConfigParser, EnvManager},
    error::{AppError, Result},
    logging::ProbeLogger,
    models::{Config, ProbeReport},
    output::OutputFormatterFactory,
    probe::{LatencyProbe, Probe},
    PKG_NAME, VERSION,
};
use std::path::Path;
use std::process;

/// Exit code when at least one probe failed
const EXIT_PROBE_FAILED: i32 = 2;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.create_config {
        create_config_file(&cli);
        return;
    }

    let parser = ConfigParser::new(cli);
    let config = match parser.parse() {
        Ok(config) => config,
        Err(e) => exit_with_error(&e, &parser.fallback_config()),
    };

    match run_application(&config).await {
        Ok(true) => {}
        Ok(false) => process::exit(EXIT_PROBE_FAILED),
        Err(e) => exit_with_error(&e, &config),
    }
}

/// Probe every configured URL once; returns whether all of them succeeded
async fn run_application(config: &Config) -> Result<bool> {
    apply_color_setting(config);

    if config.debug {
        eprintln!("{} v{}", PKG_NAME, VERSION);
        eprintln!("{}", display_config_summary(config));
        for warning in EnvManager::validate_current_env() {
            eprintln!("{}", warning);
        }
    }

    let logger = ProbeLogger::new(config);
    logger.logger().set_session_id(uuid::Uuid::new_v4().to_string()).await;
    logger.logger().add_context_field("version".to_string(), VERSION).await;

    let probe = LatencyProbe::new(config.probe_config()?).with_logger(logger);

    let mut reports = Vec::with_capacity(config.target_urls.len());
    for url in &config.target_urls {
        let outcome = probe.probe(url).await;
        reports.push(ProbeReport::from_outcome(url, &outcome));
    }

    let formatter = OutputFormatterFactory::from_config(config);
    println!("{}", formatter.format_reports(&reports)?);

    Ok(reports.iter().all(ProbeReport::is_success))
}

/// Write the example .env file for `--create-config`
fn create_config_file(cli: &Cli) {
    let path = Path::new(".env");
    match EnvManager::save_example_env_file(path) {
        Ok(()) => println!("Wrote example configuration to {}", path.display()),
        Err(e) => {
            let config = ConfigParser::new(cli.clone()).fallback_config();
            exit_with_error(&e, &config);
        }
    }
}

fn apply_color_setting(config: &Config) {
    if !config.enable_color || config.json_output {
        colored::control::set_override(false);
    }
}

/// Report an error through the configured formatter and exit with its code
///
/// JSON errors go to stdout next to where results would have been printed;
/// console errors go to stderr.
fn exit_with_error(error: &AppError, config: &Config) -> ! {
    apply_color_setting(config);

    let formatter = OutputFormatterFactory::from_config(config);
    match formatter.format_error(error) {
        Ok(text) if config.json_output => println!("{}", text),
        Ok(text) => {
            eprintln!("{}", text);
            print_error_suggestions(error);
        }
        Err(_) => eprintln!("{}", error.format_for_console(false)),
    }

    process::exit(error.exit_code());
}

/// Print helpful suggestions for common errors
fn print_error_suggestions(error: &AppError) {
    match error {
        AppError::Config(_) | AppError::Validation(_) | AppError::Parse(_) => {
            eprintln!();
            eprintln!("Usage: h3probe [--timeout-ms MS] [--ca-cert FILE] [--json] URL...");
            eprintln!("  - URLs must start with https://");
            eprintln!("  - Defaults can also come from PROBE_URLS / PROBE_TIMEOUT_MS in .env");
            eprintln!("  - Run h3probe --create-config to write an example .env");
        }
        AppError::Io(_) | AppError::Tls(_) => {
            eprintln!();
            eprintln!("  - Check that --ca-cert points to a readable PEM or DER certificate");
        }
        _ => {}
    }
}

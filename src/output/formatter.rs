//! Core formatting trait and plain text implementation

use crate::{
    error::{AppError, Result},
    models::ProbeReport,
};
use std::fmt::Write as _;

/// Main trait for output formatting
pub trait OutputFormatter {
    /// Format one probe result
    fn format_report(&self, report: &ProbeReport, url_width: usize) -> Result<String>;

    /// Format the trailing summary line
    fn format_summary(&self, reports: &[ProbeReport]) -> Result<String>;

    /// Format an error that stopped the run before any probe
    fn format_error(&self, error: &AppError) -> Result<String>;

    /// Format all results, one line per probe followed by a summary
    fn format_reports(&self, reports: &[ProbeReport]) -> Result<String> {
        let url_width = reports.iter().map(|r| r.url.len()).max().unwrap_or(0);
        let mut output = String::new();

        for report in reports {
            writeln!(output, "{}", self.format_report(report, url_width)?)
                .map_err(|e| AppError::internal(e.to_string()))?;
        }
        output.push_str(&self.format_summary(reports)?);

        Ok(output)
    }
}

/// Configuration options for formatting
#[derive(Debug, Clone)]
pub struct FormattingOptions {
    /// Enable colored output
    pub enable_color: bool,
    /// Show error messages and timestamps
    pub verbose_mode: bool,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            enable_color: true,
            verbose_mode: false,
        }
    }
}

/// Console error line, followed by the suggestion text in verbose mode
pub(crate) fn error_text(error: &AppError, use_color: bool, verbose: bool) -> String {
    let mut text = error.format_for_console(use_color);
    if verbose {
        text.push_str("\n\n");
        text.push_str(&error.user_friendly_message());
    }
    text
}

/// Plain text formatter for scripts and logs
pub struct PlainFormatter {
    options: FormattingOptions,
}

impl PlainFormatter {
    pub fn new(options: FormattingOptions) -> Self {
        Self { options }
    }

    /// Status column text: "200 HTTP/3.0" on success, "FAILED [CATEGORY]" otherwise
    pub(crate) fn status_text(report: &ProbeReport) -> String {
        if report.is_success() {
            format!(
                "{} {}",
                report.http_status.map_or("-".to_string(), |s| s.to_string()),
                report.http_version.as_deref().unwrap_or("-")
            )
        } else {
            format!(
                "{} [{}]",
                report.status.as_str().to_uppercase(),
                report.error_category.as_deref().unwrap_or("UNKNOWN")
            )
        }
    }

    pub(crate) fn summary_counts(reports: &[ProbeReport]) -> (usize, usize) {
        let succeeded = reports.iter().filter(|r| r.is_success()).count();
        (succeeded, reports.len() - succeeded)
    }
}

impl OutputFormatter for PlainFormatter {
    fn format_report(&self, report: &ProbeReport, url_width: usize) -> Result<String> {
        let mut line = format!(
            "{:<width$}  {:>6} ms  {}",
            report.url,
            report.latency_ms,
            Self::status_text(report),
            width = url_width
        );

        if self.options.verbose_mode {
            if let Some(message) = &report.error_message {
                line.push_str(&format!("\n    {}", message));
            }
        }

        Ok(line)
    }

    fn format_summary(&self, reports: &[ProbeReport]) -> Result<String> {
        let (succeeded, failed) = Self::summary_counts(reports);
        Ok(format!("{} probed, {} succeeded, {} failed", reports.len(), succeeded, failed))
    }

    fn format_error(&self, error: &AppError) -> Result<String> {
        Ok(error_text(error, false, self.options.verbose_mode))
    }
}

//! Colored formatter implementation with terminal color support

use super::formatter::{error_text, FormattingOptions, OutputFormatter, PlainFormatter};
use crate::{
    error::{AppError, Result},
    models::ProbeReport,
    types::PerformanceLevel,
};
use colored::*;

/// Color scheme configuration
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub good: Color,
    pub moderate: Color,
    pub poor: Color,
    pub error: Color,
    pub muted: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            good: Color::Green,
            moderate: Color::Yellow,
            poor: Color::Magenta,
            error: Color::Red,
            muted: Color::BrightBlack,
        }
    }
}

impl ColorScheme {
    /// Color for a latency classification
    pub fn for_level(&self, level: PerformanceLevel) -> Color {
        match level {
            PerformanceLevel::Good => self.good,
            PerformanceLevel::Moderate => self.moderate,
            PerformanceLevel::Poor => self.poor,
        }
    }
}

/// Colored terminal formatter
pub struct ColoredFormatter {
    options: FormattingOptions,
    scheme: ColorScheme,
}

impl ColoredFormatter {
    pub fn new(options: FormattingOptions) -> Self {
        Self {
            options,
            scheme: ColorScheme::default(),
        }
    }
}

impl OutputFormatter for ColoredFormatter {
    fn format_report(&self, report: &ProbeReport, url_width: usize) -> Result<String> {
        let url = format!("{:<width$}", report.url, width = url_width);
        let latency = format!("{:>6} ms", report.latency_ms);
        let status = PlainFormatter::status_text(report);

        let mut line = match report.performance_level() {
            Some(level) => format!(
                "{}  {}  {}",
                url.bold(),
                latency.color(self.scheme.for_level(level)).bold(),
                status.color(self.scheme.muted)
            ),
            None => format!(
                "{}  {}  {}",
                url.bold(),
                latency.color(self.scheme.error),
                status.color(self.scheme.error).bold()
            ),
        };

        if self.options.verbose_mode {
            if let Some(message) = &report.error_message {
                line.push_str(&format!("\n    {}", message.color(self.scheme.muted)));
            }
        }

        Ok(line)
    }

    fn format_summary(&self, reports: &[ProbeReport]) -> Result<String> {
        let (succeeded, failed) = PlainFormatter::summary_counts(reports);
        let failed_text = format!("{} failed", failed);
        Ok(format!(
            "{} probed, {}, {}",
            reports.len(),
            format!("{} succeeded", succeeded).green(),
            if failed > 0 { failed_text.red().bold() } else { failed_text.normal() }
        ))
    }

    fn format_error(&self, error: &AppError) -> Result<String> {
        Ok(error_text(error, self.options.enable_color, self.options.verbose_mode))
    }
}

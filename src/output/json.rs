//! JSON formatter for machine consumption

use super::formatter::OutputFormatter;
use crate::{
    error::{AppError, Result},
    models::ProbeReport,
};

/// Emits probe reports as a JSON array
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn to_json<T: serde::Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(json)
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ProbeReport, _url_width: usize) -> Result<String> {
        self.to_json(report)
    }

    fn format_summary(&self, _reports: &[ProbeReport]) -> Result<String> {
        Ok(String::new())
    }

    fn format_error(&self, error: &AppError) -> Result<String> {
        self.to_json(&serde_json::json!({
            "error": error.to_string(),
            "category": error.category(),
            "exit_code": error.exit_code(),
        }))
    }

    fn format_reports(&self, reports: &[ProbeReport]) -> Result<String> {
        self.to_json(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_are_a_json_array() {
        let formatter = JsonFormatter::new(false);
        let reports = vec![ProbeReport::failure("https://b/", &AppError::timeout("slow"))];
        let output = formatter.format_reports(&reports).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value[0]["url"], "https://b/");
        assert_eq!(value[0]["status"], "timeout");
        assert_eq!(value[0]["latency_ms"], 0);
    }

    #[test]
    fn test_error_is_json_object() {
        let error = AppError::config("bad config");
        let output = JsonFormatter::new(true).format_error(&error).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["error"], "Configuration error: bad config");
        assert_eq!(value["category"], "CONFIG");
        assert_eq!(value["exit_code"], 1);
    }
}

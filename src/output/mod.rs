//! Output formatting for probe results
//!
//! Results render as aligned plain text, colored terminal text, or JSON.

mod colored;
mod formatter;
mod json;

pub use self::colored::{ColorScheme, ColoredFormatter};
pub use self::formatter::{FormattingOptions, OutputFormatter, PlainFormatter};
pub use self::json::JsonFormatter;

use crate::models::Config;

/// Output formatting factory for creating appropriate formatters
pub struct OutputFormatterFactory;

impl OutputFormatterFactory {
    /// Create a formatter based on color support and preferences
    pub fn create_formatter(enable_color: bool, verbose: bool) -> Box<dyn OutputFormatter> {
        let options = FormattingOptions {
            enable_color,
            verbose_mode: verbose,
        };

        if enable_color {
            Box::new(ColoredFormatter::new(options))
        } else {
            Box::new(PlainFormatter::new(options))
        }
    }

    /// Create the formatter the configuration asks for
    pub fn from_config(config: &Config) -> Box<dyn OutputFormatter> {
        if config.json_output {
            Box::new(JsonFormatter::new(config.verbose))
        } else {
            Self::create_formatter(config.enable_color, config.verbose || config.debug)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProbeReport;
    use crate::error::AppError;

    #[test]
    fn test_json_config_selects_json_formatter() {
        let mut config = Config::default();
        config.json_output = true;
        let formatter = OutputFormatterFactory::from_config(&config);
        let report = ProbeReport::failure("https://b/", &AppError::network("refused"));
        let output = formatter.format_reports(&[report]).unwrap();
        assert!(output.starts_with('['));
    }

    #[test]
    fn test_plain_formatter_when_color_disabled() {
        let formatter = OutputFormatterFactory::create_formatter(false, false);
        let output = formatter.format_error(&AppError::internal("boom")).unwrap();
        assert_eq!(output, "[INTERNAL] Internal error: boom");
    }
}

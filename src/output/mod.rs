//! Output formatting and display system
//!
//! Reports are rendered as CSV by default, or as aligned tables for
//! interactive use. Reports go to stdout, diagnostics to stderr.

mod formatter;
mod colored;

pub use self::formatter::{format_float, CsvFormatter, ReportFormatter};
pub use self::colored::{ColorScheme, TableFormatter};

/// Output formatting factory for creating appropriate formatters
pub struct OutputFormatterFactory;

impl OutputFormatterFactory {
    /// Create a formatter for the requested layout
    pub fn create_formatter(table: bool, enable_color: bool) -> Box<dyn ReportFormatter> {
        if table {
            Box::new(TableFormatter::new(enable_color))
        } else {
            Box::new(CsvFormatter::new())
        }
    }

    /// CSV for scripts and spreadsheets
    pub fn create_csv_formatter() -> Box<dyn ReportFormatter> {
        Self::create_formatter(false, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_selects_layout() {
        let csv = OutputFormatterFactory::create_csv_formatter();
        assert_eq!(csv.format_warning("x"), "Warning: x");

        let table = OutputFormatterFactory::create_formatter(true, false);
        assert_eq!(table.format_warning("x"), "! x");
    }
}

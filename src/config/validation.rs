//! Configuration validation utilities and rules
//!
//! `Config::validate` rejects unusable values. The checks here look at the
//! results directory the configuration points to and only produce warnings:
//! missing data is skipped during analysis, not treated as fatal.

use crate::{
    defaults::TIMER_FILE_NAME,
    error::Result,
    models::{Config, TestKey},
    types::Operation,
};
use colored::*;

/// Configuration validator with filesystem checks
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate configuration with comprehensive checks
    pub fn validate_comprehensive(config: &Config) -> Result<Vec<ValidationWarning>> {
        config.validate()?;

        let mut warnings = Vec::new();
        warnings.extend(Self::validate_results_layout(config)?);
        warnings.extend(Self::validate_baseline(config)?);
        Ok(warnings)
    }

    /// Check that the results directory and its size directories exist
    fn validate_results_layout(config: &Config) -> Result<Vec<ValidationWarning>> {
        let mut warnings = Vec::new();

        // conversion creates the directories later
        if config.convert_input.is_some() {
            return Ok(warnings);
        }

        if !config.results_dir.is_dir() {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                format!("Results directory '{}' does not exist", config.results_dir.display()),
            ));
            return Ok(warnings);
        }

        for size in config.sizes()? {
            let dir = size.dir(&config.results_dir);
            if !dir.is_dir() {
                warnings.push(ValidationWarning::new(
                    ValidationLevel::Warning,
                    format!("No directory for data size {} ({})", size, dir.display()),
                ));
                continue;
            }

            let expected = config.data_stores.len() * config.tests.len();
            let missing = config
                .data_stores
                .iter()
                .flat_map(|store| config.tests.iter().map(move |test| (store, test)))
                .filter(|(store, test)| {
                    !TestKey::new(size.clone(), store.as_str(), test.as_str()).exists(&config.results_dir)
                })
                .count();
            if missing > 0 {
                warnings.push(ValidationWarning::new(
                    ValidationLevel::Info,
                    format!("{} of {} result files missing for size {}", missing, expected, size),
                ));
            }

            if !dir.join(TIMER_FILE_NAME).is_file() {
                warnings.push(ValidationWarning::new(
                    ValidationLevel::Info,
                    format!("No timer file for size {}, resolution check skipped", size),
                ));
            }
        }

        Ok(warnings)
    }

    /// Speedups of a test are only reported when its baseline result file
    /// exists, whether or not the baseline is among the analyzed stores
    fn validate_baseline(config: &Config) -> Result<Vec<ValidationWarning>> {
        let mut warnings = Vec::new();
        if !config.has_operation(Operation::Speedup) || config.convert_input.is_some() {
            return Ok(warnings);
        }

        for size in config.sizes()? {
            if !size.dir(&config.results_dir).is_dir() {
                continue;
            }

            let missing: Vec<&str> = config
                .tests
                .iter()
                .filter(|test| {
                    !TestKey::new(size.clone(), config.baseline.as_str(), test.as_str())
                        .exists(&config.results_dir)
                })
                .map(String::as_str)
                .collect();
            if !missing.is_empty() {
                warnings.push(ValidationWarning::new(
                    ValidationLevel::Warning,
                    format!(
                        "No '{}' baseline results for size {} ({}), no speedups for those tests",
                        config.baseline,
                        size,
                        missing.join(", ")
                    ),
                ));
            }
        }

        Ok(warnings)
    }
}

/// Validation warning levels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValidationLevel {
    Info,
    Warning,
}

impl ValidationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
        }
    }

    /// Get color for terminal display
    pub fn color(&self) -> Color {
        match self {
            Self::Info => Color::Blue,
            Self::Warning => Color::Yellow,
        }
    }
}

/// Configuration validation warning
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub level: ValidationLevel,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(level: ValidationLevel, message: String) -> Self {
        Self { level, message }
    }

    /// Format warning for display
    pub fn format(&self, use_color: bool) -> String {
        let tag = format!("[{}]", self.level.as_str());
        if use_color {
            format!("{} {}", tag.color(self.level.color()).bold(), self.message)
        } else {
            format!("{} {}", tag, self.message)
        }
    }
}

/// Convenience function for comprehensive configuration validation
pub fn validate_config(config: &Config) -> Result<Vec<ValidationWarning>> {
    ConfigValidator::validate_comprehensive(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config_for(dir: &TempDir) -> Config {
        Config {
            results_dir: dir.path().to_path_buf(),
            data_sizes: vec!["10".to_string()],
            data_stores: vec!["sqlite".to_string(), "realm".to_string()],
            tests: vec!["count".to_string()],
            ..Config::default()
        }
    }

    #[test]
    fn test_validation_warning_format() {
        let warning = ValidationWarning::new(ValidationLevel::Warning, "Test warning".to_string());
        assert_eq!(warning.format(false), "[WARNING] Test warning");
        assert!(warning.format(true).contains("Test warning"));
    }

    #[test]
    fn test_missing_results_dir() {
        let dir = TempDir::new().unwrap();
        let mut config = config_for(&dir);
        config.results_dir = dir.path().join("nowhere");

        let warnings = validate_config(&config).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].level, ValidationLevel::Warning);
        assert!(warnings[0].message.contains("does not exist"));
    }

    #[test]
    fn test_missing_size_dir() {
        let dir = TempDir::new().unwrap();
        let warnings = validate_config(&config_for(&dir)).unwrap();
        assert!(warnings.iter().any(|w| w.message.contains("No directory for data size 10")));
    }

    #[test]
    fn test_missing_files_and_timer() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("10")).unwrap();
        fs::write(dir.path().join("10").join("sqlite_count.csv"), "5\n").unwrap();

        let warnings = validate_config(&config_for(&dir)).unwrap();
        assert!(warnings.iter().any(|w| w.message == "1 of 2 result files missing for size 10"));
        assert!(warnings.iter().any(|w| w.message.contains("No timer file")));
        assert!(warnings.iter().all(|w| w.level == ValidationLevel::Info));
    }

    #[test]
    fn test_baseline_outside_stores_is_fine_when_its_files_exist() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("10")).unwrap();
        fs::write(dir.path().join("10").join("sqlite_count.csv"), "400\n400\n").unwrap();
        fs::write(dir.path().join("10").join("realm_count.csv"), "100\n100\n").unwrap();

        let mut config = config_for(&dir);
        config.data_stores = vec!["realm".to_string()];
        config.operations = vec![Operation::Speedup];

        let warnings = validate_config(&config).unwrap();
        assert!(!warnings.iter().any(|w| w.message.contains("baseline")), "{:?}", warnings);
    }

    #[test]
    fn test_missing_baseline_file() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("10")).unwrap();
        fs::write(dir.path().join("10").join("realm_count.csv"), "100\n").unwrap();

        let mut config = config_for(&dir);
        config.tests = vec!["count".to_string(), "sum".to_string()];
        config.operations = vec![Operation::Speedup];

        let warnings = validate_config(&config).unwrap();
        let baseline: Vec<&ValidationWarning> =
            warnings.iter().filter(|w| w.message.contains("baseline")).collect();
        assert_eq!(baseline.len(), 1);
        assert_eq!(baseline[0].level, ValidationLevel::Warning);
        assert_eq!(
            baseline[0].message,
            "No 'sqlite' baseline results for size 10 (count, sum), no speedups for those tests"
        );

        config.operations = vec![Operation::Analyze];
        let warnings = validate_config(&config).unwrap();
        assert!(!warnings.iter().any(|w| w.message.contains("baseline")));
    }

    #[test]
    fn test_invalid_config_is_error() {
        let dir = TempDir::new().unwrap();
        let mut config = config_for(&dir);
        config.data_stores.clear();
        assert!(validate_config(&config).is_err());
    }
}

//! Configuration data model and validation

use crate::logging::{LogFormat, LogLevel};
use crate::models::DataSize;
use crate::types::{AppError, Operation, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding one sub-directory per data size
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,

    /// Data sizes (directory names) to process
    #[serde(default = "default_data_sizes")]
    pub data_sizes: Vec<String>,

    /// Data store tags to process
    #[serde(default = "default_data_stores")]
    pub data_stores: Vec<String>,

    /// Test names to process
    #[serde(default = "default_tests")]
    pub tests: Vec<String>,

    /// Data store the speedups are measured against
    #[serde(default = "default_baseline")]
    pub baseline: String,

    /// Selected operations, in execution order
    #[serde(default)]
    pub operations: Vec<Operation>,

    /// Android benchmark JSON file to convert before analysis
    #[serde(default)]
    pub convert_input: Option<PathBuf>,

    /// Render reports as aligned tables instead of CSV
    #[serde(default)]
    pub table_output: bool,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Explicit log level, overrides the verbose/debug derived one
    #[serde(default)]
    pub log_level: Option<LogLevel>,

    /// Log line format on stderr
    #[serde(default)]
    pub log_format: LogFormat,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            results_dir: default_results_dir(),
            data_sizes: default_data_sizes(),
            data_stores: default_data_stores(),
            tests: default_tests(),
            baseline: default_baseline(),
            operations: Vec::new(),
            convert_input: None,
            table_output: false,
            enable_color: default_enable_color(),
            log_level: None,
            log_format: LogFormat::default(),
            verbose: false,
            debug: false,
        }
    }
}

impl Config {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Result<()> {
        if self.data_sizes.is_empty() {
            return Err(AppError::config("At least one data size is required"));
        }
        if self.data_stores.is_empty() {
            return Err(AppError::config("At least one data store is required"));
        }
        if self.tests.is_empty() {
            return Err(AppError::config("At least one test is required"));
        }

        for size in &self.data_sizes {
            DataSize::parse(size)?;
        }

        for store in &self.data_stores {
            validate_name("data store", store, true)?;
        }

        for test in &self.tests {
            validate_name("test", test, false)?;
        }

        validate_name("baseline", &self.baseline, true)?;

        Ok(())
    }

    /// Parsed data sizes in configured order
    pub fn sizes(&self) -> Result<Vec<DataSize>> {
        self.data_sizes.iter().map(|s| DataSize::parse(s)).collect()
    }

    /// Whether an operation was requested
    pub fn has_operation(&self, operation: Operation) -> bool {
        self.operations.contains(&operation)
    }

    /// Log level implied by the flags unless one was set explicitly
    pub fn effective_log_level(&self) -> LogLevel {
        if let Some(level) = self.log_level {
            level
        } else if self.debug {
            LogLevel::Debug
        } else if self.verbose {
            LogLevel::Info
        } else {
            LogLevel::Warn
        }
    }

    /// Merge `DSB_*` values provided by `lookup` into this configuration
    pub fn merge_from_lookup<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("DSB_RESULTS_DIR") {
            let dir = dir.trim();
            if !dir.is_empty() {
                self.results_dir = PathBuf::from(dir);
            }
        }

        if let Some(sizes) = lookup("DSB_DATA_SIZES") {
            self.data_sizes = split_list(&sizes);
        }

        if let Some(stores) = lookup("DSB_DATA_STORES") {
            self.data_stores = split_list(&stores);
        }

        if let Some(tests) = lookup("DSB_TESTS") {
            self.tests = split_list(&tests);
        }

        if let Some(baseline) = lookup("DSB_BASELINE") {
            self.baseline = baseline.trim().to_string();
        }

        if let Some(enable_color) = lookup("DSB_ENABLE_COLOR") {
            self.enable_color = enable_color.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid DSB_ENABLE_COLOR value '{}': {}", enable_color, e)))?;
        }

        if let Some(level) = lookup("DSB_LOG_LEVEL") {
            self.log_level = Some(level.parse()?);
        }

        if let Some(format) = lookup("DSB_LOG_FORMAT") {
            self.log_format = format.parse()?;
        }

        Ok(())
    }
}

/// Split a comma-separated list, dropping blank entries
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Names end up inside `<store>_<test>.csv`. The store ends at the first
/// `_`, so only store names must avoid it; no name may hold a path separator.
fn validate_name(kind: &str, name: &str, is_store: bool) -> Result<()> {
    if name.trim().is_empty() {
        return Err(AppError::config(format!("The {} name cannot be empty", kind)));
    }
    if name.contains(['/', '\\']) {
        return Err(AppError::validation(format!(
            "Invalid {} name '{}': must not contain '/' or '\\'",
            kind, name
        )));
    }
    if is_store && name.contains('_') {
        return Err(AppError::validation(format!(
            "Invalid {} name '{}': must not contain '_'",
            kind, name
        )));
    }
    Ok(())
}

// Default value functions for serde
fn default_results_dir() -> PathBuf {
    PathBuf::from(crate::defaults::DEFAULT_RESULTS_DIR)
}

fn default_data_sizes() -> Vec<String> {
    crate::defaults::DEFAULT_DATA_SIZES
        .iter()
        .map(|&s| s.to_string())
        .collect()
}

fn default_data_stores() -> Vec<String> {
    crate::defaults::DEFAULT_DATA_STORES
        .iter()
        .map(|&s| s.to_string())
        .collect()
}

fn default_tests() -> Vec<String> {
    crate::defaults::DEFAULT_TESTS
        .iter()
        .map(|&s| s.to_string())
        .collect()
}

fn default_baseline() -> String {
    crate::defaults::DEFAULT_BASELINE.to_string()
}

fn default_enable_color() -> bool {
    crate::defaults::DEFAULT_ENABLE_COLOR
}

//! Environment variable handling and .env file management

use crate::error::{AppError, Result};
use std::path::Path;

/// Environment variable configuration manager
pub struct EnvManager;

impl EnvManager {
    /// Load .env file if it exists. Returns whether a file was loaded.
    pub fn load_env_file(debug: bool) -> Result<bool> {
        Self::load_env_file_from(Path::new(".env"), debug)
    }

    /// Load the given env file if it exists
    pub fn load_env_file_from(path: &Path, debug: bool) -> Result<bool> {
        if !path.exists() {
            if debug {
                eprintln!("No {} file found, using defaults and CLI arguments", path.display());
            }
            return Ok(false);
        }

        dotenv::from_path(path)
            .map_err(|e| AppError::config(format!("Failed to load {}: {}", path.display(), e)))?;

        if debug {
            eprintln!("Loaded configuration from {}", path.display());
        }
        Ok(true)
    }

    /// Create example .env file content
    pub fn create_example_env_content() -> String {
        r#"# Data store benchmark analyzer configuration
#
# Values here are used as defaults and can be overridden by command-line
# arguments.

# Directory holding one sub-directory per data size
# DSB_RESULTS_DIR=results

# Data sizes to analyze (comma-separated directory names)
# DSB_DATA_SIZES=10,100,1000

# Data stores to analyze (comma-separated)
# DSB_DATA_STORES=sqlite,realm,room

# Tests to analyze (comma-separated)
# DSB_TESTS=batchWrite,simpleWrite,simpleQuery,fullScan,sum,count,delete

# Store the speedups are measured against
# DSB_BASELINE=sqlite

# Enable colored output (true/false)
# DSB_ENABLE_COLOR=true

# Log level (trace, debug, info, warn, error, fatal)
# DSB_LOG_LEVEL=warn

# Log format on stderr (console, compact, json)
# DSB_LOG_FORMAT=console
"#
        .to_string()
    }

    /// Get list of all supported environment variables with descriptions
    pub fn get_supported_env_vars() -> Vec<(&'static str, &'static str, &'static str)> {
        vec![
            ("DSB_RESULTS_DIR", "Directory holding one sub-directory per data size", "results"),
            ("DSB_DATA_SIZES", "Comma-separated data sizes", "10,100,1000"),
            ("DSB_DATA_STORES", "Comma-separated data stores", "sqlite,realm,room"),
            ("DSB_TESTS", "Comma-separated tests", "simpleQuery,count"),
            ("DSB_BASELINE", "Store the speedups are measured against", "sqlite"),
            ("DSB_ENABLE_COLOR", "Enable colored output", "true"),
            ("DSB_LOG_LEVEL", "Minimum log level on stderr", "info"),
            ("DSB_LOG_FORMAT", "Log format on stderr: console, compact or json", "json"),
        ]
    }
}

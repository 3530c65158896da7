//! Configuration parsing from CLI arguments and environment variables

use crate::{
    cli::Cli,
    config::env::EnvManager,
    error::Result,
    models::{config::split_list, Config},
};

/// Configuration parser that combines CLI arguments with environment variables
pub struct ConfigParser {
    cli: Cli,
}

impl ConfigParser {
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Parse and build the complete configuration
    pub fn parse(&self) -> Result<Config> {
        EnvManager::load_env_file(self.cli.debug)?;
        self.parse_with(|key| std::env::var(key).ok())
    }

    /// Build the configuration reading variables through `lookup`
    pub fn parse_with<F>(&self, lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        // terminal detection < DSB_ENABLE_COLOR < --color/--no-color
        let mut config = Config {
            enable_color: crate::cli::supports_color(),
            ..Config::default()
        };
        config.merge_from_lookup(lookup)?;
        self.apply_cli_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(&self, config: &mut Config) {
        if let Some(dir) = &self.cli.results_dir {
            config.results_dir = dir.clone();
        }
        if let Some(sizes) = &self.cli.sizes {
            config.data_sizes = split_list(sizes);
        }
        if let Some(stores) = &self.cli.stores {
            config.data_stores = split_list(stores);
        }
        if let Some(tests) = &self.cli.tests {
            config.tests = split_list(tests);
        }
        if let Some(baseline) = &self.cli.baseline {
            config.baseline = baseline.trim().to_string();
        }
        if let Some(enable_color) = self.cli.color_override() {
            config.enable_color = enable_color;
        }

        // CLI-only settings
        config.operations = self.cli.operations();
        config.convert_input = self.cli.convert.clone();
        config.table_output = self.cli.table;
        config.verbose = self.cli.verbose;
        config.debug = self.cli.debug;
    }
}

/// Convenience function to load complete configuration from CLI arguments
pub fn load_config(cli: Cli) -> Result<Config> {
    ConfigParser::new(cli).parse()
}

/// Display configuration summary for debug purposes
pub fn display_config_summary(config: &Config) -> String {
    let operations: Vec<&str> = config.operations.iter().map(|op| op.name()).collect();
    let mut summary = vec![
        format!("Results directory: {}", config.results_dir.display()),
        format!("Data sizes: {}", config.data_sizes.join(", ")),
        format!("Data stores: {}", config.data_stores.join(", ")),
        format!("Tests: {}", config.tests.join(", ")),
        format!("Baseline: {}", config.baseline),
        format!("Operations: {}", operations.join(", ")),
    ];

    if let Some(input) = &config.convert_input {
        summary.push(format!("Convert: {}", input.display()));
    }

    summary.push(format!("Table output: {}", config.table_output));
    summary.push(format!("Color output: {}", config.enable_color));
    summary.push(format!("Log level: {}", config.effective_log_level().as_str()));
    summary.push(format!("Log format: {}", config.log_format.as_str()));

    summary.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogLevel;
    use crate::types::Operation;
    use clap::Parser;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    fn parse(args: &[&str], vars: &[(&str, &str)]) -> Result<Config> {
        let mut argv = vec!["dsb"];
        argv.extend_from_slice(args);
        ConfigParser::new(Cli::parse_from(argv)).parse_with(lookup(vars))
    }

    #[test]
    fn test_config_parser_defaults() {
        let config = parse(&["-a"], &[]).unwrap();
        assert_eq!(config.data_sizes, vec!["10", "100", "1000"]);
        assert_eq!(config.data_stores, vec!["sqlite", "realm", "room"]);
        assert_eq!(config.tests.len(), crate::defaults::DEFAULT_TESTS.len());
        assert_eq!(config.baseline, "sqlite");
        assert_eq!(config.results_dir, PathBuf::from("."));
        assert_eq!(config.operations, vec![Operation::Analyze]);
        assert!(!config.table_output);
    }

    #[test]
    fn test_env_then_cli_precedence() {
        let vars = [
            ("DSB_DATA_SIZES", "10"),
            ("DSB_DATA_STORES", "realm"),
            ("DSB_BASELINE", "realm"),
            ("DSB_RESULTS_DIR", "/data/env"),
        ];

        let config = parse(&["-s"], &vars).unwrap();
        assert_eq!(config.data_sizes, vec!["10"]);
        assert_eq!(config.data_stores, vec!["realm"]);
        assert_eq!(config.results_dir, PathBuf::from("/data/env"));

        let config = parse(&["-s", "-d", "100", "-r", "/data/cli", "--baseline", "sqlite"], &vars).unwrap();
        assert_eq!(config.data_sizes, vec!["100"]);
        assert_eq!(config.results_dir, PathBuf::from("/data/cli"));
        assert_eq!(config.baseline, "sqlite");
        // untouched by CLI
        assert_eq!(config.data_stores, vec!["realm"]);
    }

    #[test]
    fn test_color_and_log_level() {
        let config = parse(&["-a"], &[("DSB_ENABLE_COLOR", "false")]).unwrap();
        assert!(!config.enable_color);

        let config = parse(&["-a", "--color"], &[("DSB_ENABLE_COLOR", "false")]).unwrap();
        assert!(config.enable_color);

        let config = parse(&["-a"], &[("DSB_ENABLE_COLOR", "true")]).unwrap();
        assert!(config.enable_color);

        let config = parse(&["-a", "--no-color"], &[("DSB_ENABLE_COLOR", "true")]).unwrap();
        assert!(!config.enable_color);

        let config = parse(&["-a", "--debug"], &[]).unwrap();
        assert_eq!(config.effective_log_level(), LogLevel::Debug);

        let config = parse(&["-a", "--debug"], &[("DSB_LOG_LEVEL", "error")]).unwrap();
        assert_eq!(config.effective_log_level(), LogLevel::Error);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(parse(&["-a", "-d", "ten"], &[]).is_err());
        assert!(parse(&["-a", "-e", "my_store"], &[]).is_err());
        assert!(parse(&["-a", "-t", "simple_query"], &[]).is_ok());
        assert!(parse(&["-a"], &[("DSB_ENABLE_COLOR", "sometimes")]).is_err());
        assert!(parse(&["-a"], &[("DSB_LOG_LEVEL", "chatty")]).is_err());
    }

    #[test]
    fn test_display_config_summary() {
        let config = parse(&["-a", "-b", "--convert", "in.json"], &[]).unwrap();
        let summary = display_config_summary(&config);

        assert!(summary.contains("Data sizes: 10, 100, 1000"));
        assert!(summary.contains("Operations: analyze, benchmark"));
        assert!(summary.contains("Convert: in.json"));
        assert!(summary.contains("Log level: WARN"));
        assert!(summary.contains("Log format: console"));
    }
}

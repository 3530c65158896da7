//! Command-line interface module with comprehensive help system

pub mod help;

pub use help::HelpSystem;

use crate::types::Operation;
use clap::Parser;
use std::io::{self, IsTerminal};
use std::path::PathBuf;

/// Data store benchmark analyzer - summarizes per-iteration timings of
/// database benchmarks into CSV reports
#[derive(Parser, Debug, Clone)]
#[command(name = "dsb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Throughput report (minimum, average, maximum) per store and test
    #[arg(short = 'a', long)]
    pub analyze: bool,

    /// Histogram of the valid samples of every test
    #[arg(short = 'v', long)]
    pub validate: bool,

    /// Median speedup of every store against the baseline
    #[arg(short = 's', long)]
    pub speedup: bool,

    /// Raw samples in file order
    #[arg(short = 'p', long)]
    pub raw: bool,

    /// Operations per second box-plot summaries
    #[arg(short = 'b', long)]
    pub benchmark: bool,

    /// Data sizes to analyze (comma-separated)
    #[arg(short = 'd', long, value_name = "LIST")]
    pub sizes: Option<String>,

    /// Data stores to analyze (comma-separated)
    #[arg(short = 'e', long, value_name = "LIST")]
    pub stores: Option<String>,

    /// Tests to analyze (comma-separated)
    #[arg(short = 't', long, value_name = "LIST")]
    pub tests: Option<String>,

    /// Directory holding one sub-directory per data size
    #[arg(short = 'r', long, value_name = "DIR")]
    pub results_dir: Option<PathBuf>,

    /// Data store the speedups are measured against
    #[arg(long, value_name = "STORE")]
    pub baseline: Option<String>,

    /// Convert an Android benchmark JSON file into the results directory
    #[arg(long, value_name = "JSON")]
    pub convert: Option<PathBuf>,

    /// Print aligned tables instead of CSV
    #[arg(long)]
    pub table: bool,

    /// Force colored output
    #[arg(long)]
    pub color: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,

    /// Show help for specific topic (layout, env, examples, about)
    #[arg(long, value_name = "TOPIC")]
    pub help_topic: Option<String>,
}

impl Cli {
    /// Validate CLI arguments for conflicts and requirements
    pub fn validate(&self) -> Result<(), String> {
        if self.color && self.no_color {
            return Err("Cannot specify both --color and --no-color".to_string());
        }

        for (flag, value) in [("--sizes", &self.sizes), ("--stores", &self.stores), ("--tests", &self.tests)] {
            if let Some(list) = value {
                if crate::models::config::split_list(list).is_empty() {
                    return Err(format!("{} requires at least one value", flag));
                }
            }
        }

        if let Some(baseline) = &self.baseline {
            if baseline.trim().is_empty() {
                return Err("--baseline cannot be empty".to_string());
            }
        }

        Ok(())
    }

    /// Requested operations in execution order
    pub fn operations(&self) -> Vec<Operation> {
        Operation::ALL
            .iter()
            .copied()
            .filter(|operation| match operation {
                Operation::Analyze => self.analyze,
                Operation::Validate => self.validate,
                Operation::Speedup => self.speedup,
                Operation::Raw => self.raw,
                Operation::Benchmark => self.benchmark,
            })
            .collect()
    }

    /// Whether anything besides help was requested
    pub fn has_work(&self) -> bool {
        !self.operations().is_empty() || self.convert.is_some()
    }

    /// Check if help should be displayed for a specific topic
    pub fn should_show_topic_help(&self) -> bool {
        self.help_topic.is_some()
    }

    pub fn get_help_topic(&self) -> Option<&str> {
        self.help_topic.as_deref()
    }

    /// Check if colors should be enabled
    pub fn use_colors(&self) -> bool {
        if self.color {
            true
        } else if self.no_color {
            false
        } else {
            supports_color()
        }
    }

    /// Explicit color choice, if any
    pub fn color_override(&self) -> Option<bool> {
        if self.color {
            Some(true)
        } else if self.no_color {
            Some(false)
        } else {
            None
        }
    }

    /// Display help for the specified topic or main help
    pub fn display_help(&self) -> String {
        let help_system = HelpSystem::new();
        let use_colors = self.use_colors();

        if let Some(topic) = &self.help_topic {
            help_system.display_topic_help(topic, use_colors).unwrap_or_else(|| {
                format!(
                    "Unknown help topic: '{}'\n\nAvailable topics: {}\n\n{}",
                    topic,
                    HelpSystem::TOPICS.join(", "),
                    help_system.display_main_help(use_colors)
                )
            })
        } else {
            help_system.display_main_help(use_colors)
        }
    }
}

/// Check if stdout is a terminal that supports color output
pub fn supports_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if let Ok(term) = std::env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    io::stdout().is_terminal()
}

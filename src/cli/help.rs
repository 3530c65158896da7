//! Extended command-line help with layout, environment and usage examples

use crate::config::env::EnvManager;
use crate::defaults;
use colored::*;

/// Help system for the CLI application
pub struct HelpSystem {
    platform: String,
}

impl HelpSystem {
    /// Topics accepted by `--help-topic`
    pub const TOPICS: [&'static str; 4] = ["layout", "env", "examples", "about"];

    pub fn new() -> Self {
        Self {
            platform: env!("TARGET_TRIPLE").to_string(),
        }
    }

    /// Display the main help message with all available options
    pub fn display_main_help(&self, use_colors: bool) -> String {
        let mut help = String::new();

        help.push_str(&self.format_header(use_colors));
        help.push('\n');
        help.push_str(&self.format_usage_section(use_colors));
        help.push('\n');
        help.push_str(&self.format_options_section(use_colors));
        help.push('\n');
        help.push_str(&self.format_examples_section(use_colors));
        help.push('\n');
        help.push_str(&self.format_footer(use_colors));

        help
    }

    /// Display help for a specific topic
    pub fn display_topic_help(&self, topic: &str, use_colors: bool) -> Option<String> {
        match topic.to_lowercase().as_str() {
            "layout" | "files" => Some(self.format_layout_help(use_colors)),
            "env" | "environment" => Some(self.format_environment_help(use_colors)),
            "examples" => Some(self.format_examples_section(use_colors)),
            "about" | "version" => Some(self.format_about(use_colors)),
            _ => None,
        }
    }

    fn section(title: &str, use_colors: bool) -> String {
        if use_colors {
            title.bright_green().bold().to_string()
        } else {
            title.to_string()
        }
    }

    fn format_header(&self, use_colors: bool) -> String {
        let title = "dsb - data store benchmark analyzer";
        let subtitle = "Summarizes per-iteration benchmark timings into CSV reports";

        if use_colors {
            format!("{}\n{}\n", title.bright_cyan().bold(), subtitle.bright_blue())
        } else {
            format!("{}\n{}\n", title, subtitle)
        }
    }

    fn format_usage_section(&self, use_colors: bool) -> String {
        let usage_patterns = [
            "dsb [-a] [-v] [-s] [-p] [-b] [OPTIONS]",
            "dsb --convert <JSON> [-r <DIR>]",
            "dsb --help-topic <TOPIC>",
        ];

        let mut usage = format!("{}\n", Self::section("USAGE:", use_colors));
        for pattern in usage_patterns {
            if use_colors {
                usage.push_str(&format!("  {}\n", pattern.bright_white()));
            } else {
                usage.push_str(&format!("  {}\n", pattern));
            }
        }
        usage
    }

    fn format_options_section(&self, use_colors: bool) -> String {
        let options = [
            OptionHelp { short: Some("a"), long: "analyze", value: "", description: "Throughput minimum, average and maximum" },
            OptionHelp { short: Some("v"), long: "validate", value: "", description: "Histogram of the valid samples" },
            OptionHelp { short: Some("s"), long: "speedup", value: "", description: "Median speedup against the baseline store" },
            OptionHelp { short: Some("p"), long: "raw", value: "", description: "Raw samples in file order" },
            OptionHelp { short: Some("b"), long: "benchmark", value: "", description: "Operations per second box-plot figures" },
            OptionHelp { short: Some("d"), long: "sizes", value: "<LIST>", description: "Comma-separated data sizes" },
            OptionHelp { short: Some("e"), long: "stores", value: "<LIST>", description: "Comma-separated data stores" },
            OptionHelp { short: Some("t"), long: "tests", value: "<LIST>", description: "Comma-separated tests" },
            OptionHelp { short: Some("r"), long: "results-dir", value: "<DIR>", description: "Directory holding the size directories" },
            OptionHelp { short: None, long: "baseline", value: "<STORE>", description: "Store the speedups are measured against" },
            OptionHelp { short: None, long: "convert", value: "<JSON>", description: "Convert Android benchmark output first" },
            OptionHelp { short: None, long: "table", value: "", description: "Aligned tables instead of CSV" },
            OptionHelp { short: None, long: "color", value: "", description: "Force colored tables and diagnostics" },
            OptionHelp { short: None, long: "no-color", value: "", description: "Disable colors" },
            OptionHelp { short: None, long: "verbose", value: "", description: "Log progress to stderr" },
            OptionHelp { short: None, long: "debug", value: "", description: "Log everything, with source locations" },
            OptionHelp { short: None, long: "help-topic", value: "<TOPIC>", description: "layout, env, examples or about" },
        ];

        let mut output = format!("{}\n", Self::section("OPTIONS:", use_colors));
        for option in options {
            output.push_str(&option.format(use_colors));
            output.push('\n');
        }
        output
    }

    fn format_examples_section(&self, use_colors: bool) -> String {
        let examples = [
            ExampleHelp {
                title: "Throughput of every default store and test",
                command: "dsb -a -r results",
                description: "Reads results/<size>/<store>_<test>.csv for sizes 10, 100 and 1000",
            },
            ExampleHelp {
                title: "Speedup of Realm against SQLite",
                command: "dsb -s -d 1000 -e sqlite,realm --baseline sqlite",
                description: "Negative values mean slower than the baseline",
            },
            ExampleHelp {
                title: "Inspect the sample distribution",
                command: "dsb -v -p -d 10 -t simpleQuery --table",
                description: "Histogram and raw samples as aligned tables",
            },
            ExampleHelp {
                title: "Convert and analyze Android results",
                command: "dsb --convert benchmarkData.json -r results -b",
                description: "Writes results/<size>/<library>_<method>.csv then summarizes ops/sec",
            },
        ];

        let mut output = format!("{}\n", Self::section("EXAMPLES:", use_colors));
        for example in examples {
            output.push_str(&example.format(use_colors));
            output.push('\n');
        }
        output
    }

    fn format_footer(&self, use_colors: bool) -> String {
        let text = format!("More help: dsb --help-topic <{}>", Self::TOPICS.join("|"));
        if use_colors {
            format!("{}\n", text.bright_black())
        } else {
            format!("{}\n", text)
        }
    }

    fn format_layout_help(&self, use_colors: bool) -> String {
        let mut help = format!("{}\n", Self::section("RESULTS LAYOUT:", use_colors));
        help.push_str("  <results-dir>/<size>/<store>_<test>.csv\n");
        help.push_str("      one integer per line, the duration of one iteration in nanoseconds\n");
        help.push_str(&format!("  <results-dir>/<size>/{}\n", defaults::TIMER_FILE_NAME));
        help.push_str("      optional; the third line holds the timer resolution in nanoseconds\n\n");
        help.push_str("Samples that are zero or negative count as bogus and are excluded.\n");
        help.push_str("Missing files are skipped. Tests ending in \"Write\" are scaled by the size.\n");
        help
    }

    fn format_environment_help(&self, use_colors: bool) -> String {
        let mut output = format!("{}\n", Self::section("ENVIRONMENT VARIABLES:", use_colors));
        output.push_str("Configuration priority: CLI arguments > Environment variables > .env file > Defaults\n\n");

        for (var_name, description, example) in EnvManager::get_supported_env_vars() {
            if use_colors {
                output.push_str(&format!(
                    "  {}: {}\n      e.g. {}\n",
                    var_name.bright_yellow().bold(),
                    description.white(),
                    example.bright_blue()
                ));
            } else {
                output.push_str(&format!("  {}: {}\n      e.g. {}\n", var_name, description, example));
            }
        }

        output.push_str(&format!("\n{}\n", Self::section("EXAMPLE .env FILE:", use_colors)));
        output.push_str(&EnvManager::create_example_env_content());
        output
    }

    fn format_about(&self, use_colors: bool) -> String {
        let lines = [
            format!("{} {}", crate::PKG_NAME, crate::VERSION),
            format!("commit: {}", env!("GIT_COMMIT")),
            format!("built:  {}", env!("BUILD_TIME")),
            format!("target: {}", self.platform),
        ];

        let mut output = format!("{}\n", Self::section("ABOUT:", use_colors));
        for line in lines {
            output.push_str(&format!("  {}\n", line));
        }
        output
    }
}

impl Default for HelpSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper struct for formatting individual options
struct OptionHelp {
    short: Option<&'static str>,
    long: &'static str,
    value: &'static str,
    description: &'static str,
}

impl OptionHelp {
    fn format(&self, use_colors: bool) -> String {
        let mut option_str = String::new();

        if let Some(short) = self.short {
            if use_colors {
                option_str.push_str(&format!("  {}, ", format!("-{}", short).bright_cyan()));
            } else {
                option_str.push_str(&format!("  -{}, ", short));
            }
        } else {
            option_str.push_str("      ");
        }

        let long_with_value = if self.value.is_empty() {
            format!("--{}", self.long)
        } else {
            format!("--{} {}", self.long, self.value)
        };

        // pad before coloring so escape codes do not skew the columns
        let padded = format!("{:<24}", long_with_value);
        if use_colors {
            option_str.push_str(&format!("{} {}", padded.bright_cyan(), self.description.white()));
        } else {
            option_str.push_str(&format!("{} {}", padded, self.description));
        }

        option_str
    }
}

/// Helper struct for formatting examples
struct ExampleHelp {
    title: &'static str,
    command: &'static str,
    description: &'static str,
}

impl ExampleHelp {
    fn format(&self, use_colors: bool) -> String {
        if use_colors {
            format!(
                "  {}:\n    {}\n    {}\n",
                self.title.bright_yellow().bold(),
                self.command.bright_white(),
                self.description.bright_blue().italic()
            )
        } else {
            format!("  {}:\n    {}\n    {}\n", self.title, self.command, self.description)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_help_display() {
        let help = HelpSystem::new().display_main_help(false);
        assert!(help.contains("USAGE:"));
        assert!(help.contains("--analyze"));
        assert!(help.contains("--results-dir <DIR>"));
        assert!(help.contains("EXAMPLES:"));
    }

    #[test]
    fn test_topic_help() {
        let help_system = HelpSystem::new();
        for topic in HelpSystem::TOPICS {
            assert!(help_system.display_topic_help(topic, false).is_some(), "{}", topic);
        }
        assert!(help_system.display_topic_help("ENV", false).is_some());
        assert!(help_system.display_topic_help("dns", false).is_none());
    }

    #[test]
    fn test_layout_help_mentions_timer() {
        let help = HelpSystem::new().display_topic_help("layout", false).unwrap();
        assert!(help.contains("<store>_<test>.csv"));
        assert!(help.contains("timer"));
    }

    #[test]
    fn test_env_help_includes_example_file() {
        let help = HelpSystem::new().display_topic_help("env", false).unwrap();
        assert!(help.contains("DSB_LOG_FORMAT: Log format on stderr"));
        assert!(help.contains("EXAMPLE .env FILE:"));
        assert!(help.contains("# DSB_LOG_FORMAT=console"));
    }

    #[test]
    fn test_about_lists_build_info() {
        let help = HelpSystem::new().display_topic_help("about", false).unwrap();
        assert!(help.contains(crate::VERSION));
        assert!(help.contains("commit:"));
    }

    #[test]
    fn test_plain_help_has_no_escape_codes() {
        let help = HelpSystem::new().display_main_help(false);
        assert!(!help.contains('\u{1b}'));
    }
}

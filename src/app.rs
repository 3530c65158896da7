//! Main application orchestration and execution

use crate::{
    analysis::ResultAnalyzer,
    cli::Cli,
    config::{display_config_summary, load_config, validate_config, ValidationLevel},
    convert::convert_file,
    defaults::HISTOGRAM_BINS,
    error::{AppError, Result},
    logging::{stderr_color, Logger, LoggerFactory},
    models::{Config, DataSize},
    output::{OutputFormatterFactory, ReportFormatter},
    types::Operation,
};
use std::io::{self, Write};

/// Main application struct that coordinates all components
pub struct App {
    config: Config,
    loggers: LoggerFactory,
    logger: Logger,
}

impl App {
    /// Create a new application instance from CLI arguments
    pub fn new(cli: Cli) -> Result<Self> {
        Ok(Self::with_config(load_config(cli)?))
    }

    /// Create an application instance from a ready configuration
    pub fn with_config(config: Config) -> Self {
        let loggers = LoggerFactory::new(config.clone());
        let logger = loggers.create_logger("APP");
        Self {
            config,
            loggers,
            logger,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the application, writing reports to stdout
    pub fn run(self) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.run_to(&mut out)
    }

    /// Run the application, writing reports to `out`
    pub fn run_to<W: Write>(&self, out: &mut W) -> Result<()> {
        self.logger.info("Starting dsb")
            .field("version", crate::VERSION)
            .field("session_id", self.loggers.session_id())
            .log();

        if self.config.debug {
            eprintln!("Configuration Summary:\n{}\n", display_config_summary(&self.config));
        }

        self.report_warnings()?;

        if let Some(input) = &self.config.convert_input {
            let written = convert_file(input, &self.config.results_dir, &self.loggers.create_logger("CONVERT"))?;
            crate::log_info!(self.logger, "Converted {} into {} result files", input.display(), written.len());
        }

        if self.config.operations.is_empty() {
            return Ok(());
        }

        let analyzer = ResultAnalyzer::from_config(&self.config, self.loggers.create_logger("ANALYZER"));
        let formatter = OutputFormatterFactory::create_formatter(self.config.table_output, self.config.enable_color);

        for size in self.config.sizes()? {
            for &operation in &self.config.operations {
                let block = self.render(&analyzer, formatter.as_ref(), operation, &size)?;
                out.write_all(block.as_bytes())
                    .map_err(|e| AppError::io(format!("Failed to write report: {}", e)))?;
                if self.config.table_output {
                    writeln!(out).map_err(|e| AppError::io(format!("Failed to write report: {}", e)))?;
                }
            }
        }

        out.flush().map_err(|e| AppError::io(format!("Failed to write report: {}", e)))?;
        Ok(())
    }

    /// Run one operation for one data size and format its report
    fn render(
        &self,
        analyzer: &ResultAnalyzer,
        formatter: &dyn ReportFormatter,
        operation: Operation,
        size: &DataSize,
    ) -> Result<String> {
        crate::log_debug!(self.logger, "Running {} for size {}", operation.name(), size);

        match operation {
            Operation::Analyze => formatter.format_analysis(&analyzer.analyze_size(size)?),
            Operation::Validate => formatter.format_histograms(&analyzer.histograms(size, HISTOGRAM_BINS)?),
            Operation::Speedup => formatter.format_speedups(&analyzer.speedups(size, &self.config.baseline)?),
            Operation::Raw => formatter.format_raw(&analyzer.raw_series(size)?),
            Operation::Benchmark => formatter.format_benchmark(&analyzer.benchmark_summaries(size)?),
        }
    }

    /// Print configuration warnings to stderr. Info level needs --verbose.
    fn report_warnings(&self) -> Result<()> {
        for warning in validate_config(&self.config)? {
            if warning.level == ValidationLevel::Info && !(self.config.verbose || self.config.debug) {
                continue;
            }
            eprintln!("{}", warning.format(stderr_color(self.config.enable_color)));
        }
        Ok(())
    }
}

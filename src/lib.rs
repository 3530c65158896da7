//! Data Store Benchmark Analyzer
//!
//! Post-processes raw benchmark timings (one CSV file of nanosecond samples per
//! data store, test and data size) into throughput reports, histogram bins,
//! speedup tables and ops/sec summaries.

pub mod analysis;
pub mod app;
pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use error::{AppError, Result};
pub use models::{Config, DataSize, SplitSamples, TestKey, TestResultSet, TimerInfo};
pub use analysis::{ResultAnalyzer, ReportRow, SizeReport, ThroughputSummary};
pub use output::{CsvFormatter, ReportFormatter, TableFormatter, OutputFormatterFactory};
pub use types::Operation;

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Default configuration values
pub mod defaults {
    /// Directory holding one sub-directory per data size
    pub const DEFAULT_RESULTS_DIR: &str = ".";
    /// Number of rows/objects per benchmark run, also the directory names
    pub const DEFAULT_DATA_SIZES: &[&str] = &["10", "100", "1000"];
    /// Tags of the benchmarked data stores
    pub const DEFAULT_DATA_STORES: &[&str] = &["sqlite", "realm", "room"];
    /// Individual benchmarks recorded for every data store
    pub const DEFAULT_TESTS: &[&str] = &[
        "batchWrite",
        "simpleWrite",
        "simpleQuery",
        "fullScan",
        "sum",
        "count",
        "delete",
    ];
    /// Data store the speedups are measured against
    pub const DEFAULT_BASELINE: &str = "sqlite";
    pub const DEFAULT_ENABLE_COLOR: bool = true;

    /// Optional per-size file whose third line is the timer resolution (ns)
    pub const TIMER_FILE_NAME: &str = "timer";
    pub const HISTOGRAM_BINS: usize = 10;
    /// Whisker reach in multiples of the interquartile range
    pub const WHISKER_IQR: f64 = 1.5;
}

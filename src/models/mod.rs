//! Data models and structures for the benchmark analyzer

pub mod config;
pub mod sample;

// Re-export main model types
pub use config::Config;
pub use sample::{DataSize, SplitSamples, TestKey, TestResultSet, TimerInfo};

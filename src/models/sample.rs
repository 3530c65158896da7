//! Benchmark sample data model
//!
//! Raw results live in `<results>/<size>/<store>_<test>.csv`, one signed
//! nanosecond timing per line. Values that are zero or negative are bogus
//! instrumentation noise and never take part in statistics.

use crate::types::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Number of rows/objects used in a benchmark run, also its directory name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataSize {
    name: String,
    rows: u64,
}

impl DataSize {
    /// Parse a directory name such as `"1000"`
    pub fn parse(name: &str) -> Result<Self> {
        let name = name.trim();
        let rows: u64 = name
            .parse()
            .map_err(|_| AppError::validation(format!("Data size '{}' is not a positive integer", name)))?;
        if rows == 0 {
            return Err(AppError::validation("Data size must be greater than 0"));
        }

        Ok(Self {
            name: name.to_string(),
            rows,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rows(&self) -> u64 {
        self.rows
    }

    pub fn as_f64(&self) -> f64 {
        self.rows as f64
    }

    /// Directory holding this size's results below `root`
    pub fn dir(&self, root: &Path) -> PathBuf {
        root.join(&self.name)
    }
}

impl FromStr for DataSize {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for DataSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Identifies one result file: (data size, data store, test)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TestKey {
    pub size: DataSize,
    pub store: String,
    pub test: String,
}

impl TestKey {
    pub fn new(size: DataSize, store: impl Into<String>, test: impl Into<String>) -> Self {
        Self {
            size,
            store: store.into(),
            test: test.into(),
        }
    }

    /// `<store>_<test>.csv`
    pub fn file_name(&self) -> String {
        format!("{}_{}.csv", self.store, self.test)
    }

    pub fn path(&self, root: &Path) -> PathBuf {
        self.size.dir(root).join(self.file_name())
    }

    /// Whether the result file for this key is present below `root`
    pub fn exists(&self, root: &Path) -> bool {
        self.path(root).is_file()
    }
}

impl fmt::Display for TestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}@{}", self.store, self.test, self.size)
    }
}

/// Samples of one result file, immutable once read
#[derive(Debug, Clone)]
pub struct TestResultSet {
    key: TestKey,
    samples: Vec<i64>,
}

impl TestResultSet {
    pub fn new(key: TestKey, samples: Vec<i64>) -> Self {
        Self { key, samples }
    }

    pub fn key(&self) -> &TestKey {
        &self.key
    }

    /// Samples in file order
    pub fn samples(&self) -> &[i64] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sorted partition into bogus count and valid samples
    pub fn split(&self) -> SplitSamples {
        crate::analysis::split_valid(&self.samples)
    }
}

/// Outcome of separating bogus timings from real ones
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SplitSamples {
    /// Number of samples `<= 0`
    pub bogus: usize,
    /// Samples `> 0`, ascending
    pub valid: Vec<i64>,
}

impl SplitSamples {
    pub fn real(&self) -> usize {
        self.valid.len()
    }

    pub fn total(&self) -> usize {
        self.bogus + self.valid.len()
    }
}

/// Contents of the optional per-size `timer` file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerInfo {
    pub values: [i64; 3],
}

impl TimerInfo {
    /// Parse the three integer lines of a timer file
    pub fn parse(content: &str) -> Result<Self> {
        let lines: Vec<&str> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        if lines.len() < 3 {
            return Err(AppError::parse(format!(
                "Timer file needs three lines of integers, found {}",
                lines.len()
            )));
        }

        let mut values = [0i64; 3];
        for (i, line) in lines.iter().take(3).enumerate() {
            values[i] = line
                .parse()
                .map_err(|e| AppError::parse(format!("Timer file line {}: '{}': {}", i + 1, line, e)))?;
        }

        Ok(Self { values })
    }

    /// Timer resolution reference in nanoseconds (third line)
    pub fn resolution_ns(&self) -> i64 {
        self.values[2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_size_parse() {
        let size = DataSize::parse("1000").unwrap();
        assert_eq!(size.name(), "1000");
        assert_eq!(size.rows(), 1000);
        assert_eq!(size.as_f64(), 1000.0);

        assert!(DataSize::parse("0").is_err());
        assert!(DataSize::parse("-10").is_err());
        assert!(DataSize::parse("large").is_err());
        assert_eq!(" 10 ".parse::<DataSize>().unwrap().name(), "10");
    }

    #[test]
    fn test_key_paths() {
        let key = TestKey::new(DataSize::parse("10").unwrap(), "realm", "delete");
        assert_eq!(key.file_name(), "realm_delete.csv");
        assert_eq!(
            key.path(Path::new("results")),
            Path::new("results").join("10").join("realm_delete.csv")
        );
        assert_eq!(key.to_string(), "realm:delete@10");
    }

    #[test]
    fn test_split_counts() {
        let key = TestKey::new(DataSize::parse("10").unwrap(), "sqlite", "count");
        let set = TestResultSet::new(key, vec![100, 200, -1, 300]);
        let split = set.split();
        assert_eq!(split.bogus, 1);
        assert_eq!(split.real(), 3);
        assert_eq!(split.total(), set.len());
        // file order is untouched
        assert_eq!(set.samples(), &[100, 200, -1, 300]);
    }

    #[test]
    fn test_timer_parse() {
        let timer = TimerInfo::parse("12\n40\n  250 \n").unwrap();
        assert_eq!(timer.resolution_ns(), 250);
        assert!(TimerInfo::parse("1\n2\n").is_err());
        assert!(TimerInfo::parse("1\nx\n3\n").is_err());
    }
}

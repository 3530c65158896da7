//! Benchmark result analysis
//!
//! Reads the raw timing files of one data size, separates bogus samples from
//! real ones and derives throughput statistics, histogram bins, speedups and
//! ops/sec summaries from them.
//!
//! Missing result files are skipped: not every store runs every test.

pub mod distribution;
pub mod speedup;

pub use distribution::{
    box_summary, histogram, ops_per_sec, percentile, BenchmarkReport, BenchmarkRow, BoxSummary,
    Histogram, HistogramBin, HistogramEntry, HistogramReport,
};
pub use speedup::{median, speedup, SpeedupReport, SpeedupRow};

use crate::{
    error::{AppError, ErrorContext, Result},
    logging::Logger,
    models::{Config, DataSize, SplitSamples, TestKey, TestResultSet, TimerInfo},
    utils::comparison::safe_float_cmp,
};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Scale applied to every throughput figure in the analysis report
pub const THROUGHPUT_SCALE: f64 = 10e9;

/// Throughput statistics for one (store, test) pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThroughputSummary {
    pub minimum: f64,
    pub average: f64,
    pub maximum: f64,
}

/// One line of the analysis report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub store: String,
    pub test: String,
    pub summary: ThroughputSummary,
    pub bogus: usize,
    pub real: usize,
    /// Valid samples faster than the timer resolution, when a timer file exists
    pub below_resolution: Option<usize>,
}

/// Analysis report of a single data size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeReport {
    pub size: DataSize,
    pub rows: Vec<ReportRow>,
    /// Pairs whose file exists but holds no valid sample
    pub empty: Vec<(String, String)>,
    pub timer_resolution_ns: Option<i64>,
}

/// Raw samples of one (store, test) pair in recorded order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSeries {
    pub store: String,
    pub test: String,
    pub samples: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawReport {
    pub size: DataSize,
    pub series: Vec<RawSeries>,
}

/// Read samples from a reader, one integer per line. `origin` names the
/// source in parse errors. Every line must hold a sample, so the sample
/// count always equals the line count.
pub fn parse_samples<R: BufRead>(reader: R, origin: &str) -> Result<Vec<i64>> {
    let mut samples = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read {}", origin))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Err(AppError::parse(format!("{} line {}: empty line", origin, index + 1)));
        }
        let value = trimmed.parse::<i64>().map_err(|e| {
            AppError::parse(format!("{} line {}: '{}': {}", origin, index + 1, trimmed, e))
        })?;
        samples.push(value);
    }
    Ok(samples)
}

/// Load the raw samples of a result file in file order
pub fn read_samples(path: &Path) -> Result<Vec<i64>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    parse_samples(BufReader::new(file), &path.display().to_string())
}

/// Sort ascending and separate bogus samples (`<= 0`) from valid ones
pub fn split_valid(raw: &[i64]) -> SplitSamples {
    let mut sorted = raw.to_vec();
    sorted.sort_unstable();
    // first index holding a positive sample
    let first_valid = sorted.partition_point(|&sample| sample <= 0);
    let valid = sorted.split_off(first_valid);
    SplitSamples {
        bogus: first_valid,
        valid,
    }
}

/// Write tests record one sample per batch of `size` rows
pub fn is_write_test(test: &str) -> bool {
    test.ends_with("Write")
}

/// Throughput of one latency sample
pub fn throughput(sample: i64, test: &str, size: &DataSize) -> f64 {
    if is_write_test(test) {
        THROUGHPUT_SCALE * size.as_f64() / sample as f64
    } else {
        THROUGHPUT_SCALE / sample as f64
    }
}

/// Throughput statistics of ascending valid samples. Minimum throughput
/// belongs to the slowest sample, maximum to the fastest.
pub fn summarize(valid: &[i64], test: &str, size: &DataSize) -> Result<ThroughputSummary> {
    let (Some(&fastest), Some(&slowest)) = (valid.first(), valid.last()) else {
        return Err(AppError::statistics(format!(
            "No valid samples for test '{}' at size {}",
            test, size
        )));
    };

    let total: f64 = valid.iter().map(|&sample| throughput(sample, test, size)).sum();

    Ok(ThroughputSummary {
        minimum: throughput(slowest, test, size),
        average: total / valid.len() as f64,
        maximum: throughput(fastest, test, size),
    })
}

/// Runs the per-size analyses over the configured stores and tests
pub struct ResultAnalyzer {
    results_dir: PathBuf,
    stores: Vec<String>,
    tests: Vec<String>,
    logger: Logger,
}

impl ResultAnalyzer {
    pub fn new(results_dir: PathBuf, stores: Vec<String>, tests: Vec<String>, logger: Logger) -> Self {
        Self {
            results_dir,
            stores,
            tests,
            logger,
        }
    }

    pub fn from_config(config: &Config, logger: Logger) -> Self {
        Self::new(
            config.results_dir.clone(),
            config.data_stores.clone(),
            config.tests.clone(),
            logger,
        )
    }

    pub fn results_dir(&self) -> &Path {
        &self.results_dir
    }

    /// Read the result file of `key`, or `None` when it does not exist
    pub fn load(&self, key: &TestKey) -> Result<Option<TestResultSet>> {
        let path = key.path(&self.results_dir);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.logger.debug("Result file missing, skipping")
                    .test_key(key)
                    .field("path", path.display().to_string())
                    .log();
                return Ok(None);
            }
            Err(e) => {
                return Err(AppError::io(format!("Failed to open {}: {}", path.display(), e)));
            }
        };

        let samples = parse_samples(BufReader::new(file), &path.display().to_string())?;
        Ok(Some(TestResultSet::new(key.clone(), samples)))
    }

    /// Read the optional `timer` file of a data size. A malformed file only
    /// disables the resolution check.
    pub fn read_timer(&self, size: &DataSize) -> Result<Option<TimerInfo>> {
        let path = size.dir(&self.results_dir).join(crate::defaults::TIMER_FILE_NAME);
        match std::fs::read_to_string(&path) {
            Ok(content) => match TimerInfo::parse(&content) {
                Ok(timer) => Ok(Some(timer)),
                Err(e) => {
                    self.logger.warn("Invalid timer file, resolution check skipped")
                        .field("path", path.display().to_string())
                        .field("reason", e.to_string())
                        .log();
                    Ok(None)
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::io(format!("Failed to read {}: {}", path.display(), e))),
        }
    }

    /// Throughput report for every benchmarked (store, test) pair
    pub fn analyze_size(&self, size: &DataSize) -> Result<SizeReport> {
        let timer = self.read_timer(size)?;
        let resolution = timer.map(|t| t.resolution_ns());
        let mut rows = Vec::new();
        let mut empty = Vec::new();

        for store in &self.stores {
            for test in &self.tests {
                let key = TestKey::new(size.clone(), store, test);
                let Some(set) = self.load(&key)? else {
                    continue;
                };

                let split = set.split();
                let summary = match summarize(&split.valid, test, size) {
                    Ok(summary) => summary,
                    Err(e) => {
                        self.logger.warn("No valid samples, row skipped")
                            .test_key(&key)
                            .field("bogus", split.bogus)
                            .error_info(&e)
                            .log();
                        empty.push((store.clone(), test.clone()));
                        continue;
                    }
                };

                let below_resolution = resolution.map(|limit| {
                    split.valid.iter().filter(|&&sample| sample < limit).count()
                });
                if let (Some(count), Some(limit)) = (below_resolution, resolution) {
                    if count > 0 {
                        self.logger.warn("Samples below timer resolution")
                            .test_key(&key)
                            .field("below_resolution", count)
                            .field("resolution_ns", limit)
                            .log();
                    }
                }

                self.logger.debug("Summarized result file")
                    .test_key(set.key())
                    .field("bogus", split.bogus)
                    .field("real", split.real())
                    .log();

                rows.push(ReportRow {
                    store: store.clone(),
                    test: test.clone(),
                    summary,
                    bogus: split.bogus,
                    real: split.real(),
                    below_resolution,
                });
            }
        }

        Ok(SizeReport {
            size: size.clone(),
            rows,
            empty,
            timer_resolution_ns: resolution,
        })
    }

    /// Histogram bins of the valid latencies of every benchmarked pair
    pub fn histograms(&self, size: &DataSize, bins: usize) -> Result<HistogramReport> {
        let mut entries = Vec::new();
        let mut skipped = Vec::new();

        for test in &self.tests {
            for store in &self.stores {
                let key = TestKey::new(size.clone(), store, test);
                let Some(set) = self.load(&key)? else {
                    continue;
                };

                let values: Vec<f64> = set.split().valid.iter().map(|&v| v as f64).collect();
                match histogram(&values, bins) {
                    Some(histogram) => entries.push(HistogramEntry {
                        store: store.clone(),
                        test: test.clone(),
                        histogram,
                    }),
                    None => {
                        self.logger.warn("Can't generate histogram: fewer than two valid samples")
                            .test_key(&key)
                            .field("real", values.len())
                            .log();
                        skipped.push((store.clone(), test.clone()));
                    }
                }
            }
        }

        Ok(HistogramReport {
            size: size.clone(),
            entries,
            skipped,
        })
    }

    /// Median speedup of each non-baseline store against `baseline`
    pub fn speedups(&self, size: &DataSize, baseline: &str) -> Result<SpeedupReport> {
        let mut rows = Vec::new();

        for test in &self.tests {
            let baseline_key = TestKey::new(size.clone(), baseline, test);
            let baseline_median = self
                .load(&baseline_key)?
                .and_then(|set| median(&set.split().valid));
            let Some(baseline_median) = baseline_median else {
                self.logger.warn("Baseline has no valid samples, test skipped")
                    .test_key(&baseline_key)
                    .log();
                continue;
            };

            for store in self.stores.iter().filter(|s| s.as_str() != baseline) {
                let key = TestKey::new(size.clone(), store, test);
                let Some(set) = self.load(&key)? else {
                    continue;
                };

                let value = match median(&set.split().valid) {
                    Some(store_median) => speedup(baseline_median, store_median),
                    None => 0.0,
                };

                self.logger.debug("Computed speedup")
                    .test_key(&key)
                    .field("speedup", value)
                    .log();

                rows.push(SpeedupRow {
                    store: store.clone(),
                    test: test.clone(),
                    speedup: value,
                });
            }
        }

        Ok(SpeedupReport {
            size: size.clone(),
            baseline: baseline.to_string(),
            rows,
        })
    }

    /// Raw samples of every benchmarked pair, in file order
    pub fn raw_series(&self, size: &DataSize) -> Result<RawReport> {
        let mut series = Vec::new();

        for test in &self.tests {
            for store in &self.stores {
                let key = TestKey::new(size.clone(), store, test);
                if let Some(set) = self.load(&key)? {
                    series.push(RawSeries {
                        store: store.clone(),
                        test: test.clone(),
                        samples: set.samples().to_vec(),
                    });
                }
            }
        }

        Ok(RawReport {
            size: size.clone(),
            series,
        })
    }

    /// Ops/sec box-plot summaries, stores in name order
    pub fn benchmark_summaries(&self, size: &DataSize) -> Result<BenchmarkReport> {
        let mut stores = self.stores.clone();
        stores.sort();
        let mut rows = Vec::new();

        for test in &self.tests {
            for store in &stores {
                let key = TestKey::new(size.clone(), store, test);
                let Some(set) = self.load(&key)? else {
                    continue;
                };

                let mut ops = ops_per_sec(&set.split().valid, test, size);
                ops.sort_by(|a, b| safe_float_cmp(*a, *b));
                if let Some(summary) = box_summary(&ops) {
                    rows.push(BenchmarkRow {
                        store: store.clone(),
                        test: test.clone(),
                        summary,
                    });
                }
            }
        }

        Ok(BenchmarkReport {
            size: size.clone(),
            rows,
        })
    }
}

#[cfg(test)]
mod comprehensive_tests;

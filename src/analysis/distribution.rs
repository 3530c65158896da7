//! Sample distributions: histogram bins and ops/sec box-plot summaries

use crate::models::DataSize;
use crate::utils::comparison::safe_float_cmp;
use serde::{Deserialize, Serialize};

/// One histogram bucket. Buckets are half-open except the last one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    pub fn total(&self) -> usize {
        self.bins.iter().map(|bin| bin.count).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramEntry {
    pub store: String,
    pub test: String,
    pub histogram: Histogram,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramReport {
    pub size: DataSize,
    pub entries: Vec<HistogramEntry>,
    /// Pairs with fewer than two valid samples
    pub skipped: Vec<(String, String)>,
}

/// Box-and-whisker figures of a sample set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxSummary {
    pub whisker_low: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_high: f64,
    pub outliers: usize,
    pub samples: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRow {
    pub store: String,
    pub test: String,
    pub summary: BoxSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub size: DataSize,
    pub rows: Vec<BenchmarkRow>,
}

/// Equal-width histogram between the minimum and maximum value.
///
/// Returns `None` for fewer than two values. A set of identical values is
/// binned over `[v - 0.5, v + 0.5]`.
pub fn histogram(values: &[f64], bins: usize) -> Option<Histogram> {
    if values.len() < 2 || bins == 0 {
        return None;
    }

    let mut low = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut high = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if low == high {
        low -= 0.5;
        high += 0.5;
    }

    let width = (high - low) / bins as f64;
    let mut counts = vec![0usize; bins];
    for &value in values {
        let index = ((value - low) / width).floor() as usize;
        // the maximum lands exactly on the closing edge
        counts[index.min(bins - 1)] += 1;
    }

    let bins = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: low + width * i as f64,
            end: if i + 1 == bins { high } else { low + width * (i + 1) as f64 },
            count,
        })
        .collect();

    Some(Histogram { bins })
}

/// Operations per second of ascending latency samples. Batch tests are
/// normalized to a single row.
pub fn ops_per_sec(valid: &[i64], test: &str, size: &DataSize) -> Vec<f64> {
    let per_row = test.to_ascii_lowercase().starts_with("batch");
    valid
        .iter()
        .map(|&sample| {
            let latency = if per_row {
                sample as f64 / size.as_f64()
            } else {
                sample as f64
            };
            1.0e9 / latency
        })
        .collect()
}

/// Percentile of sorted values with linear interpolation between ranks
pub fn percentile(sorted_values: &[f64], percentile: f64) -> f64 {
    if sorted_values.is_empty() {
        return 0.0;
    }

    let index = (percentile / 100.0) * (sorted_values.len() as f64 - 1.0);
    let lower_index = index.floor() as usize;
    let upper_index = index.ceil() as usize;

    if lower_index == upper_index {
        sorted_values[lower_index]
    } else {
        let lower_value = sorted_values[lower_index];
        let upper_value = sorted_values[upper_index];
        let weight = index - lower_index as f64;
        lower_value + weight * (upper_value - lower_value)
    }
}

/// Box-plot figures with whiskers at the furthest samples within
/// `WHISKER_IQR` interquartile ranges of the quartiles
pub fn box_summary(values: &[f64]) -> Option<BoxSummary> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| safe_float_cmp(*a, *b));

    let q1 = percentile(&sorted, 25.0);
    let median = percentile(&sorted, 50.0);
    let q3 = percentile(&sorted, 75.0);
    let reach = crate::defaults::WHISKER_IQR * (q3 - q1);
    let (low_fence, high_fence) = (q1 - reach, q3 + reach);

    let inside: Vec<f64> = sorted
        .iter()
        .copied()
        .filter(|&v| v >= low_fence && v <= high_fence)
        .collect();
    // quartiles always lie inside the fences, so `inside` is never empty
    let whisker_low = inside.first().copied().unwrap_or(q1);
    let whisker_high = inside.last().copied().unwrap_or(q3);

    Some(BoxSummary {
        whisker_low,
        q1,
        median,
        q3,
        whisker_high,
        outliers: sorted.len() - inside.len(),
        samples: sorted.len(),
    })
}

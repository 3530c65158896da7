//! Median speedup of data stores against a baseline store

use crate::models::DataSize;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedupRow {
    pub store: String,
    pub test: String,
    /// `> 1` when faster than the baseline, negative when slower, `0` when
    /// the store recorded no valid sample
    pub speedup: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedupReport {
    pub size: DataSize,
    pub baseline: String,
    pub rows: Vec<SpeedupRow>,
}

/// Median of ascending samples, averaging the two middle values of an even
/// sized set
pub fn median(sorted: &[i64]) -> Option<f64> {
    let len = sorted.len();
    if len == 0 {
        return None;
    }

    let mid = len / 2;
    if len % 2 == 1 {
        Some(sorted[mid] as f64)
    } else {
        Some((sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0)
    }
}

/// Ratio of median latencies. A slower store gets the negated reciprocal so
/// that "2x slower" reads as `-2`.
pub fn speedup(baseline_median: f64, store_median: f64) -> f64 {
    if store_median < baseline_median {
        baseline_median / store_median
    } else {
        -store_median / baseline_median
    }
}

//! Type definitions and aliases

use serde::{Deserialize, Serialize};
use std::fmt;

// Re-export commonly used types
pub use crate::error::{AppError, Result};

/// Analysis operations selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Operation {
    /// Throughput report (min/avg/max, bogus and valid counts)
    Analyze,
    /// Histogram bins used to eyeball the sample distribution
    Validate,
    /// Median speedup against the baseline data store
    Speedup,
    /// Raw samples in recorded order
    Raw,
    /// Ops/sec box-plot summaries
    Benchmark,
}

impl Operation {
    /// Execution order used when several operations are selected
    pub const ALL: [Operation; 5] = [
        Operation::Analyze,
        Operation::Validate,
        Operation::Speedup,
        Operation::Raw,
        Operation::Benchmark,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Analyze => "analyze",
            Operation::Validate => "validate",
            Operation::Speedup => "speedup",
            Operation::Raw => "raw",
            Operation::Benchmark => "benchmark",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

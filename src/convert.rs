//! Conversion of Android benchmark output into the results directory layout
//!
//! The Android benchmark library writes a single JSON document. Each entry
//! names its test method (optionally prefixed with `EMULATOR_`), its data size
//! as a `[size=1,000]` suffix and the benchmark class it belongs to. Every
//! entry becomes `<size>/<library>_<method>.csv` with one run per line.

use crate::error::{AppError, ErrorContext, Result};
use crate::logging::Logger;
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level benchmark results document
#[derive(Debug, Clone, Deserialize)]
pub struct BenchmarkResults {
    pub results: Vec<BenchmarkEntry>,
}

/// A single benchmarked method
#[derive(Debug, Clone, Deserialize)]
pub struct BenchmarkEntry {
    pub name: String,
    pub classname: String,
    #[serde(default)]
    pub runs: Vec<i64>,
}

/// Where an entry's runs end up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryTarget {
    pub size: String,
    pub library: String,
    pub method: String,
}

impl EntryTarget {
    pub fn relative_path(&self) -> PathBuf {
        Path::new(&self.size).join(format!("{}_{}.csv", self.library, self.method))
    }
}

/// Maps benchmark entries to result files
pub struct BenchmarkConverter {
    method_pattern: Regex,
    size_pattern: Regex,
    library_pattern: Regex,
}

impl BenchmarkConverter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            method_pattern: Regex::new(r"^(EMULATOR_)?(.*)\[.*\]")?,
            size_pattern: Regex::new(r"^.*\[size=(.*)\]")?,
            library_pattern: Regex::new(r"io\.realm\.benchmark\.(.*)Benchmarks")?,
        })
    }

    /// Derive size directory, library and method name of an entry
    pub fn target(&self, entry: &BenchmarkEntry) -> Result<EntryTarget> {
        let method = self
            .method_pattern
            .captures(&entry.name)
            .and_then(|caps| caps.get(2))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| AppError::parse(format!("No test method in benchmark name '{}'", entry.name)))?;

        let size: String = self
            .size_pattern
            .captures(&entry.name)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().chars().filter(|c| *c != ',' && *c != '.').collect())
            .ok_or_else(|| AppError::parse(format!("No [size=...] in benchmark name '{}'", entry.name)))?;

        let library = self
            .library_pattern
            .captures(&entry.classname)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_lowercase())
            .ok_or_else(|| AppError::parse(format!("Unexpected benchmark class '{}'", entry.classname)))?;

        if method.is_empty() || size.is_empty() || library.is_empty() {
            return Err(AppError::parse(format!(
                "Incomplete benchmark entry '{}' ({})",
                entry.name, entry.classname
            )));
        }

        Ok(EntryTarget { size, library, method })
    }

    /// Parse a results document
    pub fn parse(&self, json: &str) -> Result<BenchmarkResults> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write every entry below `output_dir`, returning the files written
    pub fn convert(&self, results: &BenchmarkResults, output_dir: &Path, logger: &Logger) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(results.results.len());

        for entry in &results.results {
            let target = self.target(entry)?;
            let path = output_dir.join(target.relative_path());
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }

            let content: String = entry.runs.iter().map(|run| format!("{}\n", run)).collect();
            fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;

            logger.info("Converted benchmark entry")
                .field("path", path.display().to_string())
                .field("runs", entry.runs.len())
                .log();
            written.push(path);
        }

        Ok(written)
    }
}

/// Convert the JSON file at `input` into result files below `output_dir`
pub fn convert_file(input: &Path, output_dir: &Path, logger: &Logger) -> Result<Vec<PathBuf>> {
    let json = fs::read_to_string(input)
        .with_context(|| format!("Failed to read benchmark results {}", input.display()))?;
    let converter = BenchmarkConverter::new()?;
    let results = converter.parse(&json)?;
    converter.convert(&results, output_dir, logger)
}

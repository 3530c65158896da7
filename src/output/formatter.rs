//! Core formatting traits and the CSV implementation
//!
//! CSV is the default because downstream spreadsheets and plotting scripts
//! consume it. Every block starts with a title line naming the data size,
//! followed by a header line and the data rows.

use crate::analysis::{BenchmarkReport, HistogramReport, RawReport, SizeReport, SpeedupReport};
use crate::error::Result;

/// Main trait for report formatting
pub trait ReportFormatter {
    /// Throughput report of one data size
    fn format_analysis(&self, report: &SizeReport) -> Result<String>;

    /// Histogram bins of one data size
    fn format_histograms(&self, report: &HistogramReport) -> Result<String>;

    /// Speedups against the baseline of one data size
    fn format_speedups(&self, report: &SpeedupReport) -> Result<String>;

    /// Raw samples of one data size
    fn format_raw(&self, report: &RawReport) -> Result<String>;

    /// Ops/sec box-plot summaries of one data size
    fn format_benchmark(&self, report: &BenchmarkReport) -> Result<String>;

    /// Format warning messages
    fn format_warning(&self, warning: &str) -> String;
}

pub const ANALYSIS_HEADER: [&str; 7] = ["Data store", "Test", "minimum", "average", "maximum", "bogus", "real"];
pub const HISTOGRAM_HEADER: [&str; 5] = ["Data store", "Test", "bin_start", "bin_end", "count"];
pub const SPEEDUP_HEADER: [&str; 3] = ["Data store", "Test", "speedup"];
pub const RAW_HEADER: [&str; 4] = ["Data store", "Test", "iteration", "value"];
pub const BENCHMARK_HEADER: [&str; 8] = [
    "Data store", "Test", "whisker_low", "q1", "median", "q3", "whisker_high", "samples",
];

/// Render a float the way Python's `str(float)` does: integral values keep a
/// trailing `.0` and very large or small magnitudes use exponent notation.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf".to_string() } else { "-inf".to_string() };
    }

    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let rendered = format!("{:e}", value);
        if let Some((mantissa, exponent)) = rendered.split_once('e') {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            return format!("{}e{}{:02}", mantissa, sign, exponent.abs());
        }
        return rendered;
    }

    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Analysis report rows as string cells
pub fn analysis_rows(report: &SizeReport) -> Vec<Vec<String>> {
    report
        .rows
        .iter()
        .map(|row| {
            vec![
                row.store.clone(),
                row.test.clone(),
                format_float(row.summary.minimum),
                format_float(row.summary.average),
                format_float(row.summary.maximum),
                row.bogus.to_string(),
                row.real.to_string(),
            ]
        })
        .collect()
}

pub fn histogram_rows(report: &HistogramReport) -> Vec<Vec<String>> {
    report
        .entries
        .iter()
        .flat_map(|entry| {
            entry.histogram.bins.iter().map(move |bin| {
                vec![
                    entry.store.clone(),
                    entry.test.clone(),
                    format_float(bin.start),
                    format_float(bin.end),
                    bin.count.to_string(),
                ]
            })
        })
        .collect()
}

pub fn speedup_rows(report: &SpeedupReport) -> Vec<Vec<String>> {
    report
        .rows
        .iter()
        .map(|row| vec![row.store.clone(), row.test.clone(), format!("{:.2}", row.speedup)])
        .collect()
}

pub fn raw_rows(report: &RawReport) -> Vec<Vec<String>> {
    report
        .series
        .iter()
        .flat_map(|series| {
            series.samples.iter().enumerate().map(move |(i, sample)| {
                vec![
                    series.store.clone(),
                    series.test.clone(),
                    i.to_string(),
                    sample.to_string(),
                ]
            })
        })
        .collect()
}

pub fn benchmark_rows(report: &BenchmarkReport) -> Vec<Vec<String>> {
    report
        .rows
        .iter()
        .map(|row| {
            let s = &row.summary;
            vec![
                row.store.clone(),
                row.test.clone(),
                format_float(s.whisker_low),
                format_float(s.q1),
                format_float(s.median),
                format_float(s.q3),
                format_float(s.whisker_high),
                s.samples.to_string(),
            ]
        })
        .collect()
}

/// Plain CSV formatter
#[derive(Debug, Clone, Default)]
pub struct CsvFormatter;

impl CsvFormatter {
    pub fn new() -> Self {
        Self
    }

    fn block(title: &str, header: &[&str], rows: &[Vec<String>]) -> String {
        let mut output = String::new();
        output.push_str(title);
        output.push('\n');
        output.push_str(&header.join(","));
        output.push('\n');
        for row in rows {
            output.push_str(&row.join(","));
            output.push('\n');
        }
        output
    }
}

impl ReportFormatter for CsvFormatter {
    fn format_analysis(&self, report: &SizeReport) -> Result<String> {
        Ok(Self::block(
            &format!("Analyzing size,{}", report.size),
            &ANALYSIS_HEADER,
            &analysis_rows(report),
        ))
    }

    fn format_histograms(&self, report: &HistogramReport) -> Result<String> {
        Ok(Self::block(
            &format!("Histogram size,{}", report.size),
            &HISTOGRAM_HEADER,
            &histogram_rows(report),
        ))
    }

    fn format_speedups(&self, report: &SpeedupReport) -> Result<String> {
        Ok(Self::block(
            &format!("Speedup size,{},baseline,{}", report.size, report.baseline),
            &SPEEDUP_HEADER,
            &speedup_rows(report),
        ))
    }

    fn format_raw(&self, report: &RawReport) -> Result<String> {
        Ok(Self::block(
            &format!("Raw size,{}", report.size),
            &RAW_HEADER,
            &raw_rows(report),
        ))
    }

    fn format_benchmark(&self, report: &BenchmarkReport) -> Result<String> {
        Ok(Self::block(
            &format!("Benchmark size,{}", report.size),
            &BENCHMARK_HEADER,
            &benchmark_rows(report),
        ))
    }

    fn format_warning(&self, warning: &str) -> String {
        format!("Warning: {}", warning)
    }
}

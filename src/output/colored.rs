//! Aligned, optionally colored table rendering for terminals
//!
//! Produces the same figures as the CSV formatter laid out in padded
//! columns. The fastest store of each test is highlighted in the analysis
//! table and speedups are colored by direction.

use super::formatter::{
    analysis_rows, benchmark_rows, histogram_rows, raw_rows, speedup_rows, ReportFormatter,
    ANALYSIS_HEADER, BENCHMARK_HEADER, HISTOGRAM_HEADER, RAW_HEADER, SPEEDUP_HEADER,
};
use crate::analysis::{BenchmarkReport, HistogramReport, RawReport, SizeReport, SpeedupReport};
use crate::error::{AppError, Result};
use crate::utils::comparison::max_by_float;
use colored::*;
use std::collections::HashSet;
use std::fmt::Write as _;

/// Color scheme configuration
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub header: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub border: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            header: Color::Blue,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            border: Color::BrightBlack,
        }
    }
}

/// Highlight applied to a single table row
#[derive(Debug, Clone, Copy, PartialEq)]
enum RowStyle {
    Normal,
    Best,
    Faster,
    Slower,
}

/// Table formatter implementation
pub struct TableFormatter {
    enable_color: bool,
    color_scheme: ColorScheme,
}

fn write_err(e: std::fmt::Error) -> AppError {
    AppError::internal(format!("Failed to format table: {}", e))
}

impl TableFormatter {
    pub fn new(enable_color: bool) -> Self {
        Self {
            enable_color,
            color_scheme: ColorScheme::default(),
        }
    }

    /// Apply color to text if colors are enabled
    fn colorize(&self, text: &str, color: Color) -> ColoredString {
        if self.enable_color {
            text.color(color)
        } else {
            text.normal()
        }
    }

    fn bold(&self, text: &str) -> ColoredString {
        if self.enable_color {
            text.bold()
        } else {
            text.normal()
        }
    }

    fn heading(&self, text: &str) -> ColoredString {
        if self.enable_color {
            text.bold().color(self.color_scheme.header)
        } else {
            text.normal()
        }
    }

    /// Column widths from the plain text of header and rows
    fn column_widths(header: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
        header
            .iter()
            .enumerate()
            .map(|(i, title)| {
                rows.iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.len())
                    .chain(std::iter::once(title.len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Text columns are left aligned, figures right aligned
    fn pad(cell: &str, width: usize, column: usize) -> String {
        if column < 2 {
            format!("{:<width$}", cell, width = width)
        } else {
            format!("{:>width$}", cell, width = width)
        }
    }

    fn create_table(
        &self,
        title: &str,
        header: &[&str],
        rows: &[Vec<String>],
        styles: &[RowStyle],
    ) -> Result<String> {
        let widths = Self::column_widths(header, rows);
        let total_width = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        let mut output = String::new();

        writeln!(output, "{}", self.heading(title)).map_err(write_err)?;
        writeln!(output, "{}", self.colorize(&"─".repeat(total_width), self.color_scheme.border))
            .map_err(write_err)?;

        let header_line: Vec<String> = header
            .iter()
            .enumerate()
            .map(|(i, title)| Self::pad(title, widths[i], i))
            .collect();
        writeln!(output, "{}", self.bold(&header_line.join("  "))).map_err(write_err)?;
        writeln!(output, "{}", self.colorize(&"─".repeat(total_width), self.color_scheme.border))
            .map_err(write_err)?;

        if rows.is_empty() {
            writeln!(output, "{}", self.colorize("(no results)", self.color_scheme.border))
                .map_err(write_err)?;
        }

        for (index, row) in rows.iter().enumerate() {
            let line: Vec<String> = row
                .iter()
                .enumerate()
                .map(|(i, cell)| Self::pad(cell, widths.get(i).copied().unwrap_or(0), i))
                .collect();
            let line = line.join("  ");
            let styled = match styles.get(index).copied().unwrap_or(RowStyle::Normal) {
                RowStyle::Normal => line.normal(),
                RowStyle::Best => self.bold(&line).color(self.color_scheme.success),
                RowStyle::Faster => self.colorize(&line, self.color_scheme.success),
                RowStyle::Slower => self.colorize(&line, self.color_scheme.error),
            };
            let styled = if self.enable_color { styled } else { line.normal() };
            writeln!(output, "{}", styled).map_err(write_err)?;
        }

        Ok(output)
    }

    /// Mark the row with the highest average throughput of every test
    fn best_rows(report: &SizeReport) -> Vec<RowStyle> {
        let tests: HashSet<&str> = report.rows.iter().map(|row| row.test.as_str()).collect();
        let best: HashSet<usize> = tests
            .into_iter()
            .filter_map(|test| {
                let candidates: Vec<(usize, f64)> = report
                    .rows
                    .iter()
                    .enumerate()
                    .filter(|(_, row)| row.test == test)
                    .map(|(i, row)| (i, row.summary.average))
                    .collect();
                if candidates.len() < 2 {
                    return None;
                }
                max_by_float(candidates.iter(), |candidate| candidate.1).map(|candidate| candidate.0)
            })
            .collect();

        (0..report.rows.len())
            .map(|i| if best.contains(&i) { RowStyle::Best } else { RowStyle::Normal })
            .collect()
    }
}

impl ReportFormatter for TableFormatter {
    fn format_analysis(&self, report: &SizeReport) -> Result<String> {
        let mut output = self.create_table(
            &format!("Throughput, size {}", report.size),
            &ANALYSIS_HEADER,
            &analysis_rows(report),
            &Self::best_rows(report),
        )?;

        for (store, test) in &report.empty {
            writeln!(output, "{}", self.format_warning(&format!("{} {}: no valid samples", store, test)))
                .map_err(write_err)?;
        }
        Ok(output)
    }

    fn format_histograms(&self, report: &HistogramReport) -> Result<String> {
        let mut output = self.create_table(
            &format!("Histogram, size {}", report.size),
            &HISTOGRAM_HEADER,
            &histogram_rows(report),
            &[],
        )?;

        for (store, test) in &report.skipped {
            writeln!(output, "{}", self.format_warning(&format!("{} {}: too few samples", store, test)))
                .map_err(write_err)?;
        }
        Ok(output)
    }

    fn format_speedups(&self, report: &SpeedupReport) -> Result<String> {
        let styles: Vec<RowStyle> = report
            .rows
            .iter()
            .map(|row| {
                if row.speedup > 0.0 {
                    RowStyle::Faster
                } else if row.speedup < 0.0 {
                    RowStyle::Slower
                } else {
                    RowStyle::Normal
                }
            })
            .collect();

        self.create_table(
            &format!("Speedup against {}, size {}", report.baseline, report.size),
            &SPEEDUP_HEADER,
            &speedup_rows(report),
            &styles,
        )
    }

    fn format_raw(&self, report: &RawReport) -> Result<String> {
        self.create_table(
            &format!("Raw samples, size {}", report.size),
            &RAW_HEADER,
            &raw_rows(report),
            &[],
        )
    }

    fn format_benchmark(&self, report: &BenchmarkReport) -> Result<String> {
        self.create_table(
            &format!("Operations per second, size {}", report.size),
            &BENCHMARK_HEADER,
            &benchmark_rows(report),
            &[],
        )
    }

    fn format_warning(&self, warning: &str) -> String {
        format!("{} {}", self.colorize("!", self.color_scheme.warning), self.colorize(warning, self.color_scheme.warning))
    }
}

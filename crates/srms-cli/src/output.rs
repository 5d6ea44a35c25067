//! Output formatting and writing utilities
//!
//! This module provides utilities for formatting and writing output
//! in various formats (JSON, YAML, human-readable), with specialised
//! rendering for header validation results, CSV previews and bulk
//! operation status.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use srms_core::{BulkOperationStatus, ImportPreview, OperationState, ValidationResult};
use std::io::{self, IsTerminal, Write};
use std::time::Duration;
use tracing::trace;

/// Trait for formatting output with specialized support for common types
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format a header validation result
    fn format_validation_result(&self, result: &ValidationResult) -> Result<String>;

    /// Format a bulk operation status
    fn format_bulk_status(&self, status: &BulkOperationStatus) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            OutputFormat::Human => Ok(serde_json::to_string_pretty(value)?),
        }
    }

    fn format_validation_result(&self, result: &ValidationResult) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_validation_result_human(result)),
            _ => self.format(result),
        }
    }

    fn format_bulk_status(&self, status: &BulkOperationStatus) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_bulk_status_human(status)),
            _ => self.format(status),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    show_progress: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer on stdout
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool, progress: bool) -> Self {
        Self {
            format,
            use_color,
            show_progress: progress && !quiet && io::stdout().is_terminal(),
            quiet,
            writer: Box::new(io::stdout()),
        }
    }

    /// Create an output writer with a custom writer
    #[allow(dead_code)]
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            show_progress: false, // No progress bars with custom writers
            quiet,
            writer,
        }
    }

    /// Get the output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Check if this writer produces human-readable output
    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        if self.quiet || !self.is_human() {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || !self.is_human() {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if !self.is_human() {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(&format!("WARNING: {}", message))
        }
    }

    /// Write an error message
    pub fn error(&mut self, message: &str) -> Result<()> {
        if !self.is_human() {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.red().to_string())
        } else {
            self.writeln(&format!("ERROR: {}", message))
        }
    }

    /// Write a section header
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || !self.is_human() {
            return Ok(());
        }

        self.writeln("")?;
        if self.use_color {
            self.writeln(&format!("═══ {} ═══", title).bright_blue().to_string())
        } else {
            self.writeln(&format!("=== {} ===", title))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        trace!(bytes = formatted.len(), "Outputting data");

        if self.is_human() || self.format == OutputFormat::JsonPretty {
            self.writeln(&formatted)
        } else {
            // YAML already ends in a newline; compact JSON gets one here
            if formatted.ends_with('\n') {
                self.write(&formatted)
            } else {
                self.writeln(&formatted)
            }
        }
    }

    /// Write a header validation result
    pub fn validation_result(&mut self, result: &ValidationResult) -> Result<()> {
        if self.is_human() {
            if result.valid {
                self.success("✓ All required headers present")?;
            } else {
                self.error("✗ Required headers are missing")?;
            }
            if result.has_issues() {
                self.warning("Header validation issues:")?;
                let formatted = self.format.format_validation_result(result)?;
                return self.write(&formatted);
            }
            return Ok(());
        }
        self.data(result)
    }

    /// Write an import preview: header issues, the row table and the remainder
    pub fn import_preview(&mut self, report: &ImportPreview) -> Result<()> {
        if !self.is_human() {
            return self.data(report);
        }

        self.section(&format!("CSV Preview ({} records)", report.preview.total_rows))?;

        if report.validation.has_issues() {
            self.warning("Header validation issues:")?;
            let formatted = self.format.format_validation_result(&report.validation)?;
            self.write(&formatted)?;
        }

        let rows = report
            .preview
            .shown_rows
            .iter()
            .map(|row| {
                report
                    .headers
                    .iter()
                    .map(|h| row.get(h).unwrap_or("").to_string())
                    .collect()
            })
            .collect();
        self.table(&report.headers, rows)?;

        if report.preview.truncated && !self.quiet {
            let more = format!("... and {} more records", report.preview.remaining());
            if self.use_color {
                self.writeln(&more.dimmed().to_string())?;
            } else {
                self.writeln(&more)?;
            }
        }

        Ok(())
    }

    /// Write a bulk operation status
    pub fn bulk_status(&mut self, status: &BulkOperationStatus) -> Result<()> {
        if !self.is_human() {
            return self.data(status);
        }

        let formatted = self.format.format_bulk_status(status)?;
        if self.use_color {
            self.write(&colorize_status(&formatted, &status.status))
        } else {
            self.write(&formatted)
        }
    }

    /// Create a progress bar for a bulk operation
    pub fn progress_bar(&self, length: u64, message: &str) -> Option<ProgressBar> {
        if !self.show_progress || !self.is_human() {
            return None;
        }

        let pb = ProgressBar::new(length);
        pb.set_style(default_progress_style());
        pb.set_message(message.to_string());
        Some(pb)
    }

    /// Create a spinner for indeterminate progress
    pub fn spinner(&self, message: &str) -> Option<ProgressBar> {
        if !self.show_progress || !self.is_human() {
            return None;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(default_spinner_style());
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    }

    /// Write a table (for human format)
    pub fn table(&mut self, headers: &[String], rows: Vec<Vec<String>>) -> Result<()> {
        if self.quiet || !self.is_human() {
            return Ok(());
        }

        // Calculate column widths
        let mut widths = headers.iter().map(|h| h.chars().count()).collect::<Vec<_>>();
        for row in &rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.chars().count());
                }
            }
        }

        let header_row = headers
            .iter()
            .enumerate()
            .map(|(i, h)| format!("{:width$}", h, width = widths[i]))
            .collect::<Vec<_>>()
            .join(" │ ");

        if self.use_color {
            self.writeln(header_row.trim_end().bold().to_string().as_str())?;
        } else {
            self.writeln(header_row.trim_end())?;
        }

        let separator = widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("─┼─");
        self.writeln(&separator)?;

        for row in rows {
            let row_str = row
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    if i < widths.len() {
                        format!("{:width$}", cell, width = widths[i])
                    } else {
                        cell.clone()
                    }
                })
                .collect::<Vec<_>>()
                .join(" │ ");
            self.writeln(row_str.trim_end())?;
        }

        Ok(())
    }
}

/// Helper function to create a progress bar style
pub fn default_progress_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-")
}

/// Helper function to create a spinner style
pub fn default_spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// Format header issues for human reading, one per line
fn format_validation_result_human(result: &ValidationResult) -> String {
    result
        .issues()
        .iter()
        .map(|issue| format!("  • {}\n", issue))
        .collect()
}

/// Format a bulk operation status for human reading
fn format_bulk_status_human(status: &BulkOperationStatus) -> String {
    const BAR_WIDTH: usize = 20;
    let percentage = status.percentage();
    let filled = BAR_WIDTH * usize::from(percentage) / 100;

    let mut output = format!(
        "[{}{}] {:>3}%  {}/{} processed  [{}]\n",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        percentage,
        status.processed_records,
        status.total_records,
        status.status,
    );
    if status.has_failures() {
        output.push_str(&format!("  {} failed\n", status.failed_records));
    }
    output
}

/// Badge color for a bulk operation state
fn colorize_status(text: &str, state: &OperationState) -> String {
    match state {
        OperationState::Pending => text.yellow().to_string(),
        OperationState::Processing => text.cyan().to_string(),
        OperationState::Completed => text.green().to_string(),
        OperationState::Failed => text.red().to_string(),
        OperationState::Other(_) => text.to_string(),
    }
}

#[cfg(test)]
mod tests;

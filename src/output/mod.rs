//! Output formatting and display
//!
//! Human-readable output goes to stdout through an [`OutputFormatter`]. With
//! `--json` the only thing written to stdout is the final summary document.

mod colored;
mod formatter;

pub use colored::{ColorScheme, ColoredFormatter, PerformanceLevel};
pub use formatter::{
    format_duration, format_seconds, OutputFormatter, PlainFormatter,
};

use crate::{
    error::{AppError, Result},
    executor::{BenchmarkReport, TrialEvent, TrialObserver},
    stats::StatSummary,
};
use serde::Serialize;

/// Output formatting factory for creating appropriate formatters
pub struct OutputFormatterFactory;

impl OutputFormatterFactory {
    /// Create a formatter based on color support and preferences
    pub fn create_formatter(enable_color: bool) -> Box<dyn OutputFormatter> {
        if enable_color {
            Box::new(ColoredFormatter::new())
        } else {
            Box::new(PlainFormatter)
        }
    }

    /// Create a plain text formatter for scripts/logs
    pub fn create_plain_formatter() -> Box<dyn OutputFormatter> {
        Self::create_formatter(false)
    }

    /// Whether color should be used, honouring `NO_COLOR`
    pub fn color_enabled(requested: bool) -> bool {
        requested && std::env::var_os("NO_COLOR").is_none()
    }
}

/// Machine-readable result document printed with `--json`
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub probe: &'a str,
    pub target: &'a str,
    pub port: u16,
    pub summary: &'a StatSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_execution_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<'a> JsonReport<'a> {
    pub fn new(probe: &'a str, target: &'a str, port: u16, report: &'a BenchmarkReport) -> Self {
        Self {
            probe,
            target,
            port,
            summary: &report.summary,
            initial_execution_ms: report.initial_execution_ms,
            error: report.aborted.as_ref().map(|e| e.to_string()),
        }
    }

    pub fn render(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Prints per-trial lines as the benchmark progresses
pub struct ConsoleObserver {
    formatter: Box<dyn OutputFormatter>,
    quiet: bool,
}

impl ConsoleObserver {
    pub fn new(formatter: Box<dyn OutputFormatter>) -> Self {
        Self { formatter, quiet: false }
    }

    /// Observer that prints nothing to stdout (JSON mode)
    pub fn quiet(formatter: Box<dyn OutputFormatter>) -> Self {
        Self { formatter, quiet: true }
    }

    pub fn formatter(&self) -> &dyn OutputFormatter {
        self.formatter.as_ref()
    }

    fn emit(&self, line: Result<String>) {
        if self.quiet {
            return;
        }
        match line {
            Ok(line) => println!("{}", line),
            Err(error) => eprintln!("{}", error),
        }
    }
}

impl TrialObserver for ConsoleObserver {
    fn on_trial(&mut self, event: &TrialEvent<'_>) {
        self.emit(self.formatter.format_trial(event));
    }

    fn on_abort(&mut self, error: &AppError) {
        match self.formatter.format_error(error) {
            Ok(line) => eprintln!("{}", line),
            Err(_) => eprintln!("{}", error),
        }
    }
}

//! Colored formatter implementation with terminal color support

use super::formatter::{
    fmt_error, format_duration, outcome_text, trial_label, OutputFormatter, PlainFormatter,
};
use crate::{
    error::{AppError, Result},
    executor::TrialEvent,
    models::{BenchmarkConfig, TrialOutcome},
    stats::StatSummary,
};
use colored::*;
use std::fmt::Write as _;

/// Latency classification for color coding
#[derive(Debug, Clone, PartialEq)]
pub enum PerformanceLevel {
    Excellent,  // < 5ms
    Good,       // 5-20ms
    Fair,       // 20-100ms
    Poor,       // >= 100ms
}

impl PerformanceLevel {
    /// Determine performance level from a latency in milliseconds
    pub fn from_latency(time_ms: f64) -> Self {
        if time_ms < 5.0 {
            Self::Excellent
        } else if time_ms < 20.0 {
            Self::Good
        } else if time_ms < 100.0 {
            Self::Fair
        } else {
            Self::Poor
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Self::Excellent => Color::Green,
            Self::Good => Color::Cyan,
            Self::Fair => Color::Yellow,
            Self::Poor => Color::Red,
        }
    }
}

/// Color scheme configuration
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub header: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
    pub muted: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            header: Color::Blue,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            info: Color::Cyan,
            muted: Color::BrightBlack,
        }
    }
}

/// Colored formatter implementation
pub struct ColoredFormatter {
    plain_formatter: PlainFormatter,
    color_scheme: ColorScheme,
}

impl ColoredFormatter {
    /// Create a colored formatter with the default scheme
    pub fn new() -> Self {
        Self::with_color_scheme(ColorScheme::default())
    }

    /// Create a colored formatter with custom color scheme
    pub fn with_color_scheme(color_scheme: ColorScheme) -> Self {
        Self {
            plain_formatter: PlainFormatter,
            color_scheme,
        }
    }

    fn latency(&self, duration_ms: f64) -> ColoredString {
        format_duration(duration_ms).color(PerformanceLevel::from_latency(duration_ms).color())
    }
}

impl Default for ColoredFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for ColoredFormatter {
    fn format_banner(&self, description: &str, config: &BenchmarkConfig) -> Result<String> {
        let banner = self.plain_formatter.format_banner(description, config)?;
        Ok(banner.color(self.color_scheme.header).bold().to_string())
    }

    fn format_trial(&self, event: &TrialEvent<'_>) -> Result<String> {
        let label = trial_label(event).color(self.color_scheme.muted);
        let line = match event.outcome {
            TrialOutcome::Success { duration_ms, rows: None } => {
                format!("{} {}", label, self.latency(*duration_ms))
            }
            TrialOutcome::Success { duration_ms, rows: Some(rows) } => {
                format!("{} {}, {} rows", label, self.latency(*duration_ms), rows)
            }
            TrialOutcome::Timeout(_) => {
                format!("{} {}", label, outcome_text(event.outcome).color(self.color_scheme.warning))
            }
            TrialOutcome::Failure(_) => {
                format!("{} {}", label, outcome_text(event.outcome).color(self.color_scheme.error))
            }
        };
        Ok(line)
    }

    fn format_initial_execution(&self, duration_ms: f64) -> Result<String> {
        Ok(format!(
            "{} {}",
            "Execution time of warm up:".color(self.color_scheme.info),
            self.latency(duration_ms)
        ))
    }

    fn format_summary(&self, summary: &StatSummary) -> Result<String> {
        let mut output = String::new();
        writeln!(output, "{}", "Results:".color(self.color_scheme.header).bold()).map_err(fmt_error)?;

        let rows = [
            ("Minimum latency", summary.min),
            ("Maximum latency", summary.max),
            ("Mean latency", summary.mean),
            ("Median latency", summary.median),
        ];
        for (label, value) in rows {
            writeln!(output, "  {}: {}", label, self.latency(value)).map_err(fmt_error)?;
        }
        writeln!(output, "  Standard deviation: {}", format_duration(summary.stdev)).map_err(fmt_error)?;

        let rate = format!("{}/{} attempts", summary.successful_count, summary.total_attempts());
        let rate = if summary.failed_count == 0 {
            rate.color(self.color_scheme.success)
        } else if summary.successful_count == 0 {
            rate.color(self.color_scheme.error)
        } else {
            rate.color(self.color_scheme.warning)
        };
        write!(output, "  Success rate: {}", rate).map_err(fmt_error)?;
        Ok(output)
    }

    fn format_error(&self, error: &AppError) -> Result<String> {
        Ok(format!("{} {}", "Error:".color(self.color_scheme.error).bold(), error.format_for_console(true)))
    }

    fn format_warning(&self, warning: &str) -> Result<String> {
        Ok(format!("{} {}", "Warning:".color(self.color_scheme.warning).bold(), warning))
    }
}

//! Core formatting traits and the plain text implementation

use crate::{
    error::{AppError, Result},
    executor::TrialEvent,
    models::{BenchmarkConfig, TrialOutcome, TrialPhase},
    stats::StatSummary,
};
use std::fmt::Write as _;

/// Main trait for output formatting
pub trait OutputFormatter {
    /// Line announcing what is about to be measured
    fn format_banner(&self, description: &str, config: &BenchmarkConfig) -> Result<String>;

    /// Per-attempt diagnostic line
    fn format_trial(&self, event: &TrialEvent<'_>) -> Result<String>;

    /// Duration of the first warm-up trial
    fn format_initial_execution(&self, duration_ms: f64) -> Result<String>;

    /// Results block for a finished run
    fn format_summary(&self, summary: &StatSummary) -> Result<String>;

    /// Format error messages
    fn format_error(&self, error: &AppError) -> Result<String>;

    /// Format warning messages
    fn format_warning(&self, warning: &str) -> Result<String>;
}

/// Render a latency with two decimals and its unit
pub fn format_duration(duration_ms: f64) -> String {
    format!("{:.2} ms", duration_ms)
}

/// Render a number of seconds without trailing zeros (`2`, `0.5`)
pub fn format_seconds(seconds: f64) -> String {
    format!("{}", seconds)
}

/// Label at the start of a trial line
pub(crate) fn trial_label(event: &TrialEvent<'_>) -> String {
    let phase = match event.phase {
        TrialPhase::Warmup => "Warmup",
        TrialPhase::Measured => "Attempt",
    };
    format!("  {} {}/{}:", phase, event.index, event.total)
}

/// Text following the trial label
pub(crate) fn outcome_text(outcome: &TrialOutcome) -> String {
    match outcome {
        TrialOutcome::Success { duration_ms, rows: None } => format_duration(*duration_ms),
        TrialOutcome::Success { duration_ms, rows: Some(rows) } => {
            format!("{}, {} rows", format_duration(*duration_ms), rows)
        }
        TrialOutcome::Timeout(after) => {
            format!("Timed out after {} seconds", format_seconds(after.as_secs_f64()))
        }
        TrialOutcome::Failure(detail) => format!("Error - {}", detail),
    }
}

pub(crate) fn fmt_error(e: std::fmt::Error) -> AppError {
    AppError::io(format!("Failed to format output: {}", e))
}

/// Plain text formatter implementation
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainFormatter;

impl OutputFormatter for PlainFormatter {
    fn format_banner(&self, description: &str, config: &BenchmarkConfig) -> Result<String> {
        let mut output = format!(
            "Measuring {} ({} attempts, {}s timeout, {}s wait",
            description,
            config.trial_count,
            format_seconds(config.timeout_seconds),
            format_seconds(config.wait_seconds),
        );
        if config.warmup_count > 0 {
            write!(output, ", {} warm-up", config.warmup_count).map_err(fmt_error)?;
        }
        output.push_str(")...");
        Ok(output)
    }

    fn format_trial(&self, event: &TrialEvent<'_>) -> Result<String> {
        Ok(format!("{} {}", trial_label(event), outcome_text(event.outcome)))
    }

    fn format_initial_execution(&self, duration_ms: f64) -> Result<String> {
        Ok(format!("Execution time of warm up: {}", format_duration(duration_ms)))
    }

    fn format_summary(&self, summary: &StatSummary) -> Result<String> {
        let mut output = String::new();
        writeln!(output, "Results:").map_err(fmt_error)?;
        writeln!(output, "  Minimum latency: {}", format_duration(summary.min)).map_err(fmt_error)?;
        writeln!(output, "  Maximum latency: {}", format_duration(summary.max)).map_err(fmt_error)?;
        writeln!(output, "  Mean latency: {}", format_duration(summary.mean)).map_err(fmt_error)?;
        writeln!(output, "  Median latency: {}", format_duration(summary.median)).map_err(fmt_error)?;
        writeln!(output, "  Standard deviation: {}", format_duration(summary.stdev)).map_err(fmt_error)?;
        write!(
            output,
            "  Success rate: {}/{} attempts",
            summary.successful_count,
            summary.total_attempts()
        )
        .map_err(fmt_error)?;
        Ok(output)
    }

    fn format_error(&self, error: &AppError) -> Result<String> {
        Ok(format!("Error: {}", error.format_for_console(false)))
    }

    fn format_warning(&self, warning: &str) -> Result<String> {
        Ok(format!("Warning: {}", warning))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProbeKind;
    use std::time::Duration;

    fn event(phase: TrialPhase, outcome: &TrialOutcome) -> TrialEvent<'_> {
        TrialEvent { phase, index: 2, total: 10, outcome }
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(12.345), "12.35 ms");
        assert_eq!(format_duration(0.0), "0.00 ms");
    }

    #[test]
    fn test_trial_lines() {
        let formatter = PlainFormatter::default();

        let success = TrialOutcome::success(3.14159);
        assert_eq!(
            formatter.format_trial(&event(TrialPhase::Measured, &success)).unwrap(),
            "  Attempt 2/10: 3.14 ms"
        );

        let rows = TrialOutcome::success_with_rows(1.0, 5);
        assert_eq!(
            formatter.format_trial(&event(TrialPhase::Measured, &rows)).unwrap(),
            "  Attempt 2/10: 1.00 ms, 5 rows"
        );

        let timeout = TrialOutcome::timeout(Duration::from_secs(2));
        assert_eq!(
            formatter.format_trial(&event(TrialPhase::Measured, &timeout)).unwrap(),
            "  Attempt 2/10: Timed out after 2 seconds"
        );

        let failure = TrialOutcome::failure("[NETWORK] Connection refused");
        assert_eq!(
            formatter.format_trial(&event(TrialPhase::Warmup, &failure)).unwrap(),
            "  Warmup 2/10: Error - [NETWORK] Connection refused"
        );
    }

    #[test]
    fn test_summary_block() {
        let formatter = PlainFormatter::default();
        let summary = StatSummary::compute(&[1.0, 2.0, 3.0], 1);
        let output = formatter.format_summary(&summary).unwrap();

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "Results:");
        assert_eq!(lines[1], "  Minimum latency: 1.00 ms");
        assert_eq!(lines[2], "  Maximum latency: 3.00 ms");
        assert_eq!(lines[3], "  Mean latency: 2.00 ms");
        assert_eq!(lines[4], "  Median latency: 2.00 ms");
        assert_eq!(lines[5], "  Standard deviation: 1.00 ms");
        assert_eq!(lines[6], "  Success rate: 3/4 attempts");
    }

    #[test]
    fn test_empty_summary_block() {
        let output = PlainFormatter::default().format_summary(&StatSummary::empty()).unwrap();
        assert!(output.contains("Mean latency: 0.00 ms"));
        assert!(output.ends_with("Success rate: 0/0 attempts"));
    }

    #[test]
    fn test_banner() {
        let mut config = BenchmarkConfig::for_probe(ProbeKind::TcpConnect);
        config.warmup_count = 3;
        let banner = PlainFormatter::default()
            .format_banner("TCP connect to localhost:80", &config)
            .unwrap();
        assert_eq!(
            banner,
            "Measuring TCP connect to localhost:80 (10 attempts, 2s timeout, 0.5s wait, 3 warm-up)..."
        );
    }

    #[test]
    fn test_error_and_warning() {
        let formatter = PlainFormatter::default();
        let error = formatter.format_error(&AppError::file("missing.sql")).unwrap();
        assert_eq!(error, "Error: [FILE] File error: missing.sql");
        assert_eq!(formatter.format_warning("careful").unwrap(), "Warning: careful");
    }
}

//! Configuration validation utilities and rules

use crate::{
    error::Result,
    models::{BenchmarkConfig, WarmupPolicy},
    types::ProbeKind,
};
use colored::Colorize;

/// Runs longer than this get an informational warning
const LONG_RUN_SECS: f64 = 600.0;

/// Configuration validator with advisory checks on top of hard validation
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate configuration, returning advisory warnings
    ///
    /// Hard errors come from [`BenchmarkConfig::validate`]; everything
    /// reported here still allows the run to proceed.
    pub fn validate_comprehensive(config: &BenchmarkConfig) -> Result<Vec<ValidationWarning>> {
        config.validate()?;

        let mut warnings = Vec::new();
        warnings.extend(Self::validate_statistics_settings(config));
        warnings.extend(Self::validate_timing_settings(config));
        warnings.extend(Self::validate_warmup_settings(config));
        Ok(warnings)
    }

    fn validate_statistics_settings(config: &BenchmarkConfig) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        if config.trial_count < 3 {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                format!(
                    "Count of {} may not provide reliable statistics (recommended: >= 3)",
                    config.trial_count
                ),
            ));
        }

        let expected = Self::worst_case_duration_secs(config);
        if expected > LONG_RUN_SECS {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                format!("Run may take up to {:.0} seconds", expected),
            ));
        }

        warnings
    }

    fn validate_timing_settings(config: &BenchmarkConfig) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        if config.timeout_seconds < 0.1 {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                format!(
                    "Timeout of {}s may be too short for remote targets",
                    config.timeout_seconds
                ),
            ));
        }

        if config.include_connection_setup_in_timing && config.probe != ProbeKind::ListenerPing {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                format!(
                    "Including connection setup only applies to listener pings, not {}",
                    config.probe.name()
                ),
            ));
        }

        warnings
    }

    fn validate_warmup_settings(config: &BenchmarkConfig) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        if config.warmup_policy == WarmupPolicy::ReportFirst && config.warmup_count == 0 {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                "Warm-up mode report-first has no effect without warm-up attempts",
            ));
        }

        warnings
    }

    /// Upper bound of the run time when every operation times out
    fn worst_case_duration_secs(config: &BenchmarkConfig) -> f64 {
        let attempts = f64::from(config.trial_count) + f64::from(config.warmup_count);
        let waits = f64::from(config.trial_count.saturating_sub(1)) + f64::from(config.warmup_count);
        attempts * config.timeout_seconds + waits * config.wait_seconds
    }
}

/// Validation warning levels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValidationLevel {
    Info,
    Warning,
}

impl ValidationLevel {
    /// Get display string for level
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
        }
    }
}

/// Configuration validation warning
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub level: ValidationLevel,
    pub message: String,
}

impl ValidationWarning {
    /// Create a new validation warning
    pub fn new(level: ValidationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    /// Format warning for display
    pub fn format(&self, use_color: bool) -> String {
        let level = if use_color {
            match self.level {
                ValidationLevel::Info => self.level.as_str().blue().to_string(),
                ValidationLevel::Warning => self.level.as_str().yellow().to_string(),
            }
        } else {
            self.level.as_str().to_string()
        };
        format!("[{}] {}", level, self.message)
    }
}

/// Convenience function for comprehensive configuration validation
pub fn validate_config(config: &BenchmarkConfig) -> Result<Vec<ValidationWarning>> {
    ConfigValidator::validate_comprehensive(config)
}

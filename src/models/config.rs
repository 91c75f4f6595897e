//! Benchmark configuration data model and validation

use crate::types::{AppError, ProbeKind, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How warm-up trials show up in the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WarmupPolicy {
    /// Warm-up trials are executed and then forgotten
    #[default]
    Discard,
    /// The first warm-up duration is reported as the initial execution time
    ReportFirst,
}

impl std::str::FromStr for WarmupPolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "discard" => Ok(WarmupPolicy::Discard),
            "report-first" | "report_first" => Ok(WarmupPolicy::ReportFirst),
            _ => Err(AppError::parse(format!("Invalid warm-up policy: {}", s))),
        }
    }
}

/// Settings for one benchmark run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    /// Probe this configuration drives
    pub probe: ProbeKind,

    /// Target hostname or IP address
    pub target: String,

    /// Target port
    pub port: u16,

    /// Number of measured trials
    #[serde(default = "default_trial_count")]
    pub trial_count: u32,

    /// Timeout applied to every network operation, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_seconds: f64,

    /// Pause between consecutive trials, in seconds
    #[serde(default = "default_wait_secs")]
    pub wait_seconds: f64,

    /// Trials executed before measurement starts
    #[serde(default)]
    pub warmup_count: u32,

    #[serde(default)]
    pub warmup_policy: WarmupPolicy,

    /// Start the timer before connecting instead of after
    #[serde(default)]
    pub include_connection_setup_in_timing: bool,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self::for_probe(ProbeKind::ListenerPing)
    }
}

impl BenchmarkConfig {
    /// Default configuration for the given probe
    pub fn for_probe(probe: ProbeKind) -> Self {
        Self {
            probe,
            target: crate::defaults::DEFAULT_TARGET.to_string(),
            port: probe.default_port(),
            trial_count: default_trial_count(),
            timeout_seconds: default_timeout_secs(),
            wait_seconds: default_wait_secs(),
            warmup_count: crate::defaults::DEFAULT_WARMUP_COUNT,
            warmup_policy: WarmupPolicy::default(),
            include_connection_setup_in_timing: false,
            enable_color: default_enable_color(),
            verbose: false,
            debug: false,
        }
    }

    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs_f64(self.timeout_seconds)
    }

    /// Get the inter-trial wait as Duration
    pub fn inter_trial_wait(&self) -> Duration {
        Duration::from_secs_f64(self.wait_seconds)
    }

    /// `host:port` of the target
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.target, self.port)
    }

    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Result<()> {
        if self.target.trim().is_empty() {
            return Err(AppError::config("Target host cannot be empty"));
        }

        if self.port == 0 {
            return Err(AppError::config("Port must be greater than 0"));
        }

        if self.trial_count == 0 {
            return Err(AppError::config("Count must be greater than 0"));
        }

        if self.trial_count > crate::defaults::MAX_TRIAL_COUNT {
            return Err(AppError::config(format!(
                "Count cannot exceed {}",
                crate::defaults::MAX_TRIAL_COUNT
            )));
        }

        if !self.timeout_seconds.is_finite() || self.timeout_seconds <= 0.0 {
            return Err(AppError::config("Timeout must be greater than 0"));
        }

        if self.timeout_seconds > crate::defaults::MAX_TIMEOUT_SECS {
            return Err(AppError::config(format!(
                "Timeout cannot exceed {} seconds",
                crate::defaults::MAX_TIMEOUT_SECS
            )));
        }

        if !self.wait_seconds.is_finite() || self.wait_seconds < 0.0 {
            return Err(AppError::config("Wait cannot be negative"));
        }

        if self.wait_seconds > crate::defaults::MAX_WAIT_SECS {
            return Err(AppError::config(format!(
                "Wait cannot exceed {} seconds",
                crate::defaults::MAX_WAIT_SECS
            )));
        }

        if self.warmup_count > crate::defaults::MAX_WARMUP_COUNT {
            return Err(AppError::config(format!(
                "Warm-up count cannot exceed {}",
                crate::defaults::MAX_WARMUP_COUNT
            )));
        }

        Ok(())
    }

    /// Merge `DLP_*` environment variables into this configuration
    pub fn merge_from_env(&mut self) -> Result<()> {
        if let Ok(count) = std::env::var("DLP_COUNT") {
            self.trial_count = count.parse()
                .map_err(|e| AppError::config(format!("Invalid DLP_COUNT value '{}': {}", count, e)))?;
        }

        if let Ok(timeout) = std::env::var("DLP_TIMEOUT_SECONDS") {
            self.timeout_seconds = timeout.parse()
                .map_err(|e| AppError::config(format!("Invalid DLP_TIMEOUT_SECONDS value '{}': {}", timeout, e)))?;
        }

        if let Ok(wait) = std::env::var("DLP_WAIT_SECONDS") {
            self.wait_seconds = wait.parse()
                .map_err(|e| AppError::config(format!("Invalid DLP_WAIT_SECONDS value '{}': {}", wait, e)))?;
        }

        if let Ok(warmup) = std::env::var("DLP_WARMUP") {
            self.warmup_count = warmup.parse()
                .map_err(|e| AppError::config(format!("Invalid DLP_WARMUP value '{}': {}", warmup, e)))?;
        }

        if let Ok(enable_color) = std::env::var("DLP_ENABLE_COLOR") {
            self.enable_color = enable_color.parse()
                .map_err(|e| AppError::config(format!("Invalid DLP_ENABLE_COLOR value '{}': {}", enable_color, e)))?;
        }

        Ok(())
    }
}

// Default value functions for serde
fn default_trial_count() -> u32 {
    crate::defaults::DEFAULT_TRIAL_COUNT
}

fn default_timeout_secs() -> f64 {
    crate::defaults::DEFAULT_TIMEOUT.as_secs_f64()
}

fn default_wait_secs() -> f64 {
    crate::defaults::DEFAULT_WAIT.as_secs_f64()
}

fn default_enable_color() -> bool {
    crate::defaults::DEFAULT_ENABLE_COLOR
}

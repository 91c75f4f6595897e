//! Per-trial outcome data models

use crate::{error::AppError, types::TrialStatus};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Result of one timed attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TrialOutcome {
    /// The operation completed inside the timing boundary
    Success {
        /// Elapsed wall time in milliseconds
        duration_ms: f64,
        /// Rows fetched, for SQL trials
        rows: Option<u64>,
    },
    /// The operation exceeded the configured timeout
    Timeout(Duration),
    /// The operation failed; the detail starts with the error category
    Failure(String),
}

impl TrialOutcome {
    /// Create a successful outcome
    pub fn success(duration_ms: f64) -> Self {
        Self::Success { duration_ms, rows: None }
    }

    /// Create a successful outcome carrying a row count
    pub fn success_with_rows(duration_ms: f64, rows: u64) -> Self {
        Self::Success { duration_ms, rows: Some(rows) }
    }

    /// Create a timeout outcome
    pub fn timeout(after: Duration) -> Self {
        Self::Timeout(after)
    }

    /// Create a failed outcome
    pub fn failure<S: Into<String>>(detail: S) -> Self {
        Self::Failure(detail.into())
    }

    /// Classify an error raised inside a trial
    pub fn from_error(error: &AppError, timeout: Duration) -> Self {
        match error {
            AppError::Timeout(_) => Self::Timeout(timeout),
            other => Self::Failure(other.trial_detail()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Measured duration, if the trial succeeded
    pub fn duration_ms(&self) -> Option<f64> {
        match self {
            Self::Success { duration_ms, .. } => Some(*duration_ms),
            _ => None,
        }
    }

    pub fn status(&self) -> TrialStatus {
        match self {
            Self::Success { .. } => TrialStatus::Success,
            Self::Timeout(_) => TrialStatus::Timeout,
            Self::Failure(_) => TrialStatus::Failed,
        }
    }

    /// Convert a non-successful outcome back into an error
    pub fn to_error(&self) -> Option<AppError> {
        match self {
            Self::Success { .. } => None,
            Self::Timeout(after) => Some(AppError::timeout(format!(
                "Timed out after {}s",
                after.as_secs_f64()
            ))),
            Self::Failure(detail) => Some(AppError::connection(detail.clone())),
        }
    }
}

/// Whether a trial belongs to warm-up or to the measured run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrialPhase {
    Warmup,
    Measured,
}

impl TrialPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrialPhase::Warmup => "warmup",
            TrialPhase::Measured => "measured",
        }
    }
}

/// Convert an elapsed duration into fractional milliseconds
pub fn elapsed_ms(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64() * 1000.0
}

//! Summary statistics over trial durations

use serde::{Deserialize, Serialize};

/// Summary of one benchmark run
///
/// Built once from the successful durations and the failure tally. When no
/// trial succeeded every statistic is zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StatSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation, zero below two samples
    pub stdev: f64,
    pub successful_count: u32,
    pub failed_count: u32,
}

impl StatSummary {
    /// Compute the summary for the given successful durations (milliseconds)
    pub fn compute(durations: &[f64], failed_attempts: u32) -> Self {
        if durations.is_empty() {
            return Self {
                failed_count: failed_attempts,
                ..Self::default()
            };
        }

        let mut sorted = durations.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let count = sorted.len();
        let min = sorted[0];
        let max = sorted[count - 1];
        // Summation rounding must not push the mean outside the sample range
        let mean = (sorted.iter().sum::<f64>() / count as f64).clamp(min, max);

        let median = if count % 2 == 0 {
            (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
        } else {
            sorted[count / 2]
        };

        let stdev = if count < 2 || min == max {
            0.0
        } else {
            let variance = sorted
                .iter()
                .map(|value| {
                    let diff = value - mean;
                    diff * diff
                })
                .sum::<f64>()
                / (count - 1) as f64;
            variance.sqrt()
        };

        Self {
            min,
            max,
            mean,
            median,
            stdev,
            successful_count: count as u32,
            failed_count: failed_attempts,
        }
    }

    /// Summary for a run that was aborted before any trial
    pub fn empty() -> Self {
        Self::default()
    }

    /// Total number of measured attempts
    pub fn total_attempts(&self) -> u32 {
        self.successful_count + self.failed_count
    }

    /// Fraction of attempts that succeeded, 0.0 when nothing ran
    pub fn success_rate(&self) -> f64 {
        let total = self.total_attempts();
        if total == 0 {
            0.0
        } else {
            self.successful_count as f64 / total as f64
        }
    }

    pub fn has_measurements(&self) -> bool {
        self.successful_count > 0
    }
}


// Property-based tests in separate module
#[cfg(test)]
mod comprehensive_tests;

//! Benchmark loop
//!
//! Drives a [`Probe`] through optional warm-up trials and the measured
//! trials, one at a time, sleeping between trials and folding the outcomes
//! into a [`StatSummary`]. A failed trial never stops the loop; only a failed
//! `prepare()` or warm-up aborts the run.

use crate::{
    error::AppError,
    logging::Logger,
    models::{BenchmarkConfig, TrialOutcome, TrialPhase, WarmupPolicy},
    probe::Probe,
    stats::StatSummary,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Loop settings taken from the benchmark configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// Number of measured trials
    pub trial_count: u32,
    /// Trials run before measurement starts
    pub warmup_count: u32,
    pub warmup_policy: WarmupPolicy,
    /// Pause between trials
    pub inter_trial_wait: Duration,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self::from(&BenchmarkConfig::default())
    }
}

impl From<&BenchmarkConfig> for ExecutionConfig {
    fn from(config: &BenchmarkConfig) -> Self {
        Self {
            trial_count: config.trial_count,
            warmup_count: config.warmup_count,
            warmup_policy: config.warmup_policy,
            inter_trial_wait: config.inter_trial_wait(),
        }
    }
}

/// One finished trial, as seen by observers
#[derive(Debug, Clone, Copy)]
pub struct TrialEvent<'a> {
    pub phase: TrialPhase,
    /// 1-based position within its phase
    pub index: u32,
    /// Number of trials in the phase
    pub total: u32,
    pub outcome: &'a TrialOutcome,
}

/// Receives progress from the benchmark loop as it happens
pub trait TrialObserver {
    fn on_trial(&mut self, event: &TrialEvent<'_>);

    /// The run stopped before measurement could complete
    fn on_abort(&mut self, _error: &AppError) {}
}

/// Observer that ignores everything
#[derive(Debug, Default)]
pub struct NoopObserver;

impl TrialObserver for NoopObserver {
    fn on_trial(&mut self, _event: &TrialEvent<'_>) {}
}

/// Result of one benchmark run
#[derive(Debug)]
pub struct BenchmarkReport {
    pub summary: StatSummary,
    /// First warm-up duration, when the policy asks for it
    pub initial_execution_ms: Option<f64>,
    /// Set when the run ended before the measured trials
    pub aborted: Option<AppError>,
}

impl BenchmarkReport {
    fn aborted(error: AppError) -> Self {
        Self {
            summary: StatSummary::empty(),
            initial_execution_ms: None,
            aborted: Some(error),
        }
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted.is_some()
    }

    /// Process exit code for this run
    pub fn exit_code(&self) -> i32 {
        self.aborted.as_ref().map(AppError::exit_code).unwrap_or(0)
    }
}

/// Sequential trial runner
pub struct BenchmarkRunner {
    config: ExecutionConfig,
    logger: Logger,
}

impl BenchmarkRunner {
    pub fn new(config: ExecutionConfig, logger: Logger) -> Self {
        Self { config, logger }
    }

    pub fn config(&self) -> &ExecutionConfig {
        &self.config
    }

    /// Run the whole benchmark against `probe`
    pub async fn run(
        &self,
        probe: &mut dyn Probe,
        observer: &mut dyn TrialObserver,
    ) -> BenchmarkReport {
        let description = probe.describe();
        let run_id = Uuid::new_v4().to_string();
        self.logger
            .info(&format!("Starting benchmark: {}", description))
            .correlation_id(&run_id)
            .field("trial_count", self.config.trial_count)
            .field("warmup_count", self.config.warmup_count)
            .field("wait_s", self.config.inter_trial_wait.as_secs_f64())
            .log()
            .await;

        if let Err(error) = probe.prepare().await {
            return self.abort(&run_id, error, observer).await;
        }

        let initial_execution_ms = match self.run_warmup(&run_id, probe, observer).await {
            Ok(initial) => initial,
            Err(error) => return self.abort(&run_id, error, observer).await,
        };

        let total = self.config.trial_count;
        let mut durations = Vec::with_capacity(total as usize);
        let mut failed = 0u32;

        for index in 1..=total {
            let outcome = probe.attempt().await;
            match outcome.duration_ms() {
                Some(duration) => durations.push(duration),
                None => failed += 1,
            }
            self.record(&run_id, TrialPhase::Measured, index, total, &outcome, observer).await;

            if index < total {
                tokio::time::sleep(self.config.inter_trial_wait).await;
            }
        }

        let summary = StatSummary::compute(&durations, failed);
        self.logger
            .info(&format!("Benchmark complete: {}", description))
            .correlation_id(&run_id)
            .field("successful", summary.successful_count)
            .field("failed", summary.failed_count)
            .field("mean_ms", summary.mean)
            .log()
            .await;

        BenchmarkReport {
            summary,
            initial_execution_ms,
            aborted: None,
        }
    }

    /// Warm-up trials; any unsuccessful one ends the run
    async fn run_warmup(
        &self,
        run_id: &str,
        probe: &mut dyn Probe,
        observer: &mut dyn TrialObserver,
    ) -> Result<Option<f64>, AppError> {
        let total = self.config.warmup_count;
        let mut initial = None;

        for index in 1..=total {
            let outcome = probe.attempt().await;
            self.record(run_id, TrialPhase::Warmup, index, total, &outcome, observer).await;

            if let Some(error) = outcome.to_error() {
                return Err(error);
            }
            if index == 1 && self.config.warmup_policy == WarmupPolicy::ReportFirst {
                initial = outcome.duration_ms();
            }

            tokio::time::sleep(self.config.inter_trial_wait).await;
        }

        Ok(initial)
    }

    async fn record(
        &self,
        run_id: &str,
        phase: TrialPhase,
        index: u32,
        total: u32,
        outcome: &TrialOutcome,
        observer: &mut dyn TrialObserver,
    ) {
        observer.on_trial(&TrialEvent { phase, index, total, outcome });
        self.logger
            .debug(&format!("{} trial {}/{}", phase.as_str(), index, total))
            .trial(phase, index, outcome)
            .correlation_id(run_id)
            .log()
            .await;
    }

    async fn abort(&self, run_id: &str, error: AppError, observer: &mut dyn TrialObserver) -> BenchmarkReport {
        self.logger
            .warn(&format!("Benchmark aborted: {}", error))
            .correlation_id(run_id)
            .error_info(&error)
            .log()
            .await;
        observer.on_abort(&error);
        BenchmarkReport::aborted(error)
    }
}

//! Data models and structures for the latency probes

pub mod config;
pub mod metrics;

// Re-export main model types
pub use config::{BenchmarkConfig, WarmupPolicy};
pub use metrics::{TrialOutcome, TrialPhase, elapsed_ms};

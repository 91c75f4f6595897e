//! Database Latency Probe
//!
//! Repeats a network operation against a database host (a raw TCP connect,
//! a listener "ping" over a hand-built protocol frame, or a SQL statement),
//! times every attempt and reports summary statistics.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod executor;
pub mod logging;
pub mod models;
pub mod output;
pub mod probe;
pub mod sql;
pub mod stats;
pub mod types;

// Re-export commonly used types
pub use error::{AppError, Result};
pub use executor::{BenchmarkReport, BenchmarkRunner, ExecutionConfig};
pub use models::{BenchmarkConfig, TrialOutcome, WarmupPolicy};
pub use output::{ColoredFormatter, OutputFormatter, OutputFormatterFactory, PlainFormatter};
pub use probe::Probe;
pub use stats::StatSummary;

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Version string with the build metadata emitted by build.rs
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_COMMIT"),
    ", built ",
    env!("BUILD_TIME"),
    ", ",
    env!("TARGET_TRIPLE"),
    ")"
);

/// Default configuration values
pub mod defaults {
    use std::time::Duration;

    pub const DEFAULT_TARGET: &str = "localhost";
    pub const DEFAULT_TRIAL_COUNT: u32 = 10;
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);
    pub const DEFAULT_WAIT: Duration = Duration::from_millis(500);
    pub const DEFAULT_WARMUP_COUNT: u32 = 0;
    pub const DEFAULT_ENABLE_COLOR: bool = true;

    pub const DEFAULT_TCP_PORT: u16 = 80;
    pub const DEFAULT_LISTENER_PORT: u16 = 1521;
    pub const DEFAULT_SQL_PORT: u16 = 5432;

    /// Rows per fetch; 0 fetches the whole result set at once
    pub const DEFAULT_BATCH_SIZE: u32 = 0;
    pub const DEFAULT_QUERY: &str = "SELECT 1";

    pub const MAX_TRIAL_COUNT: u32 = 10_000;
    pub const MAX_TIMEOUT_SECS: f64 = 300.0;
    pub const MAX_WAIT_SECS: f64 = 3600.0;
    pub const MAX_WARMUP_COUNT: u32 = 1000;
}

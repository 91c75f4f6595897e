//! Probes: the operations timed by the benchmark loop
//!
//! Each probe performs exactly one attempt per call and reports it as a
//! [`TrialOutcome`]. Errors never escape an attempt; they are classified into
//! timeouts and failures at this boundary.

pub mod codec;
pub mod ping;
pub mod tcp;

pub use ping::{ListenerPingProbe, run_one_protocol_ping};
pub use tcp::{TcpConnectProbe, run_one_tcp_connect};

use crate::{
    error::{AppError, Result},
    models::TrialOutcome,
};
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;

/// An operation that can be attempted repeatedly and timed
#[async_trait]
pub trait Probe: Send {
    /// Short description for the run banner
    fn describe(&self) -> String;

    /// One-off setup before the first trial; an error aborts the run
    async fn prepare(&mut self) -> Result<()> {
        Ok(())
    }

    /// Perform and time a single attempt
    async fn attempt(&mut self) -> TrialOutcome;
}

/// Run one network operation under the per-operation timeout
///
/// An elapsed timer becomes [`AppError::Timeout`]; I/O errors are classified
/// by kind.
pub async fn with_timeout<T, E, F>(timeout: Duration, operation: &str, future: F) -> Result<T>
where
    F: Future<Output = std::result::Result<T, E>>,
    E: Into<AppError>,
{
    match tokio::time::timeout(timeout, future).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(error)) => Err(error.into()),
        Err(_) => Err(AppError::timeout(format!(
            "{} timed out after {}s",
            operation,
            timeout.as_secs_f64()
        ))),
    }
}

//! TCP connect timer

use super::{with_timeout, Probe};
use crate::models::{elapsed_ms, TrialOutcome};
use async_trait::async_trait;
use std::time::{Duration, Instant};
use tokio::net::TcpStream;

/// Time a single TCP connect to `target:port`
///
/// Only the connect call sits inside the timing boundary. The connection is
/// closed before returning.
pub async fn run_one_tcp_connect(target: &str, port: u16, timeout: Duration) -> TrialOutcome {
    let start = Instant::now();
    let result = with_timeout(timeout, "connect", TcpStream::connect((target, port))).await;
    let elapsed = start.elapsed();

    match result {
        Ok(stream) => {
            drop(stream);
            TrialOutcome::success(elapsed_ms(elapsed))
        }
        Err(error) => TrialOutcome::from_error(&error, timeout),
    }
}

/// Probe that opens and closes one TCP connection per attempt
#[derive(Debug, Clone)]
pub struct TcpConnectProbe {
    target: String,
    port: u16,
    timeout: Duration,
}

impl TcpConnectProbe {
    pub fn new<S: Into<String>>(target: S, port: u16, timeout: Duration) -> Self {
        Self {
            target: target.into(),
            port,
            timeout,
        }
    }
}

#[async_trait]
impl Probe for TcpConnectProbe {
    fn describe(&self) -> String {
        format!("TCP connect to {}:{}", self.target, self.port)
    }

    async fn attempt(&mut self) -> TrialOutcome {
        run_one_tcp_connect(&self.target, self.port, self.timeout).await
    }
}

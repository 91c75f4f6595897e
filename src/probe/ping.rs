//! Database listener ping over a raw socket

use super::{codec, with_timeout, Probe};
use crate::{
    error::{AppError, Result},
    models::{elapsed_ms, TrialOutcome},
};
use async_trait::async_trait;
use std::time::{Duration, Instant};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

const READ_CHUNK_SIZE: usize = 1024;

/// Send one ping request to the listener and time the full exchange
///
/// With `include_connection_setup` the timer starts before connecting,
/// otherwise right after the connection is established. It stops once the
/// peer has closed the stream. Every socket operation is bounded by
/// `timeout`, and the reply is validated only after the timer stops.
pub async fn run_one_protocol_ping(
    target: &str,
    port: u16,
    timeout: Duration,
    include_connection_setup: bool,
) -> TrialOutcome {
    match ping_exchange(target, port, timeout, include_connection_setup).await {
        Ok((elapsed, response)) => match codec::decode_ping_response(&response) {
            Ok(()) => TrialOutcome::success(elapsed_ms(elapsed)),
            Err(error) => TrialOutcome::from_error(&AppError::from(error), timeout),
        },
        Err(error) => TrialOutcome::from_error(&error, timeout),
    }
}

async fn ping_exchange(
    target: &str,
    port: u16,
    timeout: Duration,
    include_connection_setup: bool,
) -> Result<(Duration, Vec<u8>)> {
    let setup_start = Instant::now();
    let mut stream = with_timeout(timeout, "connect", TcpStream::connect((target, port))).await?;
    let start = if include_connection_setup {
        setup_start
    } else {
        Instant::now()
    };

    with_timeout(timeout, "send", stream.write_all(codec::encode_ping_request())).await?;

    let mut response = Vec::new();
    let mut chunk = [0u8; READ_CHUNK_SIZE];
    loop {
        let read = with_timeout(timeout, "receive", stream.read(&mut chunk)).await?;
        if read == 0 {
            break;
        }
        response.extend_from_slice(&chunk[..read]);
    }

    let elapsed = start.elapsed();
    drop(stream);
    Ok((elapsed, response))
}

/// Probe that pings the database listener once per attempt
#[derive(Debug, Clone)]
pub struct ListenerPingProbe {
    target: String,
    port: u16,
    timeout: Duration,
    include_connection_setup: bool,
}

impl ListenerPingProbe {
    pub fn new<S: Into<String>>(
        target: S,
        port: u16,
        timeout: Duration,
        include_connection_setup: bool,
    ) -> Self {
        Self {
            target: target.into(),
            port,
            timeout,
            include_connection_setup,
        }
    }
}

#[async_trait]
impl Probe for ListenerPingProbe {
    fn describe(&self) -> String {
        let scope = if self.include_connection_setup {
            "including connection setup"
        } else {
            "excluding connection setup"
        };
        format!("Listener ping to {}:{} ({})", self.target, self.port, scope)
    }

    async fn attempt(&mut self) -> TrialOutcome {
        run_one_protocol_ping(&self.target, self.port, self.timeout, self.include_connection_setup)
            .await
    }
}

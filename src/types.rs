//! Type definitions and aliases

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use crate::error::{AppError, Result};

/// The three probes shipped with the tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProbeKind {
    /// Plain TCP connect timer
    TcpConnect,
    /// Database listener ping over a raw socket
    ListenerPing,
    /// SQL statement execution timer
    SqlExecution,
}

impl ProbeKind {
    /// Get a human-readable name for this probe
    pub fn name(&self) -> &'static str {
        match self {
            ProbeKind::TcpConnect => "TCP connect",
            ProbeKind::ListenerPing => "Listener ping",
            ProbeKind::SqlExecution => "SQL execution",
        }
    }

    /// Subcommand that runs this probe
    pub fn command(&self) -> &'static str {
        match self {
            ProbeKind::TcpConnect => "tcp",
            ProbeKind::ListenerPing => "ping",
            ProbeKind::SqlExecution => "sql",
        }
    }

    /// Port used when none is configured
    pub fn default_port(&self) -> u16 {
        match self {
            ProbeKind::TcpConnect => crate::defaults::DEFAULT_TCP_PORT,
            ProbeKind::ListenerPing => crate::defaults::DEFAULT_LISTENER_PORT,
            ProbeKind::SqlExecution => crate::defaults::DEFAULT_SQL_PORT,
        }
    }
}

/// Trial execution status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrialStatus {
    /// Trial completed successfully
    Success,
    /// Trial failed due to a network, protocol or database error
    Failed,
    /// Trial exceeded the configured timeout
    Timeout,
}

impl TrialStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrialStatus::Success => "success",
            TrialStatus::Failed => "failed",
            TrialStatus::Timeout => "timeout",
        }
    }
}

//! Error handling for the latency probes

use thiserror::Error;

pub use crate::probe::codec::ProtocolError;

/// Custom error types for the latency probes
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport could not be established
    #[error("Connection error: {0}")]
    Connection(String),

    /// Timeout errors
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// Transport succeeded but the payload failed validation
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Errors surfaced by the database driver
    #[error("Database error: {0}")]
    Database(String),

    /// SQL file missing or unreadable
    #[error("File error: {0}")]
    File(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Parsing errors
    #[error("Parsing error: {0}")]
    Parse(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a new connection error
    pub fn connection<S: Into<String>>(message: S) -> Self {
        Self::Connection(message.into())
    }

    /// Create a new timeout error
    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout(message.into())
    }

    /// Create a new protocol error
    pub fn protocol<S: Into<String>>(message: S) -> Self {
        Self::Protocol(message.into())
    }

    /// Create a new database error
    pub fn database<S: Into<String>>(message: S) -> Self {
        Self::Database(message.into())
    }

    /// Create a new file error
    pub fn file<S: Into<String>>(message: S) -> Self {
        Self::File(message.into())
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io(message.into())
    }

    /// Create a new parsing error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse(message.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Get error category for logging and reporting
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG",
            Self::Connection(_) => "NETWORK",
            Self::Timeout(_) => "TIMEOUT",
            Self::Protocol(_) => "PROTOCOL",
            Self::Database(_) => "DATABASE",
            Self::File(_) => "FILE",
            Self::Validation(_) => "VALIDATION",
            Self::Io(_) => "IO",
            Self::Parse(_) => "PARSE",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Check if the error only affects a single trial
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Connection(_) | Self::Timeout(_) | Self::Protocol(_) | Self::Database(_) => true,
            Self::Config(_) | Self::Validation(_) | Self::Parse(_) | Self::File(_) => false,
            Self::Io(_) | Self::Internal(_) => false,
        }
    }

    /// Get exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Validation(_) | Self::Parse(_) => 1,
            Self::Connection(_) | Self::Timeout(_) | Self::Protocol(_) | Self::Database(_) => 2,
            Self::File(_) | Self::Io(_) => 5,
            Self::Internal(_) => 99,
        }
    }

    /// One-line detail used in per-attempt diagnostics: `[CATEGORY] message`
    pub fn trial_detail(&self) -> String {
        let message = match self {
            Self::Config(m) | Self::Connection(m) | Self::Timeout(m) | Self::Protocol(m)
            | Self::Database(m) | Self::File(m) | Self::Validation(m) | Self::Io(m)
            | Self::Parse(m) | Self::Internal(m) => m,
        };
        format!("[{}] {}", self.category(), message)
    }

    /// Format error for console display with color coding
    pub fn format_for_console(&self, use_color: bool) -> String {
        let category = self.category();
        let message = self.to_string();

        if use_color {
            use colored::Colorize;
            match self {
                Self::Config(_) | Self::Validation(_) | Self::Parse(_) => {
                    format!("[{}] {}", category.red().bold(), message.red())
                }
                Self::Connection(_) | Self::Database(_) => {
                    format!("[{}] {}", category.yellow().bold(), message.yellow())
                }
                Self::Timeout(_) => {
                    format!("[{}] {}", category.blue().bold(), message.blue())
                }
                Self::Protocol(_) => {
                    format!("[{}] {}", category.magenta().bold(), message.magenta())
                }
                Self::File(_) | Self::Io(_) => {
                    format!("[{}] {}", category.cyan().bold(), message.cyan())
                }
                Self::Internal(_) => {
                    format!("[{}] {}", category.bright_red().bold(), message.bright_red())
                }
            }
        } else {
            format!("[{}] {}", category, message)
        }
    }
}

// Standard library error conversions
impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::TimedOut => Self::timeout(error.to_string()),
            std::io::ErrorKind::ConnectionRefused
            | std::io::ErrorKind::ConnectionReset
            | std::io::ErrorKind::ConnectionAborted
            | std::io::ErrorKind::NotConnected
            | std::io::ErrorKind::AddrNotAvailable
            | std::io::ErrorKind::BrokenPipe => Self::connection(error.to_string()),
            _ => Self::io(error.to_string()),
        }
    }
}

impl From<ProtocolError> for AppError {
    fn from(error: ProtocolError) -> Self {
        Self::protocol(error.to_string())
    }
}

impl From<tokio_postgres::Error> for AppError {
    fn from(error: tokio_postgres::Error) -> Self {
        if error.as_db_error().is_some() {
            Self::database(error.to_string())
        } else if error.is_closed() {
            Self::connection(error.to_string())
        } else {
            Self::database(error.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::parse(format!("JSON error: {}", error))
    }
}

impl From<dotenv::Error> for AppError {
    fn from(error: dotenv::Error) -> Self {
        Self::config(format!("Environment file error: {}", error))
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(error: std::num::ParseIntError) -> Self {
        Self::parse(format!("Integer parse error: {}", error))
    }
}

impl From<std::num::ParseFloatError> for AppError {
    fn from(error: std::num::ParseFloatError) -> Self {
        Self::parse(format!("Float parse error: {}", error))
    }
}

impl From<std::str::ParseBoolError> for AppError {
    fn from(error: std::str::ParseBoolError) -> Self {
        Self::parse(format!("Boolean parse error: {}", error))
    }
}

// Anyhow integration
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::internal(error.to_string())
    }
}

/// Custom Result type for the application
pub type Result<T> = std::result::Result<T, AppError>;

/// Error context trait for adding context to errors
pub trait ErrorContext<T> {
    /// Add context to an error, keeping its category
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<AppError>,
{
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let context = f();
            match e.into() {
                AppError::Config(m) => AppError::Config(format!("{}: {}", context, m)),
                AppError::Connection(m) => AppError::Connection(format!("{}: {}", context, m)),
                AppError::Timeout(m) => AppError::Timeout(format!("{}: {}", context, m)),
                AppError::Protocol(m) => AppError::Protocol(format!("{}: {}", context, m)),
                AppError::Database(m) => AppError::Database(format!("{}: {}", context, m)),
                AppError::File(m) => AppError::File(format!("{}: {}", context, m)),
                AppError::Validation(m) => AppError::Validation(format!("{}: {}", context, m)),
                AppError::Io(m) => AppError::Io(format!("{}: {}", context, m)),
                AppError::Parse(m) => AppError::Parse(format!("{}: {}", context, m)),
                AppError::Internal(m) => AppError::Internal(format!("{}: {}", context, m)),
            }
        })
    }
}

//! Database connection parameters

use std::fmt;
use std::time::Duration;

/// Everything needed to open one database connection
#[derive(Clone, PartialEq)]
pub struct ConnectionDescriptor {
    pub host: String,
    pub port: u16,
    /// Service (database) name on the server
    pub service: String,
    pub user: String,
    pub password: String,
    /// Transport connect timeout
    pub timeout: Duration,
}

impl ConnectionDescriptor {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        service: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            service: service.into(),
            user: user.into(),
            password: password.into(),
            timeout,
        }
    }
}

// The password never appears in logs or error output
impl fmt::Display for ConnectionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/***@{}:{}/{}?connect_timeout={}",
            self.user,
            self.host,
            self.port,
            self.service,
            self.timeout.as_secs_f64()
        )
    }
}

impl fmt::Debug for ConnectionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionDescriptor")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("service", &self.service)
            .field("user", &self.user)
            .field("password", &"***")
            .field("timeout", &self.timeout)
            .finish()
    }
}

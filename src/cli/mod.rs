//! Command-line interface definitions

use crate::{models::WarmupPolicy, types::ProbeKind};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Database Latency Probe - time TCP connects, listener pings and SQL statements
#[derive(Parser, Debug, Clone)]
#[command(name = "dlp")]
#[command(version, long_version = crate::LONG_VERSION, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Enable debug output (JSON log records on stderr)
    #[arg(long, global = true)]
    pub debug: bool,

    /// Print the final summary as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Measure TCP connection setup time
    Tcp(TcpArgs),
    /// Measure database listener ping round trips
    Ping(PingArgs),
    /// Measure SQL statement execution time
    Sql(SqlArgs),
}

/// Options shared by every probe
///
/// Unset options fall back to `DLP_*` environment variables and then to the
/// compiled defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Number of measurements to take [default: 10]
    #[arg(short, long)]
    pub count: Option<u32>,

    /// Timeout for every network operation in seconds [default: 2]
    #[arg(short, long, value_parser = parse_seconds)]
    pub timeout: Option<f64>,

    /// Wait time between attempts in seconds [default: 0.5]
    #[arg(short, long, value_parser = parse_seconds)]
    pub wait: Option<f64>,

    /// Attempts executed before the measurement to warm up caches [default: 0]
    #[arg(long, visible_alias = "warmup-cache")]
    pub warmup: Option<u32>,

    /// What to do with warm-up attempts: discard, report-first
    #[arg(long, value_name = "MODE")]
    pub warmup_mode: Option<WarmupPolicy>,
}

#[derive(Args, Debug, Clone)]
pub struct TcpArgs {
    /// Target hostname or IP address
    pub host: String,

    /// Target port number [default: 80]
    #[arg(short, long)]
    pub port: Option<u16>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args, Debug, Clone)]
pub struct PingArgs {
    /// Target hostname or IP address
    pub host: String,

    /// Listener port number [default: 1521]
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Include the connection setup in the measurement
    #[arg(short, long = "include-conn-setup")]
    pub include_conn_setup: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args, Debug, Clone)]
pub struct SqlArgs {
    /// Database hostname or IP address
    pub db_host: String,

    /// Service (database) name
    pub db_service: String,

    /// Database user
    pub db_user: String,

    /// Port the database listens on [default: 5432]
    #[arg(short = 'p', long)]
    pub db_port: Option<u16>,

    /// SQL statement to execute [default: SELECT 1]
    #[arg(short, long)]
    pub query: Option<String>,

    /// File with `;`-separated SQL statements to execute
    #[arg(short, long, conflicts_with = "query")]
    pub file: Option<PathBuf>,

    /// Rows per fetch; 0 fetches the whole result set at once
    #[arg(short, long, default_value_t = crate::defaults::DEFAULT_BATCH_SIZE)]
    pub batch_size: u32,

    /// Defeat the statement cache by making every statement text unique
    #[arg(long)]
    pub hard_parse: bool,

    /// Reuse one connection and cursor for all attempts
    #[arg(short, long)]
    pub reuse_connection: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl Cli {
    /// Probe selected by the subcommand
    pub fn probe_kind(&self) -> ProbeKind {
        match self.command {
            Command::Tcp(_) => ProbeKind::TcpConnect,
            Command::Ping(_) => ProbeKind::ListenerPing,
            Command::Sql(_) => ProbeKind::SqlExecution,
        }
    }

    /// Options shared by every subcommand
    pub fn common(&self) -> &CommonArgs {
        match &self.command {
            Command::Tcp(args) => &args.common,
            Command::Ping(args) => &args.common,
            Command::Sql(args) => &args.common,
        }
    }

    /// Target host and the port given on the command line, if any
    pub fn endpoint(&self) -> (&str, Option<u16>) {
        match &self.command {
            Command::Tcp(args) => (&args.host, args.port),
            Command::Ping(args) => (&args.host, args.port),
            Command::Sql(args) => (&args.db_host, args.db_port),
        }
    }

    /// Whether the connection setup is part of the measured time
    pub fn include_connection_setup(&self) -> bool {
        matches!(&self.command, Command::Ping(args) if args.include_conn_setup)
    }

    /// Validate argument combinations clap cannot express
    pub fn validate(&self) -> Result<(), String> {
        if let Command::Sql(args) = &self.command {
            if let Some(query) = &args.query {
                if query.trim().is_empty() {
                    return Err("--query cannot be empty".to_string());
                }
            }
        }

        if self.json && self.verbose {
            return Err("Cannot specify both --json and --verbose".to_string());
        }

        Ok(())
    }
}

/// Parse a non-negative number of seconds
fn parse_seconds(s: &str) -> Result<f64, String> {
    let seconds: f64 = s.parse().map_err(|_| format!("Invalid number of seconds: {}", s))?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(format!("Invalid number of seconds: {}", s));
    }
    Ok(seconds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_tcp_parsing() {
        let cli = Cli::parse_from(["dlp", "tcp", "example.com", "-p", "443", "-c", "5", "-t", "1.5", "-w", "0"]);
        assert_eq!(cli.probe_kind(), ProbeKind::TcpConnect);
        assert_eq!(cli.endpoint(), ("example.com", Some(443)));
        assert_eq!(cli.common().count, Some(5));
        assert_eq!(cli.common().timeout, Some(1.5));
        assert_eq!(cli.common().wait, Some(0.0));
        assert!(!cli.include_connection_setup());
    }

    #[test]
    fn test_ping_parsing() {
        let cli = Cli::parse_from(["dlp", "ping", "db.local", "--include-conn-setup", "--no-color"]);
        assert_eq!(cli.probe_kind(), ProbeKind::ListenerPing);
        assert_eq!(cli.endpoint(), ("db.local", None));
        assert!(cli.include_connection_setup());
        assert!(cli.no_color);
        assert_eq!(cli.common().count, None);
    }

    #[test]
    fn test_sql_parsing() {
        let cli = Cli::parse_from([
            "dlp", "sql", "db.local", "orders", "scott",
            "-p", "6432", "-q", "SELECT * FROM orders", "-b", "100",
            "--hard-parse", "-r", "--warmup-cache", "3", "--warmup-mode", "report-first",
        ]);

        assert_eq!(cli.probe_kind(), ProbeKind::SqlExecution);
        let Command::Sql(args) = &cli.command else {
            panic!("expected sql subcommand");
        };
        assert_eq!(args.db_service, "orders");
        assert_eq!(args.db_user, "scott");
        assert_eq!(args.db_port, Some(6432));
        assert_eq!(args.query.as_deref(), Some("SELECT * FROM orders"));
        assert_eq!(args.batch_size, 100);
        assert!(args.hard_parse);
        assert!(args.reuse_connection);
        assert_eq!(args.common.warmup, Some(3));
        assert_eq!(args.common.warmup_mode, Some(WarmupPolicy::ReportFirst));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["dlp", "tcp", "host", "--json", "--debug"]);
        assert!(cli.json);
        assert!(cli.debug);
    }

    #[test]
    fn test_query_and_file_conflict() {
        let result = Cli::try_parse_from(["dlp", "sql", "h", "s", "u", "-q", "SELECT 1", "-f", "x.sql"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(Cli::try_parse_from(["dlp", "tcp", "h", "-t", "-1"]).is_err());
        assert!(Cli::try_parse_from(["dlp", "tcp", "h", "-w", "abc"]).is_err());
        assert!(Cli::try_parse_from(["dlp", "tcp", "h", "-p", "70000"]).is_err());
        assert!(Cli::try_parse_from(["dlp", "tcp", "h", "--warmup-mode", "sometimes"]).is_err());
        assert!(Cli::try_parse_from(["dlp", "tcp"]).is_err());
    }

    #[test]
    fn test_cli_validation() {
        let cli = Cli::parse_from(["dlp", "sql", "h", "s", "u", "-q", "  "]);
        assert!(cli.validate().unwrap_err().contains("--query cannot be empty"));

        let cli = Cli::parse_from(["dlp", "ping", "h", "--json", "--verbose"]);
        assert!(cli.validate().unwrap_err().contains("--json and --verbose"));

        let cli = Cli::parse_from(["dlp", "ping", "h", "--json"]);
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_parse_seconds() {
        assert_eq!(parse_seconds("2").unwrap(), 2.0);
        assert_eq!(parse_seconds("0.5").unwrap(), 0.5);
        assert!(parse_seconds("NaN").is_err());
        assert!(parse_seconds("inf").is_err());
        assert!(parse_seconds("-0.1").is_err());
    }
}

//! Main application orchestration and execution

use crate::{
    cli::{Cli, Command, SqlArgs},
    config::{display_config_summary, validate_config, ConfigParser, EnvManager},
    error::{AppError, Result},
    executor::{BenchmarkReport, BenchmarkRunner, ExecutionConfig},
    logging::{Logger, LoggerFactory},
    models::BenchmarkConfig,
    output::{ConsoleObserver, JsonReport, OutputFormatter, OutputFormatterFactory},
    probe::{ListenerPingProbe, Probe, TcpConnectProbe},
    sql::{
        parse_sql_file, ConnectionDescriptor, ConnectionMode, DatabaseClient, HardParse,
        PostgresClient, SqlProbe, SqlSettings,
    },
};
use std::sync::Arc;

/// Main application struct that coordinates all components
pub struct App {
    cli: Cli,
    config: BenchmarkConfig,
    logger: Logger,
}

impl App {
    /// Load configuration for `cli` and set up logging
    pub async fn new(cli: Cli) -> Result<Self> {
        cli.validate().map_err(AppError::config)?;
        let config = ConfigParser::new(cli.clone()).parse()?;

        let logger = LoggerFactory::new(config.clone()).create_logger(crate::PKG_NAME).await;
        logger
            .add_context_field("probe".to_string(), config.probe.command())
            .await;
        logger
            .info(&format!("Configuration:\n{}", display_config_summary(&config)))
            .log()
            .await;
        logger
            .debug("Configuration loaded")
            .field("version", crate::LONG_VERSION)
            .field("config", &config)
            .log()
            .await;
        for warning in EnvManager::validate_current_env() {
            logger.warn(&warning).log().await;
        }

        Ok(Self::from_parts(cli, config, logger))
    }

    /// Assemble an application from already-built pieces
    pub fn from_parts(cli: Cli, config: BenchmarkConfig, logger: Logger) -> Self {
        Self { cli, config, logger }
    }

    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// Build the probe selected on the command line
    ///
    /// The SQL probe reads its script and asks for the database password
    /// here, so this is the only step that may block on the terminal.
    pub async fn build_probe(&self, database: Arc<dyn DatabaseClient>) -> Result<Box<dyn Probe>> {
        let config = &self.config;
        let probe: Box<dyn Probe> = match &self.cli.command {
            Command::Tcp(_) => Box::new(TcpConnectProbe::new(
                config.target.clone(),
                config.port,
                config.timeout(),
            )),
            Command::Ping(_) => Box::new(ListenerPingProbe::new(
                config.target.clone(),
                config.port,
                config.timeout(),
                config.include_connection_setup_in_timing,
            )),
            Command::Sql(args) => {
                let settings = sql_settings(args).await?;
                let password = EnvManager::db_password()?;
                let descriptor = sql_descriptor(config, args, password);
                Box::new(SqlProbe::new(database, descriptor, settings)?)
            }
        };
        Ok(probe)
    }

    /// Run the benchmark and print the report; returns the process exit code
    pub async fn run(self) -> Result<i32> {
        let mut probe = self.build_probe(Arc::new(PostgresClient::new())).await?;
        let report = self.run_probe(probe.as_mut()).await?;
        Ok(report.exit_code())
    }

    /// Run the benchmark against an already-built probe and print the report
    pub async fn run_probe(&self, probe: &mut dyn Probe) -> Result<BenchmarkReport> {
        let formatter = self.formatter();

        for warning in validate_config(&self.config)? {
            let line = formatter.format_warning(&warning.message)?;
            eprintln!("{}", line);
        }

        if !self.cli.json {
            println!("{}", formatter.format_banner(&probe.describe(), &self.config)?);
        }

        let mut observer = if self.cli.json {
            ConsoleObserver::quiet(formatter)
        } else {
            ConsoleObserver::new(formatter)
        };

        let runner = BenchmarkRunner::new(ExecutionConfig::from(&self.config), self.logger.clone());
        let report = runner.run(probe, &mut observer).await;

        if self.cli.json {
            let document = JsonReport::new(
                self.config.probe.command(),
                &self.config.target,
                self.config.port,
                &report,
            );
            println!("{}", document.render()?);
        } else {
            let formatter = observer.formatter();
            if let Some(duration_ms) = report.initial_execution_ms {
                println!("{}", formatter.format_initial_execution(duration_ms)?);
            }
            println!();
            println!("{}", formatter.format_summary(&report.summary)?);
        }

        Ok(report)
    }

    fn formatter(&self) -> Box<dyn OutputFormatter> {
        OutputFormatterFactory::create_formatter(OutputFormatterFactory::color_enabled(
            self.config.enable_color,
        ))
    }
}

/// Statements and fetch options for the `sql` subcommand
pub async fn sql_settings(args: &SqlArgs) -> Result<SqlSettings> {
    let queries = match (&args.file, &args.query) {
        (Some(path), _) => parse_sql_file(path).await?,
        (None, Some(query)) => vec![query.clone()],
        (None, None) => vec![crate::defaults::DEFAULT_QUERY.to_string()],
    };
    if queries.is_empty() {
        return Err(AppError::validation("No SQL statements to execute"));
    }

    let mut settings = SqlSettings::new(queries);
    settings.batch_size = args.batch_size;
    settings.hard_parse = args.hard_parse.then(HardParse::new);
    settings.mode = if args.reuse_connection {
        ConnectionMode::Reuse
    } else {
        ConnectionMode::Fresh
    };
    Ok(settings)
}

/// Connection parameters for the `sql` subcommand
pub fn sql_descriptor(config: &BenchmarkConfig, args: &SqlArgs, password: String) -> ConnectionDescriptor {
    ConnectionDescriptor::new(
        config.target.clone(),
        config.port,
        args.db_service.clone(),
        args.db_user.clone(),
        password,
        config.timeout(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProbeKind;
    use clap::Parser;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sql_args(extra: &[&str]) -> SqlArgs {
        let mut argv = vec!["dlp", "sql", "db.local", "orders", "scott"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Command::Sql(args) => args,
            other => panic!("expected sql subcommand, got {:?}", other),
        }
    }

    fn app(argv: &[&str]) -> App {
        let cli = Cli::parse_from(argv);
        let parser = ConfigParser::new(cli.clone());
        let mut config = BenchmarkConfig::for_probe(cli.probe_kind());
        parser.apply_cli_overrides(&mut config);
        App::from_parts(cli, config, Logger::quiet("test".to_string()))
    }

    #[tokio::test]
    async fn test_sql_settings_default_query() {
        let settings = sql_settings(&sql_args(&[])).await.unwrap();
        assert_eq!(settings.queries, vec!["SELECT 1"]);
        assert_eq!(settings.batch_size, 0);
        assert!(settings.hard_parse.is_none());
        assert_eq!(settings.mode, ConnectionMode::Fresh);
    }

    #[tokio::test]
    async fn test_sql_settings_flags() {
        let settings = sql_settings(&sql_args(&["-q", "SELECT 2", "-b", "50", "--hard-parse", "-r"])).await.unwrap();
        assert_eq!(settings.queries, vec!["SELECT 2"]);
        assert_eq!(settings.batch_size, 50);
        assert!(settings.hard_parse.is_some());
        assert_eq!(settings.mode, ConnectionMode::Reuse);
    }

    #[tokio::test]
    async fn test_sql_settings_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "SELECT 1; SELECT 2;").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let settings = sql_settings(&sql_args(&["-f", &path])).await.unwrap();
        assert_eq!(settings.queries, vec!["SELECT 1", "SELECT 2"]);
    }

    #[tokio::test]
    async fn test_sql_settings_empty_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, " ; ").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let error = sql_settings(&sql_args(&["-f", &path])).await.unwrap_err();
        assert_eq!(error.category(), "VALIDATION");
    }

    #[test]
    fn test_sql_descriptor() {
        let args = sql_args(&["-p", "6432", "-t", "3"]);
        let mut config = BenchmarkConfig::for_probe(ProbeKind::SqlExecution);
        config.target = "db.local".to_string();
        config.port = 6432;
        config.timeout_seconds = 3.0;

        let descriptor = sql_descriptor(&config, &args, "tiger".to_string());
        assert_eq!(descriptor.to_string(), "scott/***@db.local:6432/orders?connect_timeout=3");
        assert_eq!(descriptor.password, "tiger");
    }

    #[tokio::test]
    async fn test_build_network_probes() {
        let database: Arc<dyn DatabaseClient> = Arc::new(PostgresClient::new());

        let probe = app(&["dlp", "tcp", "example.com", "-p", "443"]).build_probe(database.clone()).await.unwrap();
        assert_eq!(probe.describe(), "TCP connect to example.com:443");

        let probe = app(&["dlp", "ping", "db.local", "-i"]).build_probe(database).await.unwrap();
        assert!(probe.describe().contains("db.local:1521"));
        assert!(probe.describe().contains("including connection setup"));
    }

    #[tokio::test]
    async fn test_run_probe_against_loopback() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port().to_string();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                drop(stream);
            }
        });

        let app = app(&["dlp", "tcp", "127.0.0.1", "-p", &port, "-c", "3", "-w", "0", "--json"]);
        let mut probe = app.build_probe(Arc::new(PostgresClient::new())).await.unwrap();
        let report = app.run_probe(probe.as_mut()).await.unwrap();

        assert_eq!(report.summary.successful_count, 3);
        assert_eq!(report.exit_code(), 0);
    }
}

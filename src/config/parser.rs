//! Configuration parsing from CLI arguments and environment variables

use crate::{
    cli::{Cli, CommonArgs},
    config::env::EnvManager,
    error::Result,
    models::BenchmarkConfig,
};

/// Configuration parser that combines CLI arguments with environment variables
pub struct ConfigParser {
    cli: Cli,
}

impl ConfigParser {
    /// Create a new configuration parser with CLI arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Parse and build the complete configuration
    ///
    /// Precedence, lowest first: compiled defaults, `.env`, `DLP_*`
    /// environment variables, command-line flags.
    pub fn parse(&self) -> Result<BenchmarkConfig> {
        EnvManager::load_env_file()?;
        self.parse_without_env_file()
    }

    /// Same as [`parse`](Self::parse) but ignores any `.env` file
    pub fn parse_without_env_file(&self) -> Result<BenchmarkConfig> {
        let mut config = BenchmarkConfig::for_probe(self.cli.probe_kind());
        config.merge_from_env()?;
        self.apply_cli_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Apply CLI argument overrides to configuration
    pub fn apply_cli_overrides(&self, config: &mut BenchmarkConfig) {
        let (host, port) = self.cli.endpoint();
        config.target = host.to_string();
        if let Some(port) = port {
            config.port = port;
        }

        apply_common_args(self.cli.common(), config);

        config.include_connection_setup_in_timing = self.cli.include_connection_setup();

        if self.cli.no_color {
            config.enable_color = false;
        }

        // CLI-only flags
        config.verbose = self.cli.verbose;
        config.debug = self.cli.debug;
    }
}

fn apply_common_args(args: &CommonArgs, config: &mut BenchmarkConfig) {
    if let Some(count) = args.count {
        config.trial_count = count;
    }
    if let Some(timeout) = args.timeout {
        config.timeout_seconds = timeout;
    }
    if let Some(wait) = args.wait {
        config.wait_seconds = wait;
    }
    if let Some(warmup) = args.warmup {
        config.warmup_count = warmup;
    }
    if let Some(policy) = args.warmup_mode {
        config.warmup_policy = policy;
    }
}

/// Human-readable configuration summary, logged in verbose mode
pub fn display_config_summary(config: &BenchmarkConfig) -> String {
    let mut summary = Vec::new();

    summary.push(format!("Probe: {}", config.probe.name()));
    summary.push(format!("Target: {}", config.endpoint()));
    summary.push(format!("Count: {}", config.trial_count));
    summary.push(format!("Timeout: {}s", config.timeout_seconds));
    summary.push(format!("Wait: {}s", config.wait_seconds));
    summary.push(format!("Warm-up: {} ({:?})", config.warmup_count, config.warmup_policy));
    summary.push(format!(
        "Include connection setup: {}",
        config.include_connection_setup_in_timing
    ));
    summary.push(format!("Color Output: {}", config.enable_color));

    summary.join("\n")
}

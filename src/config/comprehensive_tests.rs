//! Additional comprehensive tests for configuration layering and validation

use super::{ConfigParser, EnvManager};
use crate::{cli::Cli, models::BenchmarkConfig, types::ProbeKind};
use clap::Parser;
use std::env;
use std::sync::Mutex;

/// Serialises tests that touch the process environment
static ENV_LOCK: Mutex<()> = Mutex::new(());

const LAYERED_VARS: &[&str] = &[
    "DLP_COUNT",
    "DLP_TIMEOUT_SECONDS",
    "DLP_WAIT_SECONDS",
    "DLP_WARMUP",
    "DLP_ENABLE_COLOR",
];

fn clear_env() {
    for var in LAYERED_VARS {
        env::remove_var(var);
    }
}

/// Test edge cases in configuration validation
mod config_edge_cases {
    use super::*;

    #[test]
    fn test_config_boundaries() {
        let mut config = BenchmarkConfig::default();
        config.trial_count = crate::defaults::MAX_TRIAL_COUNT;
        config.timeout_seconds = crate::defaults::MAX_TIMEOUT_SECS;
        config.wait_seconds = crate::defaults::MAX_WAIT_SECS;
        config.warmup_count = crate::defaults::MAX_WARMUP_COUNT;
        assert!(config.validate().is_ok());

        config.trial_count += 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_wait_is_valid() {
        let config = BenchmarkConfig {
            wait_seconds: 0.0,
            ..BenchmarkConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_non_finite_values_rejected() {
        let config = BenchmarkConfig {
            timeout_seconds: f64::NAN,
            ..BenchmarkConfig::default()
        };
        assert!(config.validate().is_err());

        let config = BenchmarkConfig {
            wait_seconds: f64::INFINITY,
            ..BenchmarkConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_whitespace_target_rejected() {
        let config = BenchmarkConfig {
            target: "   ".to_string(),
            ..BenchmarkConfig::default()
        };
        assert!(config.validate().unwrap_err().to_string().contains("Target host"));
    }
}

/// Test precedence between environment and command line
mod layering_tests {
    use super::*;

    #[test]
    fn test_env_overrides_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        env::set_var("DLP_COUNT", "7");
        env::set_var("DLP_WAIT_SECONDS", "0");
        env::set_var("DLP_ENABLE_COLOR", "false");

        let cli = Cli::parse_from(["dlp", "tcp", "example.com"]);
        let config = ConfigParser::new(cli).parse_without_env_file().unwrap();

        assert_eq!(config.probe, ProbeKind::TcpConnect);
        assert_eq!(config.trial_count, 7);
        assert_eq!(config.wait_seconds, 0.0);
        assert!(!config.enable_color);
        clear_env();
    }

    #[test]
    fn test_cli_overrides_env() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        env::set_var("DLP_COUNT", "7");
        env::set_var("DLP_TIMEOUT_SECONDS", "9");

        let cli = Cli::parse_from(["dlp", "ping", "db", "-c", "3"]);
        let config = ConfigParser::new(cli).parse_without_env_file().unwrap();

        assert_eq!(config.trial_count, 3);
        assert_eq!(config.timeout_seconds, 9.0);
        clear_env();
    }

    #[test]
    fn test_invalid_env_value_is_config_error() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        env::set_var("DLP_TIMEOUT_SECONDS", "soon");

        let cli = Cli::parse_from(["dlp", "ping", "db"]);
        let error = ConfigParser::new(cli).parse_without_env_file().unwrap_err();

        assert_eq!(error.category(), "CONFIG");
        assert!(error.to_string().contains("DLP_TIMEOUT_SECONDS"));
        clear_env();
    }

    #[test]
    fn test_out_of_range_cli_value_fails_validation() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        let cli = Cli::parse_from(["dlp", "tcp", "example.com", "-c", "0"]);
        let error = ConfigParser::new(cli).parse_without_env_file().unwrap_err();
        assert_eq!(error.exit_code(), 1);
    }

    #[test]
    fn test_validate_current_env_reports_bad_values() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        assert!(EnvManager::validate_current_env().is_empty());

        env::set_var("DLP_COUNT", "0");
        let warnings = EnvManager::validate_current_env();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("Warning:"));
        clear_env();
    }
}

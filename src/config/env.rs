//! Environment variable handling and .env file management

use crate::error::{AppError, Result};
use std::path::Path;

/// Variable holding the database password for the `sql` probe
pub const PASSWORD_VAR: &str = "DLP_DB_PASSWORD";

/// Environment variable configuration manager
pub struct EnvManager;

impl EnvManager {
    /// Load `.env` from the working directory if it exists
    ///
    /// Returns whether a file was loaded. Variables already set in the
    /// process environment take precedence over the file.
    pub fn load_env_file() -> Result<bool> {
        Self::load_env_file_from(Path::new(".env"))
    }

    /// Load a specific env file if it exists
    pub fn load_env_file_from(path: &Path) -> Result<bool> {
        if !path.exists() {
            return Ok(false);
        }

        dotenv::from_path(path).map_err(|e| {
            AppError::config(format!("Failed to load {}: {}", path.display(), e))
        })?;
        Ok(true)
    }

    /// Database password from `DLP_DB_PASSWORD`, prompting when it is unset
    pub fn db_password() -> Result<String> {
        match std::env::var(PASSWORD_VAR) {
            Ok(password) => Ok(password),
            Err(_) => Self::prompt_password(),
        }
    }

    /// Ask for the password without echoing it
    pub fn prompt_password() -> Result<String> {
        dialoguer::Password::new()
            .with_prompt("Enter password")
            .allow_empty_password(true)
            .interact()
            .map_err(|e| AppError::config(format!("Failed to read password: {}", e)))
    }

    /// Validate environment variable format before parsing
    pub fn validate_env_var(key: &str, value: &str) -> Result<()> {
        match key {
            "DLP_COUNT" => {
                let count: u32 = value.parse()
                    .map_err(|e| AppError::config(format!("Invalid DLP_COUNT value '{}': {}", value, e)))?;
                if count == 0 || count > crate::defaults::MAX_TRIAL_COUNT {
                    return Err(AppError::config(format!(
                        "DLP_COUNT must be between 1 and {}, got: {}",
                        crate::defaults::MAX_TRIAL_COUNT,
                        count
                    )));
                }
            }
            "DLP_TIMEOUT_SECONDS" => {
                let timeout: f64 = value.parse()
                    .map_err(|e| AppError::config(format!("Invalid DLP_TIMEOUT_SECONDS value '{}': {}", value, e)))?;
                if !(timeout > 0.0 && timeout <= crate::defaults::MAX_TIMEOUT_SECS) {
                    return Err(AppError::config(format!(
                        "DLP_TIMEOUT_SECONDS must be in (0, {}], got: {}",
                        crate::defaults::MAX_TIMEOUT_SECS,
                        value
                    )));
                }
            }
            "DLP_WAIT_SECONDS" => {
                let wait: f64 = value.parse()
                    .map_err(|e| AppError::config(format!("Invalid DLP_WAIT_SECONDS value '{}': {}", value, e)))?;
                if !(0.0..=crate::defaults::MAX_WAIT_SECS).contains(&wait) {
                    return Err(AppError::config(format!(
                        "DLP_WAIT_SECONDS must be between 0 and {}, got: {}",
                        crate::defaults::MAX_WAIT_SECS,
                        value
                    )));
                }
            }
            "DLP_WARMUP" => {
                value.parse::<u32>()
                    .map_err(|e| AppError::config(format!("Invalid DLP_WARMUP value '{}': {}", value, e)))?;
            }
            "DLP_ENABLE_COLOR" => {
                value.parse::<bool>()
                    .map_err(|e| AppError::config(format!("Invalid DLP_ENABLE_COLOR value '{}': {}", value, e)))?;
            }
            _ => {
                // Unknown or free-form variable
            }
        }

        Ok(())
    }

    /// Get list of all supported environment variables with descriptions
    pub fn get_supported_env_vars() -> Vec<(&'static str, &'static str, &'static str)> {
        vec![
            ("DLP_COUNT", "Number of measurements to take", "10"),
            ("DLP_TIMEOUT_SECONDS", "Timeout for every network operation", "2"),
            ("DLP_WAIT_SECONDS", "Wait time between attempts", "0.5"),
            ("DLP_WARMUP", "Warm-up attempts before measuring", "0"),
            ("DLP_ENABLE_COLOR", "Enable colored output", "true"),
            (PASSWORD_VAR, "Database password for the sql probe", "tiger"),
        ]
    }

    /// Display environment variable help
    pub fn display_env_help() -> String {
        let mut help = String::new();
        help.push_str("Supported Environment Variables:\n\n");

        for (var, description, example) in Self::get_supported_env_vars() {
            help.push_str(&format!("  {:<20} {}\n", var, description));
            help.push_str(&format!("  {:<20} Example: {}\n\n", "", example));
        }

        help.push_str("Configuration Priority (highest to lowest):\n");
        help.push_str("  1. Command-line arguments\n");
        help.push_str("  2. Environment variables\n");
        help.push_str("  3. .env file values\n");
        help.push_str("  4. Default values\n");

        help
    }

    /// Validate all currently set environment variables
    pub fn validate_current_env() -> Vec<String> {
        Self::get_supported_env_vars()
            .into_iter()
            .filter_map(|(name, _, _)| {
                let value = std::env::var(name).ok()?;
                Self::validate_env_var(name, &value).err()
            })
            .map(|e| format!("Warning: {}", e))
            .collect()
    }
}

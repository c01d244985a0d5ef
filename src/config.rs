//! Configuration management for the agency phone sync.
//!
//! This module handles loading and validating configuration from environment variables.
//! A `.env` file in the working directory is honored if present.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::time::Duration;

/// Configuration for the agency phone sync.
#[derive(Debug, Clone)]
pub struct Config {
    /// Agency API base URL
    pub api_base_url: String,

    /// Agency identifier used in every API path
    pub agency_id: String,

    /// API user for HTTP Basic authentication
    pub api_user: String,

    /// API password for HTTP Basic authentication
    pub api_password: String,

    /// HTTP request timeout in seconds (default: 30)
    pub request_timeout: u64,

    /// Number of client records fetched concurrently (default: 10)
    pub batch_size: usize,

    /// Pause between batches in milliseconds (default: 100)
    pub batch_delay_ms: u64,

    /// Log level (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `AGENCY_API_BASE_URL`: Base URL for the agency API
    /// - `AGENCY_ID`: Agency identifier
    /// - `AGENCY_API_USER`: API user name
    /// - `AGENCY_API_PASSWORD`: API password
    ///
    /// Optional environment variables:
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 30)
    /// - `FETCH_BATCH_SIZE`: Concurrent fetches per batch (default: 10)
    /// - `FETCH_BATCH_DELAY_MS`: Pause between batches (default: 100)
    /// - `LOG_LEVEL`: Logging level (default: "info")
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();

        let api_base_url = Self::required("AGENCY_API_BASE_URL")?;
        let agency_id = Self::required("AGENCY_ID")?;
        let api_user = Self::required("AGENCY_API_USER")?;
        let api_password = Self::required("AGENCY_API_PASSWORD")?;

        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "AGENCY_API_BASE_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 30)?;
        let batch_size = Self::parse_env_usize("FETCH_BATCH_SIZE", 10)?;
        let batch_delay_ms = Self::parse_env_u64("FETCH_BATCH_DELAY_MS", 100)?;

        if batch_size == 0 {
            return Err(ConfigError::InvalidValue {
                var: "FETCH_BATCH_SIZE".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            api_base_url,
            agency_id,
            api_user,
            api_password,
            request_timeout,
            batch_size,
            batch_delay_ms,
            log_level,
        })
    }

    /// Per-request timeout as a `Duration`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Inter-batch pause as a `Duration`.
    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }

    /// Read a required, non-blank environment variable.
    fn required(var_name: &str) -> ConfigResult<String> {
        let value =
            env::var(var_name).map_err(|_| ConfigError::MissingVar(var_name.to_string()))?;

        if value.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        Ok(value)
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as usize with a default value.
    fn parse_env_usize(var_name: &str, default: usize) -> ConfigResult<usize> {
        match env::var(var_name) {
            Ok(val) => val.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: String::new(),
            agency_id: String::new(),
            api_user: String::new(),
            api_password: String::new(),
            request_timeout: 30,
            batch_size: 10,
            batch_delay_ms: 100,
            log_level: "info".to_string(),
        }
    }
}

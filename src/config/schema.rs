//! Configuration schema types
//!
//! This module defines the configuration structure for cloud-dump.

use crate::config::SecretString;
use crate::domain::ids::{AccountId, DatabaseId};
use crate::domain::job::JobRequest;
use serde::{Deserialize, Serialize};

/// Main cloud-dump configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DumpConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Dump API connection settings
    pub api: ApiConfig,

    /// What to dump and where to write it
    #[serde(default)]
    pub dump: DumpJobConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl DumpConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.api.validate()?;
        self.dump.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Builds the immutable job request from the API and dump sections
    ///
    /// # Errors
    ///
    /// Returns an error if the account or database identifier is missing or
    /// malformed, or if the scoping toggles conflict.
    pub fn job_request(&self) -> Result<JobRequest, String> {
        let account_id = AccountId::new(self.api.account_id.clone())?;
        let database_id = match self.dump.database_id.as_deref() {
            Some(id) => DatabaseId::new(id)?,
            None => return Err("dump.database_id is required to start an export".to_string()),
        };

        let mut request =
            JobRequest::new(account_id, database_id).with_tables(self.dump.tables.clone());
        if self.dump.no_schema {
            request = request.without_schema();
        }
        if self.dump.no_data {
            request = request.without_data();
        }
        request.validate()?;
        Ok(request)
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Dump API connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the dump API (e.g. `https://api.example.com/v1`)
    pub base_url: String,

    /// Account the dump jobs run under
    pub account_id: String,

    /// Bearer token sent with job status requests (optional)
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub api_token: Option<SecretString>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// TLS certificate verification enabled
    ///
    /// Only disable this against a local development server.
    #[serde(default = "default_true")]
    pub tls_verify: bool,
}

impl ApiConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.base_url.is_empty() {
            return Err("api.base_url cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("api.base_url must start with http:// or https://".to_string());
        }

        url::Url::parse(&self.base_url)
            .map_err(|e| format!("api.base_url is not a valid URL: {e}"))?;

        AccountId::new(self.account_id.clone()).map_err(|e| format!("api.account_id: {e}"))?;

        if let Some(token) = &self.api_token {
            if token.expose_secret().is_empty() {
                return Err("api.api_token cannot be empty when set".to_string());
            }
        }

        if self.timeout_seconds == 0 {
            return Err("api.timeout_seconds must be > 0".to_string());
        }

        Ok(())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/v1".to_string(),
            account_id: String::new(),
            api_token: None,
            timeout_seconds: default_timeout_seconds(),
            tls_verify: true,
        }
    }
}

/// Dump job configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DumpJobConfig {
    /// Database to dump (may also be given on the command line)
    #[serde(default)]
    pub database_id: Option<String>,

    /// Tables to include (empty = all)
    #[serde(default)]
    pub tables: Vec<String>,

    /// Dump rows only
    #[serde(default)]
    pub no_schema: bool,

    /// Dump table definitions only
    #[serde(default)]
    pub no_data: bool,

    /// Where the downloaded dump is written
    #[serde(default)]
    pub output_path: Option<String>,

    /// Delay between consecutive polls in milliseconds.
    ///
    /// Defaults to 0: the server paces the job, and the next poll is issued as
    /// soon as the previous response has been processed.
    #[serde(default)]
    pub poll_interval_ms: u64,
}

impl DumpJobConfig {
    fn validate(&self) -> Result<(), String> {
        if self.no_schema && self.no_data {
            return Err("dump.no_schema and dump.no_data cannot both be true".to_string());
        }

        if let Some(id) = &self.database_id {
            DatabaseId::new(id.clone()).map_err(|e| format!("dump.database_id: {e}"))?;
        }

        if self.tables.iter().any(|t| t.trim().is_empty()) {
            return Err("dump.tables cannot contain empty names".to_string());
        }

        if let Some(path) = &self.output_path {
            if path.trim().is_empty() {
                return Err("dump.output_path cannot be empty when set".to_string());
            }
        }

        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_local_path() -> String {
    "/var/log/cloud-dump".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

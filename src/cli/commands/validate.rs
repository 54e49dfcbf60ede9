//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the cloud-dump configuration file.

use crate::cli::{EXIT_CONFIG_ERROR, EXIT_SUCCESS};
use crate::config::{load_config, DumpConfig};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("Configuration is invalid");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        println!("Configuration is valid");
        println!();
        println!("Configuration Summary:");
        for line in summary_lines(&config) {
            println!("  {line}");
        }
        println!();

        if let Err(e) = config.job_request() {
            println!("Note: {e}; pass --database to `cloud-dump export`");
        }

        Ok(EXIT_SUCCESS)
    }
}

fn summary_lines(config: &DumpConfig) -> Vec<String> {
    let dump = &config.dump;
    let scope = match (dump.no_schema, dump.no_data) {
        (true, _) => "data only",
        (_, true) => "schema only",
        _ => "schema and data",
    };

    vec![
        format!("Log Level: {}", config.application.log_level),
        format!("API: {}", config.api.base_url),
        format!("Account: {}", config.api.account_id),
        format!(
            "API Token: {}",
            if config.api.api_token.is_some() {
                "configured"
            } else {
                "none"
            }
        ),
        format!(
            "Database: {}",
            dump.database_id.as_deref().unwrap_or("(not set)")
        ),
        format!(
            "Tables: {}",
            if dump.tables.is_empty() {
                "all".to_string()
            } else {
                dump.tables.join(", ")
            }
        ),
        format!("Contents: {scope}"),
        format!(
            "Output: {}",
            dump.output_path.as_deref().unwrap_or("(not set)")
        ),
        format!("Poll Interval: {}ms", dump.poll_interval_ms),
    ]
}

//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use crate::cli::{EXIT_CONFIG_ERROR, EXIT_FATAL, EXIT_SUCCESS};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "cloud-dump.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG_ERROR);
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your account and database", self.output);
                println!("  2. Put CLOUD_DUMP_API_TOKEN in the environment or a .env file");
                println!("  3. Validate configuration: cloud-dump validate-config");
                println!("  4. Run export: cloud-dump export");
                println!();
                Ok(EXIT_SUCCESS)
            }
            Err(e) => {
                println!("Failed to write configuration file");
                println!("   Error: {e}");
                Ok(EXIT_FATAL)
            }
        }
    }

    /// Sample configuration with comments
    fn generate_config() -> String {
        r#"# cloud-dump configuration

[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

[api]
# Base URL of the dump API
base_url = "https://api.example.com/v1"
account_id = "acct_123"

# Bearer token for job status requests (optional)
api_token = "${CLOUD_DUMP_API_TOKEN}"

# Per-request timeout in seconds
timeout_seconds = 60
tls_verify = true

[dump]
database_id = "db_456"

# Tables to include; empty means all tables
tables = []

# Set at most one of these
no_schema = false
no_data = false

# Where the downloaded dump is written (overwritten if present)
output_path = "dump.sql"

# Delay between polls in milliseconds; 0 polls again immediately
poll_interval_ms = 0

[logging]
# JSON log files in addition to console output
local_enabled = false
local_path = "/var/log/cloud-dump"
# daily | hourly | never
local_rotation = "daily"
"#
        .to_string()
    }
}

//! Configuration management for cloud-dump.
//!
//! cloud-dump reads a TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `CLOUD_DUMP_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`ApiConfig`] - Dump API endpoint, account and token
//! - [`DumpJobConfig`] - Database, table scoping, output path, poll interval
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [api]
//! base_url = "https://api.example.com/v1"
//! account_id = "acct_123"
//! api_token = "${CLOUD_DUMP_API_TOKEN}"
//!
//! [dump]
//! database_id = "db_456"
//! tables = ["users"]
//! no_schema = false
//! output_path = "dump.sql"
//! ```
//!
//! # Validation
//!
//! ```rust,no_run
//! use cloud_dump::config::load_config;
//!
//! match load_config("cloud-dump.toml") {
//!     Ok(config) => println!("Dumping from {}", config.api.base_url),
//!     Err(e) => eprintln!("Configuration error: {e}"),
//! }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, parse_config, split_list};
pub use schema::{ApiConfig, ApplicationConfig, DumpConfig, DumpJobConfig, LoggingConfig};
pub use secret::{secret_string, SecretString, SecretValue};

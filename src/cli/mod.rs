//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for cloud-dump using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Exit code for a successful run
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for configuration and validation errors
pub const EXIT_CONFIG_ERROR: i32 = 2;

/// Exit code for transport errors talking to the dump API
pub const EXIT_CONNECTION_ERROR: i32 = 4;

/// Exit code for a failed job, a failed download, or any other fatal error
pub const EXIT_FATAL: i32 = 5;

/// Exit code after SIGINT/SIGTERM
pub const EXIT_INTERRUPTED: i32 = 130;

/// cloud-dump - Export a managed database as a downloadable dump
#[derive(Parser, Debug)]
#[command(name = "cloud-dump")]
#[command(version, about, long_about = None)]
#[command(author = "Cloud Dump Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "cloud-dump.toml", env = "CLOUD_DUMP_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "CLOUD_DUMP_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a dump job and download the resulting artifact
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

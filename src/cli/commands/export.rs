//! Export command implementation
//!
//! This module implements the `export` command: drive a dump job to
//! completion, then download the artifact it produced.

use crate::adapters::dump_api::DumpApiClient;
use crate::cli::{
    EXIT_CONFIG_ERROR, EXIT_CONNECTION_ERROR, EXIT_FATAL, EXIT_INTERRUPTED, EXIT_SUCCESS,
};
use crate::config::{load_config, split_list, DumpConfig};
use crate::core::artifact::{ArtifactRetriever, SIGNED_URL_VALIDITY};
use crate::core::export::{ExportSummary, JobDriver, ProgressEvent, ProgressSink};
use crate::domain::errors::{ArtifactError, JobError};
use crate::log_error_with_context;
use chrono::{DateTime, Utc};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Override the database to dump
    #[arg(long)]
    pub database: Option<String>,

    /// Override the tables to dump (comma-separated)
    #[arg(long)]
    pub tables: Option<String>,

    /// Dump rows only, without table definitions
    #[arg(long, conflicts_with = "no_data")]
    pub no_schema: bool,

    /// Dump table definitions only, without rows
    #[arg(long)]
    pub no_data: bool,

    /// Override where the downloaded dump is written
    #[arg(short, long)]
    pub output: Option<String>,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                log_error_with_context!(&e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(EXIT_CONFIG_ERROR);
        }

        let request = match config.job_request() {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(error = %e, "Invalid dump request");
                eprintln!("Invalid dump request: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        let Some(destination) = config.dump.output_path.as_deref().map(PathBuf::from) else {
            tracing::error!("No output path configured");
            eprintln!("No output path: set dump.output_path or pass --output");
            return Ok(EXIT_CONFIG_ERROR);
        };

        let client = match DumpApiClient::new(&config.api) {
            Ok(c) => c,
            Err(e) => {
                log_error_with_context!(&e, "Failed to create dump API client");
                eprintln!("Failed to initialize export: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        let driver = JobDriver::new(Arc::new(client))
            .with_poll_interval(Duration::from_millis(config.dump.poll_interval_ms))
            .with_shutdown_signal(shutdown_signal);

        println!(
            "Dumping database {} of account {}",
            request.database_id, request.account_id
        );
        if !request.tables.is_empty() {
            println!("  Tables: {}", request.tables.join(", "));
        }
        println!();

        let mut progress = ConsoleProgress;
        let outcome = match driver.drive(&request, &mut progress).await {
            Ok(o) => o,
            Err(e) => return Ok(report_job_error(&e)),
        };
        let completed_at = Utc::now();

        println!();
        println!("Dump job complete: {}", outcome.handle.filename);

        let retriever = ArtifactRetriever::new()?;
        let download_started = Instant::now();
        let bytes_written = match retriever.fetch_artifact(&outcome.handle, &destination).await {
            Ok(bytes) => bytes,
            Err(e) => {
                report_download_error(&e, completed_at);
                return Ok(EXIT_FATAL);
            }
        };

        let summary = ExportSummary::new(&outcome, destination, bytes_written)
            .with_download_duration(download_started.elapsed());
        summary.log_summary();

        println!();
        println!("Export Summary:");
        for line in summary.report_lines() {
            println!("  {line}");
        }
        println!();
        println!("Export completed successfully");

        Ok(EXIT_SUCCESS)
    }

    /// Command line flags win over the configuration file
    fn apply_overrides(&self, config: &mut DumpConfig) {
        if let Some(database) = &self.database {
            tracing::info!(database_id = %database, "Overriding database from CLI");
            config.dump.database_id = Some(database.clone());
        }

        if let Some(tables) = &self.tables {
            let tables = split_list(tables);
            tracing::info!(tables = ?tables, "Overriding tables from CLI");
            config.dump.tables = tables;
        }

        if self.no_schema {
            config.dump.no_schema = true;
            config.dump.no_data = false;
        }

        if self.no_data {
            config.dump.no_data = true;
            config.dump.no_schema = false;
        }

        if let Some(output) = &self.output {
            config.dump.output_path = Some(output.clone());
        }
    }
}

/// Prints progress events as they arrive
struct ConsoleProgress;

impl ProgressSink for ConsoleProgress {
    fn emit(&mut self, event: ProgressEvent) {
        tracing::debug!(event = %event, "Progress");
        println!("  {event}");
    }
}

fn job_exit_code(error: &JobError) -> i32 {
    match error {
        JobError::Cancelled => EXIT_INTERRUPTED,
        e if e.is_transport() => EXIT_CONNECTION_ERROR,
        _ => EXIT_FATAL,
    }
}

fn report_job_error(error: &JobError) -> i32 {
    match error {
        JobError::Cancelled => {
            println!();
            println!("Export interrupted before the job finished.");
            println!("The server may still complete the dump; re-run to start a new one.");
            tracing::info!("Export interrupted by user signal");
        }
        JobError::Failed { message } => {
            tracing::error!(message = %message, "Dump job failed");
            eprintln!("Dump job failed: {message}");
        }
        other => {
            tracing::error!(error = %other, "Dump job aborted");
            eprintln!("Dump job aborted: {other}");
        }
    }
    job_exit_code(error)
}

/// Latest time the signed URL can still be used
fn signed_url_expiry(completed_at: DateTime<Utc>) -> Option<DateTime<Utc>> {
    chrono::Duration::from_std(SIGNED_URL_VALIDITY)
        .ok()
        .map(|validity| completed_at + validity)
}

fn report_download_error(error: &ArtifactError, completed_at: DateTime<Utc>) {
    eprintln!("Failed to download dump: {error}");
    eprintln!();
    eprintln!("The dump can still be downloaded manually from:");
    eprintln!("  {}", error.signed_url());
    match signed_url_expiry(completed_at) {
        Some(expiry) => eprintln!(
            "This link is valid for 1 hour (until {} UTC).",
            expiry.format("%Y-%m-%d %H:%M")
        ),
        None => eprintln!("This link is valid for 1 hour."),
    }
}

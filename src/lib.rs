// cloud-dump - Managed Database Dump Exporter
// Copyright (c) 2025 Cloud Dump Contributors
// Licensed under the MIT License

//! # cloud-dump - Managed Database Dump Exporter
//!
//! cloud-dump asks a managed database service to produce a dump of one
//! database, follows the server-side job until it finishes, and downloads the
//! resulting artifact from the signed URL the service hands back.
//!
//! ## Overview
//!
//! - **Starting** a dump job scoped to a set of tables, with or without schema or data
//! - **Polling** the job with a bookmark until it reports `complete` or `error`
//! - **Reporting** progress, with uploaded parts renumbered in arrival order
//! - **Downloading** the finished artifact without leaving partial files behind
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (job driver, artifact retrieval)
//! - [`adapters`] - External integrations (dump API over HTTP)
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cloud_dump::adapters::dump_api::DumpApiClient;
//! use cloud_dump::config::load_config;
//! use cloud_dump::core::artifact::ArtifactRetriever;
//! use cloud_dump::core::export::{JobDriver, ProgressEvent};
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("cloud-dump.toml")?;
//!     let request = config.job_request()?;
//!
//!     let driver = JobDriver::new(Arc::new(DumpApiClient::new(&config.api)?));
//!     let mut events: Vec<ProgressEvent> = Vec::new();
//!     let handle = driver.run_export(&request, &mut events).await?;
//!
//!     ArtifactRetriever::new()?
//!         .fetch_artifact(&handle, Path::new("dump.sql"))
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! The crate-wide error is [`domain::DumpError`]; job and download failures
//! have their own types ([`domain::JobError`], [`domain::ArtifactError`]) that
//! convert into it with `?`.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;

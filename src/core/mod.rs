//! Core business logic for cloud-dump.
//!
//! # Modules
//!
//! - [`export`] - Driving a dump job to completion and reporting progress
//! - [`artifact`] - Downloading the finished artifact from its signed URL
//!
//! # Export Workflow
//!
//! 1. **Submit**: Send the first job status request without a bookmark
//! 2. **Poll**: Re-send the same scoping with the latest bookmark until the job
//!    reports `complete` or `error`
//! 3. **Report**: Emit progress events as status messages arrive
//! 4. **Download**: Stream the artifact from its signed URL to the destination
//!
//! # Example
//!
//! ```rust,no_run
//! use cloud_dump::adapters::dump_api::DumpApiClient;
//! use cloud_dump::config::load_config;
//! use cloud_dump::core::artifact::ArtifactRetriever;
//! use cloud_dump::core::export::{JobDriver, TracingProgress};
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("cloud-dump.toml")?;
//! let request = config.job_request()?;
//!
//! let driver = JobDriver::new(Arc::new(DumpApiClient::new(&config.api)?));
//! let handle = driver.run_export(&request, &mut TracingProgress).await?;
//!
//! let bytes = ArtifactRetriever::new()?
//!     .fetch_artifact(&handle, Path::new("dump.sql"))
//!     .await?;
//! println!("Wrote {bytes} bytes of {}", handle.filename);
//! # Ok(())
//! # }
//! ```

pub mod artifact;
pub mod export;

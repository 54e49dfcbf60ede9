//! External system integrations for cloud-dump.
//!
//! - [`dump_api`] - the remote dump service's job status endpoint
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies behind traits so the core can be
//! tested with scripted implementations. The job driver only sees
//! [`dump_api::JobTransport`]:
//!
//! ```rust,no_run
//! use cloud_dump::adapters::dump_api::DumpApiClient;
//! use cloud_dump::config::ApiConfig;
//! use cloud_dump::core::export::JobDriver;
//! use std::sync::Arc;
//!
//! # fn example() -> cloud_dump::domain::Result<()> {
//! let config = ApiConfig {
//!     base_url: "https://api.example.com/v1".to_string(),
//!     account_id: "acct_123".to_string(),
//!     ..Default::default()
//! };
//! let driver = JobDriver::new(Arc::new(DumpApiClient::new(&config)?));
//! # Ok(())
//! # }
//! ```

pub mod dump_api;

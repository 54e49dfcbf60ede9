//! Domain models and types for cloud-dump.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`AccountId`], [`DatabaseId`])
//! - **Dump job model** ([`JobRequest`], [`Bookmark`], [`JobStatus`], [`ArtifactHandle`])
//! - **Error types** ([`DumpError`], [`JobError`], [`ArtifactError`])
//! - **Result type alias** ([`Result`])
//! - **Error context** ([`context::ResultExt`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, DumpError>`]; the narrower
//! [`JobError`] and [`ArtifactError`] convert into it with `?`:
//!
//! ```rust
//! use cloud_dump::domain::{DumpError, JobError, Result};
//!
//! fn example() -> Result<()> {
//!     let outcome: std::result::Result<(), JobError> = Err(JobError::Cancelled);
//!     outcome?;
//!     Ok(())
//! }
//!
//! assert!(matches!(example(), Err(DumpError::Job(JobError::Cancelled))));
//! ```

pub mod context;
pub mod errors;
pub mod ids;
pub mod job;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{ArtifactError, DumpError, JobError};
pub use ids::{AccountId, DatabaseId};
pub use job::{ArtifactHandle, Bookmark, JobRequest, JobStatus};
pub use result::Result;

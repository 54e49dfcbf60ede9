//! Dump job driving and progress reporting
//!
//! This module provides the core export logic:
//! - Polling a dump job to a terminal state
//! - Renumbering part-uploaded notifications
//! - Summary and reporting

pub mod driver;
pub mod progress;
pub mod summary;

pub use driver::{ExportOutcome, JobDriver, PollState, PollStep};
pub use progress::{
    parse_part_uploaded, FnProgress, ProgressEvent, ProgressSink, TracingProgress,
};
pub use summary::ExportSummary;

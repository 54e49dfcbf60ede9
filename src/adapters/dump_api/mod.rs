//! Dump API adapter
//!
//! The job status endpoint of the remote dump service: wire models, the
//! transport trait the job driver polls through, and its reqwest implementation.

pub mod client;
pub mod models;
pub mod transport;

pub use client::DumpApiClient;
pub use models::{DumpEnvelope, DumpOptions, DumpRequest, DUMP_CHUNK_LIMIT};
pub use transport::JobTransport;

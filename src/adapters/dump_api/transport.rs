//! Job transport trait
//!
//! Abstracts the single request/response exchange the job driver performs on
//! every poll, so the poll loop can run against the HTTP client or a scripted
//! in-memory transport.

use super::models::{DumpEnvelope, DumpRequest};
use crate::domain::errors::JobError;
use crate::domain::ids::{AccountId, DatabaseId};
use async_trait::async_trait;

/// One job status exchange with the dump API
///
/// Implementations perform exactly one request per call and never retry.
/// A failure to obtain a decodable envelope is reported as
/// [`JobError::Transport`] or [`JobError::InvalidResponse`]; interpreting the
/// envelope itself is left to the caller.
#[async_trait]
pub trait JobTransport: Send + Sync {
    /// Sends one job status request and returns the decoded envelope
    async fn poll(
        &self,
        account_id: &AccountId,
        database_id: &DatabaseId,
        request: &DumpRequest,
    ) -> Result<DumpEnvelope, JobError>;

    /// Human-readable description of the endpoint, used in logs
    fn describe(&self) -> String;
}

//! Dump API wire models
//!
//! Request and response bodies of the job status endpoint.

use crate::domain::errors::JobError;
use crate::domain::job::{Bookmark, JobRequest, JobStatus};
use serde::{Deserialize, Serialize};

/// Maximum chunk size the server uses to segment a dump.
///
/// A protocol constant: it is attached identically to every request and is not
/// user-tunable.
pub const DUMP_CHUNK_LIMIT: u32 = 50;

/// Output format that asks the server to run the dump as a pollable job
pub const OUTPUT_FORMAT_POLLING: &str = "polling";

fn is_false(value: &bool) -> bool {
    !*value
}

/// Scoping options of a dump request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DumpOptions {
    /// Tables to include (empty = all)
    pub tables: Vec<String>,

    /// Present only when set
    #[serde(default, skip_serializing_if = "is_false")]
    pub no_schema: bool,

    /// Present only when set
    #[serde(default, skip_serializing_if = "is_false")]
    pub no_data: bool,

    /// Always [`DUMP_CHUNK_LIMIT`]
    pub limit: u32,
}

/// Body of one job status request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DumpRequest {
    /// Always [`OUTPUT_FORMAT_POLLING`]
    pub output_format: String,

    /// What to dump
    pub dump_options: DumpOptions,

    /// Absent on the first poll of a job
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_bookmark: Option<Bookmark>,
}

impl DumpRequest {
    /// Builds the request body for one poll
    pub fn new(job: &JobRequest, bookmark: Option<&Bookmark>) -> Self {
        Self {
            output_format: OUTPUT_FORMAT_POLLING.to_string(),
            dump_options: DumpOptions {
                tables: job.tables.clone(),
                no_schema: job.no_schema,
                no_data: job.no_data,
                limit: DUMP_CHUNK_LIMIT,
            },
            current_bookmark: bookmark.cloned(),
        }
    }
}

/// Response envelope of the job status endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DumpEnvelope {
    /// `false` marks a protocol-level failure described by `error`
    pub success: bool,

    /// Job status, present when `success` is true
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<JobStatus>,

    /// Failure description, present when `success` is false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DumpEnvelope {
    /// Successful envelope carrying a status
    pub fn ok(status: JobStatus) -> Self {
        Self {
            success: true,
            result: Some(status),
            error: None,
        }
    }

    /// Failed envelope carrying an error description
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(error.into()),
        }
    }

    /// Unwraps the job status
    ///
    /// # Errors
    ///
    /// `JobError::Envelope` when `success` is false, `JobError::InvalidResponse`
    /// when a successful envelope has no result.
    pub fn into_status(self) -> Result<JobStatus, JobError> {
        if !self.success {
            return Err(JobError::Envelope(
                self.error
                    .unwrap_or_else(|| "server reported failure without details".to_string()),
            ));
        }

        self.result.ok_or_else(|| {
            JobError::InvalidResponse("successful response is missing 'result'".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::{AccountId, DatabaseId};
    use serde_json::json;

    fn job() -> JobRequest {
        JobRequest::new(
            AccountId::new("acct").unwrap(),
            DatabaseId::new("db").unwrap(),
        )
    }

    #[test]
    fn test_first_request_has_no_bookmark() {
        let body = serde_json::to_value(DumpRequest::new(&job(), None)).unwrap();
        assert_eq!(
            body,
            json!({
                "outputFormat": "polling",
                "dumpOptions": { "tables": [], "limit": DUMP_CHUNK_LIMIT }
            })
        );
    }

    #[test]
    fn test_request_carries_toggles_and_bookmark() {
        let job = job()
            .with_tables(vec!["users".to_string()])
            .without_schema();
        let bookmark = Bookmark::new("b1");
        let body = serde_json::to_value(DumpRequest::new(&job, Some(&bookmark))).unwrap();

        assert_eq!(
            body,
            json!({
                "outputFormat": "polling",
                "dumpOptions": { "tables": ["users"], "noSchema": true, "limit": DUMP_CHUNK_LIMIT },
                "currentBookmark": "b1"
            })
        );
    }

    #[test]
    fn test_envelope_failure_maps_to_envelope_error() {
        let envelope: DumpEnvelope =
            serde_json::from_value(json!({ "success": false, "error": "bad request" })).unwrap();

        match envelope.into_status() {
            Err(JobError::Envelope(message)) => assert_eq!(message, "bad request"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_envelope_without_result_is_invalid() {
        let envelope: DumpEnvelope = serde_json::from_value(json!({ "success": true })).unwrap();
        assert!(matches!(
            envelope.into_status(),
            Err(JobError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_envelope_with_error_status() {
        let envelope: DumpEnvelope = serde_json::from_value(json!({
            "success": true,
            "result": { "status": "error", "errors": ["disk full", "quota exceeded"] }
        }))
        .unwrap();

        let status = envelope.into_status().unwrap();
        assert_eq!(status.name(), "error");
    }
}

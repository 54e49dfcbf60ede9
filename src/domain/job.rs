//! Dump job domain model
//!
//! Types describing one server-side dump job: the immutable request the caller
//! builds, the opaque bookmark the server hands back between polls, the
//! tri-state status of a poll, and the handle to the finished artifact.

use super::ids::{AccountId, DatabaseId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Parameters of one dump job
///
/// Built once by the caller and never mutated while the job is polled.
///
/// # Examples
///
/// ```
/// use cloud_dump::domain::ids::{AccountId, DatabaseId};
/// use cloud_dump::domain::job::JobRequest;
///
/// let request = JobRequest::new(
///     AccountId::new("acct_123").unwrap(),
///     DatabaseId::new("db_456").unwrap(),
/// )
/// .with_tables(vec!["users".to_string()])
/// .without_schema();
///
/// assert!(request.no_schema);
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRequest {
    /// Account the job runs under
    pub account_id: AccountId,

    /// Database being dumped
    pub database_id: DatabaseId,

    /// Tables to include (empty = all tables)
    pub tables: Vec<String>,

    /// Skip table definitions, dump rows only
    pub no_schema: bool,

    /// Skip rows, dump table definitions only
    pub no_data: bool,
}

impl JobRequest {
    /// Creates a request that dumps every table with schema and data
    pub fn new(account_id: AccountId, database_id: DatabaseId) -> Self {
        Self {
            account_id,
            database_id,
            tables: Vec::new(),
            no_schema: false,
            no_data: false,
        }
    }

    /// Restricts the dump to the given tables
    pub fn with_tables(mut self, tables: Vec<String>) -> Self {
        self.tables = tables;
        self
    }

    /// Excludes table definitions from the dump
    pub fn without_schema(mut self) -> Self {
        self.no_schema = true;
        self
    }

    /// Excludes table rows from the dump
    pub fn without_data(mut self) -> Self {
        self.no_data = true;
        self
    }

    /// Checks the scoping toggles
    ///
    /// # Errors
    ///
    /// Returns an error if both schema and data are excluded, or if a table
    /// name is blank.
    pub fn validate(&self) -> Result<(), String> {
        if self.no_schema && self.no_data {
            return Err("no_schema and no_data cannot both be set".to_string());
        }
        if self.tables.iter().any(|t| t.trim().is_empty()) {
            return Err("table names cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Opaque progress token issued by the server
///
/// Echoed verbatim on the next poll so the job resumes from what it has
/// durably recorded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bookmark(String);

impl Bookmark {
    /// Wraps a server-issued token
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Bookmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle to a finished dump
///
/// The signed URL carries its own authentication and expires after about an hour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactHandle {
    /// Suggested file name of the dump
    pub filename: String,

    /// Pre-authenticated, time-limited download URL
    pub signed_url: String,
}

impl ArtifactHandle {
    /// Creates a new artifact handle
    pub fn new(filename: impl Into<String>, signed_url: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            signed_url: signed_url.into(),
        }
    }
}

/// Status of a dump job as reported by one poll
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum JobStatus {
    /// Still running; poll again with the new bookmark
    Active {
        #[serde(default)]
        messages: Vec<String>,
        #[serde(
            default,
            alias = "currentBookmark",
            skip_serializing_if = "Option::is_none"
        )]
        bookmark: Option<Bookmark>,
    },

    /// Terminated unsuccessfully
    Error {
        #[serde(default)]
        messages: Vec<String>,
        #[serde(default)]
        errors: Vec<String>,
    },

    /// Terminated successfully
    Complete {
        #[serde(default)]
        messages: Vec<String>,
        result: ArtifactHandle,
    },
}

impl JobStatus {
    /// Progress lines carried by this status, in server order
    pub fn messages(&self) -> &[String] {
        match self {
            JobStatus::Active { messages, .. }
            | JobStatus::Error { messages, .. }
            | JobStatus::Complete { messages, .. } => messages,
        }
    }

    /// Whether no further polls may be issued after this status
    pub fn is_terminal(&self) -> bool {
        !matches!(self, JobStatus::Active { .. })
    }

    /// Short lowercase name of the status, as used on the wire
    pub fn name(&self) -> &'static str {
        match self {
            JobStatus::Active { .. } => "active",
            JobStatus::Error { .. } => "error",
            JobStatus::Complete { .. } => "complete",
        }
    }
}

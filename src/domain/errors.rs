//! Domain error types
//!
//! This module defines the error hierarchy for cloud-dump.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main cloud-dump error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum DumpError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Dump job errors (transport, envelope, terminal failure)
    #[error("Dump job error: {0}")]
    Job(#[from] JobError),

    /// Artifact download errors
    #[error("Artifact download error: {0}")]
    Artifact(#[from] ArtifactError),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Errors raised while polling a dump job
///
/// `Transport`, `Envelope` and `InvalidResponse` are protocol-level faults;
/// `Failed` is the job's own terminal error status. None of them are retried.
#[derive(Debug, Error)]
pub enum JobError {
    /// The request could not be completed or the response could not be read
    #[error("Transport failure: {0}")]
    Transport(String),

    /// The server answered with `success: false`
    #[error("Request rejected by server: {0}")]
    Envelope(String),

    /// The envelope was successful but structurally unusable
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// The job reached its terminal `error` status
    #[error("Dump job failed: {message}")]
    Failed { message: String },

    /// The export was interrupted before reaching a terminal status
    #[error("Dump job polling cancelled")]
    Cancelled,
}

impl JobError {
    /// Creates a `Failed` error from the server's error list, joined into one message
    pub fn failed<S: AsRef<str>>(errors: &[S]) -> Self {
        let message = if errors.is_empty() {
            "job reported an error without details".to_string()
        } else {
            errors
                .iter()
                .map(|e| e.as_ref())
                .collect::<Vec<_>>()
                .join("; ")
        };
        JobError::Failed { message }
    }

    /// Whether the failure happened at the protocol level rather than inside the job
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            JobError::Transport(_) | JobError::Envelope(_) | JobError::InvalidResponse(_)
        )
    }
}

/// Errors raised while downloading the finished artifact
///
/// Every variant keeps enough context for the operator to retry by hand.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// The GET request to the signed URL failed or the body stream broke
    #[error("Failed to download {url}: {message}")]
    Request { url: String, message: String },

    /// The signed URL answered with a non-success status
    #[error("Download from {url} returned status {status}")]
    Status { url: String, status: u16 },

    /// Writing the artifact to disk failed
    #[error("Failed to write artifact to {path}: {message}")]
    Write {
        url: String,
        path: String,
        message: String,
    },
}

impl ArtifactError {
    /// The signed URL that was being fetched
    pub fn signed_url(&self) -> &str {
        match self {
            ArtifactError::Request { url, .. }
            | ArtifactError::Status { url, .. }
            | ArtifactError::Write { url, .. } => url,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for DumpError {
    fn from(err: std::io::Error) -> Self {
        DumpError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for DumpError {
    fn from(err: serde_json::Error) -> Self {
        DumpError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for DumpError {
    fn from(err: toml::de::Error) -> Self {
        DumpError::Configuration(format!("TOML parse error: {err}"))
    }
}

//! Error context extension trait
//!
//! Adds `.context()` and `.with_context()` to any `Result` whose error converts
//! into [`DumpError`], so library code can attach context without giving up
//! the typed error.
//!
//! # Examples
//!
//! ```rust
//! use cloud_dump::domain::Result;
//! use cloud_dump::domain::context::ResultExt;
//!
//! fn read_output(path: &str) -> Result<Vec<u8>> {
//!     std::fs::read(path).with_context(|| format!("Failed to read dump file: {path}"))
//! }
//! ```

use crate::domain::errors::DumpError;
use crate::domain::result::Result;

/// Extension trait for adding context to `Result` types
pub trait ResultExt<T> {
    /// Add context to an error
    fn context<C>(self, context: C) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static;

    /// Add context to an error, computing it only on failure
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<DumpError>,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| wrap(e.into(), context))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| wrap(e.into(), f()))
    }
}

/// Prefixes the message while keeping the variant, so exit-code mapping
/// still sees a configuration error as a configuration error
///
/// Job and download errors carry structured details and pass through as is.
fn wrap(error: DumpError, context: impl std::fmt::Display) -> DumpError {
    match error {
        DumpError::Configuration(msg) => DumpError::Configuration(format!("{context}: {msg}")),
        DumpError::Serialization(msg) => DumpError::Serialization(format!("{context}: {msg}")),
        DumpError::Io(msg) => DumpError::Io(format!("{context}: {msg}")),
        typed @ (DumpError::Job(_) | DumpError::Artifact(_)) => typed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::JobError;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_context_keeps_configuration_variant() {
        let result: Result<()> = Err(DumpError::Configuration("missing token".to_string()));
        let err = result.context("Failed to load configuration").unwrap_err();

        assert!(matches!(err, DumpError::Configuration(_)));
        let msg = err.to_string();
        assert!(msg.contains("Failed to load configuration"));
        assert!(msg.contains("missing token"));
    }

    #[test]
    fn test_context_with_io_error() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let err = result.context("Failed to create log directory").unwrap_err();

        assert!(matches!(err, DumpError::Io(_)));
        assert!(err.to_string().contains("Failed to create log directory"));
    }

    #[test]
    fn test_context_keeps_job_error() {
        let result: std::result::Result<(), JobError> =
            Err(JobError::Transport("connection refused".to_string()));
        let err = result.context("Dump job aborted").unwrap_err();

        assert!(matches!(err, DumpError::Job(JobError::Transport(_))));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_with_context_is_lazy() {
        let called = Arc::new(AtomicBool::new(false));
        let flag = called.clone();

        let result: Result<i32> = Ok(42);
        let value = result
            .with_context(|| {
                flag.store(true, Ordering::SeqCst);
                "never built"
            })
            .unwrap();

        assert_eq!(value, 42);
        assert!(!called.load(Ordering::SeqCst));
    }
}

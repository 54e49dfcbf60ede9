//! Result type alias for cloud-dump
//!
//! This module provides a convenient Result type alias that uses DumpError
//! as the error type.

use super::errors::DumpError;

/// Result type alias for cloud-dump operations
///
/// # Examples
///
/// ```
/// use cloud_dump::domain::result::Result;
/// use cloud_dump::domain::errors::DumpError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(DumpError::Configuration("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, DumpError>;

//! Domain identifier types with validation
//!
//! Newtype wrappers for the identifiers that key a dump job on the server.
//! Each type rejects empty values and values containing a path separator,
//! since both end up as segments of the job status URL.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

fn validate_segment(kind: &str, id: &str) -> Result<(), String> {
    if id.trim().is_empty() {
        return Err(format!("{kind} cannot be empty"));
    }
    if id.contains('/') || id.chars().any(char::is_whitespace) {
        return Err(format!(
            "{kind} '{id}' must not contain '/' or whitespace"
        ));
    }
    Ok(())
}

/// Account identifier newtype wrapper
///
/// Supplied by credential resolution; the job status endpoint is scoped to it.
///
/// # Examples
///
/// ```
/// use cloud_dump::domain::ids::AccountId;
/// use std::str::FromStr;
///
/// let account = AccountId::from_str("acct_123").unwrap();
/// assert_eq!(account.as_str(), "acct_123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(String);

impl AccountId {
    /// Creates a new AccountId from a string
    ///
    /// # Returns
    ///
    /// Returns `Ok(AccountId)` if the ID is valid, `Err` otherwise
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        validate_segment("Account ID", &id)?;
        Ok(Self(id))
    }

    /// Returns the account ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AccountId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for AccountId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AccountId> for String {
    fn from(id: AccountId) -> Self {
        id.0
    }
}

/// Database identifier newtype wrapper
///
/// The resource whose contents the dump job exports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DatabaseId(String);

impl DatabaseId {
    /// Creates a new DatabaseId from a string
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        validate_segment("Database ID", &id)?;
        Ok(Self(id))
    }

    /// Returns the database ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DatabaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DatabaseId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for DatabaseId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DatabaseId> for String {
    fn from(id: DatabaseId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_id_creation() {
        let id = AccountId::new("acct_123").unwrap();
        assert_eq!(id.as_str(), "acct_123");
        assert_eq!(id.to_string(), "acct_123");
    }

    #[test]
    fn test_account_id_empty_fails() {
        assert!(AccountId::new("").is_err());
        assert!(AccountId::new("   ").is_err());
    }

    #[test]
    fn test_database_id_rejects_path_separator() {
        let err = DatabaseId::new("db/../other").unwrap_err();
        assert!(err.contains("must not contain"));
    }

    #[test]
    fn test_database_id_from_str() {
        let id = DatabaseId::from_str("db_456").unwrap();
        assert_eq!(id.as_str(), "db_456");
    }

    #[test]
    fn test_database_id_serde_validates() {
        let ok: DatabaseId = serde_json::from_str("\"db_1\"").unwrap();
        assert_eq!(ok.as_str(), "db_1");
        assert!(serde_json::from_str::<DatabaseId>("\"\"").is_err());
    }
}

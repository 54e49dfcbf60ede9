//! HTTP implementation of the job transport
//!
//! Sends job status requests to
//! `POST {base_url}/accounts/{account}/databases/{database}/dump` with reqwest.

use super::models::{DumpEnvelope, DumpRequest};
use super::transport::JobTransport;
use crate::config::{ApiConfig, SecretString};
use crate::domain::errors::{DumpError, JobError};
use crate::domain::ids::{AccountId, DatabaseId};
use crate::domain::Result;
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use secrecy::ExposeSecret;
use std::time::Duration;

const MAX_ERROR_BODY_CHARS: usize = 512;

/// Dump API client
///
/// # Example
///
/// ```no_run
/// use cloud_dump::adapters::dump_api::DumpApiClient;
/// use cloud_dump::config::ApiConfig;
///
/// # fn example() -> cloud_dump::domain::Result<()> {
/// let config = ApiConfig {
///     base_url: "https://api.example.com/v1".to_string(),
///     account_id: "acct_123".to_string(),
///     ..Default::default()
/// };
/// let client = DumpApiClient::new(&config)?;
/// # Ok(())
/// # }
/// ```
pub struct DumpApiClient {
    /// Base URL without trailing slash
    base_url: String,

    /// HTTP client for making requests
    client: Client,

    /// Bearer token, if configured
    api_token: Option<SecretString>,
}

impl DumpApiClient {
    /// Create a new client from the API configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut client_builder = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .user_agent(concat!("cloud-dump/", env!("CARGO_PKG_VERSION")));

        if !config.tls_verify {
            tracing::warn!(
                base_url = %config.base_url,
                "TLS certificate verification disabled for dump API"
            );
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        let client = client_builder.build().map_err(|e| {
            DumpError::Configuration(format!("Failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            api_token: config.api_token.clone(),
        })
    }

    /// Job status endpoint for an account and database
    pub fn endpoint(&self, account_id: &AccountId, database_id: &DatabaseId) -> String {
        format!(
            "{}/accounts/{}/databases/{}/dump",
            self.base_url, account_id, database_id
        )
    }
}

fn truncate(body: &str) -> String {
    if body.chars().count() <= MAX_ERROR_BODY_CHARS {
        return body.to_string();
    }
    let mut out: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
    out.push_str("...");
    out
}

#[async_trait]
impl JobTransport for DumpApiClient {
    async fn poll(
        &self,
        account_id: &AccountId,
        database_id: &DatabaseId,
        request: &DumpRequest,
    ) -> std::result::Result<DumpEnvelope, JobError> {
        let url = self.endpoint(account_id, database_id);

        tracing::debug!(
            url = %url,
            has_bookmark = request.current_bookmark.is_some(),
            "Sending dump job status request"
        );

        let mut http_request = self.client.post(&url).json(request);
        if let Some(token) = &self.api_token {
            let token: &str = token.expose_secret().as_ref();
            http_request = http_request.bearer_auth(token);
        }

        let response = http_request
            .send()
            .await
            .map_err(|e| JobError::Transport(format!("request to {url} failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| JobError::Transport(format!("failed to read response body: {e}")))?;

        match serde_json::from_str::<DumpEnvelope>(&body) {
            // A failed envelope explains itself regardless of the HTTP status
            Ok(envelope) if !envelope.success => Ok(envelope),
            Ok(envelope) if status.is_success() => Ok(envelope),
            Ok(_) => Err(JobError::Transport(format!(
                "server returned status {status} with a successful envelope"
            ))),
            Err(e) if status.is_success() => Err(JobError::InvalidResponse(format!(
                "undecodable response body ({e}): {}",
                truncate(&body)
            ))),
            Err(_) => Err(JobError::Transport(format!(
                "server returned status {status}: {}",
                truncate(&body)
            ))),
        }
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;
    use crate::domain::job::{ArtifactHandle, JobRequest, JobStatus};
    use mockito::Matcher;
    use serde_json::json;

    const DUMP_PATH: &str = "/accounts/acct_1/databases/db_1/dump";

    fn ids() -> (AccountId, DatabaseId) {
        (
            AccountId::new("acct_1").unwrap(),
            DatabaseId::new("db_1").unwrap(),
        )
    }

    fn client_for(base_url: String, token: Option<&str>) -> DumpApiClient {
        let config = ApiConfig {
            base_url,
            account_id: "acct_1".to_string(),
            api_token: token.map(|t| secret_string(t.to_string())),
            ..Default::default()
        };
        DumpApiClient::new(&config).unwrap()
    }

    fn first_request() -> DumpRequest {
        let (account, database) = ids();
        let job = JobRequest::new(account, database).with_tables(vec!["users".to_string()]);
        DumpRequest::new(&job, None)
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let client = client_for("https://api.example.com/v1/".to_string(), None);
        let (account, database) = ids();
        assert_eq!(
            client.endpoint(&account, &database),
            "https://api.example.com/v1/accounts/acct_1/databases/db_1/dump"
        );
        assert_eq!(client.describe(), "https://api.example.com/v1");
    }

    #[tokio::test]
    async fn test_poll_sends_body_and_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", DUMP_PATH)
            .match_header("authorization", "Bearer tok_123")
            .match_body(Matcher::PartialJson(json!({
                "outputFormat": "polling",
                "dumpOptions": { "tables": ["users"] }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "success": true,
                    "result": {
                        "status": "complete",
                        "result": { "filename": "dump.sql", "signedUrl": "https://x/y" }
                    }
                })
                .to_string(),
            )
            .expect(1)
            .create_async()
            .await;

        let client = client_for(server.url(), Some("tok_123"));
        let (account, database) = ids();
        let envelope = client
            .poll(&account, &database, &first_request())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(
            envelope.into_status().unwrap(),
            JobStatus::Complete {
                messages: vec![],
                result: ArtifactHandle::new("dump.sql", "https://x/y"),
            }
        );
    }

    #[tokio::test]
    async fn test_poll_returns_failed_envelope_on_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", DUMP_PATH)
            .with_status(400)
            .with_body(json!({ "success": false, "error": "bad request" }).to_string())
            .create_async()
            .await;

        let client = client_for(server.url(), None);
        let (account, database) = ids();
        let envelope = client
            .poll(&account, &database, &first_request())
            .await
            .unwrap();

        assert!(!envelope.success);
        assert_eq!(envelope.error.as_deref(), Some("bad request"));
    }

    #[tokio::test]
    async fn test_poll_non_json_error_is_transport_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", DUMP_PATH)
            .with_status(502)
            .with_body("<html>Bad Gateway</html>")
            .create_async()
            .await;

        let client = client_for(server.url(), None);
        let (account, database) = ids();
        let err = client
            .poll(&account, &database, &first_request())
            .await
            .unwrap_err();

        assert!(matches!(err, JobError::Transport(_)));
        assert!(err.to_string().contains("502"));
    }

    #[tokio::test]
    async fn test_poll_malformed_success_body_is_invalid_response() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", DUMP_PATH)
            .with_status(200)
            .with_body("{\"success\": tru")
            .create_async()
            .await;

        let client = client_for(server.url(), None);
        let (account, database) = ids();
        let err = client
            .poll(&account, &database, &first_request())
            .await
            .unwrap_err();

        assert!(matches!(err, JobError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_poll_unreachable_server_is_transport_error() {
        // Port 9 (discard) is not expected to accept HTTP connections
        let client = client_for("http://127.0.0.1:9".to_string(), None);
        let (account, database) = ids();
        let err = client
            .poll(&account, &database, &first_request())
            .await
            .unwrap_err();

        assert!(err.is_transport());
    }

    #[test]
    fn test_truncate_long_body() {
        let body = "x".repeat(MAX_ERROR_BODY_CHARS + 10);
        let out = truncate(&body);
        assert!(out.ends_with("..."));
        assert_eq!(out.len(), MAX_ERROR_BODY_CHARS + 3);
    }
}

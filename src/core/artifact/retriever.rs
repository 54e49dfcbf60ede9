//! Artifact retriever - downloads a finished dump from its signed URL
//!
//! The body is streamed into `<destination>.part` next to the destination and
//! renamed over it only once every byte has been written and flushed. On any
//! failure the `.part` file is removed, so the destination path either holds
//! the complete new artifact or whatever it held before.

use crate::domain::errors::{ArtifactError, DumpError};
use crate::domain::job::ArtifactHandle;
use crate::domain::Result;
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

/// How long a signed URL stays valid after the job completes
pub const SIGNED_URL_VALIDITY: Duration = Duration::from_secs(60 * 60);

/// Downloads artifacts over plain, unauthenticated HTTPS GET
pub struct ArtifactRetriever {
    client: Client,
}

impl ArtifactRetriever {
    /// Create a retriever
    ///
    /// Only the connection is bounded by a timeout; large dumps may take
    /// arbitrarily long to stream.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(30))
            .user_agent(concat!("cloud-dump/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DumpError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Fetches `handle.signed_url` into `destination`, overwriting it
    ///
    /// Returns the number of bytes written. Never retries.
    ///
    /// # Errors
    ///
    /// Every error carries the signed URL so the operator can fetch it by hand.
    pub async fn fetch_artifact(
        &self,
        handle: &ArtifactHandle,
        destination: &Path,
    ) -> std::result::Result<u64, ArtifactError> {
        let url = handle.signed_url.as_str();
        let partial = partial_path(destination).ok_or_else(|| ArtifactError::Write {
            url: url.to_string(),
            path: destination.display().to_string(),
            message: "destination has no file name".to_string(),
        })?;

        tracing::info!(
            filename = %handle.filename,
            destination = %destination.display(),
            "Downloading dump artifact"
        );

        match self.download_to(url, &partial, destination).await {
            Ok(bytes) => {
                tracing::info!(
                    bytes,
                    destination = %destination.display(),
                    "Dump artifact written"
                );
                Ok(bytes)
            }
            Err(e) => {
                if let Err(cleanup) = fs::remove_file(&partial).await {
                    if cleanup.kind() != std::io::ErrorKind::NotFound {
                        tracing::warn!(
                            path = %partial.display(),
                            error = %cleanup,
                            "Failed to remove partial download"
                        );
                    }
                }
                tracing::error!(error = %e, "Dump artifact download failed");
                Err(e)
            }
        }
    }

    async fn download_to(
        &self,
        url: &str,
        partial: &Path,
        destination: &Path,
    ) -> std::result::Result<u64, ArtifactError> {
        let request_error = |e: reqwest::Error| ArtifactError::Request {
            url: url.to_string(),
            message: e.to_string(),
        };
        let write_error = |path: &Path, e: std::io::Error| ArtifactError::Write {
            url: url.to_string(),
            path: path.display().to_string(),
            message: e.to_string(),
        };

        let mut response = self.client.get(url).send().await.map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ArtifactError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let mut file = File::create(partial)
            .await
            .map_err(|e| write_error(partial, e))?;

        let mut written: u64 = 0;
        while let Some(chunk) = response.chunk().await.map_err(request_error)? {
            file.write_all(&chunk)
                .await
                .map_err(|e| write_error(partial, e))?;
            written += chunk.len() as u64;
        }

        file.flush().await.map_err(|e| write_error(partial, e))?;
        file.sync_all().await.map_err(|e| write_error(partial, e))?;
        drop(file);

        fs::rename(partial, destination)
            .await
            .map_err(|e| write_error(destination, e))?;

        Ok(written)
    }
}

/// Sibling path the download is staged in
fn partial_path(destination: &Path) -> Option<PathBuf> {
    let mut name = destination.file_name()?.to_os_string();
    name.push(".part");
    Some(destination.with_file_name(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_partial_path() {
        assert_eq!(
            partial_path(Path::new("/tmp/out/dump.sql")),
            Some(PathBuf::from("/tmp/out/dump.sql.part"))
        );
        assert_eq!(partial_path(Path::new("/")), None);
    }

    #[tokio::test]
    async fn test_fetch_writes_body_and_overwrites() {
        let mut server = mockito::Server::new_async().await;
        let body: Vec<u8> = (0u8..=255).cycle().take(64 * 1024).collect();
        let mock = server
            .mock("GET", "/signed/dump.sql")
            .match_header("authorization", mockito::Matcher::Missing)
            .with_status(200)
            .with_body(body.clone())
            .expect(1)
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let destination = dir.path().join("dump.sql");
        std::fs::write(&destination, b"stale contents that are longer than nothing").unwrap();

        let handle = ArtifactHandle::new("dump.sql", format!("{}/signed/dump.sql", server.url()));
        let retriever = ArtifactRetriever::new().unwrap();
        let written = retriever
            .fetch_artifact(&handle, &destination)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(written, body.len() as u64);
        assert_eq!(std::fs::read(&destination).unwrap(), body);
        assert!(!dir.path().join("dump.sql.part").exists());
    }

    #[tokio::test]
    async fn test_fetch_error_status_leaves_no_file() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/signed/expired.sql")
            .with_status(403)
            .with_body("Request has expired")
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let destination = dir.path().join("dump.sql");
        let url = format!("{}/signed/expired.sql", server.url());
        let handle = ArtifactHandle::new("dump.sql", url.clone());

        let err = ArtifactRetriever::new()
            .unwrap()
            .fetch_artifact(&handle, &destination)
            .await
            .unwrap_err();

        assert!(matches!(err, ArtifactError::Status { status: 403, .. }));
        assert_eq!(err.signed_url(), url);
        assert!(!destination.exists());
        assert!(!dir.path().join("dump.sql.part").exists());
    }

    #[tokio::test]
    async fn test_fetch_failure_keeps_previous_destination() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/signed/missing.sql")
            .with_status(404)
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let destination = dir.path().join("dump.sql");
        std::fs::write(&destination, b"previous dump").unwrap();

        let handle =
            ArtifactHandle::new("dump.sql", format!("{}/signed/missing.sql", server.url()));
        let result = ArtifactRetriever::new()
            .unwrap()
            .fetch_artifact(&handle, &destination)
            .await;

        assert!(result.is_err());
        assert_eq!(std::fs::read(&destination).unwrap(), b"previous dump");
    }

    #[tokio::test]
    async fn test_fetch_into_missing_directory_is_write_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/signed/dump.sql")
            .with_status(200)
            .with_body("SELECT 1;")
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let destination = dir.path().join("no-such-dir").join("dump.sql");
        let handle = ArtifactHandle::new("dump.sql", format!("{}/signed/dump.sql", server.url()));

        let err = ArtifactRetriever::new()
            .unwrap()
            .fetch_artifact(&handle, &destination)
            .await
            .unwrap_err();

        assert!(matches!(err, ArtifactError::Write { .. }));
        assert!(!destination.exists());
    }

    #[tokio::test]
    async fn test_truncated_body_removes_partial_and_keeps_previous() {
        use tokio::io::AsyncReadExt;
        use tokio::net::TcpListener;

        // Promises 100000 bytes, sends 5000, then hangs up
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 4096];
            let _ = socket.read(&mut request).await;
            socket
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100000\r\n\r\n")
                .await
                .unwrap();
            socket.write_all(&[b'x'; 5000]).await.unwrap();
            socket.flush().await.unwrap();
        });

        let dir = TempDir::new().unwrap();
        let destination = dir.path().join("dump.sql");
        std::fs::write(&destination, b"previous dump").unwrap();

        let handle = ArtifactHandle::new("dump.sql", format!("http://{addr}/signed/dump.sql"));
        let err = ArtifactRetriever::new()
            .unwrap()
            .fetch_artifact(&handle, &destination)
            .await
            .unwrap_err();

        assert!(matches!(err, ArtifactError::Request { .. }));
        assert!(!dir.path().join("dump.sql.part").exists());
        assert_eq!(std::fs::read(&destination).unwrap(), b"previous dump");
    }
}

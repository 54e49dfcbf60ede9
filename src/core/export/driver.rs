//! Job driver - polls a dump job until it reaches a terminal status
//!
//! The driver issues one job status request at a time. Each request carries the
//! bookmark from the previous response, so polls are strictly sequential. The
//! loop ends exactly once: `complete` yields the artifact handle, `error` or a
//! transport fault yields an error, and nothing is sent after that.
//!
//! There is no upper bound on the number of polls and, unless configured, no
//! delay between them.

use super::progress::{parse_part_uploaded, ProgressEvent, ProgressSink};
use crate::adapters::dump_api::{DumpRequest, JobTransport};
use crate::domain::errors::JobError;
use crate::domain::job::{ArtifactHandle, Bookmark, JobRequest, JobStatus};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;

/// Loop state threaded through every poll of one export
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollState {
    /// Bookmark to send on the next request; `None` starts the job fresh
    pub bookmark: Option<Bookmark>,

    /// Number of "part uploaded" notifications seen so far
    pub parts_uploaded: u64,

    /// Number of responses processed so far
    pub polls: u64,
}

/// Result of feeding one status into [`PollState::advance`]
#[derive(Debug)]
pub enum PollStep {
    /// The job is still running; poll again with this state
    Continue(PollState),

    /// The job finished successfully
    Complete {
        handle: ArtifactHandle,
        state: PollState,
    },

    /// The job finished unsuccessfully
    Failed { error: JobError, state: PollState },
}

impl PollState {
    /// State at the start of an export
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes one job status
    ///
    /// Emits every progress line of `status` to `sink` in array order,
    /// renumbering "part uploaded" lines by arrival, then decides whether the
    /// loop continues.
    pub fn advance(mut self, status: JobStatus, sink: &mut dyn ProgressSink) -> PollStep {
        self.polls += 1;

        for line in status.messages() {
            match parse_part_uploaded(line) {
                Some(server_part) => {
                    self.parts_uploaded += 1;
                    tracing::debug!(
                        server_part = %server_part,
                        sequence = self.parts_uploaded,
                        "Part uploaded"
                    );
                    sink.emit(ProgressEvent::PartUploaded {
                        sequence: self.parts_uploaded,
                    });
                }
                None => sink.emit(ProgressEvent::Message(line.clone())),
            }
        }

        match status {
            JobStatus::Complete { result, .. } => PollStep::Complete {
                handle: result,
                state: self,
            },
            JobStatus::Error { errors, .. } => PollStep::Failed {
                error: JobError::failed(&errors),
                state: self,
            },
            JobStatus::Active { bookmark, .. } => {
                match bookmark {
                    Some(bookmark) => self.bookmark = Some(bookmark),
                    None => tracing::warn!(
                        poll = self.polls,
                        "Active status without a bookmark, resending the previous one"
                    ),
                }
                PollStep::Continue(self)
            }
        }
    }
}

/// Statistics of a successful export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    /// Handle to the finished artifact
    pub handle: ArtifactHandle,

    /// Number of job status requests issued
    pub polls: u64,

    /// Number of parts the server reported as uploaded
    pub parts_uploaded: u64,

    /// Wall time from the first request to the terminal response
    pub duration: Duration,
}

/// Drives dump jobs to completion over a [`JobTransport`]
///
/// # Example
///
/// ```rust,no_run
/// use cloud_dump::adapters::dump_api::DumpApiClient;
/// use cloud_dump::config::ApiConfig;
/// use cloud_dump::core::export::{JobDriver, ProgressEvent};
/// use cloud_dump::domain::{AccountId, DatabaseId, JobRequest};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ApiConfig {
///     base_url: "https://api.example.com/v1".to_string(),
///     account_id: "acct_123".to_string(),
///     ..Default::default()
/// };
/// let driver = JobDriver::new(Arc::new(DumpApiClient::new(&config)?));
///
/// let request = JobRequest::new(AccountId::new("acct_123")?, DatabaseId::new("db_456")?)
///     .with_tables(vec!["users".to_string()]);
/// let mut events: Vec<ProgressEvent> = Vec::new();
/// let handle = driver.run_export(&request, &mut events).await?;
/// println!("{} is at {}", handle.filename, handle.signed_url);
/// # Ok(())
/// # }
/// ```
pub struct JobDriver {
    transport: Arc<dyn JobTransport>,
    poll_interval: Duration,
    shutdown_signal: Option<watch::Receiver<bool>>,
}

impl JobDriver {
    /// Creates a driver that polls back-to-back and cannot be cancelled
    pub fn new(transport: Arc<dyn JobTransport>) -> Self {
        Self {
            transport,
            poll_interval: Duration::ZERO,
            shutdown_signal: None,
        }
    }

    /// Waits `interval` between a non-terminal response and the next request
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Checks `signal` before every request and stops with
    /// [`JobError::Cancelled`] once it reads `true`; a pending poll interval
    /// is cut short
    pub fn with_shutdown_signal(mut self, signal: watch::Receiver<bool>) -> Self {
        self.shutdown_signal = Some(signal);
        self
    }

    /// Polls the job until it completes and returns the artifact handle
    ///
    /// # Errors
    ///
    /// - [`JobError::Transport`], [`JobError::Envelope`] or
    ///   [`JobError::InvalidResponse`] on a protocol-level failure
    /// - [`JobError::Failed`] when the job reports `error`
    /// - [`JobError::Cancelled`] when the shutdown signal fires
    pub async fn run_export(
        &self,
        request: &JobRequest,
        sink: &mut dyn ProgressSink,
    ) -> Result<ArtifactHandle, JobError> {
        self.drive(request, sink).await.map(|outcome| outcome.handle)
    }

    /// Same as [`JobDriver::run_export`], also returning poll statistics
    pub async fn drive(
        &self,
        request: &JobRequest,
        sink: &mut dyn ProgressSink,
    ) -> Result<ExportOutcome, JobError> {
        let started = Instant::now();
        let mut state = PollState::new();

        tracing::info!(
            endpoint = %self.transport.describe(),
            account_id = %request.account_id,
            database_id = %request.database_id,
            tables = ?request.tables,
            no_schema = request.no_schema,
            no_data = request.no_data,
            "Starting dump job"
        );

        loop {
            if self.is_cancelled() {
                tracing::warn!(polls = state.polls, "Dump job polling cancelled");
                return Err(JobError::Cancelled);
            }

            let body = DumpRequest::new(request, state.bookmark.as_ref());
            let envelope = self
                .transport
                .poll(&request.account_id, &request.database_id, &body)
                .await?;
            let status = envelope.into_status()?;

            tracing::debug!(
                poll = state.polls + 1,
                status = status.name(),
                terminal = status.is_terminal(),
                messages = status.messages().len(),
                "Dump job status received"
            );

            state = match state.advance(status, sink) {
                PollStep::Continue(next) => next,
                PollStep::Complete { handle, state } => {
                    tracing::info!(
                        polls = state.polls,
                        parts_uploaded = state.parts_uploaded,
                        filename = %handle.filename,
                        "Dump job complete"
                    );
                    return Ok(ExportOutcome {
                        handle,
                        polls: state.polls,
                        parts_uploaded: state.parts_uploaded,
                        duration: started.elapsed(),
                    });
                }
                PollStep::Failed { error, state } => {
                    tracing::error!(polls = state.polls, error = %error, "Dump job failed");
                    return Err(error);
                }
            };

            if !self.poll_interval.is_zero() {
                self.wait_poll_interval().await;
            }
        }
    }

    /// Sleeps for the poll interval, returning early if the shutdown signal fires
    async fn wait_poll_interval(&self) {
        let Some(signal) = self.shutdown_signal.as_ref() else {
            tokio::time::sleep(self.poll_interval).await;
            return;
        };

        let mut signal = signal.clone();
        let stopped = async move {
            let closed = signal.wait_for(|stop| *stop).await.is_err();
            // A dropped sender never signals
            if closed {
                std::future::pending::<()>().await;
            }
        };

        tokio::select! {
            _ = tokio::time::sleep(self.poll_interval) => {}
            _ = stopped => {
                tracing::debug!("Shutdown signalled during poll interval");
            }
        }
    }

    fn is_cancelled(&self) -> bool {
        self.shutdown_signal
            .as_ref()
            .map(|signal| *signal.borrow())
            .unwrap_or(false)
    }
}

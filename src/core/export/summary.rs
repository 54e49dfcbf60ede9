//! Export summary and reporting

use super::driver::ExportOutcome;
use std::path::PathBuf;
use std::time::Duration;

/// Summary of a finished export, from first poll to file on disk
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Filename the server gave the artifact
    pub filename: String,

    /// Where the artifact was written
    pub destination: PathBuf,

    /// Job status requests issued
    pub polls: u64,

    /// Parts the server reported as uploaded
    pub parts_uploaded: u64,

    /// Bytes written to `destination`
    pub bytes_written: u64,

    /// Time spent driving the job
    pub job_duration: Duration,

    /// Time spent downloading the artifact
    pub download_duration: Duration,
}

impl ExportSummary {
    /// Combine a driven job with its download
    pub fn new(outcome: &ExportOutcome, destination: PathBuf, bytes_written: u64) -> Self {
        Self {
            filename: outcome.handle.filename.clone(),
            destination,
            polls: outcome.polls,
            parts_uploaded: outcome.parts_uploaded,
            bytes_written,
            job_duration: outcome.duration,
            download_duration: Duration::from_secs(0),
        }
    }

    /// Set the download duration
    pub fn with_download_duration(mut self, duration: Duration) -> Self {
        self.download_duration = duration;
        self
    }

    /// Total wall time of the export
    pub fn total_duration(&self) -> Duration {
        self.job_duration + self.download_duration
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            filename = %self.filename,
            destination = %self.destination.display(),
            polls = self.polls,
            parts_uploaded = self.parts_uploaded,
            bytes_written = self.bytes_written,
            job_duration_secs = self.job_duration.as_secs_f64(),
            download_duration_secs = self.download_duration.as_secs_f64(),
            "Export completed"
        );
    }

    /// Human readable lines for the console
    pub fn report_lines(&self) -> Vec<String> {
        vec![
            format!("Artifact:       {}", self.filename),
            format!("Written to:     {}", self.destination.display()),
            format!("Bytes written:  {}", format_bytes(self.bytes_written)),
            format!("Parts uploaded: {}", self.parts_uploaded),
            format!("Status polls:   {}", self.polls),
            format!("Duration:       {:.1}s", self.total_duration().as_secs_f64()),
        ]
    }
}

fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KiB", "MiB", "GiB", "TiB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64;
    let mut unit = "B";
    for next in UNITS {
        if value < 1024.0 {
            break;
        }
        value /= 1024.0;
        unit = next;
    }
    format!("{value:.1} {unit} ({bytes} bytes)")
}

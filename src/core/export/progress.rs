//! Progress reporting for dump jobs
//!
//! The server reports finished parts with lines such as `Uploaded part 7`,
//! and may finish parts out of numeric order. Those lines are renumbered by
//! arrival so the operator sees a counter that only ever goes up; every other
//! line is passed through verbatim.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// One progress notification, in the order the driver discovered it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// A part finished uploading; `sequence` counts parts seen so far in this export
    PartUploaded { sequence: u64 },

    /// Any other server line, verbatim
    Message(String),
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressEvent::PartUploaded { sequence } => write!(f, "Uploaded part {sequence}"),
            ProgressEvent::Message(line) => write!(f, "{line}"),
        }
    }
}

/// Receiver of progress events
///
/// Events are delivered synchronously and in order; the sink decides how to
/// display or record them.
pub trait ProgressSink: Send {
    /// Handles one event
    fn emit(&mut self, event: ProgressEvent);
}

impl ProgressSink for Vec<ProgressEvent> {
    fn emit(&mut self, event: ProgressEvent) {
        self.push(event);
    }
}

/// Adapts a closure into a sink
///
/// ```rust
/// use cloud_dump::core::export::{FnProgress, ProgressEvent, ProgressSink};
///
/// let mut seen = 0;
/// let mut sink = FnProgress(|_event: ProgressEvent| seen += 1);
/// sink.emit(ProgressEvent::PartUploaded { sequence: 1 });
/// drop(sink);
/// assert_eq!(seen, 1);
/// ```
pub struct FnProgress<F>(pub F);

impl<F> ProgressSink for FnProgress<F>
where
    F: FnMut(ProgressEvent) + Send,
{
    fn emit(&mut self, event: ProgressEvent) {
        (self.0)(event)
    }
}

/// Sink that forwards every event to `tracing` at info level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn emit(&mut self, event: ProgressEvent) {
        match event {
            ProgressEvent::PartUploaded { sequence } => {
                tracing::info!(part = sequence, "Uploaded part");
            }
            ProgressEvent::Message(line) => {
                tracing::info!(message = %line, "Dump job progress");
            }
        }
    }
}

fn part_uploaded_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^\s*uploaded\s+part\s+#?(\d+)\b")
            .expect("part uploaded pattern is a valid regex")
    })
}

/// Returns the server's part number, as written, if `line` is a "part
/// uploaded" notification
///
/// The number is kept as text and only used for diagnostics; it is never
/// parsed or shown as the sequence, so any digit run matches.
pub fn parse_part_uploaded(line: &str) -> Option<&str> {
    part_uploaded_pattern()
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|number| number.as_str())
}

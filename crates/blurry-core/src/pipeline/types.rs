use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::rename::format_score;

/// What happened to one image of a batch.
#[derive(Clone, Debug, PartialEq)]
pub enum ImageOutcome {
    /// Scored and renamed.
    Scored { score: f64, renamed_to: PathBuf },
    /// Scored, but the scored name was already taken; file left as is.
    ScoredWithCollision { score: f64, blocked_by: PathBuf },
    /// The decoder found no usable pixel data.
    NotAnImage,
    /// Decoded, but the scorer cannot handle it.
    Unsupported { reason: String },
    /// Anything else went wrong.
    Failed { reason: String },
}

impl ImageOutcome {
    pub fn score(&self) -> Option<f64> {
        match self {
            Self::Scored { score, .. } | Self::ScoredWithCollision { score, .. } => Some(*score),
            _ => None,
        }
    }

    /// Text shown after the `-->` of a progress line.
    pub fn message(&self) -> String {
        match self {
            Self::Scored { score, .. } => format_score(*score),
            Self::ScoredWithCollision { score, blocked_by } => format!(
                "{} (cannot rename, {} already exists)",
                format_score(*score),
                display_name(blocked_by)
            ),
            Self::NotAnImage => "skipped, not an image".to_string(),
            Self::Unsupported { reason } => format!("skipped, {reason}"),
            Self::Failed { reason } => {
                format!("sorry, processing stopped because of an error: {reason}")
            }
        }
    }
}

/// File name of `path` for display, falling back to the whole path.
pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Outcome of one image, tied to the path it was dispatched with.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageReport {
    pub path: PathBuf,
    pub outcome: ImageOutcome,
}

/// Result of a scoring batch. `images` follows the input order.
#[derive(Clone, Debug, Default)]
pub struct BatchReport {
    pub images: Vec<ImageReport>,
    pub elapsed: Duration,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.images.len()
    }

    fn count(&self, pred: impl Fn(&ImageOutcome) -> bool) -> usize {
        self.images.iter().filter(|r| pred(&r.outcome)).count()
    }

    pub fn scored(&self) -> usize {
        self.count(|o| matches!(o, ImageOutcome::Scored { .. }))
    }

    pub fn collisions(&self) -> usize {
        self.count(|o| matches!(o, ImageOutcome::ScoredWithCollision { .. }))
    }

    pub fn not_images(&self) -> usize {
        self.count(|o| matches!(o, ImageOutcome::NotAnImage))
    }

    pub fn unsupported(&self) -> usize {
        self.count(|o| matches!(o, ImageOutcome::Unsupported { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, ImageOutcome::Failed { .. }))
    }
}

/// One completed image, as printed while a batch runs.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressLine {
    /// `round(processed / total * 100)`.
    pub percent: u32,
    pub file_name: String,
    pub message: String,
}

impl std::fmt::Display for ProgressLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%  {} --> {}", self.percent, self.file_name, self.message)
    }
}

/// Emitted once, when the last image of a batch has been reported.
#[derive(Clone, Debug, PartialEq)]
pub struct BatchSummary {
    pub total: usize,
    pub elapsed: Duration,
}

impl std::fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Done! {} images processed in {} milliseconds",
            self.total,
            self.elapsed.as_millis()
        )
    }
}

/// Receives progress output from a [`ProgressTracker`](super::ProgressTracker).
///
/// Calls arrive one at a time, in completion order, from whichever worker
/// finished the image.
pub trait ProgressSink: Send + Sync {
    fn file_done(&self, line: &ProgressLine);

    fn batch_done(&self, summary: &BatchSummary);
}

/// Prints progress to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl ProgressSink for StdoutSink {
    fn file_done(&self, line: &ProgressLine) {
        println!("{line}");
    }

    fn batch_done(&self, summary: &BatchSummary) {
        println!("{summary}");
    }
}

/// Sink that drops everything, for callers that only want the [`BatchReport`].
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpSink;

impl ProgressSink for NoOpSink {
    fn file_done(&self, _line: &ProgressLine) {}

    fn batch_done(&self, _summary: &BatchSummary) {}
}

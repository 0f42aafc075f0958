use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use tracing::warn;

use super::types::{display_name, BatchSummary, ImageOutcome, ProgressLine, ProgressSink};

/// Fan-in point for the outcomes of one batch.
///
/// Every report increments the processed count, emits one progress line and,
/// for the report that completes the batch, the summary, all under a single
/// lock. N reports from any number of threads therefore produce exactly N
/// lines and one summary. Reports past `total` are logged and dropped.
pub struct ProgressTracker {
    total: usize,
    start: Instant,
    processed: Mutex<usize>,
    sink: Arc<dyn ProgressSink>,
}

impl ProgressTracker {
    /// Start tracking a batch of `total` images. An empty batch is complete
    /// immediately, so its summary is emitted here.
    pub fn new(total: usize, sink: Arc<dyn ProgressSink>) -> Self {
        let tracker = Self {
            total,
            start: Instant::now(),
            processed: Mutex::new(0),
            sink,
        };
        if total == 0 {
            tracker.sink.batch_done(&BatchSummary {
                total: 0,
                elapsed: tracker.start.elapsed(),
            });
        }
        tracker
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_finished(&self) -> bool {
        *self.lock() == self.total
    }

    pub fn scored(&self, file: &Path, score: f64, renamed_to: &Path) {
        self.report(
            file,
            &ImageOutcome::Scored {
                score,
                renamed_to: renamed_to.to_path_buf(),
            },
        );
    }

    pub fn scored_with_collision(&self, file: &Path, score: f64, blocked_by: &Path) {
        self.report(
            file,
            &ImageOutcome::ScoredWithCollision {
                score,
                blocked_by: blocked_by.to_path_buf(),
            },
        );
    }

    pub fn skipped_not_image(&self, file: &Path) {
        self.report(file, &ImageOutcome::NotAnImage);
    }

    pub fn skipped_unsupported(&self, file: &Path, reason: &str) {
        self.report(
            file,
            &ImageOutcome::Unsupported {
                reason: reason.to_string(),
            },
        );
    }

    pub fn failed(&self, file: &Path, reason: &str) {
        self.report(
            file,
            &ImageOutcome::Failed {
                reason: reason.to_string(),
            },
        );
    }

    /// Record the outcome of `file`.
    pub fn report(&self, file: &Path, outcome: &ImageOutcome) {
        let mut processed = self.lock();
        if *processed >= self.total {
            warn!(
                file = %file.display(),
                total = self.total,
                "Report after batch completion ignored"
            );
            return;
        }

        *processed += 1;
        let percent = ((*processed as f64 / self.total as f64) * 100.0).round() as u32;
        self.sink.file_done(&ProgressLine {
            percent,
            file_name: display_name(file),
            message: outcome.message(),
        });

        if *processed == self.total {
            self.sink.batch_done(&BatchSummary {
                total: self.total,
                elapsed: self.start.elapsed(),
            });
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, usize> {
        self.processed.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for ProgressTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressTracker")
            .field("total", &self.total)
            .field("processed", &*self.lock())
            .finish()
    }
}

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::error::{BlurryError, Result};
use crate::io::decode::ImageDecoder;
use crate::quality::contrast::ContrastScorer;
use crate::rename::apply_score;

use super::config::SampleCoverage;
use super::progress::ProgressTracker;
use super::types::{BatchReport, ImageOutcome, ImageReport, ProgressSink};

/// Scores a list of images in parallel and renames each one with its score.
///
/// One task per image runs on a dedicated rayon pool: decode, score, rename,
/// report. A task never fails the batch; whatever happens ends up as an
/// [`ImageOutcome`]. [`BatchPipeline::run`] blocks until every task is done,
/// with no timeout.
pub struct BatchPipeline {
    scorer: ContrastScorer,
    decoder: Arc<dyn ImageDecoder>,
    threads: Option<usize>,
}

impl BatchPipeline {
    /// Build a pipeline around `decoder`. Computes the luminance table.
    pub fn new(decoder: Arc<dyn ImageDecoder>) -> Self {
        Self::with_scorer(ContrastScorer::new(), decoder)
    }

    /// Build a pipeline that reuses an existing scorer and its table.
    pub fn with_scorer(scorer: ContrastScorer, decoder: Arc<dyn ImageDecoder>) -> Self {
        Self {
            scorer,
            decoder,
            threads: None,
        }
    }

    /// Bound the worker pool. Values below one are raised to one.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads.max(1));
        self
    }

    pub fn scorer(&self) -> &ContrastScorer {
        &self.scorer
    }

    fn thread_count(&self) -> usize {
        self.threads.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }

    /// Process every image and return their outcomes in input order.
    ///
    /// Progress goes to `sink` as images complete. Only building the thread
    /// pool can fail.
    pub fn run(
        &self,
        images: &[PathBuf],
        coverage: SampleCoverage,
        sink: Arc<dyn ProgressSink>,
    ) -> Result<BatchReport> {
        let start = Instant::now();
        let tracker = ProgressTracker::new(images.len(), sink);

        if images.is_empty() {
            info!("No images to process");
            return Ok(BatchReport {
                images: Vec::new(),
                elapsed: start.elapsed(),
            });
        }

        let threads = self.thread_count();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("blurry-worker-{i}"))
            .build()
            .map_err(|e| BlurryError::ThreadPool(e.to_string()))?;

        info!(
            images = images.len(),
            threads,
            coverage = coverage.value(),
            "Starting batch"
        );

        let reports: Vec<ImageReport> = pool.install(|| {
            images
                .par_iter()
                .map(|path| {
                    let outcome = self.process_guarded(path, coverage);
                    tracker.report(path, &outcome);
                    ImageReport {
                        path: path.clone(),
                        outcome,
                    }
                })
                .collect()
        });

        let report = BatchReport {
            images: reports,
            elapsed: start.elapsed(),
        };
        info!(
            scored = report.scored(),
            collisions = report.collisions(),
            not_images = report.not_images(),
            unsupported = report.unsupported(),
            failed = report.failed(),
            elapsed_ms = report.elapsed.as_millis() as u64,
            "Batch complete"
        );
        Ok(report)
    }

    /// [`process_image`](Self::process_image), with panics turned into
    /// [`ImageOutcome::Failed`].
    fn process_guarded(&self, path: &Path, coverage: SampleCoverage) -> ImageOutcome {
        panic::catch_unwind(AssertUnwindSafe(|| self.process_image(path, coverage)))
            .unwrap_or_else(|payload| {
                let reason = panic_message(payload.as_ref());
                warn!(path = %path.display(), %reason, "Worker panicked");
                ImageOutcome::Failed { reason }
            })
    }

    /// Decode, score and rename a single image.
    pub fn process_image(&self, path: &Path, coverage: SampleCoverage) -> ImageOutcome {
        let pixels = match self.decoder.decode(path) {
            Ok(Some(pixels)) => pixels,
            Ok(None) => {
                debug!(path = %path.display(), "No image data");
                return ImageOutcome::NotAnImage;
            }
            Err(e) => return failed(path, e),
        };

        let score = match self.scorer.score(&pixels, coverage) {
            Ok(score) => score,
            Err(e @ BlurryError::UnsupportedFormat(_)) => {
                debug!(path = %path.display(), error = %e, "Skipping");
                return ImageOutcome::Unsupported {
                    reason: "image type not supported".to_string(),
                };
            }
            Err(e @ BlurryError::DegenerateDimensions { .. }) => {
                debug!(path = %path.display(), error = %e, "Skipping");
                return ImageOutcome::Unsupported {
                    reason: "image too small to score".to_string(),
                };
            }
            Err(e) => return failed(path, e),
        };
        drop(pixels);
        debug!(path = %path.display(), score, "Scored");

        match apply_score(path, score) {
            Ok(renamed_to) => ImageOutcome::Scored { score, renamed_to },
            Err(BlurryError::Collision { attempted }) => {
                warn!(
                    path = %path.display(),
                    target = %attempted.display(),
                    "Cannot rename, target exists"
                );
                ImageOutcome::ScoredWithCollision {
                    score,
                    blocked_by: attempted,
                }
            }
            Err(e) => failed(path, e),
        }
    }
}

fn failed(path: &Path, error: BlurryError) -> ImageOutcome {
    warn!(path = %path.display(), %error, "Processing failed");
    ImageOutcome::Failed {
        reason: error.to_string(),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "worker panicked".to_string()
    }
}

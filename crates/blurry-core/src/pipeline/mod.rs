pub mod config;
mod orchestrator;
mod progress;
mod restore;
mod types;

pub use config::{BatchConfig, SampleCoverage};
pub use orchestrator::BatchPipeline;
pub use progress::ProgressTracker;
pub use restore::{restore, RestoreReport};
pub use types::{
    BatchReport, BatchSummary, ImageOutcome, ImageReport, NoOpSink, ProgressLine, ProgressSink,
    StdoutSink,
};

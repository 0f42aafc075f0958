use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use blurry_core::io::{collect_images, ExtensionClassifier, RustDecoder};
use blurry_core::pipeline::{
    BatchConfig, BatchPipeline, BatchSummary, ProgressLine, ProgressSink, SampleCoverage,
};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use crate::summary;

#[derive(Args)]
pub struct ScoreArgs {
    /// Image files or directories
    pub paths: Vec<PathBuf>,

    /// Also process the images in the current directory
    #[arg(short, long)]
    pub cur_dir: bool,

    /// Fraction of rows and columns to scan; must be >0 and <=1 (default 0.01)
    #[arg(short, long)]
    pub sample_coverage: Option<SampleCoverage>,

    /// Worker threads (defaults to all cores)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Descend into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Batch config file (TOML); flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Prints each finished image above the bar and advances it.
struct BarSink {
    pb: ProgressBar,
}

impl ProgressSink for BarSink {
    fn file_done(&self, line: &ProgressLine) {
        self.pb.println(line.to_string());
        self.pb.inc(1);
    }

    fn batch_done(&self, summary: &BatchSummary) {
        self.pb.finish_and_clear();
        println!("{summary}");
    }
}

pub fn run(args: &ScoreArgs) -> Result<()> {
    let config = build_config(args)?;
    let inputs = super::input_paths(&args.paths, args.cur_dir)?;
    debug!(?config, "Resolved batch config");

    summary::print_banner();
    summary::print_score_settings(&config, &inputs);

    println!("Looking for cool pictures...");
    let images = collect_images(&inputs, &ExtensionClassifier, config.recursive)?;
    if images.is_empty() {
        println!("Sorry, no images found.");
        return Ok(());
    }
    println!(
        "Great! Blurry found {} images! Starting processing...",
        images.len()
    );

    let pipeline = BatchPipeline::new(Arc::new(RustDecoder::new()))
        .with_threads(config.effective_threads());

    let pb = ProgressBar::new(images.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    pb.set_message("Scoring");

    let report = pipeline.run(
        &images,
        config.sample_coverage,
        Arc::new(BarSink { pb }),
    )?;

    summary::print_batch_report(&report);
    Ok(())
}

fn build_config(args: &ScoreArgs) -> Result<BatchConfig> {
    let mut config = match args.config {
        Some(ref path) => super::config::load(path)?,
        None => BatchConfig::default(),
    };
    if let Some(coverage) = args.sample_coverage {
        config.sample_coverage = coverage;
    }
    if args.threads.is_some() {
        config.threads = args.threads;
    }
    config.recursive |= args.recursive;
    Ok(config)
}

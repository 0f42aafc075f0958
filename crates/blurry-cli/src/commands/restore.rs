use std::path::{Path, PathBuf};

use anyhow::Result;
use blurry_core::io::{collect_images, ExtensionClassifier};
use blurry_core::pipeline::restore;
use clap::Args;
use tracing::debug;

use crate::summary;

#[derive(Args)]
pub struct RestoreArgs {
    /// Scored files or directories
    pub paths: Vec<PathBuf>,

    /// Also restore the files in the current directory
    #[arg(short, long)]
    pub cur_dir: bool,

    /// Descend into subdirectories
    #[arg(short, long)]
    pub recursive: bool,
}

pub fn run(args: &RestoreArgs) -> Result<()> {
    let inputs = super::input_paths(&args.paths, args.cur_dir)?;

    summary::print_banner();
    println!("Looking for cool pictures...");
    let files = collect_images(&inputs, &ExtensionClassifier, args.recursive)?;
    debug!(files = files.len(), "Checking file names");
    let report = restore(&files);

    for (from, to) in &report.collisions {
        println!(
            "Cannot rename file {}: {} already exists.",
            name(from),
            name(to)
        );
    }
    for (path, reason) in &report.failures {
        summary::print_failure(path, reason);
    }

    if report.restored.is_empty() {
        println!("No image matched the Blurry filename pattern, nothing to restore.");
    } else {
        println!(
            "{} images successfully restored to their original names!",
            report.restored.len()
        );
    }
    Ok(())
}

fn name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

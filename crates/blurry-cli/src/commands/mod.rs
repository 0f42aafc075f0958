pub mod config;
pub mod restore;
pub mod score;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// Positional paths, plus the working directory when `cur_dir` is set.
pub fn input_paths(paths: &[PathBuf], cur_dir: bool) -> Result<Vec<PathBuf>> {
    let mut inputs = paths.to_vec();
    if cur_dir {
        let cwd = std::env::current_dir().context("Cannot read the current directory")?;
        inputs.push(cwd);
    }
    if inputs.is_empty() {
        bail!("No input given: pass files or directories, or use --cur-dir");
    }
    Ok(inputs)
}

//! Score suffixes in file names.
//!
//! A scored file is named `<stem> __<score>.<ext>`, with the score written to
//! four decimal places:
//!
//! ```text
//! IMG_0042.jpg  →  IMG_0042 __0.0731.jpg
//! ```
//!
//! The extension is everything after the last `.` of the file name. A name
//! with no `.` at all gets an empty extension, so scoring it leaves a trailing
//! dot (`notes` → `notes __0.0731.`) and restoring drops it again.
//!
//! Renames never overwrite: when the target name is taken the operation fails
//! with [`BlurryError::Collision`] and the file stays where it is.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::consts::{SCORE_DECIMALS, SCORE_MARKER};
use crate::error::{BlurryError, Result};

/// A file name carrying a score suffix, split into its parts.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredName<'a> {
    /// Original stem, without the marker.
    pub stem: &'a str,
    /// Digits and dots after the marker, as written.
    pub score: &'a str,
    /// Extension after the last `.`; `None` when the name has no dot.
    pub extension: Option<&'a str>,
}

impl ScoredName<'_> {
    /// The file name before the score was added.
    pub fn original_file_name(&self) -> String {
        join_name(self.stem, self.extension.filter(|ext| !ext.is_empty()))
    }
}

/// Split a file name at its last `.`.
fn split_extension(file_name: &str) -> (&str, Option<&str>) {
    match file_name.rfind('.') {
        Some(dot) => (&file_name[..dot], Some(&file_name[dot + 1..])),
        None => (file_name, None),
    }
}

fn join_name(stem: &str, extension: Option<&str>) -> String {
    match extension {
        Some(ext) => format!("{stem}.{ext}"),
        None => stem.to_string(),
    }
}

fn file_name_str(path: &Path) -> Result<&str> {
    let name = path
        .file_name()
        .ok_or_else(|| BlurryError::NoFileName(path.to_path_buf()))?;
    name.to_str()
        .ok_or_else(|| BlurryError::NonUtf8FileName(path.to_path_buf()))
}

/// Format a score the way it appears in file names.
pub fn format_score(score: f64) -> String {
    format!("{score:.prec$}", prec = SCORE_DECIMALS)
}

/// Recognize `<stem> __<digits and dots>[.<ext>]`.
///
/// The marker must be preceded by at least one character and followed by a
/// non-empty run of ASCII digits and `.` that reaches the extension boundary.
pub fn parse_scored_name(file_name: &str) -> Option<ScoredName<'_>> {
    let (base, extension) = split_extension(file_name);
    let marker = base.rfind(SCORE_MARKER)?;
    if marker == 0 {
        return None;
    }
    let score = &base[marker + SCORE_MARKER.len()..];
    if score.is_empty() || !score.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        return None;
    }
    Some(ScoredName {
        stem: &base[..marker],
        score,
        extension,
    })
}

/// Path the file at `path` would have after scoring. Pure, no filesystem
/// access.
///
/// Fails with [`BlurryError::EmptyStem`] for names like `.jpg`: the scored
/// name would start with the marker and could not be restored.
pub fn scored_path(path: &Path, score: f64) -> Result<PathBuf> {
    let (stem, extension) = split_extension(file_name_str(path)?);
    if stem.is_empty() {
        return Err(BlurryError::EmptyStem(path.to_path_buf()));
    }
    let name = format!(
        "{stem}{SCORE_MARKER}{}.{}",
        format_score(score),
        extension.unwrap_or("")
    );
    Ok(path.with_file_name(name))
}

/// Path the file at `path` would have once its score suffix is removed, or
/// `None` if the name carries no suffix. Pure, no filesystem access.
pub fn restored_path(path: &Path) -> Option<PathBuf> {
    let name = path.file_name()?.to_str()?;
    let parsed = parse_scored_name(name)?;
    Some(path.with_file_name(parsed.original_file_name()))
}

/// Rename `path` so its name carries `score`. Returns the new path.
pub fn apply_score(path: &Path, score: f64) -> Result<PathBuf> {
    let target = scored_path(path, score)?;
    rename_no_clobber(path, &target)?;
    Ok(target)
}

/// Remove a score suffix from the name of `path`.
///
/// Returns `Ok(false)` without touching the filesystem when the name has no
/// suffix, `Ok(true)` once renamed.
pub fn strip_score(path: &Path) -> Result<bool> {
    let Some(target) = restored_path(path) else {
        return Ok(false);
    };
    rename_no_clobber(path, &target)?;
    Ok(true)
}

fn rename_no_clobber(from: &Path, to: &Path) -> Result<()> {
    if to.exists() {
        return Err(BlurryError::Collision {
            attempted: to.to_path_buf(),
        });
    }
    std::fs::rename(from, to)?;
    debug!(from = %from.display(), to = %to.display(), "Renamed");
    Ok(())
}

use std::path::PathBuf;

use tracing::{info, warn};

use crate::error::BlurryError;
use crate::rename::{restored_path, strip_score};

/// Result of removing score suffixes from a list of files.
#[derive(Clone, Debug, Default)]
pub struct RestoreReport {
    /// `(scored path, restored path)` for every renamed file.
    pub restored: Vec<(PathBuf, PathBuf)>,
    /// `(scored path, existing path that blocked the rename)`.
    pub collisions: Vec<(PathBuf, PathBuf)>,
    pub failures: Vec<(PathBuf, String)>,
    /// Files whose name carries no score suffix.
    pub unmatched: usize,
}

/// Strip the score suffix from every path, one file at a time.
///
/// Collisions and I/O errors are recorded and the loop moves on.
pub fn restore(paths: &[PathBuf]) -> RestoreReport {
    let mut report = RestoreReport::default();

    for path in paths {
        let Some(target) = restored_path(path) else {
            report.unmatched += 1;
            continue;
        };
        match strip_score(path) {
            Ok(true) => report.restored.push((path.clone(), target)),
            Ok(false) => report.unmatched += 1,
            Err(BlurryError::Collision { attempted }) => {
                warn!(
                    path = %path.display(),
                    target = %attempted.display(),
                    "Cannot restore, target exists"
                );
                report.collisions.push((path.clone(), attempted));
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Restore failed");
                report.failures.push((path.clone(), e.to_string()));
            }
        }
    }

    info!(
        restored = report.restored.len(),
        collisions = report.collisions.len(),
        unmatched = report.unmatched,
        "Restore complete"
    );
    report
}

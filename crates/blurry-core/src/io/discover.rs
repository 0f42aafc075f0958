use std::collections::HashSet;
use std::path::{Path, PathBuf};

use image::ImageFormat;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::Result;

/// Decides whether a path looks like an image before any decoding happens.
pub trait ImageClassifier: Send + Sync {
    fn is_image(&self, path: &Path) -> bool;
}

/// Classifies by file extension, using the formats the `image` crate knows.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExtensionClassifier;

impl ImageClassifier for ExtensionClassifier {
    fn is_image(&self, path: &Path) -> bool {
        ImageFormat::from_path(path).is_ok()
    }
}

/// Resolve input paths into a flat list of image files.
///
/// Directories contribute their image children, sorted by name (direct
/// children only unless `recursive`). Files are kept when they exist and
/// classify as images. Missing paths are skipped with a warning. The result
/// holds each path once, in first-seen order.
///
/// Fails only when a directory given as input cannot be read.
pub fn collect_images(
    paths: &[PathBuf],
    classifier: &dyn ImageClassifier,
    recursive: bool,
) -> Result<Vec<PathBuf>> {
    let mut seen = HashSet::new();
    let mut images = Vec::new();
    let mut push = |path: PathBuf| {
        if seen.insert(path.clone()) {
            images.push(path);
        }
    };

    for path in paths {
        if path.is_dir() {
            let max_depth = if recursive { usize::MAX } else { 1 };
            let walker = WalkDir::new(path)
                .min_depth(1)
                .max_depth(max_depth)
                .sort_by_file_name();
            for entry in walker {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(err) if err.depth() == 0 => return Err(err.into()),
                    Err(err) => {
                        warn!(error = %err, "Skipping unreadable entry");
                        continue;
                    }
                };
                if entry.file_type().is_file() && classifier.is_image(entry.path()) {
                    push(entry.into_path());
                }
            }
        } else if path.is_file() {
            if classifier.is_image(path) {
                push(path.clone());
            } else {
                debug!(path = %path.display(), "Not an image, ignored");
            }
        } else {
            warn!(path = %path.display(), "Path does not exist, ignored");
        }
    }

    Ok(images)
}

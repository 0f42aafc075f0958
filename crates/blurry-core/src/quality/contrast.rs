use std::sync::Arc;

use crate::consts::{BGR_BYTES_PER_PIXEL, FALLBACK_STRIPE_COUNT};
use crate::error::{BlurryError, Result};
use crate::pipeline::config::SampleCoverage;
use crate::pixels::{PixelBuffer, PixelLayout};

use super::luminance::LuminanceTable;

/// Which lines of one axis get scanned.
///
/// The axis is cut into `count` equal stripes of `size` lines; the center line
/// of each stripe is sampled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StripePlan {
    pub count: usize,
    pub size: usize,
}

impl StripePlan {
    /// Plan the stripes for an axis of `extent` lines.
    ///
    /// `count = floor(extent * coverage)`; when that is zero, one stripe per
    /// line up to [`FALLBACK_STRIPE_COUNT`].
    pub fn new(extent: usize, coverage: SampleCoverage) -> Self {
        let mut count = (extent as f32 * coverage.value()) as usize;
        if count == 0 {
            count = extent.min(FALLBACK_STRIPE_COUNT);
        }
        let size = if count == 0 { 0 } else { extent / count };
        Self { count, size }
    }

    /// Index of the line sampled for stripe `i`.
    pub fn center(&self, i: usize) -> usize {
        i * self.size + self.size / 2
    }

    pub fn centers(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.count).map(|i| self.center(i))
    }
}

/// Sum of absolute luminance differences between consecutive pixels of one
/// line. `step` is the byte distance between pixels, `len` the pixel count.
fn line_contrast_sum(
    table: &LuminanceTable,
    bytes: &[u8],
    start: usize,
    step: usize,
    len: usize,
) -> f64 {
    let mut prev = table.lookup_bgr(bytes, start);
    let mut sum = 0.0f64;
    for k in 1..len {
        let cur = table.lookup_bgr(bytes, start + k * step);
        sum += (cur - prev).abs();
        prev = cur;
    }
    sum
}

/// Contrast score of a BGR image: mean absolute luminance difference between
/// neighbouring pixels along the sampled rows and columns.
///
/// 0 for a flat image, 1 for a black/white checkerboard.
pub fn contrast_score(
    table: &LuminanceTable,
    pixels: &PixelBuffer,
    coverage: SampleCoverage,
) -> Result<f64> {
    if pixels.layout != PixelLayout::Bgr8 {
        return Err(BlurryError::UnsupportedFormat(pixels.layout));
    }

    let w = pixels.width();
    let h = pixels.height();
    if w == 0 || h == 0 {
        return Err(BlurryError::DegenerateDimensions {
            width: pixels.width,
            height: pixels.height,
        });
    }

    let expected = pixels.expected_bgr_len();
    if pixels.data.len() < expected {
        return Err(BlurryError::BufferTooShort {
            expected,
            actual: pixels.data.len(),
        });
    }

    let rows = StripePlan::new(h, coverage);
    let cols = StripePlan::new(w, coverage);

    // The first pixel of every scanned line has no predecessor.
    let count = rows.count * (w - 1) + cols.count * (h - 1);
    if count == 0 {
        return Err(BlurryError::DegenerateDimensions {
            width: pixels.width,
            height: pixels.height,
        });
    }

    let stride = w * BGR_BYTES_PER_PIXEL;
    let mut sum = 0.0f64;

    for y in rows.centers() {
        sum += line_contrast_sum(table, &pixels.data, y * stride, BGR_BYTES_PER_PIXEL, w);
    }
    for x in cols.centers() {
        sum += line_contrast_sum(table, &pixels.data, x * BGR_BYTES_PER_PIXEL, stride, h);
    }

    Ok(sum / count as f64)
}

/// Scores images against one shared luminance table.
#[derive(Clone, Debug)]
pub struct ContrastScorer {
    table: Arc<LuminanceTable>,
}

impl ContrastScorer {
    /// Build a scorer with a freshly computed table.
    pub fn new() -> Self {
        Self::with_table(Arc::new(LuminanceTable::new()))
    }

    pub fn with_table(table: Arc<LuminanceTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &Arc<LuminanceTable> {
        &self.table
    }

    pub fn score(&self, pixels: &PixelBuffer, coverage: SampleCoverage) -> Result<f64> {
        contrast_score(&self.table, pixels, coverage)
    }
}

impl Default for ContrastScorer {
    fn default() -> Self {
        Self::new()
    }
}

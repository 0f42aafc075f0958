use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use blurry_core::error::{BlurryError, Result};
use blurry_core::io::ImageDecoder;
use blurry_core::pipeline::{BatchSummary, ProgressLine, ProgressSink};
use blurry_core::pixels::PixelBuffer;
use blurry_core::quality::{ContrastScorer, LuminanceTable};
use image::{Rgb, RgbImage};

pub const TEST_IMAGE_SIZE: u32 = 50;
pub const BLACK: [u8; 3] = [0, 0, 0];
pub const WHITE: [u8; 3] = [255, 255, 255];

/// One luminance table per test binary; building it takes 128 MiB.
pub fn table() -> Arc<LuminanceTable> {
    static TABLE: OnceLock<Arc<LuminanceTable>> = OnceLock::new();
    TABLE.get_or_init(|| Arc::new(LuminanceTable::new())).clone()
}

pub fn scorer() -> ContrastScorer {
    ContrastScorer::with_table(table())
}

/// Build a BGR buffer; `color(x, y)` returns the pixel as (b, g, r).
pub fn bgr_image(width: u32, height: u32, color: impl Fn(u32, u32) -> [u8; 3]) -> PixelBuffer {
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            data.extend_from_slice(&color(x, y));
        }
    }
    PixelBuffer::bgr(data, width, height)
}

pub fn flat(_x: u32, _y: u32) -> [u8; 3] {
    BLACK
}

pub fn checkerboard(x: u32, y: u32) -> [u8; 3] {
    if (x + y) % 2 == 0 {
        BLACK
    } else {
        WHITE
    }
}

pub fn vertical_zebra(x: u32, _y: u32) -> [u8; 3] {
    if x % 2 == 0 {
        BLACK
    } else {
        WHITE
    }
}

pub fn horizontal_zebra(_x: u32, y: u32) -> [u8; 3] {
    if y % 2 == 0 {
        BLACK
    } else {
        WHITE
    }
}

/// Write an 8-bit RGB image; the format follows the extension.
pub fn write_rgb(path: &Path, width: u32, height: u32, color: impl Fn(u32, u32) -> [u8; 3]) {
    let img = RgbImage::from_fn(width, height, |x, y| Rgb(color(x, y)));
    img.save(path).expect("write test image");
}

/// Collects everything a tracker emits.
#[derive(Default)]
pub struct RecordingSink {
    pub lines: Mutex<Vec<ProgressLine>>,
    pub summaries: Mutex<Vec<BatchSummary>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn lines(&self) -> Vec<ProgressLine> {
        self.lines.lock().unwrap().clone()
    }

    pub fn summaries(&self) -> Vec<BatchSummary> {
        self.summaries.lock().unwrap().clone()
    }
}

impl ProgressSink for RecordingSink {
    fn file_done(&self, line: &ProgressLine) {
        self.lines.lock().unwrap().push(line.clone());
    }

    fn batch_done(&self, summary: &BatchSummary) {
        self.summaries.lock().unwrap().push(summary.clone());
    }
}

/// Decoder that serves in-memory buffers keyed by file name, without reading
/// the file. Names ending in `panic` panic; names ending in `broken` fail.
#[derive(Default)]
pub struct FakeDecoder {
    pub images: Vec<(String, PixelBuffer)>,
}

impl FakeDecoder {
    pub fn with(mut self, name: &str, pixels: PixelBuffer) -> Self {
        self.images.push((name.to_string(), pixels));
        self
    }
}

impl ImageDecoder for FakeDecoder {
    fn decode(&self, path: &Path) -> Result<Option<PixelBuffer>> {
        let name = path.file_name().unwrap().to_string_lossy();
        if name.ends_with("panic") {
            panic!("decoder exploded on {name}");
        }
        if name.ends_with("broken") {
            return Err(BlurryError::Io(std::io::Error::other("truncated file")));
        }
        Ok(self
            .images
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, pixels)| pixels.clone()))
    }
}

/// Create an empty file for each name and return the paths.
pub fn touch_all(dir: &Path, names: &[&str]) -> Vec<PathBuf> {
    names
        .iter()
        .map(|name| {
            let path = dir.join(name);
            std::fs::write(&path, b"").expect("create file");
            path
        })
        .collect()
}

use std::path::PathBuf;

use thiserror::Error;

use crate::pixels::PixelLayout;

#[derive(Error, Debug)]
pub enum BlurryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Unsupported pixel layout: {0}")]
    UnsupportedFormat(PixelLayout),

    #[error("Pixel buffer too short: expected {expected} bytes, got {actual}")]
    BufferTooShort { expected: usize, actual: usize },

    #[error("Image too small to score: {width}x{height}")]
    DegenerateDimensions { width: u32, height: u32 },

    #[error("Sample coverage must be > 0 and <= 1, got {0}")]
    InvalidSampleCoverage(f32),

    #[error("Cannot rename: {} already exists", attempted.display())]
    Collision { attempted: PathBuf },

    #[error("Path has no file name: {}", .0.display())]
    NoFileName(PathBuf),

    #[error("File name is not valid UTF-8: {}", .0.display())]
    NonUtf8FileName(PathBuf),

    #[error("File name has nothing before its extension: {}", .0.display())]
    EmptyStem(PathBuf),

    #[error("Thread pool error: {0}")]
    ThreadPool(String),

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

pub type Result<T> = std::result::Result<T, BlurryError>;

use std::path::Path;

use image::{DynamicImage, ImageError, ImageReader};

use crate::error::Result;
use crate::pixels::{PixelBuffer, PixelLayout};

/// Turns a file into raw pixels.
///
/// `Ok(None)` means the file holds no image data the decoder understands; the
/// pipeline reports it as "not an image" rather than as a failure.
pub trait ImageDecoder: Send + Sync {
    fn decode(&self, path: &Path) -> Result<Option<PixelBuffer>>;
}

/// Decoder backed by the `image` crate.
///
/// The format is guessed from the file contents first, then the extension.
/// 8-bit RGB images are converted to the scorable BGR layout; everything else
/// keeps its own layout.
#[derive(Debug, Default, Clone, Copy)]
pub struct RustDecoder;

impl RustDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl ImageDecoder for RustDecoder {
    fn decode(&self, path: &Path) -> Result<Option<PixelBuffer>> {
        let reader = ImageReader::open(path)?.with_guessed_format()?;
        match reader.decode() {
            Ok(img) => Ok(Some(to_pixel_buffer(img))),
            Err(ImageError::Unsupported(_)) => Ok(None),
            // Read failures surface as BlurryError::Io, not as a format error.
            Err(ImageError::IoError(e)) => Err(e.into()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Map a decoded image onto a [`PixelBuffer`].
pub fn to_pixel_buffer(img: DynamicImage) -> PixelBuffer {
    let (width, height) = (img.width(), img.height());
    match img {
        DynamicImage::ImageRgb8(buf) => PixelBuffer::from_rgb(buf.into_raw(), width, height),
        DynamicImage::ImageRgba8(buf) => {
            PixelBuffer::new(buf.into_raw(), width, height, PixelLayout::Rgba8)
        }
        DynamicImage::ImageLuma8(buf) => {
            PixelBuffer::new(buf.into_raw(), width, height, PixelLayout::Luma8)
        }
        DynamicImage::ImageLumaA8(buf) => {
            PixelBuffer::new(buf.into_raw(), width, height, PixelLayout::LumaA8)
        }
        other => PixelBuffer::new(other.as_bytes().to_vec(), width, height, PixelLayout::Wide),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage};

    #[test]
    fn rgb_becomes_bgr() {
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(0, 0, Rgb([10, 20, 30]));
        img.put_pixel(1, 0, Rgb([40, 50, 60]));
        let buf = to_pixel_buffer(DynamicImage::ImageRgb8(img));
        assert_eq!(buf.layout, PixelLayout::Bgr8);
        assert_eq!((buf.width, buf.height), (2, 1));
        assert_eq!(buf.data, vec![30, 20, 10, 60, 50, 40]);
    }

    #[test]
    fn gray_keeps_its_layout() {
        let img = GrayImage::from_pixel(3, 3, Luma([7]));
        let buf = to_pixel_buffer(DynamicImage::ImageLuma8(img));
        assert_eq!(buf.layout, PixelLayout::Luma8);
        assert_eq!(buf.data.len(), 9);
    }

    #[test]
    fn sixteen_bit_is_wide() {
        let img = DynamicImage::new_rgb16(2, 2);
        let buf = to_pixel_buffer(img);
        assert_eq!(buf.layout, PixelLayout::Wide);
    }
}

use crate::consts::BGR_BYTES_PER_PIXEL;

/// Byte layout of a decoded image.
///
/// Only [`PixelLayout::Bgr8`] can be scored. The other variants describe what a
/// decoder produced so the caller can report why an image was skipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelLayout {
    /// 3 bytes per pixel, interleaved B, G, R, row-major.
    Bgr8,
    Rgb8,
    Rgba8,
    Luma8,
    LumaA8,
    /// Anything with more than 8 bits per channel.
    Wide,
}

impl std::fmt::Display for PixelLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bgr8 => write!(f, "8-bit BGR"),
            Self::Rgb8 => write!(f, "8-bit RGB"),
            Self::Rgba8 => write!(f, "8-bit RGBA"),
            Self::Luma8 => write!(f, "8-bit grayscale"),
            Self::LumaA8 => write!(f, "8-bit grayscale with alpha"),
            Self::Wide => write!(f, "high bit depth"),
        }
    }
}

/// Raw bytes of one decoded image.
///
/// Row stride is `width * bytes_per_pixel`; for [`PixelLayout::Bgr8`] that is
/// `width * 3`.
#[derive(Clone, Debug)]
pub struct PixelBuffer {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub layout: PixelLayout,
}

impl PixelBuffer {
    pub fn new(data: Vec<u8>, width: u32, height: u32, layout: PixelLayout) -> Self {
        Self {
            data,
            width,
            height,
            layout,
        }
    }

    /// Wrap an interleaved BGR buffer.
    pub fn bgr(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self::new(data, width, height, PixelLayout::Bgr8)
    }

    /// Build a BGR buffer from an interleaved RGB one by swapping the red and
    /// blue bytes of every pixel in place.
    pub fn from_rgb(mut data: Vec<u8>, width: u32, height: u32) -> Self {
        for pixel in data.chunks_exact_mut(BGR_BYTES_PER_PIXEL) {
            pixel.swap(0, 2);
        }
        Self::bgr(data, width, height)
    }

    pub fn width(&self) -> usize {
        self.width as usize
    }

    pub fn height(&self) -> usize {
        self.height as usize
    }

    /// Minimum byte length a BGR buffer of these dimensions needs.
    pub fn expected_bgr_len(&self) -> usize {
        self.width() * self.height() * BGR_BYTES_PER_PIXEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rgb_swaps_red_and_blue() {
        let buf = PixelBuffer::from_rgb(vec![1, 2, 3, 10, 20, 30], 2, 1);
        assert_eq!(buf.layout, PixelLayout::Bgr8);
        assert_eq!(buf.data, vec![3, 2, 1, 30, 20, 10]);
    }

    #[test]
    fn expected_len_is_three_bytes_per_pixel() {
        let buf = PixelBuffer::bgr(Vec::new(), 4, 5);
        assert_eq!(buf.expected_bgr_len(), 60);
    }

    #[test]
    fn layout_display() {
        assert_eq!(format!("{}", PixelLayout::Bgr8), "8-bit BGR");
        assert_eq!(format!("{}", PixelLayout::Rgba8), "8-bit RGBA");
    }
}

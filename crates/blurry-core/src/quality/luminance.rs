use rayon::prelude::*;

use crate::consts::{
    CHANNEL_LEVELS, GAMMA_EXPONENT, GAMMA_LINEAR_DIVISOR, GAMMA_LINEAR_THRESHOLD, GAMMA_OFFSET,
    GAMMA_SCALE, LUMINANCE_B, LUMINANCE_G, LUMINANCE_R,
};

/// Linearize one 8-bit sRGB channel value into [0.0, 1.0].
///
/// Linear below [`GAMMA_LINEAR_THRESHOLD`], power curve above it
/// (W3C relative luminance definition).
pub fn linearize(channel: u8) -> f64 {
    let value = channel as f64 / 255.0;
    if value <= GAMMA_LINEAR_THRESHOLD {
        value / GAMMA_LINEAR_DIVISOR
    } else {
        ((value + GAMMA_OFFSET) / GAMMA_SCALE).powf(GAMMA_EXPONENT)
    }
}

/// Relative luminance of every 8-bit color, precomputed.
///
/// Holds all 2^24 (b, g, r) combinations as `f64` (128 MiB). Built once, then
/// only read; share it between threads through an `Arc`.
pub struct LuminanceTable {
    values: Box<[f64]>,
}

impl LuminanceTable {
    /// Build the full table. Red planes are filled in parallel.
    pub fn new() -> Self {
        let mut red = [0.0f64; CHANNEL_LEVELS];
        let mut green = [0.0f64; CHANNEL_LEVELS];
        let mut blue = [0.0f64; CHANNEL_LEVELS];
        for level in 0..CHANNEL_LEVELS {
            let linear = linearize(level as u8);
            red[level] = linear * LUMINANCE_R;
            green[level] = linear * LUMINANCE_G;
            blue[level] = linear * LUMINANCE_B;
        }

        let plane = CHANNEL_LEVELS * CHANNEL_LEVELS;
        let mut values = vec![0.0f64; plane * CHANNEL_LEVELS];
        values
            .par_chunks_mut(plane)
            .enumerate()
            .for_each(|(r, red_plane)| {
                for g in 0..CHANNEL_LEVELS {
                    let row = &mut red_plane[g * CHANNEL_LEVELS..(g + 1) * CHANNEL_LEVELS];
                    for (b, value) in row.iter_mut().enumerate() {
                        *value = red[r] + green[g] + blue[b];
                    }
                }
            });

        Self {
            values: values.into_boxed_slice(),
        }
    }

    /// Luminance of the color with the given blue, green and red bytes.
    #[inline]
    pub fn lookup(&self, b: u8, g: u8, r: u8) -> f64 {
        self.values[Self::index(b, g, r)]
    }

    /// Luminance of the pixel starting at `offset` in an interleaved BGR buffer.
    #[inline]
    pub fn lookup_bgr(&self, bytes: &[u8], offset: usize) -> f64 {
        self.lookup(bytes[offset], bytes[offset + 1], bytes[offset + 2])
    }

    #[inline]
    fn index(b: u8, g: u8, r: u8) -> usize {
        ((r as usize) << 16) | ((g as usize) << 8) | b as usize
    }

    /// Number of entries, always 2^24.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Default for LuminanceTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LuminanceTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LuminanceTable")
            .field("entries", &self.values.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn linearize_endpoints() {
        assert_eq!(linearize(0), 0.0);
        assert_relative_eq!(linearize(255), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn linearize_mid_gray() {
        // sRGB 128 is about 21.6% linear light
        assert_relative_eq!(linearize(128), 0.2158605, epsilon = 1e-6);
    }

    #[test]
    fn linearize_is_monotonic() {
        for level in 1..=255u8 {
            assert!(linearize(level) > linearize(level - 1), "level {level}");
        }
    }

    #[test]
    fn linear_segment_below_threshold() {
        // 10 / 255 = 0.0392... is just under the threshold
        let expected = (10.0 / 255.0) / GAMMA_LINEAR_DIVISOR;
        assert_eq!(linearize(10), expected);
    }

    #[test]
    fn index_packs_red_green_blue() {
        assert_eq!(LuminanceTable::index(0, 0, 0), 0);
        assert_eq!(LuminanceTable::index(1, 0, 0), 1);
        assert_eq!(LuminanceTable::index(0, 1, 0), 256);
        assert_eq!(LuminanceTable::index(0, 0, 1), 65_536);
        assert_eq!(LuminanceTable::index(255, 255, 255), (1 << 24) - 1);
    }
}

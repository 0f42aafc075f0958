/// Default fraction of rows/columns scanned. For images of 5 or more
/// megapixels, 1% of the lines is enough for a stable score.
pub const DEFAULT_SAMPLE_COVERAGE: f32 = 0.01;

/// Stripe count used when `extent * coverage` rounds down to zero.
/// Smaller images get one stripe per line instead.
pub const FALLBACK_STRIPE_COUNT: usize = 100;

/// Bytes per pixel in the only scorable layout (B, G, R).
pub const BGR_BYTES_PER_PIXEL: usize = 3;

/// W3C relative luminance coefficient for the red channel.
pub const LUMINANCE_R: f64 = 0.2126;

/// W3C relative luminance coefficient for the green channel.
pub const LUMINANCE_G: f64 = 0.7152;

/// W3C relative luminance coefficient for the blue channel.
pub const LUMINANCE_B: f64 = 0.0722;

/// Normalized channel value at or below which linearization is a plain
/// division instead of the power curve.
pub const GAMMA_LINEAR_THRESHOLD: f64 = 0.03928;

/// Divisor of the linear segment of the sRGB transfer curve.
pub const GAMMA_LINEAR_DIVISOR: f64 = 12.92;

/// Offset of the power segment of the sRGB transfer curve.
pub const GAMMA_OFFSET: f64 = 0.055;

/// Divisor of the power segment of the sRGB transfer curve.
pub const GAMMA_SCALE: f64 = 1.055;

/// Exponent of the power segment of the sRGB transfer curve.
pub const GAMMA_EXPONENT: f64 = 2.4;

/// Number of distinct values per 8-bit channel.
pub const CHANNEL_LEVELS: usize = 256;

/// Marker inserted between a file stem and its score.
pub const SCORE_MARKER: &str = " __";

/// Decimal places of the score written into file names.
pub const SCORE_DECIMALS: usize = 4;

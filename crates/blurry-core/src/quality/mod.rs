pub mod contrast;
pub mod luminance;

pub use contrast::{contrast_score, ContrastScorer, StripePlan};
pub use luminance::LuminanceTable;

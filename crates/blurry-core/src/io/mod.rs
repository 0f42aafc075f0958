pub mod decode;
pub mod discover;

pub use decode::{ImageDecoder, RustDecoder};
pub use discover::{collect_images, ExtensionClassifier, ImageClassifier};

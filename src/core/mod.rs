pub mod state;
pub mod types;

pub use types::{CompressionRequest, EncodeOptions, EncodedImage, ImageInfo, SizeProfile};

//! Image compression strategy engine on top of libvips.
//!
//! The crate exposes a small synchronous surface: [`compress`] routes each
//! request to exactly one strategy (single attempt, quality search, format
//! selection, or the large-source fallback), [`image_info`] inspects a
//! source without encoding, and [`initialize`]/[`shutdown`] manage the
//! engine lifecycle explicitly when lazy initialization is not wanted.
//!
//! All codec work is serialized behind one process-wide lock; callers may
//! invoke the surface from any number of threads.

// Module declarations in dependency order
pub mod core;
pub mod processing;
pub mod utils;

// Public exports for external consumers
pub use crate::core::{CompressionRequest, EncodeOptions, EncodedImage, ImageInfo, SizeProfile};
pub use crate::processing::{
    compress, compress_fast_webp, image_info, initialize, self_test, shutdown,
};
pub use crate::utils::{CompressorError, CompressorResult, ImageFormat, OutputFormat};
